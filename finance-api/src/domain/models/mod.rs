mod finance;
mod ids;
mod organization;
mod project;
mod rate_card;
mod task;

pub use finance::*;
pub use ids::*;
pub use organization::*;
pub use project::*;
pub use rate_card::*;
pub use task::*;
