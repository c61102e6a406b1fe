mod calculation_method;
mod project_finance;
mod rate_cards;

pub use calculation_method::*;
pub use project_finance::*;
pub use rate_cards::*;
