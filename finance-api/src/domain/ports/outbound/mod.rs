mod costing_gateway;
mod organizations;
mod project_finance;
mod rate_cards;

pub use costing_gateway::*;
pub use organizations::*;
pub use project_finance::*;
pub use rate_cards::*;
