mod calculation_method;
mod project_finance;
mod rate_cards;
mod task_finance;

pub use calculation_method::CostingServiceImpl;
pub use project_finance::ProjectFinanceServiceImpl;
pub use rate_cards::RateCardServiceImpl;
