mod costing_gateway;
mod finance;
mod rate_cards;

use costing::{Decimal, Money};

use crate::domain::FinanceError;

pub use costing_gateway::PostgresCostingRepository;
pub use finance::PostgresFinanceRepository;
pub use rate_cards::PostgresRateCardRepository;

fn storage_error(err: sqlx::Error) -> FinanceError {
    FinanceError::persistence(err.to_string())
}

fn stored_money(value: Decimal, field: &'static str) -> Result<Money, FinanceError> {
    Money::new(value, field)
        .map_err(|err| FinanceError::persistence(format!("stored value is invalid: {err}")))
}
