//! Persistence gateway port (outbound).
//!
//! Accepts already validated costing values; validation happens in the
//! service before anything reaches this port.

use async_trait::async_trait;
use costing::{CostingConfig, Currency, Money};

use crate::domain::{
    models::{CostingScope, ProjectId},
    FinanceError,
};

#[async_trait]
pub trait CostingGateway: Send + Sync + 'static {
    /// Stores the method and, for man days, the hours per day of a scope.
    ///
    /// Switching to hourly keeps the stored hours per day.
    async fn save_costing(
        &self,
        scope: &CostingScope,
        config: &CostingConfig,
    ) -> Result<(), FinanceError>;

    async fn save_budget(
        &self,
        project_id: &ProjectId,
        budget: Money,
        currency: Currency,
    ) -> Result<(), FinanceError>;

    async fn save_currency(
        &self,
        project_id: &ProjectId,
        currency: Currency,
    ) -> Result<(), FinanceError>;
}
