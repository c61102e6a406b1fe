//! The persistence boundary the surfaces write through.

use async_trait::async_trait;
use costing::{CostingConfig, Currency, Money};
use uuid::Uuid;

use crate::models::{OrganizationSettings, ProjectSettings};

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Session expired or invalid. Run `finance-client login` to authenticate.")]
    Unauthorized,

    #[error("Only administrators can change this setting")]
    Forbidden,

    #[error("Not found")]
    NotFound,

    /// The server refused the write, with its message.
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

/// Reads and writes costing settings on the server.
///
/// Writes only take already validated values; nothing invalid reaches here.
#[async_trait]
pub trait FinanceGateway: Send + Sync {
    async fn organization(&self) -> Result<OrganizationSettings, GatewayError>;

    async fn project(&self, project_id: Uuid) -> Result<ProjectSettings, GatewayError>;

    async fn update_organization_calculation_method(
        &self,
        costing: &CostingConfig,
    ) -> Result<OrganizationSettings, GatewayError>;

    async fn update_project_calculation_method(
        &self,
        project_id: Uuid,
        costing: &CostingConfig,
    ) -> Result<ProjectSettings, GatewayError>;

    async fn update_project_budget(
        &self,
        project_id: Uuid,
        budget: Money,
        currency: Currency,
    ) -> Result<ProjectSettings, GatewayError>;
}
