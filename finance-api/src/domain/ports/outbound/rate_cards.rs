use async_trait::async_trait;

use crate::domain::{
    models::{OrganizationId, ProjectId, ProjectRateCardRole, RateCard, RateCardId},
    FinanceError,
};

/// Outbound port for organization rate cards and their import into projects.
#[async_trait]
pub trait RateCardRepository: Send + Sync + 'static {
    async fn list_rate_cards(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<RateCard>, FinanceError>;

    async fn get_rate_card(
        &self,
        organization_id: &OrganizationId,
        id: &RateCardId,
    ) -> Result<Option<RateCard>, FinanceError>;

    async fn project_roles(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectRateCardRole>, FinanceError>;

    /// Copies the importable roles of `card` into the project.
    async fn import_roles(
        &self,
        project_id: &ProjectId,
        card: &RateCard,
    ) -> Result<Vec<ProjectRateCardRole>, FinanceError>;

    async fn clear_project_roles(&self, project_id: &ProjectId) -> Result<u64, FinanceError>;
}
