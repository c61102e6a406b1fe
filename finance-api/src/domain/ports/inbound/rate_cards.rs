use async_trait::async_trait;

use crate::domain::{
    models::{
        OrganizationId, ProjectId, ProjectRateCardRole, RateCard, RateCardDetails, RateCardId,
    },
    FinanceError,
};

#[async_trait]
pub trait RateCardService: Send + Sync + 'static {
    async fn list_rate_cards(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<RateCard>, FinanceError>;

    /// The card with its rate column labelled for the organization's method.
    async fn get_rate_card(
        &self,
        organization_id: &OrganizationId,
        id: &RateCardId,
    ) -> Result<RateCardDetails, FinanceError>;

    async fn project_roles(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectRateCardRole>, FinanceError>;

    /// Fails with `RateCardAlreadyImported` when the project already has roles.
    async fn import_rate_card(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
        rate_card_id: &RateCardId,
    ) -> Result<Vec<ProjectRateCardRole>, FinanceError>;

    async fn clear_project_roles(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
    ) -> Result<u64, FinanceError>;
}
