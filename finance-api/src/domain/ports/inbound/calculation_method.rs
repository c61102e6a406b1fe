use async_trait::async_trait;

use crate::domain::{
    models::{CostingUpdate, Organization, OrganizationId, Project, ProjectId},
    FinanceError,
};

/// Inbound port for choosing and persisting costing modes, budgets and
/// currencies.
///
/// Raw user input is passed through unparsed; the service validates it
/// before anything is persisted.
#[async_trait]
pub trait CostingService: Send + Sync + 'static {
    async fn get_organization(&self, id: &OrganizationId) -> Result<Organization, FinanceError>;

    /// Only persists when the normalized config differs from the current one.
    async fn update_organization_method(
        &self,
        id: &OrganizationId,
        method: &str,
        hours_per_day: Option<f64>,
    ) -> Result<CostingUpdate<Organization>, FinanceError>;

    /// Creates a project inheriting the organization's costing defaults.
    async fn create_project(
        &self,
        organization_id: &OrganizationId,
        name: &str,
    ) -> Result<Project, FinanceError>;

    async fn get_project(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
    ) -> Result<Project, FinanceError>;

    async fn update_project_method(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
        method: &str,
        hours_per_day: Option<f64>,
    ) -> Result<CostingUpdate<Project>, FinanceError>;

    async fn update_project_currency(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
        currency: &str,
    ) -> Result<Project, FinanceError>;

    /// Keeps the current currency when `currency` is `None`.
    async fn update_project_budget(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
        budget: f64,
        currency: Option<&str>,
    ) -> Result<Project, FinanceError>;
}
