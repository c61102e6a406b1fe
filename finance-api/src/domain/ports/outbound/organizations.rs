use async_trait::async_trait;

use crate::domain::{
    models::{NewProject, Organization, OrganizationId, Project, ProjectId},
    FinanceError,
};

/// Outbound port for organization lookups.
#[async_trait]
pub trait OrganizationRepository: Send + Sync + 'static {
    async fn get_organization(
        &self,
        id: &OrganizationId,
    ) -> Result<Option<Organization>, FinanceError>;
}

/// Outbound port for project storage.
///
/// Every lookup is scoped to an organization; foreign projects are `None`.
#[async_trait]
pub trait ProjectRepository: Send + Sync + 'static {
    async fn create_project(&self, project: &NewProject) -> Result<Project, FinanceError>;

    async fn get_project(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
    ) -> Result<Option<Project>, FinanceError>;
}
