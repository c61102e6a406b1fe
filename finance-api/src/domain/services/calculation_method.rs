use std::sync::Arc;

use async_trait::async_trait;
use costing::{CalculationMethodPolicy, Currency, Money};

use crate::domain::{
    models::{
        CostingScope, CostingUpdate, NewProject, Organization, OrganizationId, Project, ProjectId,
    },
    ports::{
        inbound::CostingService,
        outbound::{CostingGateway, OrganizationRepository, ProjectRepository},
    },
    FinanceError,
};

/// Implementation of the CostingService inbound port.
///
/// Every mutation is validated through [`CalculationMethodPolicy`] before the
/// gateway is called, so invalid input never reaches storage.
pub struct CostingServiceImpl<G, O, P> {
    gateway: Arc<G>,
    organizations: Arc<O>,
    projects: Arc<P>,
}

impl<G, O, P> CostingServiceImpl<G, O, P> {
    pub fn new(gateway: Arc<G>, organizations: Arc<O>, projects: Arc<P>) -> Self {
        Self {
            gateway,
            organizations,
            projects,
        }
    }
}

impl<G, O, P> CostingServiceImpl<G, O, P>
where
    O: OrganizationRepository,
    P: ProjectRepository,
{
    async fn load_organization(&self, id: &OrganizationId) -> Result<Organization, FinanceError> {
        self.organizations
            .get_organization(id)
            .await?
            .ok_or(FinanceError::OrganizationNotFound)
    }

    async fn load_project(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
    ) -> Result<Project, FinanceError> {
        self.projects
            .get_project(organization_id, id)
            .await?
            .ok_or(FinanceError::ProjectNotFound)
    }
}

#[async_trait]
impl<G, O, P> CostingService for CostingServiceImpl<G, O, P>
where
    G: CostingGateway,
    O: OrganizationRepository,
    P: ProjectRepository,
{
    async fn get_organization(&self, id: &OrganizationId) -> Result<Organization, FinanceError> {
        self.load_organization(id).await
    }

    async fn update_organization_method(
        &self,
        id: &OrganizationId,
        method: &str,
        hours_per_day: Option<f64>,
    ) -> Result<CostingUpdate<Organization>, FinanceError> {
        let mut organization = self.load_organization(id).await?;
        let validated =
            CalculationMethodPolicy::validate(method, hours_per_day, &organization.costing)?;

        if !validated.changed {
            return Ok(CostingUpdate {
                value: organization,
                changed: false,
            });
        }

        self.gateway
            .save_costing(&CostingScope::Organization(*id), &validated.config)
            .await?;

        organization.costing = validated.config;
        if let Some(hours) = validated.config.hours_per_day() {
            organization.stored_hours_per_day = hours;
        }
        tracing::info!(
            organization_id = %id,
            method = %validated.config.method(),
            "organization calculation method updated"
        );

        Ok(CostingUpdate {
            value: organization,
            changed: true,
        })
    }

    async fn create_project(
        &self,
        organization_id: &OrganizationId,
        name: &str,
    ) -> Result<Project, FinanceError> {
        let organization = self.load_organization(organization_id).await?;
        let new_project = NewProject {
            organization_id: *organization_id,
            name: name.trim().to_string(),
            costing: organization.costing,
            stored_hours_per_day: organization.hours_per_day(),
        };

        self.projects.create_project(&new_project).await
    }

    async fn get_project(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
    ) -> Result<Project, FinanceError> {
        self.load_project(organization_id, id).await
    }

    async fn update_project_method(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
        method: &str,
        hours_per_day: Option<f64>,
    ) -> Result<CostingUpdate<Project>, FinanceError> {
        let mut project = self.load_project(organization_id, id).await?;
        let validated = CalculationMethodPolicy::validate(method, hours_per_day, &project.costing)?;

        if !validated.changed {
            return Ok(CostingUpdate {
                value: project,
                changed: false,
            });
        }

        self.gateway
            .save_costing(&CostingScope::Project(*id), &validated.config)
            .await?;

        project.costing = validated.config;
        if let Some(hours) = validated.config.hours_per_day() {
            project.stored_hours_per_day = hours;
        }
        tracing::info!(
            project_id = %id,
            method = %validated.config.method(),
            "project calculation method updated"
        );

        Ok(CostingUpdate {
            value: project,
            changed: true,
        })
    }

    async fn update_project_currency(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
        currency: &str,
    ) -> Result<Project, FinanceError> {
        let currency = Currency::parse(currency)?;
        let mut project = self.load_project(organization_id, id).await?;

        self.gateway.save_currency(id, currency).await?;
        project.currency = currency;

        Ok(project)
    }

    async fn update_project_budget(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
        budget: f64,
        currency: Option<&str>,
    ) -> Result<Project, FinanceError> {
        let budget = Money::from_f64(budget, "budget")?;
        let currency = currency.map(Currency::parse).transpose()?;
        let mut project = self.load_project(organization_id, id).await?;
        let currency = currency.unwrap_or(project.currency);

        self.gateway.save_budget(id, budget, currency).await?;
        project.budget = budget;
        project.currency = currency;

        Ok(project)
    }
}
