use std::sync::Arc;

use async_trait::async_trait;
use costing::CalculationMethodPolicy;

use crate::domain::{
    models::{
        OrganizationId, Project, ProjectId, ProjectRateCardRole, RateCard, RateCardDetails,
        RateCardId,
    },
    ports::{
        inbound::RateCardService,
        outbound::{OrganizationRepository, ProjectRepository, RateCardRepository},
    },
    FinanceError,
};

pub struct RateCardServiceImpl<O, P, R> {
    organizations: Arc<O>,
    projects: Arc<P>,
    rate_cards: Arc<R>,
}

impl<O, P, R> RateCardServiceImpl<O, P, R> {
    pub fn new(organizations: Arc<O>, projects: Arc<P>, rate_cards: Arc<R>) -> Self {
        Self {
            organizations,
            projects,
            rate_cards,
        }
    }
}

impl<O, P, R> RateCardServiceImpl<O, P, R>
where
    P: ProjectRepository,
{
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
impl<O, P, R> RateCardService for RateCardServiceImpl<O, P, R>
where
    O: OrganizationRepository,
    P: ProjectRepository,
    R: RateCardRepository,
{
    async fn list_rate_cards(
        &self,
        organization_id: &OrganizationId,
    ) -> Result<Vec<RateCard>, FinanceError> {
        self.rate_cards.list_rate_cards(organization_id).await
    }

    async fn get_rate_card(
        &self,
        organization_id: &OrganizationId,
        id: &RateCardId,
    ) -> Result<RateCardDetails, FinanceError> {
        let organization = self
            .organizations
            .get_organization(organization_id)
            .await?
            .ok_or(FinanceError::OrganizationNotFound)?;
        let card = self
            .rate_cards
            .get_rate_card(organization_id, id)
            .await?
            .ok_or(FinanceError::RateCardNotFound)?;

        Ok(RateCardDetails {
            card,
            rate_column_label: CalculationMethodPolicy::rate_column_label(
                organization.costing.method(),
            ),
        })
    }

    async fn project_roles(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectRateCardRole>, FinanceError> {
        let project = self.load_project(organization_id, project_id).await?;
        self.rate_cards.project_roles(&project.id).await
    }

    async fn import_rate_card(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
        rate_card_id: &RateCardId,
    ) -> Result<Vec<ProjectRateCardRole>, FinanceError> {
        let project = self.load_project(organization_id, project_id).await?;
        if !self.rate_cards.project_roles(&project.id).await?.is_empty() {
            return Err(FinanceError::RateCardAlreadyImported);
        }

        let card = self
            .rate_cards
            .get_rate_card(organization_id, rate_card_id)
            .await?
            .ok_or(FinanceError::RateCardNotFound)?;

        let roles = self.rate_cards.import_roles(&project.id, &card).await?;
        tracing::info!(
            project_id = %project.id,
            rate_card_id = %card.id,
            imported = roles.len(),
            "rate card imported"
        );
        Ok(roles)
    }

    async fn clear_project_roles(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
    ) -> Result<u64, FinanceError> {
        let project = self.load_project(organization_id, project_id).await?;
        self.rate_cards.clear_project_roles(&project.id).await
    }
}

#[cfg(test)]
mod tests {
    use costing::{CostingConfig, Decimal, HoursPerDay};

    use super::*;
    use crate::adapters::outbound::memory::InMemoryStore;

    fn service(store: &InMemoryStore) -> impl RateCardService {
        let store = Arc::new(store.clone());
        RateCardServiceImpl::new(store.clone(), store.clone(), store)
    }

    #[tokio::test]
    async fn rate_column_follows_organization_method() {
        let store = InMemoryStore::new();
        let org = store.add_organization(CostingConfig::ManDays {
            hours_per_day: HoursPerDay::default(),
        });
        let card = store.add_rate_card(&org, "Standard", &[("Engineer", Some(80))]);

        let details = service(&store).get_rate_card(&org, &card).await.unwrap();

        assert_eq!(details.rate_column_label, "Rate per man day");
        assert_eq!(details.card.roles.len(), 1);
    }

    #[tokio::test]
    async fn import_skips_incomplete_roles() {
        let store = InMemoryStore::new();
        let org = store.add_organization(CostingConfig::Hourly);
        let project = store.add_project(&org, CostingConfig::Hourly);
        let card = store.add_rate_card(
            &org,
            "Standard",
            &[("Engineer", Some(80)), ("Designer", None)],
        );

        let roles = service(&store)
            .import_rate_card(&org, &project, &card)
            .await
            .unwrap();

        assert_eq!(roles.len(), 1);
        assert_eq!(roles[0].job_title, "Engineer");
        assert_eq!(roles[0].rate.amount(), Decimal::from(80));
    }

    #[tokio::test]
    async fn second_import_conflicts_until_cleared() {
        let store = InMemoryStore::new();
        let org = store.add_organization(CostingConfig::Hourly);
        let project = store.add_project(&org, CostingConfig::Hourly);
        let card = store.add_rate_card(&org, "Standard", &[("Engineer", Some(80))]);
        let service = service(&store);

        service.import_rate_card(&org, &project, &card).await.unwrap();
        let err = service
            .import_rate_card(&org, &project, &card)
            .await
            .unwrap_err();
        assert!(matches!(err, FinanceError::RateCardAlreadyImported));

        assert_eq!(service.clear_project_roles(&org, &project).await.unwrap(), 1);
        assert!(service.import_rate_card(&org, &project, &card).await.is_ok());
    }

    #[tokio::test]
    async fn foreign_rate_cards_are_not_found() {
        let store = InMemoryStore::new();
        let org = store.add_organization(CostingConfig::Hourly);
        let other = store.add_organization(CostingConfig::Hourly);
        let card = store.add_rate_card(&other, "Theirs", &[]);

        let err = service(&store).get_rate_card(&org, &card).await.unwrap_err();
        assert!(matches!(err, FinanceError::RateCardNotFound));
    }
}
