//! Single source of truth for the costing settings the surfaces display.
//!
//! Surfaces never write here directly. Every mutation goes through
//! [`CostingUpdater`], which only publishes values the server confirmed, so
//! all subscribers see the same snapshot after a successful write.

use std::{collections::BTreeMap, sync::Arc};

use costing::{CalculationMethodPolicy, Currency, Money, PolicyError};
use tokio::sync::watch;
use uuid::Uuid;

use crate::{
    gateway::{FinanceGateway, GatewayError},
    models::{OrganizationSettings, ProjectSettings},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostingSnapshot {
    pub organization: Option<OrganizationSettings>,
    pub projects: BTreeMap<Uuid, ProjectSettings>,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    sender: Arc<watch::Sender<CostingSnapshot>>,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(CostingSnapshot::default());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Receiver that is notified after every confirmed write.
    pub fn subscribe(&self) -> watch::Receiver<CostingSnapshot> {
        self.sender.subscribe()
    }

    pub fn snapshot(&self) -> CostingSnapshot {
        self.sender.borrow().clone()
    }

    pub fn organization(&self) -> Option<OrganizationSettings> {
        self.sender.borrow().organization.clone()
    }

    pub fn project(&self, project_id: Uuid) -> Option<ProjectSettings> {
        self.sender.borrow().projects.get(&project_id).cloned()
    }

    fn confirm_organization(&self, organization: OrganizationSettings) {
        self.sender
            .send_modify(|snapshot| snapshot.organization = Some(organization));
    }

    fn confirm_project(&self, project: ProjectSettings) {
        self.sender.send_modify(|snapshot| {
            snapshot.projects.insert(project.id, project);
        });
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// Rejected locally, nothing was sent.
    #[error(transparent)]
    Validation(#[from] PolicyError),

    #[error(transparent)]
    Persistence(#[from] GatewayError),

    #[error("{0} settings are not loaded")]
    NotLoaded(&'static str),
}

/// A value as the server now holds it.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmed<T> {
    pub value: T,
    /// False when the request matched the current value and was not sent.
    pub changed: bool,
}

impl<T> Confirmed<T> {
    fn unchanged(value: T) -> Self {
        Self {
            value,
            changed: false,
        }
    }

    fn saved(value: T) -> Self {
        Self {
            value,
            changed: true,
        }
    }
}

/// The one write path into the [`ConfigStore`].
///
/// Validates through the costing policy before any request, then publishes
/// what the gateway returns.
#[derive(Clone)]
pub struct CostingUpdater {
    gateway: Arc<dyn FinanceGateway>,
    store: ConfigStore,
}

impl CostingUpdater {
    pub fn new(gateway: Arc<dyn FinanceGateway>, store: ConfigStore) -> Self {
        Self { gateway, store }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub async fn load_organization(&self) -> Result<OrganizationSettings, UpdateError> {
        let organization = self.gateway.organization().await?;
        self.store.confirm_organization(organization.clone());
        Ok(organization)
    }

    pub async fn load_project(&self, project_id: Uuid) -> Result<ProjectSettings, UpdateError> {
        let project = self.gateway.project(project_id).await?;
        self.store.confirm_project(project.clone());
        Ok(project)
    }

    pub async fn update_organization_method(
        &self,
        method: &str,
        hours_per_day: Option<f64>,
    ) -> Result<Confirmed<OrganizationSettings>, UpdateError> {
        let current = self
            .store
            .organization()
            .ok_or(UpdateError::NotLoaded("organization"))?;
        let validated = CalculationMethodPolicy::validate(method, hours_per_day, &current.costing())?;
        if !validated.changed {
            return Ok(Confirmed::unchanged(current));
        }

        let saved = self
            .gateway
            .update_organization_calculation_method(&validated.config)
            .await?;
        self.store.confirm_organization(saved.clone());
        Ok(Confirmed::saved(saved))
    }

    pub async fn update_project_method(
        &self,
        project_id: Uuid,
        method: &str,
        hours_per_day: Option<f64>,
    ) -> Result<Confirmed<ProjectSettings>, UpdateError> {
        let current = self
            .store
            .project(project_id)
            .ok_or(UpdateError::NotLoaded("project"))?;
        let validated = CalculationMethodPolicy::validate(method, hours_per_day, &current.costing())?;
        if !validated.changed {
            return Ok(Confirmed::unchanged(current));
        }

        let saved = self
            .gateway
            .update_project_calculation_method(project_id, &validated.config)
            .await?;
        self.store.confirm_project(saved.clone());
        Ok(Confirmed::saved(saved))
    }

    pub async fn update_project_budget(
        &self,
        project_id: Uuid,
        budget: f64,
        currency: &str,
    ) -> Result<Confirmed<ProjectSettings>, UpdateError> {
        let current = self
            .store
            .project(project_id)
            .ok_or(UpdateError::NotLoaded("project"))?;
        let budget = Money::from_f64(budget, "budget")?;
        let currency = Currency::parse(currency)?;
        if budget == current.budget && currency == current.currency {
            return Ok(Confirmed::unchanged(current));
        }

        let saved = self
            .gateway
            .update_project_budget(project_id, budget, currency)
            .await?;
        self.store.confirm_project(saved.clone());
        Ok(Confirmed::saved(saved))
    }
}

#[cfg(test)]
mod tests {
    use costing::{CalculationMethod, CostingConfig, HoursPerDay};

    use super::*;
    use crate::testing::MockGateway;

    async fn loaded(gateway: &Arc<MockGateway>) -> CostingUpdater {
        let updater = CostingUpdater::new(gateway.clone(), ConfigStore::new());
        updater.load_organization().await.unwrap();
        updater.load_project(gateway.project_id()).await.unwrap();
        updater
    }

    #[tokio::test]
    async fn confirmed_writes_reach_every_subscriber() {
        let gateway = Arc::new(MockGateway::new());
        let updater = loaded(&gateway).await;
        let mut first = updater.store().subscribe();
        let mut second = updater.store().subscribe();

        updater
            .update_organization_method("man_days", Some(7.5))
            .await
            .unwrap();

        first.changed().await.unwrap();
        second.changed().await.unwrap();
        let expected = CostingConfig::ManDays {
            hours_per_day: HoursPerDay::from_f64(7.5).unwrap(),
        };
        assert_eq!(first.borrow().organization.as_ref().unwrap().costing(), expected);
        assert_eq!(second.borrow().organization.as_ref().unwrap().costing(), expected);
    }

    #[tokio::test]
    async fn invalid_hours_never_reach_the_gateway() {
        let gateway = Arc::new(MockGateway::new());
        let updater = loaded(&gateway).await;

        for hours in [0.0, 24.01, -5.0, f64::NAN] {
            let result = updater.update_organization_method("man_days", Some(hours)).await;
            assert!(matches!(
                result,
                Err(UpdateError::Validation(PolicyError::InvalidHoursPerDay(_)))
            ));
        }
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn unchanged_method_is_not_sent() {
        let gateway = Arc::new(MockGateway::new());
        let updater = loaded(&gateway).await;

        let confirmed = updater
            .update_organization_method("hourly", Some(12.0))
            .await
            .unwrap();

        assert!(!confirmed.changed);
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn failed_writes_leave_the_store_untouched() {
        let gateway = Arc::new(MockGateway::new());
        let updater = loaded(&gateway).await;
        let before = updater.store().snapshot();
        gateway.fail_writes(true);

        let result = updater
            .update_project_method(gateway.project_id(), "man_days", Some(8.0))
            .await;

        assert!(matches!(result, Err(UpdateError::Persistence(_))));
        assert_eq!(updater.store().snapshot(), before);
    }

    #[tokio::test]
    async fn project_override_keeps_the_organization_formula() {
        let gateway = Arc::new(MockGateway::new());
        let updater = loaded(&gateway).await;

        let project = updater
            .update_project_method(gateway.project_id(), "man_days", Some(7.5))
            .await
            .unwrap()
            .value;

        assert!(project
            .formula()
            .ends_with("daily rate (derived from 7.5h/day)"));
        let organization = updater.store().organization().unwrap();
        assert_eq!(organization.calculation_method, CalculationMethod::Hourly);
        assert_eq!(organization.formula(), "estimated hours × hourly rate");
    }

    #[tokio::test]
    async fn budget_is_validated_locally() {
        let gateway = Arc::new(MockGateway::new());
        let updater = loaded(&gateway).await;

        let negative = updater
            .update_project_budget(gateway.project_id(), -1.0, "usd")
            .await;
        let unknown = updater
            .update_project_budget(gateway.project_id(), 10.0, "doubloons")
            .await;

        assert!(matches!(
            negative,
            Err(UpdateError::Validation(PolicyError::InvalidAmount { field: "budget" }))
        ));
        assert!(matches!(
            unknown,
            Err(UpdateError::Validation(PolicyError::InvalidCurrency(_)))
        ));
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn updates_require_loaded_settings() {
        let gateway = Arc::new(MockGateway::new());
        let updater = CostingUpdater::new(gateway.clone(), ConfigStore::new());

        let result = updater.update_organization_method("hourly", None).await;

        assert!(matches!(result, Err(UpdateError::NotLoaded("organization"))));
    }
}
