use costing::{CalculationMethod, CalculationMethodPolicy, Currency, Money, PolicyError};

use super::Busy;
use crate::{
    models::ProjectSettings,
    notice::Notice,
    store::{CostingUpdater, UpdateError},
};

/// Project budget settings: budget, currency and calculation method.
///
/// Nothing is sent until [`BudgetDrawer::save`]. The method is written
/// before the budget; if either write fails the draft falls back to whatever
/// the store confirmed.
pub struct BudgetDrawer {
    updater: CostingUpdater,
    confirmed: ProjectSettings,
    draft: Draft,
    busy: Busy,
}

#[derive(Debug, Clone, PartialEq)]
struct Draft {
    budget: f64,
    currency: String,
    method: CalculationMethod,
    hours_per_day: f64,
}

impl From<&ProjectSettings> for Draft {
    fn from(project: &ProjectSettings) -> Self {
        Self {
            budget: project.budget.as_f64(),
            currency: project.currency.to_string(),
            method: project.calculation_method,
            hours_per_day: project.hours_per_day.as_f64(),
        }
    }
}

impl BudgetDrawer {
    pub fn open(updater: CostingUpdater, confirmed: ProjectSettings) -> Self {
        Self {
            draft: Draft::from(&confirmed),
            updater,
            confirmed,
            busy: Busy::default(),
        }
    }

    pub fn confirmed(&self) -> &ProjectSettings {
        &self.confirmed
    }

    pub fn budget(&self) -> f64 {
        self.draft.budget
    }

    pub fn currency(&self) -> &str {
        &self.draft.currency
    }

    pub fn method(&self) -> CalculationMethod {
        self.draft.method
    }

    pub fn hours_per_day(&self) -> f64 {
        self.draft.hours_per_day
    }

    pub fn busy(&self) -> Busy {
        self.busy.clone()
    }

    pub fn set_budget(&mut self, budget: f64) {
        self.draft.budget = budget;
    }

    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.draft.currency = currency.into();
    }

    pub fn select_method(&mut self, method: CalculationMethod) {
        self.draft.method = method;
    }

    pub fn set_hours_per_day(&mut self, hours_per_day: f64) {
        self.draft.hours_per_day = hours_per_day;
    }

    /// Hours per day only count while the draft method is man days.
    pub fn has_changes(&self) -> bool {
        let confirmed = Draft::from(&self.confirmed);
        let mut draft = self.draft.clone();
        if draft.method == CalculationMethod::Hourly {
            draft.hours_per_day = confirmed.hours_per_day;
        }
        draft != confirmed
    }

    pub fn cancel(&mut self) {
        self.draft = Draft::from(&self.confirmed);
    }

    pub async fn save(&mut self) -> Notice {
        if !self.has_changes() {
            return Notice::Unchanged;
        }
        // Everything is checked up front so an invalid budget cannot leave
        // a half-applied method change behind.
        if let Err(err) = self.validate() {
            return Notice::error(err.to_string());
        }

        let _busy = self.busy.start();
        match self.write().await {
            Ok(false) => Notice::Unchanged,
            Ok(true) => Notice::success("Budget settings updated successfully"),
            Err(UpdateError::Validation(err)) => Notice::error(err.to_string()),
            Err(_) => {
                if let Some(latest) = self.updater.store().project(self.confirmed.id) {
                    self.confirmed = latest;
                }
                self.draft = Draft::from(&self.confirmed);
                Notice::error("Failed to update budget settings")
            }
        }
    }

    fn validate(&self) -> Result<(), PolicyError> {
        CalculationMethodPolicy::validate(
            self.draft.method.as_ref(),
            Some(self.draft.hours_per_day),
            &self.confirmed.costing(),
        )?;
        Money::from_f64(self.draft.budget, "budget")?;
        Currency::parse(&self.draft.currency)?;
        Ok(())
    }

    /// Returns whether either write changed anything.
    async fn write(&mut self) -> Result<bool, UpdateError> {
        let id = self.confirmed.id;
        let method = self
            .updater
            .update_project_method(id, self.draft.method.as_ref(), Some(self.draft.hours_per_day))
            .await?;
        self.confirmed = method.value;

        let budget = self
            .updater
            .update_project_budget(id, self.draft.budget, &self.draft.currency)
            .await?;
        self.confirmed = budget.value;
        self.draft = Draft::from(&self.confirmed);
        Ok(method.changed || budget.changed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{store::ConfigStore, testing::MockGateway};

    async fn drawer(gateway: &Arc<MockGateway>) -> BudgetDrawer {
        let updater = CostingUpdater::new(gateway.clone(), ConfigStore::new());
        let project = updater.load_project(gateway.project_id()).await.unwrap();
        BudgetDrawer::open(updater, project)
    }

    #[tokio::test]
    async fn saves_budget_currency_and_method_together() {
        let gateway = Arc::new(MockGateway::new());
        let mut drawer = drawer(&gateway).await;

        drawer.set_budget(2500.5);
        drawer.set_currency("EUR");
        drawer.select_method(CalculationMethod::ManDays);
        drawer.set_hours_per_day(7.5);
        let notice = drawer.save().await;

        assert_eq!(notice, Notice::success("Budget settings updated successfully"));
        let confirmed = drawer.confirmed();
        assert_eq!(confirmed.currency, Currency::Eur);
        assert_eq!(confirmed.budget.to_string(), "2500.50");
        assert_eq!(confirmed.calculation_method, CalculationMethod::ManDays);
        assert!(!drawer.has_changes());
    }

    #[tokio::test]
    async fn hours_edit_while_hourly_is_not_a_change() {
        let gateway = Arc::new(MockGateway::new());
        let mut drawer = drawer(&gateway).await;

        drawer.set_hours_per_day(6.0);

        assert!(!drawer.has_changes());
        assert_eq!(drawer.save().await, Notice::Unchanged);
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn save_that_sends_nothing_reports_unchanged() {
        let gateway = Arc::new(MockGateway::new());
        let mut drawer = drawer(&gateway).await;
        let currency = drawer.currency().to_uppercase();

        drawer.set_currency(currency);
        let notice = drawer.save().await;

        assert_eq!(notice, Notice::Unchanged);
        assert_eq!(gateway.write_count(), 0);
    }

    #[tokio::test]
    async fn invalid_budget_blocks_the_method_change_too() {
        let gateway = Arc::new(MockGateway::new());
        let mut drawer = drawer(&gateway).await;

        drawer.select_method(CalculationMethod::ManDays);
        drawer.set_budget(-10.0);
        let notice = drawer.save().await;

        assert!(notice.is_error());
        assert_eq!(gateway.write_count(), 0);
        assert_eq!(drawer.method(), CalculationMethod::ManDays);
    }

    #[tokio::test]
    async fn failed_save_reverts_the_draft() {
        let gateway = Arc::new(MockGateway::new());
        let mut drawer = drawer(&gateway).await;
        gateway.fail_writes(true);

        drawer.select_method(CalculationMethod::ManDays);
        drawer.set_budget(900.0);
        let notice = drawer.save().await;

        assert_eq!(notice, Notice::error("Failed to update budget settings"));
        assert_eq!(drawer.method(), CalculationMethod::Hourly);
        assert_eq!(drawer.budget(), 0.0);
        assert!(!drawer.busy().is_set());
    }

    #[tokio::test]
    async fn cancel_discards_the_draft() {
        let gateway = Arc::new(MockGateway::new());
        let mut drawer = drawer(&gateway).await;

        drawer.set_currency("sek");
        assert!(drawer.has_changes());
        drawer.cancel();

        assert!(!drawer.has_changes());
        assert_eq!(drawer.save().await, Notice::Unchanged);
    }
}
