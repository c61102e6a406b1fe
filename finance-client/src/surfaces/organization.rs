use costing::{CalculationMethod, CalculationMethodPolicy, CostingConfig};

use super::Busy;
use crate::{
    models::OrganizationSettings,
    notice::Notice,
    store::{CostingUpdater, UpdateError},
};

/// Admin-center form for the organization's default calculation method.
pub struct OrganizationMethodForm {
    updater: CostingUpdater,
    confirmed: OrganizationSettings,
    method: CalculationMethod,
    hours_per_day: Option<f64>,
    busy: Busy,
}

impl OrganizationMethodForm {
    pub fn new(updater: CostingUpdater, confirmed: OrganizationSettings) -> Self {
        Self {
            method: confirmed.calculation_method,
            hours_per_day: Some(confirmed.hours_per_day.as_f64()),
            updater,
            confirmed,
            busy: Busy::default(),
        }
    }

    pub fn confirmed(&self) -> &OrganizationSettings {
        &self.confirmed
    }

    pub fn method(&self) -> CalculationMethod {
        self.method
    }

    pub fn hours_per_day(&self) -> Option<f64> {
        self.hours_per_day
    }

    pub fn busy(&self) -> Busy {
        self.busy.clone()
    }

    pub fn select_method(&mut self, method: CalculationMethod) {
        self.method = method;
    }

    pub fn set_hours_per_day(&mut self, hours_per_day: Option<f64>) {
        self.hours_per_day = hours_per_day;
    }

    pub fn has_changes(&self) -> bool {
        CalculationMethodPolicy::validate(
            self.method.as_ref(),
            self.hours_per_day,
            &self.confirmed.costing(),
        )
        .map(|validated| validated.changed)
        .unwrap_or(true)
    }

    /// Formula for the draft, or the confirmed one while the draft is invalid.
    pub fn formula(&self) -> String {
        match CalculationMethodPolicy::validate(
            self.method.as_ref(),
            self.hours_per_day,
            &CostingConfig::Hourly,
        ) {
            Ok(validated) => CalculationMethodPolicy::describe_formula(&validated.config),
            Err(_) => self.confirmed.formula(),
        }
    }

    pub async fn save(&mut self) -> Notice {
        let _busy = self.busy.start();
        let result = self
            .updater
            .update_organization_method(self.method.as_ref(), self.hours_per_day)
            .await;

        match result {
            Ok(confirmed) => {
                self.reset_to(confirmed.value);
                if !confirmed.changed {
                    return Notice::Unchanged;
                }
                Notice::success(match self.confirmed.calculation_method {
                    CalculationMethod::Hourly => "Organization switched to hourly rates calculation",
                    CalculationMethod::ManDays => "Organization switched to man days calculation",
                })
            }
            // Draft stays so the user can correct it.
            Err(UpdateError::Validation(err)) => Notice::error(err.to_string()),
            Err(_) => {
                self.reset_to(self.confirmed.clone());
                Notice::error("Failed to update calculation method")
            }
        }
    }

    fn reset_to(&mut self, confirmed: OrganizationSettings) {
        self.method = confirmed.calculation_method;
        self.hours_per_day = Some(confirmed.hours_per_day.as_f64());
        self.confirmed = confirmed;
    }
}
