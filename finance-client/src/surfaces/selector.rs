use costing::{CalculationMethod, HoursPerDay};
use uuid::Uuid;

use super::Busy;
use crate::{
    models::ProjectSettings,
    notice::Notice,
    store::{CostingUpdater, UpdateError},
};

/// Project-level method picker that saves as soon as a value changes.
pub struct MethodSelector {
    updater: CostingUpdater,
    confirmed: ProjectSettings,
    hours_per_day: f64,
    busy: Busy,
}

impl MethodSelector {
    pub fn new(updater: CostingUpdater, confirmed: ProjectSettings) -> Self {
        Self {
            hours_per_day: confirmed.hours_per_day.as_f64(),
            updater,
            confirmed,
            busy: Busy::default(),
        }
    }

    pub fn project_id(&self) -> Uuid {
        self.confirmed.id
    }

    pub fn confirmed(&self) -> &ProjectSettings {
        &self.confirmed
    }

    /// Always the confirmed method; a failed switch never shows.
    pub fn method(&self) -> CalculationMethod {
        self.confirmed.calculation_method
    }

    pub fn hours_per_day(&self) -> f64 {
        self.hours_per_day
    }

    pub fn formula(&self) -> String {
        self.confirmed.formula()
    }

    pub fn busy(&self) -> Busy {
        self.busy.clone()
    }

    pub async fn select_method(&mut self, method: CalculationMethod) -> Notice {
        if method == self.confirmed.calculation_method {
            return Notice::Unchanged;
        }

        match self.submit(method, self.hours_per_day).await {
            Ok(()) => Notice::success(match method {
                CalculationMethod::Hourly => "Switched to hourly rates calculation",
                CalculationMethod::ManDays => "Switched to man days calculation",
            }),
            Err(UpdateError::Validation(err)) => Notice::error(err.to_string()),
            Err(_) => Notice::error("Failed to update calculation method"),
        }
    }

    /// Hours only go to the server while the project is on man days.
    ///
    /// Out-of-range hours are reported and leave the current value alone.
    pub async fn set_hours_per_day(&mut self, hours_per_day: f64) -> Notice {
        let hours_per_day = match HoursPerDay::from_f64(hours_per_day) {
            Ok(hours) => hours.as_f64(),
            Err(err) => return Notice::error(err.to_string()),
        };
        if hours_per_day == self.hours_per_day {
            return Notice::Unchanged;
        }
        self.hours_per_day = hours_per_day;
        if self.confirmed.calculation_method != CalculationMethod::ManDays {
            return Notice::Unchanged;
        }

        match self.submit(CalculationMethod::ManDays, hours_per_day).await {
            Ok(()) => Notice::success("Hours per day updated successfully"),
            Err(UpdateError::Validation(err)) => Notice::error(err.to_string()),
            Err(_) => Notice::error("Failed to update hours per day"),
        }
    }

    async fn submit(&mut self, method: CalculationMethod, hours_per_day: f64) -> Result<(), UpdateError> {
        let _busy = self.busy.start();
        let result = self
            .updater
            .update_project_method(self.confirmed.id, method.as_ref(), Some(hours_per_day))
            .await;

        match result {
            Ok(confirmed) => {
                self.hours_per_day = confirmed.value.hours_per_day.as_f64();
                self.confirmed = confirmed.value;
                Ok(())
            }
            Err(err) => {
                self.hours_per_day = self.confirmed.hours_per_day.as_f64();
                Err(err)
            }
        }
    }
}
