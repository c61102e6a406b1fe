use serde::{Deserialize, Serialize};

use crate::{CalculationMethod, HoursPerDay};

/// A costing mode together with the data only that mode needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "calculation_method", rename_all = "snake_case")]
pub enum CostingConfig {
    #[default]
    Hourly,
    ManDays { hours_per_day: HoursPerDay },
}

impl CostingConfig {
    /// Builds the config from a persisted `(method, hours_per_day)` pair.
    ///
    /// The stored factor is dropped for hourly scopes.
    pub fn from_stored(method: CalculationMethod, hours_per_day: HoursPerDay) -> Self {
        match method {
            CalculationMethod::Hourly => Self::Hourly,
            CalculationMethod::ManDays => Self::ManDays { hours_per_day },
        }
    }

    pub fn method(&self) -> CalculationMethod {
        match self {
            Self::Hourly => CalculationMethod::Hourly,
            Self::ManDays { .. } => CalculationMethod::ManDays,
        }
    }

    pub fn hours_per_day(&self) -> Option<HoursPerDay> {
        match self {
            Self::Hourly => None,
            Self::ManDays { hours_per_day } => Some(*hours_per_day),
        }
    }
}
