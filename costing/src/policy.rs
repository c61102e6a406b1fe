//! Decision logic for choosing, validating and applying a costing mode.
//!
//! Stateless; every call is re-evaluated from its inputs.

use rust_decimal::Decimal;

use crate::{round_money, CalculationMethod, CostingConfig, HoursPerDay, PolicyError};

/// Result of [`CalculationMethodPolicy::validate`]: the normalized config
/// ready for persistence and whether it differs from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatedCosting {
    pub config: CostingConfig,
    pub changed: bool,
}

/// Estimates and rates a cost is derived from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostInputs {
    pub estimate_hours: Decimal,
    pub estimate_man_days: Decimal,
    pub hourly_rate: Decimal,
    pub daily_rate: Decimal,
}

pub struct CalculationMethodPolicy;

impl CalculationMethodPolicy {
    /// Validates a proposed `(method, hours_per_day)` against the current config.
    ///
    /// Hours are only required (and only looked at) for man days.
    pub fn validate(
        proposed_method: &str,
        proposed_hours_per_day: Option<f64>,
        current: &CostingConfig,
    ) -> Result<ValidatedCosting, PolicyError> {
        let method = CalculationMethod::parse(proposed_method)?;

        let config = match method {
            CalculationMethod::Hourly => CostingConfig::Hourly,
            CalculationMethod::ManDays => {
                let raw = proposed_hours_per_day.ok_or_else(|| {
                    PolicyError::InvalidHoursPerDay("required for man days".to_string())
                })?;
                CostingConfig::ManDays {
                    hours_per_day: HoursPerDay::from_f64(raw)?,
                }
            }
        };

        Ok(ValidatedCosting {
            config,
            changed: config != *current,
        })
    }

    pub fn describe_formula(config: &CostingConfig) -> String {
        match config {
            CostingConfig::Hourly => "estimated hours × hourly rate".to_string(),
            CostingConfig::ManDays { hours_per_day } => {
                format!("estimated man days × daily rate (derived from {hours_per_day}h/day)")
            }
        }
    }

    /// Cost of an estimate under the given mode, rounded to cents.
    ///
    /// The hours-per-day factor never enters this arithmetic; it only matters
    /// when man days are derived from hours, see [`Self::man_days_from_hours`].
    pub fn compute_cost(config: &CostingConfig, inputs: &CostInputs) -> Result<Decimal, PolicyError> {
        ensure_non_negative(inputs.estimate_hours, "estimate_hours")?;
        ensure_non_negative(inputs.estimate_man_days, "estimate_man_days")?;
        ensure_non_negative(inputs.hourly_rate, "hourly_rate")?;
        ensure_non_negative(inputs.daily_rate, "daily_rate")?;

        let amount = match config {
            CostingConfig::Hourly => inputs.estimate_hours * inputs.hourly_rate,
            CostingConfig::ManDays { .. } => inputs.estimate_man_days * inputs.daily_rate,
        };

        Ok(round_money(amount))
    }

    /// Converts an hour estimate into man days, rounded to two decimals half-up.
    pub fn man_days_from_hours(
        hours: Decimal,
        hours_per_day: HoursPerDay,
    ) -> Result<Decimal, PolicyError> {
        ensure_non_negative(hours, "estimate_hours")?;
        Ok(round_money(hours / hours_per_day.value()))
    }

    /// Header for the rate column of a rate card under the given mode.
    pub fn rate_column_label(method: CalculationMethod) -> &'static str {
        match method {
            CalculationMethod::Hourly => "Rate per hour",
            CalculationMethod::ManDays => "Rate per man day",
        }
    }
}

fn ensure_non_negative(value: Decimal, field: &'static str) -> Result<(), PolicyError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(PolicyError::InvalidEstimate { field });
    }
    Ok(())
}
