//! HTTP request bodies.
//!
//! Numeric fields stay raw `f64`s; range and sign checks belong to the
//! services so the error codes are the same for every caller.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

use crate::domain::models::RateCardId;

#[derive(Debug, Deserialize)]
pub struct UpdateCalculationMethodRequest {
    pub calculation_method: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub hours_per_day: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCurrencyRequest {
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequest {
    pub budget: f64,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFixedCostRequest {
    pub fixed_cost: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEstimatedManDaysRequest {
    pub estimated_man_days: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateManDayRateRequest {
    pub man_day_rate: f64,
}

#[derive(Debug, Deserialize)]
pub struct ImportRateCardRequest {
    pub rate_card_id: RateCardId,
}

/// Accepts a number, a numeric string, or null.
///
/// Anything else becomes NaN so validation reports it as an invalid number
/// instead of the body failing to parse.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let number = match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => Some(
            n.as_f64()
                .ok_or_else(|| de::Error::custom("number out of range"))?,
        ),
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(s.trim().parse().unwrap_or(f64::NAN)),
        Some(_) => Some(f64::NAN),
    };
    Ok(number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> UpdateCalculationMethodRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn hours_accept_numbers_and_numeric_strings() {
        assert_eq!(
            parse(r#"{"calculation_method":"man_days","hours_per_day":7.5}"#).hours_per_day,
            Some(7.5)
        );
        assert_eq!(
            parse(r#"{"calculation_method":"man_days","hours_per_day":"6"}"#).hours_per_day,
            Some(6.0)
        );
    }

    #[test]
    fn missing_or_null_hours_are_none() {
        assert_eq!(parse(r#"{"calculation_method":"hourly"}"#).hours_per_day, None);
        assert_eq!(
            parse(r#"{"calculation_method":"hourly","hours_per_day":null}"#).hours_per_day,
            None
        );
    }

    #[test]
    fn non_numeric_hours_become_nan() {
        let hours = parse(r#"{"calculation_method":"man_days","hours_per_day":"eight"}"#)
            .hours_per_day
            .unwrap();
        assert!(hours.is_nan());

        let hours = parse(r#"{"calculation_method":"man_days","hours_per_day":[8]}"#)
            .hours_per_day
            .unwrap();
        assert!(hours.is_nan());
    }

    #[test]
    fn budget_currency_is_optional() {
        let request: UpdateBudgetRequest = serde_json::from_str(r#"{"budget":1200.5}"#).unwrap();
        assert_eq!(request.budget, 1200.5);
        assert!(request.currency.is_none());
    }
}
