use costing::{CalculationMethod, CostingConfig, Currency, Money};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub struct UpdateCalculationMethodRequest {
    pub calculation_method: CalculationMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_per_day: Option<f64>,
}

impl From<&CostingConfig> for UpdateCalculationMethodRequest {
    fn from(costing: &CostingConfig) -> Self {
        Self {
            calculation_method: costing.method(),
            hours_per_day: costing.hours_per_day().map(|hours| hours.as_f64()),
        }
    }
}

#[derive(Serialize)]
pub struct UpdateBudgetRequest {
    pub budget: Money,
    pub currency: Currency,
}

#[derive(Serialize)]
pub struct CreateProjectRequest<'a> {
    pub name: &'a str,
}

/// Body of every non-2xx response from finance-api.
#[derive(Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// The signed-in user as `/me` and `/login` return it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Me {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// Wrapper the update endpoints return: the resource plus `changed`.
#[derive(Deserialize)]
pub struct Updated<T> {
    #[serde(flatten)]
    pub data: T,
}

#[cfg(test)]
mod tests {
    use costing::HoursPerDay;

    use super::*;

    #[test]
    fn hourly_requests_omit_hours() {
        let body = UpdateCalculationMethodRequest::from(&CostingConfig::Hourly);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "calculation_method": "hourly" })
        );
    }

    #[test]
    fn man_day_requests_carry_hours() {
        let costing = CostingConfig::ManDays {
            hours_per_day: HoursPerDay::from_f64(7.5).unwrap(),
        };
        let body = UpdateCalculationMethodRequest::from(&costing);
        assert_eq!(
            serde_json::to_value(body).unwrap(),
            serde_json::json!({ "calculation_method": "man_days", "hours_per_day": 7.5 })
        );
    }
}
