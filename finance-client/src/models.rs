use costing::{CalculationMethod, CalculationMethodPolicy, CostingConfig, Currency, HoursPerDay, Money};
use serde::Deserialize;
use uuid::Uuid;

/// Organization-wide costing default as last confirmed by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrganizationSettings {
    pub id: Uuid,
    pub name: String,
    pub calculation_method: CalculationMethod,
    /// Active factor for man days, the retained one otherwise.
    pub hours_per_day: HoursPerDay,
}

impl OrganizationSettings {
    pub fn costing(&self) -> CostingConfig {
        CostingConfig::from_stored(self.calculation_method, self.hours_per_day)
    }

    pub fn formula(&self) -> String {
        CalculationMethodPolicy::describe_formula(&self.costing())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProjectSettings {
    #[serde(rename = "project_id")]
    pub id: Uuid,
    pub name: String,
    pub calculation_method: CalculationMethod,
    pub hours_per_day: HoursPerDay,
    pub currency: Currency,
    pub budget: Money,
}

impl ProjectSettings {
    pub fn costing(&self) -> CostingConfig {
        CostingConfig::from_stored(self.calculation_method, self.hours_per_day)
    }

    pub fn formula(&self) -> String {
        CalculationMethodPolicy::describe_formula(&self.costing())
    }

    pub fn rate_column_label(&self) -> &'static str {
        CalculationMethodPolicy::rate_column_label(self.calculation_method)
    }

    /// Copy with a confirmed costing config applied.
    ///
    /// Switching to hourly keeps the previous factor, as the server does.
    pub(crate) fn with_costing(&self, costing: CostingConfig) -> Self {
        Self {
            calculation_method: costing.method(),
            hours_per_day: costing.hours_per_day().unwrap_or(self.hours_per_day),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_settings_parse_the_costing_response() {
        let json = serde_json::json!({
            "project_id": "6f1c1a38-0b9e-4c38-9b8e-7d0f2b1d9c11",
            "name": "Website",
            "calculation_method": "man_days",
            "hours_per_day": 7.5,
            "currency": "eur",
            "currency_code": "EUR",
            "budget": 1200.5,
            "formula": "ignored",
            "rate_column_label": "Rate per man day"
        });

        let project: ProjectSettings = serde_json::from_value(json).unwrap();

        assert_eq!(project.currency, Currency::Eur);
        assert_eq!(
            project.formula(),
            "estimated man days × daily rate (derived from 7.5h/day)"
        );
    }

    #[test]
    fn hourly_organizations_describe_the_hourly_formula() {
        let organization = OrganizationSettings {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
            calculation_method: CalculationMethod::Hourly,
            hours_per_day: HoursPerDay::from_f64(6.0).unwrap(),
        };

        assert_eq!(organization.costing(), CostingConfig::Hourly);
        assert_eq!(organization.formula(), "estimated hours × hourly rate");
    }
}
