use costing::{CalculationMethodPolicy, CostingConfig, HoursPerDay};

use super::OrganizationId;

/// An organization and its default costing mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub costing: CostingConfig,
    /// Factor kept in storage even while the organization is hourly.
    pub stored_hours_per_day: HoursPerDay,
}

impl Organization {
    pub fn formula(&self) -> String {
        CalculationMethodPolicy::describe_formula(&self.costing)
    }

    /// Hours per day as shown to users: the active factor, or the retained one.
    pub fn hours_per_day(&self) -> HoursPerDay {
        self.costing
            .hours_per_day()
            .unwrap_or(self.stored_hours_per_day)
    }
}
