use costing::{CalculationMethodPolicy, CostingConfig, Currency, HoursPerDay, Money};

use super::{OrganizationId, ProjectId};

/// A project with its costing override, currency and budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: ProjectId,
    pub organization_id: OrganizationId,
    pub name: String,
    pub currency: Currency,
    pub budget: Money,
    pub costing: CostingConfig,
    pub stored_hours_per_day: HoursPerDay,
}

impl Project {
    pub fn formula(&self) -> String {
        CalculationMethodPolicy::describe_formula(&self.costing)
    }

    pub fn hours_per_day(&self) -> HoursPerDay {
        self.costing
            .hours_per_day()
            .unwrap_or(self.stored_hours_per_day)
    }
}

/// Data needed to create a project; costing defaults come from the organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub organization_id: OrganizationId,
    pub name: String,
    pub costing: CostingConfig,
    pub stored_hours_per_day: HoursPerDay,
}

/// Where a costing config is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CostingScope {
    Organization(OrganizationId),
    Project(ProjectId),
}
