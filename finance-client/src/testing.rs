//! In-memory gateway for surface and store tests.

use std::sync::Mutex;

use async_trait::async_trait;
use costing::{CalculationMethod, CostingConfig, Currency, HoursPerDay, Money};
use uuid::Uuid;

use crate::{
    gateway::{FinanceGateway, GatewayError},
    models::{OrganizationSettings, ProjectSettings},
};

struct State {
    organization: OrganizationSettings,
    project: ProjectSettings,
    fail_writes: bool,
    writes: usize,
}

/// One hourly organization with one hourly project, both at 8h/day.
pub struct MockGateway {
    state: Mutex<State>,
}

impl MockGateway {
    pub fn new() -> Self {
        let hours = HoursPerDay::default();
        Self {
            state: Mutex::new(State {
                organization: OrganizationSettings {
                    id: Uuid::new_v4(),
                    name: "Acme".to_string(),
                    calculation_method: CalculationMethod::Hourly,
                    hours_per_day: hours,
                },
                project: ProjectSettings {
                    id: Uuid::new_v4(),
                    name: "Website".to_string(),
                    calculation_method: CalculationMethod::Hourly,
                    hours_per_day: hours,
                    currency: Currency::Usd,
                    budget: Money::ZERO,
                },
                fail_writes: false,
                writes: 0,
            }),
        }
    }

    pub fn project_id(&self) -> Uuid {
        self.state.lock().unwrap().project.id
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }

    /// Writes that reached the gateway, failed ones included.
    pub fn write_count(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    fn write<T>(&self, apply: impl FnOnce(&mut State) -> T) -> Result<T, GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        if state.fail_writes {
            return Err(GatewayError::Rejected("Failed to save changes".to_string()));
        }
        Ok(apply(&mut state))
    }
}

#[async_trait]
impl FinanceGateway for MockGateway {
    async fn organization(&self) -> Result<OrganizationSettings, GatewayError> {
        Ok(self.state.lock().unwrap().organization.clone())
    }

    async fn project(&self, project_id: Uuid) -> Result<ProjectSettings, GatewayError> {
        let state = self.state.lock().unwrap();
        if state.project.id != project_id {
            return Err(GatewayError::NotFound);
        }
        Ok(state.project.clone())
    }

    async fn update_organization_calculation_method(
        &self,
        costing: &CostingConfig,
    ) -> Result<OrganizationSettings, GatewayError> {
        self.write(|state| {
            state.organization.calculation_method = costing.method();
            if let Some(hours) = costing.hours_per_day() {
                state.organization.hours_per_day = hours;
            }
            state.organization.clone()
        })
    }

    async fn update_project_calculation_method(
        &self,
        _project_id: Uuid,
        costing: &CostingConfig,
    ) -> Result<ProjectSettings, GatewayError> {
        self.write(|state| {
            state.project = state.project.with_costing(*costing);
            state.project.clone()
        })
    }

    async fn update_project_budget(
        &self,
        _project_id: Uuid,
        budget: Money,
        currency: Currency,
    ) -> Result<ProjectSettings, GatewayError> {
        self.write(|state| {
            state.project.budget = budget;
            state.project.currency = currency;
            state.project.clone()
        })
    }
}
