//! HTTP response types for the finance endpoints.
//!
//! Amounts are serialized as JSON numbers with at most two decimals.

use costing::{CalculationMethod, CalculationMethodPolicy, Decimal};
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::domain::models::{
    CostingUpdate, FinanceTotals, JobTitleId, MemberCost, Organization, OrganizationId, Project,
    ProjectFinanceOverview, ProjectId, ProjectRateCardRole, ProjectRateCardRoleId, RateCard,
    RateCardDetails, RateCardId, TaskBreakdown, TaskFinance, TaskId, UserId,
};

fn number(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    pub id: OrganizationId,
    pub name: String,
    pub calculation_method: CalculationMethod,
    /// Active factor for man days, otherwise the retained one.
    pub hours_per_day: f64,
    pub formula: String,
}

impl From<Organization> for OrganizationResponse {
    fn from(organization: Organization) -> Self {
        Self {
            formula: organization.formula(),
            hours_per_day: organization.hours_per_day().as_f64(),
            calculation_method: organization.costing.method(),
            id: organization.id,
            name: organization.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectCostingResponse {
    pub project_id: ProjectId,
    pub name: String,
    pub calculation_method: CalculationMethod,
    pub hours_per_day: f64,
    pub currency: String,
    pub currency_code: String,
    pub budget: f64,
    pub formula: String,
    pub rate_column_label: &'static str,
}

impl From<Project> for ProjectCostingResponse {
    fn from(project: Project) -> Self {
        let method = project.costing.method();
        Self {
            formula: project.formula(),
            hours_per_day: project.hours_per_day().as_f64(),
            calculation_method: method,
            currency: project.currency.to_string(),
            currency_code: project.currency.code(),
            budget: project.budget.as_f64(),
            rate_column_label: CalculationMethodPolicy::rate_column_label(method),
            project_id: project.id,
            name: project.name,
        }
    }
}

/// A costing resource plus whether the request changed anything.
#[derive(Debug, Serialize)]
pub struct UpdatedResponse<T> {
    #[serde(flatten)]
    pub data: T,
    pub changed: bool,
}

impl<T, R: From<T>> From<CostingUpdate<T>> for UpdatedResponse<R> {
    fn from(update: CostingUpdate<T>) -> Self {
        Self {
            data: R::from(update.value),
            changed: update.changed,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskFinanceResponse {
    pub id: TaskId,
    pub name: String,
    pub parent_task_id: Option<TaskId>,
    pub sub_task_count: i64,
    pub assignees: Vec<String>,
    pub estimated_hours: f64,
    pub estimated_man_days: f64,
    pub hourly_rate: f64,
    pub daily_rate: f64,
    pub estimated_cost: f64,
    pub fixed_cost: f64,
    pub total_budget: f64,
    pub logged_hours: f64,
    pub actual_cost: f64,
    pub total_actual: f64,
    pub variance: f64,
}

impl From<TaskFinance> for TaskFinanceResponse {
    fn from(row: TaskFinance) -> Self {
        Self {
            id: row.id,
            name: row.name,
            parent_task_id: row.parent_task_id,
            sub_task_count: row.sub_task_count,
            assignees: row.assignees,
            estimated_hours: number(row.estimated_hours),
            estimated_man_days: number(row.estimated_man_days),
            hourly_rate: number(row.hourly_rate),
            daily_rate: number(row.daily_rate),
            estimated_cost: number(row.estimated_cost),
            fixed_cost: number(row.fixed_cost),
            total_budget: number(row.total_budget),
            logged_hours: number(row.logged_hours),
            actual_cost: number(row.actual_cost),
            total_actual: number(row.total_actual),
            variance: number(row.variance),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub estimated_cost: f64,
    pub fixed_cost: f64,
    pub total_budget: f64,
    pub actual_cost: f64,
    pub total_actual: f64,
    pub variance: f64,
}

impl From<FinanceTotals> for TotalsResponse {
    fn from(totals: FinanceTotals) -> Self {
        Self {
            estimated_cost: number(totals.estimated_cost),
            fixed_cost: number(totals.fixed_cost),
            total_budget: number(totals.total_budget),
            actual_cost: number(totals.actual_cost),
            total_actual: number(totals.total_actual),
            variance: number(totals.variance),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectFinanceResponse {
    pub project: ProjectCostingResponse,
    pub tasks: Vec<TaskFinanceResponse>,
    pub totals: TotalsResponse,
    pub remaining_budget: f64,
}

impl From<ProjectFinanceOverview> for ProjectFinanceResponse {
    fn from(overview: ProjectFinanceOverview) -> Self {
        let remaining_budget = number(overview.remaining_budget());
        Self {
            project: overview.project.into(),
            tasks: overview.tasks.into_iter().map(Into::into).collect(),
            totals: overview.totals.into(),
            remaining_budget,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MemberCostResponse {
    pub user_id: UserId,
    pub name: String,
    pub job_title: Option<String>,
    pub hourly_rate: f64,
    pub daily_rate: f64,
    pub logged_hours: f64,
    pub actual_cost: f64,
}

impl From<MemberCost> for MemberCostResponse {
    fn from(member: MemberCost) -> Self {
        Self {
            user_id: member.user_id,
            name: member.name,
            job_title: member.job_title,
            hourly_rate: number(member.hourly_rate),
            daily_rate: number(member.daily_rate),
            logged_hours: number(member.logged_hours),
            actual_cost: number(member.actual_cost),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TaskBreakdownResponse {
    pub task: TaskFinanceResponse,
    pub members: Vec<MemberCostResponse>,
}

impl From<TaskBreakdown> for TaskBreakdownResponse {
    fn from(breakdown: TaskBreakdown) -> Self {
        Self {
            task: breakdown.task.into(),
            members: breakdown.members.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RateCardRoleResponse {
    pub job_title_id: Option<JobTitleId>,
    pub job_title: Option<String>,
    pub rate: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RateCardResponse {
    pub id: RateCardId,
    pub name: String,
    pub currency: String,
    pub roles: Vec<RateCardRoleResponse>,
}

impl From<RateCard> for RateCardResponse {
    fn from(card: RateCard) -> Self {
        Self {
            id: card.id,
            name: card.name,
            currency: card.currency.to_string(),
            roles: card
                .roles
                .into_iter()
                .map(|role| RateCardRoleResponse {
                    job_title_id: role.job_title_id,
                    job_title: role.job_title,
                    rate: role.rate.map(number),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RateCardDetailsResponse {
    #[serde(flatten)]
    pub card: RateCardResponse,
    pub rate_column_label: &'static str,
}

impl From<RateCardDetails> for RateCardDetailsResponse {
    fn from(details: RateCardDetails) -> Self {
        Self {
            card: details.card.into(),
            rate_column_label: details.rate_column_label,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProjectRateCardRoleResponse {
    pub id: ProjectRateCardRoleId,
    pub project_id: ProjectId,
    pub job_title_id: JobTitleId,
    pub job_title: String,
    pub rate: f64,
    pub man_day_rate: f64,
}

impl From<ProjectRateCardRole> for ProjectRateCardRoleResponse {
    fn from(role: ProjectRateCardRole) -> Self {
        Self {
            id: role.id,
            project_id: role.project_id,
            job_title_id: role.job_title_id,
            job_title: role.job_title,
            rate: role.rate.as_f64(),
            man_day_rate: role.man_day_rate.as_f64(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClearedRolesResponse {
    pub removed: u64,
}
