use costing::Money;
use rust_decimal::Decimal;

use super::{ProjectId, ProjectMemberId, ProjectRateCardRoleId, TaskId, UserId};

/// A task as stored, before any finance figures are derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub project_id: ProjectId,
    pub parent_task_id: Option<TaskId>,
    pub name: String,
    pub estimated_minutes: i32,
    pub estimated_man_days: Decimal,
    pub fixed_cost: Money,
    pub sub_task_count: i64,
    pub assignees: Vec<UserId>,
}

/// A project member with the rates of the project role they hold.
///
/// Members without a role contribute zero rates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMember {
    pub id: ProjectMemberId,
    pub user_id: UserId,
    pub name: String,
    pub role_id: Option<ProjectRateCardRoleId>,
    pub job_title: Option<String>,
    pub rate: Money,
    pub man_day_rate: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkLog {
    pub task_id: TaskId,
    pub user_id: UserId,
    /// Seconds spent.
    pub time_spent: i32,
}

/// Finance figures derived for one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFinance {
    pub id: TaskId,
    pub name: String,
    pub parent_task_id: Option<TaskId>,
    pub sub_task_count: i64,
    pub assignees: Vec<String>,
    pub estimated_hours: Decimal,
    pub estimated_man_days: Decimal,
    pub hourly_rate: Decimal,
    pub daily_rate: Decimal,
    pub estimated_cost: Decimal,
    pub fixed_cost: Decimal,
    pub total_budget: Decimal,
    pub logged_hours: Decimal,
    pub actual_cost: Decimal,
    pub total_actual: Decimal,
    pub variance: Decimal,
}

/// Column sums over a list of task rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinanceTotals {
    pub estimated_cost: Decimal,
    pub fixed_cost: Decimal,
    pub total_budget: Decimal,
    pub actual_cost: Decimal,
    pub total_actual: Decimal,
    pub variance: Decimal,
}

impl FinanceTotals {
    pub fn from_rows<'a>(rows: impl IntoIterator<Item = &'a TaskFinance>) -> Self {
        rows.into_iter().fold(Self::default(), |acc, row| Self {
            estimated_cost: acc.estimated_cost + row.estimated_cost,
            fixed_cost: acc.fixed_cost + row.fixed_cost,
            total_budget: acc.total_budget + row.total_budget,
            actual_cost: acc.actual_cost + row.actual_cost,
            total_actual: acc.total_actual + row.total_actual,
            variance: acc.variance + row.variance,
        })
    }
}

/// Per-member cost lines of a single task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberCost {
    pub user_id: UserId,
    pub name: String,
    pub job_title: Option<String>,
    pub hourly_rate: Decimal,
    pub daily_rate: Decimal,
    pub logged_hours: Decimal,
    pub actual_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskBreakdown {
    pub task: TaskFinance,
    pub members: Vec<MemberCost>,
}
