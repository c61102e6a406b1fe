use async_trait::async_trait;

use crate::domain::{
    models::{
        OrganizationId, ProjectFinanceOverview, ProjectId, ProjectRateCardRole,
        ProjectRateCardRoleId, TaskBreakdown, TaskFinance, TaskId,
    },
    FinanceError,
};

/// Inbound port for task level budgets and costs.
#[async_trait]
pub trait ProjectFinanceService: Send + Sync + 'static {
    /// Top-level task rows of a project.
    async fn project_tasks(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
    ) -> Result<ProjectFinanceOverview, FinanceError>;

    async fn subtasks(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
        parent_task_id: &TaskId,
    ) -> Result<ProjectFinanceOverview, FinanceError>;

    /// Every task row, each parent directly followed by its subtasks.
    ///
    /// Totals only sum top-level rows so subtasks are not counted twice.
    async fn export_rows(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
    ) -> Result<ProjectFinanceOverview, FinanceError>;

    async fn task_breakdown(
        &self,
        organization_id: &OrganizationId,
        task_id: &TaskId,
    ) -> Result<TaskBreakdown, FinanceError>;

    async fn update_fixed_cost(
        &self,
        organization_id: &OrganizationId,
        task_id: &TaskId,
        fixed_cost: f64,
    ) -> Result<TaskFinance, FinanceError>;

    async fn update_estimated_man_days(
        &self,
        organization_id: &OrganizationId,
        task_id: &TaskId,
        man_days: f64,
    ) -> Result<TaskFinance, FinanceError>;

    async fn update_man_day_rate(
        &self,
        organization_id: &OrganizationId,
        role_id: &ProjectRateCardRoleId,
        man_day_rate: f64,
    ) -> Result<ProjectRateCardRole, FinanceError>;
}
