use async_trait::async_trait;
use costing::{Decimal, Money};

use crate::domain::{
    models::{
        OrganizationId, ProjectId, ProjectMember, ProjectRateCardRole, ProjectRateCardRoleId,
        Task, TaskId, WorkLog,
    },
    FinanceError,
};

/// Outbound port for the task, member and work log data finance rows are
/// derived from.
#[async_trait]
pub trait ProjectFinanceRepository: Send + Sync + 'static {
    async fn project_members(&self, project_id: &ProjectId)
        -> Result<Vec<ProjectMember>, FinanceError>;

    /// Tasks directly below `parent`, or the top-level tasks when `None`.
    async fn tasks(
        &self,
        project_id: &ProjectId,
        parent: Option<&TaskId>,
    ) -> Result<Vec<Task>, FinanceError>;

    async fn get_task(
        &self,
        organization_id: &OrganizationId,
        id: &TaskId,
    ) -> Result<Option<Task>, FinanceError>;

    async fn work_logs(&self, task_ids: &[TaskId]) -> Result<Vec<WorkLog>, FinanceError>;

    async fn update_fixed_cost(&self, id: &TaskId, fixed_cost: Money) -> Result<(), FinanceError>;

    async fn update_estimated_man_days(
        &self,
        id: &TaskId,
        man_days: Decimal,
    ) -> Result<(), FinanceError>;

    async fn get_project_role(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectRateCardRoleId,
    ) -> Result<Option<ProjectRateCardRole>, FinanceError>;

    async fn update_man_day_rate(
        &self,
        id: &ProjectRateCardRoleId,
        man_day_rate: Money,
    ) -> Result<(), FinanceError>;
}
