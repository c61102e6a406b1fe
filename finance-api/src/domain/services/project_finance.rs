use std::sync::Arc;

use async_trait::async_trait;
use costing::{round_money, Decimal, Money, PolicyError};
use itertools::Itertools;

use crate::domain::{
    models::{
        FinanceTotals, OrganizationId, Project, ProjectFinanceOverview, ProjectId, ProjectRateCardRole,
        ProjectRateCardRoleId, Task, TaskBreakdown, TaskFinance, TaskId,
    },
    ports::{
        inbound::ProjectFinanceService,
        outbound::{ProjectFinanceRepository, ProjectRepository},
    },
    FinanceError,
};

use super::task_finance::FinanceContext;

/// Implementation of the ProjectFinanceService inbound port.
pub struct ProjectFinanceServiceImpl<P, F> {
    projects: Arc<P>,
    finance: Arc<F>,
}

impl<P, F> ProjectFinanceServiceImpl<P, F> {
    pub fn new(projects: Arc<P>, finance: Arc<F>) -> Self {
        Self { projects, finance }
    }
}

impl<P, F> ProjectFinanceServiceImpl<P, F>
where
    P: ProjectRepository,
    F: ProjectFinanceRepository,
{
    async fn load_project(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectId,
    ) -> Result<Project, FinanceError> {
        self.projects
            .get_project(organization_id, id)
            .await?
            .ok_or(FinanceError::ProjectNotFound)
    }

    async fn load_task(
        &self,
        organization_id: &OrganizationId,
        id: &TaskId,
    ) -> Result<Task, FinanceError> {
        self.finance
            .get_task(organization_id, id)
            .await?
            .ok_or(FinanceError::TaskNotFound)
    }

    async fn rows(&self, project: &Project, tasks: &[Task]) -> Result<Vec<TaskFinance>, FinanceError> {
        let members = self.finance.project_members(&project.id).await?;
        let task_ids = tasks.iter().map(|task| task.id).collect_vec();
        let logs = self.finance.work_logs(&task_ids).await?;

        let context = FinanceContext::new(&project.costing, &members, &logs);
        let rows = tasks
            .iter()
            .map(|task| context.task_finance(task))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    async fn breakdown(
        &self,
        organization_id: &OrganizationId,
        task: &Task,
    ) -> Result<TaskBreakdown, FinanceError> {
        let project = self.load_project(organization_id, &task.project_id).await?;
        let members = self.finance.project_members(&project.id).await?;
        let logs = self.finance.work_logs(&[task.id]).await?;

        let breakdown = FinanceContext::new(&project.costing, &members, &logs).breakdown(task)?;
        Ok(breakdown)
    }
}

#[async_trait]
impl<P, F> ProjectFinanceService for ProjectFinanceServiceImpl<P, F>
where
    P: ProjectRepository,
    F: ProjectFinanceRepository,
{
    async fn project_tasks(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
    ) -> Result<ProjectFinanceOverview, FinanceError> {
        let project = self.load_project(organization_id, project_id).await?;
        let tasks = self.finance.tasks(project_id, None).await?;
        let rows = self.rows(&project, &tasks).await?;

        Ok(ProjectFinanceOverview::new(project, rows))
    }

    async fn subtasks(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
        parent_task_id: &TaskId,
    ) -> Result<ProjectFinanceOverview, FinanceError> {
        let project = self.load_project(organization_id, project_id).await?;
        let parent = self.load_task(organization_id, parent_task_id).await?;
        if parent.project_id != project.id {
            return Err(FinanceError::TaskNotFound);
        }

        let tasks = self.finance.tasks(project_id, Some(parent_task_id)).await?;
        let rows = self.rows(&project, &tasks).await?;

        Ok(ProjectFinanceOverview::new(project, rows))
    }

    async fn export_rows(
        &self,
        organization_id: &OrganizationId,
        project_id: &ProjectId,
    ) -> Result<ProjectFinanceOverview, FinanceError> {
        let project = self.load_project(organization_id, project_id).await?;
        let top_level = self.finance.tasks(project_id, None).await?;

        let mut tasks = Vec::with_capacity(top_level.len());
        for task in top_level {
            let children = if task.sub_task_count > 0 {
                self.finance.tasks(project_id, Some(&task.id)).await?
            } else {
                Vec::new()
            };
            tasks.push(task);
            tasks.extend(children);
        }

        let rows = self.rows(&project, &tasks).await?;
        let mut overview = ProjectFinanceOverview::new(project, Vec::new());
        overview.totals = FinanceTotals::from_rows(
            rows.iter().filter(|row| row.parent_task_id.is_none()),
        );
        overview.tasks = rows;

        Ok(overview)
    }

    async fn task_breakdown(
        &self,
        organization_id: &OrganizationId,
        task_id: &TaskId,
    ) -> Result<TaskBreakdown, FinanceError> {
        let task = self.load_task(organization_id, task_id).await?;
        self.breakdown(organization_id, &task).await
    }

    async fn update_fixed_cost(
        &self,
        organization_id: &OrganizationId,
        task_id: &TaskId,
        fixed_cost: f64,
    ) -> Result<TaskFinance, FinanceError> {
        let fixed_cost = Money::from_f64(fixed_cost, "fixed_cost")?;
        let mut task = self.load_task(organization_id, task_id).await?;

        self.finance.update_fixed_cost(task_id, fixed_cost).await?;
        task.fixed_cost = fixed_cost;

        Ok(self.breakdown(organization_id, &task).await?.task)
    }

    async fn update_estimated_man_days(
        &self,
        organization_id: &OrganizationId,
        task_id: &TaskId,
        man_days: f64,
    ) -> Result<TaskFinance, FinanceError> {
        let man_days = parse_man_days(man_days)?;
        let mut task = self.load_task(organization_id, task_id).await?;

        self.finance
            .update_estimated_man_days(task_id, man_days)
            .await?;
        task.estimated_man_days = man_days;

        Ok(self.breakdown(organization_id, &task).await?.task)
    }

    async fn update_man_day_rate(
        &self,
        organization_id: &OrganizationId,
        role_id: &ProjectRateCardRoleId,
        man_day_rate: f64,
    ) -> Result<ProjectRateCardRole, FinanceError> {
        let man_day_rate = Money::from_f64(man_day_rate, "man_day_rate")?;
        let mut role = self
            .finance
            .get_project_role(organization_id, role_id)
            .await?
            .ok_or(FinanceError::RateCardRoleNotFound)?;

        self.finance.update_man_day_rate(role_id, man_day_rate).await?;
        role.man_day_rate = man_day_rate;

        Ok(role)
    }
}

fn parse_man_days(value: f64) -> Result<Decimal, PolicyError> {
    let invalid = PolicyError::InvalidEstimate {
        field: "estimated_man_days",
    };
    if !value.is_finite() || value < 0.0 {
        return Err(invalid);
    }
    Decimal::try_from(value)
        .map(round_money)
        .map_err(|_| invalid)
}
