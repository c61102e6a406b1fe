use async_trait::async_trait;
use costing::{Decimal, Money};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::domain::{
    models::{
        OrganizationId, ProjectId, ProjectMember, ProjectRateCardRole, ProjectRateCardRoleId, Task,
        TaskId, WorkLog,
    },
    ports::outbound::ProjectFinanceRepository,
    FinanceError,
};

use super::{stored_money, storage_error};

pub struct PostgresFinanceRepository {
    pool: PgPool,
}

impl PostgresFinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct MemberRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    role_id: Option<Uuid>,
    job_title: Option<String>,
    rate: Decimal,
    man_day_rate: Decimal,
}

#[derive(FromRow)]
struct TaskRow {
    id: Uuid,
    project_id: Uuid,
    parent_task_id: Option<Uuid>,
    name: String,
    estimated_minutes: i32,
    estimated_man_days: Decimal,
    fixed_cost: Decimal,
    sub_task_count: i64,
    assignees: Vec<Uuid>,
}

#[derive(FromRow)]
struct WorkLogRow {
    task_id: Uuid,
    user_id: Uuid,
    time_spent: i32,
}

#[derive(FromRow)]
pub(super) struct ProjectRoleRow {
    pub id: Uuid,
    pub project_id: Uuid,
    pub job_title_id: Uuid,
    pub job_title: String,
    pub rate: Decimal,
    pub man_day_rate: Decimal,
}

impl TryFrom<MemberRow> for ProjectMember {
    type Error = FinanceError;

    fn try_from(row: MemberRow) -> Result<Self, Self::Error> {
        Ok(ProjectMember {
            id: row.id.into(),
            user_id: row.user_id.into(),
            name: row.name,
            role_id: row.role_id.map(Into::into),
            job_title: row.job_title,
            rate: stored_money(row.rate, "rate")?,
            man_day_rate: stored_money(row.man_day_rate, "man_day_rate")?,
        })
    }
}

impl TryFrom<TaskRow> for Task {
    type Error = FinanceError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        Ok(Task {
            id: row.id.into(),
            project_id: row.project_id.into(),
            parent_task_id: row.parent_task_id.map(Into::into),
            name: row.name,
            estimated_minutes: row.estimated_minutes,
            estimated_man_days: row.estimated_man_days,
            fixed_cost: stored_money(row.fixed_cost, "fixed_cost")?,
            sub_task_count: row.sub_task_count,
            assignees: row.assignees.into_iter().map(Into::into).collect(),
        })
    }
}

impl TryFrom<ProjectRoleRow> for ProjectRateCardRole {
    type Error = FinanceError;

    fn try_from(row: ProjectRoleRow) -> Result<Self, Self::Error> {
        Ok(ProjectRateCardRole {
            id: row.id.into(),
            project_id: row.project_id.into(),
            job_title_id: row.job_title_id.into(),
            job_title: row.job_title,
            rate: stored_money(row.rate, "rate")?,
            man_day_rate: stored_money(row.man_day_rate, "man_day_rate")?,
        })
    }
}

const TASK_SELECT: &str = r#"
    SELECT t.id,
           t.project_id,
           t.parent_task_id,
           t.name,
           t.total_minutes AS estimated_minutes,
           t.estimated_man_days,
           t.fixed_cost,
           (SELECT COUNT(*) FROM tasks st WHERE st.parent_task_id = t.id) AS sub_task_count,
           ARRAY(
               SELECT pm.user_id
               FROM task_assignees ta
               JOIN project_members pm ON pm.id = ta.project_member_id
               WHERE ta.task_id = t.id
           ) AS assignees
    FROM tasks t
"#;

#[async_trait]
impl ProjectFinanceRepository for PostgresFinanceRepository {
    async fn project_members(
        &self,
        project_id: &ProjectId,
    ) -> Result<Vec<ProjectMember>, FinanceError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT pm.id,
                   pm.user_id,
                   u.name,
                   pm.project_rate_card_role_id AS role_id,
                   jt.name AS job_title,
                   COALESCE(prr.rate, 0) AS rate,
                   COALESCE(prr.man_day_rate, 0) AS man_day_rate
            FROM project_members pm
            JOIN users u ON u.id = pm.user_id
            LEFT JOIN project_rate_card_roles prr ON prr.id = pm.project_rate_card_role_id
            LEFT JOIN job_titles jt ON jt.id = prr.job_title_id
            WHERE pm.project_id = $1
            ORDER BY u.name
            "#,
        )
        .bind(project_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.into_iter().map(ProjectMember::try_from).collect()
    }

    async fn tasks(
        &self,
        project_id: &ProjectId,
        parent: Option<&TaskId>,
    ) -> Result<Vec<Task>, FinanceError> {
        let sql = format!(
            "{TASK_SELECT}
            WHERE t.project_id = $1 AND t.parent_task_id IS NOT DISTINCT FROM $2
            ORDER BY t.created_at, t.name"
        );
        let rows = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(project_id.as_uuid())
            .bind(parent.map(TaskId::as_uuid))
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn get_task(
        &self,
        organization_id: &OrganizationId,
        id: &TaskId,
    ) -> Result<Option<Task>, FinanceError> {
        let sql = format!(
            "{TASK_SELECT}
            JOIN projects p ON p.id = t.project_id
            WHERE t.id = $1 AND p.organization_id = $2"
        );
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id.as_uuid())
            .bind(organization_id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.map(Task::try_from).transpose()
    }

    async fn work_logs(&self, task_ids: &[TaskId]) -> Result<Vec<WorkLog>, FinanceError> {
        let ids: Vec<Uuid> = task_ids.iter().map(TaskId::as_uuid).collect();
        let rows = sqlx::query_as::<_, WorkLogRow>(
            r#"
            SELECT task_id, user_id, time_spent
            FROM task_work_log
            WHERE task_id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| WorkLog {
                task_id: row.task_id.into(),
                user_id: row.user_id.into(),
                time_spent: row.time_spent,
            })
            .collect())
    }

    async fn update_fixed_cost(&self, id: &TaskId, fixed_cost: Money) -> Result<(), FinanceError> {
        let result = sqlx::query("UPDATE tasks SET fixed_cost = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(fixed_cost.amount())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(FinanceError::TaskNotFound);
        }
        Ok(())
    }

    async fn update_estimated_man_days(
        &self,
        id: &TaskId,
        man_days: Decimal,
    ) -> Result<(), FinanceError> {
        let result = sqlx::query("UPDATE tasks SET estimated_man_days = $2 WHERE id = $1")
            .bind(id.as_uuid())
            .bind(man_days)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(FinanceError::TaskNotFound);
        }
        Ok(())
    }

    async fn get_project_role(
        &self,
        organization_id: &OrganizationId,
        id: &ProjectRateCardRoleId,
    ) -> Result<Option<ProjectRateCardRole>, FinanceError> {
        let row = sqlx::query_as::<_, ProjectRoleRow>(
            r#"
            SELECT prr.id, prr.project_id, prr.job_title_id, jt.name AS job_title,
                   prr.rate, prr.man_day_rate
            FROM project_rate_card_roles prr
            JOIN job_titles jt ON jt.id = prr.job_title_id
            JOIN projects p ON p.id = prr.project_id
            WHERE prr.id = $1 AND p.organization_id = $2
            "#,
        )
        .bind(id.as_uuid())
        .bind(organization_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        row.map(ProjectRateCardRole::try_from).transpose()
    }

    async fn update_man_day_rate(
        &self,
        id: &ProjectRateCardRoleId,
        man_day_rate: Money,
    ) -> Result<(), FinanceError> {
        let result =
            sqlx::query("UPDATE project_rate_card_roles SET man_day_rate = $2 WHERE id = $1")
                .bind(id.as_uuid())
                .bind(man_day_rate.amount())
                .execute(&self.pool)
                .await
                .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(FinanceError::RateCardRoleNotFound);
        }
        Ok(())
    }
}
