use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{
        ProjectFinanceResponse, TaskBreakdownResponse, TaskFinanceResponse,
        UpdateEstimatedManDaysRequest, UpdateFixedCostRequest,
    },
    app_state::AppState,
    auth::AuthUser,
    domain::models::{ProjectId, TaskId},
    routes::ApiError,
};

#[instrument(name = "GET /project-finance/project/:project_id/tasks", skip(user, app_state))]
pub async fn list_tasks(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<ProjectFinanceResponse>, ApiError> {
    let overview = app_state
        .finance_service
        .project_tasks(&user.organization_id, &project_id)
        .await?;

    Ok(Json(overview.into()))
}

#[instrument(name = "GET /project-finance/project/:project_id/tasks/:parent_task_id/subtasks", skip(user, app_state))]
pub async fn list_subtasks(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path((project_id, parent_task_id)): Path<(ProjectId, TaskId)>,
) -> Result<Json<ProjectFinanceResponse>, ApiError> {
    let overview = app_state
        .finance_service
        .subtasks(&user.organization_id, &project_id, &parent_task_id)
        .await?;

    Ok(Json(overview.into()))
}

#[instrument(name = "GET /project-finance/task/:id/breakdown", skip(user, app_state))]
pub async fn task_breakdown(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<TaskId>,
) -> Result<Json<TaskBreakdownResponse>, ApiError> {
    let breakdown = app_state
        .finance_service
        .task_breakdown(&user.organization_id, &id)
        .await?;

    Ok(Json(breakdown.into()))
}

#[instrument(name = "PUT /project-finance/task/:task_id/fixed-cost", skip(user, app_state))]
pub async fn update_fixed_cost(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(task_id): Path<TaskId>,
    Json(body): Json<UpdateFixedCostRequest>,
) -> Result<Json<TaskFinanceResponse>, ApiError> {
    let task = app_state
        .finance_service
        .update_fixed_cost(&user.organization_id, &task_id, body.fixed_cost)
        .await?;

    Ok(Json(task.into()))
}

#[instrument(name = "PUT /project-finance/task/:task_id/estimated-man-days", skip(user, app_state))]
pub async fn update_estimated_man_days(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(task_id): Path<TaskId>,
    Json(body): Json<UpdateEstimatedManDaysRequest>,
) -> Result<Json<TaskFinanceResponse>, ApiError> {
    let task = app_state
        .finance_service
        .update_estimated_man_days(&user.organization_id, &task_id, body.estimated_man_days)
        .await?;

    Ok(Json(task.into()))
}
