use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{CreateProjectRequest, ProjectCostingResponse},
    app_state::AppState,
    auth::AuthUser,
    domain::models::ProjectId,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_project))
        .route("/:project_id/costing", get(get_costing))
}

#[instrument(name = "POST /projects", skip_all, fields(user_id = %user.id))]
async fn create_project(
    user: AuthUser,
    State(app_state): State<AppState>,
    Json(body): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectCostingResponse>), ApiError> {
    if body.name.trim().is_empty() {
        return Err(ApiError::bad_request("Project name is required"));
    }

    let project = app_state
        .costing_service
        .create_project(&user.organization_id, &body.name)
        .await?;

    Ok((StatusCode::CREATED, Json(project.into())))
}

#[instrument(name = "GET /projects/:project_id/costing", skip(user, app_state))]
async fn get_costing(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<ProjectCostingResponse>, ApiError> {
    let project = app_state
        .costing_service
        .get_project(&user.organization_id, &project_id)
        .await?;

    Ok(Json(project.into()))
}
