use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{
        ClearedRolesResponse, ImportRateCardRequest, ProjectRateCardRoleResponse,
        UpdateManDayRateRequest,
    },
    app_state::AppState,
    auth::AuthUser,
    domain::models::{ProjectId, ProjectRateCardRole, ProjectRateCardRoleId},
    routes::ApiError,
};

fn role_responses(
    roles: Vec<ProjectRateCardRole>,
) -> Vec<ProjectRateCardRoleResponse> {
    roles.into_iter().map(Into::into).collect()
}

#[instrument(name = "GET /project-finance/project/:project_id/rate-card-roles", skip(user, app_state))]
pub async fn list_roles(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<Vec<ProjectRateCardRoleResponse>>, ApiError> {
    let roles = app_state
        .rate_card_service
        .project_roles(&user.organization_id, &project_id)
        .await?;

    Ok(Json(role_responses(roles)))
}

#[instrument(name = "POST /project-finance/project/:project_id/rate-card-roles", skip(user, app_state))]
pub async fn import_rate_card(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(project_id): Path<ProjectId>,
    Json(body): Json<ImportRateCardRequest>,
) -> Result<(StatusCode, Json<Vec<ProjectRateCardRoleResponse>>), ApiError> {
    let roles = app_state
        .rate_card_service
        .import_rate_card(&user.organization_id, &project_id, &body.rate_card_id)
        .await?;

    Ok((StatusCode::CREATED, Json(role_responses(roles))))
}

#[instrument(name = "DELETE /project-finance/project/:project_id/rate-card-roles", skip(user, app_state))]
pub async fn clear_roles(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(project_id): Path<ProjectId>,
) -> Result<Json<ClearedRolesResponse>, ApiError> {
    let removed = app_state
        .rate_card_service
        .clear_project_roles(&user.organization_id, &project_id)
        .await?;

    Ok(Json(ClearedRolesResponse { removed }))
}

#[instrument(name = "PUT /project-finance/rate-card-role/:rate_card_role_id/man-day-rate", skip(user, app_state))]
pub async fn update_man_day_rate(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(rate_card_role_id): Path<ProjectRateCardRoleId>,
    Json(body): Json<UpdateManDayRateRequest>,
) -> Result<Json<ProjectRateCardRoleResponse>, ApiError> {
    let role = app_state
        .finance_service
        .update_man_day_rate(&user.organization_id, &rate_card_role_id, body.man_day_rate)
        .await?;

    Ok(Json(role.into()))
}
