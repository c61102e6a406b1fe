use axum::{
    extract::{Path, State},
    Json,
};
use tracing::instrument;

use crate::{
    adapters::inbound::http::{
        ProjectCostingResponse, UpdateBudgetRequest, UpdateCalculationMethodRequest,
        UpdateCurrencyRequest, UpdatedResponse,
    },
    app_state::AppState,
    auth::AuthUser,
    domain::models::ProjectId,
    routes::ApiError,
};

#[instrument(name = "PUT /project-finance/project/:project_id/currency", skip(user, app_state))]
pub async fn update_currency(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(project_id): Path<ProjectId>,
    Json(body): Json<UpdateCurrencyRequest>,
) -> Result<Json<ProjectCostingResponse>, ApiError> {
    let project = app_state
        .costing_service
        .update_project_currency(&user.organization_id, &project_id, &body.currency)
        .await?;

    Ok(Json(project.into()))
}

#[instrument(name = "PUT /project-finance/project/:project_id/budget", skip(user, app_state))]
pub async fn update_budget(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(project_id): Path<ProjectId>,
    Json(body): Json<UpdateBudgetRequest>,
) -> Result<Json<ProjectCostingResponse>, ApiError> {
    let project = app_state
        .costing_service
        .update_project_budget(
            &user.organization_id,
            &project_id,
            body.budget,
            body.currency.as_deref(),
        )
        .await?;

    Ok(Json(project.into()))
}

#[instrument(name = "PUT /project-finance/project/:project_id/calculation-method", skip(user, app_state))]
pub async fn update_calculation_method(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(project_id): Path<ProjectId>,
    Json(body): Json<UpdateCalculationMethodRequest>,
) -> Result<Json<UpdatedResponse<ProjectCostingResponse>>, ApiError> {
    let update = app_state
        .costing_service
        .update_project_method(
            &user.organization_id,
            &project_id,
            &body.calculation_method,
            body.hours_per_day,
        )
        .await?;

    Ok(Json(update.into()))
}
