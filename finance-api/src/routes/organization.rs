use axum::{
    extract::State,
    routing::{get, put},
    Json, Router,
};
use axum_login::permission_required;
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{
        OrganizationResponse, UpdateCalculationMethodRequest, UpdatedResponse,
    },
    app_state::AppState,
    auth::{AuthBackend, AuthUser},
    domain::Role,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/organization/calculation-method",
            put(update_calculation_method),
        )
        .route_layer(permission_required!(AuthBackend, Role::Admin))
        .route("/organization", get(get_organization))
}

#[instrument(name = "GET /admin-center/organization", skip_all, fields(user_id = %user.id))]
async fn get_organization(
    user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<OrganizationResponse>, ApiError> {
    let organization = app_state
        .costing_service
        .get_organization(&user.organization_id)
        .await?;

    Ok(Json(organization.into()))
}

#[instrument(
    name = "PUT /admin-center/organization/calculation-method",
    skip_all,
    fields(user_id = %user.id, method = %body.calculation_method)
)]
async fn update_calculation_method(
    user: AuthUser,
    State(app_state): State<AppState>,
    Json(body): Json<UpdateCalculationMethodRequest>,
) -> Result<Json<UpdatedResponse<OrganizationResponse>>, ApiError> {
    let update = app_state
        .costing_service
        .update_organization_method(
            &user.organization_id,
            &body.calculation_method,
            body.hours_per_day,
        )
        .await?;

    Ok(Json(update.into()))
}
