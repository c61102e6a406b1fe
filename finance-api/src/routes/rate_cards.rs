use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::ApiError;
use crate::{
    adapters::inbound::http::{RateCardDetailsResponse, RateCardResponse},
    app_state::AppState,
    auth::AuthUser,
    domain::models::RateCardId,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rate_cards))
        .route("/:id", get(get_rate_card))
}

#[instrument(name = "GET /rate-cards", skip_all)]
async fn list_rate_cards(
    user: AuthUser,
    State(app_state): State<AppState>,
) -> Result<Json<Vec<RateCardResponse>>, ApiError> {
    let cards = app_state
        .rate_card_service
        .list_rate_cards(&user.organization_id)
        .await?;

    Ok(Json(cards.into_iter().map(RateCardResponse::from).collect()))
}

#[instrument(name = "GET /rate-cards/:id", skip(user, app_state))]
async fn get_rate_card(
    user: AuthUser,
    State(app_state): State<AppState>,
    Path(id): Path<RateCardId>,
) -> Result<Json<RateCardDetailsResponse>, ApiError> {
    let details = app_state
        .rate_card_service
        .get_rate_card(&user.organization_id, &id)
        .await?;

    Ok(Json(details.into()))
}
