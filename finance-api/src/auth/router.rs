use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use crate::{app_state::AppState, routes::ApiError};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(self::get::me))
        .route("/login", post(self::post::login))
        .route("/logout", get(self::get::logout))
}

pub const MISSING_CREDENTIALS: &str = "Please enter both email and password";
pub const INVALID_CREDENTIALS: &str = "Incorrect email or password";

/// Both fields are optional so a missing one is reported like a blank one.
#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

mod post {
    use tracing::instrument;

    use crate::{
        auth::backend::{AuthSession, Credentials},
        domain::User,
    };

    use super::*;

    #[instrument(name = "login", skip_all)]
    pub async fn login(
        mut auth_session: AuthSession,
        Json(request): Json<LoginRequest>,
    ) -> Result<Json<User>, ApiError> {
        let email = request.email.unwrap_or_default();
        let password = request.password.unwrap_or_default();
        if email.trim().is_empty() || password.is_empty() {
            return Err(ApiError::bad_request(MISSING_CREDENTIALS));
        }

        let user = match auth_session
            .authenticate(Credentials { email, password })
            .await
        {
            Ok(Some(user)) => user,
            Ok(None) => return Err(ApiError::unauthorized(INVALID_CREDENTIALS)),
            Err(e) => {
                tracing::error!("Authentication backend failed: {}", e);
                return Err(ApiError::internal("Authentication failed"));
            }
        };

        if let Err(e) = auth_session.login(&user).await {
            tracing::error!("Failed to establish session: {}", e);
            return Err(ApiError::internal("Authentication failed"));
        }

        tracing::info!(user_id = %user.id, "user signed in");
        Ok(Json(user))
    }
}

mod get {
    use crate::{auth::backend::AuthSession, domain::User};

    use super::*;

    pub async fn me(auth_session: AuthSession) -> Result<Json<User>, StatusCode> {
        let user = match auth_session.user {
            Some(user) => user,
            None => return Err(StatusCode::UNAUTHORIZED),
        };

        Ok(Json(user))
    }

    pub async fn logout(mut auth_session: AuthSession) -> impl IntoResponse {
        match auth_session.logout().await {
            Ok(_) => StatusCode::NO_CONTENT.into_response(),
            Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
