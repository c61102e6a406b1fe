use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::SameSite;
use axum_login::{
    login_required,
    tower_sessions::{CachingSessionStore, ExpiredDeletion, Expiry, SessionManagerLayer},
    AuthManagerLayer, AuthManagerLayerBuilder,
};
use sqlx::PgPool;
use time::Duration;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tower_sessions_moka_store::MokaStore;
use tower_sessions_sqlx_store::PostgresStore;

type SessionStore = CachingSessionStore<MokaStore, PostgresStore>;

use crate::{
    app_state::AppState,
    auth::{self, AuthBackend},
    config::Settings,
    routes,
};

/// Every authenticated route, before any session or auth layering.
pub(crate) fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "finance-api" }))
        .nest("/admin-center", routes::organization::router())
        .nest("/projects", routes::projects::router())
        .nest("/project-finance", routes::project_finance::router())
        .nest("/rate-cards", routes::rate_cards::router())
}

pub async fn create(connection_pool: PgPool, config: Settings) -> Result<Router<()>, sqlx::Error> {
    let auth_layer = new_auth_layer(connection_pool.clone(), &config).await?;
    let app_with_auth = api_routes()
        .route_layer(login_required!(AuthBackend))
        .merge(auth::router())
        .layer(auth_layer);

    let app_state = AppState::new(connection_pool);

    // Url keeps a trailing slash, browsers send the bare origin.
    let app_origin = config.application.app_url.origin().ascii_serialization();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
        .allow_origin(AllowOrigin::predicate(move |origin, _| {
            origin.to_str().unwrap_or_default() == app_origin
        }));

    Ok(app_with_auth
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default())))
}

async fn new_auth_layer(
    connection_pool: PgPool,
    config: &Settings,
) -> Result<AuthManagerLayer<AuthBackend, SessionStore>, sqlx::Error> {
    // Postgres keeps sessions across restarts
    let db_store = PostgresStore::new(connection_pool.clone());
    db_store.migrate().await?;

    let deletion_task = tokio::task::spawn(
        db_store
            .clone()
            .continuously_delete_expired(tokio::time::Duration::from_secs(60)),
    );
    drop(deletion_task);

    // Moka in front to spare the database on hot sessions
    let cache_store = MokaStore::new(Some(config.session.cache_capacity));
    let session_store = CachingSessionStore::new(cache_store, db_store);

    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.application.secure_cookies)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(
            config.session.expiry_days,
        )));

    let backend = AuthBackend::new(connection_pool);
    Ok(AuthManagerLayerBuilder::new(backend, session_layer).build())
}
