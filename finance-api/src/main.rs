use std::io::{self, BufRead};

use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod adapters;
mod app_state;
mod auth;
mod config;
mod domain;
mod factory;
mod repositories;
mod router;
mod routes;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();

    if std::env::args().nth(1).as_deref() == Some("hash-password") {
        return print_password_hash();
    }

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "finance_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::read_config()?;

    let connection_pool = get_connection_pool(&config.database);
    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    let app = router::create(connection_pool, config.clone()).await?;

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn get_connection_pool(settings: &config::DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy_with(settings.with_db())
}

/// Reads a password from stdin and prints its argon2 PHC string, for seeding
/// the `users.password` column.
fn print_password_hash() -> Result<(), BoxError> {
    let mut password = String::new();
    io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);
    if password.is_empty() {
        return Err("expected a password on stdin".into());
    }

    let hash = auth::hash_password(password).map_err(|err| err.to_string())?;
    println!("{hash}");
    Ok(())
}
