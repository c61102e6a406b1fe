use std::str::FromStr;

use serde::Deserialize;
use serde_with::serde_as;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use strum::{Display, EnumString};
use url::Url;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub session: SessionSettings,
}

#[serde_as]
#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    /// Frontend origin, the only one CORS lets through.
    pub app_url: Url,
    pub secure_cookies: bool,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    pub require_ssl: bool,
}

#[serde_as]
#[derive(Deserialize, Clone, Debug)]
pub struct SessionSettings {
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub expiry_days: i64,
    #[serde_as(as = "serde_with::DisplayFromStr")]
    pub cache_capacity: u64,
}

impl DatabaseSettings {
    pub fn without_db(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };

        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .ssl_mode(ssl_mode)
    }

    pub fn with_db(&self) -> PgConnectOptions {
        self.without_db().database(&self.database_name)
    }
}

pub fn read_config() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|err| config::ConfigError::Message(format!("no working directory: {err}")))?;
    let config_directory = base_path.join("config");

    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".into());
    let environment = Environment::from_str(&environment).map_err(|_| {
        config::ConfigError::Message(format!(
            "unknown APP_ENVIRONMENT `{environment}`, use `local` or `production`"
        ))
    })?;
    let environment_filename = format!("{}.yaml", environment);

    let settings = config::Config::builder()
        .add_source(config::File::from(config_directory.join("base.yaml")))
        .add_source(config::File::from(
            config_directory.join(environment_filename),
        ))
        .add_source(
            config::Environment::with_prefix("FINANCE")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Display, Debug, EnumString, PartialEq, Eq)]
pub enum Environment {
    #[strum(ascii_case_insensitive, serialize = "local")]
    Local,
    #[strum(ascii_case_insensitive, serialize = "production")]
    Production,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_names_are_case_insensitive() {
        assert_eq!(Environment::from_str("Production").unwrap(), Environment::Production);
        assert_eq!(Environment::Local.to_string(), "local");
        assert!(Environment::from_str("staging").is_err());
    }

    #[test]
    fn database_options_carry_the_database_name() {
        let settings = DatabaseSettings {
            username: "postgres".into(),
            password: "password".into(),
            port: 5432,
            host: "localhost".into(),
            database_name: "finance".into(),
            require_ssl: false,
        };

        assert_eq!(settings.with_db().get_database(), Some("finance"));
        assert_eq!(settings.without_db().get_database(), None);
    }
}
