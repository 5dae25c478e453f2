use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default, env_parse, env_required};

/// PostgreSQL connection settings.
///
/// Either built from a full URL (`new`) or from the individual components the
/// backing store is usually described by (`from_parts`). With the `config`
/// feature it can also be loaded from the environment.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,

    /// Enable SQL statement logging
    pub sqlx_logging: bool,

    /// SQL logging level
    pub sqlx_logging_level: LevelFilter,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Build the connection URL from host, port, database name and credentials.
    ///
    /// User and password are percent-encoded so reserved characters survive.
    pub fn from_parts(host: &str, port: u16, database: &str, user: &str, password: &str) -> Self {
        let credentials = if password.is_empty() {
            urlencoding::encode(user).into_owned()
        } else {
            format!(
                "{}:{}",
                urlencoding::encode(user),
                urlencoding::encode(password)
            )
        };

        Self::new(format!(
            "postgres://{}@{}:{}/{}",
            credentials, host, port, database
        ))
    }

    /// Options for a short-lived handle holding exactly one connection.
    ///
    /// The connection is opened eagerly, so an unreachable server fails the
    /// connect call itself rather than the first query.
    pub fn scoped_connect_options(&self) -> ConnectOptions {
        let mut opt = ConnectOptions::new(&self.url);
        opt.max_connections(1)
            .min_connections(0)
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(self.sqlx_logging_level);
        opt
    }

    /// The connection URL with the password masked, for logs.
    pub fn redacted_url(&self) -> String {
        match (self.url.find("://"), self.url.rfind('@')) {
            (Some(scheme_end), Some(at)) if at > scheme_end => {
                let userinfo = &self.url[scheme_end + 3..at];
                let user = userinfo.split(':').next().unwrap_or_default();
                format!(
                    "{}{}:***{}",
                    &self.url[..scheme_end + 3],
                    user,
                    &self.url[at..]
                )
            }
            _ => self.url.clone(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            connect_timeout_secs: 8,
            sqlx_logging: true,
            sqlx_logging_level: LevelFilter::Debug,
        }
    }
}

/// Load PostgresConfig from environment variables
///
/// `DATABASE_URL` wins when present. Otherwise the URL is assembled from:
/// - `DB_HOST` (optional, default: localhost)
/// - `DB_PORT` (optional, default: 5432)
/// - `DB_NAME` (required)
/// - `DB_USER` (required)
/// - `DB_PASSWORD` (optional, default: empty)
///
/// Connection tunables:
/// - `DB_CONNECT_TIMEOUT_SECS` (optional, default: 8)
/// - `DB_SQLX_LOGGING` (optional, default: true)
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("DATABASE_URL") {
            Ok(url) => Self::new(url),
            Err(_) => {
                let host = env_or_default("DB_HOST", "localhost");
                let port: u16 = env_parse("DB_PORT", "5432")?;
                let database = env_required("DB_NAME")?;
                let user = env_required("DB_USER")?;
                let password = env_or_default("DB_PASSWORD", "");
                Self::from_parts(&host, port, &database, &user, &password)
            }
        };

        config.connect_timeout_secs = env_parse("DB_CONNECT_TIMEOUT_SECS", "8")?;
        config.sqlx_logging = env_parse("DB_SQLX_LOGGING", "true")?;

        Ok(config)
    }
}
