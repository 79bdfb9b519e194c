use std::fmt;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;

/// A configuration value that could not be interpreted.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Where documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{other}' (expected postgres or memory)")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

/// Document store connection settings.
///
/// `bucket` names the database that holds the document table. When
/// `database_url` is set it wins over the individual fields.
#[derive(Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub bucket: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
}

impl StoreConfig {
    /// PostgreSQL connect options built from the configured fields.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.database_url {
            return url.parse();
        }
        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.bucket)
            .username(&self.user)
            .password(&self.password))
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("backend", &self.backend)
            .field("database_url", &self.database_url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("bucket", &self.bucket)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    pub log_format: LogFormat,
    pub store: StoreConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default     |
    /// |----------------------------|-------------|
    /// | `HOST`                     | `0.0.0.0`   |
    /// | `PORT`                     | `8080`      |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`        |
    /// | `LOG_FORMAT`               | `pretty`    |
    /// | `STORE_BACKEND`            | `postgres`  |
    /// | `DATABASE_URL`             | unset       |
    /// | `DATABASE_HOST`            | `localhost` |
    /// | `DATABASE_PORT`            | `5432`      |
    /// | `DATABASE_BUCKET`          | `taskboard` |
    /// | `DATABASE_USER`            | `postgres`  |
    /// | `DATABASE_PASSWORD`        | empty       |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`        |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let text = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());

        let store = StoreConfig {
            backend: parse(&lookup, "STORE_BACKEND", StoreBackend::Postgres)?,
            database_url: lookup("DATABASE_URL").filter(|s| !s.is_empty()),
            host: text("DATABASE_HOST", "localhost"),
            port: parse(&lookup, "DATABASE_PORT", 5432)?,
            bucket: text("DATABASE_BUCKET", "taskboard"),
            user: text("DATABASE_USER", "postgres"),
            password: text("DATABASE_PASSWORD", ""),
            max_connections: parse(&lookup, "DATABASE_MAX_CONNECTIONS", 20)?,
        };

        Ok(Self {
            host: text("HOST", "0.0.0.0"),
            port: parse(&lookup, "PORT", 8080)?,
            request_timeout_secs: parse(&lookup, "REQUEST_TIMEOUT_SECS", 30)?,
            log_format: parse(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
            store,
        })
    }
}

fn parse<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| map.get(var).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.store.backend, StoreBackend::Postgres);
        assert_eq!(config.store.bucket, "taskboard");
        assert_eq!(config.store.max_connections, 20);
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("PORT", "9000"),
            ("STORE_BACKEND", "memory"),
            ("LOG_FORMAT", "json"),
            ("DATABASE_BUCKET", "projects"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.store.bucket, "projects");
    }

    #[test]
    fn invalid_port_names_the_variable() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().starts_with("PORT has invalid value 'eighty'"));
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(load(&[("STORE_BACKEND", "couch")]).is_err());
    }

    #[test]
    fn debug_output_redacts_password() {
        let config = load(&[("DATABASE_PASSWORD", "hunter2")]).unwrap();
        let rendered = format!("{:?}", config.store);
        assert!(!rendered.contains("hunter2"));
    }
}
