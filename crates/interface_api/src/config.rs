//! API configuration

use serde::Deserialize;

/// Storage engine behind the product port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL (`postgres://` or `postgresql://`)
    Postgres,
    /// SQLite file or in-memory database (`sqlite:`)
    Sqlite,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL; its scheme selects the storage backend
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Log output format: `text` or `json`
    pub log_format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/products".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// Unset variables keep their default values. `DATABASE_URL` is used when
    /// `API_DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Loads configuration from the given variables instead of the process
    /// environment
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed into its field, such
    /// as a non-numeric `API_PORT`.
    pub fn from_vars(vars: config::Map<String, String>) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let database_url = vars
            .get("API_DATABASE_URL")
            .or_else(|| vars.get("DATABASE_URL"))
            .cloned()
            .unwrap_or(defaults.database_url);

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("database_url", database_url)?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", defaults.log_format)?
            .add_source(
                config::Environment::with_prefix("API")
                    .try_parsing(true)
                    .source(Some(vars)),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns true if logs should be emitted as JSON lines
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }

    /// Determines the storage backend from the database URL scheme
    pub fn storage_backend(&self) -> Result<StorageBackend, config::ConfigError> {
        let url = self.database_url.as_str();
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(StorageBackend::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(StorageBackend::Sqlite)
        } else {
            Err(config::ConfigError::Message(format!(
                "unsupported database URL scheme: {}",
                url
            )))
        }
    }
}
