use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// Request body cap in bytes. `None` leaves uploads unbounded.
    pub max_upload_size: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Store connection string: the directory holding the product database.
    pub database_url: String,
    /// Directory uploaded images are written to
    pub upload_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            max_upload_size: None,
        }
    }
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT").filter(|s| !s.trim().is_empty()) {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("PORT must be a port number, got '{raw}'"))
            })?,
            None => ServerConfig::default().port,
        };

        let max_upload_size = match lookup("MAX_UPLOAD_SIZE").filter(|s| !s.trim().is_empty()) {
            Some(raw) => Some(raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "MAX_UPLOAD_SIZE must be a byte count, got '{raw}'"
                ))
            })?),
            None => None,
        };

        let database_url = lookup("MONGO_URL").ok_or(ConfigError::Missing("MONGO_URL"))?;

        let upload_dir = lookup("UPLOAD_DIR").unwrap_or_else(|| "uploads".to_string());

        let config = Config {
            server: ServerConfig {
                port,
                max_upload_size,
            },
            storage: StorageConfig {
                database_url,
                upload_dir,
            },
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.database_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "MONGO_URL cannot be empty".to_string(),
            ));
        }

        if self.storage.upload_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "UPLOAD_DIR cannot be empty".to_string(),
            ));
        }

        if self.server.max_upload_size == Some(0) {
            return Err(ConfigError::ValidationError(
                "MAX_UPLOAD_SIZE must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
