use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Development fallback; deployments must override via `TALENTHUB_JWT_SECRET`.
pub const DEFAULT_JWT_SECRET: &str = "talenthub-dev-secret-change-in-production";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub server: ServerConfig,

    pub auth: AuthConfig,

    pub uploads: UploadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (0 = number of CPU cores)
    pub worker_threads: usize,

    pub max_db_connections: u32,

    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/talenthub.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,

    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4321,
            cors_allowed_origins: vec![
                "http://localhost:4321".to_string(),
                "http://127.0.0.1:4321".to_string(),
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for signing auth tokens.
    pub jwt_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory served publicly under `/uploads`. CVs land in a `cv/`
    /// subdirectory that is not linked from the public site.
    pub path: String,

    pub max_image_bytes: usize,

    pub max_cv_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            path: "public/uploads".to_string(),
            max_image_bytes: 10 * 1024 * 1024,
            max_cv_bytes: 5 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load `config.toml` when present, then apply environment overrides.
    /// The admin seed credentials (`TALENTHUB_ADMIN_USER` /
    /// `TALENTHUB_ADMIN_PASS`) are read by the seed migration directly.
    pub fn load() -> Result<Self> {
        let mut config = if Path::new("config.toml").exists() {
            let raw = std::fs::read_to_string("config.toml")
                .context("Failed to read config.toml")?;
            toml::from_str(&raw).context("Failed to parse config.toml")?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("TALENTHUB_DATABASE_PATH") {
            self.general.database_path = v;
        }
        if let Ok(v) = std::env::var("TALENTHUB_PORT")
            && let Ok(port) = v.parse()
        {
            self.server.port = port;
        }
        if let Ok(v) = std::env::var("TALENTHUB_JWT_SECRET") {
            self.auth.jwt_secret = v;
        }
        if let Ok(v) = std::env::var("TALENTHUB_UPLOADS_PATH") {
            self.uploads.path = v;
        }
    }

    /// Warn loudly when the fallback signing secret survived into a running
    /// process; it must never be used in a production deployment.
    pub fn validate(&self) {
        if self.auth.jwt_secret == DEFAULT_JWT_SECRET {
            warn!("Using the built-in JWT secret; set TALENTHUB_JWT_SECRET in production");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 4321);
        assert_eq!(config.uploads.max_cv_bytes, 5 * 1024 * 1024);
        assert_eq!(config.uploads.max_image_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str("[server]\nport = 9000\n").unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.general.database_path, "sqlite:data/talenthub.db");
    }
}
