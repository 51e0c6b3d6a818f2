use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Full URL prefix of the admin backend, e.g. "http://localhost:8080/api/admin".
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub log_requests: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("BAFT_API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Ok(v) = env::var("BAFT_HTTP_TIMEOUT_SECS") {
            self.http.timeout_secs = v.parse().unwrap_or(self.http.timeout_secs);
        }
        if let Ok(v) = env::var("BAFT_HTTP_LOG_REQUESTS") {
            self.http.log_requests = v.parse().unwrap_or(self.http.log_requests);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8080/api/admin".to_string(),
            },
            http: HttpConfig {
                timeout_secs: 30,
                user_agent: concat!("baft-admin/", env!("CARGO_PKG_VERSION")).to_string(),
                log_requests: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.baft.example.com/api/admin".to_string(),
            },
            http: HttpConfig {
                timeout_secs: 20,
                user_agent: concat!("baft-admin/", env!("CARGO_PKG_VERSION")).to_string(),
                log_requests: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://admin.baft.example.com/api/admin".to_string(),
            },
            http: HttpConfig {
                timeout_secs: 15,
                user_agent: concat!("baft-admin/", env!("CARGO_PKG_VERSION")).to_string(),
                log_requests: false,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

/// Directory holding CLI state (the persisted session record lives here).
pub fn cli_state_dir() -> anyhow::Result<PathBuf> {
    let dir = if let Ok(custom) = env::var("BAFT_CLI_CONFIG_DIR") {
        PathBuf::from(custom)
    } else {
        let home =
            env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("baft").join("cli")
    };

    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

/// Path of the single-record session file.
pub fn session_file() -> anyhow::Result<PathBuf> {
    Ok(cli_state_dir()?.join("session.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert!(config.api.base_url.starts_with("http://localhost"));
        assert!(config.http.log_requests);
    }

    #[test]
    fn production_defaults() {
        let config = AppConfig::production();
        assert!(config.api.base_url.starts_with("https://"));
        assert!(!config.http.log_requests);
    }
}
