use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::loader::ConfigError;
use crate::store::SupersedePolicy;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Where the answering service lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Origin of the answering service (e.g., "https://gastroapi.rohitkphilip.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Server-relative path of the query endpoint.
    #[serde(default = "default_query_path")]
    pub query_path: String,
}

/// Identity sent with every question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

/// Query store behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct QueryConfig {
    /// What to do with a completion that arrives after a newer submission.
    #[serde(default)]
    pub supersede: SupersedePolicy,
}

/// Terminal UI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Redraw / spinner tick in milliseconds (default: 250).
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_base_url() -> String {
    "https://gastroapi.rohitkphilip.com".to_string()
}

fn default_query_path() -> String {
    "/api/query".to_string()
}

fn default_user_id() -> String {
    "guest".to_string()
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl ServerConfig {
    /// Full URL of the query endpoint.
    pub fn endpoint(&self) -> Result<Url, ConfigError> {
        let raw = format!(
            "{}{}",
            self.base_url.trim().trim_end_matches('/'),
            self.query_path.trim()
        );
        let url = Url::parse(&raw).map_err(|e| ConfigError::ValidationError {
            message: format!("Invalid server URL '{}': {}", raw, e),
        })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::ValidationError {
                message: format!("Unsupported URL scheme '{}' in '{}'", other, raw),
            }),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            query_path: default_query_path(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
        }
    }
}

impl UiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}
