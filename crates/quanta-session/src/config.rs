//! # Session Configuration
//!
//! Configuration for one admin panel page session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     QUANTA_BACKEND_URL=https://api.example.com                         │
//! │     QUANTA_BEARER_TOKEN=...                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/quanta-checkout/session.toml (Linux)                     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost backend, cookie auth, 400ms debounce                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # session.toml
//! [backend]
//! base_url = "https://api.example.com"
//! timeout_secs = 30
//! # bearer_token = "..."   # omit for cookie-session auth
//!
//! [pricing]
//! debounce_ms = 400
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use quanta_api::{AuthMode, ClientConfig};

use crate::error::{SessionError, SessionResult};

// =============================================================================
// Backend Settings
// =============================================================================

/// Backend connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendSettings {
    /// Backend base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Bearer token. When absent, requests authenticate via the session
    /// cookie store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            bearer_token: None,
        }
    }
}

// =============================================================================
// Pricing Settings
// =============================================================================

/// Pricing interaction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingSettings {
    /// Debounce interval for token-input recalculation (milliseconds).
    /// Each keystroke cancels the pending recalculation and schedules a new
    /// one after this interval.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Per-order token cap for this deployment. May tighten the engine's
    /// hard limit but never exceed it.
    #[serde(default = "default_max_tokens")]
    pub max_tokens_per_order: i64,
}

fn default_debounce_ms() -> u64 {
    400
}

fn default_max_tokens() -> i64 {
    quanta_core::MAX_TOKENS_PER_ORDER
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            debounce_ms: default_debounce_ms(),
            max_tokens_per_order: default_max_tokens(),
        }
    }
}

// =============================================================================
// Session Configuration
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub backend: BackendSettings,

    /// Pricing interaction settings.
    #[serde(default)]
    pub pricing: PricingSettings,
}

impl SessionConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (session.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading session config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load session config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> SessionResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| SessionError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SessionError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| SessionError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Session config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SessionResult<()> {
        if !self.backend.base_url.starts_with("http://")
            && !self.backend.base_url.starts_with("https://")
        {
            return Err(SessionError::InvalidConfig(format!(
                "backend base_url must start with http:// or https://, got: {}",
                self.backend.base_url
            )));
        }

        if self.backend.timeout_secs == 0 {
            return Err(SessionError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.pricing.max_tokens_per_order <= 0
            || self.pricing.max_tokens_per_order > quanta_core::MAX_TOKENS_PER_ORDER
        {
            return Err(SessionError::InvalidConfig(format!(
                "max_tokens_per_order must be in 1..={}",
                quanta_core::MAX_TOKENS_PER_ORDER
            )));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("QUANTA_BACKEND_URL") {
            debug!(url = %url, "Overriding backend URL from environment");
            self.backend.base_url = url;
        }

        if let Ok(token) = std::env::var("QUANTA_BEARER_TOKEN") {
            self.backend.bearer_token = Some(token);
        }

        if let Ok(timeout) = std::env::var("QUANTA_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse::<u64>() {
                self.backend.timeout_secs = t;
            }
        }

        if let Ok(debounce) = std::env::var("QUANTA_DEBOUNCE_MS") {
            if let Ok(d) = debounce.parse::<u64>() {
                debug!(debounce_ms = d, "Overriding debounce interval from environment");
                self.pricing.debounce_ms = d;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "quanta", "checkout")
            .map(|dirs| dirs.config_dir().join("session.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Builds the API client configuration.
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend.base_url.clone(),
            timeout: Duration::from_secs(self.backend.timeout_secs),
            auth: match &self.backend.bearer_token {
                Some(token) => AuthMode::Bearer(token.clone()),
                None => AuthMode::CookieSession,
            },
        }
    }

    /// Returns the debounce interval.
    pub fn debounce_interval(&self) -> Duration {
        Duration::from_millis(self.pricing.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.backend.base_url, "http://localhost:8080");
        assert_eq!(config.pricing.debounce_ms, 400);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SessionConfig::default();
        assert!(config.validate().is_ok());

        config.backend.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config.backend.base_url = "https://api.example.com".to_string();
        config.backend.timeout_secs = 0;
        assert!(config.validate().is_err());

        config.backend.timeout_secs = 30;
        config.pricing.max_tokens_per_order = 0;
        assert!(config.validate().is_err());

        config.pricing.max_tokens_per_order = quanta_core::MAX_TOKENS_PER_ORDER + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SessionConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[backend]"));
        assert!(toml_str.contains("[pricing]"));

        let parsed: SessionConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.backend.base_url, config.backend.base_url);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: SessionConfig = toml::from_str(
            r#"
            [backend]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.backend.base_url, "https://api.example.com");
        assert_eq!(parsed.backend.timeout_secs, 30);
        assert_eq!(parsed.pricing.debounce_ms, 400);
    }

    #[test]
    fn test_env_overrides_take_priority() {
        std::env::set_var("QUANTA_BACKEND_URL", "https://env.example.com");
        std::env::set_var("QUANTA_BEARER_TOKEN", "env-token");
        std::env::set_var("QUANTA_TIMEOUT_SECS", "12");
        std::env::set_var("QUANTA_DEBOUNCE_MS", "250");

        let mut config = SessionConfig::default();
        config.apply_env_overrides();

        std::env::remove_var("QUANTA_BACKEND_URL");
        std::env::remove_var("QUANTA_BEARER_TOKEN");
        std::env::remove_var("QUANTA_TIMEOUT_SECS");
        std::env::remove_var("QUANTA_DEBOUNCE_MS");

        assert_eq!(config.backend.base_url, "https://env.example.com");
        assert_eq!(config.backend.bearer_token.as_deref(), Some("env-token"));
        assert_eq!(config.backend.timeout_secs, 12);
        assert_eq!(config.pricing.debounce_ms, 250);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_client_config_auth_mode() {
        let mut config = SessionConfig::default();
        assert!(matches!(
            config.client_config().auth,
            quanta_api::AuthMode::CookieSession
        ));

        config.backend.bearer_token = Some("tok".into());
        assert!(matches!(
            config.client_config().auth,
            quanta_api::AuthMode::Bearer(t) if t == "tok"
        ));
    }
}
