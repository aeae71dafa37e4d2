//! Application Configuration Module
//!
//! Loads the terminal front end's settings from the environment. The front
//! end never holds provider credentials; it talks to the `mirror-api` proxy
//! (or any endpoint that does not need a key) at `PERSONA_API_URL`.

use mirror_core::connector::DEFAULT_CONNECT_TIMEOUT;
use mirror_core::session_state::{DEFAULT_USER_LABEL, NavigationMode, ParseNavigationModeError};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::Level;

/// Where the credential proxy listens by default.
pub const DEFAULT_PERSONA_API_URL: &str = "http://127.0.0.1:3000";

/// Holds all configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub persona_api_url: String,
    pub persona_embed_url: Option<String>,
    pub connect_timeout: Duration,
    pub navigation_mode: NavigationMode,
    pub candidate_name: String,
    pub catalog_dir: Option<PathBuf>,
    pub microphone_device: Option<String>,
    pub log_level: Level,
}

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid log level provided for RUST_LOG: {0}")]
    InvalidLogLevel(String),
    #[error("Invalid PERSONA_CONNECT_TIMEOUT_MS: {0}")]
    InvalidTimeout(String),
    #[error("Invalid NAVIGATION_MODE: {0}")]
    InvalidNavigationMode(#[from] ParseNavigationModeError),
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    // *   `PERSONA_API_URL`: (Optional) Base URL of the persona proxy. Defaults to "http://127.0.0.1:3000".
    // *   `PERSONA_EMBED_URL`: (Optional) Base URL of the interactive persona view.
    // *   `PERSONA_CONNECT_TIMEOUT_MS`: (Optional) Handshake timeout. Defaults to 5000.
    // *   `NAVIGATION_MODE`: (Optional) "host-paced" or "remote-paced". Defaults to "host-paced".
    // *   `CANDIDATE_NAME`: (Optional) Label the persona uses for the user. Defaults to "Candidate".
    // *   `CATALOG_DIR`: (Optional) Directory of domain JSON files replacing the built-in catalog.
    // *   `MICROPHONE_DEVICE`: (Optional) Input device name. Defaults to the host's default input.
    // *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO".
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file. This is useful for local development and is ignored if not present.
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let persona_api_url =
            non_empty("PERSONA_API_URL").unwrap_or_else(|| DEFAULT_PERSONA_API_URL.to_string());
        let persona_embed_url = non_empty("PERSONA_EMBED_URL");

        let connect_timeout = match non_empty("PERSONA_CONNECT_TIMEOUT_MS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            None => DEFAULT_CONNECT_TIMEOUT,
        };

        let navigation_mode = match non_empty("NAVIGATION_MODE") {
            Some(raw) => raw.parse::<NavigationMode>()?,
            None => NavigationMode::default(),
        };

        let candidate_name =
            non_empty("CANDIDATE_NAME").unwrap_or_else(|| DEFAULT_USER_LABEL.to_string());
        let catalog_dir = non_empty("CATALOG_DIR").map(PathBuf::from);
        let microphone_device = non_empty("MICROPHONE_DEVICE");

        // Configure logging level from RUST_LOG, with a sensible default.
        let log_level_str = non_empty("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(log_level_str))?;

        Ok(Self {
            persona_api_url,
            persona_embed_url,
            connect_timeout,
            navigation_mode,
            candidate_name,
            catalog_dir,
            microphone_device,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.persona_api_url, DEFAULT_PERSONA_API_URL);
        assert_eq!(config.persona_embed_url, None);
        assert_eq!(config.connect_timeout, Duration::from_millis(5000));
        assert_eq!(config.navigation_mode, NavigationMode::HostPaced);
        assert_eq!(config.candidate_name, "Candidate");
        assert_eq!(config.catalog_dir, None);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PERSONA_API_URL", "https://proxy.example"),
            ("PERSONA_CONNECT_TIMEOUT_MS", "250"),
            ("NAVIGATION_MODE", "remote-paced"),
            ("CANDIDATE_NAME", "Ada"),
            ("CATALOG_DIR", "/srv/catalog"),
            ("MICROPHONE_DEVICE", "USB Headset"),
            ("RUST_LOG", "debug"),
        ]))
        .unwrap();

        assert_eq!(config.persona_api_url, "https://proxy.example");
        assert_eq!(config.connect_timeout, Duration::from_millis(250));
        assert_eq!(config.navigation_mode, NavigationMode::RemotePaced);
        assert_eq!(config.candidate_name, "Ada");
        assert_eq!(config.catalog_dir, Some(PathBuf::from("/srv/catalog")));
        assert_eq!(config.microphone_device.as_deref(), Some("USB Headset"));
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[("CANDIDATE_NAME", "  ")])).unwrap();
        assert_eq!(config.candidate_name, "Candidate");
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("PERSONA_CONNECT_TIMEOUT_MS", "soon")])),
            Err(ConfigError::InvalidTimeout(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("NAVIGATION_MODE", "sideways")])),
            Err(ConfigError::InvalidNavigationMode(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("RUST_LOG", "chatty")])),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
