//! Configuration loading for tailfind.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag)
//! 2. `~/.tailfin/config.toml` (user)
//! 3. `/etc/tailfin/config.toml` (system)
//!
//! When no file exists, built-in defaults apply — the daemon runs
//! without any configuration, in soft-degrade mode if no API key is
//! found either.
//!
//! The AirLabs API key is a secret, loaded separately:
//! 1. `AIRLABS_API_KEY` environment variable
//! 2. `~/.tailfin/secrets.toml` (user, must be 0600)
//! 3. `/etc/tailfin/secrets.toml` (system, must be 0600)

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Result, TailfinError};

/// Server configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub rate: RateSection,
    #[serde(default)]
    pub airlabs: AirlabsSection,
}

/// Server network configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:8460).
    #[serde(default = "default_address")]
    pub address: String,
    /// Include error detail in HTTP error bodies (default: false).
    /// Leave off in production; the generic message is logged with
    /// detail server-side either way.
    #[serde(default)]
    pub expose_error_details: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            expose_error_details: false,
        }
    }
}

fn default_address() -> String {
    "127.0.0.1:8460".to_string()
}

/// Response cache settings.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    /// Maximum number of cached entries (default: 10,000).
    #[serde(default = "default_max_entries")]
    pub max_entries: u64,
    /// Entry time-to-live in seconds (default: 600).
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_max_entries() -> u64 {
    10_000
}

fn default_ttl_secs() -> u64 {
    600
}

/// Outbound call budget settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RateSection {
    /// Sustained upstream calls per minute (default: 60).
    #[serde(default = "default_per_minute")]
    pub per_minute: u32,
    /// Burst size (default: 10).
    #[serde(default = "default_burst")]
    pub burst: u32,
}

impl Default for RateSection {
    fn default() -> Self {
        Self {
            per_minute: default_per_minute(),
            burst: default_burst(),
        }
    }
}

fn default_per_minute() -> u32 {
    60
}

fn default_burst() -> u32 {
    10
}

/// AirLabs provider settings (the key itself lives in [`Secrets`]).
#[derive(Debug, Clone, Deserialize)]
pub struct AirlabsSection {
    /// Base URL override, mainly for proxied deployments.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Upstream request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AirlabsSection {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// Resolution order:
    /// 1. Explicit path (if provided)
    /// 2. `~/.tailfin/config.toml`
    /// 3. `/etc/tailfin/config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit_path)? else {
            return Ok(Config::default());
        };
        let content = fs::read_to_string(&path).map_err(|e| {
            TailfinError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            TailfinError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    /// Resolve the config file path. `Ok(None)` means "use defaults".
    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(TailfinError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        // User config
        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".tailfin").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        // System config
        let system_config = PathBuf::from("/etc/tailfin/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }
}

/// Secrets (the AirLabs API key).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Secrets {
    #[serde(default)]
    pub airlabs: Option<ApiKeySecret>,
}

/// A single API key secret.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiKeySecret {
    pub api_key: String,
}

impl Secrets {
    /// Load secrets from the environment or the standard locations.
    ///
    /// Resolution order:
    /// 1. `AIRLABS_API_KEY` environment variable
    /// 2. `~/.tailfin/secrets.toml` (if exists, must be 0600)
    /// 3. `/etc/tailfin/secrets.toml` (if exists, must be 0600)
    ///
    /// Returns empty secrets when nothing is found — the gateway then
    /// runs in soft-degrade mode.
    pub fn load() -> Result<Self> {
        if let Ok(key) = std::env::var("AIRLABS_API_KEY") {
            if !key.trim().is_empty() {
                return Ok(Secrets {
                    airlabs: Some(ApiKeySecret { api_key: key }),
                });
            }
        }

        // Try user secrets first
        if let Some(home) = dirs::home_dir() {
            let user_secrets = home.join(".tailfin").join("secrets.toml");
            if user_secrets.exists() {
                Self::check_permissions(&user_secrets)?;
                return Self::load_from_file(&user_secrets);
            }
        }

        // Try system secrets
        let system_secrets = PathBuf::from("/etc/tailfin/secrets.toml");
        if system_secrets.exists() {
            Self::check_permissions(&system_secrets)?;
            return Self::load_from_file(&system_secrets);
        }

        Ok(Secrets::default())
    }

    /// The AirLabs API key, if configured.
    pub fn airlabs_key(&self) -> Option<&str> {
        self.airlabs.as_ref().map(|s| s.api_key.as_str())
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TailfinError::Configuration(format!("Failed to read secrets file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            TailfinError::Configuration(format!("Failed to parse secrets file {path:?}: {e}"))
        })
    }

    /// Check that the secrets file has secure permissions (0600 or 0400).
    #[cfg(unix)]
    fn check_permissions(path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let metadata = fs::metadata(path).map_err(|e| {
            TailfinError::Configuration(format!("Failed to stat secrets file {path:?}: {e}"))
        })?;

        let mode = metadata.permissions().mode();
        // Reject if group or other bits are set
        if mode & 0o077 != 0 {
            return Err(TailfinError::Configuration(format!(
                "Secrets file {path:?} has insecure permissions {:o}. Must be 0600 or 0400.",
                mode & 0o777
            )));
        }

        Ok(())
    }

    #[cfg(not(unix))]
    fn check_permissions(_path: &Path) -> Result<()> {
        // Permission check not available on non-Unix platforms
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.address, "127.0.0.1:8460");
        assert_eq!(config.cache.max_entries, 10_000);
        assert_eq!(config.rate.per_minute, 60);
        assert_eq!(config.airlabs.timeout_secs, 10);
        assert!(!config.server.expose_error_details);
    }

    #[test]
    fn partial_config_fills_in_rest() {
        let config: Config = toml::from_str(
            r#"
            [server]
            address = "0.0.0.0:9000"

            [rate]
            per_minute = 120
            "#,
        )
        .unwrap();
        assert_eq!(config.server.address, "0.0.0.0:9000");
        assert_eq!(config.rate.per_minute, 120);
        assert_eq!(config.rate.burst, 10);
        assert_eq!(config.cache.ttl_secs, 600);
    }

    #[test]
    fn secrets_parse() {
        let secrets: Secrets = toml::from_str(
            r#"
            [airlabs]
            api_key = "test-key"
            "#,
        )
        .unwrap();
        assert_eq!(secrets.airlabs_key(), Some("test-key"));
    }
}
