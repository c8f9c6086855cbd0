//! Configuration loader for cardhub.
//!
//! Reads `config.toml` (by default from `{config_dir}/cardhub/`) and
//! deserializes it into [`ServerConfig`]. Falls back to sensible defaults
//! when the file is missing or malformed. Access keys come from the
//! environment only.

use std::path::{Path, PathBuf};

use cardhub_types::config::{AccessKeys, ServerConfig};

/// Environment variable holding the member key.
pub const MEMBER_KEY_VAR: &str = "MEMBER_KEY";

/// Environment variable holding the admin key.
pub const ADMIN_KEY_VAR: &str = "ADMIN_KEY";

/// Default location of `config.toml`.
///
/// `CARDHUB_CONFIG` wins when set; otherwise the platform config directory
/// is used, falling back to the working directory.
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var("CARDHUB_CONFIG") {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .map(|dir| dir.join("cardhub"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

/// Load server configuration from `config_path`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_server_config(config_path: &Path) -> ServerConfig {
    let content = match tokio::fs::read_to_string(config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ServerConfig::default()
        }
    }
}

/// Read the access keys from the process environment.
pub fn access_keys_from_env() -> AccessKeys {
    access_keys_from(|name| std::env::var(name).ok())
}

/// Read the access keys through `lookup` (an environment stand-in).
pub fn access_keys_from(lookup: impl Fn(&str) -> Option<String>) -> AccessKeys {
    let keys = AccessKeys::new(lookup(MEMBER_KEY_VAR), lookup(ADMIN_KEY_VAR));
    tracing::debug!(
        member_key_required = keys.member_key_required(),
        admin_key_set = keys.admin_key.is_some(),
        "access keys loaded"
    );
    keys
}
