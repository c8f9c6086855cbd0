//! Server configuration types for cardhub.
//!
//! `ServerConfig` is the `config.toml` file. `AccessKeys` holds the secrets
//! read from the environment once at startup; they never live in the file.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the cardhub server.
///
/// Loaded from `config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// SQLite URL. When absent, storage stays uninitialized and listing fails
    /// with a configuration error.
    #[serde(default)]
    pub database_url: Option<String>,

    /// Read the companion kinds (story books, knowledge bases, event books,
    /// prompt injections) alongside character cards.
    #[serde(default = "default_prefetch")]
    pub prefetch_companion_kinds: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_prefetch() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            prefetch_companion_kinds: default_prefetch(),
        }
    }
}

/// Access secrets for the server.
#[derive(Debug, Default)]
pub struct AccessKeys {
    /// When set to a non-blank value, unkeyed listing is refused.
    pub member_key: Option<SecretString>,
    /// Administrative key. Carried for completeness, not consulted by listing.
    pub admin_key: Option<SecretString>,
}

impl AccessKeys {
    pub fn new(member_key: Option<String>, admin_key: Option<String>) -> Self {
        Self {
            member_key: member_key.map(SecretString::from),
            admin_key: admin_key.map(SecretString::from),
        }
    }

    /// True when a member key is set and is not blank after trimming.
    pub fn member_key_required(&self) -> bool {
        self.member_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }
}
