//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or absent) file still yields a
//! working development configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the site router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Development mode flag. When set, the hot-update proxy rule is appended
    /// to the route table.
    pub debug: bool,

    /// Frontend dev server settings, consulted only when `debug` is set.
    pub devserver: DevServerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Admin subtree settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Frontend dev server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DevServerConfig {
    /// Upstream URL of the dev server serving hot-update assets.
    pub upstream_url: String,

    /// Upstream responses at or below this size are buffered and returned
    /// whole; larger ones are streamed through. Dev server bundles break when
    /// split into chunks, so the default is generous (256 MiB).
    pub max_buffered_response_size: usize,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            upstream_url: "http://127.0.0.1:8081".to_string(),
            max_buffered_response_size: 256 * 1024 * 1024,
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Upstream connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Admin subtree configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AdminConfig {
    /// Bearer token required for admin requests. When unset, the subtree is
    /// open (development posture).
    pub api_key: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). Overridden by `RUST_LOG`.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8000");
        assert!(!config.debug);
        assert_eq!(config.devserver.upstream_url, "http://127.0.0.1:8081");
        assert_eq!(config.devserver.max_buffered_response_size, 256 * 1024 * 1024);
        assert_eq!(config.admin.api_key, None);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let config: AppConfig = toml::from_str(
            r#"
            debug = true

            [devserver]
            upstream_url = "http://127.0.0.1:9000"
            "#,
        )
        .unwrap();
        assert!(config.debug);
        assert_eq!(config.devserver.upstream_url, "http://127.0.0.1:9000");
        assert_eq!(config.devserver.max_buffered_response_size, 256 * 1024 * 1024);
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
