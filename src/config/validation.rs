//! Configuration validation.
//!
//! Semantic checks on top of what serde already guarantees syntactically.
//! Validation is a pure function and returns all errors, not just the first,
//! so an operator can fix a config file in one pass.

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("devserver.upstream_url is required when debug is enabled")]
    MissingUpstreamUrl,

    #[error("devserver.upstream_url {0:?} is not a valid URL")]
    InvalidUpstreamUrl(String),

    #[error("devserver.max_buffered_response_size must be non-zero")]
    ZeroBufferSize,
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    // The upstream is only consulted in debug mode; a production config may
    // leave it at whatever value without consequence.
    if config.debug {
        if config.devserver.upstream_url.is_empty() {
            errors.push(ValidationError::MissingUpstreamUrl);
        } else if Url::parse(&config.devserver.upstream_url).is_err() {
            errors.push(ValidationError::InvalidUpstreamUrl(
                config.devserver.upstream_url.clone(),
            ));
        }
    }

    if config.devserver.max_buffered_response_size == 0 {
        errors.push(ValidationError::ZeroBufferSize);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
