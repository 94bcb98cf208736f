//! Reverse proxy for frontend dev server hot-update assets.
//!
//! Only compiled with the `dev-proxy` feature (on by default). Production
//! builds that compile it out still construct the same route table, minus the
//! proxy rule: [`dev_proxy`] returns `None` and the caller skips the route.
//!
//! The dev server cannot tolerate its bundle responses being re-chunked, so
//! upstream responses at or below `max_buffered_response_size` are collected
//! and returned whole; anything larger is streamed through.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::routing::table::RouteHandler;

#[cfg(feature = "dev-proxy")]
use {
    axum::{
        body::Body,
        http::{header, uri::PathAndQuery, Request, StatusCode, Uri},
        response::{IntoResponse, Response},
    },
    hyper_util::{
        client::legacy::{connect::HttpConnector, Client},
        rt::TokioExecutor,
    },
    std::str::FromStr,
    std::time::Duration,
    thiserror::Error,
    url::Url,
};

#[cfg(feature = "dev-proxy")]
use crate::config::DevServerConfig;
#[cfg(feature = "dev-proxy")]
use crate::routing::table::HandlerFuture;

/// Construct the hot-update proxy handler, if the capability is available.
///
/// `None` means the rule is skipped: the proxy is a developer convenience,
/// never a startup failure.
#[cfg(feature = "dev-proxy")]
pub fn dev_proxy(config: &AppConfig) -> Option<Arc<dyn RouteHandler>> {
    let connect_timeout = Duration::from_secs(config.timeouts.connect_secs);
    match DevProxy::new(&config.devserver, connect_timeout) {
        Ok(view) => {
            tracing::info!(upstream = %view.upstream(), "hot-update proxying enabled");
            Some(Arc::new(view))
        }
        Err(err) => {
            tracing::warn!(error = %err, "dev server upstream unusable, hot-update proxying disabled");
            None
        }
    }
}

/// Stub for builds without the `dev-proxy` capability.
#[cfg(not(feature = "dev-proxy"))]
pub fn dev_proxy(_config: &AppConfig) -> Option<Arc<dyn RouteHandler>> {
    None
}

/// Error type for proxy construction.
#[cfg(feature = "dev-proxy")]
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("invalid upstream URL {url:?}: {reason}")]
    InvalidUpstream { url: String, reason: String },
}

/// Forwards matched requests to the frontend dev server.
#[cfg(feature = "dev-proxy")]
pub struct DevProxy {
    client: Client<HttpConnector, Body>,
    authority: axum::http::uri::Authority,
    max_buffered: usize,
}

#[cfg(feature = "dev-proxy")]
impl DevProxy {
    pub fn new(config: &DevServerConfig, connect_timeout: Duration) -> Result<Self, ProxyError> {
        let invalid = |reason: String| ProxyError::InvalidUpstream {
            url: config.upstream_url.clone(),
            reason,
        };

        let upstream =
            Url::parse(&config.upstream_url).map_err(|err| invalid(err.to_string()))?;
        if upstream.scheme() != "http" {
            return Err(invalid(format!(
                "unsupported scheme {:?}, only http upstreams are supported",
                upstream.scheme()
            )));
        }
        let host = upstream
            .host_str()
            .ok_or_else(|| invalid("missing host".to_string()))?;
        let authority = match upstream.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        let authority = axum::http::uri::Authority::from_str(&authority)
            .map_err(|err| invalid(err.to_string()))?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(connect_timeout));
        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            authority,
            max_buffered: config.max_buffered_response_size,
        })
    }

    /// The upstream this proxy forwards to, for logging.
    pub fn upstream(&self) -> String {
        format!("http://{}", self.authority)
    }
}

#[cfg(feature = "dev-proxy")]
impl RouteHandler for DevProxy {
    fn call(&self, request: Request<Body>) -> HandlerFuture {
        let client = self.client.clone();
        let authority = self.authority.clone();
        let max_buffered = self.max_buffered;

        Box::pin(async move {
            let (mut parts, body) = request.into_parts();

            // Rewrite scheme and authority, keep path and query.
            let mut uri_parts = std::mem::take(&mut parts.uri).into_parts();
            uri_parts.scheme = Some(axum::http::uri::Scheme::HTTP);
            uri_parts.authority = Some(authority);
            if uri_parts.path_and_query.is_none() {
                uri_parts.path_and_query = Some(PathAndQuery::from_static("/"));
            }
            parts.uri = match Uri::from_parts(uri_parts) {
                Ok(uri) => uri,
                Err(err) => {
                    tracing::error!(error = %err, "failed to build upstream URI");
                    return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
                }
            };

            // The Host header must name the upstream, not this server.
            parts.headers.remove(header::HOST);

            let path = parts.uri.path().to_string();
            tracing::debug!(path = %path, "Forwarding hot-update request");

            match client.request(Request::from_parts(parts, body)).await {
                Ok(response) => relay(response, max_buffered).await,
                Err(err) => {
                    tracing::error!(path = %path, error = %err, "Dev server request failed");
                    (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
                }
            }
        })
    }
}

/// Relay an upstream response, buffering it whole when it fits the threshold.
#[cfg(feature = "dev-proxy")]
async fn relay(response: hyper::Response<hyper::body::Incoming>, max_buffered: usize) -> Response {
    let content_length = response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok());

    if !buffer_whole(content_length, max_buffered) {
        return response.map(Body::new);
    }

    let (mut parts, body) = response.into_parts();
    match axum::body::to_bytes(Body::new(body), max_buffered).await {
        Ok(bytes) => {
            // Re-framed as a single body; the old framing headers no longer apply.
            parts.headers.remove(header::TRANSFER_ENCODING);
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to buffer dev server response");
            (StatusCode::BAD_GATEWAY, "Upstream response unreadable").into_response()
        }
    }
}

/// Whether a response of the given declared size should be buffered whole.
/// Undeclared sizes (chunked dev server responses) are buffered, since those
/// are exactly the ones re-chunking would break.
#[cfg(feature = "dev-proxy")]
fn buffer_whole(content_length: Option<u64>, max_buffered: usize) -> bool {
    match content_length {
        Some(length) => length <= max_buffered as u64,
        None => true,
    }
}

#[cfg(all(test, feature = "dev-proxy"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_malformed_upstreams() {
        let mut config = DevServerConfig::default();
        config.upstream_url = "not a url".to_string();
        assert!(DevProxy::new(&config, Duration::from_secs(1)).is_err());

        config.upstream_url = "https://127.0.0.1:8081".to_string();
        assert!(DevProxy::new(&config, Duration::from_secs(1)).is_err());
    }

    #[tokio::test]
    async fn accepts_the_default_upstream() {
        let config = DevServerConfig::default();
        let proxy = DevProxy::new(&config, Duration::from_secs(1)).unwrap();
        assert_eq!(proxy.upstream(), "http://127.0.0.1:8081");
    }

    #[test]
    fn buffering_decision() {
        assert!(buffer_whole(None, 1024));
        assert!(buffer_whole(Some(1024), 1024));
        assert!(!buffer_whole(Some(1025), 1024));
    }
}
