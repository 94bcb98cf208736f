//! Administrative subtree, mounted at `/admin/` as a single prefix route.

pub mod handlers;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;

use crate::config::AdminConfig;
use crate::routing::table::{HandlerFuture, RouteHandler};

/// Handler for the whole admin subtree.
///
/// Dispatches within the mounted prefix; unknown admin paths are 404 without
/// falling through to the rest of the table.
pub struct AdminSite {
    api_key: Option<String>,
}

impl AdminSite {
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
        }
    }

    fn authorized(&self, request: &Request<Body>) -> bool {
        let Some(key) = &self.api_key else {
            return true;
        };
        request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(|value| value == format!("Bearer {key}"))
            .unwrap_or(false)
    }
}

impl RouteHandler for AdminSite {
    fn call(&self, request: Request<Body>) -> HandlerFuture {
        let authorized = self.authorized(&request);
        Box::pin(async move {
            if !authorized {
                return StatusCode::UNAUTHORIZED.into_response();
            }
            match request.uri().path() {
                "/admin/" => handlers::overview().await.into_response(),
                "/admin/status" => handlers::status().await.into_response(),
                _ => StatusCode::NOT_FOUND.into_response(),
            }
        })
    }
}
