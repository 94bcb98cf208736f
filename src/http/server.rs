//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Compile the route table from the URL configuration
//! - Wire up middleware (request ID, tracing, timeout)
//! - Dispatch every request through the ordered table, first match wins
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::routing::table::{RouteError, RouteTable};
use crate::urls;

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
}

/// HTTP server for the site.
pub struct HttpServer {
    router: Router,
    routes: Arc<RouteTable>,
}

impl HttpServer {
    /// Compile the route table and build the server.
    ///
    /// Fails on a malformed URL configuration (duplicate route names), which
    /// aborts startup.
    pub fn new(config: &AppConfig) -> Result<Self, RouteError> {
        let routes = Arc::new(urls::url_patterns(config)?);
        let state = AppState {
            routes: routes.clone(),
        };
        let router = Self::build_router(config, state);
        Ok(Self { router, routes })
    }

    /// Build the axum router: a catch-all into the dispatch handler, wrapped
    /// in the middleware stack.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch))
            .route("/", any(dispatch))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        config.timeouts.request_secs,
                    )))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The compiled route table, also used for reverse URL lookup.
    pub fn routes(&self) -> &Arc<RouteTable> {
        &self.routes
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.routes.len(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Scan the route table in declaration order and hand the request to the
/// first matching entry.
async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path().to_string();

    match state.routes.match_path(&path) {
        Some(entry) => {
            tracing::debug!(peer = %peer, path = %path, route = entry.name(), "Dispatching request");
            entry.call(request).await
        }
        None => {
            tracing::debug!(peer = %peer, path = %path, "No route matched");
            (StatusCode::NOT_FOUND, "No matching route found").into_response()
        }
    }
}
