//! Site URL routing service.
//!
//! Maps URL paths to view handlers in two sub-applications, mounts the
//! administrative subtree, and (in development configurations) forwards
//! webpack hot-update asset requests to the frontend dev server.

pub mod admin;
pub mod apps;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod routing;
pub mod urls;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
