//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum setup, middleware, dispatch)
//!     → route table (ordered first-match scan)
//!     → matched view handler (apps, admin, or proxy.rs)
//!     → response to client
//! ```

pub mod proxy;
pub mod server;

pub use server::HttpServer;
