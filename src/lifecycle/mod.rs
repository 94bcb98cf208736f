//! Lifecycle management subsystem.
//!
//! Startup is linear: config, route table, listener, serve. Shutdown is a
//! broadcast signal observed by the serve loop, which stops accepting and
//! drains in-flight requests.

pub mod shutdown;

pub use shutdown::Shutdown;
