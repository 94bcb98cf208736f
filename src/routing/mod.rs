//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route declaration (urls.rs):
//!     (pattern, handler, name) triples
//!     → table.rs builder (name uniqueness check)
//!     → frozen RouteTable, shared via Arc
//!
//! Incoming request:
//!     → table scan in declaration order
//!     → first matching entry's handler, or explicit no-match
//! ```
//!
//! # Design Decisions
//! - Table compiled at startup, immutable at runtime
//! - First match wins; declaration order is the contract, no priorities
//! - Duplicate names abort startup rather than shadow silently

pub mod matcher;
pub mod table;

pub use matcher::PathPattern;
pub use table::{HandlerFn, HandlerFuture, RouteEntry, RouteError, RouteHandler, RouteTable};
