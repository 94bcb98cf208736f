//! The route table: ordered (pattern, handler, name) entries.
//!
//! # Responsibilities
//! - Hold the compiled routes in declaration order
//! - Look up the first matching entry for a request path
//! - Reverse-map a route name back to its registered path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan; the table is a handful of entries
//! - Duplicate names are a build error, not a silent shadow

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use thiserror::Error;

use crate::routing::matcher::PathPattern;

/// Boxed future returned by route handlers.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A plain view function. The table holds these as non-owning references.
pub type HandlerFn = fn(Request<Body>) -> HandlerFuture;

/// An asynchronous request handler referenced by a route entry.
pub trait RouteHandler: Send + Sync {
    fn call(&self, request: Request<Body>) -> HandlerFuture;
}

impl RouteHandler for HandlerFn {
    fn call(&self, request: Request<Body>) -> HandlerFuture {
        self(request)
    }
}

/// Error type for route table construction.
#[derive(Debug, Error)]
pub enum RouteError {
    /// Two routes were registered under the same symbolic name.
    #[error("duplicate route name {0:?}")]
    DuplicateName(String),
}

/// One (pattern, handler, name) triple.
pub struct RouteEntry {
    pattern: PathPattern,
    handler: Arc<dyn RouteHandler>,
    name: String,
}

impl RouteEntry {
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the entry's handler.
    pub fn call(&self, request: Request<Body>) -> HandlerFuture {
        self.handler.call(request)
    }
}

/// The compiled, immutable route table.
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    /// Find the first entry whose pattern matches the given path.
    pub fn match_path(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|entry| entry.pattern.matches(path))
    }

    /// Reverse URL lookup: the registered path for a named route.
    ///
    /// Routes without a fixed path (substring patterns) return `None`.
    pub fn reverse(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .and_then(|entry| entry.pattern.fixed_path())
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder enforcing the table invariants at construction time.
#[derive(Default)]
pub struct RouteTableBuilder {
    entries: Vec<RouteEntry>,
    names: HashSet<String>,
}

impl RouteTableBuilder {
    /// Append a route. Entries match in the order they are added.
    pub fn route(
        mut self,
        pattern: PathPattern,
        handler: Arc<dyn RouteHandler>,
        name: &str,
    ) -> Result<Self, RouteError> {
        if !self.names.insert(name.to_string()) {
            return Err(RouteError::DuplicateName(name.to_string()));
        }
        self.entries.push(RouteEntry {
            pattern,
            handler,
            name: name.to_string(),
        });
        Ok(self)
    }

    /// Append a route backed by a plain view function.
    pub fn view(
        self,
        pattern: PathPattern,
        handler: HandlerFn,
        name: &str,
    ) -> Result<Self, RouteError> {
        self.route(pattern, Arc::new(handler), name)
    }

    pub fn build(self) -> RouteTable {
        RouteTable {
            entries: self.entries,
        }
    }
}
