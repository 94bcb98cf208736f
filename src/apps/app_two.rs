//! Second sub-application: serves its built frontend index page.

use axum::body::Body;
use axum::http::Request;
use axum::response::{Html, IntoResponse};

use crate::routing::table::HandlerFuture;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
  <head>
    <meta charset="utf-8">
    <title>App Two Index Page</title>
  </head>
  <body>
    <div id="app-two"></div>
    <script src="/static/js/chunk-vendors.js"></script>
    <script src="/static/js/app_two.js"></script>
  </body>
</html>
"#;

/// Index view, registered at `/apptwo/`.
pub fn index(_request: Request<Body>) -> HandlerFuture {
    Box::pin(async { Html(INDEX_HTML).into_response() })
}
