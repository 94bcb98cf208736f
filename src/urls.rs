//! URL configuration: the ordered route table for the whole site.
//!
//! Routes are matched in declaration order and the first match wins. The
//! hot-update proxy rule, when active, is appended after the static routes so
//! it is always tried last.

use std::sync::Arc;

use crate::admin::AdminSite;
use crate::apps::{app_one, app_two};
use crate::config::AppConfig;
use crate::http::proxy;
use crate::routing::matcher::PathPattern;
use crate::routing::table::{RouteError, RouteTable};

/// Build the route table for the given configuration.
pub fn url_patterns(config: &AppConfig) -> Result<RouteTable, RouteError> {
    let mut routes = RouteTable::builder()
        .route(
            PathPattern::prefix("/admin/"),
            Arc::new(AdminSite::new(&config.admin)),
            "admin",
        )?
        .view(PathPattern::exact("/"), app_one::index, "root_one_index")?
        .view(PathPattern::exact("/appone/"), app_one::index, "one_index")?
        .view(PathPattern::exact("/apptwo/"), app_two::index, "two_index")?;

    // Hot updates pushed by the frontend dev server don't exist on disk, so
    // development configurations forward them upstream.
    if config.debug {
        match proxy::dev_proxy(config) {
            Some(view) => {
                routes = routes.route(
                    PathPattern::contains(".hot-update."),
                    view,
                    "hotreload_proxy",
                )?;
            }
            None => tracing::debug!("hot-update proxying unavailable, dev server rule skipped"),
        }
    }

    Ok(routes.build())
}
