use axum::response::Html;
use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

pub async fn status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn overview() -> Html<&'static str> {
    Html(
        "<!DOCTYPE html>\
         <html><head><title>Site administration</title></head>\
         <body><h1>Site administration</h1>\
         <p><a href=\"/admin/status\">status</a></p>\
         </body></html>",
    )
}
