//! End-to-end routing tests against a served instance.

use site_router::config::AppConfig;

mod common;

#[tokio::test]
async fn root_and_appone_resolve_to_the_same_handler() {
    let (addr, shutdown) = common::start_server(AppConfig::default()).await;
    let client = common::client();

    let root = client
        .get(format!("http://{addr}/"))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(root.status(), 200);
    let root_body = root.text().await.unwrap();
    assert!(root_body.contains("App One Index Page"));

    let appone = client
        .get(format!("http://{addr}/appone/"))
        .send()
        .await
        .unwrap();
    assert_eq!(appone.status(), 200);
    assert_eq!(appone.text().await.unwrap(), root_body);

    shutdown.trigger();
}

#[tokio::test]
async fn apptwo_resolves_to_its_own_handler() {
    let (addr, shutdown) = common::start_server(AppConfig::default()).await;
    let client = common::client();

    let apptwo = client
        .get(format!("http://{addr}/apptwo/"))
        .send()
        .await
        .unwrap();
    assert_eq!(apptwo.status(), 200);
    let body = apptwo.text().await.unwrap();
    assert!(body.contains("App Two Index Page"));
    assert!(!body.contains("App One"));

    shutdown.trigger();
}

#[tokio::test]
async fn unregistered_paths_are_not_found() {
    let (addr, shutdown) = common::start_server(AppConfig::default()).await;
    let client = common::client();

    for path in ["/appone", "/nothing/", "/apptwo/extra"] {
        let res = client
            .get(format!("http://{addr}{path}"))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 404, "expected 404 for {path}");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn admin_subtree_is_mounted() {
    let (addr, shutdown) = common::start_server(AppConfig::default()).await;
    let client = common::client();

    let status = client
        .get(format!("http://{addr}/admin/status"))
        .send()
        .await
        .unwrap();
    assert_eq!(status.status(), 200);
    let body: serde_json::Value = status.json().await.unwrap();
    assert_eq!(body["status"], "operational");

    let overview = client
        .get(format!("http://{addr}/admin/"))
        .send()
        .await
        .unwrap();
    assert_eq!(overview.status(), 200);

    // Unknown admin paths don't fall through to the rest of the table.
    let missing = client
        .get(format!("http://{addr}/admin/missing"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn admin_requires_bearer_token_when_configured() {
    let mut config = AppConfig::default();
    config.admin.api_key = Some("sekrit".to_string());
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::client();

    let denied = client
        .get(format!("http://{addr}/admin/status"))
        .send()
        .await
        .unwrap();
    assert_eq!(denied.status(), 401);

    let allowed = client
        .get(format!("http://{addr}/admin/status"))
        .header("Authorization", "Bearer sekrit")
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), 200);

    shutdown.trigger();
}

#[tokio::test]
async fn hot_update_requests_fall_through_without_debug() {
    let (addr, shutdown) = common::start_server(AppConfig::default()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/static/app.abcd123.hot-update.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[cfg(feature = "dev-proxy")]
#[tokio::test]
async fn hot_update_requests_are_proxied_in_debug() {
    let upstream = common::start_mock_upstream("{\"h\":\"abcd123\"}").await;

    let mut config = AppConfig::default();
    config.debug = true;
    config.devserver.upstream_url = format!("http://{upstream}");
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::client();

    let res = client
        .get(format!("http://{addr}/static/app.abcd123.hot-update.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "{\"h\":\"abcd123\"}");

    // Static routes still resolve locally, ahead of the proxy rule.
    let root = client.get(format!("http://{addr}/")).send().await.unwrap();
    assert_eq!(root.status(), 200);
    assert!(root.text().await.unwrap().contains("App One"));

    shutdown.trigger();
}
