use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::test_utils::test_server;

#[tokio::test]
async fn test_health_endpoints() {
    let server = test_server();

    for path in ["/health", "/api/health"] {
        let response = server.get(path).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }
}

#[tokio::test]
async fn test_version_endpoint() {
    let response = test_server().get("/version").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
