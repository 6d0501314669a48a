use duckling_api::{
    ApiError, ConsoleApi, HttpConsoleApi, QueryResult, SaveConnectionRequest,
};
use mockito::{Matcher, Server};
use serde_json::json;
use url::Url;

fn api_for(server: &Server) -> HttpConsoleApi {
    HttpConsoleApi::new(Url::parse(&server.url()).unwrap())
}

#[tokio::test]
async fn test_status_is_decoded() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/status")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "is_connected": true,
                "connected_db_name": "main",
                "connected_db_path": "main.db",
                "connected_db_read_only": false,
                "active_config_name": "main",
                "active_config_details": {
                    "name": "main", "path": "main.db", "read_only": false
                }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let status = api_for(&server).status().await.unwrap();
    assert!(status.is_connected);
    assert_eq!(status.connected_db_name.as_deref(), Some("main"));
    assert_eq!(status.connectable_config(), Some("main"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_set_active_posts_name() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/connections/set-active")
        .match_body(Matcher::Json(json!({"name": "analytics"})))
        .with_status(200)
        .with_body(json!({"message": "ok"}).to_string())
        .create_async()
        .await;

    api_for(&server).set_active("analytics").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_set_active_ignores_empty_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/connections/set-active")
        .with_status(204)
        .create_async()
        .await;

    api_for(&server).set_active("analytics").await.unwrap();
}

#[tokio::test]
async fn test_error_body_becomes_server_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/connections/set-active")
        .with_status(404)
        .with_body(
            json!({"error": "Connection 'x' not found in configurations."})
                .to_string(),
        )
        .create_async()
        .await;

    let err = api_for(&server).set_active("x").await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 404, .. }));
    assert_eq!(
        err.server_message(),
        Some("Connection 'x' not found in configurations.")
    );
}

#[tokio::test]
async fn test_error_without_json_body() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/connect")
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let err = api_for(&server).connect().await.unwrap_err();
    assert_eq!(err.server_message(), None);
    assert_eq!(err.to_string(), "HTTP error! status: 502");
}

#[tokio::test]
async fn test_query_sends_text_and_decodes_table() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/query")
        .match_body(Matcher::Json(json!({"query": "SELECT 1 AS a"})))
        .with_status(200)
        .with_body(
            json!({
                "data_type": "table",
                "columns": ["a"],
                "data": [{"a": 1}],
                "rows_affected": 1
            })
            .to_string(),
        )
        .create_async()
        .await;

    let result = api_for(&server).run_query("SELECT 1 AS a").await.unwrap();
    assert!(matches!(
        result,
        QueryResult::Table {
            rows_affected: Some(1),
            ..
        }
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_save_with_confirmation_flag() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/connections/save")
        .match_body(Matcher::Json(json!({
            "name": "x",
            "path": "/tmp/x.db",
            "read_only": false,
            "original_name": null,
            "confirm_create": true
        })))
        .with_status(200)
        .with_body(json!({"message": "Connection 'x' added."}).to_string())
        .create_async()
        .await;

    let request = SaveConnectionRequest {
        name: "x".to_string(),
        path: "/tmp/x.db".to_string(),
        read_only: false,
        original_name: None,
        confirm_create: None,
    };
    let response = api_for(&server)
        .save_connection(&request.confirmed())
        .await
        .unwrap();
    assert!(!response.requires_confirmation);
    assert_eq!(response.message.as_deref(), Some("Connection 'x' added."));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/connections")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = api_for(&server).connections().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Port 9 (discard) is never served in the test environment
    let api = HttpConsoleApi::new(Url::parse("http://127.0.0.1:9").unwrap());
    let err = api.status().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert!(!err.is_server());
}

#[tokio::test]
async fn test_disconnect_posts_to_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/disconnect")
        .with_status(200)
        .with_body(json!({"message": "Disconnected from main."}).to_string())
        .create_async()
        .await;

    let reply = api_for(&server).disconnect().await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Disconnected from main."));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_posts_name() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/connections/delete")
        .match_body(Matcher::Json(json!({"name": "old"})))
        .with_status(200)
        .with_body(json!({"message": "Configuration 'old' deleted."}).to_string())
        .create_async()
        .await;

    let reply = api_for(&server).delete_connection("old").await.unwrap();
    assert_eq!(reply.message.as_deref(), Some("Configuration 'old' deleted."));
    mock.assert_async().await;
}
