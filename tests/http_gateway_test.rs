//! The HTTP gateway against a live mock backend.

use std::sync::Arc;

use packdeck::adapters::{HttpGateway, ReqwestHttpClient};
use packdeck::api::BackendApi;
use packdeck::error::CommandError;
use packdeck::models::InstanceStatus;
use packdeck::traits::CommandGateway;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> BackendApi {
    let gateway = HttpGateway::new(ReqwestHttpClient::new(), server.uri());
    BackendApi::new(Arc::new(gateway))
}

#[tokio::test]
async fn test_list_instances_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoke/list_instances"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Survival", "status": "running", "loader": "fabric", "minecraft_version": "1.21"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let instances = api_for(&server).list_instances().await.unwrap();
    assert_eq!(instances.len(), 1);
    assert_eq!(instances[0].id, "1");
    assert_eq!(instances[0].status, InstanceStatus::Running);
}

#[tokio::test]
async fn test_arguments_sent_as_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoke/toggle_resource"))
        .and(body_json(json!({"id": 42, "enabled": false})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server).toggle_resource(42, false).await.unwrap();
}

#[tokio::test]
async fn test_backend_error_details_surface() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoke/start_instance"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"message": "Io error", "details": "java not found"})),
        )
        .mount(&server)
        .await;

    let err = api_for(&server).start_instance("7").await.unwrap_err();
    assert_eq!(
        err,
        CommandError::Backend {
            command: "start_instance".to_string(),
            message: "java not found".to_string(),
        }
    );
}

#[tokio::test]
async fn test_plain_text_error_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoke/remove_resource"))
        .respond_with(ResponseTemplate::new(404).set_body_string("resource 9 not found"))
        .mount(&server)
        .await;

    let err = api_for(&server).remove_resource(9).await.unwrap_err();
    assert_eq!(err.to_string(), "resource 9 not found");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let gateway = HttpGateway::new(ReqwestHttpClient::new(), uri);
    let err = gateway.invoke("list_instances", json!({})).await.unwrap_err();
    assert!(matches!(err, CommandError::Transport { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_update_setting_keeps_other_keys() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoke/get_settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"java_path": "/opt/java"})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/invoke/save_settings"))
        .and(body_json(json!({"settings": {"java_path": "/opt/java", "max_memory_mb": 8192}})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    api_for(&server)
        .update_setting("max_memory_mb", json!(8192))
        .await
        .unwrap();
}
