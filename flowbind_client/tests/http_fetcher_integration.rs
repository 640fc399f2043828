use std::sync::Arc;
use std::time::Duration;

use flowbind_client::{
    make_binding, ClientError, FetcherOptions, HttpFetcher, InstanceState, Workflow,
};
use flowbind_core::TransportError;
use mockito::Matcher;
use serde_json::json;

fn http_binding(server: &mockito::ServerGuard) -> Arc<dyn Workflow> {
    make_binding(Arc::new(HttpFetcher::new(server.url()).unwrap()))
}

#[tokio::test]
async fn test_create_and_status_over_http() {
    let mut server = mockito::Server::new_async().await;

    let create = server
        .mock("POST", "/create")
        .match_header("content-type", "application/json")
        .match_header("x-version", "1")
        .match_body(Matcher::Json(json!({ "name": "job-1", "params": { "x": 1 } })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"result": {"instanceId": "abc", "instanceName": "job-1"}}"#)
        .expect(1)
        .create_async()
        .await;

    let status = server
        .mock("POST", "/status")
        .match_body(Matcher::Json(json!({ "id": "abc" })))
        .with_status(200)
        .with_body(r#"{"result": {"status": "queued"}}"#)
        .expect(1)
        .create_async()
        .await;

    let workflow = http_binding(&server);
    let instance = workflow.create("job-1", json!({ "x": 1 })).await.unwrap();
    assert_eq!(instance.id(), "abc");
    assert_eq!(instance.name(), "job-1");
    assert_eq!(instance.status().await.unwrap().status, InstanceState::Queued);

    create.assert_async().await;
    status.assert_async().await;
}

#[tokio::test]
async fn test_lifecycle_ops_post_instance_id() {
    let mut server = mockito::Server::new_async().await;

    let mut mocks = Vec::new();
    for path in ["/pause", "/resume", "/abort", "/restart"] {
        mocks.push(
            server
                .mock("POST", path)
                .match_header("x-version", "1")
                .match_body(Matcher::Json(json!({ "id": "abc" })))
                .with_status(200)
                .with_body(r#"{"result": null}"#)
                .expect(1)
                .create_async()
                .await,
        );
    }
    let _get = server
        .mock("POST", "/get")
        .match_body(Matcher::Json(json!({ "name": "job-1" })))
        .with_status(200)
        .with_body(r#"{"result": {"instanceId": "abc", "instanceName": "job-1"}}"#)
        .create_async()
        .await;

    let instance = http_binding(&server).get("job-1").await.unwrap();
    instance.pause().await.unwrap();
    instance.resume().await.unwrap();
    instance.abort().await.unwrap();
    instance.restart().await.unwrap();

    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_error_status_becomes_rejection() {
    let mut server = mockito::Server::new_async().await;
    let _get = server
        .mock("POST", "/get")
        .with_status(404)
        .with_body(r#"{"result": null, "error": {"code": 1, "message": "instance not found"}}"#)
        .create_async()
        .await;

    let err = http_binding(&server).get("missing").await.err().unwrap();
    match err {
        ClientError::Rejected {
            status,
            code,
            message,
            ..
        } => {
            assert_eq!(status, 404);
            assert_eq!(code, Some(1));
            assert_eq!(message.as_deref(), Some("instance not found"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_error_status_without_message() {
    let mut server = mockito::Server::new_async().await;
    let _create = server
        .mock("POST", "/create")
        .with_status(500)
        .with_body(r#"{"result": null}"#)
        .create_async()
        .await;

    let err = http_binding(&server)
        .create("job", json!({}))
        .await
        .err()
        .unwrap();
    assert!(err.is_rejection());
    assert_eq!(err.message(), None);
}

#[tokio::test]
async fn test_unreachable_engine_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let fetcher = HttpFetcher::with_options(FetcherOptions {
        endpoint: url,
        timeout: Some(Duration::from_secs(2)),
    })
    .unwrap();
    let err = make_binding(Arc::new(fetcher))
        .get("job")
        .await
        .err()
        .unwrap();
    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Request { .. } | TransportError::Timeout(_))
    ));
}
