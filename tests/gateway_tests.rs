//! HTTP gateway behaviour against a live local server.

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use mocovoice_mcp::api::gateway::{call, call_as, ApiCallError, ApiRequest};
use mocovoice_mcp::messages;
use serde::Deserialize;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

async fn start_server(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn responding(status: u16, content_type: &'static str, body: &'static str) -> Router {
    Router::new().route(
        "/",
        get(move || async move {
            let status = StatusCode::from_u16(status).unwrap();
            (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
        }),
    )
}

fn get_request(base_url: &str) -> ApiRequest {
    ApiRequest::get(Url::parse(base_url).unwrap())
}

#[tokio::test]
async fn given_rate_limited_response_when_calling_then_status_has_specific_message() {
    let (base_url, shutdown_tx) =
        start_server(responding(429, "application/json", r#"{"detail":"slow down"}"#)).await;

    let err = call(get_request(&base_url)).await.unwrap_err();

    assert_eq!(err, ApiCallError::from_status(429));
    assert_eq!(err.message(), messages::for_status(429));
    assert!(err.to_string().starts_with("[429] "));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unmapped_status_when_calling_then_generic_message_is_used() {
    let (base_url, shutdown_tx) = start_server(responding(418, "text/plain", "teapot")).await;

    let err = call(get_request(&base_url)).await.unwrap_err();

    assert_eq!(err.status_code(), Some(418));
    assert_eq!(err.message(), messages::REQUEST_FAILED);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_json_response_when_calling_then_body_is_parsed() {
    let (base_url, shutdown_tx) =
        start_server(responding(200, "application/json", r#"{"status":"COMPLETED"}"#)).await;

    let value = call(get_request(&base_url)).await.unwrap();

    assert_eq!(value["status"], "COMPLETED");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_non_json_content_type_when_calling_then_empty_object_is_returned() {
    let (base_url, shutdown_tx) = start_server(responding(200, "text/plain", "OK")).await;

    let value = call(get_request(&base_url)).await.unwrap();

    assert_eq!(value, serde_json::json!({}));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_json_with_charset_parameter_when_calling_then_body_is_not_parsed() {
    let (base_url, shutdown_tx) = start_server(responding(
        200,
        "application/json; charset=utf-8",
        r#"{"status":"COMPLETED"}"#,
    ))
    .await;

    let value = call(get_request(&base_url)).await.unwrap();

    assert_eq!(value, serde_json::json!({}));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_malformed_json_when_calling_then_decode_error() {
    let (base_url, shutdown_tx) =
        start_server(responding(200, "application/json", "{not json")).await;

    let err = call(get_request(&base_url)).await.unwrap_err();

    assert_eq!(err, ApiCallError::Decode);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_wrong_shape_when_decoding_typed_then_decode_error() {
    #[derive(Debug, Deserialize)]
    struct Expected {
        #[allow(dead_code)]
        transcription_id: String,
    }

    let (base_url, shutdown_tx) =
        start_server(responding(200, "application/json", r#"{"other":1}"#)).await;

    let err = call_as::<Expected>(get_request(&base_url)).await.unwrap_err();

    assert_eq!(err, ApiCallError::Decode);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_slow_server_when_calling_then_timeout() {
    let app = Router::new().route(
        "/",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }),
    );
    let (base_url, shutdown_tx) = start_server(app).await;

    let request = get_request(&base_url).timeout(Duration::from_millis(200));
    let err = call(request).await.unwrap_err();

    assert_eq!(err, ApiCallError::Timeout);
    assert_eq!(err.to_string(), messages::REQUEST_TIMEOUT);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_closed_port_when_calling_then_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = call(get_request(&format!("http://{}", addr)))
        .await
        .unwrap_err();

    assert_eq!(err, ApiCallError::Transport);
    assert_eq!(err.to_string(), messages::NETWORK_ERROR);
}
