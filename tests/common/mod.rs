//! In-process mock of the mocoVoice API.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use mocovoice_mcp::config::Settings;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

pub const JOB_ID: &str = "6f1c1f1e-8a0b-4d5e-9c3a-2b7f0e4d1a90";
pub const API_KEY: &str = "test-key";

/// Behaviour and recorded traffic of the mock.
#[derive(Default)]
pub struct MockApi {
    pub job_status: String,
    pub transcribe_status: u16,

    pub upload_requests: AtomicUsize,
    pub uploads: AtomicUsize,
    pub transcribes: AtomicUsize,
    pub job_fetches: AtomicUsize,
    pub list_calls: AtomicUsize,
    pub result_fetches: AtomicUsize,

    pub upload_request_body: Mutex<Option<Value>>,
    pub uploaded: Mutex<Option<(Vec<u8>, String)>>,
    pub upload_key: Mutex<Option<String>>,
    pub api_keys: Mutex<Vec<Option<String>>>,
    pub pages: Mutex<Vec<String>>,

    base_url: OnceLock<String>,
}

impl MockApi {
    pub fn new(job_status: &str) -> Self {
        Self {
            job_status: job_status.to_string(),
            transcribe_status: 200,
            ..Default::default()
        }
    }

    pub fn with_transcribe_status(mut self, status: u16) -> Self {
        self.transcribe_status = status;
        self
    }

    pub fn remote_calls(&self) -> usize {
        [
            &self.upload_requests,
            &self.uploads,
            &self.transcribes,
            &self.job_fetches,
            &self.list_calls,
            &self.result_fetches,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }

    fn base_url(&self) -> String {
        self.base_url.get().cloned().unwrap_or_default()
    }

    fn record_key(&self, headers: &HeaderMap) {
        self.api_keys.lock().unwrap().push(api_key(headers));
    }
}

/// A running mock server. Shuts down on drop.
pub struct MockServer {
    pub state: Arc<MockApi>,
    pub base_url: String,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockServer {
    /// Settings pointing at this server with `allowed_dir` as the root.
    pub fn settings(&self, allowed_dir: &std::path::Path) -> Settings {
        let mut settings = Settings::default();
        settings.api.key = API_KEY.to_string();
        settings.api.url = self.base_url.clone();
        settings.api.timeout_secs = 5;
        settings.api.transfer_timeout_secs = 5;
        settings.files.allowed_dir = allowed_dir.to_string_lossy().into_owned();
        settings
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}

pub async fn start_mock_api(mock: MockApi) -> MockServer {
    let state = Arc::new(mock);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new()
        .route("/api/v1/transcriptions/upload", post(request_upload))
        .route("/api/v1/transcriptions", get(list_jobs))
        .route("/api/v1/transcriptions/{id}", get(fetch_job))
        .route("/api/v1/transcriptions/{id}/transcribe", post(transcribe))
        .route("/presigned/{id}", put(receive_upload))
        .route("/results/{id}", get(fetch_result))
        .with_state(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);
    state.base_url.set(base_url.clone()).ok();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    MockServer {
        state,
        base_url,
        shutdown: Some(shutdown_tx),
    }
}

fn api_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn request_upload(
    State(s): State<Arc<MockApi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    s.upload_requests.fetch_add(1, Ordering::SeqCst);
    s.record_key(&headers);
    *s.upload_request_body.lock().unwrap() = Some(body);
    Json(json!({
        "audio_upload_url": format!("{}/presigned/{}", s.base_url(), JOB_ID),
        "transcription_id": JOB_ID,
    }))
    .into_response()
}

async fn receive_upload(
    State(s): State<Arc<MockApi>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    s.uploads.fetch_add(1, Ordering::SeqCst);
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    *s.upload_key.lock().unwrap() = api_key(&headers);
    *s.uploaded.lock().unwrap() = Some((body.to_vec(), content_type));
    StatusCode::OK
}

async fn transcribe(
    State(s): State<Arc<MockApi>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> StatusCode {
    s.transcribes.fetch_add(1, Ordering::SeqCst);
    s.record_key(&headers);
    StatusCode::from_u16(s.transcribe_status).unwrap()
}

async fn fetch_job(
    State(s): State<Arc<MockApi>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    s.job_fetches.fetch_add(1, Ordering::SeqCst);
    s.record_key(&headers);
    let transcription_path = if s.job_status == "COMPLETED" {
        json!(format!("{}/results/{}", s.base_url(), id))
    } else {
        Value::Null
    };
    Json(json!({
        "transcription_id": id,
        "status": s.job_status,
        "transcription_path": transcription_path,
    }))
    .into_response()
}

async fn list_jobs(
    State(s): State<Arc<MockApi>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    s.list_calls.fetch_add(1, Ordering::SeqCst);
    s.record_key(&headers);
    s.pages
        .lock()
        .unwrap()
        .push(query.get("page").cloned().unwrap_or_default());
    Json(json!([
        {
            "transcription_id": JOB_ID,
            "transcription_path": format!("{}/results/{}", s.base_url(), JOB_ID),
            "status": "COMPLETED",
            "created_at": "2025-01-15T01:30:00Z",
            "num_speakers": 2,
            "name": "meeting.m4a"
        },
        {
            "transcription_id": "0b9d7a52-3c41-4f0e-8f8b-1d2e3c4b5a69",
            "transcription_path": null,
            "status": "IN_PROGRESS",
            "created_at": "not a date",
            "num_speakers": null,
            "name": "interview.wav"
        }
    ]))
    .into_response()
}

async fn fetch_result(
    State(s): State<Arc<MockApi>>,
    Path(_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    s.result_fetches.fetch_add(1, Ordering::SeqCst);
    s.record_key(&headers);
    Json(json!({
        "segments": [
            { "speaker": "A", "text": "こんにちは" },
            { "speaker": "B", "text": "よろしくお願いします" }
        ]
    }))
    .into_response()
}
