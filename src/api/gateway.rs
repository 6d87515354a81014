//! The single chokepoint for outbound HTTP calls.
//!
//! A call is described by an [`ApiRequest`] value and executed by [`call`] on
//! a client created for that call alone. Every failure is folded into
//! [`ApiCallError`]; no request is retried.

use crate::messages;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, instrument, warn};
use url::Url;

/// Timeout applied when a request does not set one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A failed remote call. `Display` yields the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiCallError {
    #[error("{}", messages::REQUEST_TIMEOUT)]
    Timeout,

    #[error("[{code}] {message}")]
    Status { code: u16, message: &'static str },

    #[error("{}", messages::NETWORK_ERROR)]
    Transport,

    #[error("{}", messages::DECODE_FAILED)]
    Decode,

    #[error("{}", messages::UNEXPECTED_ERROR)]
    Unexpected,
}

impl ApiCallError {
    /// Error for a non-2xx status, with the mapped message.
    pub fn from_status(code: u16) -> Self {
        Self::Status {
            code,
            message: messages::for_status(code),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The message without the status prefix.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Timeout => messages::REQUEST_TIMEOUT,
            Self::Status { message, .. } => *message,
            Self::Transport => messages::NETWORK_ERROR,
            Self::Decode => messages::DECODE_FAILED,
            Self::Unexpected => messages::UNEXPECTED_ERROR,
        }
    }

    fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if e.is_decode() {
            Self::Decode
        } else if e.is_builder() || e.is_redirect() {
            Self::Unexpected
        } else {
            Self::Transport
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiCallError>;

/// Request payload.
#[derive(Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Bytes(Vec<u8>),
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Empty"),
            Self::Json(v) => write!(f, "Json({})", v),
            Self::Bytes(b) => write!(f, "Bytes({} bytes)", b.len()),
        }
    }
}

/// Description of one HTTP call.
#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
    pub timeout: Duration,
}

// Header values carry the API key, so only names are shown.
impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.headers.iter().map(|(name, _)| name.as_str()).collect();
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("url", &self.url.as_str())
            .field("headers", &names)
            .field("body", &self.body)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    pub fn post(url: Url) -> Self {
        Self::new(Method::POST, url)
    }

    pub fn put(url: Url) -> Self {
        Self::new(Method::PUT, url)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn bytes(mut self, body: Vec<u8>) -> Self {
        self.body = RequestBody::Bytes(body);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn header_map(&self) -> ApiResult<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                error!(header = %name, error = %e, "Invalid header name");
                ApiCallError::Unexpected
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                error!(header = %name, error = %e, "Invalid header value");
                ApiCallError::Unexpected
            })?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

/// Execute `request` once.
///
/// Returns the parsed body when the response is `application/json`, and an
/// empty object for any other content type.
#[instrument(
    skip(request),
    fields(
        method = %request.method,
        host = request.url.host_str().unwrap_or_default(),
        path = request.url.path(),
    )
)]
pub async fn call(request: ApiRequest) -> ApiResult<Value> {
    let headers = request.header_map()?;

    let client = reqwest::Client::builder()
        .timeout(request.timeout)
        .build()
        .map_err(|e| {
            error!(error = %e, "Failed to create HTTP client");
            ApiCallError::Unexpected
        })?;

    let builder = client
        .request(request.method, request.url)
        .headers(headers);
    let builder = match request.body {
        RequestBody::Empty => builder,
        RequestBody::Json(value) => builder.json(&value),
        RequestBody::Bytes(bytes) => builder.body(bytes),
    };

    let response = builder.send().await.map_err(|e| {
        warn!(error = %e, "Request failed");
        ApiCallError::from_reqwest(&e)
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "Remote returned error status");
        return Err(ApiCallError::from_status(status.as_u16()));
    }

    let is_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        == Some("application/json");
    if !is_json {
        debug!(status = status.as_u16(), "Non-JSON response, returning empty body");
        return Ok(Value::Object(Map::new()));
    }

    let body = response.bytes().await.map_err(|e| {
        warn!(error = %e, "Failed to read response body");
        ApiCallError::from_reqwest(&e)
    })?;

    serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "Malformed JSON body");
        ApiCallError::Decode
    })
}

/// Execute `request` and decode the body into `T`.
///
/// A missing or mistyped field is reported as [`ApiCallError::Decode`].
pub async fn call_as<T: DeserializeOwned>(request: ApiRequest) -> ApiResult<T> {
    let value = call(request).await?;
    serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "Response did not match the expected shape");
        ApiCallError::Decode
    })
}
