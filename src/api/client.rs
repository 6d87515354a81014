//! mocoVoice REST endpoints.
//!
//! Each method builds one [`ApiRequest`] and hands it to the gateway. The
//! API key header is sent on every call except the presigned upload and the
//! transcript download.

use super::gateway::{self, ApiCallError, ApiRequest, ApiResult};
use crate::config::ApiSettings;
use crate::transcription::{JobDetail, TranscriptionJob, UploadSession};
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;
use tracing::{error, instrument, warn};
use url::Url;
use uuid::Uuid;

const API_KEY_HEADER: &str = "X-API-KEY";
const UPLOAD_PATH: &str = "/api/v1/transcriptions/upload";
const TRANSCRIPTIONS_PATH: &str = "/api/v1/transcriptions";

/// Client for the mocoVoice API. Immutable once built.
///
/// A missing or malformed base URL does not prevent construction; every
/// remote call then fails with [`ApiCallError::Unexpected`].
#[derive(Clone)]
pub struct MocoVoiceApi {
    base_url: Option<Url>,
    api_key: String,
    timeout: Duration,
    transfer_timeout: Duration,
}

impl fmt::Debug for MocoVoiceApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MocoVoiceApi")
            .field("base_url", &self.base_url.as_ref().map(Url::as_str))
            .field("timeout", &self.timeout)
            .field("transfer_timeout", &self.transfer_timeout)
            .finish_non_exhaustive()
    }
}

impl MocoVoiceApi {
    /// Build from settings.
    pub fn new(settings: &ApiSettings) -> Self {
        let base_url = match settings.base_url() {
            Ok(url) => Some(url),
            Err(e) => {
                warn!(error = %e, "API base URL is not usable, remote calls will fail");
                None
            }
        };
        Self {
            base_url,
            api_key: settings.key.clone(),
            timeout: settings.timeout(),
            transfer_timeout: settings.transfer_timeout(),
        }
    }

    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let base_url = self.base_url.as_ref().ok_or_else(|| {
            error!(path, "No valid API base URL configured");
            ApiCallError::Unexpected
        })?;
        base_url.join(path).map_err(|e| {
            error!(path, error = %e, "Failed to build endpoint URL");
            ApiCallError::Unexpected
        })
    }

    fn authorized(&self, request: ApiRequest) -> ApiRequest {
        request
            .header(API_KEY_HEADER, self.api_key.as_str())
            .timeout(self.timeout)
    }

    /// Ask for an upload URL and a new job id.
    #[instrument(skip(self))]
    pub async fn request_upload(&self, filename: &str, language: &str) -> ApiResult<UploadSession> {
        let request = self
            .authorized(ApiRequest::post(self.endpoint(UPLOAD_PATH)?))
            .header("accept", "application/json")
            .header("Content-Type", "application/json")
            .json(json!({ "filename": filename, "language": language }));
        gateway::call_as(request).await
    }

    /// PUT the raw file content to the presigned upload URL.
    #[instrument(skip(self, session, content), fields(job = %session.transcription_id, bytes = content.len()))]
    pub async fn upload(
        &self,
        session: &UploadSession,
        content: Vec<u8>,
        content_type: &str,
    ) -> ApiResult<()> {
        let url = Url::parse(&session.upload_url).map_err(|e| {
            error!(error = %e, "Upload URL in response is not a URL");
            ApiCallError::Decode
        })?;
        let request = ApiRequest::put(url)
            .header("Content-Type", content_type)
            .bytes(content)
            .timeout(self.transfer_timeout);
        gateway::call(request).await.map(|_| ())
    }

    /// Start transcribing an uploaded job.
    #[instrument(skip(self))]
    pub async fn begin_transcription(&self, transcription_id: &str) -> ApiResult<()> {
        let path = format!("{}/{}/transcribe", TRANSCRIPTIONS_PATH, transcription_id);
        let request = self
            .authorized(ApiRequest::post(self.endpoint(&path)?))
            .header("accept", "application/json")
            .json(json!(""));
        gateway::call(request).await.map(|_| ())
    }

    /// Fetch the metadata of one job.
    #[instrument(skip(self))]
    pub async fn fetch_job(&self, transcription_id: &Uuid) -> ApiResult<JobDetail> {
        let path = format!("{}/{}", TRANSCRIPTIONS_PATH, transcription_id.hyphenated());
        let request = self.authorized(ApiRequest::get(self.endpoint(&path)?));
        gateway::call_as(request).await
    }

    /// Fetch one page of the job list.
    #[instrument(skip(self))]
    pub async fn list_jobs(&self, page: u32) -> ApiResult<Vec<TranscriptionJob>> {
        let mut url = self.endpoint(TRANSCRIPTIONS_PATH)?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        let request = self.authorized(ApiRequest::get(url));
        gateway::call_as(request).await
    }

    /// Download a finished transcript. No API key is sent.
    #[instrument(skip(self, result_url))]
    pub async fn fetch_result(&self, result_url: &str) -> ApiResult<Value> {
        let url = Url::parse(result_url).map_err(|e| {
            error!(error = %e, "Result URL is not a URL");
            ApiCallError::Decode
        })?;
        gateway::call(ApiRequest::get(url).timeout(self.transfer_timeout)).await
    }
}
