//! Transcription workflows.
//!
//! Coordinates the local checks and the remote calls behind every tool:
//!
//! - start: guard -> validate -> request upload -> PUT bytes -> begin transcription
//! - status: parse id -> fetch job -> (if completed) fetch transcript
//! - list: check page -> fetch page -> format
//!
//! Steps run strictly one after another. A failure after the upload leaves the
//! job uploaded but not started on the remote side; nothing is rolled back.

use crate::api::{ApiCallError, MocoVoiceApi};
use crate::config::Settings;
use crate::files::{self, guard, FileRejection};
use crate::messages;
use crate::transcription::{format_jobs, JobProjection, JobStatus};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Failure of a workflow. `Display` yields the user-facing message.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{}", messages::OUTSIDE_ALLOWED_DIR)]
    OutsideAllowedRoot,

    #[error(transparent)]
    InvalidFile(#[from] FileRejection),

    #[error("{}", messages::UNSUPPORTED_EXTENSION)]
    UnsupportedExtension,

    #[error("{}", messages::INVALID_TRANSCRIPTION_ID)]
    InvalidTranscriptionId,

    #[error("{}", messages::INVALID_PAGE)]
    InvalidPage,

    #[error("{}", messages::FILE_READ_FAILED)]
    FileRead(#[source] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiCallError),
}

/// A job that was uploaded and started.
#[derive(Debug, Clone, Serialize)]
pub struct StartedJob {
    pub message: String,
    pub transcription_id: String,
}

/// Outcome of a status lookup.
#[derive(Debug, Clone)]
pub enum JobResult {
    /// Still running; this is the normal state for the first minutes.
    Pending { status: JobStatus },
    /// The transcript payload, as returned by the service.
    Completed(Value),
}

/// Entry point for every operation exposed to the tool host.
#[derive(Debug, Clone)]
pub struct TranscriptionWorkflow {
    api: MocoVoiceApi,
    allowed_root: PathBuf,
}

impl TranscriptionWorkflow {
    /// Build from settings once at startup.
    pub fn new(settings: &Settings) -> Self {
        let api = MocoVoiceApi::new(&settings.api);
        let expanded = settings.allowed_dir();
        let allowed_root = match expanded.canonicalize() {
            Ok(root) => root,
            Err(e) => {
                warn!(dir = %expanded.display(), error = %e, "Allowed directory is not accessible");
                expanded
            }
        };
        Self { api, allowed_root }
    }

    pub fn allowed_root(&self) -> &Path {
        &self.allowed_root
    }

    fn roots(&self) -> [PathBuf; 1] {
        [self.allowed_root.clone()]
    }

    /// Upload a local file and start transcribing it.
    #[instrument(skip(self))]
    pub async fn start(&self, path: &str, language: &str) -> Result<StartedJob, WorkflowError> {
        let requested = Settings::expand_path(path);
        let file_path = guard::resolve(&requested).map_err(|e| {
            warn!(path, error = %e, "Could not resolve requested path");
            WorkflowError::OutsideAllowedRoot
        })?;
        if !files::is_allowed(&file_path, &self.roots()) {
            return Err(WorkflowError::OutsideAllowedRoot);
        }

        let media = files::validate(&file_path)?;
        let content_type = files::formats::content_type_for(&media.path)
            .ok_or(WorkflowError::UnsupportedExtension)?;

        let session = self
            .api
            .request_upload(&media.file_name(), language)
            .await?;
        debug!(job = %session.transcription_id, "Upload session created");

        let content = tokio::fs::read(&media.path)
            .await
            .map_err(WorkflowError::FileRead)?;
        self.api.upload(&session, content, content_type).await?;
        debug!(job = %session.transcription_id, bytes = media.size, "Upload finished");

        self.api
            .begin_transcription(&session.transcription_id)
            .await?;
        info!(job = %session.transcription_id, file = %media.path.display(), "Transcription started");

        Ok(StartedJob {
            message: messages::STARTED.to_string(),
            transcription_id: session.transcription_id,
        })
    }

    /// Look up a job and, once it is complete, fetch its transcript.
    #[instrument(skip(self))]
    pub async fn status(&self, transcription_id: &str) -> Result<JobResult, WorkflowError> {
        let id = Uuid::parse_str(transcription_id.trim())
            .map_err(|_| WorkflowError::InvalidTranscriptionId)?;

        let job = self.api.fetch_job(&id).await?;
        if !job.status.is_completed() {
            debug!(status = %job.status, "Job not completed yet");
            return Ok(JobResult::Pending { status: job.status });
        }

        let result_url = job.transcription_path.ok_or_else(|| {
            warn!("Completed job has no result URL");
            WorkflowError::Api(ApiCallError::Decode)
        })?;
        let payload = self.api.fetch_result(&result_url).await?;
        Ok(JobResult::Completed(payload))
    }

    /// Fetch one page of past jobs, formatted for display.
    #[instrument(skip(self))]
    pub async fn list(&self, page: i64) -> Result<Vec<JobProjection>, WorkflowError> {
        let page = u32::try_from(page)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(WorkflowError::InvalidPage)?;

        let jobs = self.api.list_jobs(page).await?;
        debug!(count = jobs.len(), page, "Fetched job page");
        Ok(format_jobs(&jobs))
    }

    /// Uploadable files under the allowed root, grouped by directory.
    pub fn available_files(&self) -> BTreeMap<String, Vec<String>> {
        files::list_media_files(&self.allowed_root)
    }

    pub fn usage(&self) -> &'static str {
        messages::USAGE
    }

    pub fn formats(&self) -> String {
        messages::formats_description()
    }
}
