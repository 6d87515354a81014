//! Data models for remote transcription jobs.
//!
//! These mirror the mocoVoice wire format. Every read re-fetches them from the
//! service; nothing is cached locally.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status string the service reports once a transcript is ready.
pub const COMPLETED: &str = "COMPLETED";

/// Job status as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    /// Terminal state; the result URL is available.
    Completed,
    /// Any other state (queued, processing, failed, ...), kept verbatim.
    Other(String),
}

impl JobStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, JobStatus::Completed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Completed => COMPLETED,
            JobStatus::Other(s) => s,
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        if s == COMPLETED {
            JobStatus::Completed
        } else {
            JobStatus::Other(s)
        }
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response to an upload request: where to PUT the bytes, and the new job.
///
/// Valid for exactly one upload.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSession {
    #[serde(rename = "audio_upload_url")]
    pub upload_url: String,
    pub transcription_id: String,
}

/// Metadata of a single job.
#[derive(Debug, Clone, Deserialize)]
pub struct JobDetail {
    pub status: JobStatus,
    /// Where the finished transcript can be downloaded.
    #[serde(default)]
    pub transcription_path: Option<String>,
}

/// One entry of the job list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptionJob {
    pub transcription_id: String,
    #[serde(default)]
    pub transcription_path: Option<String>,
    pub status: JobStatus,
    /// ISO-8601, with or without an offset.
    pub created_at: String,
    #[serde(default)]
    pub num_speakers: Option<u32>,
    /// Display name of the uploaded media.
    #[serde(default)]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_parsing() {
        let done: JobStatus = serde_json::from_value(json!("COMPLETED")).unwrap();
        assert!(done.is_completed());

        let running: JobStatus = serde_json::from_value(json!("TRANSCRIBING")).unwrap();
        assert!(!running.is_completed());
        assert_eq!(running.to_string(), "TRANSCRIBING");

        // Matching is exact.
        let lower: JobStatus = serde_json::from_value(json!("completed")).unwrap();
        assert!(!lower.is_completed());
    }

    #[test]
    fn test_job_list_entry_optional_fields() {
        let job: TranscriptionJob = serde_json::from_value(json!({
            "transcription_id": "abc123",
            "status": "IN_PROGRESS",
            "created_at": "2024-01-01T12:00:00",
        }))
        .unwrap();
        assert_eq!(job.transcription_path, None);
        assert_eq!(job.num_speakers, None);
        assert_eq!(job.name, None);
    }

    #[test]
    fn test_missing_required_field_is_error() {
        let result: Result<UploadSession, _> =
            serde_json::from_value(json!({ "transcription_id": "x" }));
        assert!(result.is_err());
    }
}
