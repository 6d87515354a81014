//! Transcription job records and their display projection.

mod format;
mod models;

pub use format::{
    display_offset, format_created_at, format_jobs, parse_timestamp, JobProjection,
    DISPLAY_FORMAT,
};
pub use models::{JobDetail, JobStatus, TranscriptionJob, UploadSession, COMPLETED};
