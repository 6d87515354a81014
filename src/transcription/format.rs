//! Display projection of the job list.
//!
//! Timestamps are shown in Japan Standard Time (UTC+9). Timestamps without an
//! offset are taken to be JST already, not UTC.

use super::TranscriptionJob;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use serde::Serialize;
use tracing::warn;

/// Offset of the display timezone, in seconds east of UTC.
pub const DISPLAY_OFFSET_SECS: i32 = 9 * 3600;

/// Rendering of [`JobProjection::created_at`].
pub const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// One job as shown to the user. Field order is the display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobProjection {
    #[serde(rename = "書き起こしID")]
    pub transcription_id: String,
    #[serde(rename = "書き起こしデータの取得URL")]
    pub result_url: Option<String>,
    #[serde(rename = "ステータス")]
    pub status: String,
    #[serde(rename = "話者数")]
    pub num_speakers: Option<u32>,
    #[serde(rename = "作成日")]
    pub created_at: String,
    #[serde(rename = "音声データの名前")]
    pub name: Option<String>,
}

impl From<&TranscriptionJob> for JobProjection {
    fn from(job: &TranscriptionJob) -> Self {
        Self {
            transcription_id: job.transcription_id.clone(),
            result_url: job.transcription_path.clone(),
            status: job.status.to_string(),
            num_speakers: job.num_speakers,
            created_at: format_created_at(&job.created_at),
            name: job.name.clone(),
        }
    }
}

/// Project every job for display, keeping order.
pub fn format_jobs(jobs: &[TranscriptionJob]) -> Vec<JobProjection> {
    jobs.iter().map(JobProjection::from).collect()
}

/// The display timezone.
pub fn display_offset() -> FixedOffset {
    FixedOffset::east_opt(DISPLAY_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parse an ISO-8601 timestamp into the display timezone.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let tz = display_offset();
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&tz));
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&tz));
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return tz.from_local_datetime(&naive).single();
        }
    }
    let naive = parse_reduced(raw)?;
    tz.from_local_datetime(&naive).single()
}

/// Date-only (`2024-01-01`) and hour-only (`2024-01-01T12`) forms.
fn parse_reduced(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    let (date, hour) = raw.split_once(|c| c == 'T' || c == ' ')?;
    if hour.len() != 2 || !hour.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    date.and_hms_opt(hour.parse().ok()?, 0, 0)
}

/// Render a creation timestamp, or return it unchanged if it cannot be parsed.
pub fn format_created_at(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => {
            warn!(created_at = raw, "Unrecognized timestamp, shown as-is");
            raw.to_string()
        }
    }
}
