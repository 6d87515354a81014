//! Jobs command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::workflow::TranscriptionWorkflow;
use anyhow::Result;

/// List one page of transcription jobs.
pub async fn run_jobs(page: i64, settings: Settings) -> Result<()> {
    preflight::check(Operation::Remote, &settings)?;
    let workflow = TranscriptionWorkflow::new(&settings);

    let jobs = match workflow.list(page).await {
        Ok(jobs) => jobs,
        Err(e) => {
            Output::error(&e.to_string());
            return Err(e.into());
        }
    };

    if jobs.is_empty() {
        Output::info(&format!("No transcription jobs on page {}.", page));
        return Ok(());
    }

    Output::header(&format!("Transcription jobs (page {})", page));
    for job in &jobs {
        Output::job(job);
    }

    Ok(())
}
