//! Result command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::messages;
use crate::workflow::{JobResult, TranscriptionWorkflow};
use anyhow::Result;

/// Show or save the transcript of a finished job.
pub async fn run_result(
    transcription_id: &str,
    output: Option<String>,
    settings: Settings,
) -> Result<()> {
    preflight::check(Operation::Remote, &settings)?;
    let workflow = TranscriptionWorkflow::new(&settings);

    let payload = match workflow.status(transcription_id).await {
        Ok(JobResult::Completed(payload)) => payload,
        Ok(JobResult::Pending { status }) => {
            Output::warning(messages::NOT_COMPLETED);
            Output::kv("ステータス", status.as_str());
            return Ok(());
        }
        Err(e) => {
            Output::error(&e.to_string());
            return Err(e.into());
        }
    };

    let text = serde_json::to_string_pretty(&payload)?;
    match output {
        Some(path) => {
            let path = Settings::expand_path(&path);
            std::fs::write(&path, text)?;
            Output::success(&format!("Transcript written to {}", path.display()));
        }
        None => println!("{}", text),
    }

    Ok(())
}
