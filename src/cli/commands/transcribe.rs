//! Transcribe command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::workflow::TranscriptionWorkflow;
use anyhow::Result;

/// Upload a file and start a transcription job.
pub async fn run_transcribe(path: &str, language: Option<String>, settings: Settings) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Remote, &settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'mocovoice doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let language = language.unwrap_or_else(|| settings.general.default_language.clone());
    let workflow = TranscriptionWorkflow::new(&settings);

    let spinner = Output::spinner(&format!("Uploading {}...", path));
    let result = workflow.start(path, &language).await;
    spinner.finish_and_clear();

    match result {
        Ok(started) => {
            Output::success(&started.message);
            Output::kv("書き起こしID", &started.transcription_id);
            Output::info(&format!(
                "Check the result later with: mocovoice result {}",
                started.transcription_id
            ));
            Ok(())
        }
        Err(e) => {
            Output::error(&e.to_string());
            Err(e.into())
        }
    }
}
