//! CLI output formatting utilities.

use crate::transcription::JobProjection;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Output helper for CLI formatting.
pub struct Output;

impl Output {
    /// Print an info message.
    pub fn info(msg: &str) {
        println!("{} {}", style(">>").cyan().bold(), msg);
    }

    /// Print a success message.
    pub fn success(msg: &str) {
        println!("{} {}", style(">>").green().bold(), msg);
    }

    /// Print a warning message.
    pub fn warning(msg: &str) {
        eprintln!("{} {}", style(">>").yellow().bold(), msg);
    }

    /// Print an error message.
    pub fn error(msg: &str) {
        eprintln!("{} {}", style(">>").red().bold(), msg);
    }

    /// Print a header.
    pub fn header(msg: &str) {
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print a key-value pair.
    pub fn kv(key: &str, value: &str) {
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(msg: &str) {
        println!("  {} {}", style("*").cyan(), msg);
    }

    /// Print one transcription job.
    pub fn job(job: &JobProjection) {
        println!(
            "\n{} {} {}",
            style("*").cyan(),
            style(&job.transcription_id).bold(),
            status_style(&job.status)
        );
        Self::kv("作成日", &job.created_at);
        if let Some(name) = &job.name {
            Self::kv("音声データの名前", name);
        }
        if let Some(speakers) = job.num_speakers {
            Self::kv("話者数", &speakers.to_string());
        }
    }

    /// Create a spinner.
    pub fn spinner(msg: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }
}

fn status_style(status: &str) -> console::StyledObject<&str> {
    match status {
        crate::transcription::COMPLETED => style(status).green(),
        "FAILED" | "ERROR" => style(status).red(),
        _ => style(status).yellow(),
    }
}
