//! mocoVoice CLI entry point.

use anyhow::Result;
use clap::Parser;
use mocovoice_mcp::cli::{commands, Cli, Commands};
use mocovoice_mcp::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging. stdout belongs to the MCP transport, so logs go to stderr.
    let log_level = match cli.verbose {
        0 => settings.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| {
            format!("mocovoice_mcp={0},mocovoice={0}", log_level)
        })))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    // Execute command
    match &cli.command {
        Commands::Mcp => {
            commands::run_mcp(settings).await?;
        }

        Commands::Usage => commands::run_usage(),

        Commands::Formats => commands::run_formats(),

        Commands::Files => {
            commands::run_files(&settings)?;
        }

        Commands::Transcribe { path, language } => {
            commands::run_transcribe(path, language.clone(), settings).await?;
        }

        Commands::Jobs { page } => {
            commands::run_jobs(*page, settings).await?;
        }

        Commands::Result {
            transcription_id,
            output,
        } => {
            commands::run_result(transcription_id, output.clone(), settings).await?;
        }

        Commands::Doctor => {
            commands::run_doctor(&settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, &settings)?;
        }
    }

    Ok(())
}
