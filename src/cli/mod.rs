//! CLI module for mocoVoice.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// mocoVoice - speech transcription from the command line and as an MCP server
///
/// Uploads local audio/video files to the mocoVoice API, starts transcription
/// jobs and retrieves their results.
#[derive(Parser, Debug)]
#[command(name = "mocovoice")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start MCP server for AI assistant integration (Claude, etc.)
    Mcp,

    /// Show what this tool can do
    Usage,

    /// List supported audio/video formats
    Formats,

    /// List uploadable files under the allowed directory
    Files,

    /// Upload a file and start a transcription job
    Transcribe {
        /// Absolute path of the audio/video file
        path: String,

        /// Language of the recording (defaults to general.default_language)
        #[arg(short, long)]
        language: Option<String>,
    },

    /// List transcription jobs
    Jobs {
        /// Page number, 1 is the most recent
        #[arg(short, long, default_value = "1")]
        page: i64,
    },

    /// Show the result of a transcription job
    Result {
        /// Transcription ID (UUID)
        transcription_id: String,

        /// Write the transcript to a file instead of stdout
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Check configuration and API reachability
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration (API key masked)
    Show,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcribe() {
        let cli = Cli::parse_from(["mocovoice", "transcribe", "/workspace/a.wav", "-l", "en"]);
        match cli.command {
            Commands::Transcribe { path, language } => {
                assert_eq!(path, "/workspace/a.wav");
                assert_eq!(language.as_deref(), Some("en"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_jobs_page_defaults_to_one() {
        let cli = Cli::parse_from(["mocovoice", "-vv", "jobs"]);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Jobs { page: 1 }));
    }

    #[test]
    fn test_clap_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
