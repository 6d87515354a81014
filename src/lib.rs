//! mocovoice-mcp - mocoVoice speech transcription as MCP tools
//!
//! A thin adapter that lets an AI assistant (or a person at a shell) send
//! local audio/video files to the mocoVoice transcription API and read back
//! the results.
//!
//! # Overview
//!
//! - List the files under a single allowed directory that the API accepts
//! - Upload one of them and start a transcription job
//! - Page through past jobs, with timestamps shown in Japan time
//! - Fetch the transcript of a finished job
//!
//! # Architecture
//!
//! - `config` - Settings from a TOML file and the environment
//! - `files` - Path confinement, format table and file validation
//! - `api` - HTTP gateway and the mocoVoice REST endpoints
//! - `transcription` - Job records and their display projection
//! - `workflow` - The three orchestrated flows behind every tool
//! - `mcp` - JSON-RPC 2.0 server over stdio
//! - `cli` - The `mocovoice` command line
//!
//! # Example
//!
//! ```rust,no_run
//! use mocovoice_mcp::config::Settings;
//! use mocovoice_mcp::workflow::TranscriptionWorkflow;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let workflow = TranscriptionWorkflow::new(&settings);
//!
//!     let started = workflow.start("/workspace/meeting.m4a", "ja").await?;
//!     println!("Started job {}", started.transcription_id);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod files;
pub mod mcp;
pub mod messages;
pub mod transcription;
pub mod workflow;

pub use error::{MocoVoiceError, Result};
