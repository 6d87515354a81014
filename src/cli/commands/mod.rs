//! CLI command implementations.

mod config;
mod doctor;
mod files;
mod jobs;
mod mcp;
mod result;
mod transcribe;
mod usage;

pub use config::run_config;
pub use doctor::run_doctor;
pub use files::run_files;
pub use jobs::run_jobs;
pub use mcp::run_mcp;
pub use result::run_result;
pub use transcribe::run_transcribe;
pub use usage::{run_formats, run_usage};
