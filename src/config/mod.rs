//! Configuration module for mocovoice-mcp.
//!
//! Handles loading the immutable process-wide settings.

mod settings;

pub use settings::{
    ApiSettings, FileSettings, GeneralSettings, Settings, ENV_ALLOWED_DIR, ENV_API_KEY,
    ENV_API_URL, ENV_TIMEOUT_SECS, ENV_TRANSFER_TIMEOUT_SECS,
};
