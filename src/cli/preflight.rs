//! Pre-flight checks before remote operations.
//!
//! Catches missing configuration before a request is sent, so the user sees
//! a configuration hint instead of an HTTP 401.

use crate::config::{Settings, ENV_API_KEY};
use crate::error::{MocoVoiceError, Result};

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Anything that talks to the mocoVoice API.
    Remote,
    /// Listing files and formats needs nothing remote.
    Local,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Remote => {
            check_api_key(settings)?;
            settings.api.base_url()?;
        }
        Operation::Local => {}
    }
    Ok(())
}

fn check_api_key(settings: &Settings) -> Result<()> {
    if settings.api.has_key() {
        Ok(())
    } else {
        Err(MocoVoiceError::Config(format!(
            "API key not set. Set it with: export {}='...' or api.key in the config file",
            ENV_API_KEY
        )))
    }
}
