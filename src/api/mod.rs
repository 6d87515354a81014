//! Remote API access.
//!
//! All outbound HTTP goes through [`gateway::call`].

mod client;
pub mod gateway;

pub use client::MocoVoiceApi;
pub use gateway::{ApiCallError, ApiRequest, ApiResult, RequestBody};
