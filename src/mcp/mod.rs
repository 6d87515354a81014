//! MCP (Model Context Protocol) server for mocoVoice.
//!
//! Exposes the transcription workflows as tools to an AI assistant.
//! Implements JSON-RPC 2.0 over stdio.

pub mod protocol;
mod server;
pub mod tools;

pub use server::McpServer;
