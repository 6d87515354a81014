//! MCP server implementation.

use super::protocol::*;
use super::tools::{self, get_tools};
use crate::config::Settings;
use crate::messages;
use crate::workflow::{JobResult, TranscriptionWorkflow, WorkflowError};
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::io::{self, BufRead, Write};
use tracing::{debug, error, info, warn};

const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];
const SERVER_NAME: &str = "mocovoice";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for mocoVoice.
pub struct McpServer {
    workflow: TranscriptionWorkflow,
    default_language: String,
}

impl McpServer {
    /// Create a new MCP server.
    pub fn new(settings: &Settings) -> Self {
        Self {
            workflow: TranscriptionWorkflow::new(settings),
            default_language: settings.general.default_language.clone(),
        }
    }

    /// Run the MCP server (reads from stdin, writes to stdout).
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        info!(root = %self.workflow.allowed_root().display(), "mocoVoice MCP server starting");
        self.serve(stdin.lock(), stdout.lock()).await
    }

    /// Serve newline-delimited JSON-RPC until `input` is exhausted.
    pub async fn serve<R: BufRead, W: Write>(&self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                writeln!(output, "{}", serde_json::to_string(&response)?)?;
                output.flush()?;
            }
        }

        info!("Input closed, MCP server stopping");
        Ok(())
    }

    /// Handle one raw line. Notifications produce no response.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                warn!(error = %e, "Failed to parse request");
                return Some(JsonRpcResponse::error(Some(Value::Null), PARSE_ERROR, "Parse error"));
            }
        };

        if request.is_notification() {
            debug!(method = %request.method, "Notification received");
            return None;
        }

        Some(self.handle_request(request).await)
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        debug!(method = %request.method, "Request received");
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.id, request.params),
            "ping" => JsonRpcResponse::success(request.id, json!({})),
            "tools/list" => self.handle_tools_list(request.id),
            "tools/call" => self.handle_tools_call(request.id, request.params).await,
            _ => JsonRpcResponse::error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        }
    }

    /// Handle initialize request.
    fn handle_initialize(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        let protocol_version = params
            .protocol_version
            .filter(|v| SUPPORTED_PROTOCOL_VERSIONS.contains(&v.as_str()))
            .unwrap_or_else(|| SUPPORTED_PROTOCOL_VERSIONS[0].to_string());

        let result = InitializeResult {
            protocol_version,
            capabilities: ServerCapabilities {
                tools: ToolsCapability { list_changed: false },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        JsonRpcResponse::from_serializable(id, &result)
    }

    /// Handle tools/list request.
    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        JsonRpcResponse::from_serializable(id, &ToolsListResult { tools: get_tools() })
    }

    /// Handle tools/call request.
    async fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: ToolCallParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        &format!("Invalid params: {}", e),
                    )
                }
            },
            None => return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing params"),
        };

        let args = match params.arguments {
            Some(Value::Object(map)) => map,
            None | Some(Value::Null) => Map::new(),
            Some(_) => {
                return JsonRpcResponse::error(id, INVALID_PARAMS, "Arguments must be an object")
            }
        };

        let result = match params.name.as_str() {
            tools::SHOW_USAGE => ToolCallResult::text(self.workflow.usage().to_string()),
            tools::SHOW_AVAILABLE_FORMATS => ToolCallResult::text(self.workflow.formats()),
            tools::SHOW_AVAILABLE_FILES => pretty(&self.workflow.available_files()),
            tools::START_TRANSCRIPTION_JOB => {
                let Some(path) = args.get("path").and_then(Value::as_str) else {
                    return JsonRpcResponse::error(id, INVALID_PARAMS, "Missing 'path' argument");
                };
                self.tool_start(path, &args).await
            }
            tools::CHECK_TRANSCRIPTION_STATUSES => self.tool_statuses(&args).await,
            tools::SHOW_TRANSCRIPTION_RESULT => {
                let Some(transcription_id) = args.get("transcription_id").and_then(Value::as_str)
                else {
                    return JsonRpcResponse::error(
                        id,
                        INVALID_PARAMS,
                        "Missing 'transcription_id' argument",
                    );
                };
                self.tool_result(transcription_id).await
            }
            other => {
                return JsonRpcResponse::error(
                    id,
                    INVALID_PARAMS,
                    &format!("Unknown tool: {}", other),
                )
            }
        };

        JsonRpcResponse::from_serializable(id, &result)
    }

    async fn tool_start(&self, path: &str, args: &Map<String, Value>) -> ToolCallResult {
        let language = args
            .get("language")
            .and_then(Value::as_str)
            .filter(|l| !l.trim().is_empty())
            .unwrap_or(&self.default_language);

        match self.workflow.start(path, language).await {
            Ok(started) => pretty(&started),
            Err(e) => failure(&e),
        }
    }

    async fn tool_statuses(&self, args: &Map<String, Value>) -> ToolCallResult {
        let page = match parse_page(args.get("page")) {
            Some(page) => page,
            None => return failure(&WorkflowError::InvalidPage),
        };

        match self.workflow.list(page).await {
            Ok(jobs) => pretty(&jobs),
            Err(e) => failure(&e),
        }
    }

    async fn tool_result(&self, transcription_id: &str) -> ToolCallResult {
        match self.workflow.status(transcription_id).await {
            Ok(JobResult::Completed(payload)) => pretty(&payload),
            Ok(JobResult::Pending { .. }) => message_text(messages::NOT_COMPLETED),
            Err(e) => failure(&e),
        }
    }
}

/// Page argument: absent means 1; integers and numeric strings are accepted.
fn parse_page(value: Option<&Value>) -> Option<i64> {
    match value {
        None | Some(Value::Null) => Some(1),
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        Some(_) => None,
    }
}

fn pretty<T: Serialize + ?Sized>(value: &T) -> ToolCallResult {
    match serde_json::to_string_pretty(value) {
        Ok(text) => ToolCallResult::text(text),
        Err(e) => {
            error!(error = %e, "Failed to serialize tool result");
            ToolCallResult::error(json!({ "message": messages::UNEXPECTED_ERROR }).to_string())
        }
    }
}

fn message_text(message: &str) -> ToolCallResult {
    ToolCallResult::text(json!({ "message": message }).to_string())
}

fn failure(err: &WorkflowError) -> ToolCallResult {
    warn!(error = %err, "Tool call failed");
    ToolCallResult::error(json!({ "message": err.to_string() }).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(allowed_dir: &std::path::Path) -> McpServer {
        let mut settings = Settings::default();
        settings.api.url = "http://127.0.0.1:9".to_string();
        settings.files.allowed_dir = allowed_dir.to_string_lossy().into_owned();
        McpServer::new(&settings)
    }

    async fn call(server: &McpServer, line: &str) -> Value {
        let response = server.handle_line(line).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), Some(1));
        assert_eq!(parse_page(Some(&json!(3))), Some(3));
        assert_eq!(parse_page(Some(&json!("2"))), Some(2));
        assert_eq!(parse_page(Some(&json!(1.5))), None);
        assert_eq!(parse_page(Some(&json!("abc"))), None);
        assert_eq!(parse_page(Some(&json!([1]))), None);
    }

    #[tokio::test]
    async fn test_initialize_echoes_supported_version() {
        let tmp = tempfile::tempdir().unwrap();
        let server = server(tmp.path());

        let v = call(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
        )
        .await;
        assert_eq!(v["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(v["result"]["serverInfo"]["name"], SERVER_NAME);

        let v = call(
            &server,
            r#"{"jsonrpc":"2.0","id":2,"method":"initialize","params":{"protocolVersion":"1999-01-01"}}"#,
        )
        .await;
        assert_eq!(v["result"]["protocolVersion"], SUPPORTED_PROTOCOL_VERSIONS[0]);
    }

    #[tokio::test]
    async fn test_null_id_gets_response() {
        let tmp = tempfile::tempdir().unwrap();
        let server = server(tmp.path());
        let v = call(&server, r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).await;
        assert_eq!(v.get("id"), Some(&Value::Null));
        assert_eq!(v["result"], json!({}));

        let missing = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"ping"}"#)
            .await;
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_invalid_page_is_tool_error() {
        let tmp = tempfile::tempdir().unwrap();
        let server = server(tmp.path());
        let v = call(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"CHECK_TRANSCRIPTION_STATUSES","arguments":{"page":0}}}"#,
        )
        .await;
        assert_eq!(v["result"]["isError"], true);
        let text: Value =
            serde_json::from_str(v["result"]["content"][0]["text"].as_str().unwrap()).unwrap();
        assert_eq!(text["message"], messages::INVALID_PAGE);
    }

    #[tokio::test]
    async fn test_missing_path_is_invalid_params() {
        let tmp = tempfile::tempdir().unwrap();
        let server = server(tmp.path());
        let v = call(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"START_TRANSCRIPTION_JOB","arguments":{}}}"#,
        )
        .await;
        assert_eq!(v["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_invalid_params() {
        let tmp = tempfile::tempdir().unwrap();
        let server = server(tmp.path());
        let v = call(
            &server,
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"nope"}}"#,
        )
        .await;
        assert_eq!(v["error"]["code"], INVALID_PARAMS);
    }
}
