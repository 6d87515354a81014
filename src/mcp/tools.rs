//! MCP tool definitions for mocoVoice.

use super::protocol::Tool;
use serde_json::json;

pub const SHOW_USAGE: &str = "SHOW_USAGE";
pub const SHOW_AVAILABLE_FORMATS: &str = "SHOW_AVAILABLE_FORMATS";
pub const SHOW_AVAILABLE_FILES: &str = "SHOW_AVAILABLE_FILES";
pub const START_TRANSCRIPTION_JOB: &str = "START_TRANSCRIPTION_JOB";
pub const CHECK_TRANSCRIPTION_STATUSES: &str = "CHECK_TRANSCRIPTION_STATUSES";
pub const SHOW_TRANSCRIPTION_RESULT: &str = "SHOW_TRANSCRIPTION_RESULT";

fn no_arguments() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {},
        "required": []
    })
}

/// Get all available tools.
pub fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: SHOW_USAGE.to_string(),
            description: "mocoVoice MCP server の機能説明をする".to_string(),
            input_schema: no_arguments(),
        },
        Tool {
            name: SHOW_AVAILABLE_FORMATS.to_string(),
            description: "mocoVoice MCP server が対応している音声・動画ファイル形式を返却する"
                .to_string(),
            input_schema: no_arguments(),
        },
        Tool {
            name: SHOW_AVAILABLE_FILES.to_string(),
            description: "mocoVoice MCP server が利用できる音声・動画ファイル一覧を返却します。\
                mocoVoice API が現在認識できるファイル形式のみが返却されます。\
                利用できる音声・動画ファイル一覧は指定されたディレクトリ（フォルダー）配下のみです"
                .to_string(),
            input_schema: no_arguments(),
        },
        Tool {
            name: START_TRANSCRIPTION_JOB.to_string(),
            description: "指定されたファイルで書き起こしジョブを起動します。\
                成功すると書き起こしIDが返却されます"
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "書き起こしを行うファイルの絶対パス"
                    },
                    "language": {
                        "type": "string",
                        "description": "ファイルの言語設定です。デフォルトは `ja` (日本語)",
                        "default": "ja"
                    }
                },
                "required": ["path"]
            }),
        },
        Tool {
            name: CHECK_TRANSCRIPTION_STATUSES.to_string(),
            description: "書き起こしの状態一覧を取得します".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "page": {
                        "type": "integer",
                        "description": "書き起こし一覧のページングです。デフォルトは一番最新のページになります",
                        "default": 1,
                        "minimum": 1
                    }
                },
                "required": []
            }),
        },
        Tool {
            name: SHOW_TRANSCRIPTION_RESULT.to_string(),
            description: "書き起こしを取得して表示します".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "transcription_id": {
                        "type": "string",
                        "description": "書き起こしID (UUID)"
                    }
                },
                "required": ["transcription_id"]
            }),
        },
    ]
}
