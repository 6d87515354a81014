//! User-facing messages.
//!
//! mocoVoice is a Japanese service and its users read Japanese, so every
//! message that reaches the tool host is defined here in one place.

use crate::files::MediaKind;

pub const OUTSIDE_ALLOWED_DIR: &str =
    "与えられたファイルは許可されているディレクトリ(フォルダー)外にあります。フォルダーの設定をご確認ください。";
pub const UNSUPPORTED_EXTENSION: &str =
    "与えられたファイルは対応しているファイル形式ではありません。ファイル形式をご確認ください。";
pub const INVALID_TRANSCRIPTION_ID: &str =
    "与えられた文字列は正しい書き起こしIDのフォーマットに従っていません";
pub const INVALID_PAGE: &str = "ページの指定は1以上の整数値で行う必要があります";
pub const NOT_COMPLETED: &str =
    "指定された書き起こしは完了していません。書き起こしには5~10分かかります。しばらく時間を置いてから再度お試しください";
pub const STARTED: &str = "成功しました";
pub const FILE_READ_FAILED: &str =
    "ファイルの読み込みに失敗しました。ファイル内容をご確認ください";

pub const FILE_NOT_FOUND: &str = "指定されたファイルは存在しません。ファイルパスをご確認ください";
pub const NOT_A_FILE: &str = "指定されたパスはファイルではありません。ファイルパスをご確認ください";
pub const FILE_TOO_LARGE: &str =
    "指定されたファイルはmocoVoiceが対応しているファイルサイズである3GBを超えています";
pub const FILE_EMPTY: &str = "指定されたファイルは空のファイルです。ファイル内容をご確認ください";
pub const FILE_METADATA_FAILED: &str =
    "ファイル情報の取得に失敗しました。ファイル内容をご確認ください";
pub const UNSUPPORTED_FORMAT: &str = "mocoVoiceではサポートされていないファイル形式です";

pub const REQUEST_TIMEOUT: &str =
    "リクエストがタイムアウトしました。しばらくしてから再度お試しください";
pub const REQUEST_FAILED: &str = "リクエストに失敗しました。しばらくしてから再度お試しください";
pub const NETWORK_ERROR: &str =
    "ネットワークエラーが発生しました。しばらくしてから再度お試しください";
pub const DECODE_FAILED: &str =
    "取得したデータのデコードに失敗しました。しばらくしてから再度お試しください";
pub const UNEXPECTED_ERROR: &str =
    "予期しないエラーが発生しました。しばらくしてから再度お試しください";

pub const USAGE: &str = "\
mocoVoice MCP server は発行されたAPIキーを設定することで音声書き起こしを行うことができるMCP Server です

本MCPが提供している機能は下記のとおりです

[SHOW_USAGE]
mocoVoice MCP server の機能一覧を表示します

[SHOW_AVAILABLE_FORMATS]
mocoVoice MCP server が対応している音声・動画ファイル形式を返却します

[SHOW_AVAILABLE_FILES]
mocoVoice MCP server が利用できる音声・動画ファイル一覧を返却します
利用できる音声・動画ファイル一覧は指定されたディレクトリ（フォルダー）配下のみです

[START_TRANSCRIPTION_JOB]
指定されたファイルで書き起こしジョブを起動します
ファイルの指定は絶対パスで行う必要があります

[SHOW_TRANSCRIPTION_RESULT]
書き起こしIDを指定して、書き起こし結果を取得して表示します

[CHECK_TRANSCRIPTION_STATUSES]
今までの書き起こし一覧を取得します

---

公式サイト: https://www.mocomoco.ai/
ドキュメント: https://docs.mocomoco.ai/

免責事項:
本ツールはMITライセンスに基づき、いかなる保証や公式のサポートを約束するものではありません。
機能をご確認の上、ご使用の際は自己責任でご利用ください。";

/// Supported formats, split into audio and video.
pub fn formats_description() -> String {
    let quoted = |kind| {
        crate::files::formats::extensions_of_kind(kind)
            .iter()
            .map(|ext| format!("\"{}\"", ext))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "mocoVoice MCP server が対応している音声・動画ファイル形式は下記です\n\
         [音声]\n{}\n\
         [動画]\n{}\n\
         最新の情報はFAQページでご確認ください\n\
         https://docs.mocomoco.ai/faq",
        quoted(MediaKind::Audio),
        quoted(MediaKind::Video),
    )
}

/// Message for an HTTP error status, falling back to [`REQUEST_FAILED`].
pub fn for_status(code: u16) -> &'static str {
    match code {
        400 => "送信されたリクエストは不正です。送信内容を確認してください",
        401 => "与えられたAPIキーにはアクセス権限がありません。APIキーが有効なものか確認してください。",
        403 => "与えられたAPIキーには本操作を行う権限がありません。APIキーの権限が適切か確認してください。",
        404 => "指定されたリソースが見つかりません。URLを確認してください。",
        405 => "このリクエストメソッドは許可されていません。",
        408 => "リクエストがタイムアウトしました。通信環境を確認してください。",
        429 => "リクエストが多すぎます。しばらく待ってから再度お試しください。",
        500 => "サーバーでエラーが発生しました。しばらくしてから再度お試しください。",
        501 => "リクエストされた機能は実装されていません。",
        502 => "ゲートウェイでエラーが発生しました。しばらくしてから再度お試しください。",
        503 => "サービスが一時的に利用できません。しばらくしてから再度お試しください。",
        504 => "ゲートウェイのタイムアウトが発生しました。通信環境を確認してください。",
        _ => REQUEST_FAILED,
    }
}
