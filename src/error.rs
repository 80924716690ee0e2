use thiserror::Error;

/// デコードエラー
///
/// デコーダーの外には返さず、不正メッセージ
/// ([`HttpObject::InvalidMessage`](crate::HttpObject::InvalidMessage) /
/// [`HttpObject::InvalidContent`](crate::HttpObject::InvalidContent)) の原因として運ばれる。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// スタートライン (またはチャンクサイズ行) が長すぎる
    #[error("line is larger than {limit} bytes")]
    LineTooLong { limit: usize },
    /// スタートラインの構造が不正
    #[error("malformed start line: {0}")]
    MalformedStartLine(&'static str),
    /// プロトコルバージョンが不正
    #[error("invalid version: {0:?}")]
    InvalidVersion(String),
    /// メソッドが不正
    #[error("invalid method: {0:?}")]
    InvalidMethod(String),
    /// ステータスコードが数値ではない
    #[error("invalid status code: {0:?}")]
    InvalidStatusCode(String),
    /// ヘッダーブロックが長すぎる
    #[error("header is larger than {limit} bytes")]
    HeaderTooLarge { limit: usize },
    /// ヘッダー名が不正
    #[error("invalid header name: {0:?}")]
    InvalidHeaderName(String),
    /// ヘッダー値が不正
    #[error("invalid header value for {name:?}")]
    InvalidHeaderValue { name: String },
    /// Content-Length が不正
    #[error("invalid Content-Length: {0:?}")]
    InvalidContentLength(String),
    /// チャンクサイズが不正
    #[error("invalid chunk size: {0:?}")]
    InvalidChunkSize(String),
    /// ボディサイズ超過
    #[error("content length {size} exceeds {limit} bytes")]
    ContentTooLarge { size: u64, limit: usize },
    /// メッセージの途中でストリームが終了した
    #[error("unexpected end of stream")]
    UnexpectedEof,
}

impl DecodeError {
    /// サイズ制限超過 (frame too long) かどうか
    pub fn is_frame_too_long(&self) -> bool {
        matches!(
            self,
            DecodeError::LineTooLong { .. }
                | DecodeError::HeaderTooLarge { .. }
                | DecodeError::ContentTooLarge { .. }
        )
    }
}

/// 設定エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// 0 は指定できない
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
}
