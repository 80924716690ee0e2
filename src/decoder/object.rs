//! デコーダーが出力するオブジェクト

use bytes::Bytes;

use crate::error::DecodeError;
use crate::headers::HeaderMap;

/// メッセージ終端
///
/// 固定長ボディの最後のセグメント、または chunked のトレーラーを運ぶ。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastContent {
    /// 最後のボディセグメント (空の場合あり)
    pub content: Bytes,
    /// トレーラーヘッダー
    pub trailers: HeaderMap,
}

impl LastContent {
    /// 空の終端を作成
    pub fn empty(validate_headers: bool) -> Self {
        Self {
            content: Bytes::new(),
            trailers: HeaderMap::with_validation(validate_headers),
        }
    }
}

/// デコード結果
///
/// 1 メッセージにつき `Message` が 1 つ、`Content` が 0 個以上、`LastContent` が 1 つ出力される。
/// スタートラインが不正な場合は `InvalidMessage` が 1 つだけ出力される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpObject<H> {
    /// メッセージヘッダー
    Message(H),
    /// ボディセグメント
    Content(Bytes),
    /// メッセージ終端
    LastContent(LastContent),
    /// 不正メッセージ
    ///
    /// スタートラインが不正な場合は代替ヘッダー、ヘッダーが不正な場合は途中まで構築したヘッダーを持つ。
    InvalidMessage { head: H, cause: DecodeError },
    /// 不正なボディ
    InvalidContent(DecodeError),
}

impl<H> HttpObject<H> {
    /// 不正オブジェクトかどうか
    pub fn is_invalid(&self) -> bool {
        self.cause().is_some()
    }

    /// 不正オブジェクトの原因を取得
    pub fn cause(&self) -> Option<&DecodeError> {
        match self {
            HttpObject::InvalidMessage { cause, .. } | HttpObject::InvalidContent(cause) => {
                Some(cause)
            }
            _ => None,
        }
    }

    /// ヘッダーを取得 (`Message` / `InvalidMessage`)
    pub fn head(&self) -> Option<&H> {
        match self {
            HttpObject::Message(head) | HttpObject::InvalidMessage { head, .. } => Some(head),
            _ => None,
        }
    }

    /// メッセージ終端かどうか
    pub fn is_last(&self) -> bool {
        matches!(self, HttpObject::LastContent(_))
    }
}
