//! メッセージ種別ごとの差分
//!
//! リクエストとレスポンスで異なるのは、スタートラインの解釈と行長制限の扱い、
//! ボディを持たないメッセージの判定、大きすぎるボディの扱いだけ。
//! 共通のデコード処理は [`ObjectDecoder`](super::ObjectDecoder) が持つ。

use std::borrow::Cow;
use std::fmt;

use crate::error::DecodeError;
use crate::headers::HeaderMap;
use crate::method::Method;
use crate::status::Status;
use crate::version::Version;

use super::head::{HttpHead, RequestHead, ResponseHead};
use super::start_line::{LinePolicy, StartLine};

/// `max_chunk_size` を超えるボディの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OversizedContent {
    /// `max_chunk_size` ごとのセグメントに分割する
    Split,
    /// 不正メッセージとして扱う
    Reject,
}

/// メッセージ種別
pub trait MessageKind {
    /// デコード結果のヘッダー型
    type Head: HttpHead + Clone + fmt::Debug + Send + 'static;

    /// スタートラインの行長制限の扱い
    const LINE_POLICY: LinePolicy;
    /// スタートライン各フィールドの初期容量
    const FIELD_CAPACITY: [usize; 3];
    /// 大きすぎるボディの扱い
    const OVERSIZED_CONTENT: OversizedContent;
    /// リクエストかどうか
    ///
    /// リクエストは Content-Length も chunked もなければボディなしとして扱う。
    const IS_REQUEST: bool;

    /// スタートラインからヘッダーを生成
    fn create_message(line: StartLine<'_>, validate_headers: bool)
    -> Result<Self::Head, DecodeError>;

    /// スタートラインが不正な場合の代替ヘッダー
    fn invalid_message() -> Self::Head;

    /// ヘッダーの内容に関わらずボディを持たないか
    fn is_content_always_empty(head: &Self::Head) -> bool;
}

/// HTTP リクエスト
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpRequestKind;

impl MessageKind for HttpRequestKind {
    type Head = RequestHead;

    const LINE_POLICY: LinePolicy = LinePolicy::Strict;
    const FIELD_CAPACITY: [usize; 3] = [8, 100, 10];
    const OVERSIZED_CONTENT: OversizedContent = OversizedContent::Split;
    const IS_REQUEST: bool = true;

    fn create_message(line: StartLine<'_>, validate_headers: bool) -> Result<RequestHead, DecodeError> {
        let version = Version::parse(line.third)?;
        let method = Method::parse(line.first)?;
        Ok(RequestHead {
            method,
            uri: Cow::Owned(line.second.to_string()),
            version,
            headers: HeaderMap::with_validation(validate_headers),
        })
    }

    fn invalid_message() -> RequestHead {
        RequestHead::BAD_REQUEST
    }

    fn is_content_always_empty(_head: &RequestHead) -> bool {
        false
    }
}

/// RTSP レスポンス
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RtspResponseKind;

impl MessageKind for RtspResponseKind {
    type Head = ResponseHead;

    const LINE_POLICY: LinePolicy = LinePolicy::Lenient;
    const FIELD_CAPACITY: [usize; 3] = [10, 8, 100];
    const OVERSIZED_CONTENT: OversizedContent = OversizedContent::Reject;
    const IS_REQUEST: bool = false;

    fn create_message(line: StartLine<'_>, validate_headers: bool) -> Result<ResponseHead, DecodeError> {
        let version = Version::parse(line.first)?;
        let status = Status::parse(line.second, line.third)?;
        Ok(ResponseHead {
            version,
            status,
            headers: HeaderMap::with_validation(validate_headers),
        })
    }

    fn invalid_message() -> ResponseHead {
        ResponseHead::RTSP_UNKNOWN
    }

    fn is_content_always_empty(head: &ResponseHead) -> bool {
        // RTSP は Content-Length がなければボディを持たない
        is_response_content_always_empty(head) || !head.headers.contains("Content-Length")
    }
}

/// ステータスコードからボディを持たないレスポンスか判定
///
/// 101 は WebSocket ハンドシェイク (Sec-WebSocket-Accept あり) の場合のみボディなし。
pub(crate) fn is_response_content_always_empty(head: &ResponseHead) -> bool {
    match head.status_code() {
        101 => head.headers.contains("Sec-WebSocket-Accept"),
        100..=199 | 204 | 205 | 304 => true,
        _ => false,
    }
}
