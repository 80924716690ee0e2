//! メッセージヘッダー型の定義

use std::borrow::Cow;

use crate::error::DecodeError;
use crate::headers::HeaderMap;
use crate::method::Method;
use crate::status::Status;
use crate::version::Version;

/// メッセージヘッダー操作のための共通トレイト
pub trait HttpHead {
    /// プロトコルバージョンを取得
    fn version(&self) -> &Version;

    /// ヘッダーを取得
    fn headers(&self) -> &HeaderMap;

    /// ヘッダーを変更可能で取得
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// ヘッダーを取得 (大文字小文字を区別しない)
    fn get_header(&self, name: &str) -> Option<&str> {
        self.headers().get(name)
    }

    /// Content-Length ヘッダーの値を取得
    ///
    /// ヘッダーがなければ `Ok(None)`。複数ある場合は最初の値を使う。
    fn content_length(&self) -> Result<Option<u64>, DecodeError> {
        let Some(value) = self.get_header("Content-Length") else {
            return Ok(None);
        };
        let trimmed = value.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DecodeError::InvalidContentLength(value.to_string()));
        }
        trimmed
            .parse::<u64>()
            .map(Some)
            .map_err(|_| DecodeError::InvalidContentLength(value.to_string()))
    }

    /// Transfer-Encoding に chunked が含まれるか判定
    fn is_transfer_encoding_chunked(&self) -> bool {
        self.headers()
            .get_all("Transfer-Encoding")
            .iter()
            .flat_map(|v| v.split(','))
            .any(|token| token.trim().eq_ignore_ascii_case("chunked"))
    }
}

/// リクエストヘッダー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestHead {
    /// メソッド
    pub method: Method,
    /// リクエスト URI
    pub uri: Cow<'static, str>,
    /// バージョン
    pub version: Version,
    /// ヘッダー
    pub headers: HeaderMap,
}

impl RequestHead {
    /// 不正リクエストの代替として使うヘッダー (`GET /bad-request HTTP/1.0`)
    pub const BAD_REQUEST: RequestHead = RequestHead {
        method: Method::GET,
        uri: Cow::Borrowed("/bad-request"),
        version: Version::HTTP_1_0,
        headers: HeaderMap::new(),
    };
}

impl HttpHead for RequestHead {
    fn version(&self) -> &Version {
        &self.version
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}

/// レスポンスヘッダー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    /// バージョン
    pub version: Version,
    /// ステータス
    pub status: Status,
    /// ヘッダー
    pub headers: HeaderMap,
}

impl ResponseHead {
    /// 不正 RTSP レスポンスの代替として使うヘッダー (`RTSP/1.0 999 Unknown`)
    pub const RTSP_UNKNOWN: ResponseHead = ResponseHead {
        version: Version::RTSP_1_0,
        status: Status::UNKNOWN,
        headers: HeaderMap::new(),
    };

    /// ステータスコード
    pub fn status_code(&self) -> u32 {
        self.status.code()
    }

    /// リーズンフレーズ
    pub fn reason_phrase(&self) -> &str {
        self.status.reason()
    }
}

impl HttpHead for ResponseHead {
    fn version(&self) -> &Version {
        &self.version
    }

    fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }
}
