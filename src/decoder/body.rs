//! ボディの長さ決定とチャンクサイズ行のパース

use crate::error::DecodeError;

use super::head::HttpHead;
use super::kind::{MessageKind, OversizedContent};

/// ボディの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BodyKind {
    /// ボディなし
    None,
    /// Content-Length で指定された固定長
    ContentLength(u64),
    /// Transfer-Encoding: chunked
    Chunked,
    /// 接続が閉じるまでがボディ
    CloseDelimited,
}

/// ヘッダーからボディの種類を決定する
///
/// 常にボディを持たないメッセージに chunked の Transfer-Encoding が付いている場合は取り除く。
/// Transfer-Encoding: chunked は Content-Length より優先される。
pub(crate) fn resolve_body<K: MessageKind>(
    head: &mut K::Head,
    max_chunk_size: usize,
) -> Result<BodyKind, DecodeError> {
    if K::is_content_always_empty(head) {
        if head.is_transfer_encoding_chunked() {
            head.headers_mut().remove("Transfer-Encoding");
        }
        return Ok(BodyKind::None);
    }
    if head.is_transfer_encoding_chunked() {
        return Ok(BodyKind::Chunked);
    }
    match head.content_length()? {
        Some(0) => Ok(BodyKind::None),
        Some(size) => {
            check_size::<K>(size, max_chunk_size)?;
            Ok(BodyKind::ContentLength(size))
        }
        None if K::IS_REQUEST => Ok(BodyKind::None),
        None => Ok(BodyKind::CloseDelimited),
    }
}

/// 分割できないメッセージ種別で、ボディが 1 セグメントに収まるか確認
pub(crate) fn check_size<K: MessageKind>(size: u64, max_chunk_size: usize) -> Result<(), DecodeError> {
    match K::OVERSIZED_CONTENT {
        OversizedContent::Reject if size > max_chunk_size as u64 => {
            Err(DecodeError::ContentTooLarge {
                size,
                limit: max_chunk_size,
            })
        }
        _ => Ok(()),
    }
}

/// チャンクサイズ行をパース
///
/// `;` 以降のチャンク拡張は無視する。
pub(crate) fn parse_chunk_size(line: &[u8]) -> Result<u64, DecodeError> {
    let invalid = || DecodeError::InvalidChunkSize(String::from_utf8_lossy(line).into_owned());
    let line = std::str::from_utf8(line).map_err(|_| invalid())?.trim();
    let end = line
        .find(|c: char| c == ';' || c.is_whitespace() || c.is_control())
        .unwrap_or(line.len());
    let hex = &line[..end];
    if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    u64::from_str_radix(hex, 16).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::head::{RequestHead, ResponseHead};
    use crate::decoder::kind::{HttpRequestKind, RtspResponseKind};
    use crate::status::Status;

    fn request(headers: &[(&str, &str)]) -> RequestHead {
        let mut head = RequestHead::BAD_REQUEST;
        for (name, value) in headers {
            head.headers.add(*name, *value).unwrap();
        }
        head
    }

    fn rtsp(code: u32, headers: &[(&str, &str)]) -> ResponseHead {
        let mut head = ResponseHead::RTSP_UNKNOWN;
        head.status = Status::new(code, "X");
        for (name, value) in headers {
            head.headers.add(*name, *value).unwrap();
        }
        head
    }

    #[test]
    fn request_body_kinds() {
        let resolve = |headers: &[(&str, &str)]| {
            resolve_body::<HttpRequestKind>(&mut request(headers), 8192)
        };
        assert_eq!(resolve(&[]), Ok(BodyKind::None));
        assert_eq!(resolve(&[("Content-Length", "0")]), Ok(BodyKind::None));
        assert_eq!(
            resolve(&[("Content-Length", "100000")]),
            Ok(BodyKind::ContentLength(100000))
        );
        assert_eq!(
            resolve(&[("Content-Length", "5"), ("Transfer-Encoding", "chunked")]),
            Ok(BodyKind::Chunked)
        );
        assert_eq!(
            resolve(&[("Content-Length", "x")]),
            Err(DecodeError::InvalidContentLength("x".to_string()))
        );
    }

    #[test]
    fn rtsp_body_kinds() {
        let resolve = |code: u32, headers: &[(&str, &str)]| {
            resolve_body::<RtspResponseKind>(&mut rtsp(code, headers), 16)
        };
        // Content-Length がなければボディなし
        assert_eq!(resolve(200, &[]), Ok(BodyKind::None));
        assert_eq!(
            resolve(200, &[("Content-Length", "10")]),
            Ok(BodyKind::ContentLength(10))
        );
        assert_eq!(resolve(304, &[("Content-Length", "10")]), Ok(BodyKind::None));
        assert_eq!(
            resolve(200, &[("Content-Length", "17")]),
            Err(DecodeError::ContentTooLarge {
                size: 17,
                limit: 16
            })
        );
    }

    #[test]
    fn always_empty_strips_chunked() {
        let mut head = rtsp(204, &[("Transfer-Encoding", "chunked")]);
        assert_eq!(
            resolve_body::<RtspResponseKind>(&mut head, 8192),
            Ok(BodyKind::None)
        );
        assert!(!head.headers.contains("Transfer-Encoding"));
    }

    #[test]
    fn chunk_size() {
        assert_eq!(parse_chunk_size(b"0"), Ok(0));
        assert_eq!(parse_chunk_size(b"1a"), Ok(26));
        assert_eq!(parse_chunk_size(b" FF "), Ok(255));
        assert_eq!(parse_chunk_size(b"10;name=value"), Ok(16));
        assert_eq!(parse_chunk_size(b"10 ; ext"), Ok(16));
        assert!(parse_chunk_size(b"").is_err());
        assert!(parse_chunk_size(b"xyz").is_err());
        assert!(parse_chunk_size(b"-1").is_err());
        assert!(parse_chunk_size(b"+1").is_err());
        assert!(parse_chunk_size(b"\xff").is_err());
        assert!(parse_chunk_size(b"10000000000000000").is_err());
    }
}
