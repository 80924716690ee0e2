//! RTSP レスポンスデコーダー

use super::engine::ObjectDecoder;
use super::kind::RtspResponseKind;

/// RTSP レスポンスデコーダー (Sans I/O)
///
/// クライアント側で RTSP サーバーからのレスポンスをパースする際に使用。
///
/// スタートラインの長さ制限は緩く、`max_initial_line_length` を超えた部分は
/// 読み捨てられるだけで不正メッセージにはならない。
/// Content-Length がないレスポンスはボディを持たないものとして扱い、
/// Content-Length が `max_chunk_size` を超えるレスポンスは拒否する。
///
/// ```rust
/// use bytes::BytesMut;
/// use http_object_decoder::{HttpObject, RtspResponseDecoder};
///
/// let mut decoder = RtspResponseDecoder::new();
/// let mut buf = BytesMut::from(&b"RTSP/1.0 200 OK\r\nCSeq: 2\r\n\r\n"[..]);
/// let mut out = Vec::new();
/// decoder.decode(&mut buf, &mut out);
///
/// let HttpObject::Message(head) = &out[0] else { panic!() };
/// assert_eq!(head.status_code(), 200);
/// assert_eq!(head.headers.get("CSeq"), Some("2"));
/// ```
pub type RtspResponseDecoder = ObjectDecoder<RtspResponseKind>;
