//! HTTP リクエストデコーダー

use super::engine::ObjectDecoder;
use super::kind::HttpRequestKind;

/// HTTP リクエストデコーダー (Sans I/O)
///
/// サーバー側でクライアントからのリクエストをパースする際に使用。
///
/// スタートラインが `max_initial_line_length` を超えると、LF を待たずに
/// `GET /bad-request HTTP/1.0` を持つ不正メッセージを 1 つ出力し、その行の残りを読み飛ばす。
/// 次の行からは通常どおりデコードする。
///
/// ```rust
/// use bytes::BytesMut;
/// use http_object_decoder::{HttpObject, HttpRequestDecoder, Method};
///
/// let mut decoder = HttpRequestDecoder::new();
/// let mut buf = BytesMut::from(&b"POST /upload HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello"[..]);
/// let mut out = Vec::new();
/// decoder.decode(&mut buf, &mut out);
///
/// let HttpObject::Message(head) = &out[0] else { panic!() };
/// assert_eq!(head.method, Method::POST);
/// let HttpObject::LastContent(last) = &out[1] else { panic!() };
/// assert_eq!(&last.content[..], b"hello");
/// ```
pub type HttpRequestDecoder = ObjectDecoder<HttpRequestKind>;
