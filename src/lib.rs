//! # http_object_decoder
//!
//! HTTP リクエストと RTSP レスポンスのインクリメンタルデコーダー (Sans I/O)
//!
//! ## 特徴
//!
//! - **Sans I/O**: I/O を完全に分離した設計。受信済みのバイト列を渡すだけ
//! - **再開可能**: データがどこで分割されて届いても、同じオブジェクト列を出力する
//! - **不正入力に強い**: 不正なスタートラインは代替ヘッダーを持つ不正メッセージとして出力し、次の行から再開する
//! - **tokio 対応**: [`HttpObjectCodec`] で `FramedRead` に組み込める
//!
//! ## 使い方
//!
//! ### サーバー (リクエスト受信)
//!
//! ```rust
//! use bytes::BytesMut;
//! use http_object_decoder::{HttpObject, HttpRequestDecoder};
//!
//! let mut decoder = HttpRequestDecoder::new();
//! let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n"[..]);
//! let mut out = Vec::new();
//! decoder.decode(&mut buf, &mut out);
//!
//! for obj in out {
//!     match obj {
//!         HttpObject::Message(head) => assert_eq!(head.uri, "/"),
//!         HttpObject::LastContent(last) => assert!(last.content.is_empty()),
//!         other => panic!("unexpected {other:?}"),
//!     }
//! }
//! ```
//!
//! ### クライアント (RTSP レスポンス受信)
//!
//! ```rust
//! use bytes::BytesMut;
//! use http_object_decoder::{HttpObject, RtspResponseDecoder};
//!
//! let mut decoder = RtspResponseDecoder::new();
//! let mut buf = BytesMut::from(&b"RTSP/1.0 OK OK\r\n"[..]);
//! let mut out = Vec::new();
//! decoder.decode(&mut buf, &mut out);
//!
//! // 数値でないステータスコードは 999 Unknown の不正メッセージになる
//! let HttpObject::InvalidMessage { head, .. } = &out[0] else { panic!() };
//! assert_eq!(head.status_code(), 999);
//! ```

mod codec;
mod config;
mod decoder;
mod error;
mod headers;
mod method;
mod status;
mod token;
mod version;

pub use codec::{HttpObjectCodec, HttpRequestCodec, RtspResponseCodec};
pub use config::DecoderConfig;
pub use decoder::{
    DecodePhase, HttpHead, HttpObject, HttpRequestDecoder, HttpRequestKind, LastContent,
    LinePolicy, MessageKind, ObjectDecoder, OversizedContent, RequestHead, ResponseHead,
    RtspResponseDecoder, RtspResponseKind, StartLine,
};
pub use error::{ConfigError, DecodeError};
pub use headers::HeaderMap;
pub use method::Method;
pub use status::Status;
pub use version::Version;
