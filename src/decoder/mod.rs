//! インクリメンタルデコーダーモジュール
//!
//! Sans I/O 設計に基づくストリーミングデコーダーを提供。
//!
//! デコーダーは受信済みのバイト列を受け取り、揃った分だけ
//! ヘッダー、ボディセグメント、メッセージ終端を [`HttpObject`] として出力する。
//! 状態は [`DecodePhase`] としてデコーダー内に保持され、データが足りなければ
//! 何も出力せずに戻る。続きのバイトが届いたら同じバッファを渡して再度呼び出す。
//!
//! ## 使い方
//!
//! ```rust
//! use bytes::BytesMut;
//! use http_object_decoder::{HttpObject, HttpRequestDecoder};
//!
//! let mut decoder = HttpRequestDecoder::new();
//! let mut buf = BytesMut::new();
//! let mut out = Vec::new();
//!
//! // 分割されて届いたデータ
//! for part in [&b"GET /a HT"[..], b"TP/1.1\r\nHost: x\r\n", b"\r\n"] {
//!     buf.extend_from_slice(part);
//!     decoder.decode(&mut buf, &mut out);
//! }
//!
//! assert_eq!(out.len(), 2);
//! let HttpObject::Message(head) = &out[0] else { panic!() };
//! assert_eq!(head.uri, "/a");
//! ```
//!
//! ## 不正な入力
//!
//! - スタートラインが不正な場合、代替ヘッダーを持つ [`HttpObject::InvalidMessage`] を 1 つ出力し、
//!   次の行から再開する
//! - ヘッダーやボディが不正な場合、[`HttpObject::InvalidMessage`] または
//!   [`HttpObject::InvalidContent`] を出力し、[`ObjectDecoder::reset`] が呼ばれるまで入力を破棄する

mod accumulator;
mod body;
mod engine;
mod head;
mod header;
mod kind;
mod object;
mod phase;
mod request;
mod response;
mod start_line;

// 公開 API
pub use engine::ObjectDecoder;
pub use head::{HttpHead, RequestHead, ResponseHead};
pub use kind::{HttpRequestKind, MessageKind, OversizedContent, RtspResponseKind};
pub use object::{HttpObject, LastContent};
pub use phase::DecodePhase;
pub use request::HttpRequestDecoder;
pub use response::RtspResponseDecoder;
pub use start_line::{LinePolicy, StartLine};
