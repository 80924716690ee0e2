//! tokio-util の `Decoder` アダプター
//!
//! [`ObjectDecoder`] は 1 回の呼び出しで複数のオブジェクトを出力するため、
//! キューに溜めて 1 つずつ返す。

use std::collections::VecDeque;
use std::io;

use bytes::BytesMut;
use tokio_util::codec::Decoder;

use crate::config::DecoderConfig;
use crate::decoder::{HttpObject, HttpRequestKind, MessageKind, ObjectDecoder, RtspResponseKind};
use crate::error::ConfigError;

/// `FramedRead` で使えるオブジェクトデコーダー
///
/// 不正な入力はエラーではなく不正オブジェクトとして返す。
///
/// ```rust
/// use futures::StreamExt;
/// use http_object_decoder::{HttpObject, HttpRequestCodec};
/// use tokio_util::codec::FramedRead;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let input = &b"GET / HTTP/1.1\r\n\r\n"[..];
/// let mut frames = FramedRead::new(input, HttpRequestCodec::new());
/// let first = frames.next().await.unwrap().unwrap();
/// assert!(matches!(first, HttpObject::Message(_)));
/// # }
/// ```
#[derive(Debug)]
pub struct HttpObjectCodec<K: MessageKind> {
    decoder: ObjectDecoder<K>,
    queue: VecDeque<HttpObject<K::Head>>,
}

/// HTTP リクエスト用のコーデック
pub type HttpRequestCodec = HttpObjectCodec<HttpRequestKind>;

/// RTSP レスポンス用のコーデック
pub type RtspResponseCodec = HttpObjectCodec<RtspResponseKind>;

impl<K: MessageKind> Default for HttpObjectCodec<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: MessageKind> HttpObjectCodec<K> {
    /// デフォルト設定でコーデックを作成
    pub fn new() -> Self {
        Self {
            decoder: ObjectDecoder::new(),
            queue: VecDeque::new(),
        }
    }

    /// 設定を指定してコーデックを作成
    pub fn with_config(config: DecoderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            decoder: ObjectDecoder::with_config(config)?,
            queue: VecDeque::new(),
        })
    }

    /// 内部のデコーダーを取得
    pub fn decoder(&self) -> &ObjectDecoder<K> {
        &self.decoder
    }

    /// 内部のデコーダーを変更可能で取得
    ///
    /// 不正メッセージの後に接続を維持する場合は、ここから `reset` を呼ぶ。
    pub fn decoder_mut(&mut self) -> &mut ObjectDecoder<K> {
        &mut self.decoder
    }
}

impl<K: MessageKind> Decoder for HttpObjectCodec<K> {
    type Item = HttpObject<K::Head>;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.queue.is_empty() {
            let mut out = Vec::new();
            self.decoder.decode(src, &mut out);
            self.queue.extend(out);
        }
        Ok(self.queue.pop_front())
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.queue.is_empty() {
            let mut out = Vec::new();
            self.decoder.decode_eof(src, &mut out);
            self.queue.extend(out);
        }
        Ok(self.queue.pop_front())
    }
}
