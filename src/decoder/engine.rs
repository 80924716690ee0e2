//! メッセージ種別に依存しないデコード処理

use std::marker::PhantomData;
use std::mem;

use bytes::{Buf, Bytes, BytesMut};
use tracing::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::error::{ConfigError, DecodeError};
use crate::headers::HeaderMap;
use crate::token::is_control_or_whitespace;

use super::body::{self, BodyKind};
use super::head::HttpHead;
use super::header::{HeaderBlock, find_line, partial_line_len};
use super::kind::MessageKind;
use super::object::{HttpObject, LastContent};
use super::phase::DecodePhase;
use super::start_line::{LineScan, StartLineScanner};

/// 1 ステップの結果
enum Step {
    /// 続けて次のステップを実行できる
    Continue,
    /// データ不足
    Suspend,
}

/// Sans I/O のオブジェクトデコーダー
///
/// 受信したバイト列を [`decode`](Self::decode) に渡すと、揃った分だけ
/// [`HttpObject`] を出力する。データが足りない場合は何も出力せず、
/// 消費しなかったバイトはバッファに残る。次の呼び出しでは続きのバイトを追加したバッファを渡す。
///
/// ```rust
/// use bytes::BytesMut;
/// use http_object_decoder::{HttpObject, HttpRequestDecoder};
///
/// let mut decoder = HttpRequestDecoder::new();
/// let mut buf = BytesMut::from(&b"GET / HTTP/1.1\r\nHost: a\r\n\r\n"[..]);
/// let mut out = Vec::new();
/// decoder.decode(&mut buf, &mut out);
///
/// let Some(HttpObject::Message(head)) = out.first() else { panic!() };
/// assert_eq!(head.uri, "/");
/// assert!(out[1].is_last());
/// ```
#[derive(Debug)]
pub struct ObjectDecoder<K: MessageKind> {
    config: DecoderConfig,
    phase: DecodePhase,
    scanner: StartLineScanner,
    /// ヘッダー読み取り中のメッセージ
    message: Option<K::Head>,
    header_block: HeaderBlock,
    trailers: HeaderMap,
    _kind: PhantomData<fn() -> K>,
}

impl<K: MessageKind> Default for ObjectDecoder<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: MessageKind> ObjectDecoder<K> {
    /// デフォルト設定でデコーダーを作成
    pub fn new() -> Self {
        Self::build(DecoderConfig::default())
    }

    /// 設定を指定してデコーダーを作成
    pub fn with_config(config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: DecoderConfig) -> Self {
        let trailers = HeaderMap::with_validation(config.validate_headers);
        Self {
            config,
            phase: DecodePhase::SkipControlCharacters,
            scanner: StartLineScanner::new(K::FIELD_CAPACITY),
            message: None,
            header_block: HeaderBlock::default(),
            trailers,
            _kind: PhantomData,
        }
    }

    /// 設定を取得
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// 現在のデコード状態を取得
    pub fn phase(&self) -> DecodePhase {
        self.phase
    }

    /// デコーダーを初期状態に戻す
    ///
    /// 読み取り途中のメッセージは破棄される。
    pub fn reset(&mut self) {
        self.phase = DecodePhase::SkipControlCharacters;
        self.clear_message();
    }

    /// バッファをデコードし、揃ったオブジェクトを `out` に追加する
    pub fn decode(&mut self, buf: &mut BytesMut, out: &mut Vec<HttpObject<K::Head>>) {
        while let Step::Continue = self.step(buf, out) {}
    }

    /// ストリーム終了時のデコード
    ///
    /// 接続が閉じるまでのボディを確定させ、途中のメッセージは不正として出力する。
    /// 呼び出し後、バッファは空になり、デコーダーは初期状態に戻る。
    pub fn decode_eof(&mut self, buf: &mut BytesMut, out: &mut Vec<HttpObject<K::Head>>) {
        self.decode(buf, out);
        match self.phase {
            DecodePhase::ReadVariableLengthContent => {
                let content = buf.split().freeze();
                let trailers = self.take_trailers();
                out.push(HttpObject::LastContent(LastContent { content, trailers }));
                trace!("message completed at end of stream");
            }
            DecodePhase::ReadHeaders => {
                let mut head = self.message.take().unwrap_or_else(K::invalid_message);
                self.header_block.flush_partial(head.headers_mut());
                debug!("stream ended while reading headers");
                out.push(HttpObject::InvalidMessage {
                    head,
                    cause: DecodeError::UnexpectedEof,
                });
            }
            DecodePhase::ReadFixedLengthContent { .. }
            | DecodePhase::ReadChunkSize
            | DecodePhase::ReadChunkedContent { .. }
            | DecodePhase::ReadChunkDelimiter
            | DecodePhase::ReadChunkFooter => {
                debug!(phase = ?self.phase, "stream ended while reading content");
                out.push(HttpObject::InvalidContent(DecodeError::UnexpectedEof));
            }
            _ => {}
        }
        buf.clear();
        self.reset();
    }

    fn step(&mut self, buf: &mut BytesMut, out: &mut Vec<HttpObject<K::Head>>) -> Step {
        match self.phase {
            DecodePhase::SkipControlCharacters => {
                match buf.iter().position(|&b| !is_control_or_whitespace(b)) {
                    Some(skip) => {
                        buf.advance(skip);
                        self.phase = DecodePhase::ReadInitialLine;
                        Step::Continue
                    }
                    None => {
                        buf.clear();
                        Step::Suspend
                    }
                }
            }
            DecodePhase::ReadInitialLine => self.read_initial_line(buf, out),
            DecodePhase::ReadHeaders => self.read_headers(buf, out),
            DecodePhase::ReadFixedLengthContent { remaining } => {
                let Some(content) = self.take_segment(buf, remaining) else {
                    return Step::Suspend;
                };
                let remaining = remaining - content.len() as u64;
                if remaining == 0 {
                    let trailers = self.take_trailers();
                    out.push(HttpObject::LastContent(LastContent { content, trailers }));
                    self.phase = DecodePhase::Done;
                } else {
                    out.push(HttpObject::Content(content));
                    self.phase = DecodePhase::ReadFixedLengthContent { remaining };
                }
                Step::Continue
            }
            DecodePhase::ReadChunkSize => self.read_chunk_size(buf, out),
            DecodePhase::ReadChunkedContent { remaining } => {
                let Some(content) = self.take_segment(buf, remaining) else {
                    return Step::Suspend;
                };
                let remaining = remaining - content.len() as u64;
                out.push(HttpObject::Content(content));
                self.phase = if remaining == 0 {
                    DecodePhase::ReadChunkDelimiter
                } else {
                    DecodePhase::ReadChunkedContent { remaining }
                };
                Step::Continue
            }
            DecodePhase::ReadChunkDelimiter => match find_line(buf) {
                Some((_, consumed)) => {
                    buf.advance(consumed);
                    self.phase = DecodePhase::ReadChunkSize;
                    Step::Continue
                }
                None => {
                    buf.clear();
                    Step::Suspend
                }
            },
            DecodePhase::ReadChunkFooter => self.read_chunk_footer(buf, out),
            DecodePhase::ReadVariableLengthContent => {
                let size = self.config.max_chunk_size;
                if buf.len() < size {
                    return Step::Suspend;
                }
                out.push(HttpObject::Content(buf.split_to(size).freeze()));
                Step::Continue
            }
            DecodePhase::Done => {
                trace!("message completed");
                self.reset();
                Step::Continue
            }
            DecodePhase::DiscardLine => match find_line(buf) {
                Some((_, consumed)) => {
                    buf.advance(consumed);
                    debug!("resynchronized after oversized start line");
                    self.phase = DecodePhase::SkipControlCharacters;
                    Step::Continue
                }
                None => {
                    buf.clear();
                    Step::Suspend
                }
            },
            DecodePhase::BadMessage => {
                buf.clear();
                Step::Suspend
            }
        }
    }

    fn read_initial_line(&mut self, buf: &mut BytesMut, out: &mut Vec<HttpObject<K::Head>>) -> Step {
        let max = self.config.max_initial_line_length;
        match self.scanner.scan(buf, max, K::LINE_POLICY) {
            LineScan::NeedMoreBytes => Step::Suspend,
            LineScan::TooLong => {
                self.reject_start_line(out, DecodeError::LineTooLong { limit: max });
                self.phase = DecodePhase::DiscardLine;
                Step::Continue
            }
            LineScan::Malformed { consumed } => {
                buf.advance(consumed);
                self.reject_start_line(
                    out,
                    DecodeError::MalformedStartLine("line ended before three fields"),
                );
                self.phase = DecodePhase::SkipControlCharacters;
                Step::Continue
            }
            LineScan::Complete { consumed } => {
                let validate = self.config.validate_headers;
                let head = K::create_message(self.scanner.line(), validate);
                buf.advance(consumed);
                match head {
                    Ok(head) => {
                        self.message = Some(head);
                        self.header_block.start_headers();
                        self.phase = DecodePhase::ReadHeaders;
                    }
                    Err(cause) => {
                        self.reject_start_line(out, cause);
                        self.phase = DecodePhase::SkipControlCharacters;
                    }
                }
                Step::Continue
            }
        }
    }

    fn read_headers(&mut self, buf: &mut BytesMut, out: &mut Vec<HttpObject<K::Head>>) -> Step {
        let mut head = self.message.take().unwrap_or_else(K::invalid_message);
        let limit = self.config.max_header_size;
        match self.header_block.parse(buf, limit, head.headers_mut()) {
            Ok(false) => {
                self.message = Some(head);
                Step::Suspend
            }
            Ok(true) => {
                self.begin_content(head, out);
                Step::Continue
            }
            Err(cause) => {
                self.header_block.flush_partial(head.headers_mut());
                self.fail_message(out, head, cause);
                Step::Continue
            }
        }
    }

    fn begin_content(&mut self, mut head: K::Head, out: &mut Vec<HttpObject<K::Head>>) {
        let kind = match body::resolve_body::<K>(&mut head, self.config.max_chunk_size) {
            Ok(kind) => kind,
            Err(cause) => return self.fail_message(out, head, cause),
        };
        out.push(HttpObject::Message(head));
        self.phase = match kind {
            BodyKind::None => {
                out.push(HttpObject::LastContent(LastContent::empty(
                    self.config.validate_headers,
                )));
                DecodePhase::Done
            }
            BodyKind::ContentLength(remaining) => DecodePhase::ReadFixedLengthContent { remaining },
            BodyKind::Chunked => DecodePhase::ReadChunkSize,
            BodyKind::CloseDelimited => DecodePhase::ReadVariableLengthContent,
        };
    }

    fn read_chunk_size(&mut self, buf: &mut BytesMut, out: &mut Vec<HttpObject<K::Head>>) -> Step {
        let limit = self.config.max_initial_line_length;
        let Some((len, consumed)) = find_line(buf) else {
            if partial_line_len(buf) > limit {
                self.fail_content(out, DecodeError::LineTooLong { limit });
                return Step::Continue;
            }
            return Step::Suspend;
        };
        if len > limit {
            self.fail_content(out, DecodeError::LineTooLong { limit });
            return Step::Continue;
        }

        let size = body::parse_chunk_size(&buf[..len]).and_then(|size| {
            body::check_size::<K>(size, self.config.max_chunk_size)?;
            Ok(size)
        });
        buf.advance(consumed);
        match size {
            Ok(0) => {
                self.header_block.start_trailers();
                self.phase = DecodePhase::ReadChunkFooter;
            }
            Ok(remaining) => self.phase = DecodePhase::ReadChunkedContent { remaining },
            Err(cause) => self.fail_content(out, cause),
        }
        Step::Continue
    }

    fn read_chunk_footer(&mut self, buf: &mut BytesMut, out: &mut Vec<HttpObject<K::Head>>) -> Step {
        let limit = self.config.max_header_size;
        match self.header_block.parse(buf, limit, &mut self.trailers) {
            Ok(false) => Step::Suspend,
            Ok(true) => {
                let trailers = self.take_trailers();
                out.push(HttpObject::LastContent(LastContent {
                    content: Bytes::new(),
                    trailers,
                }));
                self.phase = DecodePhase::Done;
                Step::Continue
            }
            Err(cause) => {
                self.fail_content(out, cause);
                Step::Continue
            }
        }
    }

    /// `min(remaining, max_chunk_size)` バイト揃っていれば切り出す
    fn take_segment(&self, buf: &mut BytesMut, remaining: u64) -> Option<Bytes> {
        let size = remaining.min(self.config.max_chunk_size as u64) as usize;
        (buf.len() >= size).then(|| buf.split_to(size).freeze())
    }

    fn take_trailers(&mut self) -> HeaderMap {
        mem::replace(
            &mut self.trailers,
            HeaderMap::with_validation(self.config.validate_headers),
        )
    }

    fn clear_message(&mut self) {
        self.message = None;
        self.header_block.reset();
        self.trailers = HeaderMap::with_validation(self.config.validate_headers);
    }

    fn reject_start_line(&mut self, out: &mut Vec<HttpObject<K::Head>>, cause: DecodeError) {
        debug!(%cause, phase = ?self.phase, "start line rejected");
        out.push(HttpObject::InvalidMessage {
            head: K::invalid_message(),
            cause,
        });
    }

    fn fail_message(&mut self, out: &mut Vec<HttpObject<K::Head>>, head: K::Head, cause: DecodeError) {
        warn!(%cause, "invalid message, discarding input until reset");
        self.clear_message();
        self.phase = DecodePhase::BadMessage;
        out.push(HttpObject::InvalidMessage { head, cause });
    }

    fn fail_content(&mut self, out: &mut Vec<HttpObject<K::Head>>, cause: DecodeError) {
        warn!(%cause, phase = ?self.phase, "invalid content, discarding input until reset");
        self.clear_message();
        self.phase = DecodePhase::BadMessage;
        out.push(HttpObject::InvalidContent(cause));
    }
}
