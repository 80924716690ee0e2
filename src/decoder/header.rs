//! ヘッダーブロックのデコード
//!
//! 行単位で消費し、継続行のために直前のヘッダーを保留する。
//! 行のバイトは ISO-8859-1 として読む。
//! ブロック全体の長さ (行末の CR/LF を除く) に上限がある。

use bytes::{Buf, BytesMut};

use crate::error::DecodeError;
use crate::headers::HeaderMap;
use crate::token::push_latin1;

/// トレーラーとして保持しないヘッダー
const TRAILER_EXCLUDED: [&str; 3] = ["Content-Length", "Transfer-Encoding", "Trailer"];

/// LF までの 1 行を探す
///
/// 戻り値は (末尾 CR を除いた行長, LF を含む消費長)
pub(crate) fn find_line(buf: &[u8]) -> Option<(usize, usize)> {
    let lf = buf.iter().position(|&b| b == b'\n')?;
    let len = if lf > 0 && buf[lf - 1] == b'\r' {
        lf - 1
    } else {
        lf
    };
    Some((len, lf + 1))
}

/// LF がまだ届いていない行について、確定している行長
///
/// 末尾の CR は直後に LF が来る可能性があるため数えない
pub(crate) fn partial_line_len(buf: &[u8]) -> usize {
    match buf.last() {
        Some(b'\r') => buf.len() - 1,
        _ => buf.len(),
    }
}

/// ヘッダーブロックの状態
#[derive(Debug, Default)]
pub(crate) struct HeaderBlock {
    /// ブロック内で読んだバイト数
    size: usize,
    /// 継続行を待っているヘッダー
    pending: Option<(String, String)>,
    /// トレーラーブロックかどうか
    trailer: bool,
}

impl HeaderBlock {
    /// ヘッダーブロックを開始
    pub(crate) fn start_headers(&mut self) {
        self.reset();
    }

    /// トレーラーブロックを開始
    pub(crate) fn start_trailers(&mut self) {
        self.reset();
        self.trailer = true;
    }

    pub(crate) fn reset(&mut self) {
        self.size = 0;
        self.pending = None;
        self.trailer = false;
    }

    /// 揃っている行をすべて処理
    ///
    /// 空行まで読めたら `Ok(true)`、データ不足なら `Ok(false)` を返す
    pub(crate) fn parse(
        &mut self,
        buf: &mut BytesMut,
        limit: usize,
        headers: &mut HeaderMap,
    ) -> Result<bool, DecodeError> {
        loop {
            let Some((len, consumed)) = find_line(buf) else {
                if self.size.saturating_add(partial_line_len(buf)) > limit {
                    return Err(DecodeError::HeaderTooLarge { limit });
                }
                return Ok(false);
            };
            self.size = self.size.saturating_add(len);
            if self.size > limit {
                return Err(DecodeError::HeaderTooLarge { limit });
            }

            let mut line = String::with_capacity(len);
            push_latin1(&mut line, &buf[..len]);
            buf.advance(consumed);

            if line.is_empty() {
                self.flush(headers)?;
                return Ok(true);
            }

            if line.starts_with([' ', '\t']) {
                if let Some((_, value)) = self.pending.as_mut() {
                    let folded = line.trim();
                    if !folded.is_empty() {
                        if !value.is_empty() {
                            value.push(' ');
                        }
                        value.push_str(folded);
                    }
                    continue;
                }
            }

            self.flush(headers)?;
            self.pending = Some(split_header(&line));
        }
    }

    /// 途中で打ち切ったブロックの保留中ヘッダーを追加する
    ///
    /// 保留中のヘッダーが不正な場合は捨てる。
    pub(crate) fn flush_partial(&mut self, headers: &mut HeaderMap) {
        self.flush(headers).ok();
    }

    fn flush(&mut self, headers: &mut HeaderMap) -> Result<(), DecodeError> {
        let Some((name, value)) = self.pending.take() else {
            return Ok(());
        };
        if self.trailer
            && TRAILER_EXCLUDED
                .iter()
                .any(|excluded| excluded.eq_ignore_ascii_case(&name))
        {
            return Ok(());
        }
        headers.add(name, value)
    }
}

/// ヘッダー行を名前と値に分割
///
/// 名前はコロンまたは空白まで、値はコロン以降を前後の空白を除いたもの。
/// コロンがない場合、値は空になる。
fn split_header(line: &str) -> (String, String) {
    let line = line.trim_start_matches([' ', '\t']);
    let name_end = line
        .find(|c: char| c == ':' || c.is_ascii_whitespace())
        .unwrap_or(line.len());
    let (name, rest) = line.split_at(name_end);
    let value = rest.split_once(':').map(|(_, v)| v.trim()).unwrap_or("");
    (name.to_string(), value.to_string())
}
