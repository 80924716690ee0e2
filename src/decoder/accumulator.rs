//! スタートラインのフィールド用バッファ

use crate::token::push_latin1;

/// 再利用可能なフィールドバッファ
///
/// 容量は事前確保のヒントでしかなく、長さの上限は走査側で判定する。
/// 1 バイトを 1 文字 (ISO-8859-1) として蓄積するため、どこで切っても文字列として壊れない。
#[derive(Debug)]
pub(crate) struct Accumulator {
    buf: String,
}

impl Accumulator {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.buf.clear();
    }

    pub(crate) fn append(&mut self, bytes: &[u8]) {
        push_latin1(&mut self.buf, bytes);
    }

    /// 末尾の CR を 1 つ取り除く
    pub(crate) fn strip_cr(&mut self) {
        if self.buf.ends_with('\r') {
            self.buf.pop();
        }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_before_reuse() {
        let mut acc = Accumulator::with_capacity(8);
        acc.append(b"GET");
        assert_eq!(acc.as_str(), "GET");
        acc.reset();
        acc.append(b"POST");
        assert_eq!(acc.as_str(), "POST");
    }

    #[test]
    fn grows_past_capacity() {
        let mut acc = Accumulator::with_capacity(2);
        acc.append(b"OPTIONS");
        assert_eq!(acc.as_str(), "OPTIONS");
    }

    #[test]
    fn strip_cr() {
        let mut acc = Accumulator::with_capacity(10);
        acc.append(b"HTTP/1.1\r");
        acc.strip_cr();
        assert_eq!(acc.as_str(), "HTTP/1.1");
        acc.strip_cr();
        assert_eq!(acc.as_str(), "HTTP/1.1");
    }

    #[test]
    fn bytes_are_latin1() {
        let mut acc = Accumulator::with_capacity(4);
        acc.append(b"Caf\xe9");
        assert_eq!(acc.as_str(), "Caf\u{e9}");
        // UTF-8 の途中で切れても文字列として扱える
        acc.reset();
        acc.append(&"XY\u{e9}".as_bytes()[..3]);
        assert_eq!(acc.as_str(), "XY\u{c3}");
    }
}
