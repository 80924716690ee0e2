//! スタートラインの走査
//!
//! 1 行を SP, SP, LF で区切られた 3 フィールドに分割する。
//! 走査は常にバッファの先頭からやり直すため、データ不足で中断しても途中結果は持ち越さない。

use super::accumulator::Accumulator;

const SP: u8 = b' ';
const LF: u8 = b'\n';

/// 行長制限の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePolicy {
    /// 制限を超えた時点で走査を中断する
    Strict,
    /// 制限を超えた部分はフィールドに蓄積しないが、走査は続ける
    Lenient,
}

/// 走査済みのスタートライン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartLine<'a> {
    /// 1 番目のフィールド (メソッド / バージョン)
    pub first: &'a str,
    /// 2 番目のフィールド (URI / ステータスコード)
    pub second: &'a str,
    /// 3 番目のフィールド (バージョン / リーズンフレーズ)
    pub third: &'a str,
}

/// 走査結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineScan {
    /// 3 フィールドが揃った。`consumed` は LF までのバイト数
    Complete { consumed: usize },
    /// データ不足
    NeedMoreBytes,
    /// 行長制限超過 (Strict のみ)
    TooLong,
    /// 3 フィールドが揃う前に LF が現れた
    Malformed { consumed: usize },
}

/// スタートラインスキャナー
#[derive(Debug)]
pub(crate) struct StartLineScanner {
    fields: [Accumulator; 3],
}

impl StartLineScanner {
    pub(crate) fn new(capacity: [usize; 3]) -> Self {
        Self {
            fields: capacity.map(Accumulator::with_capacity),
        }
    }

    /// バッファ先頭から 1 行を走査
    ///
    /// バッファは消費しない。呼び出し側が `consumed` バイトを進める。
    pub(crate) fn scan(&mut self, buf: &[u8], max: usize, policy: LinePolicy) -> LineScan {
        let mut pos = 0;
        for (index, field) in self.fields.iter_mut().enumerate() {
            field.reset();
            let last = index == 2;

            // Strict では行内オフセット max 以降の非区切り文字が 1 つでもあれば超過
            let end = match policy {
                LinePolicy::Strict => buf.len().min(max.max(pos).saturating_add(1)),
                LinePolicy::Lenient => buf.len(),
            };
            let window = &buf[pos..end];
            let found = if last {
                window.iter().position(|&b| b == LF)
            } else {
                window.iter().position(|&b| b == SP || b == LF)
            };
            let Some(offset) = found else {
                return if end < buf.len() {
                    LineScan::TooLong
                } else {
                    LineScan::NeedMoreBytes
                };
            };

            let delim = pos + offset;
            if !last && buf[delim] == LF {
                return LineScan::Malformed { consumed: delim + 1 };
            }
            // max 以降のバイトは蓄積しない (Lenient でのみ発生する)
            field.append(&buf[pos..delim.min(max).max(pos)]);
            pos = delim + 1;
        }
        self.fields[2].strip_cr();
        LineScan::Complete { consumed: pos }
    }

    /// 直前の走査で得たフィールドを取得
    ///
    /// 各バイトは ISO-8859-1 の 1 文字として読む。
    pub(crate) fn line(&self) -> StartLine<'_> {
        let [first, second, third] = &self.fields;
        StartLine {
            first: first.as_str(),
            second: second.as_str(),
            third: third.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> StartLineScanner {
        StartLineScanner::new([8, 100, 10])
    }

    #[test]
    fn complete_line() {
        let mut s = scanner();
        let buf = b"GET /index.html HTTP/1.1\r\nHost: a\r\n";
        assert_eq!(
            s.scan(buf, 4096, LinePolicy::Strict),
            LineScan::Complete { consumed: 26 }
        );
        let line = s.line();
        assert_eq!(line.first, "GET");
        assert_eq!(line.second, "/index.html");
        assert_eq!(line.third, "HTTP/1.1");
    }

    #[test]
    fn need_more_bytes_at_every_split() {
        let buf = b"GET / HTTP/1.1\n";
        let mut s = scanner();
        for n in 0..buf.len() {
            assert_eq!(
                s.scan(&buf[..n], 4096, LinePolicy::Strict),
                LineScan::NeedMoreBytes,
                "split at {n}"
            );
        }
        assert_eq!(
            s.scan(buf, 4096, LinePolicy::Strict),
            LineScan::Complete {
                consumed: buf.len()
            }
        );
    }

    #[test]
    fn strict_too_long_without_lf() {
        let mut s = scanner();
        // 1 番目のフィールドだけで制限を超える
        assert_eq!(
            s.scan(b"GETGETGETGET", 8, LinePolicy::Strict),
            LineScan::TooLong
        );
        // 制限ちょうどまでならデータ不足
        assert_eq!(
            s.scan(b"GETGETGE", 8, LinePolicy::Strict),
            LineScan::NeedMoreBytes
        );
    }

    #[test]
    fn strict_line_of_exact_limit() {
        let mut s = scanner();
        // LF を除いて 10 バイト
        let buf = b"A / HTTP/1\n";
        assert_eq!(
            s.scan(buf, 10, LinePolicy::Strict),
            LineScan::Complete { consumed: 11 }
        );
        assert_eq!(s.scan(buf, 9, LinePolicy::Strict), LineScan::TooLong);
    }

    #[test]
    fn lenient_truncates_fields() {
        let mut s = StartLineScanner::new([10, 8, 100]);
        let buf = b"RTSP/1.0 200 OK Long Reason\n";
        assert_eq!(
            s.scan(buf, 14, LinePolicy::Lenient),
            LineScan::Complete {
                consumed: buf.len()
            }
        );
        let line = s.line();
        assert_eq!(line.first, "RTSP/1.0");
        assert_eq!(line.second, "200");
        assert_eq!(line.third, "O");
    }

    #[test]
    fn lenient_never_too_long() {
        let mut s = scanner();
        let buf = vec![b'A'; 10_000];
        assert_eq!(s.scan(&buf, 8, LinePolicy::Lenient), LineScan::NeedMoreBytes);
    }

    #[test]
    fn lf_before_third_field() {
        let mut s = scanner();
        assert_eq!(
            s.scan(b"GET /\nHost: a\n", 4096, LinePolicy::Strict),
            LineScan::Malformed { consumed: 6 }
        );
        assert_eq!(
            s.scan(b"RTSP/1.0\n", 4096, LinePolicy::Lenient),
            LineScan::Malformed { consumed: 9 }
        );
    }

    #[test]
    fn empty_fields() {
        let mut s = scanner();
        assert_eq!(
            s.scan(b"  \n", 4096, LinePolicy::Strict),
            LineScan::Complete { consumed: 3 }
        );
        let line = s.line();
        assert_eq!(line, StartLine { first: "", second: "", third: "" });
    }

    #[test]
    fn non_ascii_bytes_are_latin1() {
        let mut s = scanner();
        assert_eq!(
            s.scan(b"GET /\xff HTTP/1.1\n", 4096, LinePolicy::Strict),
            LineScan::Complete { consumed: 16 }
        );
        assert_eq!(s.line().second, "/\u{ff}");

        let mut s = StartLineScanner::new([10, 8, 100]);
        s.scan(b"RTSP/1.0 200 Caf\xe9\r\n", 4096, LinePolicy::Lenient);
        assert_eq!(s.line().third, "Caf\u{e9}");
    }

    #[test]
    fn lenient_truncation_inside_multibyte_character() {
        // "é" (0xC3 0xA9) が行内オフセット 15 と 16 にまたがる
        let mut s = StartLineScanner::new([10, 8, 100]);
        let buf = "RTSP/1.0 200 XY\u{e9}\r\n".as_bytes();
        assert_eq!(
            s.scan(buf, 16, LinePolicy::Lenient),
            LineScan::Complete {
                consumed: buf.len()
            }
        );
        let line = s.line();
        assert_eq!(line.first, "RTSP/1.0");
        assert_eq!(line.second, "200");
        assert_eq!(line.third, "XY\u{c3}");
    }
}
