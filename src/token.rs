//! トークン文法 (RFC 9110) の判定

/// トークン文字か確認
pub(crate) fn is_token_char(b: u8) -> bool {
    matches!(
        b,
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'.' |
        b'0'..=b'9' | b'A'..=b'Z' | b'^' | b'_' | b'`' | b'a'..=b'z' | b'|' | b'~'
    )
}

/// トークンとして有効か確認
pub(crate) fn is_token(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_token_char)
}

/// ヘッダー値に許可される文字か確認 (RFC 9110 Section 5.5)
///
/// VCHAR と obs-text に加えて SP と HTAB を許可する
pub(crate) fn is_field_value_char(b: u8) -> bool {
    matches!(b, 0x09 | 0x20..=0x7E | 0x80..=0xFF)
}

/// ヘッダー値が有効か確認
pub(crate) fn is_field_value(s: &str) -> bool {
    s.bytes().all(is_field_value_char)
}

/// スタートライン前に読み飛ばすバイトか確認
///
/// ISO-8859-1 の制御文字 (C0, DEL, C1) と SP
pub(crate) fn is_control_or_whitespace(b: u8) -> bool {
    matches!(b, 0x00..=0x20 | 0x7F..=0x9F)
}

/// バイト列を 1 バイト 1 文字 (ISO-8859-1) として追加
pub(crate) fn push_latin1(out: &mut String, bytes: &[u8]) {
    out.extend(bytes.iter().map(|&b| char::from(b)));
}
