//! PBT テスト共通ユーティリティ

use proptest::prelude::*;

// ========================================
// トークン生成
// ========================================

/// トークン文字 (RFC 9110)
pub fn token_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        prop::char::range('0', '9'),
        Just('-'),
        Just('_'),
        Just('.'),
        Just('!'),
        Just('~'),
    ]
}

/// トークン (1 文字以上)
pub fn token_string(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(token_char(), 1..=max_len)
        .prop_map(|chars| chars.into_iter().collect())
}

// ========================================
// メッセージ要素の生成
// ========================================

pub fn http_method() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("GET".to_string()),
        Just("POST".to_string()),
        Just("PUT".to_string()),
        Just("DELETE".to_string()),
        Just("HEAD".to_string()),
        Just("OPTIONS".to_string()),
        Just("PATCH".to_string()),
        token_string(12),
    ]
}

pub fn http_uri() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("/".to_string()),
        Just("*".to_string()),
        "/[a-zA-Z0-9/_.?=&%-]{1,64}".prop_map(|s| s),
    ]
}

pub fn http_version() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("HTTP/1.0".to_string()),
        Just("HTTP/1.1".to_string()),
    ]
}

pub fn header_name() -> impl Strategy<Value = String> {
    token_string(24)
}

/// 前後に空白を持たないヘッダー値
pub fn header_value() -> impl Strategy<Value = String> {
    "[!-~]([ !-~]{0,40}[!-~])?".prop_map(|s| s)
}

pub fn headers() -> impl Strategy<Value = Vec<(String, String)>> {
    proptest::collection::vec((header_name(), header_value()), 0..8)
}

pub fn body() -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..512)
}

pub fn status_code() -> impl Strategy<Value = u32> {
    prop_oneof![200u32..=206, 300u32..=305, 400u32..=461, 500u32..=505]
}

pub fn reason_phrase() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("OK".to_string()),
        Just("Not Found".to_string()),
        Just("Session Not Found".to_string()),
        "[A-Za-z][A-Za-z ]{0,31}".prop_map(|s| s),
    ]
}

// ========================================
// メッセージの組み立て
// ========================================

/// ボディの転送方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    ContentLength,
    Chunked,
}

pub fn framing() -> impl Strategy<Value = Framing> {
    prop_oneof![Just(Framing::ContentLength), Just(Framing::Chunked)]
}

/// ヘッダー名がボディの長さ決定に関わるか
pub fn is_framing_header(name: &str) -> bool {
    name.eq_ignore_ascii_case("content-length") || name.eq_ignore_ascii_case("transfer-encoding")
}

/// リクエストをバイト列に組み立てる
pub fn build_request(
    method: &str,
    uri: &str,
    version: &str,
    headers: &[(String, String)],
    body: &[u8],
    framing: Framing,
) -> Vec<u8> {
    let mut out = format!("{method} {uri} {version}\r\n").into_bytes();
    for (name, value) in headers.iter().filter(|(name, _)| !is_framing_header(name)) {
        out.extend_from_slice(format!("{name}: {value}\r\n").as_bytes());
    }
    match framing {
        Framing::ContentLength => {
            out.extend_from_slice(format!("Content-Length: {}\r\n\r\n", body.len()).as_bytes());
            out.extend_from_slice(body);
        }
        Framing::Chunked => {
            out.extend_from_slice(b"Transfer-Encoding: chunked\r\n\r\n");
            for chunk in body.chunks(100) {
                out.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
                out.extend_from_slice(chunk);
                out.extend_from_slice(b"\r\n");
            }
            out.extend_from_slice(b"0\r\n\r\n");
        }
    }
    out
}
