//! ボディデコードのテスト
//!
//! 不完全なボディ (接続切断シナリオ) が正しく検出されることを確認する。
//!
//! デコーダーはデータが足りない間は何も出力しないため、接続が切れたことは
//! アプリケーションが `decode_eof` を呼んで初めて分かる。
//! 途中で切れたメッセージは `LastContent` ではなく不正オブジェクトで終わる。
//! reverse proxy のようなアプリケーションは、`LastContent` を受け取るまで
//! メッセージを完了として扱ってはならない。

use bytes::{BufMut, BytesMut};
use http_object_decoder::{
    DecodeError, HttpHead, HttpObject, HttpRequestDecoder, RequestHead, RtspResponseDecoder,
};

fn body_of<H>(objects: &[HttpObject<H>]) -> Vec<u8> {
    let mut body = Vec::new();
    for obj in objects {
        match obj {
            HttpObject::Content(content) => body.put_slice(content),
            HttpObject::LastContent(last) => body.put_slice(&last.content),
            _ => {}
        }
    }
    body
}

/// 不完全な Content-Length リクエストボディのテスト
///
/// クライアントが途中で切断した場合、LastContent に到達しないことを確認する。
#[test]
fn incomplete_content_length_body() {
    let mut decoder = HttpRequestDecoder::new();
    let mut buf = BytesMut::new();
    buf.put_slice(b"POST / HTTP/1.1\r\nHost: example.com\r\nContent-Length: 100\r\n\r\n");
    buf.put_slice(&[0u8; 50]); // 100 バイト中 50 バイトのみ

    let mut out = Vec::new();
    decoder.decode(&mut buf, &mut out);
    assert_eq!(out.len(), 1);
    let HttpObject::Message(head) = &out[0] else {
        panic!("unexpected {:?}", out[0]);
    };
    assert_eq!(head.content_length(), Ok(Some(100)));
    // 1 セグメントに収まるボディは揃うまで出力されない
    assert_eq!(buf.len(), 50);

    decoder.decode_eof(&mut buf, &mut out);
    assert!(!out.iter().any(|obj| obj.is_last()));
    assert_eq!(
        out.last(),
        Some(&HttpObject::InvalidContent(DecodeError::UnexpectedEof))
    );
}

/// 不完全な Chunked リクエストボディのテスト
///
/// 終端チャンクの前に切断した場合、受信済みのチャンクは出力されるが LastContent には到達しない。
#[test]
fn incomplete_chunked_body() {
    let mut decoder = HttpRequestDecoder::new();
    let mut buf = BytesMut::from(
        &b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n"[..],
    );
    let mut out = Vec::new();
    decoder.decode(&mut buf, &mut out);
    assert_eq!(body_of(&out), b"hello");
    assert!(!out.iter().any(|obj| obj.is_last()));

    decoder.decode_eof(&mut buf, &mut out);
    assert_eq!(
        out.last(),
        Some(&HttpObject::InvalidContent(DecodeError::UnexpectedEof))
    );
}

/// 不完全なトレーラーのテスト
#[test]
fn incomplete_trailers() {
    let mut decoder = HttpRequestDecoder::new();
    let mut buf = BytesMut::from(
        &b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n0\r\nX-Sum: 1\r\n"[..],
    );
    let mut out = Vec::new();
    decoder.decode_eof(&mut buf, &mut out);
    assert_eq!(out.len(), 2);
    assert_eq!(
        out[1],
        HttpObject::InvalidContent(DecodeError::UnexpectedEof)
    );
}

/// 完全な Content-Length リクエストボディのテスト (正常系)
#[test]
fn complete_content_length_body() {
    let mut decoder = HttpRequestDecoder::new();
    let mut buf =
        BytesMut::from(&b"POST / HTTP/1.1\r\nHost: example.com\r\nContent-Length: 5\r\n\r\nhello"[..]);
    let mut out = Vec::new();
    decoder.decode(&mut buf, &mut out);
    assert!(out.last().is_some_and(|obj| obj.is_last()));
    assert_eq!(body_of(&out), b"hello");

    // 完了後の EOF では何も出力しない
    let before = out.len();
    decoder.decode_eof(&mut buf, &mut out);
    assert_eq!(out.len(), before);
}

/// 完全な Chunked リクエストボディのテスト (正常系)
#[test]
fn complete_chunked_body() {
    let mut decoder = HttpRequestDecoder::new();
    let mut buf = BytesMut::from(
        &b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n5\r\nhello\r\n0\r\n\r\n"[..],
    );
    let mut out = Vec::new();
    decoder.decode(&mut buf, &mut out);
    assert!(out.last().is_some_and(|obj| obj.is_last()));
    assert_eq!(body_of(&out), b"hello");
}

/// 大きなボディは max_chunk_size ごとに分割される
#[test]
fn large_body_is_delivered_in_segments() {
    let mut decoder = HttpRequestDecoder::new();
    let mut buf = BytesMut::new();
    buf.put_slice(b"PUT / HTTP/1.1\r\nContent-Length: 30000\r\n\r\n");
    let payload: Vec<u8> = (0..30000u32).map(|i| (i % 251) as u8).collect();
    buf.put_slice(&payload);

    let mut out = Vec::new();
    decoder.decode(&mut buf, &mut out);
    for obj in &out[1..out.len() - 1] {
        let HttpObject::Content(content) = obj else {
            panic!("unexpected {obj:?}");
        };
        assert_eq!(content.len(), 8192);
    }
    assert_eq!(body_of(&out), payload);
}

/// RTSP レスポンスの途中切断
#[test]
fn incomplete_rtsp_body() {
    let mut decoder = RtspResponseDecoder::new();
    let mut buf = BytesMut::from(&b"RTSP/1.0 200 OK\r\nContent-Length: 10\r\n\r\nv=0"[..]);
    let mut out = Vec::new();
    decoder.decode_eof(&mut buf, &mut out);
    assert!(matches!(&out[0], HttpObject::Message(head) if head.status_code() == 200));
    assert_eq!(
        out[1],
        HttpObject::InvalidContent(DecodeError::UnexpectedEof)
    );
}

/// ヘッダーの途中切断は途中まで構築したヘッダーとともに報告される
#[test]
fn incomplete_headers() {
    let mut decoder = HttpRequestDecoder::new();
    let mut buf = BytesMut::from(&b"GET /partial HTTP/1.1\r\nHost: a\r\nAcc"[..]);
    let mut out: Vec<HttpObject<RequestHead>> = Vec::new();
    decoder.decode_eof(&mut buf, &mut out);
    let [HttpObject::InvalidMessage { head, cause }] = &out[..] else {
        panic!("unexpected {out:?}");
    };
    assert_eq!(head.uri, "/partial");
    assert_eq!(head.headers.get("host"), Some("a"));
    assert_eq!(cause, &DecodeError::UnexpectedEof);
}
