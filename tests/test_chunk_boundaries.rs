//! 入力の分割位置によらず同じオブジェクト列が出力されることのテスト

use bytes::BytesMut;
use http_object_decoder::{
    DecoderConfig, HttpObject, HttpRequestDecoder, MessageKind, ObjectDecoder, RtspResponseDecoder,
};
use rstest::rstest;

const REQUESTS: &[u8] = b"\r\nGET /a HTTP/1.1\r\nHost: x\r\nX-Folded: a\r\n b\r\n\r\n\
POST /b HTTP/1.1\r\nContent-Length: 11\r\n\r\nhello world\
PUT /c HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n4;x=y\r\nwiki\r\n5\r\npedia\r\n0\r\nX-Sum: 9\r\n\r\n\
GET /d\r\n\
GET /e HTTP/1.0\r\n\r\n";

const RESPONSES: &[u8] = b"RTSP/1.0 200 OK\r\nCSeq: 1\r\nContent-Length: 5\r\n\r\nv=0\r\n\
RTSP/1.0 OK OK\r\n\
RTSP/1.0 401 Unauthorized\r\nCSeq: 2\r\nWWW-Authenticate: Basic realm=\"x\"\r\n\r\n";

fn decode_split<K: MessageKind>(
    mut decoder: ObjectDecoder<K>,
    input: &[u8],
    split: usize,
) -> Vec<HttpObject<K::Head>> {
    let mut buf = BytesMut::new();
    let mut out = Vec::new();
    for part in input.chunks(split) {
        buf.extend_from_slice(part);
        decoder.decode(&mut buf, &mut out);
    }
    decoder.decode_eof(&mut buf, &mut out);
    out
}

fn small_segments() -> DecoderConfig {
    DecoderConfig {
        max_chunk_size: 3,
        max_initial_line_length: 24,
        ..DecoderConfig::default()
    }
}

#[rstest]
#[case::default_config(DecoderConfig::default())]
#[case::small_segments(small_segments())]
fn requests_are_split_invariant(#[case] config: DecoderConfig) {
    let decoder = || HttpRequestDecoder::with_config(config.clone()).unwrap();
    let expected = decode_split(decoder(), REQUESTS, REQUESTS.len());
    assert_eq!(expected.iter().filter(|obj| obj.is_last()).count(), 4);
    assert_eq!(expected.iter().filter(|obj| obj.is_invalid()).count(), 1);

    for split in 1..REQUESTS.len() {
        assert_eq!(
            decode_split(decoder(), REQUESTS, split),
            expected,
            "split every {split} bytes"
        );
    }
}

fn short_lines() -> DecoderConfig {
    DecoderConfig {
        max_initial_line_length: 24,
        ..DecoderConfig::default()
    }
}

#[rstest]
#[case::default_config(DecoderConfig::default())]
#[case::short_lines(short_lines())]
fn responses_are_split_invariant(#[case] config: DecoderConfig) {
    let decoder = || RtspResponseDecoder::with_config(config.clone()).unwrap();
    let expected = decode_split(decoder(), RESPONSES, RESPONSES.len());
    assert_eq!(expected.iter().filter(|obj| obj.head().is_some()).count(), 3);

    for split in 1..RESPONSES.len() {
        assert_eq!(
            decode_split(decoder(), RESPONSES, split),
            expected,
            "split every {split} bytes"
        );
    }
}

#[rstest]
fn oversized_line_is_split_invariant() {
    let mut input = vec![b'G'; 100];
    input.extend_from_slice(b" / HTTP/1.1\r\nGET / HTTP/1.1\r\n\r\n");
    let decoder = || {
        HttpRequestDecoder::with_config(DecoderConfig {
            max_initial_line_length: 10,
            ..DecoderConfig::default()
        })
        .unwrap()
    };
    let expected = decode_split(decoder(), &input, input.len());
    assert_eq!(expected.len(), 3);
    for split in 1..input.len() {
        assert_eq!(decode_split(decoder(), &input, split), expected);
    }
}
