#![no_main]

use bytes::BytesMut;
use http_object_decoder::{DecodePhase, HttpObject, HttpRequestDecoder, RequestHead};
use libfuzzer_sys::fuzz_target;

fn decode(data: &[u8], split: usize) -> Vec<HttpObject<RequestHead>> {
    let mut decoder = HttpRequestDecoder::new();
    let mut buf = BytesMut::new();
    let mut out = Vec::new();
    for part in data.chunks(split) {
        buf.extend_from_slice(part);
        decoder.decode(&mut buf, &mut out);
    }
    decoder.decode_eof(&mut buf, &mut out);
    assert!(buf.is_empty());
    assert_eq!(decoder.phase(), DecodePhase::SkipControlCharacters);
    out
}

fuzz_target!(|data: &[u8]| {
    // 一括で渡した場合と分割して渡した場合で出力が一致する
    let expected = decode(data, data.len().max(1));
    assert_eq!(decode(data, 17), expected);
    assert_eq!(decode(data, 1), expected);

    for obj in &expected {
        if let HttpObject::Content(content) = obj {
            assert!(!content.is_empty() && content.len() <= 8192);
        }
    }
});
