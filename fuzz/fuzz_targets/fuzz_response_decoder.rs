#![no_main]

use bytes::BytesMut;
use http_object_decoder::{HttpObject, ResponseHead, RtspResponseDecoder};
use libfuzzer_sys::fuzz_target;

fn decode(data: &[u8], split: usize) -> Vec<HttpObject<ResponseHead>> {
    let mut decoder = RtspResponseDecoder::new();
    let mut buf = BytesMut::new();
    let mut out = Vec::new();
    for part in data.chunks(split) {
        buf.extend_from_slice(part);
        decoder.decode(&mut buf, &mut out);
    }
    decoder.decode_eof(&mut buf, &mut out);
    out
}

fuzz_target!(|data: &[u8]| {
    let expected = decode(data, data.len().max(1));
    assert_eq!(decode(data, 23), expected);

    // 既定の max_chunk_size を超えるチャンクは拒否される
    for obj in &expected {
        if let HttpObject::Content(content) = obj {
            assert!(content.len() <= 8192);
        }
    }
});
