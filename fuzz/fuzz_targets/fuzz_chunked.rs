#![no_main]

use arbitrary::Arbitrary;
use bytes::BytesMut;
use http_object_decoder::{HttpObject, HttpRequestDecoder, RtspResponseDecoder};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzChunked {
    chunks: Vec<Vec<u8>>,
    extension: bool,
    split_hint: u8,
}

fn normalize_chunks(mut chunks: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
    chunks.retain(|chunk| !chunk.is_empty());
    chunks.truncate(64);
    chunks
}

fn encode_chunks(chunks: &[Vec<u8>], extension: bool) -> Vec<u8> {
    let mut body = Vec::new();
    for chunk in chunks {
        let ext = if extension { ";name=value" } else { "" };
        body.extend_from_slice(format!("{:x}{ext}\r\n", chunk.len()).as_bytes());
        body.extend_from_slice(chunk);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(b"0\r\n\r\n");
    body
}

fn collect_body<H>(out: &[HttpObject<H>]) -> Option<Vec<u8>> {
    let mut body = Vec::new();
    for obj in out {
        match obj {
            HttpObject::Content(content) => body.extend_from_slice(content),
            HttpObject::LastContent(last) => {
                body.extend_from_slice(&last.content);
                return Some(body);
            }
            HttpObject::InvalidMessage { .. } | HttpObject::InvalidContent(_) => return None,
            HttpObject::Message(_) => {}
        }
    }
    None
}

fuzz_target!(|input: FuzzChunked| {
    let chunks = normalize_chunks(input.chunks);
    let expected: Vec<u8> = chunks.concat();
    let split = (input.split_hint as usize % 32) + 1;
    let encoded = encode_chunks(&chunks, input.extension);

    let mut request = b"POST / HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n".to_vec();
    request.extend_from_slice(&encoded);
    let mut decoder = HttpRequestDecoder::new();
    let mut buf = BytesMut::new();
    let mut out = Vec::new();
    for part in request.chunks(split) {
        buf.extend_from_slice(part);
        decoder.decode(&mut buf, &mut out);
    }
    assert_eq!(collect_body(&out), Some(expected.clone()));

    // RTSP は max_chunk_size を超えるチャンクを拒否するので、受理された場合のみ比較する
    let mut response = b"RTSP/1.0 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n".to_vec();
    response.extend_from_slice(&encoded);
    let mut decoder = RtspResponseDecoder::new();
    let mut buf = BytesMut::new();
    let mut out = Vec::new();
    for part in response.chunks(split) {
        buf.extend_from_slice(part);
        decoder.decode(&mut buf, &mut out);
    }
    if let Some(body) = collect_body(&out) {
        assert_eq!(body, expected);
    }
});
