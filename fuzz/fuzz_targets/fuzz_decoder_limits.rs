#![no_main]

use arbitrary::Arbitrary;
use bytes::BytesMut;
use http_object_decoder::{
    DecoderConfig, HttpObject, HttpRequestDecoder, MessageKind, ObjectDecoder,
    RtspResponseDecoder,
};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzConfig {
    max_initial_line_length: u16,
    max_header_size: u16,
    max_chunk_size: u16,
    validate_headers: bool,
    split_hint: u8,
    data: Vec<u8>,
}

fn build_config(input: &FuzzConfig) -> DecoderConfig {
    DecoderConfig {
        max_initial_line_length: input.max_initial_line_length as usize,
        max_header_size: input.max_header_size as usize,
        max_chunk_size: input.max_chunk_size as usize,
        validate_headers: input.validate_headers,
    }
}

fn exercise<K: MessageKind>(mut decoder: ObjectDecoder<K>, data: &[u8], split: usize) {
    let max_chunk_size = decoder.config().max_chunk_size;
    let mut buf = BytesMut::new();
    let mut out = Vec::new();
    for part in data.chunks(split) {
        buf.extend_from_slice(part);
        decoder.decode(&mut buf, &mut out);
    }
    decoder.decode_eof(&mut buf, &mut out);

    for obj in &out {
        if let HttpObject::Content(content) = obj {
            assert!(content.len() <= max_chunk_size);
        }
    }
}

fuzz_target!(|input: FuzzConfig| {
    let config = build_config(&input);
    let split = (input.split_hint as usize % 64) + 1;

    // 0 を含む設定は生成時に拒否される
    let Ok(request) = HttpRequestDecoder::with_config(config.clone()) else {
        assert!(config.validate().is_err());
        return;
    };
    exercise(request, &input.data, split);

    if let Ok(response) = RtspResponseDecoder::with_config(config) {
        exercise(response, &input.data, split);
    }
});
