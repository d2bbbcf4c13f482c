// Splitting the input never changes the output.

use lzwd::{decode_all, Decoder, DecoderConfig, Phase};

use crate::encoder::{encode, pseudo_random, sample_text};

fn decode_in_chunks(stream: &[u8], config: DecoderConfig, chunk: usize) -> Vec<u8> {
    let mut decoder = Decoder::new(config, Vec::new());
    for piece in stream.chunks(chunk) {
        assert_eq!(decoder.decode_chunk(piece).unwrap(), piece.len());
        assert_eq!(decoder.phase(), Phase::Exhausted);
    }
    decoder.finish().unwrap()
}

#[test]
fn one_byte_chunks_match_single_chunk() {
    let config = DecoderConfig::with_dict_bits(10).unwrap();
    let data = sample_text(30_000);
    let stream = encode(&data, config.capacity());
    let whole = decode_all(&stream, config).unwrap();
    assert_eq!(decode_in_chunks(&stream, config, 1), whole);
    assert_eq!(whole, data);
}

#[test]
fn odd_chunk_sizes_match() {
    let config = DecoderConfig::with_dict_bits(9).unwrap();
    let data = pseudo_random(20_000, 99);
    let stream = encode(&data, config.capacity());
    for chunk in [2, 3, 5, 7, 64, 1000, 4097] {
        assert_eq!(decode_in_chunks(&stream, config, chunk), data, "chunk {}", chunk);
    }
}

#[test]
fn empty_chunks_between_data_are_no_ops() {
    let config = DecoderConfig::default();
    let stream = encode(b"hello hello hello", config.capacity());
    let mut decoder = Decoder::new(config, Vec::new());
    for piece in stream.chunks(2) {
        assert_eq!(decoder.decode_chunk(&[]).unwrap(), 0);
        decoder.decode_chunk(piece).unwrap();
    }
    assert_eq!(decoder.finish().unwrap(), b"hello hello hello");
}
