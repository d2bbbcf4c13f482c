// Round trips through the reference encoder across inputs and capacities.

use lzwd::{decode_all, Decoder, DecoderConfig, Phase};

use crate::encoder::{encode, encode_traced, pseudo_random, sample_text};

fn roundtrip(data: &[u8], dict_bits: u32) {
    let config = DecoderConfig::with_dict_bits(dict_bits).unwrap();
    let stream = encode(data, config.capacity());
    let decoded = decode_all(&stream, config).unwrap();
    assert_eq!(decoded.len(), data.len(), "length mismatch at {} bits", dict_bits);
    assert!(decoded == data, "content mismatch at {} bits", dict_bits);
}

#[test]
fn empty_input_decodes_to_nothing() {
    assert!(encode(b"", 1 << 18).is_empty());
    assert!(decode_all(&[], DecoderConfig::default()).unwrap().is_empty());
}

#[test]
fn single_byte() {
    roundtrip(b"x", 18);
}

#[test]
fn text() {
    for bits in [9, 12, 18] {
        roundtrip(&sample_text(50_000), bits);
    }
}

#[test]
fn binary_noise() {
    for bits in [9, 10, 16] {
        roundtrip(&pseudo_random(40_000, 7), bits);
    }
}

#[test]
fn long_single_byte_run() {
    roundtrip(&vec![0u8; 100_000], 18);
    roundtrip(&vec![0xFFu8; 100_000], 9);
}

#[test]
fn every_byte_value() {
    let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    roundtrip(&data, 12);
}

#[test]
fn aaaa_grows_dictionary_by_two() {
    let traced = encode_traced(b"AAAA", 1 << 18);
    assert_eq!(traced.codes, vec![0x41, 0x100, 0x41]);
    assert_eq!(traced.bytes, vec![0x41, 0x80, 0x10, 0x40]);

    let mut decoder = Decoder::new(DecoderConfig::default(), Vec::new());
    decoder.decode_chunk(&traced.bytes).unwrap();
    assert_eq!(decoder.max_code(), 257);
    assert_eq!(decoder.stats().codes, 3);
    assert_eq!(decoder.phase(), Phase::Exhausted);
    assert_eq!(decoder.finish().unwrap(), b"AAAA");
}

#[test]
fn decoded_code_count_matches_encoder() {
    let data = sample_text(20_000);
    let traced = encode_traced(&data, 1 << 12);
    let mut decoder =
        Decoder::new(DecoderConfig::with_dict_bits(12).unwrap(), Vec::new());
    decoder.decode_chunk(&traced.bytes).unwrap();
    assert_eq!(decoder.stats().codes, traced.codes.len() as u64);
    assert_eq!(decoder.stats().bytes_out, data.len() as u64);
}
