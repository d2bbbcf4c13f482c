// Width growth and dictionary overflow resets.

use lzwd::{Decoder, DecoderConfig, LzwError, Phase};

use crate::encoder::{encode_traced, pseudo_random, BitWriter};

#[test]
fn width_grows_at_power_of_two_boundaries() {
    let config = DecoderConfig::with_dict_bits(12).unwrap();
    let mut decoder = Decoder::new(config, Vec::new());
    assert_eq!(decoder.code_width(), 8);

    // Literal codes only: each one after the first adds an entry.
    decoder.push_code(b'a' as u32).unwrap();
    assert_eq!(decoder.code_width(), 9);
    assert_eq!(decoder.max_code(), 255);

    let mut pushed = 1u32;
    while decoder.max_code() < 511 {
        decoder.push_code((pushed % 256) as u32).unwrap();
        pushed += 1;
        if decoder.max_code() < 510 {
            assert_eq!(decoder.code_width(), 9, "max_code {}", decoder.max_code());
        }
    }
    assert_eq!(decoder.code_width(), 10);
}

#[test]
fn width_stops_at_24_bits_until_the_reset() {
    let config = DecoderConfig::with_dict_bits(24).unwrap();
    let mut decoder = Decoder::new(config, Vec::new());
    let mut widest = decoder.code_width();
    let mut pushed = 0u64;

    while decoder.stats().resets == 0 {
        decoder.push_code((pushed % 256) as u32).unwrap();
        pushed += 1;
        if decoder.stats().resets == 0 {
            let width = decoder.code_width();
            assert!(width <= 24, "width {} at max_code {:#x}", width, decoder.max_code());
            widest = widest.max(width);
        }
        if pushed % 65_536 == 0 {
            decoder.sink_mut().clear();
        }
    }

    assert_eq!(widest, 24);
    // 2^24 - 256 adds, one per code after the first.
    assert_eq!(pushed, (1 << 24) - 255);
    assert_eq!(decoder.code_width(), 8);
    assert_eq!(decoder.max_code(), 255);
    assert_eq!(decoder.phase(), Phase::AwaitingFirstCode);
}

#[test]
fn reset_restores_literal_state() {
    let capacity = 1u32 << 9;
    let data = pseudo_random(5_000, 3);
    let traced = encode_traced(&data, capacity);
    assert!(traced.resets >= 2);

    let mut decoder = Decoder::new(DecoderConfig::with_capacity(capacity).unwrap(), Vec::new());
    decoder.decode_chunk(&traced.bytes).unwrap();
    assert_eq!(decoder.stats().resets, traced.resets);
    assert_eq!(decoder.finish().unwrap(), data);
}

#[test]
fn code_above_literals_after_reset_is_invalid() {
    // Capacity 258: the dictionary fills after three codes.
    let config = DecoderConfig::with_capacity(258).unwrap();
    let mut decoder = Decoder::new(config, Vec::new());
    for code in [b'x', b'y', b'z'] {
        decoder.push_code(code as u32).unwrap();
    }
    assert_eq!(decoder.phase(), Phase::AwaitingFirstCode);
    assert_eq!(decoder.code_width(), 8);
    assert_eq!(decoder.max_code(), 255);

    let err = decoder.push_code(256).unwrap_err();
    assert_eq!(err, LzwError::InvalidCode { code: 256, max_code: 255 });
}

#[test]
fn stream_with_reset_in_middle_of_chunk() {
    // Capacity 257: a reset after every second code.
    let capacity = 257;
    let traced = encode_traced(b"abcdefgh", capacity);
    assert_eq!(traced.codes.len(), 8);
    assert_eq!(traced.resets, 4);

    let mut decoder = Decoder::new(DecoderConfig::with_capacity(capacity).unwrap(), Vec::new());
    decoder.decode_chunk(&traced.bytes).unwrap();
    assert_eq!(decoder.stats().resets, 4);
    assert_eq!(decoder.finish().unwrap(), b"abcdefgh");
}

#[test]
fn hand_built_reset_stream() {
    // Capacity 258: "ab" at 8+9 bits, then 256 at 9 bits fills the table,
    // then "c" starts over at 8 bits.
    let mut w = BitWriter::default();
    w.put(b'a' as u32, 8);
    w.put(b'b' as u32, 9);
    w.put(256, 9);
    w.put(b'c' as u32, 8);
    let stream = w.finish();

    let mut decoder = Decoder::new(DecoderConfig::with_capacity(258).unwrap(), Vec::new());
    decoder.decode_chunk(&stream).unwrap();
    assert_eq!(decoder.stats().resets, 1);
    assert_eq!(decoder.finish().unwrap(), b"ababc");
}
