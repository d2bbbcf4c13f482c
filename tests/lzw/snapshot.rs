// Saving a learned dictionary and decoding against it.

use lzwd::file::decode_all_with;
use lzwd::{Decoder, DecoderConfig, DictionarySnapshot, LzwError, SnapshotError, NO_CODE};

use crate::encoder::{encode, encode_with_table, sample_text};

fn learned_snapshot(data: &[u8]) -> DictionarySnapshot {
    let config = DecoderConfig::default();
    let mut decoder = Decoder::new(config, Vec::new());
    decoder.decode_chunk(&encode(data, config.capacity())).unwrap();
    let snapshot = decoder.snapshot();
    assert_eq!(snapshot.len(), decoder.max_code() as usize + 1);
    snapshot
}

#[test]
fn restored_decoder_resolves_learned_strings() {
    let training = sample_text(40_000);
    let snapshot = learned_snapshot(&training);

    let message = sample_text(5_000);
    let stream = encode_with_table(&message, &snapshot, 17);
    let config = DecoderConfig::default();
    let mut decoder = Decoder::restore(config, &snapshot, Vec::new()).unwrap();
    let before = decoder.max_code();
    decoder.decode_chunk(&stream).unwrap();

    assert!(decoder.is_restored());
    assert_eq!(decoder.code_width(), 17);
    assert_eq!(decoder.max_code(), before, "restored decoders never learn");
    assert_eq!(decoder.finish().unwrap(), message);
}

#[test]
fn snapshot_survives_serialisation() {
    let snapshot = learned_snapshot(b"to be or not to be, that is the question");
    let bytes = snapshot.to_bytes();
    assert_eq!(bytes.len(), 4 + 9 * snapshot.len());
    assert_eq!(DictionarySnapshot::parse(&bytes).unwrap(), snapshot);
    assert_eq!(
        DictionarySnapshot::read_from(&bytes[..]).unwrap(),
        snapshot
    );
}

#[test]
fn restore_width_is_configurable() {
    let mut snapshot = DictionarySnapshot::literals();
    snapshot.push(Some(b'o' as u32), b'k');
    let config = DecoderConfig::default().restore_code_width(12).unwrap();
    let stream = encode_with_table(b"okok!", &snapshot, 12);
    assert_eq!(decode_all_with(&stream, config, &snapshot).unwrap(), b"okok!");
}

#[test]
fn restored_decoder_rejects_codes_past_table() {
    let snapshot = DictionarySnapshot::literals();
    let config = DecoderConfig::default().restore_code_width(9).unwrap();
    let mut decoder = Decoder::restore(config, &snapshot, Vec::new()).unwrap();
    decoder.push_code(b'h' as u32).unwrap();
    assert_eq!(
        decoder.push_code(256),
        Err(LzwError::InvalidCode { code: 256, max_code: 255 })
    );
}

#[test]
fn oversized_table_is_refused() {
    let mut snapshot = DictionarySnapshot::literals();
    for i in 0..300u32 {
        snapshot.push(Some(i % 256), b'x');
    }
    let config = DecoderConfig::with_dict_bits(9).unwrap();
    assert_eq!(
        Decoder::restore(config, &snapshot, Vec::new()).unwrap_err(),
        SnapshotError::TooLarge { count: 556, capacity: 512 }
    );
}

#[test]
fn malformed_tables_are_rejected() {
    assert!(matches!(
        DictionarySnapshot::parse(&[1, 0]),
        Err(SnapshotError::Truncated { expected: 4, actual: 2 })
    ));
    assert_eq!(
        DictionarySnapshot::parse(&(-1i32).to_le_bytes()),
        Err(SnapshotError::NegativeCount(-1))
    );

    // Two records declared, one present.
    let mut short = 2i32.to_le_bytes().to_vec();
    short.extend_from_slice(&NO_CODE.to_le_bytes());
    short.extend_from_slice(&NO_CODE.to_le_bytes());
    short.push(b'a');
    assert!(matches!(
        DictionarySnapshot::parse(&short),
        Err(SnapshotError::Truncated { .. })
    ));

    // One record whose prefix points at itself+1.
    let mut bad = 1i32.to_le_bytes().to_vec();
    bad.extend_from_slice(&1u32.to_le_bytes());
    bad.extend_from_slice(&NO_CODE.to_le_bytes());
    bad.push(b'a');
    assert_eq!(
        DictionarySnapshot::parse(&bad),
        Err(SnapshotError::BadPrefix { index: 0, prefix: 1 })
    );
}

#[test]
fn trailing_bytes_after_records_are_ignored() {
    let snapshot = DictionarySnapshot::literals();
    let mut bytes = snapshot.to_bytes();
    bytes.extend_from_slice(b"junk");
    assert_eq!(DictionarySnapshot::parse(&bytes).unwrap(), snapshot);
}
