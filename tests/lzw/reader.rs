// `LzwReader`: the decoder behind `std::io::Read`.

use std::io::{self, Read};

use lzwd::{DecoderConfig, DictionarySnapshot, LzwReader};

use crate::encoder::{encode, encode_with_table, pseudo_random, sample_text};

#[test]
fn reader_matches_one_shot_decode() {
    let data = sample_text(70_000);
    let stream = encode(&data, 1 << 18);
    let mut out = Vec::new();
    LzwReader::new(&stream[..], DecoderConfig::default())
        .read_to_end(&mut out)
        .unwrap();
    assert_eq!(out, data);
}

#[test]
fn reader_with_small_chunks_and_small_reads() {
    let config = DecoderConfig::with_dict_bits(9).unwrap();
    let data = pseudo_random(3_000, 11);
    let stream = encode(&data, config.capacity());
    let mut reader = LzwReader::new(&stream[..], config).with_chunk_size(3);

    let mut out = Vec::new();
    let mut buf = [0u8; 5];
    loop {
        let n = reader.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        out.extend_from_slice(&buf[..n]);
    }
    assert_eq!(out, data);
    assert_eq!(reader.decoder().stats().bytes_out, data.len() as u64);
}

#[test]
fn reader_reports_corruption_as_invalid_data() {
    // "A", then code 0x1FF at 9 bits: far past the dictionary.
    let stream = [0x41, 0xFF, 0x80];
    let mut out = Vec::new();
    let err = LzwReader::new(&stream[..], DecoderConfig::default())
        .read_to_end(&mut out)
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert_eq!(out, b"A");
}

#[test]
fn reader_over_restored_dictionary() {
    let mut snapshot = DictionarySnapshot::literals();
    snapshot.push(Some(b'l' as u32), b'z');
    snapshot.push(Some(256), b'w');
    let stream = encode_with_table(b"lzw lzw", &snapshot, 17);

    let mut out = String::new();
    LzwReader::with_snapshot(&stream[..], DecoderConfig::default(), &snapshot)
        .unwrap()
        .read_to_string(&mut out)
        .unwrap();
    assert_eq!(out, "lzw lzw");
}
