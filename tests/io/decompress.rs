// File-level decoding: single files, batches, dictionaries, --rm, test mode.

use std::fs;
use std::io::{self, Cursor};

use lzwd::io::file_io::read_dictionary_file;
use lzwd::io::{
    decompress_filename, decompress_multiple_filenames, decompress_stream, Prefs, NUL_MARK,
};
use lzwd::DecoderConfig;
use tempfile::TempDir;

use crate::encoder::{encode, encode_with_table, sample_text};

fn write_encoded(dir: &TempDir, name: &str, data: &[u8], prefs: &Prefs) -> String {
    let path = dir.path().join(name);
    fs::write(&path, encode(data, prefs.decoder.capacity())).unwrap();
    path.to_str().unwrap().to_owned()
}

#[test]
fn file_round_trip_reports_stats() {
    let dir = TempDir::new().unwrap();
    let prefs = Prefs::default();
    let data = sample_text(30_000);
    let src = write_encoded(&dir, "text.lzw", &data, &prefs);
    let dst = dir.path().join("text");

    let stats = decompress_filename(&src, dst.to_str().unwrap(), &prefs).unwrap();
    assert_eq!(fs::read(&dst).unwrap(), data);
    assert_eq!(stats.decompressed_bytes, data.len() as u64);
    assert_eq!(stats.compressed_bytes, fs::metadata(&src).unwrap().len());
    assert!(stats.codes > 0);
}

#[test]
fn output_inherits_source_mtime() {
    let dir = TempDir::new().unwrap();
    let prefs = Prefs::default();
    let src = write_encoded(&dir, "old.lzw", b"stamp stamp stamp", &prefs);
    let stamp = filetime::FileTime::from_unix_time(1_000_000_000, 0);
    filetime::set_file_mtime(&src, stamp).unwrap();

    let dst = dir.path().join("old");
    decompress_filename(&src, dst.to_str().unwrap(), &prefs).unwrap();
    let meta = fs::metadata(&dst).unwrap();
    assert_eq!(filetime::FileTime::from_last_modification_time(&meta), stamp);
}

#[test]
fn small_dictionary_setting_is_honoured() {
    let dir = TempDir::new().unwrap();
    let mut prefs = Prefs::default();
    prefs.set_decoder_config(DecoderConfig::with_dict_bits(9).unwrap());
    prefs.set_chunk_size(7);
    let data = sample_text(20_000);
    let src = write_encoded(&dir, "small.lzw", &data, &prefs);
    let dst = dir.path().join("small");

    let stats = decompress_filename(&src, dst.to_str().unwrap(), &prefs).unwrap();
    assert!(stats.resets > 0);
    assert_eq!(fs::read(&dst).unwrap(), data);
}

#[test]
fn existing_output_is_kept_without_overwrite() {
    let dir = TempDir::new().unwrap();
    let mut prefs = Prefs::default();
    prefs.set_overwrite(false);
    let src = write_encoded(&dir, "keep.lzw", b"new contents", &prefs);
    let dst = dir.path().join("keep");
    fs::write(&dst, b"old").unwrap();

    let err = decompress_filename(&src, dst.to_str().unwrap(), &prefs).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&dst).unwrap(), b"old");
}

#[test]
fn test_mode_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut prefs = Prefs::default();
    prefs.set_test_mode(true);
    prefs.set_remove_src_file(true);
    let src = write_encoded(&dir, "check.lzw", b"checked only", &prefs);
    let dst = dir.path().join("check");

    decompress_filename(&src, dst.to_str().unwrap(), &prefs).unwrap();
    assert!(!dst.exists());
    assert!(fs::metadata(&src).is_ok(), "test mode never removes the source");
}

#[test]
fn rm_removes_source_after_success() {
    let dir = TempDir::new().unwrap();
    let mut prefs = Prefs::default();
    prefs.set_remove_src_file(true);
    let src = write_encoded(&dir, "gone.lzw", b"bye bye", &prefs);
    let dst = dir.path().join("gone");

    decompress_filename(&src, dst.to_str().unwrap(), &prefs).unwrap();
    assert_eq!(fs::read(&dst).unwrap(), b"bye bye");
    assert!(fs::metadata(&src).is_err());
}

#[test]
fn rm_keeps_source_on_failure() {
    let dir = TempDir::new().unwrap();
    let mut prefs = Prefs::default();
    prefs.set_remove_src_file(true);
    let src = dir.path().join("bad.lzw");
    fs::write(&src, [0x41, 0xFF, 0x80]).unwrap();

    let err =
        decompress_filename(src.to_str().unwrap(), NUL_MARK, &prefs).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    assert!(src.exists());
}

#[test]
fn saved_dictionary_decodes_fixed_width_stream() {
    let dir = TempDir::new().unwrap();
    let dict_path = dir.path().join("dict.bin");
    let dict = dict_path.to_str().unwrap();

    let mut learn = Prefs::default();
    learn.set_save_dictionary_filename(Some(dict));
    let training = sample_text(25_000);
    let src = write_encoded(&dir, "train.lzw", &training, &learn);
    decompress_filename(&src, NUL_MARK, &learn).unwrap();

    let snapshot = read_dictionary_file(dict).unwrap();
    assert!(snapshot.len() > 256);

    let message = sample_text(4_000);
    let packed = dir.path().join("message.lzw");
    fs::write(&packed, encode_with_table(&message, &snapshot, 17)).unwrap();

    let mut restore = Prefs::default();
    restore.set_dictionary_filename(Some(dict));
    let out = dir.path().join("message");
    decompress_filename(packed.to_str().unwrap(), out.to_str().unwrap(), &restore).unwrap();
    assert_eq!(fs::read(&out).unwrap(), message);
}

#[test]
fn missing_dictionary_is_an_error() {
    let dir = TempDir::new().unwrap();
    let mut prefs = Prefs::default();
    prefs.set_dictionary_filename(Some(dir.path().join("absent").to_str().unwrap()));
    let mut out = Vec::new();
    let err = decompress_stream(&mut Cursor::new(vec![0x41]), &mut out, &prefs).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn batch_decodes_matching_files_and_counts_failures() {
    let dir = TempDir::new().unwrap();
    let prefs = Prefs::default();
    let a = write_encoded(&dir, "a.lzw", b"first file", &prefs);
    let b = write_encoded(&dir, "b.lzw", b"second file", &prefs);
    let stats = decompress_multiple_filenames(&[&a, &b], ".lzw", &prefs).unwrap();
    assert_eq!(stats.decompressed_bytes, 21);
    assert_eq!(fs::read(dir.path().join("a")).unwrap(), b"first file");
    assert_eq!(fs::read(dir.path().join("b")).unwrap(), b"second file");

    let bad = dir.path().join("c.lzw");
    fs::write(&bad, [0x41, 0xFF, 0x80]).unwrap();
    let err = decompress_multiple_filenames(&[&a, bad.to_str().unwrap()], ".lzw", &prefs)
        .unwrap_err();
    assert!(err.to_string().contains("1 file(s) could not be decoded"));
}
