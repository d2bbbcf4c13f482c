// Source/destination opening and dictionary files.

use std::fs;
use std::io::{self, Read, Write};

use lzwd::io::file_io::{
    open_dst_file, open_src_file, read_dictionary_file, write_dictionary_file, NUL_MARK,
    STDIN_MARK, STDOUT_MARK,
};
use lzwd::io::Prefs;
use lzwd::DictionarySnapshot;
use tempfile::TempDir;

#[test]
fn sentinels_are_distinct() {
    assert_eq!(STDIN_MARK, "stdin");
    assert_eq!(STDOUT_MARK, "stdout");
    assert_ne!(NUL_MARK, STDOUT_MARK);
}

#[test]
fn directory_is_not_a_source() {
    let dir = TempDir::new().unwrap();
    let err = open_src_file(dir.path().to_str().unwrap()).err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}

#[test]
fn source_file_is_readable() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("in.lzw");
    fs::write(&path, b"abc").unwrap();
    let mut buf = Vec::new();
    open_src_file(path.to_str().unwrap())
        .unwrap()
        .read_to_end(&mut buf)
        .unwrap();
    assert_eq!(buf, b"abc");
}

#[test]
fn destination_is_truncated_when_overwriting() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out");
    fs::write(&path, b"a much longer previous content").unwrap();
    {
        let mut dst = open_dst_file(path.to_str().unwrap(), &Prefs::default()).unwrap();
        assert!(dst.is_file);
        dst.write_all(b"short").unwrap();
        dst.flush().unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"short");
}

#[test]
fn null_destination_swallows_output() {
    let mut dst = open_dst_file(NUL_MARK, &Prefs::default()).unwrap();
    assert!(!dst.is_file);
    dst.write_all(b"discarded").unwrap();
}

#[test]
fn dictionary_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dict.bin");
    let mut snapshot = DictionarySnapshot::literals();
    snapshot.push(Some(b'a' as u32), b'b');
    write_dictionary_file(path.to_str().unwrap(), &snapshot).unwrap();
    assert_eq!(fs::metadata(&path).unwrap().len(), 4 + 9 * 257);
    assert_eq!(read_dictionary_file(path.to_str().unwrap()).unwrap(), snapshot);
}

#[test]
fn corrupt_dictionary_file_is_invalid_data() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dict.bin");
    fs::write(&path, 5i32.to_le_bytes()).unwrap();
    let err = read_dictionary_file(path.to_str().unwrap()).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}
