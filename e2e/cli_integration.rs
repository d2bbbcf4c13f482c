// CLI integration tests: the `unlzw` binary driven through std::process::Command.
//
// Covers output-name derivation, stdout/stdin plumbing, test mode, overwrite
// refusal, multiple and recursive inputs, dictionary save/restore, and exit
// codes on corrupt input.

#[path = "../tests/support/encoder.rs"]
mod encoder;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

use encoder::{encode, encode_with_table, sample_text};

fn unlzw_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_unlzw") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("unlzw");
    p
}

fn unlzw(dir: &Path, args: &[&str]) -> Output {
    Command::new(unlzw_bin())
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .expect("failed to run unlzw")
}

/// Write `data` encoded for the default 2^18-entry dictionary.
fn write_lzw(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, encode(data, 1 << 18)).unwrap();
    path
}

fn stderr_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

// ── 1. Output name derivation ────────────────────────────────────────────────

#[test]
fn test_cli_strips_suffix_for_output_name() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(20_000);
    write_lzw(dir.path(), "notes.txt.lzw", &data);

    let out = unlzw(dir.path(), &["notes.txt.lzw"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(fs::read(dir.path().join("notes.txt")).unwrap(), data);
}

#[test]
fn test_cli_explicit_output_name() {
    let dir = TempDir::new().unwrap();
    write_lzw(dir.path(), "in.lzw", b"explicit destination");

    let out = unlzw(dir.path(), &["in.lzw", "result.bin"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(
        fs::read(dir.path().join("result.bin")).unwrap(),
        b"explicit destination"
    );
}

#[test]
fn test_cli_refuses_input_without_suffix() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("data.bin"), encode(b"x", 1 << 18)).unwrap();

    let out = unlzw(dir.path(), &["data.bin"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("Cannot determine an output filename"));
}

// ── 2. stdout / stdin ────────────────────────────────────────────────────────

#[test]
fn test_cli_stdout_flag() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(5_000);
    write_lzw(dir.path(), "page.lzw", &data);

    let out = unlzw(dir.path(), &["-c", "page.lzw"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(out.stdout, data);
    assert!(!dir.path().join("page").exists());
}

#[test]
fn test_cli_stdin_to_stdout() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(8_000);
    let mut child = Command::new(unlzw_bin())
        .current_dir(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    {
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(&encode(&data, 1 << 18)).unwrap();
    }
    let out = child.wait_with_output().unwrap();
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(out.stdout, data);
}

// ── 3. Test mode ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_test_mode_writes_nothing() {
    let dir = TempDir::new().unwrap();
    write_lzw(dir.path(), "check.lzw", b"integrity only");

    let out = unlzw(dir.path(), &["-t", "check.lzw"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert!(!dir.path().join("check").exists());
    assert!(out.stdout.is_empty());
}

#[test]
fn test_cli_test_mode_flags_corruption() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.lzw"), [0x41, 0xFF, 0x80]).unwrap();

    let out = unlzw(dir.path(), &["-t", "bad.lzw"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("ERROR_invalid_code"));
}

// ── 4. Overwrite handling ────────────────────────────────────────────────────

#[test]
fn test_cli_existing_output_not_overwritten_without_force() {
    let dir = TempDir::new().unwrap();
    write_lzw(dir.path(), "doc.lzw", b"fresh");
    fs::write(dir.path().join("doc"), b"stale").unwrap();

    let out = unlzw(dir.path(), &["doc.lzw"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(fs::read(dir.path().join("doc")).unwrap(), b"stale");

    let out = unlzw(dir.path(), &["-f", "doc.lzw"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(fs::read(dir.path().join("doc")).unwrap(), b"fresh");
}

#[test]
fn test_cli_rm_removes_source() {
    let dir = TempDir::new().unwrap();
    let src = write_lzw(dir.path(), "once.lzw", b"read once");

    let out = unlzw(dir.path(), &["--rm", "once.lzw"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert!(!src.exists());
    assert_eq!(fs::read(dir.path().join("once")).unwrap(), b"read once");
}

// ── 5. Multiple / recursive inputs ───────────────────────────────────────────

#[test]
fn test_cli_multiple_inputs() {
    let dir = TempDir::new().unwrap();
    write_lzw(dir.path(), "a.lzw", b"alpha");
    write_lzw(dir.path(), "b.lzw", b"beta");

    let out = unlzw(dir.path(), &["-m", "a.lzw", "b.lzw"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(fs::read(dir.path().join("a")).unwrap(), b"alpha");
    assert_eq!(fs::read(dir.path().join("b")).unwrap(), b"beta");
}

#[test]
fn test_cli_multiple_inputs_to_stdout_concatenate() {
    let dir = TempDir::new().unwrap();
    write_lzw(dir.path(), "a.lzw", b"alpha ");
    write_lzw(dir.path(), "b.lzw", b"beta");

    let out = unlzw(dir.path(), &["-m", "-c", "a.lzw", "b.lzw"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(out.stdout, b"alpha beta");
}

#[test]
fn test_cli_recursive_directory() {
    let dir = TempDir::new().unwrap();
    let tree = dir.path().join("tree");
    fs::create_dir_all(tree.join("nested")).unwrap();
    write_lzw(&tree, "top.lzw", b"top level");
    write_lzw(&tree.join("nested"), "deep.lzw", b"nested level");
    fs::write(tree.join("readme.txt"), b"not compressed").unwrap();

    let out = unlzw(dir.path(), &["-r", "tree"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(fs::read(tree.join("top")).unwrap(), b"top level");
    assert_eq!(fs::read(tree.join("nested/deep")).unwrap(), b"nested level");
}

// ── 6. Decoder settings ──────────────────────────────────────────────────────

#[test]
fn test_cli_dict_bits_must_match_encoder() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(30_000);
    fs::write(dir.path().join("small.lzw"), encode(&data, 1 << 9)).unwrap();

    let out = unlzw(dir.path(), &["-B", "9", "-c", "small.lzw"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(out.stdout, data);
}

#[test]
fn test_cli_dict_bits_from_environment() {
    let dir = TempDir::new().unwrap();
    let data = sample_text(30_000);
    fs::write(dir.path().join("small.lzw"), encode(&data, 1 << 10)).unwrap();

    let out = Command::new(unlzw_bin())
        .args(["-c", "small.lzw"])
        .env("LZW_DICT_BITS", "10")
        .current_dir(dir.path())
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(out.stdout, data);
}

#[test]
fn test_cli_bad_dict_bits_is_usage_error() {
    let dir = TempDir::new().unwrap();
    let out = unlzw(dir.path(), &["-B", "30", "x.lzw"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr_of(&out).contains("bad usage"));
}

#[test]
fn test_cli_strict_rejects_truncated_stream() {
    let dir = TempDir::new().unwrap();
    // "AAAA" cut after its third byte: the last code is incomplete.
    fs::write(dir.path().join("cut.lzw"), [0x41, 0x80, 0x10]).unwrap();

    let relaxed = unlzw(dir.path(), &["-c", "cut.lzw"]);
    assert!(relaxed.status.success());
    assert_eq!(relaxed.stdout, b"AAA");

    let strict = unlzw(dir.path(), &["--strict", "-c", "cut.lzw"]);
    assert_eq!(strict.status.code(), Some(1));
    assert!(stderr_of(&strict).contains("ERROR_input_truncated"));
}

// ── 7. Dictionary save / restore ─────────────────────────────────────────────

#[test]
fn test_cli_dictionary_save_then_restore() {
    let dir = TempDir::new().unwrap();
    write_lzw(dir.path(), "train.lzw", &sample_text(30_000));

    let out = unlzw(dir.path(), &["-t", "--save-dictionary", "dict.bin", "train.lzw"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    let dict = dir.path().join("dict.bin");
    let snapshot = lzwd::io::file_io::read_dictionary_file(dict.to_str().unwrap()).unwrap();

    let message = sample_text(3_000);
    fs::write(
        dir.path().join("msg.lzw"),
        encode_with_table(&message, &snapshot, 17),
    )
    .unwrap();

    let out = unlzw(dir.path(), &["-D", "dict.bin", "msg.lzw"]);
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(fs::read(dir.path().join("msg")).unwrap(), message);
}

#[test]
fn test_cli_missing_dictionary_fails() {
    let dir = TempDir::new().unwrap();
    write_lzw(dir.path(), "msg.lzw", b"x");
    let out = unlzw(dir.path(), &["-D", "absent.bin", "msg.lzw"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("msg").exists());
}

// ── 8. Corruption / misc ─────────────────────────────────────────────────────

#[test]
fn test_cli_corrupt_input_exit_code() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.lzw"), [0x41, 0xFF, 0x80]).unwrap();

    let out = unlzw(dir.path(), &["-c", "bad.lzw"]);
    assert_eq!(out.status.code(), Some(1));
    // Output decoded before the bad code is still delivered.
    assert_eq!(out.stdout, b"A");
}

#[test]
fn test_cli_missing_input_file() {
    let dir = TempDir::new().unwrap();
    let out = unlzw(dir.path(), &["nope.lzw"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(!dir.path().join("nope").exists());
}

#[test]
fn test_cli_version() {
    let dir = TempDir::new().unwrap();
    let out = unlzw(dir.path(), &["--version"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    let out = unlzw(dir.path(), &["--help"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("--dict-bits"));
}

#[cfg(unix)]
#[test]
fn test_cli_lzwcat_alias() {
    let dir = TempDir::new().unwrap();
    let alias = dir.path().join("lzwcat");
    std::os::unix::fs::symlink(unlzw_bin(), &alias).unwrap();
    write_lzw(dir.path(), "one.lzw", b"cat ");
    write_lzw(dir.path(), "two.lzw", b"dog");

    let out = Command::new(&alias)
        .args(["one.lzw", "two.lzw"])
        .current_dir(dir.path())
        .stdin(Stdio::null())
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", stderr_of(&out));
    assert_eq!(out.stdout, b"cat dog");
}
