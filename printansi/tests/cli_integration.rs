// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Runs the `printansi` binary end to end.

use assert_cmd::Command;
use pretty_assertions::assert_eq;

fn printansi() -> Command {
    Command::cargo_bin("printansi").unwrap()
}

fn stdout_of(args: &[&str]) -> Vec<u8> {
    let output = printansi().args(args).output().unwrap();
    assert!(output.status.success(), "{output:?}");
    output.stdout
}

#[test]
fn test_items_with_defaults() {
    assert_eq!(stdout_of(&["a", "b"]), b"a b\n");
}

#[test]
fn test_control_bytes_are_escaped() {
    assert_eq!(
        stdout_of(&["\x1b[2J", "tab\there", "it's"]),
        b"\\e[2J tab\\there it\\'s\n"
    );
}

#[test]
fn test_relaxed() {
    assert_eq!(stdout_of(&["-r", "it's a b"]), b"it's a b\n");
}

#[test]
fn test_empty_suffix_is_nul() {
    assert_eq!(stdout_of(&["-s", "", "a"]), b"a\0");
}

#[test]
fn test_quote_cycle() {
    assert_eq!(stdout_of(&["-q", "<>", "a", "b"]), b"<a> <b>\n");
}

#[test]
fn test_prefix_and_separator() {
    assert_eq!(stdout_of(&["-p", "> ", "-t", ",", "a", "b"]), b"> a,b\n");
}

#[test]
fn test_date_stamp_starts_the_line() {
    let stdout = stdout_of(&["-d", "a"]);
    assert_eq!(stdout.len(), "[YYYYMMDD-HHMMSS]a\n".len());
    assert_eq!(stdout[0], b'[');
    assert_eq!(stdout[16], b']');
    assert!(stdout.ends_with(b"]a\n"));
}

#[test]
fn test_loop_mode_reads_files_and_stdin() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    std::fs::write(&input, "first\n\nsecond line\n").unwrap();

    let output = printansi()
        .args(["-l", input.to_str().unwrap(), "-"])
        .write_stdin("from stdin\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"first\nsecond\\x20line\nfrom\\x20stdin\n");
}

#[test]
fn test_loop_mode_nul_terminated() {
    let output = printansi()
        .args(["-l", "-z", "-"])
        .write_stdin("a\nb\0c")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"a\\nb\nc\n");
}

#[test]
fn test_missing_input_is_reported_and_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.txt");

    let output = printansi()
        .args(["-l", missing.to_str().unwrap(), "-"])
        .write_stdin("still here\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    assert_eq!(output.stdout, b"still\\x20here\n");
    let stderr = strip_ansi_escapes::strip_str(String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("cannot open input"), "{stderr}");
}

#[test]
fn test_file_output_is_appended() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out.log");

    for item in ["one", "two"] {
        let output = printansi()
            .args(["-f", out.to_str().unwrap(), item])
            .output()
            .unwrap();
        assert!(output.status.success());
        assert!(output.stdout.is_empty());
    }

    assert_eq!(std::fs::read(&out).unwrap(), b"one\ntwo\n");
}

#[test]
fn test_unopenable_output_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("no_such_folder").join("out.log");

    let output = printansi()
        .args(["-f", out.to_str().unwrap(), "a"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_no_args_exits_with_one() {
    let output = printansi().output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_unknown_option_exits_with_one() {
    let output = printansi().args(["--bogus", "a"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_with_zero() {
    let output = printansi().arg("--help").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("--cycle-time"));
}
