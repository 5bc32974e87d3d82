//! End-to-end tests for the `lox` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::{NamedTempFile, TempDir};

fn lox() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lox"))
}

fn script(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(source.as_bytes()).expect("write script");
    file
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_run_file_prints_tokens() {
    let file = script("var x = 1;\nprint x;\n");
    let output = lox().arg(file.path()).output().expect("run lox");

    assert_eq!(output.status.code(), Some(0));
    let lines: Vec<String> = stdout(&output).lines().map(String::from).collect();
    assert_eq!(
        lines,
        vec![
            "VAR var Object",
            "IDENTIFIER x Object",
            "EQUAL = Object",
            "NUMBER 1 1",
            "SEMICOLON ; Object",
            "PRINT print Object",
            "IDENTIFIER x Object",
            "SEMICOLON ; Object",
            "Eof  Object",
        ]
    );
}

#[test]
fn test_run_file_with_errors_exits_65_after_full_scan() {
    let file = script("1 @ 2\n\"open");
    let output = lox().arg(file.path()).output().expect("run lox");

    assert_eq!(output.status.code(), Some(65));
    let out = stdout(&output);
    assert!(out.contains("[line 1 Error : Unexpected character. char repr: @ int repr: 64"));
    assert!(out.contains("[line 2 Error : Unterminated string."));
    assert!(out.contains("NUMBER 1 1"));
    assert!(out.contains("NUMBER 2 2"));
    assert!(out.ends_with("Eof  Object\n"));
}

#[test]
fn test_eval_snippet() {
    let output = lox().args(["-e", "a <= b"]).output().expect("run lox");
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("LESS_EQUAL <= Object"));

    let output = lox().args(["--eval", "#"]).output().expect("run lox");
    assert_eq!(output.status.code(), Some(65));
}

#[test]
fn test_too_many_arguments_is_usage_error() {
    let output = lox().args(["a.lox", "b.lox"]).output().expect("run lox");
    assert_eq!(output.status.code(), Some(64));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_missing_file_is_no_input() {
    let output = lox()
        .arg("this/file/does/not/exist.lox")
        .output()
        .expect("run lox");
    assert_eq!(output.status.code(), Some(66));
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not read"));
}

#[test]
fn test_help_succeeds() {
    let output = lox().arg("--help").output().expect("run lox");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_repl_forgets_errors_between_lines() {
    let data = TempDir::new().expect("create temp dir");
    let mut child = lox()
        .env("XDG_DATA_HOME", data.path())
        .env("HOME", data.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn lox");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(b"@\n1 + 2\n")
        .expect("write input");

    let output = child.wait_with_output().expect("wait for lox");
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    assert!(out.contains("[line 1 Error : Unexpected character. char repr: @ int repr: 64"));
    assert!(out.contains("PLUS + Object"));
    assert_eq!(out.matches("Error :").count(), 1);
}
