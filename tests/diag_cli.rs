//! Exit code and stream integration tests for the `ephem-diag` binary.
//!
//! The facility produces exactly two process outcomes:
//!
//! | Code | Meaning                                             |
//! |------|-----------------------------------------------------|
//! |  0   | Success (recoverable diagnostics emitted, if any)   |
//! |  1   | Fatal termination (fatal path, short read, usage)   |
//!
//! Fatal behavior cannot be unit tested in-process because the fatal path
//! never returns, so these tests spawn the real binary and assert on exit
//! status, stream bytes, and durable log contents.

use std::fs;
use std::path::Path;
use std::process::Output;

use assert_cmd::Command;

fn run_diag(args: &[&str], cwd: &Path) -> Output {
    Command::cargo_bin("ephem-diag")
        .expect("ephem-diag binary must be available")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run ephem-diag")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Strips the `[<timestamp>] ` prefix from every log line.
fn log_payloads(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("log readable")
        .lines()
        .map(|line| {
            let (stamp, payload) = line.split_once("] ").expect("timestamp prefix");
            assert_timestamp_shape(stamp);
            payload.to_owned()
        })
        .collect()
}

fn assert_timestamp_shape(stamp: &str) {
    // "[YYYY/MM/DD HH:MM:SS"
    let bytes = stamp.as_bytes();
    assert_eq!(bytes.len(), 20, "unexpected timestamp width: {stamp}");
    assert_eq!(bytes[0], b'[');
    assert_eq!(bytes[5], b'/');
    assert_eq!(bytes[8], b'/');
    assert_eq!(bytes[11], b' ');
    assert_eq!(bytes[14], b':');
    assert_eq!(bytes[17], b':');
}

// ============================================================================
// Recoverable severities
// ============================================================================

#[test]
fn report_prints_exactly_the_message() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["report", "sunrise"], dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "sunrise\n");
    assert_eq!(stderr_of(&output), "");
}

#[test]
fn error_prints_exactly_the_prefixed_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["error", "bad ephemeris epoch"], dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "");
    assert_eq!(stderr_of(&output), "Error: bad ephemeris epoch\n");
}

#[test]
fn warning_prints_exactly_the_prefixed_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["warning", "object below horizon"], dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stderr_of(&output), "Warning: object below horizon\n");
}

#[test]
fn recoverable_diagnostics_do_not_touch_the_log_when_quiet() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["error", "bad ephemeris epoch"], dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert!(!dir.path().join("ephem.log").exists());
}

#[test]
fn debug_mode_mirrors_report_into_the_default_log() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["--debug", "report", "sunrise"], dir.path());

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "sunrise\n");
    let payloads = log_payloads(&dir.path().join("ephem.log"));
    assert_eq!(payloads, ["Reporting: sunrise"]);
}

#[test]
fn oversized_message_is_truncated_never_overrun() {
    let dir = tempfile::tempdir().expect("tempdir");
    let huge = "x".repeat(40000);
    let output = run_diag(&["report", &huge], dir.path());

    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout_of(&output);
    assert_eq!(stdout.len(), 32768 + 1, "payload must clamp to capacity");
    assert!(huge.starts_with(stdout.trim_end_matches('\n')));
}

// ============================================================================
// Fatal path
// ============================================================================

#[test]
fn fatal_exits_1_with_location_then_message() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["fatal", "moon position unavailable"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    let mut lines = stderr.lines();
    let intro = lines.next().expect("location line");
    assert!(intro.starts_with("Error: Fatal Error encountered in "));
    assert!(intro.contains(" at line "));
    assert!(intro.ends_with(':'));
    assert_eq!(lines.next(), Some("Error: moon position unavailable"));
    assert_eq!(lines.next(), None);
}

#[test]
fn fatal_is_durably_recorded_even_without_debug() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["fatal", "moon position unavailable"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let payloads = log_payloads(&dir.path().join("ephem.log"));
    assert_eq!(payloads.len(), 2);
    assert!(payloads[0].starts_with("Error: Fatal Error encountered in "));
    assert_eq!(payloads[1], "Error: moon position unavailable");
}

#[test]
fn fatal_in_debug_mode_adds_the_terminal_marker() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["--debug", "fatal", "moon position unavailable"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let payloads = log_payloads(&dir.path().join("ephem.log"));
    assert_eq!(payloads.len(), 3);
    assert_eq!(payloads[2], "Terminating with error condition 1.");
}

#[test]
fn fatal_exits_1_when_the_log_cannot_be_created() {
    // Using a regular file as the log's parent directory makes the open
    // fail regardless of process privileges.
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, b"occupied").expect("create blocker");
    let log_arg = blocker.join("ephem.log");

    let output = run_diag(
        &[
            "--debug",
            "--log-file",
            log_arg.to_str().expect("utf-8 path"),
            "fatal",
            "moon position unavailable",
        ],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Error: Could not open log file to write."));
    // The open failure is reported exactly once: no recursion, no retry.
    assert_eq!(stderr.matches("Could not open log file to write.").count(), 1);
}

#[test]
fn log_open_failure_during_recoverable_mirror_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, b"occupied").expect("create blocker");
    let log_arg = blocker.join("ephem.log");

    let output = run_diag(
        &[
            "--debug",
            "--log-file",
            log_arg.to_str().expect("utf-8 path"),
            "report",
            "sunrise",
        ],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Error: Could not open log file to write."));
}

// ============================================================================
// Guarded read
// ============================================================================

#[test]
fn exact_read_reports_the_byte_count() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("block.bin");
    fs::write(&data, vec![0u8; 40]).expect("write data");

    let output = run_diag(
        &["read-check", data.to_str().expect("utf-8 path"), "4", "10"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout_of(&output), "read 40 bytes\n");
}

#[test]
fn short_read_takes_the_fatal_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data = dir.path().join("block.bin");
    fs::write(&data, vec![0u8; 30]).expect("write data");

    let output = run_diag(
        &["read-check", data.to_str().expect("utf-8 path"), "4", "10"],
        dir.path(),
    );

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("Error: Fatal Error encountered in "));
    assert!(stderr.contains("Error: file read fail"));
    assert_eq!(stdout_of(&output), "", "no partial result may escape");
}

#[test]
fn missing_input_file_takes_the_fatal_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["read-check", "absent.bin", "8", "1"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Error: Could not open input file absent.bin."));
}

// ============================================================================
// Usage
// ============================================================================

#[test]
fn unknown_command_exits_1_with_usage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["frobnicate"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr_of(&output);
    assert!(stderr.contains("unknown command: frobnicate"));
    assert!(stderr.contains("usage: ephem-diag"));
}

#[test]
fn missing_command_exits_1_with_usage() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = run_diag(&["--debug"], dir.path());

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("missing command"));
}
