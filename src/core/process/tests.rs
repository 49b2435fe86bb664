// gitcall: Git Subprocess Execution Layer
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::builder::{ProcessBuilder, ProcessFlags};
use super::runner::feed_stdin;
use super::{LOG_TARGET, execute};
use crate::core::env::container::Env;
use crate::logging::capture::CapturedLogs;
use crate::logging::{LogFormat, LogLevel};

#[cfg(unix)]
fn sh(script: &str) -> ProcessBuilder {
    ProcessBuilder::new("/bin/sh").args(["-c", script])
}

#[test]
#[cfg(unix)]
fn test_process_stdout_is_not_trimmed() {
    let output = sh("printf 'hello\\n\\n'").run().expect("sh should succeed");

    assert!(output.success());
    assert_eq!(output.exit_code(), Some(0));
    assert_eq!(output.stdout(), "hello\n\n");
}

#[test]
#[cfg(unix)]
fn test_process_failure_message_is_stderr_then_stdout() {
    let err = sh("printf out; printf err >&2; exit 3")
        .run()
        .expect_err("exit 3 should fail");

    assert_eq!(err.to_string(), "err\nout");
    assert_eq!(err.exit_code(), Some(3));
    assert_eq!(err.stdout(), "out");
    assert_eq!(err.stderr(), "err");
    assert_eq!(err.args()[0], "/bin/sh");
    assert!(!err.is_spawn_failure());
}

#[test]
#[cfg(unix)]
fn test_process_args_are_not_shell_interpreted() {
    let out = execute(
        "/bin/sh",
        ["-c", "printf '%s|' \"$@\"", "sh", "a b", "$HOME", ";rm -rf x", "*"],
        ".",
        None,
        ProcessFlags::empty(),
    )
    .expect("sh should succeed");

    assert_eq!(out, "a b|$HOME|;rm -rf x|*|");
}

#[test]
#[cfg(unix)]
fn test_process_env_replaces_inherited() {
    let mut env = Env::new();
    env.set("ONLY_VAR", "1");

    let out = execute(
        "/bin/sh",
        ["-c", "printf '%s:%s' \"$ONLY_VAR\" \"${HOME-unset}\""],
        ".",
        Some(&env),
        ProcessFlags::empty(),
    )
    .expect("sh should succeed");

    assert_eq!(out, "1:unset");
}

#[test]
#[cfg(unix)]
fn test_process_inherits_env_when_unset() {
    let output = sh("printf '%s' \"${PATH:+set}\"")
        .run()
        .expect("sh should succeed");
    assert_eq!(output.stdout(), "set");
}

#[test]
#[cfg(unix)]
fn test_process_env_overlay_keeps_inherited() {
    let mut env = Env::new();
    env.set("ONLY_VAR", "1");

    let output = sh("printf '%s:%s' \"${PATH:+set}\" \"$ONLY_VAR\"")
        .env_overlay(env)
        .run()
        .expect("sh should succeed");

    assert_eq!(output.stdout(), "set:1");
}

#[test]
#[cfg(unix)]
fn test_process_env_overlay_wins_over_inherited() {
    let mut env = Env::new();
    env.set("PATH", "/overlay/bin:/usr/bin:/bin");

    let output = ProcessBuilder::new("/bin/sh")
        .args(["-c", "printf '%s' \"$PATH\""])
        .env_overlay(env)
        .run()
        .expect("sh should succeed");

    assert_eq!(output.stdout(), "/overlay/bin:/usr/bin:/bin");
}

#[test]
#[cfg(unix)]
fn test_process_runs_in_working_dir() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");

    let out = execute("/bin/sh", ["-c", "pwd"], temp.path(), None, ProcessFlags::empty())
        .expect("pwd should succeed");

    let reported = std::path::Path::new(out.trim_end()).canonicalize().unwrap();
    assert_eq!(reported, temp.path().canonicalize().unwrap());
}

#[test]
fn test_process_invalid_working_dir_is_execution_error() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let missing = temp.path().join("does-not-exist");

    let err = ProcessBuilder::new("git")
        .arg("--version")
        .cwd(&missing)
        .run()
        .expect_err("spawning in a missing directory should fail");

    assert!(err.is_spawn_failure());
    assert_eq!(err.exit_code(), None);
    assert_eq!(err.stdout(), "");
    assert!(!err.stderr().is_empty());
}

#[test]
fn test_process_missing_executable_is_execution_error() {
    let err = ProcessBuilder::new("nonexistent_program_12345")
        .run()
        .expect_err("missing executable should fail");

    assert!(err.is_spawn_failure());
    assert_eq!(err.exit_code(), None);
    assert_eq!(err.args(), ["nonexistent_program_12345"]);
}

#[test]
#[cfg(unix)]
fn test_process_allow_failure() {
    let output = sh("printf partial; exit 42")
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .expect("process should complete");

    assert!(!output.success());
    assert_eq!(output.exit_code(), Some(42));
    assert_eq!(output.stdout(), "partial");
}

#[test]
#[cfg(unix)]
fn test_process_merge_stderr() {
    let text = sh("printf out; printf err >&2")
        .flag(ProcessFlags::MERGE_STDERR)
        .run_text()
        .expect("sh should succeed");
    assert_eq!(text, "outerr");

    let text = sh("printf out; printf err >&2")
        .run_text()
        .expect("sh should succeed");
    assert_eq!(text, "out");
}

#[test]
#[cfg(unix)]
fn test_process_stdin() {
    let output = sh("cat")
        .stdin("piped input\n")
        .run()
        .expect("cat should succeed");
    assert_eq!(output.stdout(), "piped input\n");
}

#[test]
#[cfg(unix)]
fn test_process_stdin_ignored_by_child() {
    let big = "x".repeat(1 << 20);
    let output = sh("printf done")
        .stdin(big)
        .run()
        .expect("child that ignores stdin should still succeed");
    assert_eq!(output.stdout(), "done");
}

// --- Failure records ---

fn warn_records(logs: &CapturedLogs) -> Vec<serde_json::Value> {
    logs.records()
        .into_iter()
        .filter(|r| r["level"] == "WARN")
        .collect()
}

#[test]
#[cfg(unix)]
fn test_exit_failure_emits_one_warn_record() {
    let temp = tempfile::tempdir().expect("failed to create temp dir");
    let logs = CapturedLogs::default();

    let err = logs
        .capture(LogLevel::TRACE, LogFormat::Json, || {
            sh("printf out; printf err >&2; exit 3")
                .cwd(temp.path())
                .flag(ProcessFlags::MERGE_STDERR)
                .run()
        })
        .expect_err("exit 3 should fail");
    assert_eq!(err.exit_code(), Some(3));

    let records = warn_records(&logs);
    assert_eq!(records.len(), 1, "{records:?}");

    let record = &records[0];
    assert_eq!(record["target"], LOG_TARGET);
    let fields = &record["fields"];
    assert_eq!(fields["message"], "command failed");
    assert_eq!(fields["process"], "sh");
    assert!(fields["args"].as_str().unwrap().contains("exit 3"));
    assert!(
        fields["cwd"]
            .as_str()
            .unwrap()
            .contains(&*temp.path().to_string_lossy())
    );
    assert!(fields["flags"].as_str().unwrap().contains("MERGE_STDERR"));
    assert_eq!(fields["stderr"], "err");
    assert_eq!(fields["exit_code"], "Some(3)");
}

#[test]
fn test_spawn_failure_emits_one_warn_record() {
    let logs = CapturedLogs::default();

    let err = logs
        .capture(LogLevel::WARN, LogFormat::Json, || {
            ProcessBuilder::new("nonexistent_program_12345")
                .arg("--flag")
                .run()
        })
        .expect_err("missing executable should fail");
    assert!(err.is_spawn_failure());

    let records = warn_records(&logs);
    assert_eq!(records.len(), 1, "{records:?}");

    let fields = &records[0]["fields"];
    assert_eq!(fields["process"], "nonexistent_program_12345");
    assert!(fields["args"].as_str().unwrap().contains("--flag"));
    assert_eq!(fields["cwd"], "None");
    assert_eq!(fields["flags"], format!("{:?}", ProcessFlags::empty()));
    assert_eq!(fields["stderr"], err.stderr());
    assert_eq!(fields["exit_code"], "None");
}

#[test]
#[cfg(unix)]
fn test_success_and_allowed_failure_emit_no_warn_record() {
    let logs = CapturedLogs::default();

    logs.capture(LogLevel::TRACE, LogFormat::Json, || {
        sh("printf ok").run().expect("sh should succeed");
        sh("exit 5")
            .flag(ProcessFlags::ALLOW_FAILURE)
            .run()
            .expect("failure is allowed");
    });

    assert!(warn_records(&logs).is_empty());
    assert!(!logs.records().is_empty(), "debug and trace records expected");
}

// --- Stdin feeding ---

/// Writer that fails every write with `kind`.
struct FailingPipe(std::io::ErrorKind);

impl std::io::Write for FailingPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(self.0, "pipe failed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_feed_stdin_ignores_broken_pipe() {
    let logs = CapturedLogs::default();
    logs.capture(LogLevel::DUMP, LogFormat::Json, || {
        feed_stdin(&mut FailingPipe(std::io::ErrorKind::BrokenPipe), b"data");
    });
    assert!(logs.records().is_empty());
}

#[test]
fn test_feed_stdin_logs_other_errors_at_debug() {
    let logs = CapturedLogs::default();
    logs.capture(LogLevel::DUMP, LogFormat::Json, || {
        feed_stdin(&mut FailingPipe(std::io::ErrorKind::PermissionDenied), b"data");
    });

    let records = logs.records();
    assert_eq!(records.len(), 1, "{records:?}");
    assert_eq!(records[0]["level"], "DEBUG");
    assert_eq!(records[0]["target"], LOG_TARGET);
    assert_eq!(records[0]["fields"]["message"], "stdin write failed");
    assert_eq!(records[0]["fields"]["error"], "pipe failed");
}

#[test]
#[cfg(unix)]
fn test_stdin_ignored_by_child_logs_no_write_failure() {
    let logs = CapturedLogs::default();
    let output = logs
        .capture(LogLevel::DUMP, LogFormat::Json, || {
            sh("printf done").stdin("x".repeat(1 << 20)).run()
        })
        .expect("child that ignores stdin should still succeed");

    assert_eq!(output.stdout(), "done");
    assert!(
        logs.records()
            .iter()
            .all(|r| r["fields"]["message"] != "stdin write failed")
    );
}
