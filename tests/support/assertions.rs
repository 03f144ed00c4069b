//! Assertions over finished `envseal` invocations.

use std::process::Output;

/// Both streams plus the exit code, for failure messages.
fn describe(output: &Output) -> String {
    format!(
        "exit: {:?}\n--- stdout ---\n{}\n--- stderr ---\n{}",
        output.status.code(),
        stdout(output),
        stderr(output)
    )
}

/// Captured stdout, lossily decoded.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Captured stderr, lossily decoded.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

pub fn assert_success(output: &Output) {
    assert!(output.status.success(), "envseal failed\n{}", describe(output));
}

pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "envseal should have failed\n{}",
        describe(output)
    );
}

/// Exact exit code, e.g. 1 for envseal's own errors or a child's code under `run`.
pub fn assert_exit_code(output: &Output, code: i32) {
    assert_eq!(output.status.code(), Some(code), "{}", describe(output));
}

pub fn assert_stdout_contains(output: &Output, expected: &str) {
    assert!(
        stdout(output).contains(expected),
        "stdout should mention {:?}\n{}",
        expected,
        describe(output)
    );
}

pub fn assert_stderr_contains(output: &Output, expected: &str) {
    assert!(
        stderr(output).contains(expected),
        "stderr should mention {:?}\n{}",
        expected,
        describe(output)
    );
}

/// A secret must not show up on either stream.
pub fn assert_not_leaked(output: &Output, secret: &str) {
    assert!(
        !stdout(output).contains(secret) && !stderr(output).contains(secret),
        "secret {:?} leaked into output\n{}",
        secret,
        describe(output)
    );
}
