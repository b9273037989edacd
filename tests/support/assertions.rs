//! Test assertion helpers.

use std::process::Output;

/// Assert that a command output was successful.
pub fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "Command failed:\nstdout:\n{}\nstderr:\n{}",
            stdout(output),
            stderr(output)
        );
    }
}

/// Assert that a command output failed.
pub fn assert_failure(output: &Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

/// Get stdout as String.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as String.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert stdout contains a string.
pub fn assert_stdout_contains(output: &Output, expected: &str) {
    let out = stdout(output);
    assert!(
        out.contains(expected),
        "stdout missing '{}', got: {}",
        expected,
        out
    );
}

/// Assert stdout does NOT contain a string.
pub fn assert_stdout_excludes(output: &Output, excluded: &str) {
    let out = stdout(output);
    assert!(
        !out.contains(excluded),
        "stdout should not contain '{}', got: {}",
        excluded,
        out
    );
}

/// Assert that every line of stdout mentioning `value` is a mask command.
///
/// The runner hides masked values from later log lines, so the only place
/// a raw value may appear in our own output is the `::add-mask::` line.
pub fn assert_only_masked(output: &Output, value: &str) {
    let out = stdout(output);
    assert!(
        out.contains(&format!("::add-mask::{}", value)),
        "value was never masked, stdout: {}",
        out
    );
    for line in out.lines().filter(|l| l.contains(value)) {
        assert!(
            line.starts_with("::add-mask::"),
            "value leaked outside a mask command: {}",
            line
        );
    }
}
