//! Human-facing terminal output.
//!
//! Runner protocol lines go through [`crate::core::runner::Runner`]; these
//! helpers only decorate the closing summary. Colors respect NO_COLOR.

use console::style;

/// Check if color output is disabled via NO_COLOR env var.
fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ published 3 secrets from myvault`
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("✓").green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// Print a warning message (yellow).
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", style("⚠").yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// Format a vault or secret name in cyan.
pub fn name(n: &str) -> String {
    if colors_enabled() {
        style(n).cyan().to_string()
    } else {
        n.to_string()
    }
}

/// Pluralize `secret` for a count.
pub fn secrets(count: usize) -> String {
    if count == 1 {
        "1 secret".to_string()
    } else {
        format!("{} secrets", count)
    }
}
