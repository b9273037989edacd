//! Publish sink for the CI runner.
//!
//! Everything the step tells the pipeline goes through [`Runner`]: masking
//! values, exporting variables and outputs, and log annotations.
//!
//! - `actions`: GitHub Actions workflow commands and file commands
//! - `recording`: test-only sink that records every call

mod actions;


pub use actions::ActionsRunner;

use crate::error::RunnerError;

/// Output channel of the hosting CI runner.
pub trait Runner: Send + Sync {
    /// Register `value` so the runner masks it in all later log output.
    fn mask(&self, value: &str) -> Result<(), RunnerError>;

    /// Make `name=value` available as an environment variable to later steps.
    fn export_variable(&self, name: &str, value: &str) -> Result<(), RunnerError>;

    /// Set the step output `name`.
    fn set_output(&self, name: &str, value: &str) -> Result<(), RunnerError>;

    /// Report a failure annotation. Does not stop the step by itself.
    fn fail(&self, message: &str);

    /// Debug-level runner log line.
    fn debug(&self, message: &str);

    /// Plain runner log line.
    fn info(&self, message: &str);
}
