//! GitHub Actions runner protocol.
//!
//! Log annotations and masking are workflow commands written to stdout
//! (`::add-mask::`, `::error::`, `::debug::`). Variables and outputs are
//! appended to the files named by `GITHUB_ENV` and `GITHUB_OUTPUT` using
//! the heredoc form:
//!
//! ```text
//! NAME<<ghadelimiter_<uuid>
//! value
//! ghadelimiter_<uuid>
//! ```
//!
//! Runners that predate file commands get the legacy `::set-env` and
//! `::set-output` commands instead.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::trace;

use super::Runner;
use crate::core::constants::{DELIMITER_PREFIX, GITHUB_ENV, GITHUB_OUTPUT};
use crate::error::RunnerError;

/// Runner speaking the GitHub Actions protocol.
#[derive(Debug)]
pub struct ActionsRunner<W: Write + Send = io::Stdout> {
    out: Mutex<W>,
    env_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

impl ActionsRunner<io::Stdout> {
    /// Runner writing commands to stdout, with file paths taken from
    /// `GITHUB_ENV` and `GITHUB_OUTPUT` when set.
    pub fn from_env() -> Self {
        Self::new(
            io::stdout(),
            file_from_env(GITHUB_ENV),
            file_from_env(GITHUB_OUTPUT),
        )
    }
}

fn file_from_env(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

impl<W: Write + Send> ActionsRunner<W> {
    /// Runner writing commands to `out`.
    pub fn new(out: W, env_file: Option<PathBuf>, output_file: Option<PathBuf>) -> Self {
        Self {
            out: Mutex::new(out),
            env_file,
            output_file,
        }
    }

    /// Consume the runner and return its command stream.
    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn command(&self, command: &str, properties: &[(&str, &str)], message: &str) -> io::Result<()> {
        let mut line = format!("::{}", command);
        if !properties.is_empty() {
            let props: Vec<String> = properties
                .iter()
                .map(|(k, v)| format!("{}={}", k, escape_property(v)))
                .collect();
            line.push(' ');
            line.push_str(&props.join(","));
        }
        line.push_str("::");
        line.push_str(&escape_data(message));

        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{}", line)?;
        out.flush()
    }

    fn stdout_error(source: io::Error) -> RunnerError {
        RunnerError::WriteFile {
            path: PathBuf::from("<stdout>"),
            source,
        }
    }

    fn set(
        &self,
        file: Option<&Path>,
        legacy: &str,
        name: &str,
        value: &str,
    ) -> Result<(), RunnerError> {
        match file {
            Some(path) => append_file_command(path, name, value),
            None => self
                .command(legacy, &[("name", name)], value)
                .map_err(Self::stdout_error),
        }
    }
}

impl<W: Write + Send> Runner for ActionsRunner<W> {
    fn mask(&self, value: &str) -> Result<(), RunnerError> {
        self.command("add-mask", &[], value)
            .map_err(Self::stdout_error)
    }

    fn export_variable(&self, name: &str, value: &str) -> Result<(), RunnerError> {
        self.set(self.env_file.as_deref(), "set-env", name, value)
    }

    fn set_output(&self, name: &str, value: &str) -> Result<(), RunnerError> {
        self.set(self.output_file.as_deref(), "set-output", name, value)
    }

    fn fail(&self, message: &str) {
        let _ = self.command("error", &[], message);
    }

    fn debug(&self, message: &str) {
        let _ = self.command("debug", &[], message);
    }

    fn info(&self, message: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(out, "{}", message);
    }
}

/// Append a heredoc entry to a runner file.
fn append_file_command(path: &Path, name: &str, value: &str) -> Result<(), RunnerError> {
    let delimiter = format!("{}{}", DELIMITER_PREFIX, uuid::Uuid::new_v4());

    if name.contains(&delimiter) {
        return Err(RunnerError::Delimiter {
            kind: "name",
            name: name.to_string(),
        });
    }
    if value.contains(&delimiter) {
        return Err(RunnerError::Delimiter {
            kind: "value of",
            name: name.to_string(),
        });
    }

    let entry = format!("{name}<<{delimiter}\n{value}\n{delimiter}\n");
    let write_err = |source| RunnerError::WriteFile {
        path: path.to_path_buf(),
        source,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_err)?;
    file.write_all(entry.as_bytes()).map_err(write_err)?;

    trace!(path = %path.display(), name = %name, "appended file command");
    Ok(())
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
