//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Step inputs and settings the harness clears before every run.
const RUNNER_VARS: &[&str] = &[
    "INPUT_KEYVAULT",
    "INPUT_SECRETS",
    "INPUT_SECRETSFILE",
    "INPUT_ENVIRONMENT",
    "INPUT_TIMEOUT",
    "KEYVAULT_ACCESS_TOKEN",
    "KVSECRETS_VAULT_URL",
    "KVSECRETS_LOG",
];

impl Test {
    /// Create a kvsecrets command wired to this environment.
    ///
    /// Returns a Command configured with:
    /// - runner files inside the temp dir
    /// - step inputs from the outer environment removed
    /// - colors disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("kvsecrets").expect("failed to find kvsecrets binary");
        for var in RUNNER_VARS {
            cmd.env_remove(var);
        }
        cmd.env("GITHUB_ENV", self.env_file());
        cmd.env("GITHUB_OUTPUT", self.output_file());
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// `kvsecrets fetch` against `vault_url` with a test token.
    pub fn fetch_cmd(&self, vault_url: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("fetch")
            .env("INPUT_KEYVAULT", "testvault")
            .env("KVSECRETS_VAULT_URL", vault_url)
            .env("KEYVAULT_ACCESS_TOKEN", super::TEST_TOKEN);
        cmd
    }

    /// Fetch with an inline filter.
    pub fn fetch_secrets(&self, vault_url: &str, secrets: &str) -> Output {
        self.fetch_cmd(vault_url)
            .env("INPUT_SECRETS", secrets)
            .output()
            .expect("failed to run kvsecrets fetch")
    }

    /// Fetch with a secrets file pattern.
    pub fn fetch_file(&self, vault_url: &str, pattern: &str) -> Output {
        self.fetch_cmd(vault_url)
            .env("INPUT_SECRETSFILE", pattern)
            .output()
            .expect("failed to run kvsecrets fetch")
    }
}
