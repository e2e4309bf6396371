//! Command helper methods for Test.

use super::{CloudMock, Test};
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a blt command with an isolated environment.
    ///
    /// - HOME points at the temporary home directory
    /// - the working directory is the temporary repository
    /// - colors are off and ambient blt settings are cleared
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("blt").expect("failed to find blt binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("BLT_LOG");
        cmd.env_remove("BLT_CLOUD_APP_ID");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// A blt command talking to `mock` instead of Acquia Cloud.
    pub fn cmd_against(&self, mock: &CloudMock) -> Command {
        let mut cmd = self.cmd();
        cmd.env("BLT_CLOUD_API_URL", mock.api_url());
        cmd.env("BLT_CLOUD_TOKEN_URL", mock.token_url());
        cmd
    }

    /// Shortcut for `blt generate:aliases:acquia` with piped answers.
    pub fn generate(&self, mock: &CloudMock, stdin: &str) -> Output {
        self.generate_with(mock, &[], stdin)
    }

    /// `blt generate:aliases:acquia` with extra arguments.
    pub fn generate_with(&self, mock: &CloudMock, args: &[&str], stdin: &str) -> Output {
        self.cmd_against(mock)
            .arg("generate:aliases:acquia")
            .args(args)
            .write_stdin(stdin)
            .output()
            .expect("failed to run blt generate:aliases:acquia")
    }
}
