//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an envseal command with a clean environment.
    ///
    /// Returns a Command configured with:
    /// - current directory set to the component directory
    /// - envseal's own variables removed so the outer shell cannot leak in
    /// - colors disabled
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envseal").expect("failed to find envseal binary");
        cmd.current_dir(self.dir.path());
        cmd.env_remove("ENVSEAL_PASSWORD");
        cmd.env_remove("ENVSEAL_DECRYPTED");
        cmd.env_remove("ENVSEAL_DIR");
        cmd.env_remove("ENVSEAL_LOG");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    /// Same as `cmd` with the password variable set.
    pub fn cmd_with_password(&self, password: &str) -> Command {
        let mut cmd = self.cmd();
        cmd.env("ENVSEAL_PASSWORD", password);
        cmd
    }

    /// Shortcut for `envseal encrypt`.
    pub fn encrypt(&self, password: &str) -> Output {
        self.cmd_with_password(password)
            .arg("encrypt")
            .output()
            .expect("failed to run envseal encrypt")
    }

    /// Shortcut for `envseal encrypt --force`.
    pub fn encrypt_force(&self, password: &str) -> Output {
        self.cmd_with_password(password)
            .args(["encrypt", "--force"])
            .output()
            .expect("failed to run envseal encrypt --force")
    }

    /// Shortcut for `envseal check`.
    pub fn check(&self, password: &str) -> Output {
        self.cmd_with_password(password)
            .arg("check")
            .output()
            .expect("failed to run envseal check")
    }

    /// Shortcut for `envseal check --json`.
    pub fn check_json(&self, password: &str) -> Output {
        self.cmd_with_password(password)
            .args(["check", "--json"])
            .output()
            .expect("failed to run envseal check --json")
    }

    /// Shortcut for `envseal run -- <command>`.
    pub fn run(&self, password: &str, command: &[&str]) -> Output {
        let mut cmd = self.cmd_with_password(password);
        cmd.arg("run").arg("--");
        for arg in command {
            cmd.arg(arg);
        }
        cmd.output().expect("failed to run envseal run")
    }
}
