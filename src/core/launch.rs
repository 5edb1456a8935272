use shell_escape::escape;
use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// Exit code a shell reports when the command cannot be found or started.
pub const SPAWN_FAILURE_EXIT_CODE: u8 = 127;

/// Everything needed to start one child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Overrides applied to the child's environment only
    pub env: Vec<(String, String)>,
    pub current_dir: Option<PathBuf>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn current_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.current_dir = dir;
        self
    }

    pub fn env_value(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Shell-equivalent rendering, e.g. `CUDA_VISIBLE_DEVICES=4 th script/main.lua`.
    ///
    /// For display only; [`ProcessLauncher`] never goes through a shell.
    pub fn command_line(&self) -> String {
        let env = self
            .env
            .iter()
            .map(|(key, value)| format!("{key}={}", escape(Cow::Borrowed(value.as_str()))));
        let words = std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|word| escape(Cow::Borrowed(word.as_str())).into_owned());
        env.chain(words).collect::<Vec<_>>().join(" ")
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command.envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
    }
}

impl fmt::Display for LaunchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// How a launched child finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchOutcome {
    Exited(i32),
    Signaled(i32),
}

impl LaunchOutcome {
    pub fn success(&self) -> bool {
        matches!(self, LaunchOutcome::Exited(0))
    }

    /// Exit code for the parent: the child's code, or `128 + signal`.
    pub fn exit_code(&self) -> u8 {
        match *self {
            LaunchOutcome::Exited(code) => (code & 0xff) as u8,
            LaunchOutcome::Signaled(signal) => (128 + signal).clamp(0, 255) as u8,
        }
    }
}

impl From<ExitStatus> for LaunchOutcome {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return LaunchOutcome::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return LaunchOutcome::Signaled(signal);
            }
        }

        LaunchOutcome::Exited(1)
    }
}

impl fmt::Display for LaunchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchOutcome::Exited(code) => write!(f, "exit code {code}"),
            LaunchOutcome::Signaled(signal) => write!(f, "signal {signal}"),
        }
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait Launcher {
    /// Run the child to completion.
    fn launch(&self, spec: &LaunchSpec) -> std::io::Result<LaunchOutcome>;
}

/// Spawns the child with inherited stdio and blocks until it exits.
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, spec: &LaunchSpec) -> std::io::Result<LaunchOutcome> {
        spec.to_command().status().map(LaunchOutcome::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_with_env() {
        let spec = LaunchSpec::new("th")
            .arg("script/main.lua")
            .env("CUDA_VISIBLE_DEVICES", "4");
        assert_eq!(spec.command_line(), "CUDA_VISIBLE_DEVICES=4 th script/main.lua");
        assert_eq!(spec.env_value("CUDA_VISIBLE_DEVICES"), Some("4"));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_line_escapes_words() {
        let spec = LaunchSpec::new("th").arg("my script.lua; rm -rf /");
        assert_eq!(spec.command_line(), "th 'my script.lua; rm -rf /'");
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(LaunchOutcome::Exited(0).exit_code(), 0);
        assert_eq!(LaunchOutcome::Exited(3).exit_code(), 3);
        assert_eq!(LaunchOutcome::Exited(256).exit_code(), 0);
        assert_eq!(LaunchOutcome::Signaled(9).exit_code(), 137);
        assert!(LaunchOutcome::Exited(0).success());
        assert!(!LaunchOutcome::Signaled(15).success());
    }

    #[cfg(unix)]
    #[test]
    fn test_process_launcher_reports_exit_code() {
        let spec = LaunchSpec::new("sh").arg("-c").arg("exit 7");
        let outcome = ProcessLauncher.launch(&spec).unwrap();
        assert_eq!(outcome, LaunchOutcome::Exited(7));
    }

    #[cfg(unix)]
    #[test]
    fn test_process_launcher_applies_env_override() {
        let spec = LaunchSpec::new("sh")
            .arg("-c")
            .arg("test \"$GANRUN_TEST_DEVICE\" = 4")
            .env("GANRUN_TEST_DEVICE", "4");
        assert!(ProcessLauncher.launch(&spec).unwrap().success());
    }

    #[test]
    fn test_process_launcher_missing_program() {
        let spec = LaunchSpec::new("ganrun-definitely-not-a-real-program");
        assert!(ProcessLauncher.launch(&spec).is_err());
    }
}
