//! Command executor for running shell commands
//!
//! Generators run external commands (the dependency install) through the
//! [`CommandExecutor`] trait so tests can observe invocations without
//! spawning processes. Execution is blocking: the caller waits for the
//! command to finish.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::core::error::{Error, Result};

/// Trait for executing shell commands
pub trait CommandExecutor: Send + Sync {
    /// Execute a shell command in the given working directory
    fn execute(&self, command: &str, working_dir: &Path) -> Result<CommandResult>;
}

/// Result of command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    /// Check if the command was successful
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Default command executor using the platform shell
pub struct ShellCommandExecutor {
    /// Pass the command's stdout through to ours instead of capturing it
    stream_stdout: bool,
}

impl ShellCommandExecutor {
    /// Executor capturing both output streams
    pub fn new() -> Self {
        Self {
            stream_stdout: false,
        }
    }

    /// Executor whose commands write progress straight to the terminal.
    /// Stderr is still captured for error reporting.
    pub fn streaming() -> Self {
        Self {
            stream_stdout: true,
        }
    }
}

impl Default for ShellCommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor for ShellCommandExecutor {
    fn execute(&self, command: &str, working_dir: &Path) -> Result<CommandResult> {
        let (shell, shell_arg) = if cfg!(target_os = "windows") {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        let stdout = if self.stream_stdout {
            Stdio::inherit()
        } else {
            Stdio::piped()
        };

        let output = Command::new(shell)
            .arg(shell_arg)
            .arg(command)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::Subprocess {
                command: command.to_string(),
                exit_code: -1,
                stderr: format!("failed to spawn: {e}"),
            })?;

        Ok(CommandResult {
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Mock command executor for testing; records every invocation
#[cfg(test)]
pub struct MockCommandExecutor {
    pub results: std::collections::HashMap<String, CommandResult>,
    pub calls: std::sync::Mutex<Vec<(String, std::path::PathBuf)>>,
}

#[cfg(test)]
impl MockCommandExecutor {
    pub fn new() -> Self {
        Self {
            results: std::collections::HashMap::new(),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_result(
        mut self,
        command: &str,
        exit_code: i32,
        stdout: &str,
        stderr: &str,
    ) -> Self {
        self.results.insert(
            command.to_string(),
            CommandResult {
                exit_code,
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<(String, std::path::PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl CommandExecutor for MockCommandExecutor {
    fn execute(&self, command: &str, working_dir: &Path) -> Result<CommandResult> {
        self.calls
            .lock()
            .unwrap()
            .push((command.to_string(), working_dir.to_path_buf()));
        self.results.get(command).cloned().ok_or_else(|| Error::Subprocess {
            command: command.to_string(),
            exit_code: -1,
            stderr: "mock executor has no result for command".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[cfg(unix)]
    #[test]
    fn test_shell_command_executor_success() {
        let executor = ShellCommandExecutor::new();
        let dir = tempdir().unwrap();

        let result = executor.execute("echo hello", dir.path()).unwrap();

        assert!(result.is_success());
        assert_eq!(result.exit_code, 0);
        assert!(result.stdout.contains("hello"));
        assert!(result.stderr.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_command_executor_failure() {
        let executor = ShellCommandExecutor::new();
        let dir = tempdir().unwrap();

        let result = executor.execute("exit 3", dir.path()).unwrap();

        assert!(!result.is_success());
        assert_eq!(result.exit_code, 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_command_executor_runs_in_working_dir() {
        let executor = ShellCommandExecutor::new();
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();

        let result = executor.execute("ls", dir.path()).unwrap();
        assert!(result.stdout.contains("marker.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_streaming_executor_passes_stdout_through() {
        let executor = ShellCommandExecutor::streaming();
        let dir = tempdir().unwrap();

        let result = executor
            .execute("echo installing; echo warned >&2; exit 2", dir.path())
            .unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(result.stdout.is_empty());
        assert!(result.stderr.contains("warned"));
    }

    #[test]
    fn test_mock_command_executor() {
        let executor = MockCommandExecutor::new()
            .with_result("test1", 0, "output1", "")
            .with_result("test2", 1, "", "error");

        let dir = tempdir().unwrap();

        let result1 = executor.execute("test1", dir.path()).unwrap();
        assert!(result1.is_success());
        assert_eq!(result1.stdout, "output1");

        let result2 = executor.execute("test2", dir.path()).unwrap();
        assert!(!result2.is_success());
        assert_eq!(result2.stderr, "error");

        assert_eq!(executor.calls().len(), 2);
        assert!(executor.execute("unknown", dir.path()).is_err());
    }
}
