//! External command execution
//!
//! Every subprocess the engine spawns (git, gh, onefetch, the commit tool)
//! goes through the [`CommandRunner`] trait so that callers depend on a
//! capture contract instead of process-spawning primitives. Tests swap in a
//! scripted runner and never touch a real shell.

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;

/// Maximum time one external command may run before it is failed.
pub const COMMAND_TIMEOUT_SECS: u64 = 180;

/// Captured result of one external command invocation.
#[derive(Clone, Debug)]
pub struct CommandOutput {
    /// Process exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// Returns true when the command exited with code 0
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Returns the most useful human-readable detail: stderr when present,
    /// stdout otherwise
    pub fn detail(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Trait for running external commands with an explicit working directory
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`, with the child's working directory set to
    /// `cwd`. Returns Err only for spawn failures and timeouts; a non-zero
    /// exit is a normal `CommandOutput`.
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput>;
}

/// Runner backed by real processes, with a bounded per-command timeout.
///
/// The calling process never changes its own working directory: the child
/// gets `cwd` directly, so an aborted step can never leave the process
/// stranded inside a repository.
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(COMMAND_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        let result = tokio::time::timeout(
            self.timeout,
            Command::new(program).args(args).current_dir(cwd).output(),
        )
        .await;

        match result {
            Ok(Ok(output)) => Ok(CommandOutput {
                code: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
            Ok(Err(e)) => Err(anyhow::anyhow!("failed to spawn {}: {}", program, e)),
            Err(_) => Err(anyhow::anyhow!(
                "{} timed out after {} seconds",
                program,
                self.timeout.as_secs()
            )),
        }
    }
}

#[cfg(test)]
pub(crate) mod scripted {
    //! Deterministic runner for unit tests: canned outputs keyed by the
    //! command line, plus a log of every invocation.

    use super::*;
    use std::sync::Mutex;

    pub struct ScriptedRunner {
        responses: Vec<(String, CommandOutput)>,
        pub calls: Mutex<Vec<String>>,
    }

    impl ScriptedRunner {
        pub fn new() -> Self {
            Self {
                responses: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Registers a canned response for any command line starting with
        /// `prefix` (e.g. "git pull"). First match wins.
        pub fn on(mut self, prefix: &str, code: i32, stdout: &str, stderr: &str) -> Self {
            self.responses.push((
                prefix.to_string(),
                CommandOutput {
                    code: Some(code),
                    stdout: stdout.to_string(),
                    stderr: stderr.to_string(),
                },
            ));
            self
        }

        /// Returns the recorded command lines, oldest first
        pub fn recorded(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, program: &str, args: &[&str], _cwd: &Path) -> Result<CommandOutput> {
            let line = std::iter::once(program)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            self.calls.lock().unwrap().push(line.clone());

            for (prefix, output) in &self.responses {
                if line.starts_with(prefix.as_str()) {
                    return Ok(output.clone());
                }
            }
            // Unscripted commands succeed quietly; tests only script what
            // they care about.
            Ok(CommandOutput {
                code: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }
}
