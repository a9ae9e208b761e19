//! Infrastructure implementation of the `CommandExecutor` port.
//!
//! `TokioCommandExecutor` is the production implementation that uses tokio
//! to run shell command lines with a guaranteed timeout and kill.

use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::AsyncReadExt;

use crate::application::ports::{CommandExecutor, WorkdirGuard, WorkingDir};

/// Shell used to interpret command lines (they carry quoted `-var` pairs).
pub const SHELL: &str = "sh";

/// Production `CommandExecutor`: runs `sh -c <command>` through tokio.
///
/// `tokio::time::timeout` around `.output().await` would drop the future but
/// leave the child running; `tokio::select!` with an explicit `child.kill()`
/// guarantees the process is terminated.
pub struct TokioCommandExecutor {
    timeout: Duration,
    workdir: WorkingDir,
}

impl TokioCommandExecutor {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            workdir: WorkingDir::new(),
        }
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Directory the next command will run in, if scoped.
    #[must_use]
    pub fn workdir(&self) -> Option<std::path::PathBuf> {
        self.workdir.current()
    }

    async fn run_output(&self, command: &str) -> Result<Output> {
        let mut cmd = tokio::process::Command::new(SHELL);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = self.workdir.current() {
            cmd.current_dir(dir);
        }
        let mut child = cmd
            .spawn()
            .with_context(|| format!("failed to spawn {command}"))?;

        let mut stdout_handle = child.stdout.take();
        let mut stderr_handle = child.stderr.take();

        tokio::select! {
            result = async {
                let (status, stdout, stderr) = tokio::join!(
                    child.wait(),
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stdout_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                    async {
                        let mut buf = Vec::new();
                        if let Some(ref mut h) = stderr_handle {
                            let _ = h.read_to_end(&mut buf).await;
                        }
                        buf
                    },
                );
                Ok(Output {
                    status: status.with_context(|| format!("waiting for {command}"))?,
                    stdout,
                    stderr,
                })
            } => result,
            () = tokio::time::sleep(self.timeout) => {
                let _ = child.kill().await;
                anyhow::bail!("{command} timed out after {}s", self.timeout.as_secs())
            }
        }
    }
}

impl CommandExecutor for TokioCommandExecutor {
    async fn run(&self, command: &str) -> Result<String> {
        let output = self.run_output(command).await?;
        if !output.status.success() {
            let code = output
                .status
                .code()
                .map_or_else(|| "signal".to_string(), |c| c.to_string());
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("{command} exited with {code}: {}", stderr.trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn cd(&self, path: &Path) -> Result<WorkdirGuard<'_>> {
        let guard = self.workdir.enter(path);
        if let Some(dir) = self.workdir.current()
            && !dir.is_dir()
        {
            anyhow::bail!("{} is not a directory", dir.display());
        }
        Ok(guard)
    }
}
