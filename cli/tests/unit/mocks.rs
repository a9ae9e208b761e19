//! Shared mock infrastructure for unit tests.
//!
//! Provides a recording [`CommandExecutor`] so each test file doesn't have to
//! re-define the same boilerplate.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use dlab_cli::application::ports::{CommandExecutor, WorkdirGuard, WorkingDir};

/// One recorded `run()` call: the command line and the scoped directory it
/// ran in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub command: String,
    pub cwd: Option<PathBuf>,
}

/// A `CommandExecutor` that records every call and returns a canned result.
pub struct MockExecutor {
    calls: Arc<Mutex<Vec<Call>>>,
    result: Arc<dyn Fn(&str) -> Result<String> + Send + Sync>,
    workdir: WorkingDir,
}

impl MockExecutor {
    /// Always return `stdout`.
    pub fn returning(stdout: &'static str) -> Self {
        Self::with(move |_| Ok(stdout.to_string()))
    }

    /// Always fail with `msg`.
    pub fn failing(msg: &'static str) -> Self {
        Self::with(move |_| bail!("{msg}"))
    }

    pub fn with(result: impl Fn(&str) -> Result<String> + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result: Arc::new(result),
            workdir: WorkingDir::new(),
        }
    }

    /// Snapshot of all recorded calls.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("mutex poisoned").clone()
    }

    /// Recorded command lines only.
    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }

    /// Directory commands would run in right now.
    pub fn cwd(&self) -> Option<PathBuf> {
        self.workdir.current()
    }
}

impl CommandExecutor for MockExecutor {
    async fn run(&self, command: &str) -> Result<String> {
        self.calls.lock().expect("mutex poisoned").push(Call {
            command: command.to_owned(),
            cwd: self.workdir.current(),
        });
        (self.result)(command)
    }

    fn cd(&self, path: &Path) -> Result<WorkdirGuard<'_>> {
        Ok(self.workdir.enter(path))
    }
}
