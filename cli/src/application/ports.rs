//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Result;

use crate::domain::config::DlabConfig;

// ── Value Types ───────────────────────────────────────────────────────────────

/// Working directory applied to commands an executor runs.
///
/// `None` means the process's own current directory. Changes are scoped
/// through [`WorkingDir::enter`]; the process-wide cwd is never touched.
#[derive(Debug, Default)]
pub struct WorkingDir {
    current: Mutex<Option<PathBuf>>,
}

impl WorkingDir {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The directory commands currently run in.
    #[must_use]
    pub fn current(&self) -> Option<PathBuf> {
        self.lock().clone()
    }

    /// Switch to `path` until the returned guard is dropped.
    ///
    /// Relative paths resolve against the current scoped directory. An empty
    /// path leaves the directory unchanged.
    pub fn enter(&self, path: &Path) -> WorkdirGuard<'_> {
        let mut current = self.lock();
        let previous = current.clone();
        if !path.as_os_str().is_empty() {
            let next = match current.as_deref() {
                Some(base) => base.join(path),
                None => path.to_path_buf(),
            };
            *current = Some(next);
        }
        WorkdirGuard {
            dir: self,
            previous,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<PathBuf>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Restores the previous working directory when dropped, on every exit path.
#[must_use = "the directory change is undone as soon as the guard is dropped"]
pub struct WorkdirGuard<'a> {
    dir: &'a WorkingDir,
    previous: Option<PathBuf>,
}

impl Drop for WorkdirGuard<'_> {
    fn drop(&mut self) {
        *self.dir.lock() = self.previous.take();
    }
}

// ── Command Executor Port ─────────────────────────────────────────────────────

/// Abstracts shell command execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor {
    /// Run a shell command line and return its standard output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned, times out, or
    /// exits unsuccessfully.
    async fn run(&self, command: &str) -> Result<String>;

    /// Run subsequent commands in `path` until the guard is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` cannot be used as a working directory.
    fn cd(&self, path: &Path) -> Result<WorkdirGuard<'_>>;
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence (load/save).
pub trait ConfigStore {
    /// Load configuration, returning defaults if no file exists.
    fn load(&self) -> Result<DlabConfig>;
    /// Persist the given configuration.
    fn save(&self, config: &DlabConfig) -> Result<()>;
    /// Location of the configuration file.
    fn path(&self) -> Result<PathBuf>;
}
