// Mock adapters - In-memory port implementations for tests

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::model::*;
use crate::error::{SyncError, SyncResult};
use crate::ports::*;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Probe adapter answering from a fixed table
#[derive(Default)]
pub struct MockProbeAdapter {
    media: HashMap<PathBuf, MediaInfo>,
    failures: HashMap<PathBuf, String>,
    calls: Mutex<Vec<PathBuf>>,
}

impl MockProbeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_media(mut self, path: impl Into<PathBuf>, info: MediaInfo) -> Self {
        self.media.insert(path.into(), info);
        self
    }

    /// Shorthand for a 1920x1080 clip with the given duration and tag
    pub fn with_clip(self, path: impl Into<PathBuf>, duration: f64, creation_time: Option<&str>) -> Self {
        self.with_media(
            path,
            MediaInfo::new(duration, 1920, 1080, creation_time.map(str::to_string)),
        )
    }

    pub fn with_failure(mut self, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        self.failures.insert(path.into(), message.into());
        self
    }

    /// Paths probed so far, in call order
    pub fn calls(&self) -> Vec<PathBuf> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl ProbePort for MockProbeAdapter {
    async fn probe_media(&self, path: &Path) -> SyncResult<MediaInfo> {
        lock(&self.calls).push(path.to_path_buf());

        if let Some(message) = self.failures.get(path) {
            return Err(SyncError::Probe {
                path: path.to_path_buf(),
                message: message.clone(),
            });
        }

        self.media
            .get(path)
            .cloned()
            .ok_or_else(|| SyncError::Probe {
                path: path.to_path_buf(),
                message: "No such file or directory".to_string(),
            })
    }
}

/// Encode adapter that records commands instead of running them
#[derive(Default)]
pub struct MockEncodeAdapter {
    failure: Option<String>,
    commands: Mutex<Vec<EncodeCommand>>,
}

impl MockEncodeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every encode fail with the given stderr text
    pub fn failing(stderr: impl Into<String>) -> Self {
        Self {
            failure: Some(stderr.into()),
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn commands(&self) -> Vec<EncodeCommand> {
        lock(&self.commands).clone()
    }
}

#[async_trait]
impl EncodePort for MockEncodeAdapter {
    async fn encode(&self, command: &EncodeCommand) -> SyncResult<EncodeReport> {
        lock(&self.commands).push(command.clone());

        if let Some(stderr) = &self.failure {
            return Err(SyncError::Encode {
                status: "exit status: 1".to_string(),
                stderr: stderr.clone(),
            });
        }

        Ok(EncodeReport {
            output: command.output.clone(),
            elapsed: Duration::ZERO,
        })
    }
}

/// Filesystem adapter with a fixed set of existing files
#[derive(Default)]
pub struct MockFsAdapter {
    existing: HashSet<PathBuf>,
}

impl MockFsAdapter {
    pub fn with_files<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            existing: paths.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl FsPort for MockFsAdapter {
    async fn file_exists(&self, path: &Path) -> SyncResult<bool> {
        Ok(self.existing.contains(path))
    }
}
