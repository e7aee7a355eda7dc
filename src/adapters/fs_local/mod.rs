// Local filesystem adapter

use std::path::Path;

use async_trait::async_trait;

use crate::error::SyncResult;
use crate::ports::*;

/// Filesystem adapter backed by the local disk
#[derive(Default)]
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn file_exists(&self, path: &Path) -> SyncResult<bool> {
        Ok(tokio::fs::try_exists(path).await?)
    }
}
