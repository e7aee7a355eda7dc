// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::model::*;
use crate::error::SyncResult;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file and return its normalized information.
    ///
    /// Every call runs the prober again; results are never cached.
    async fn probe_media(&self, path: &Path) -> SyncResult<MediaInfo>;
}

/// Port for running the composite encode
#[async_trait]
pub trait EncodePort: Send + Sync {
    /// Run the command to completion. A non-zero exit is an error carrying
    /// the encoder's stderr.
    async fn encode(&self, command: &EncodeCommand) -> SyncResult<EncodeReport>;
}

/// Port for file system checks
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, path: &Path) -> SyncResult<bool>;
}
