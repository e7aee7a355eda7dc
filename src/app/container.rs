use std::sync::Arc;

use crate::adapters::{FFmpegAdapter, FFprobeAdapter, FsLocalAdapter};
use crate::app::ComposeInteractor;
use crate::config_initialization::Settings;
use crate::ports::{EncodePort, FsPort, ProbePort};

pub trait AppContainer: Send + Sync {
    fn compose_interactor(&self) -> Arc<ComposeInteractor>;
}

/// Wires the subprocess-backed adapters into the interactors
pub struct DefaultAppContainer {
    compose_interactor: Arc<ComposeInteractor>,
}

impl DefaultAppContainer {
    pub fn new(settings: &Settings) -> Self {
        let probe_port: Arc<dyn ProbePort> = Arc::new(FFprobeAdapter::new(settings.ffprobe.clone()));
        let encode_port: Arc<dyn EncodePort> = Arc::new(FFmpegAdapter::new());
        let fs_port: Arc<dyn FsPort> = Arc::new(FsLocalAdapter::new());

        let compose_interactor = Arc::new(ComposeInteractor::new(
            probe_port,
            encode_port,
            fs_port,
            settings.ffmpeg.clone(),
        ));

        Self { compose_interactor }
    }
}

impl AppContainer for DefaultAppContainer {
    fn compose_interactor(&self) -> Arc<ComposeInteractor> {
        Arc::clone(&self.compose_interactor)
    }
}
