//! QuadSync Library
//!
//! Timestamp-based synchronization of four video clips and planning of the
//! ffmpeg command that composites them into a 2x2 grid.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod planner;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::model::{
    ClipTimestamp, CompositionPlan, Layout, MediaInfo, OffsetReport, OffsetSet, Resolution,
};
pub use error::{SyncError, SyncResult};
