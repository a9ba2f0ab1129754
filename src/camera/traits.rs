use std::path::Path;

use anyhow::Result;
use async_trait::async_trait;

use super::snapshot::SnapshotArtifact;

/// Collaborators the host integration provides to a camera backend.
#[async_trait]
pub trait CameraHost: Send + Sync {
    /// Download `url` into `dest`, returning whether the file was written.
    async fn fetch_to_file(&self, url: &str, dest: &Path) -> bool;
    async fn trigger_motion_start(&self);
    async fn trigger_motion_stop(&self);
}

/// Surface a camera backend exposes to the host integration.
#[async_trait]
pub trait CameraBackend: Send + Sync {
    async fn get_snapshot(&self) -> SnapshotArtifact;
    fn stream_source(&self, stream_index: usize) -> String;
    async fn run(&self) -> Result<()>;
    async fn close(&self);
}
