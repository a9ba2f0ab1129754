use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{info, warn};

use super::resize;
use super::supervisor::DecodeSupervisor;
use super::traits::CameraHost;

pub const SNAPSHOT_FILE: &str = "screen.jpg";
pub const SNAPSHOT_FULLRES_FILE: &str = "screen_fullres.jpg";

/// The best-available still image. `degraded` marks calls that could not
/// refresh the file; `modified` is the output file's mtime, when it exists,
/// so callers can judge staleness themselves.
#[derive(Debug, Clone)]
pub struct SnapshotArtifact {
    pub path: PathBuf,
    pub degraded: bool,
    pub modified: Option<SystemTime>,
}

impl SnapshotArtifact {
    fn observe(path: PathBuf, degraded: bool) -> Self {
        let modified = std::fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .ok();
        Self {
            path,
            degraded,
            modified,
        }
    }
}

pub struct SnapshotResolver {
    snapshot_url: Option<String>,
    output_path: PathBuf,
    fullres_path: PathBuf,
}

impl SnapshotResolver {
    pub fn new(snapshot_url: Option<String>, snapshot_dir: &Path) -> Self {
        Self {
            snapshot_url,
            output_path: snapshot_dir.join(SNAPSHOT_FILE),
            fullres_path: snapshot_dir.join(SNAPSHOT_FULLRES_FILE),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub async fn resolve<H: CameraHost + ?Sized>(
        &self,
        host: &H,
        supervisor: &DecodeSupervisor,
    ) -> SnapshotArtifact {
        let Some(url) = self.snapshot_url.as_deref() else {
            // The continuous decode keeps the output fresh; the file may not
            // exist yet before the first frame lands.
            supervisor.ensure_running().await;
            let missing = !self.output_path.exists();
            return SnapshotArtifact::observe(self.output_path.clone(), missing);
        };

        info!("downloading snapshot from {url}");
        if host.fetch_to_file(url, &self.fullres_path).await {
            match resize::shrink_to_bounds(&self.fullres_path, &self.output_path) {
                Ok((width, height)) => {
                    info!("resized snapshot to {width}x{height}");
                    return SnapshotArtifact::observe(self.output_path.clone(), false);
                }
                Err(err) => warn!("could not process downloaded snapshot: {err}"),
            }
        } else {
            warn!("could not download snapshot");
        }
        // Whatever was produced last, if anything, remains the answer.
        SnapshotArtifact::observe(self.output_path.clone(), true)
    }
}
