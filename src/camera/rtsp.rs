use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use crate::config::AppConfig;
use crate::web::server::ControlServer;

use super::snapshot::{SnapshotArtifact, SnapshotResolver};
use super::supervisor::DecodeSupervisor;
use super::traits::{CameraBackend, CameraHost};

pub struct RtspCamera<H: CameraHost + 'static> {
    config: AppConfig,
    host: Arc<H>,
    supervisor: DecodeSupervisor,
    resolver: SnapshotResolver,
    control: Mutex<Option<ControlServer>>,
}

impl<H: CameraHost + 'static> RtspCamera<H> {
    pub async fn new(config: AppConfig, host: Arc<H>) -> Result<Self> {
        // One working directory per adapter instance; cleanup is left to the
        // operating system.
        let snapshot_dir = tempfile::Builder::new()
            .prefix("rtspcam-")
            .tempdir()
            .context("failed to create snapshot directory")?
            .into_path();
        let resolver = SnapshotResolver::new(config.snapshot_url.clone(), &snapshot_dir);
        let supervisor = DecodeSupervisor::new(&config, resolver.output_path());
        if config.snapshot_url.is_none() {
            supervisor.ensure_running().await;
        }

        Ok(Self {
            config,
            host,
            supervisor,
            resolver,
            control: Mutex::new(None),
        })
    }

    pub async fn control_addr(&self) -> Option<SocketAddr> {
        let control = self.control.lock().await;
        control.as_ref().map(|server| server.local_addr())
    }
}

#[async_trait]
impl<H: CameraHost + 'static> CameraBackend for RtspCamera<H> {
    async fn get_snapshot(&self) -> SnapshotArtifact {
        self.resolver
            .resolve(self.host.as_ref(), &self.supervisor)
            .await
    }

    fn stream_source(&self, _stream_index: usize) -> String {
        // Single-stream adapter: every index maps to the configured source.
        self.config.source.clone()
    }

    async fn run(&self) -> Result<()> {
        let Some(port) = self.config.http_api_port else {
            return Ok(());
        };
        info!("enabling http api on port {port}");
        let server = ControlServer::start(port, self.host.clone()).await?;
        *self.control.lock().await = Some(server);
        Ok(())
    }

    async fn close(&self) {
        // The control surface goes down before the media process; it is the
        // only consumer of motion signalling.
        if let Some(server) = self.control.lock().await.take() {
            server.stop().await;
        }
        self.supervisor.terminate().await;
    }
}
