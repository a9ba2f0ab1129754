use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::camera::traits::CameraHost;

use super::routes;

pub struct ControlServer {
    addr: SocketAddr,
    shutdown: watch::Sender<bool>,
    serve_task: JoinHandle<()>,
}

impl ControlServer {
    /// Bind on all interfaces and serve in the background. The listener is
    /// accepting connections before this returns.
    pub async fn start<H: CameraHost + 'static>(port: u16, host: Arc<H>) -> Result<Self> {
        let listener = TcpListener::bind(SocketAddr::from(([0, 0, 0, 0], port)))
            .await
            .with_context(|| format!("failed to bind control api on port {port}"))?;
        let addr = listener
            .local_addr()
            .context("failed to read control api address")?;
        let app = routes::build_router(host);

        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let serve_task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
            });
            if let Err(err) = serve.await {
                error!("control api server failed: {err}");
            }
        });

        info!("control api listening on {addr}");
        Ok(Self {
            addr,
            shutdown,
            serve_task,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        let _ = self.serve_task.await;
    }
}
