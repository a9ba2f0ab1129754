mod camera;
mod config;
mod host;
mod notify;
mod web;

use std::sync::Arc;

use camera::rtsp::RtspCamera;
use camera::traits::CameraBackend;
use config::AppConfig;
use host::HttpHost;
use notify::webhook::WebhookNotifier;
use tracing::info;
use tracing_appender::rolling;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tokio::fs::create_dir_all("logs").await?;
    let file_appender = rolling::daily("logs", "rtspcam.log");
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env()?;
    let notifier = WebhookNotifier::from_config(&config);
    let host = Arc::new(HttpHost::new(notifier));

    let camera = RtspCamera::new(config.clone(), host).await?;
    camera.run().await?;
    info!("{} bridging {}", config.app_name, camera.stream_source(0));

    tokio::signal::ctrl_c().await?;
    info!("shutting down");
    camera.close().await;

    Ok(())
}
