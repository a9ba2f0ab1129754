use std::env;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_name: String,
    pub source: String,
    pub rtsp_transport: String,
    pub snapshot_url: Option<String>,
    pub http_api_port: Option<u16>,
    pub motion_webhook_url: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "rtspcam".to_owned());
        let source = env::var("CAMERA_SOURCE")
            .context("CAMERA_SOURCE must be set to the stream source URI")?;
        let rtsp_transport = env::var("RTSP_TRANSPORT").unwrap_or_else(|_| "tcp".to_owned());
        let snapshot_url = env::var("SNAPSHOT_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let http_api_port = match env::var("HTTP_API_PORT") {
            Ok(value) if !value.trim().is_empty() => {
                let port: u16 = value
                    .trim()
                    .parse()
                    .context("HTTP_API_PORT must be a port number")?;
                // Port 0 keeps the HTTP API disabled.
                (port != 0).then_some(port)
            }
            _ => None,
        };
        let motion_webhook_url = env::var("MOTION_WEBHOOK_URL")
            .ok()
            .filter(|value| !value.trim().is_empty());

        Ok(Self {
            app_name,
            source,
            rtsp_transport,
            snapshot_url,
            http_api_port,
            motion_webhook_url,
        })
    }
}
