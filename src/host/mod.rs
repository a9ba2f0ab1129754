use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{info, warn};

use crate::camera::traits::CameraHost;
use crate::notify::webhook::WebhookNotifier;

pub struct HttpHost {
    client: Client,
    notifier: Option<Arc<WebhookNotifier>>,
}

impl HttpHost {
    pub fn new(notifier: Option<WebhookNotifier>) -> Self {
        Self {
            client: Client::new(),
            notifier: notifier.map(Arc::new),
        }
    }

    fn notify(&self, event: &'static str) {
        let Some(notifier) = self.notifier.clone() else {
            return;
        };

        tokio::spawn(async move {
            if let Err(err) = notifier.send_event(event).await {
                warn!("motion webhook notify failed: {err}");
            }
        });
    }
}

#[async_trait]
impl CameraHost for HttpHost {
    async fn fetch_to_file(&self, url: &str, dest: &Path) -> bool {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("snapshot request failed: {err}");
                return false;
            }
        };
        if !response.status().is_success() {
            warn!("snapshot request returned status {}", response.status());
            return false;
        }
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!("failed to read snapshot body: {err}");
                return false;
            }
        };
        if let Err(err) = tokio::fs::write(dest, &bytes).await {
            warn!("failed to write snapshot to {}: {err}", dest.display());
            return false;
        }
        true
    }

    async fn trigger_motion_start(&self) {
        info!("motion start signalled");
        self.notify("motion_start");
    }

    async fn trigger_motion_stop(&self) {
        info!("motion stop signalled");
        self.notify("motion_stop");
    }
}
