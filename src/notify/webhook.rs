use anyhow::{Context, Result, bail};
use reqwest::Client;
use serde::Serialize;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct WebhookNotifier {
    url: String,
    camera: String,
    client: Client,
}

#[derive(Serialize)]
struct MotionEventRequest<'a> {
    camera: &'a str,
    event: &'a str,
}

impl WebhookNotifier {
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        let url = config.motion_webhook_url.clone()?;
        Some(Self {
            url,
            camera: config.app_name.clone(),
            client: Client::new(),
        })
    }

    pub async fn send_event(&self, event: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(&MotionEventRequest {
                camera: &self.camera,
                event,
            })
            .send()
            .await
            .context("failed to send motion webhook request")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("motion webhook error status={status} body={body}");
        }

        Ok(())
    }
}
