use std::sync::Arc;

use axum::extract::State;
use tracing::debug;

use crate::camera::traits::CameraHost;

pub async fn start_motion<H: CameraHost + 'static>(State(host): State<Arc<H>>) -> &'static str {
    debug!("starting motion");
    host.trigger_motion_start().await;
    "ok"
}

pub async fn stop_motion<H: CameraHost + 'static>(State(host): State<Arc<H>>) -> &'static str {
    debug!("stopping motion");
    host.trigger_motion_stop().await;
    "ok"
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use axum::extract::State;

    use crate::camera::traits::CameraHost;

    use super::{start_motion, stop_motion};

    #[derive(Default)]
    struct RecordingHost {
        starts: AtomicUsize,
        stops: AtomicUsize,
    }

    #[async_trait]
    impl CameraHost for RecordingHost {
        async fn fetch_to_file(&self, _url: &str, _dest: &Path) -> bool {
            false
        }

        async fn trigger_motion_start(&self) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        async fn trigger_motion_stop(&self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn start_motion_invokes_the_sink_once() {
        let host = Arc::new(RecordingHost::default());

        let body = start_motion(State(host.clone())).await;

        assert_eq!(body, "ok");
        assert_eq!(host.starts.load(Ordering::SeqCst), 1);
        assert_eq!(host.stops.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stop_motion_invokes_the_sink_once() {
        let host = Arc::new(RecordingHost::default());

        let body = stop_motion(State(host.clone())).await;

        assert_eq!(body, "ok");
        assert_eq!(host.stops.load(Ordering::SeqCst), 1);
        assert_eq!(host.starts.load(Ordering::SeqCst), 0);
    }
}
