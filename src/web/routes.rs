use std::sync::Arc;

use axum::{Router, routing::get};

use crate::camera::traits::CameraHost;

use super::handlers;

pub fn build_router<H: CameraHost + 'static>(host: Arc<H>) -> Router {
    Router::new()
        .route("/start_motion", get(handlers::start_motion::<H>))
        .route("/stop_motion", get(handlers::stop_motion::<H>))
        .with_state(host)
}
