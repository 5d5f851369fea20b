use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/dashboard", get(handlers::summary::get_dashboard))
        .route("/api/calendar", get(handlers::summary::get_calendar))
}
