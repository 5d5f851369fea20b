use axum::{Router, routing::get};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new().route(
        "/api/ots/:ot_id/available-slots",
        get(handlers::theater::get_available_slots),
    )
}
