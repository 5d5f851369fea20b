use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/surgeries",
            post(handlers::surgery::create_surgery).get(handlers::surgery::list_surgeries),
        )
        .route(
            "/api/surgeries/check-conflict",
            post(handlers::surgery::check_conflict),
        )
        .route(
            "/api/surgeries/emergency",
            post(handlers::surgery::schedule_emergency_surgery),
        )
        .route(
            "/api/surgeries/:id",
            get(handlers::surgery::get_surgery)
                .put(handlers::surgery::update_surgery)
                .delete(handlers::surgery::cancel_surgery),
        )
}
