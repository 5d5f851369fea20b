use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/doctors",
            post(handlers::doctor::create_doctor).get(handlers::doctor::list_doctors),
        )
        .route(
            "/api/doctors/:id",
            get(handlers::doctor::get_doctor)
                .put(handlers::doctor::update_doctor)
                .delete(handlers::doctor::delete_doctor),
        )
}
