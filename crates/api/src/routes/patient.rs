use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/patients",
            post(handlers::patient::create_patient).get(handlers::patient::list_patients),
        )
        .route(
            "/api/patients/:id",
            get(handlers::patient::get_patient)
                .put(handlers::patient::update_patient)
                .delete(handlers::patient::delete_patient),
        )
}
