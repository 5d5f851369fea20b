use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use otsched_core::{
    models::summary::AvailableSlotsResponse,
    scheduling::{available_slots, booked_slots},
};
use otsched_db::{models::to_bookings, repositories::surgery as surgery_repo};
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
}

/// Free and booked time in one theater on one day.
///
/// # Endpoint
///
/// ```text
/// GET /api/ots/:ot_id/available-slots?date=2025-03-14
/// ```
///
/// Free windows are `slot_minutes` long, start every `step_minutes` from
/// opening time, and end no later than closing time.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    Path(ot_id): Path<String>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let rows =
        surgery_repo::bookings_for_theater_on_date(&state.db_pool, &ot_id, query.date).await?;
    let bookings = to_bookings(&rows)?;

    Ok(Json(AvailableSlotsResponse {
        available_slots: available_slots(&state.operating_day, &ot_id, query.date, &bookings),
        booked_slots: booked_slots(&ot_id, query.date, &bookings),
    }))
}
