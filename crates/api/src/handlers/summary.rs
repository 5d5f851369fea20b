use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Local, Months, NaiveDate};
use otsched_core::{
    errors::OtError,
    models::summary::{CalendarResponse, DashboardResponse},
    scheduling::{month_calendar, summarize_day},
};
use otsched_db::{
    models::to_bookings,
    repositories::{doctor as doctor_repo, patient as patient_repo, surgery as surgery_repo},
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Defaults to today in server-local time
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

#[axum::debug_handler]
pub async fn get_dashboard(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());

    let rows = surgery_repo::list_surgeries(&state.db_pool, Some(date), None).await?;
    let mut summary = summarize_day(date, &to_bookings(&rows)?);
    summary.total_doctors = doctor_repo::count_doctors(&state.db_pool).await?;
    summary.total_patients = patient_repo::count_patients(&state.db_pool).await?;

    Ok(Json(summary))
}

#[axum::debug_handler]
pub async fn get_calendar(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let (first, last) = month_bounds(query.year, query.month)?;

    let rows = surgery_repo::surgeries_between(&state.db_pool, first, last).await?;
    let days = month_calendar(query.year, query.month, &to_bookings(&rows)?)?;

    Ok(Json(CalendarResponse {
        year: query.year,
        month: query.month,
        days,
    }))
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), OtError> {
    let invalid = || OtError::Validation(format!("invalid month {}-{:02}", year, month));
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    Ok((first, last))
}
