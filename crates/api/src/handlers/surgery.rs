//! # Surgery Handlers
//!
//! Booking, editing and cancelling surgeries, and the standalone conflict
//! check used by clients while a booking form is being filled in.
//!
//! Every booking path runs the same check: the surgeries already booked in
//! the candidate's theater on the candidate's date are loaded and handed to
//! [`otsched_core::scheduling::conflicting_bookings`]. The check fails open:
//! if the snapshot cannot be loaded the candidate is treated as free.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::NaiveDate;
use otsched_core::{
    errors::{OtError, OtResult},
    models::{
        CreatedResponse, MessageResponse,
        audit::AuditAction,
        surgery::{
            ConflictCheckRequest, ConflictCheckResponse, EmergencySurgeryResponse, Surgery,
            SurgeryRequest,
        },
    },
    scheduling::{Candidate, conflicting_bookings},
};
use otsched_db::{
    DbPool,
    models::{DbSurgery, to_bookings},
    repositories::{
        audit_log as audit_repo, doctor as doctor_repo, patient as patient_repo,
        surgery as surgery_repo,
    },
};
use serde::Deserialize;
use std::{future::Future, sync::Arc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

pub const CONFLICT_MESSAGE: &str = "Surgery time conflicts with existing schedule";

/// Query parameters for listing surgeries
#[derive(Debug, Deserialize)]
pub struct SurgeryQuery {
    pub date: Option<NaiveDate>,
    pub ot_id: Option<String>,
}

/// Evaluates `candidate` against the snapshot produced by `load`.
///
/// Returns `false` when loading fails or a row cannot be read, logging a
/// warning instead of surfacing the error.
pub async fn detect_conflict<F, Fut>(candidate: &Candidate, load: F) -> bool
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = eyre::Result<Vec<DbSurgery>>>,
{
    let rows = match load().await {
        Ok(rows) => rows,
        Err(err) => {
            warn!(
                "Conflict check for OT {} on {} skipped, bookings unavailable: {}",
                candidate.ot_id, candidate.date, err
            );
            return false;
        }
    };

    let bookings = match to_bookings(&rows) {
        Ok(bookings) => bookings,
        Err(err) => {
            warn!("Conflict check for OT {} skipped: {}", candidate.ot_id, err);
            return false;
        }
    };

    let clashes: Vec<Uuid> = conflicting_bookings(candidate, &bookings)
        .map(|booking| booking.id)
        .collect();
    if !clashes.is_empty() {
        info!(
            "OT {} on {} at {} clashes with {:?}",
            candidate.ot_id, candidate.date, candidate.start, clashes
        );
    }
    !clashes.is_empty()
}

/// Whether `request` would clash once stored. A cancelled request holds no
/// theater time, so it never clashes and `load` is not called.
pub async fn request_conflicts<F, Fut>(
    request: &SurgeryRequest,
    exclude_id: Option<Uuid>,
    load: F,
) -> bool
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = eyre::Result<Vec<DbSurgery>>>,
{
    if request.status.is_cancelled() {
        return false;
    }
    detect_conflict(&request.candidate(exclude_id), load).await
}

/// Rejects a regular booking or edit that clashes. Edits pass their own id as
/// `exclude_id` so the surgery's current slot does not count against it.
pub async fn ensure_bookable<F, Fut>(
    request: &SurgeryRequest,
    exclude_id: Option<Uuid>,
    load: F,
) -> OtResult<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = eyre::Result<Vec<DbSurgery>>>,
{
    if request_conflicts(request, exclude_id, load).await {
        return Err(OtError::Conflict(CONFLICT_MESSAGE.to_string()));
    }
    Ok(())
}

/// Marks `request` as an emergency and reports whether it needs manual
/// resolution because it clashes with an existing booking.
pub async fn prepare_emergency<F, Fut>(request: &mut SurgeryRequest, load: F) -> bool
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = eyre::Result<Vec<DbSurgery>>>,
{
    request.is_emergency = true;
    let needs_manual_resolution = request_conflicts(request, None, load).await;
    if needs_manual_resolution {
        warn!(
            "Emergency surgery in OT {} on {} overlaps existing bookings",
            request.ot_id, request.surgery_date
        );
    }
    needs_manual_resolution
}

fn theater_bookings<'a>(
    pool: &'a DbPool,
    ot_id: &'a str,
    date: NaiveDate,
) -> impl Future<Output = eyre::Result<Vec<DbSurgery>>> + 'a {
    surgery_repo::bookings_for_theater_on_date(pool, ot_id, date)
}

/// Rejects bookings that reference an unknown doctor or patient.
async fn ensure_participants(pool: &DbPool, surgery: &SurgeryRequest) -> Result<(), AppError> {
    if doctor_repo::get_doctor_by_id(pool, surgery.doctor_id).await?.is_none() {
        return Err(AppError(OtError::Validation(format!(
            "Doctor with ID {} does not exist",
            surgery.doctor_id
        ))));
    }
    if patient_repo::get_patient_by_id(pool, surgery.patient_id).await?.is_none() {
        return Err(AppError(OtError::Validation(format!(
            "Patient with ID {} does not exist",
            surgery.patient_id
        ))));
    }
    Ok(())
}

/// The audit trail is best effort; a failed write never undoes the booking.
async fn record_audit(
    pool: &DbPool,
    action: AuditAction,
    surgery_id: Uuid,
    user: &AuthUser,
    details: Option<String>,
) {
    if let Err(err) =
        audit_repo::create_audit_log(pool, action, surgery_id, &user.user_id, details.as_deref())
            .await
    {
        warn!("Failed to record {} for surgery {}: {}", action, surgery_id, err);
    }
}

fn schedule_details(prefix: &str, surgery: &SurgeryRequest) -> String {
    format!(
        "{} for {} at {} in OT {}",
        prefix,
        surgery.surgery_date,
        surgery.surgery_time.format(otsched_core::time_format::FORMAT),
        surgery.ot_id
    )
}

fn not_found(id: Uuid) -> OtError {
    OtError::NotFound(format!("Surgery with ID {} not found", id))
}

#[axum::debug_handler]
pub async fn create_surgery(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<SurgeryRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    payload.validate()?;
    ensure_participants(&state.db_pool, &payload).await?;

    ensure_bookable(&payload, None, || {
        theater_bookings(&state.db_pool, &payload.ot_id, payload.surgery_date)
    })
    .await?;

    let row = surgery_repo::create_surgery(&state.db_pool, &payload, false).await?;
    record_audit(
        &state.db_pool,
        AuditAction::SurgeryCreated,
        row.id,
        &user,
        Some(schedule_details("Surgery scheduled", &payload)),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: row.id,
            message: "Surgery scheduled successfully".to_string(),
        }),
    ))
}

#[axum::debug_handler]
pub async fn check_conflict(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<ConflictCheckRequest>,
) -> Result<Json<ConflictCheckResponse>, AppError> {
    payload.validate()?;

    let candidate = payload.candidate();
    let has_conflict = detect_conflict(&candidate, || {
        theater_bookings(&state.db_pool, &candidate.ot_id, candidate.date)
    })
    .await;

    Ok(Json(ConflictCheckResponse { has_conflict }))
}

#[axum::debug_handler]
pub async fn list_surgeries(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SurgeryQuery>,
) -> Result<Json<Vec<Surgery>>, AppError> {
    let ot_id = query.ot_id.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let rows = surgery_repo::list_surgeries(&state.db_pool, query.date, ot_id).await?;

    let surgeries = rows
        .into_iter()
        .map(Surgery::try_from)
        .collect::<OtResult<Vec<_>>>()?;

    Ok(Json(surgeries))
}

#[axum::debug_handler]
pub async fn get_surgery(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Surgery>, AppError> {
    let row = surgery_repo::get_surgery_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(Surgery::try_from(row)?))
}

#[axum::debug_handler]
pub async fn update_surgery(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SurgeryRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    if surgery_repo::get_surgery_by_id(&state.db_pool, id).await?.is_none() {
        return Err(AppError(not_found(id)));
    }
    ensure_participants(&state.db_pool, &payload).await?;

    ensure_bookable(&payload, Some(id), || {
        theater_bookings(&state.db_pool, &payload.ot_id, payload.surgery_date)
    })
    .await?;

    surgery_repo::update_surgery(&state.db_pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    record_audit(
        &state.db_pool,
        AuditAction::SurgeryUpdated,
        id,
        &user,
        Some(schedule_details("Surgery updated", &payload)),
    )
    .await;

    Ok(Json(MessageResponse::new("Surgery updated successfully")))
}

/// Cancels instead of deleting so the booking stays on record.
#[axum::debug_handler]
pub async fn cancel_surgery(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    surgery_repo::cancel_surgery(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    record_audit(&state.db_pool, AuditAction::SurgeryCancelled, id, &user, None).await;

    Ok(Json(MessageResponse::new("Surgery cancelled successfully")))
}

/// Books an emergency surgery even when its slot is taken; the clash is
/// flagged for manual resolution instead of rejected.
#[axum::debug_handler]
pub async fn schedule_emergency_surgery(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(mut payload): Json<SurgeryRequest>,
) -> Result<(StatusCode, Json<EmergencySurgeryResponse>), AppError> {
    payload.validate()?;
    ensure_participants(&state.db_pool, &payload).await?;
    let pool = &state.db_pool;
    let (ot_id, date) = (payload.ot_id.clone(), payload.surgery_date);
    let needs_manual_resolution =
        prepare_emergency(&mut payload, || theater_bookings(pool, &ot_id, date)).await;

    let row = surgery_repo::create_surgery(pool, &payload, needs_manual_resolution).await?;
    record_audit(
        &state.db_pool,
        AuditAction::EmergencySurgeryScheduled,
        row.id,
        &user,
        Some(schedule_details("Emergency surgery scheduled", &payload)),
    )
    .await;

    Ok((
        StatusCode::CREATED,
        Json(EmergencySurgeryResponse {
            id: row.id,
            message: "Emergency surgery scheduled".to_string(),
            needs_manual_resolution,
        }),
    ))
}
