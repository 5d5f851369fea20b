use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use otsched_core::{
    errors::OtError,
    models::{
        CreatedResponse, MessageResponse,
        patient::{Patient, PatientRequest},
    },
};
use otsched_db::repositories::patient as patient_repo;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

fn not_found(id: Uuid) -> OtError {
    OtError::NotFound(format!("Patient with ID {} not found", id))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<PatientRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    payload.validate()?;

    let row = patient_repo::create_patient(&state.db_pool, &payload).await?;
    tracing::info!("Patient {} created by {}", row.id, user.user_id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: row.id,
            message: "Patient created successfully".to_string(),
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_patients(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Patient>>, AppError> {
    let rows = patient_repo::list_patients(&state.db_pool).await?;

    Ok(Json(rows.into_iter().map(Patient::from).collect()))
}

#[axum::debug_handler]
pub async fn get_patient(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Patient>, AppError> {
    let row = patient_repo::get_patient_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<PatientRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    patient_repo::update_patient(&state.db_pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!("Patient {} updated by {}", id, user.user_id);

    Ok(Json(MessageResponse::new("Patient updated successfully")))
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !patient_repo::delete_patient(&state.db_pool, id).await? {
        return Err(AppError(not_found(id)));
    }
    tracing::info!("Patient {} deleted by {}", id, user.user_id);

    Ok(Json(MessageResponse::new("Patient deleted successfully")))
}
