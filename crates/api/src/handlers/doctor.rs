use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use otsched_core::{
    errors::OtError,
    models::{
        CreatedResponse, MessageResponse,
        doctor::{Doctor, DoctorRequest},
    },
};
use otsched_db::repositories::doctor as doctor_repo;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::AuthUser, error_handling::AppError},
};

fn not_found(id: Uuid) -> OtError {
    OtError::NotFound(format!("Doctor with ID {} not found", id))
}

#[axum::debug_handler]
pub async fn create_doctor(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Json(payload): Json<DoctorRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    payload.validate()?;

    let row = doctor_repo::create_doctor(&state.db_pool, &payload).await?;
    tracing::info!("Doctor {} created by {}", row.id, user.user_id);

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: row.id,
            message: "Doctor created successfully".to_string(),
        }),
    ))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<Doctor>>, AppError> {
    let rows = doctor_repo::list_doctors(&state.db_pool).await?;

    Ok(Json(rows.into_iter().map(Doctor::from).collect()))
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Doctor>, AppError> {
    let row = doctor_repo::get_doctor_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(row.into()))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<DoctorRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    payload.validate()?;

    doctor_repo::update_doctor(&state.db_pool, id, &payload)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!("Doctor {} updated by {}", id, user.user_id);

    Ok(Json(MessageResponse::new("Doctor updated successfully")))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<Arc<ApiState>>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    if !doctor_repo::delete_doctor(&state.db_pool, id).await? {
        return Err(AppError(not_found(id)));
    }
    tracing::info!("Doctor {} deleted by {}", id, user.user_id);

    Ok(Json(MessageResponse::new("Doctor deleted successfully")))
}
