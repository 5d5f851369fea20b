use crate::models::DbDoctor;
use chrono::Utc;
use eyre::Result;
use otsched_core::models::doctor::DoctorRequest;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_doctor(pool: &Pool<Postgres>, doctor: &DoctorRequest) -> Result<DbDoctor> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating doctor: id={}, name={}", id, doctor.name);

    let row = sqlx::query_as::<_, DbDoctor>(
        r#"
        INSERT INTO doctors (id, name, specialization, email, phone, department, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, specialization, email, phone, department, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&doctor.name)
    .bind(&doctor.specialization)
    .bind(&doctor.email)
    .bind(&doctor.phone)
    .bind(&doctor.department)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_doctors(pool: &Pool<Postgres>) -> Result<Vec<DbDoctor>> {
    let rows = sqlx::query_as::<_, DbDoctor>(
        r#"
        SELECT id, name, specialization, email, phone, department, created_at, updated_at
        FROM doctors
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_doctor_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbDoctor>> {
    let row = sqlx::query_as::<_, DbDoctor>(
        r#"
        SELECT id, name, specialization, email, phone, department, created_at, updated_at
        FROM doctors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Replaces every editable field. Returns `None` when no such doctor exists.
pub async fn update_doctor(
    pool: &Pool<Postgres>,
    id: Uuid,
    doctor: &DoctorRequest,
) -> Result<Option<DbDoctor>> {
    let row = sqlx::query_as::<_, DbDoctor>(
        r#"
        UPDATE doctors
        SET name = $2, specialization = $3, email = $4, phone = $5, department = $6, updated_at = $7
        WHERE id = $1
        RETURNING id, name, specialization, email, phone, department, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&doctor.name)
    .bind(&doctor.specialization)
    .bind(&doctor.email)
    .bind(&doctor.phone)
    .bind(&doctor.department)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Returns whether a row was deleted.
pub async fn delete_doctor(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM doctors WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_doctors(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM doctors")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
