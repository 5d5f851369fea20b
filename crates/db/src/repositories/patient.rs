use crate::models::DbPatient;
use chrono::Utc;
use eyre::Result;
use otsched_core::models::patient::PatientRequest;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_patient(pool: &Pool<Postgres>, patient: &PatientRequest) -> Result<DbPatient> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating patient: id={}, mrn={}",
        id, patient.medical_record_number
    );

    let row = sqlx::query_as::<_, DbPatient>(
        r#"
        INSERT INTO patients (id, name, age, gender, medical_record_number, phone, emergency_contact, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, name, age, gender, medical_record_number, phone, emergency_contact, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&patient.name)
    .bind(patient.age)
    .bind(&patient.gender)
    .bind(&patient.medical_record_number)
    .bind(&patient.phone)
    .bind(&patient.emergency_contact)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_patients(pool: &Pool<Postgres>) -> Result<Vec<DbPatient>> {
    let rows = sqlx::query_as::<_, DbPatient>(
        r#"
        SELECT id, name, age, gender, medical_record_number, phone, emergency_contact, created_at, updated_at
        FROM patients
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_patient_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbPatient>> {
    let row = sqlx::query_as::<_, DbPatient>(
        r#"
        SELECT id, name, age, gender, medical_record_number, phone, emergency_contact, created_at, updated_at
        FROM patients
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn update_patient(
    pool: &Pool<Postgres>,
    id: Uuid,
    patient: &PatientRequest,
) -> Result<Option<DbPatient>> {
    let row = sqlx::query_as::<_, DbPatient>(
        r#"
        UPDATE patients
        SET name = $2, age = $3, gender = $4, medical_record_number = $5,
            phone = $6, emergency_contact = $7, updated_at = $8
        WHERE id = $1
        RETURNING id, name, age, gender, medical_record_number, phone, emergency_contact, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(&patient.name)
    .bind(patient.age)
    .bind(&patient.gender)
    .bind(&patient.medical_record_number)
    .bind(&patient.phone)
    .bind(&patient.emergency_contact)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn delete_patient(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM patients WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn count_patients(pool: &Pool<Postgres>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM patients")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
