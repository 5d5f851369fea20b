use crate::models::DbSurgery;
use chrono::{NaiveDate, Utc};
use eyre::Result;
use otsched_core::models::surgery::{SurgeryRequest, SurgeryStatus};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const SURGERY_COLUMNS: &str = "id, patient_id, doctor_id, surgery_date, surgery_time, ot_id, \
    anesthesiologist, anesthesia_type, assistant_surgeon, nurses, pre_op_events, post_op_events, \
    surgical_report_url, notes, required_instruments, status, is_emergency, duration_minutes, \
    needs_manual_resolution, created_at, updated_at, cancelled_at";

pub async fn create_surgery(
    pool: &Pool<Postgres>,
    surgery: &SurgeryRequest,
    needs_manual_resolution: bool,
) -> Result<DbSurgery> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!(
        "Creating surgery: id={}, ot_id={}, date={}, time={}, duration={}",
        id, surgery.ot_id, surgery.surgery_date, surgery.surgery_time, surgery.duration_minutes
    );

    let sql = format!(
        r#"
        INSERT INTO surgeries (
            id, patient_id, doctor_id, surgery_date, surgery_time, ot_id,
            anesthesiologist, anesthesia_type, assistant_surgeon, nurses,
            pre_op_events, post_op_events, surgical_report_url, notes,
            required_instruments, status, is_emergency, duration_minutes,
            needs_manual_resolution, created_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
        RETURNING {}
        "#,
        SURGERY_COLUMNS
    );

    let row = sqlx::query_as::<_, DbSurgery>(&sql)
        .bind(id)
        .bind(surgery.patient_id)
        .bind(surgery.doctor_id)
        .bind(surgery.surgery_date)
        .bind(surgery.surgery_time)
        .bind(&surgery.ot_id)
        .bind(&surgery.anesthesiologist)
        .bind(&surgery.anesthesia_type)
        .bind(&surgery.assistant_surgeon)
        .bind(&surgery.nurses)
        .bind(&surgery.pre_op_events)
        .bind(&surgery.post_op_events)
        .bind(&surgery.surgical_report_url)
        .bind(&surgery.notes)
        .bind(&surgery.required_instruments)
        .bind(surgery.status.as_str())
        .bind(surgery.is_emergency)
        .bind(surgery.duration_minutes)
        .bind(needs_manual_resolution)
        .bind(now)
        .fetch_one(pool)
        .await?;

    tracing::debug!("Surgery created successfully: id={}", id);
    Ok(row)
}

/// Lists surgeries ordered by date then start time, optionally narrowed to a
/// date and/or a theater.
pub async fn list_surgeries(
    pool: &Pool<Postgres>,
    date: Option<NaiveDate>,
    ot_id: Option<&str>,
) -> Result<Vec<DbSurgery>> {
    let sql = format!(
        r#"
        SELECT {}
        FROM surgeries
        WHERE ($1::date IS NULL OR surgery_date = $1)
          AND ($2::text IS NULL OR ot_id = $2)
        ORDER BY surgery_date ASC, surgery_time ASC
        "#,
        SURGERY_COLUMNS
    );

    let rows = sqlx::query_as::<_, DbSurgery>(&sql)
        .bind(date)
        .bind(ot_id)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Every surgery booked in `ot_id` on `date`, whatever its status.
pub async fn bookings_for_theater_on_date(
    pool: &Pool<Postgres>,
    ot_id: &str,
    date: NaiveDate,
) -> Result<Vec<DbSurgery>> {
    list_surgeries(pool, Some(date), Some(ot_id)).await
}

pub async fn surgeries_between(
    pool: &Pool<Postgres>,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbSurgery>> {
    let sql = format!(
        r#"
        SELECT {}
        FROM surgeries
        WHERE surgery_date BETWEEN $1 AND $2
        ORDER BY surgery_date ASC, surgery_time ASC
        "#,
        SURGERY_COLUMNS
    );

    let rows = sqlx::query_as::<_, DbSurgery>(&sql)
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

pub async fn get_surgery_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSurgery>> {
    tracing::debug!("Getting surgery by id: {}", id);

    let sql = format!("SELECT {} FROM surgeries WHERE id = $1", SURGERY_COLUMNS);
    let row = sqlx::query_as::<_, DbSurgery>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Replaces the booking's fields. `needs_manual_resolution` is cleared once
/// an edit has passed the conflict check.
pub async fn update_surgery(
    pool: &Pool<Postgres>,
    id: Uuid,
    surgery: &SurgeryRequest,
) -> Result<Option<DbSurgery>> {
    let now = Utc::now();

    let sql = format!(
        r#"
        UPDATE surgeries
        SET patient_id = $2, doctor_id = $3, surgery_date = $4, surgery_time = $5, ot_id = $6,
            anesthesiologist = $7, anesthesia_type = $8, assistant_surgeon = $9, nurses = $10,
            pre_op_events = $11, post_op_events = $12, surgical_report_url = $13, notes = $14,
            required_instruments = $15, status = $16, is_emergency = $17, duration_minutes = $18,
            needs_manual_resolution = FALSE, updated_at = $19,
            cancelled_at = CASE WHEN $16 = 'cancelled' THEN COALESCE(cancelled_at, $19) ELSE NULL END
        WHERE id = $1
        RETURNING {}
        "#,
        SURGERY_COLUMNS
    );

    let row = sqlx::query_as::<_, DbSurgery>(&sql)
        .bind(id)
        .bind(surgery.patient_id)
        .bind(surgery.doctor_id)
        .bind(surgery.surgery_date)
        .bind(surgery.surgery_time)
        .bind(&surgery.ot_id)
        .bind(&surgery.anesthesiologist)
        .bind(&surgery.anesthesia_type)
        .bind(&surgery.assistant_surgeon)
        .bind(&surgery.nurses)
        .bind(&surgery.pre_op_events)
        .bind(&surgery.post_op_events)
        .bind(&surgery.surgical_report_url)
        .bind(&surgery.notes)
        .bind(&surgery.required_instruments)
        .bind(surgery.status.as_str())
        .bind(surgery.is_emergency)
        .bind(surgery.duration_minutes)
        .bind(now)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Soft delete: the row stays, marked cancelled.
pub async fn cancel_surgery(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSurgery>> {
    let now = Utc::now();

    let sql = format!(
        r#"
        UPDATE surgeries
        SET status = $2, cancelled_at = $3, updated_at = $3
        WHERE id = $1
        RETURNING {}
        "#,
        SURGERY_COLUMNS
    );

    let row = sqlx::query_as::<_, DbSurgery>(&sql)
        .bind(id)
        .bind(SurgeryStatus::Cancelled.as_str())
        .bind(now)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::create_test_pool;
    use chrono::NaiveTime;

    fn request(ot_id: &str, hour: u32) -> SurgeryRequest {
        SurgeryRequest {
            patient_id: Uuid::new_v4(),
            doctor_id: Uuid::new_v4(),
            surgery_date: NaiveDate::from_ymd_opt(2031, 5, 6).unwrap(),
            surgery_time: NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            ot_id: ot_id.to_string(),
            anesthesiologist: "Dr. Smith".to_string(),
            anesthesia_type: "General".to_string(),
            assistant_surgeon: None,
            nurses: vec!["Nurse Adams".to_string()],
            pre_op_events: None,
            post_op_events: None,
            surgical_report_url: None,
            notes: None,
            required_instruments: None,
            status: SurgeryStatus::Scheduled,
            is_emergency: false,
            duration_minutes: 60,
        }
    }

    #[tokio::test]
    #[ignore = "requires a PostgreSQL instance at TEST_DATABASE_URL"]
    async fn test_create_list_and_cancel() {
        let pool = create_test_pool().await;
        let ot_id = format!("test-{}", Uuid::new_v4());

        let later = create_surgery(&pool, &request(&ot_id, 14), false).await.unwrap();
        let earlier = create_surgery(&pool, &request(&ot_id, 9), false).await.unwrap();

        let rows = bookings_for_theater_on_date(&pool, &ot_id, later.surgery_date)
            .await
            .unwrap();
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![earlier.id, later.id]);
        assert_eq!(rows[0].nurses, vec!["Nurse Adams".to_string()]);

        let cancelled = cancel_surgery(&pool, earlier.id).await.unwrap().unwrap();
        assert_eq!(cancelled.status, "cancelled");
        assert!(cancelled.cancelled_at.is_some());

        assert!(cancel_surgery(&pool, Uuid::new_v4()).await.unwrap().is_none());
    }
}
