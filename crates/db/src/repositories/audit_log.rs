use crate::models::DbAuditLog;
use chrono::Utc;
use eyre::Result;
use otsched_core::models::audit::AuditAction;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_audit_log(
    pool: &Pool<Postgres>,
    action: AuditAction,
    surgery_id: Uuid,
    user_id: &str,
    details: Option<&str>,
) -> Result<DbAuditLog> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Recording audit log: action={}, surgery_id={}, user_id={}",
        action, surgery_id, user_id
    );

    let row = sqlx::query_as::<_, DbAuditLog>(
        r#"
        INSERT INTO audit_logs (id, action, surgery_id, user_id, timestamp, details)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, action, surgery_id, user_id, timestamp, details
        "#,
    )
    .bind(id)
    .bind(action.as_str())
    .bind(surgery_id)
    .bind(user_id)
    .bind(Utc::now())
    .bind(details)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Newest entries first.
pub async fn list_recent_audit_logs(pool: &Pool<Postgres>, limit: i64) -> Result<Vec<DbAuditLog>> {
    let rows = sqlx::query_as::<_, DbAuditLog>(
        r#"
        SELECT id, action, surgery_id, user_id, timestamp, details
        FROM audit_logs
        ORDER BY timestamp DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
