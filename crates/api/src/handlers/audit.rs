use axum::{
    Json,
    extract::{Query, State},
};
use otsched_core::{errors::OtResult, models::audit::AuditLog};
use otsched_db::repositories::audit_log as audit_repo;
use serde::Deserialize;
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

pub const DEFAULT_LOG_LIMIT: i64 = 50;
pub const MAX_LOG_LIMIT: i64 = 500;

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    pub limit: Option<i64>,
}

impl LogQuery {
    pub fn effective_limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_LOG_LIMIT)
            .clamp(1, MAX_LOG_LIMIT)
    }
}

#[axum::debug_handler]
pub async fn list_logs(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<LogQuery>,
) -> Result<Json<Vec<AuditLog>>, AppError> {
    let rows = audit_repo::list_recent_audit_logs(&state.db_pool, query.effective_limit()).await?;

    let logs = rows
        .into_iter()
        .map(AuditLog::try_from)
        .collect::<OtResult<Vec<_>>>()?;

    Ok(Json(logs))
}
