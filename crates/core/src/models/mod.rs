pub mod audit;
pub mod doctor;
pub mod patient;
pub mod summary;
pub mod surgery;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{OtError, OtResult};

/// Returned by create endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub id: Uuid,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> OtResult<()> {
    if value.trim().is_empty() {
        return Err(OtError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
