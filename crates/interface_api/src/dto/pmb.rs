//! PMB DTOs
//!
//! Responses reuse the domain types directly; only requests need their own
//! shapes.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CheckEligibilityRequest {
    #[validate(length(min = 1, max = 16))]
    pub diagnosis_code: String,
    #[validate(length(min = 1, max = 16))]
    pub procedure_code: Option<String>,
    #[serde(default)]
    pub is_emergency: bool,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct EvaluateDtpRequest {
    #[validate(length(min = 1, max = 16))]
    pub diagnosis_code: String,
    #[validate(length(min = 1))]
    pub procedure_codes: Vec<String>,
    /// Opaque caller reference, recorded as the audit entity id
    pub claim_id: Option<String>,
}

/// Rejects codes that are blank once whitespace is stripped
pub fn ensure_not_blank(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} must not be blank", field)));
    }
    Ok(())
}
