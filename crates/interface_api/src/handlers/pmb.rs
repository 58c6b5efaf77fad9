//! PMB handlers

use axum::{extract::State, Extension, Json};
use validator::Validate;

use domain_pmb::{
    ChronicDiseaseEntry, Claim, CoverageRules, DiagnosisTreatmentPair, DtpEvaluationResult,
    EligibilityVerdict, ProtectionOutcome,
};

use crate::auth::{permissions, require_permission, TokenClaims};
use crate::dto::pmb::*;
use crate::extract::ApiJson;
use crate::{error::ApiError, AppState};

/// Checks PMB eligibility for a diagnosis and optional procedure
pub async fn check_eligibility(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    ApiJson(request): ApiJson<CheckEligibilityRequest>,
) -> Result<Json<EligibilityVerdict>, ApiError> {
    require_permission(&claims, permissions::PMB_EVALUATE)?;
    request.validate()?;
    ensure_not_blank("diagnosis_code", &request.diagnosis_code)?;

    let verdict = state
        .evaluator
        .check_eligibility(
            &request.diagnosis_code,
            request.procedure_code.as_deref(),
            request.is_emergency,
            &claims.caller(),
        )
        .await?;

    Ok(Json(verdict))
}

/// Evaluates a diagnosis against the DTP table for a set of procedures
pub async fn evaluate_dtp(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    ApiJson(request): ApiJson<EvaluateDtpRequest>,
) -> Result<Json<DtpEvaluationResult>, ApiError> {
    require_permission(&claims, permissions::PMB_EVALUATE)?;
    request.validate()?;
    ensure_not_blank("diagnosis_code", &request.diagnosis_code)?;

    let result = state
        .evaluator
        .evaluate_dtp(
            &request.diagnosis_code,
            &request.procedure_codes,
            request.claim_id.as_deref(),
            &claims.caller(),
        )
        .await?;

    Ok(Json(result))
}

/// Applies PMB protections to a submitted claim
pub async fn apply_protection(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
    ApiJson(claim): ApiJson<Claim>,
) -> Result<Json<ProtectionOutcome>, ApiError> {
    require_permission(&claims, permissions::CLAIM_WRITE)?;
    ensure_not_blank("diagnosis_code", &claim.diagnosis_code)?;

    let outcome = state
        .evaluator
        .apply_protection(claim, &claims.caller())
        .await?;

    Ok(Json(outcome))
}

/// Lists the Chronic Disease List
pub async fn list_cdl_conditions(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<Vec<ChronicDiseaseEntry>>, ApiError> {
    require_permission(&claims, permissions::PMB_READ)?;
    Ok(Json(state.evaluator.cdl_conditions().to_vec()))
}

/// Lists the Diagnosis-Treatment Pairs
pub async fn list_dtps(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<Vec<DiagnosisTreatmentPair>>, ApiError> {
    require_permission(&claims, permissions::PMB_READ)?;
    Ok(Json(state.evaluator.dtps().to_vec()))
}

/// Returns the PMB coverage rules
pub async fn get_coverage_rules(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<CoverageRules>, ApiError> {
    require_permission(&claims, permissions::PMB_READ)?;
    Ok(Json(*state.evaluator.coverage_rules()))
}

/// Lists the emergency condition labels
pub async fn list_emergency_conditions(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<Vec<String>>, ApiError> {
    require_permission(&claims, permissions::PMB_READ)?;
    Ok(Json(state.evaluator.emergency_conditions().to_vec()))
}
