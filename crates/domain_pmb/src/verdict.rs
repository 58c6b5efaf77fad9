//! Eligibility verdicts and DTP evaluation results

use serde::{Deserialize, Serialize};
use std::fmt;


use crate::reference::{ChronicDiseaseEntry, DiagnosisTreatmentPair};

/// Explanation returned for emergency claims
pub const EMERGENCY_EXPLANATION: &str =
    "Emergency medical condition - must be covered as PMB regardless of benefit limits";

/// Explanation returned when nothing matches
pub const NO_MATCH_EXPLANATION: &str = "Diagnosis does not match any PMB criteria";

/// The rule that made a claim a PMB
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PmbCategory {
    /// Caller-asserted emergency
    Emergency,
    /// Diagnosis-Treatment Pair
    Dtp,
    /// Chronic Disease List
    Chronic,
}

impl PmbCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PmbCategory::Emergency => "emergency",
            PmbCategory::Dtp => "dtp",
            PmbCategory::Chronic => "chronic",
        }
    }
}

impl fmt::Display for PmbCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a PMB eligibility check
///
/// At most one category is ever set; precedence is emergency, then DTP,
/// then CDL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityVerdict {
    pub is_pmb_eligible: bool,
    pub category: Option<PmbCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_name: Option<String>,
    pub must_pay_minimum: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_cdl: Option<ChronicDiseaseEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_dtp: Option<DiagnosisTreatmentPair>,
    pub explanation: String,
}

impl EligibilityVerdict {
    /// Verdict for a caller-asserted emergency
    pub fn emergency() -> Self {
        Self {
            is_pmb_eligible: true,
            category: Some(PmbCategory::Emergency),
            condition_name: None,
            must_pay_minimum: true,
            matched_cdl: None,
            matched_dtp: None,
            explanation: EMERGENCY_EXPLANATION.to_string(),
        }
    }

    /// Verdict for a matched Diagnosis-Treatment Pair
    pub fn dtp(dtp: &DiagnosisTreatmentPair) -> Self {
        Self {
            is_pmb_eligible: true,
            category: Some(PmbCategory::Dtp),
            condition_name: Some(dtp.diagnosis_name.clone()),
            must_pay_minimum: true,
            matched_cdl: None,
            matched_dtp: Some(dtp.clone()),
            explanation: format!(
                "Matches DTP {}: {} treated with {}",
                dtp.dtp_code, dtp.diagnosis_name, dtp.treatment_name
            ),
        }
    }

    /// Verdict for a matched Chronic Disease List condition
    pub fn chronic(entry: &ChronicDiseaseEntry) -> Self {
        Self {
            is_pmb_eligible: true,
            category: Some(PmbCategory::Chronic),
            condition_name: Some(entry.name.clone()),
            must_pay_minimum: true,
            matched_cdl: Some(entry.clone()),
            matched_dtp: None,
            explanation: format!(
                "Chronic Disease List condition {}: {}",
                entry.code, entry.name
            ),
        }
    }

    /// Verdict when no PMB rule applies
    pub fn not_eligible() -> Self {
        Self {
            is_pmb_eligible: false,
            category: None,
            condition_name: None,
            must_pay_minimum: false,
            matched_cdl: None,
            matched_dtp: None,
            explanation: NO_MATCH_EXPLANATION.to_string(),
        }
    }
}

/// Outcome of a DTP-only evaluation over a list of procedure codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DtpEvaluationResult {
    pub matched: bool,
    pub diagnosis_code: String,
    pub procedure_codes: Vec<String>,
    /// First submitted procedure code found in the matched pair
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_procedure_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtp: Option<DiagnosisTreatmentPair>,
    pub must_pay_minimum: bool,
    /// Caller-supplied claim reference, echoed verbatim
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claim_id: Option<String>,
}

impl DtpEvaluationResult {
    pub fn dtp_code(&self) -> Option<&str> {
        self.dtp.as_ref().map(|d| d.dtp_code.as_str())
    }
}
