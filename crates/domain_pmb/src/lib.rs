//! Prescribed Minimum Benefit Domain
//!
//! This crate decides whether a diagnosis/procedure pair is a Prescribed
//! Minimum Benefit and rewrites a claim's financial terms when it is.
//!
//! # Rule Precedence
//!
//! ```text
//! is_emergency -> Diagnosis-Treatment Pair -> Chronic Disease List -> not a PMB
//! ```
//!
//! The first rule that matches decides the category; later rules are not
//! consulted.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_pmb::{CallerIdentity, NoopAuditPort, PmbEvaluator};
//! use std::sync::Arc;
//!
//! let evaluator = PmbEvaluator::new(Arc::new(NoopAuditPort));
//! let verdict = evaluator
//!     .check_eligibility("J45", None, false, &CallerIdentity::system())
//!     .await?;
//! assert!(verdict.is_pmb_eligible);
//! ```

pub mod reference;
pub mod rules;
pub mod verdict;
pub mod protection;
pub mod ports;
pub mod evaluator;
pub mod error;

pub use reference::{
    ChronicDiseaseEntry, CoverageRules, DiagnosisTreatmentPair, CHRONIC_DISEASE_LIST,
    COVERAGE_RULES, DIAGNOSIS_TREATMENT_PAIRS, EMERGENCY_CONDITIONS,
};
pub use rules::PmbRuleSet;
pub use verdict::{DtpEvaluationResult, EligibilityVerdict, PmbCategory};
pub use protection::{
    Claim, ProtectedClaim, ProtectionBreakdown, ProtectionOutcome, UnprotectedClaim,
    PROTECTION_BREAKDOWN,
};
pub use ports::{AuditEvent, AuditFailurePolicy, AuditPort, CallerIdentity, NoopAuditPort};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryAuditPort;
pub use evaluator::PmbEvaluator;
pub use error::{PmbError, PmbResult};
