//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the PMB
//! test suite.
//!
//! # Modules
//!
//! - `fixtures`: Well-known diagnosis/procedure codes and ready-made claims
//! - `builders`: Builder for claim test data
//! - `assertions`: Assertion helpers for verdicts and protection outcomes
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;

use std::sync::Arc;

use domain_pmb::{AuditFailurePolicy, InMemoryAuditPort, PmbEvaluator};

/// Creates an evaluator over the statutory tables with a recording audit sink
pub fn recording_evaluator() -> (PmbEvaluator, InMemoryAuditPort) {
    let audit = InMemoryAuditPort::new();
    let evaluator = PmbEvaluator::new(Arc::new(audit.clone()));
    (evaluator, audit)
}

/// Creates an evaluator whose audit sink rejects every event
pub fn failing_evaluator(policy: AuditFailurePolicy) -> (PmbEvaluator, InMemoryAuditPort) {
    let audit = InMemoryAuditPort::failing();
    let evaluator = PmbEvaluator::new(Arc::new(audit.clone())).with_failure_policy(policy);
    (evaluator, audit)
}
