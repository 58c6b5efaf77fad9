//! Custom Test Assertions
//!
//! Assertion helpers for verdicts and protection outcomes that report the
//! whole value on failure.

use domain_pmb::{Claim, EligibilityVerdict, PmbCategory, ProtectedClaim, ProtectionOutcome};
use rust_decimal::Decimal;

/// Asserts that a verdict is eligible under the given category
pub fn assert_verdict_category(verdict: &EligibilityVerdict, expected: PmbCategory) {
    assert!(
        verdict.is_pmb_eligible,
        "Expected an eligible {} verdict, got {:?}",
        expected,
        verdict
    );
    assert_eq!(verdict.category, Some(expected), "Unexpected category in {:?}", verdict);
    assert!(verdict.must_pay_minimum, "Eligible verdict must pay minimum: {:?}", verdict);
}

/// Asserts that a verdict is not eligible
pub fn assert_not_eligible(verdict: &EligibilityVerdict) {
    assert!(!verdict.is_pmb_eligible, "Expected no PMB match, got {:?}", verdict);
    assert_eq!(verdict.category, None);
    assert!(!verdict.must_pay_minimum);
    assert!(verdict.matched_cdl.is_none() && verdict.matched_dtp.is_none());
}

/// Asserts that an outcome carries every PMB protection and returns it
pub fn assert_fully_protected(outcome: &ProtectionOutcome) -> &ProtectedClaim {
    let protected = outcome
        .as_protected()
        .unwrap_or_else(|| panic!("Expected a protected claim, got {:?}", outcome));

    assert!(protected.is_pmb_protected);
    assert_eq!(protected.co_payment_override, Decimal::ZERO);
    assert_eq!(protected.annual_limit_override, None);
    assert_eq!(protected.network_penalty_override, Decimal::ZERO);
    assert!(protected.cannot_reject);
    assert!(!protected.pmb_explanation.is_empty());
    protected
}

/// Asserts that an outcome is unprotected and wraps exactly the given claim
pub fn assert_unprotected(outcome: &ProtectionOutcome, original: &Claim) {
    match outcome {
        ProtectionOutcome::Unprotected(unprotected) => {
            assert!(!unprotected.is_pmb_protected);
            assert_eq!(&unprotected.original_claim, original);
        }
        ProtectionOutcome::Protected(p) => panic!("Expected an unprotected claim, got {:?}", p),
    }
}
