//! Claim protection
//!
//! A claim that qualifies as a PMB keeps all of its own fields and gains an
//! overlay that removes co-payments, annual limits and network penalties and
//! marks it as non-rejectable.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, MemberId};

use crate::verdict::{EligibilityVerdict, PmbCategory};

fn default_in_network() -> bool {
    true
}

/// The claims workflow's view of a claim, as submitted for adjudication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: ClaimId,
    pub member_id: MemberId,
    pub diagnosis_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub procedure_code: Option<String>,
    #[serde(default)]
    pub is_emergency: bool,
    pub claimed_amount: Decimal,
    #[serde(default)]
    pub co_payment: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_limit: Option<Decimal>,
    #[serde(default)]
    pub network_penalty: Decimal,
    #[serde(default = "default_in_network")]
    pub provider_in_network: bool,
}

impl Claim {
    /// Amount the member would pay before any PMB protection
    pub fn member_liability(&self) -> Decimal {
        self.co_payment + self.network_penalty
    }
}

/// A claim with PMB protections overlaid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedClaim {
    #[serde(flatten)]
    pub claim: Claim,
    pub is_pmb_protected: bool,
    pub pmb_category: PmbCategory,
    pub co_payment_override: Decimal,
    pub annual_limit_override: Option<Decimal>,
    pub network_penalty_override: Decimal,
    pub cannot_reject: bool,
    pub pmb_explanation: String,
}

impl ProtectedClaim {
    /// Overlays protections derived from an eligible verdict
    ///
    /// Hands the claim back untouched when the verdict is not eligible.
    pub fn from_verdict(claim: Claim, verdict: &EligibilityVerdict) -> Result<Self, Claim> {
        let category = match (verdict.is_pmb_eligible, verdict.category) {
            (true, Some(category)) => category,
            _ => return Err(claim),
        };

        Ok(Self {
            claim,
            is_pmb_protected: true,
            pmb_category: category,
            co_payment_override: Decimal::ZERO,
            annual_limit_override: None,
            network_penalty_override: Decimal::ZERO,
            cannot_reject: true,
            pmb_explanation: verdict.explanation.clone(),
        })
    }

    /// Member liability after protection, always zero
    pub fn member_liability(&self) -> Decimal {
        self.co_payment_override + self.network_penalty_override
    }
}

/// A claim that no PMB rule covers, returned as submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnprotectedClaim {
    pub is_pmb_protected: bool,
    pub original_claim: Claim,
}

/// Result of applying PMB protection to a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProtectionOutcome {
    Protected(ProtectedClaim),
    Unprotected(UnprotectedClaim),
}

impl ProtectionOutcome {
    pub fn unprotected(claim: Claim) -> Self {
        ProtectionOutcome::Unprotected(UnprotectedClaim {
            is_pmb_protected: false,
            original_claim: claim,
        })
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, ProtectionOutcome::Protected(_))
    }

    /// The underlying claim fields, protected or not
    pub fn claim(&self) -> &Claim {
        match self {
            ProtectionOutcome::Protected(p) => &p.claim,
            ProtectionOutcome::Unprotected(u) => &u.original_claim,
        }
    }

    pub fn as_protected(&self) -> Option<&ProtectedClaim> {
        match self {
            ProtectionOutcome::Protected(p) => Some(p),
            ProtectionOutcome::Unprotected(_) => None,
        }
    }
}

/// Protections removed from every PMB claim
///
/// The breakdown is fixed: all three restrictions are lifted whichever rule
/// matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectionBreakdown {
    pub co_payment_removed: bool,
    pub annual_limit_removed: bool,
    pub network_penalty_removed: bool,
}

pub const PROTECTION_BREAKDOWN: ProtectionBreakdown = ProtectionBreakdown {
    co_payment_removed: true,
    annual_limit_removed: true,
    network_penalty_removed: true,
};
