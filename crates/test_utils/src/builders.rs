//! Test Data Builders
//!
//! Builders let tests set only the claim fields they care about.

use core_kernel::{ClaimId, MemberId};
use domain_pmb::Claim;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Builder for constructing claim test data
///
/// Defaults describe an out-of-network claim with a co-payment, an annual
/// limit and a network penalty, so protection has something to remove.
pub struct ClaimBuilder {
    claim: Claim,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            claim: Claim {
                id: ClaimId::new_v7(),
                member_id: MemberId::new_v7(),
                diagnosis_code: "Z00.0".to_string(),
                procedure_code: None,
                is_emergency: false,
                claimed_amount: dec!(4500.00),
                co_payment: dec!(450.00),
                annual_limit: Some(dec!(25000.00)),
                network_penalty: dec!(300.00),
                provider_in_network: false,
            },
        }
    }

    pub fn diagnosis(mut self, code: &str) -> Self {
        self.claim.diagnosis_code = code.to_string();
        self
    }

    pub fn procedure(mut self, code: &str) -> Self {
        self.claim.procedure_code = Some(code.to_string());
        self
    }

    pub fn emergency(mut self) -> Self {
        self.claim.is_emergency = true;
        self
    }

    pub fn in_network(mut self) -> Self {
        self.claim.provider_in_network = true;
        self.claim.network_penalty = Decimal::ZERO;
        self
    }

    pub fn build(self) -> Claim {
        self.claim
    }
}
