//! Pre-built Test Fixtures
//!
//! Well-known codes from the statutory tables and claims built around them.

use domain_pmb::{CallerIdentity, Claim};

use crate::builders::ClaimBuilder;

/// Diagnosis codes with known outcomes
pub struct DiagnosisFixtures;

impl DiagnosisFixtures {
    /// Asthma: listed on the CDL (CDL02) and the diagnosis of DTP005
    pub fn asthma() -> &'static str {
        "J45"
    }

    /// Acute myocardial infarction: DTP001 only
    pub fn myocardial_infarction() -> &'static str {
        "I21"
    }

    /// Hypertension: CDL20 only
    pub fn hypertension() -> &'static str {
        "I10"
    }

    /// Type 1 diabetes sub-code listed on CDL12
    pub fn type_1_diabetes() -> &'static str {
        "E10.0"
    }

    /// Bare type 1 diabetes family code, not listed anywhere
    pub fn type_1_diabetes_family() -> &'static str {
        "E10"
    }

    /// Routine examination: matches nothing
    pub fn routine_checkup() -> &'static str {
        "Z00.0"
    }
}

/// Procedure codes with known outcomes
pub struct ProcedureFixtures;

impl ProcedureFixtures {
    /// Listed on DTP001 (coronary angioplasty)
    pub fn angioplasty() -> &'static str {
        "36415"
    }

    /// Listed on DTP005 (emergency nebulisation)
    pub fn nebulisation() -> &'static str {
        "94640"
    }

    /// Listed on no DTP
    pub fn unlisted() -> &'static str {
        "99999"
    }
}

/// Ready-made claims
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Asthma claim with no procedure; protected via the CDL
    pub fn chronic_asthma() -> Claim {
        ClaimBuilder::new()
            .diagnosis(DiagnosisFixtures::asthma())
            .build()
    }

    /// Heart attack treated with angioplasty; protected via DTP001
    pub fn angioplasty() -> Claim {
        ClaimBuilder::new()
            .diagnosis(DiagnosisFixtures::myocardial_infarction())
            .procedure(ProcedureFixtures::angioplasty())
            .build()
    }

    /// Routine checkup; not a PMB
    pub fn routine() -> Claim {
        ClaimBuilder::new()
            .diagnosis(DiagnosisFixtures::routine_checkup())
            .build()
    }

    /// Routine diagnosis flagged as an emergency by the caller
    pub fn emergency() -> Claim {
        ClaimBuilder::new()
            .diagnosis(DiagnosisFixtures::routine_checkup())
            .emergency()
            .build()
    }
}

/// Callers for audit assertions
pub struct CallerFixtures;

impl CallerFixtures {
    pub fn claims_assessor() -> CallerIdentity {
        CallerIdentity::new("assessor-001")
    }
}
