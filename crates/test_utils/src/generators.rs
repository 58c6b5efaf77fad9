//! Property-Based Test Generators
//!
//! Proptest strategies for diagnosis and procedure codes.

use domain_pmb::{CHRONIC_DISEASE_LIST, DIAGNOSIS_TREATMENT_PAIRS};
use proptest::prelude::*;

/// Strategy for ICD-10 shaped codes such as `K12` or `K12.3`
pub fn icd10_strategy() -> impl Strategy<Value = String> {
    "[A-Z][0-9]{2}(\\.[0-9])?"
}

/// Returns true if any CDL entry or DTP refers to the diagnosis code
pub fn is_listed_diagnosis(code: &str) -> bool {
    CHRONIC_DISEASE_LIST.iter().any(|e| e.lists_code(code))
        || DIAGNOSIS_TREATMENT_PAIRS.iter().any(|d| d.diagnosis_icd10 == code)
}

/// Strategy for ICD-10 shaped codes that appear in no reference table
pub fn unlisted_diagnosis_strategy() -> impl Strategy<Value = String> {
    icd10_strategy().prop_filter("diagnosis must not be in the PMB tables", |code| {
        !is_listed_diagnosis(code)
    })
}

/// Strategy for any diagnosis that appears on the CDL
pub fn cdl_diagnosis_strategy() -> impl Strategy<Value = String> {
    let codes: Vec<String> = CHRONIC_DISEASE_LIST
        .iter()
        .flat_map(|e| e.icd10_codes.iter().cloned())
        .collect();
    proptest::sample::select(codes)
}

/// Strategy for five-digit procedure codes
pub fn procedure_code_strategy() -> impl Strategy<Value = String> {
    "[0-9]{5}"
}

/// Strategy for arbitrary, possibly nonsensical, codes
pub fn arbitrary_code_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9.]{1,12}"
}
