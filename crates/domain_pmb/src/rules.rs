//! PMB rule set
//!
//! Owns the reference tables and answers the pure matching questions. The
//! DTP table is indexed by diagnosis code at construction; each index bucket
//! keeps table positions in ascending order so "first match in table order"
//! still holds.

use std::collections::HashMap;

use crate::reference::{
    ChronicDiseaseEntry, CoverageRules, DiagnosisTreatmentPair, CHRONIC_DISEASE_LIST,
    COVERAGE_RULES, DIAGNOSIS_TREATMENT_PAIRS, EMERGENCY_CONDITIONS,
};
use crate::verdict::{DtpEvaluationResult, EligibilityVerdict};

/// Immutable PMB reference data plus lookup indexes
#[derive(Debug, Clone)]
pub struct PmbRuleSet {
    cdl: Vec<ChronicDiseaseEntry>,
    dtps: Vec<DiagnosisTreatmentPair>,
    emergency_conditions: Vec<String>,
    coverage_rules: CoverageRules,
    dtp_index: HashMap<String, Vec<usize>>,
}

impl PmbRuleSet {
    /// Builds a rule set from explicit tables
    pub fn new(
        cdl: Vec<ChronicDiseaseEntry>,
        dtps: Vec<DiagnosisTreatmentPair>,
        emergency_conditions: Vec<String>,
        coverage_rules: CoverageRules,
    ) -> Self {
        let mut dtp_index: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, dtp) in dtps.iter().enumerate() {
            dtp_index
                .entry(dtp.diagnosis_icd10.clone())
                .or_default()
                .push(position);
        }

        Self {
            cdl,
            dtps,
            emergency_conditions,
            coverage_rules,
            dtp_index,
        }
    }

    /// Builds the rule set from the statutory tables
    pub fn statutory() -> Self {
        Self::new(
            CHRONIC_DISEASE_LIST.clone(),
            DIAGNOSIS_TREATMENT_PAIRS.clone(),
            EMERGENCY_CONDITIONS.clone(),
            COVERAGE_RULES,
        )
    }

    pub fn cdl_conditions(&self) -> &[ChronicDiseaseEntry] {
        &self.cdl
    }

    pub fn dtps(&self) -> &[DiagnosisTreatmentPair] {
        &self.dtps
    }

    pub fn emergency_conditions(&self) -> &[String] {
        &self.emergency_conditions
    }

    pub fn coverage_rules(&self) -> &CoverageRules {
        &self.coverage_rules
    }

    /// DTPs for a diagnosis, in table order
    fn dtps_for<'a>(
        &'a self,
        diagnosis_code: &str,
    ) -> impl Iterator<Item = &'a DiagnosisTreatmentPair> + 'a {
        self.dtp_index
            .get(diagnosis_code)
            .into_iter()
            .flatten()
            .map(move |&position| &self.dtps[position])
    }

    /// First DTP for the diagnosis whose treatments include the procedure
    pub fn find_dtp(
        &self,
        diagnosis_code: &str,
        procedure_code: &str,
    ) -> Option<&DiagnosisTreatmentPair> {
        self.dtps_for(diagnosis_code)
            .find(|dtp| dtp.covers_procedure(procedure_code))
    }

    /// First DTP for the diagnosis covering any of the procedures
    ///
    /// Returns the pair together with the first procedure code, in the order
    /// given, that it covers.
    pub fn find_dtp_any<'a>(
        &'a self,
        diagnosis_code: &str,
        procedure_codes: &'a [String],
    ) -> Option<(&'a DiagnosisTreatmentPair, &'a str)> {
        self.dtps_for(diagnosis_code).find_map(|dtp| {
            procedure_codes
                .iter()
                .find(|code| dtp.covers_procedure(code))
                .map(|code| (dtp, code.as_str()))
        })
    }

    /// First CDL entry listing the diagnosis code verbatim
    pub fn find_cdl(&self, diagnosis_code: &str) -> Option<&ChronicDiseaseEntry> {
        self.cdl.iter().find(|entry| entry.lists_code(diagnosis_code))
    }

    /// Applies the PMB precedence rules without side effects
    ///
    /// Emergency wins outright; a DTP is only considered when a procedure code
    /// is supplied; the CDL is the fallback.
    pub fn match_eligibility(
        &self,
        diagnosis_code: &str,
        procedure_code: Option<&str>,
        is_emergency: bool,
    ) -> EligibilityVerdict {
        if is_emergency {
            return EligibilityVerdict::emergency();
        }

        if let Some(dtp) = procedure_code.and_then(|p| self.find_dtp(diagnosis_code, p)) {
            return EligibilityVerdict::dtp(dtp);
        }

        match self.find_cdl(diagnosis_code) {
            Some(entry) => EligibilityVerdict::chronic(entry),
            None => EligibilityVerdict::not_eligible(),
        }
    }

    /// Evaluates a diagnosis against the DTP table without side effects
    pub fn match_dtp(
        &self,
        diagnosis_code: &str,
        procedure_codes: &[String],
        claim_id: Option<&str>,
    ) -> DtpEvaluationResult {
        let matched = self.find_dtp_any(diagnosis_code, procedure_codes);

        DtpEvaluationResult {
            matched: matched.is_some(),
            diagnosis_code: diagnosis_code.to_string(),
            procedure_codes: procedure_codes.to_vec(),
            matched_procedure_code: matched.map(|(_, code)| code.to_string()),
            dtp: matched.map(|(dtp, _)| dtp.clone()),
            must_pay_minimum: matched.map(|(dtp, _)| dtp.must_pay_minimum).unwrap_or(false),
            claim_id: claim_id.map(str::to_string),
        }
    }
}

impl Default for PmbRuleSet {
    fn default() -> Self {
        Self::statutory()
    }
}
