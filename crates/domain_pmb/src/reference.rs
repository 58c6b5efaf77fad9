//! Statutory PMB reference data
//!
//! The Chronic Disease List, the Diagnosis-Treatment Pairs, the emergency
//! condition labels and the coverage rules are fixed by regulation. They are
//! built once per process and never written afterwards.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A condition on the statutory Chronic Disease List
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChronicDiseaseEntry {
    /// CDL code (`CDL01`..`CDL27`)
    pub code: String,
    /// Condition name
    pub name: String,
    /// ICD-10 codes that identify the condition, matched verbatim
    pub icd10_codes: Vec<String>,
}

impl ChronicDiseaseEntry {
    fn new(code: &str, name: &str, icd10_codes: &[&str]) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            icd10_codes: icd10_codes.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Returns true if the entry lists this exact ICD-10 code
    pub fn lists_code(&self, icd10: &str) -> bool {
        self.icd10_codes.iter().any(|c| c == icd10)
    }
}

/// A statutory diagnosis and treatment combination paid at minimum benefit level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisTreatmentPair {
    pub dtp_code: String,
    pub diagnosis_icd10: String,
    pub diagnosis_name: String,
    /// Procedure codes that complete the pair
    pub treatment_codes: Vec<String>,
    pub treatment_name: String,
    pub must_pay_minimum: bool,
}

impl DiagnosisTreatmentPair {
    fn new(
        dtp_code: &str,
        diagnosis_icd10: &str,
        diagnosis_name: &str,
        treatment_codes: &[&str],
        treatment_name: &str,
    ) -> Self {
        Self {
            dtp_code: dtp_code.to_string(),
            diagnosis_icd10: diagnosis_icd10.to_string(),
            diagnosis_name: diagnosis_name.to_string(),
            treatment_codes: treatment_codes.iter().map(|c| c.to_string()).collect(),
            treatment_name: treatment_name.to_string(),
            must_pay_minimum: true,
        }
    }

    /// Returns true if the procedure code is one of this pair's treatments
    pub fn covers_procedure(&self, procedure_code: &str) -> bool {
        self.treatment_codes.iter().any(|c| c == procedure_code)
    }
}

/// Statutory protections that apply to every PMB claim
///
/// Every flag is `false`: none of these benefit restrictions may be imposed
/// on a PMB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageRules {
    pub co_payment_allowed: bool,
    pub annual_limit_applies: bool,
    pub network_penalty_applies: bool,
    pub preauth_can_deny: bool,
    pub waiting_period_applies_to_emergency: bool,
}

/// The fixed PMB coverage rules
pub const COVERAGE_RULES: CoverageRules = CoverageRules {
    co_payment_allowed: false,
    annual_limit_applies: false,
    network_penalty_applies: false,
    preauth_can_deny: false,
    waiting_period_applies_to_emergency: false,
};

/// The 27 Chronic Disease List conditions, in regulatory order
pub static CHRONIC_DISEASE_LIST: Lazy<Vec<ChronicDiseaseEntry>> = Lazy::new(|| {
    vec![
        ChronicDiseaseEntry::new("CDL01", "Addison's disease", &["E27.1", "E27.2"]),
        ChronicDiseaseEntry::new("CDL02", "Asthma", &["J45", "J45.0", "J45.1", "J45.8", "J45.9", "J46"]),
        ChronicDiseaseEntry::new(
            "CDL03",
            "Bipolar mood disorder",
            &["F31.0", "F31.1", "F31.2", "F31.3", "F31.4", "F31.5", "F31.6", "F31.7", "F31.8", "F31.9"],
        ),
        ChronicDiseaseEntry::new("CDL04", "Bronchiectasis", &["J47"]),
        ChronicDiseaseEntry::new("CDL05", "Cardiac failure", &["I50.0", "I50.1", "I50.9"]),
        ChronicDiseaseEntry::new(
            "CDL06",
            "Cardiomyopathy",
            &["I42.0", "I42.1", "I42.2", "I42.3", "I42.4", "I42.5", "I42.6", "I42.7", "I42.8", "I42.9"],
        ),
        ChronicDiseaseEntry::new(
            "CDL07",
            "Chronic obstructive pulmonary disease",
            &["J44.0", "J44.1", "J44.8", "J44.9"],
        ),
        ChronicDiseaseEntry::new(
            "CDL08",
            "Chronic renal disease",
            &["N18.1", "N18.2", "N18.3", "N18.4", "N18.5", "N18.9"],
        ),
        ChronicDiseaseEntry::new("CDL09", "Coronary artery disease", &["I25.0", "I25.1", "I25.9"]),
        ChronicDiseaseEntry::new("CDL10", "Crohn's disease", &["K50.0", "K50.1", "K50.8", "K50.9"]),
        ChronicDiseaseEntry::new("CDL11", "Diabetes insipidus", &["E23.2"]),
        ChronicDiseaseEntry::new(
            "CDL12",
            "Diabetes mellitus type 1",
            &["E10.0", "E10.1", "E10.2", "E10.3", "E10.4", "E10.5", "E10.6", "E10.7", "E10.8", "E10.9"],
        ),
        ChronicDiseaseEntry::new(
            "CDL13",
            "Diabetes mellitus type 2",
            &["E11.0", "E11.1", "E11.2", "E11.3", "E11.4", "E11.5", "E11.6", "E11.7", "E11.8", "E11.9"],
        ),
        ChronicDiseaseEntry::new("CDL14", "Dysrhythmias", &["I47.1", "I48", "I49.9"]),
        ChronicDiseaseEntry::new(
            "CDL15",
            "Epilepsy",
            &["G40.0", "G40.1", "G40.2", "G40.3", "G40.4", "G40.5", "G40.6", "G40.7", "G40.8", "G40.9"],
        ),
        ChronicDiseaseEntry::new("CDL16", "Glaucoma", &["H40.1", "H40.2", "H40.9"]),
        ChronicDiseaseEntry::new("CDL17", "Haemophilia", &["D66", "D67"]),
        ChronicDiseaseEntry::new("CDL18", "HIV/AIDS", &["B20", "B21", "B22", "B23", "B24", "Z21"]),
        ChronicDiseaseEntry::new(
            "CDL19",
            "Hyperlipidaemia",
            &["E78.0", "E78.1", "E78.2", "E78.3", "E78.4", "E78.5"],
        ),
        ChronicDiseaseEntry::new("CDL20", "Hypertension", &["I10", "I11.9", "I12.9", "I15.9"]),
        ChronicDiseaseEntry::new("CDL21", "Hypothyroidism", &["E03.8", "E03.9"]),
        ChronicDiseaseEntry::new("CDL22", "Multiple sclerosis", &["G35"]),
        ChronicDiseaseEntry::new("CDL23", "Parkinson's disease", &["G20"]),
        ChronicDiseaseEntry::new(
            "CDL24",
            "Rheumatoid arthritis",
            &["M05.8", "M05.9", "M06.0", "M06.9"],
        ),
        ChronicDiseaseEntry::new(
            "CDL25",
            "Schizophrenia",
            &["F20.0", "F20.1", "F20.2", "F20.3", "F20.4", "F20.5", "F20.6", "F20.8", "F20.9"],
        ),
        ChronicDiseaseEntry::new("CDL26", "Systemic lupus erythematosus", &["M32.1", "M32.9"]),
        ChronicDiseaseEntry::new(
            "CDL27",
            "Ulcerative colitis",
            &["K51.0", "K51.2", "K51.3", "K51.5", "K51.8", "K51.9"],
        ),
    ]
});

/// Diagnosis-Treatment Pairs, in table order
pub static DIAGNOSIS_TREATMENT_PAIRS: Lazy<Vec<DiagnosisTreatmentPair>> = Lazy::new(|| {
    vec![
        DiagnosisTreatmentPair::new(
            "DTP001",
            "I21",
            "Acute Myocardial Infarction",
            &["36415", "92920", "92928", "92941"],
            "Coronary angioplasty",
        ),
        DiagnosisTreatmentPair::new(
            "DTP002",
            "C50",
            "Breast cancer",
            &["19301", "19303", "96413", "77385"],
            "Surgery, chemotherapy and radiotherapy",
        ),
        DiagnosisTreatmentPair::new(
            "DTP003",
            "K35",
            "Acute appendicitis",
            &["44950", "44960", "44970"],
            "Appendicectomy",
        ),
        DiagnosisTreatmentPair::new(
            "DTP004",
            "O80",
            "Single spontaneous delivery",
            &["59400", "59409", "59410"],
            "Delivery and postnatal care",
        ),
        DiagnosisTreatmentPair::new(
            "DTP005",
            "J45",
            "Acute asthma attack",
            &["94640", "94644"],
            "Emergency nebulisation and inpatient care",
        ),
        DiagnosisTreatmentPair::new(
            "DTP006",
            "I63",
            "Cerebral infarction",
            &["37195", "61645"],
            "Thrombolysis and thrombectomy",
        ),
    ]
});

/// Emergency condition labels for display; eligibility never matches on them
pub static EMERGENCY_CONDITIONS: Lazy<Vec<String>> = Lazy::new(|| {
    [
        "Cardiac arrest",
        "Acute myocardial infarction",
        "Stroke",
        "Severe respiratory distress",
        "Anaphylaxis",
        "Severe trauma",
        "Severe burns",
        "Poisoning or overdose",
        "Status epilepticus",
        "Diabetic ketoacidosis",
        "Acute abdomen",
        "Obstetric emergency",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
});
