//! Comprehensive tests for domain_pmb

use std::sync::Arc;

use domain_pmb::ports::{actions, entities, NO_CLAIM_ID};
use domain_pmb::{
    AuditFailurePolicy, CallerIdentity, InMemoryAuditPort, PmbCategory, PmbError, PmbEvaluator,
    COVERAGE_RULES,
};
use proptest::prelude::*;
use test_utils::*;

fn caller() -> CallerIdentity {
    CallerFixtures::claims_assessor()
}

fn codes(list: &[&str]) -> Vec<String> {
    list.iter().map(|c| c.to_string()).collect()
}

// ============================================================================
// Eligibility Precedence Tests
// ============================================================================

mod eligibility_tests {
    use super::*;

    #[tokio::test]
    async fn test_unlisted_diagnosis_is_not_eligible() {
        let (evaluator, _) = recording_evaluator();

        let verdict = evaluator
            .check_eligibility(DiagnosisFixtures::routine_checkup(), None, false, &caller())
            .await
            .unwrap();

        assert_not_eligible(&verdict);
        assert_eq!(verdict.explanation, "Diagnosis does not match any PMB criteria");
    }

    #[tokio::test]
    async fn test_emergency_wins_regardless_of_codes() {
        let (evaluator, _) = recording_evaluator();

        let verdict = evaluator
            .check_eligibility("ANY", Some("ANY"), true, &caller())
            .await
            .unwrap();

        assert_verdict_category(&verdict, PmbCategory::Emergency);
        assert!(verdict.matched_cdl.is_none());
        assert!(verdict.matched_dtp.is_none());
    }

    #[tokio::test]
    async fn test_emergency_beats_a_matching_dtp() {
        let (evaluator, _) = recording_evaluator();

        let verdict = evaluator
            .check_eligibility(
                DiagnosisFixtures::myocardial_infarction(),
                Some(ProcedureFixtures::angioplasty()),
                true,
                &caller(),
            )
            .await
            .unwrap();

        assert_eq!(verdict.category, Some(PmbCategory::Emergency));
    }

    #[tokio::test]
    async fn test_dtp_takes_precedence_over_cdl() {
        let (evaluator, _) = recording_evaluator();

        let verdict = evaluator
            .check_eligibility(
                DiagnosisFixtures::asthma(),
                Some(ProcedureFixtures::nebulisation()),
                false,
                &caller(),
            )
            .await
            .unwrap();

        assert_verdict_category(&verdict, PmbCategory::Dtp);
        assert_eq!(verdict.matched_dtp.as_ref().unwrap().dtp_code, "DTP005");
        assert!(verdict.matched_cdl.is_none());
    }

    #[tokio::test]
    async fn test_cdl_fallback_without_procedure() {
        let (evaluator, _) = recording_evaluator();

        let verdict = evaluator
            .check_eligibility(DiagnosisFixtures::asthma(), None, false, &caller())
            .await
            .unwrap();

        assert_verdict_category(&verdict, PmbCategory::Chronic);
        assert_eq!(verdict.condition_name.as_deref(), Some("Asthma"));
        assert_eq!(verdict.matched_cdl.as_ref().unwrap().code, "CDL02");
        assert!(verdict.explanation.contains("Asthma"));
    }

    #[tokio::test]
    async fn test_cdl_fallback_with_non_matching_procedure() {
        let (evaluator, _) = recording_evaluator();

        let verdict = evaluator
            .check_eligibility(
                DiagnosisFixtures::asthma(),
                Some(ProcedureFixtures::unlisted()),
                false,
                &caller(),
            )
            .await
            .unwrap();

        assert_verdict_category(&verdict, PmbCategory::Chronic);
    }

    #[tokio::test]
    async fn test_dtp_diagnosis_without_procedure_is_not_eligible() {
        let (evaluator, _) = recording_evaluator();

        // I21 is only a DTP diagnosis; without a procedure nothing matches
        let verdict = evaluator
            .check_eligibility(DiagnosisFixtures::myocardial_infarction(), None, false, &caller())
            .await
            .unwrap();

        assert_not_eligible(&verdict);
    }

    #[tokio::test]
    async fn test_exact_match_only() {
        let (evaluator, _) = recording_evaluator();

        let family = evaluator
            .check_eligibility(DiagnosisFixtures::type_1_diabetes_family(), None, false, &caller())
            .await
            .unwrap();
        assert_not_eligible(&family);

        let subcode = evaluator
            .check_eligibility(DiagnosisFixtures::type_1_diabetes(), None, false, &caller())
            .await
            .unwrap();
        assert_verdict_category(&subcode, PmbCategory::Chronic);
        assert_eq!(subcode.matched_cdl.unwrap().code, "CDL12");

        let lowercase = evaluator
            .check_eligibility("j45", None, false, &caller())
            .await
            .unwrap();
        assert_not_eligible(&lowercase);
    }
}

// ============================================================================
// DTP Evaluation Tests
// ============================================================================

mod dtp_evaluation_tests {
    use super::*;

    #[tokio::test]
    async fn test_angioplasty_matches_dtp001() {
        let (evaluator, _) = recording_evaluator();

        let result = evaluator
            .evaluate_dtp("I21", &codes(&["36415"]), None, &caller())
            .await
            .unwrap();

        assert!(result.matched);
        assert!(result.must_pay_minimum);
        let dtp = result.dtp.unwrap();
        assert_eq!(dtp.dtp_code, "DTP001");
        assert_eq!(dtp.diagnosis_name, "Acute Myocardial Infarction");
        assert_eq!(dtp.treatment_name, "Coronary angioplasty");
    }

    #[tokio::test]
    async fn test_unlisted_procedure_does_not_match() {
        let (evaluator, _) = recording_evaluator();

        let result = evaluator
            .evaluate_dtp("I21", &codes(&["99999"]), None, &caller())
            .await
            .unwrap();

        assert!(!result.matched);
        assert!(!result.must_pay_minimum);
        assert!(result.dtp.is_none());
        assert!(result.matched_procedure_code.is_none());
    }

    #[tokio::test]
    async fn test_any_procedure_in_list_matches() {
        let (evaluator, _) = recording_evaluator();

        let result = evaluator
            .evaluate_dtp("K35", &codes(&["99999", "00001", "44970"]), None, &caller())
            .await
            .unwrap();

        assert!(result.matched);
        assert_eq!(result.dtp_code(), Some("DTP003"));
        assert_eq!(result.matched_procedure_code.as_deref(), Some("44970"));
    }

    #[tokio::test]
    async fn test_ignores_cdl_and_emergency_paths() {
        let (evaluator, _) = recording_evaluator();

        // Hypertension is on the CDL but has no DTP
        let result = evaluator
            .evaluate_dtp(DiagnosisFixtures::hypertension(), &codes(&["36415"]), None, &caller())
            .await
            .unwrap();

        assert!(!result.matched);
    }

    #[tokio::test]
    async fn test_empty_procedure_list_never_matches() {
        let (evaluator, audit) = recording_evaluator();

        let result = evaluator
            .evaluate_dtp("I21", &[], None, &caller())
            .await
            .unwrap();

        assert!(!result.matched);
        assert_eq!(audit.len().await, 1);
    }
}

// ============================================================================
// Protection Tests
// ============================================================================

mod protection_tests {
    use super::*;

    #[tokio::test]
    async fn test_asthma_claim_is_fully_protected() {
        let (evaluator, _) = recording_evaluator();
        let claim = ClaimFixtures::chronic_asthma();

        let outcome = evaluator.apply_protection(claim.clone(), &caller()).await.unwrap();

        let protected = assert_fully_protected(&outcome);
        assert_eq!(protected.pmb_category, PmbCategory::Chronic);
        assert_eq!(protected.claim, claim);
    }

    #[tokio::test]
    async fn test_angioplasty_claim_is_protected_via_dtp() {
        let (evaluator, _) = recording_evaluator();

        let outcome = evaluator
            .apply_protection(ClaimFixtures::angioplasty(), &caller())
            .await
            .unwrap();

        assert_eq!(assert_fully_protected(&outcome).pmb_category, PmbCategory::Dtp);
    }

    #[tokio::test]
    async fn test_emergency_claim_is_protected() {
        let (evaluator, _) = recording_evaluator();

        let outcome = evaluator
            .apply_protection(ClaimFixtures::emergency(), &caller())
            .await
            .unwrap();

        assert_eq!(assert_fully_protected(&outcome).pmb_category, PmbCategory::Emergency);
    }

    #[tokio::test]
    async fn test_in_network_claim_still_protected() {
        let (evaluator, _) = recording_evaluator();
        let claim = ClaimBuilder::new()
            .diagnosis(DiagnosisFixtures::hypertension())
            .in_network()
            .build();
        assert_eq!(claim.member_liability(), claim.co_payment);

        let outcome = evaluator.apply_protection(claim, &caller()).await.unwrap();

        let protected = assert_fully_protected(&outcome);
        assert_eq!(protected.pmb_category, PmbCategory::Chronic);
        assert!(protected.claim.provider_in_network);
        assert!(protected.member_liability().is_zero());
    }

    #[tokio::test]
    async fn test_unmatched_claim_is_returned_unchanged() {
        let (evaluator, audit) = recording_evaluator();
        let claim = ClaimFixtures::routine();

        let outcome = evaluator.apply_protection(claim.clone(), &caller()).await.unwrap();

        assert!(!outcome.is_protected());
        assert_unprotected(&outcome, &claim);
        assert!(audit.is_empty().await);
    }
}

// ============================================================================
// Audit Tests
// ============================================================================

mod audit_tests {
    use super::*;

    #[tokio::test]
    async fn test_dtp_match_emits_one_event() {
        let (evaluator, audit) = recording_evaluator();

        evaluator
            .check_eligibility("I21", Some("36415"), false, &caller())
            .await
            .unwrap();

        let events = audit.events().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].action, actions::DTP_MATCH);
        assert_eq!(events[0].event_type, "pmb");
        assert_eq!(events[0].entity_type, entities::DIAGNOSIS);
        assert_eq!(events[0].user_id, "assessor-001");
        assert_eq!(events[0].metadata["dtp_code"], "DTP001");
        assert_eq!(events[0].metadata["procedure_code"], "36415");
    }

    #[tokio::test]
    async fn test_cdl_match_emits_one_event() {
        let (evaluator, audit) = recording_evaluator();

        evaluator
            .check_eligibility("I10", None, false, &caller())
            .await
            .unwrap();

        assert_eq!(audit.actions().await, vec![actions::CDL_MATCH.to_string()]);
        assert_eq!(audit.events().await[0].metadata["cdl_code"], "CDL20");
    }

    #[tokio::test]
    async fn test_emergency_and_miss_emit_nothing() {
        let (evaluator, audit) = recording_evaluator();

        evaluator.check_eligibility("X", None, true, &caller()).await.unwrap();
        evaluator.check_eligibility("Z00.0", None, false, &caller()).await.unwrap();

        assert!(audit.is_empty().await);
    }

    #[tokio::test]
    async fn test_dtp_evaluation_always_audited() {
        let (evaluator, audit) = recording_evaluator();
        evaluator
            .evaluate_dtp("I21", &codes(&["36415"]), Some("claim-42"), &caller())
            .await
            .unwrap();
        evaluator
            .evaluate_dtp("I21", &codes(&["99999"]), None, &caller())
            .await
            .unwrap();

        let events = audit.events().await;
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.action == actions::DTP_EVALUATED));
        assert_eq!(events[0].entity_id, "claim-42");
        assert_eq!(events[0].metadata["matched"], true);
        assert_eq!(events[1].entity_id, NO_CLAIM_ID);
        assert_eq!(events[1].metadata["matched"], false);
    }

    #[tokio::test]
    async fn test_claim_id_recorded_verbatim() {
        let (evaluator, audit) = recording_evaluator();
        let raw = "550e8400-e29b-41d4-a716-446655440000";

        let result = evaluator
            .evaluate_dtp("I21", &codes(&["36415"]), Some(raw), &caller())
            .await
            .unwrap();

        assert_eq!(result.claim_id.as_deref(), Some(raw));
        assert_eq!(audit.events().await[0].entity_id, raw);
    }

    #[tokio::test]
    async fn test_protection_records_match_then_fixed_breakdown() {
        let (evaluator, audit) = recording_evaluator();
        let claim = ClaimFixtures::chronic_asthma();

        evaluator.apply_protection(claim.clone(), &caller()).await.unwrap();

        let events = audit.events().await;
        assert_eq!(
            audit.actions().await,
            vec![actions::CDL_MATCH.to_string(), actions::PROTECTION_APPLIED.to_string()]
        );
        let applied = &events[1];
        assert_eq!(applied.entity_type, entities::CLAIM);
        assert_eq!(applied.entity_id, claim.id.to_string());
        assert_eq!(applied.metadata["category"], "chronic");
        assert_eq!(applied.metadata["diagnosis_code"], "J45");
        let removed = &applied.metadata["protections_removed"];
        assert_eq!(removed["co_payment_removed"], true);
        assert_eq!(removed["annual_limit_removed"], true);
        assert_eq!(removed["network_penalty_removed"], true);
    }
}

// ============================================================================
// Audit Failure Policy Tests
// ============================================================================

mod failure_policy_tests {
    use super::*;

    #[tokio::test]
    async fn test_log_and_continue_returns_verdict() {
        let (evaluator, audit) = failing_evaluator(AuditFailurePolicy::LogAndContinue);

        let verdict = evaluator
            .check_eligibility("J45", None, false, &caller())
            .await
            .unwrap();

        assert_verdict_category(&verdict, PmbCategory::Chronic);
        assert!(audit.is_empty().await);
    }

    #[tokio::test]
    async fn test_log_and_continue_still_protects_claim() {
        let (evaluator, _) = failing_evaluator(AuditFailurePolicy::LogAndContinue);

        let outcome = evaluator
            .apply_protection(ClaimFixtures::chronic_asthma(), &caller())
            .await
            .unwrap();

        assert_fully_protected(&outcome);
    }

    #[tokio::test]
    async fn test_propagate_fails_matched_check() {
        let (evaluator, _) = failing_evaluator(AuditFailurePolicy::Propagate);

        let err = evaluator
            .check_eligibility("J45", None, false, &caller())
            .await
            .unwrap_err();

        match err {
            PmbError::AuditFailed { action, .. } => assert_eq!(action, actions::CDL_MATCH),
        }
    }

    #[tokio::test]
    async fn test_propagate_does_not_affect_unaudited_paths() {
        let (evaluator, _) = failing_evaluator(AuditFailurePolicy::Propagate);

        let verdict = evaluator
            .check_eligibility("Z00.0", None, false, &caller())
            .await
            .unwrap();
        assert!(!verdict.is_pmb_eligible);

        let emergency = evaluator
            .check_eligibility("Z00.0", None, true, &caller())
            .await
            .unwrap();
        assert_eq!(emergency.category, Some(PmbCategory::Emergency));
    }

    #[tokio::test]
    async fn test_sink_recovers_after_outage() {
        let audit = InMemoryAuditPort::failing();
        let evaluator = PmbEvaluator::new(Arc::new(audit.clone()))
            .with_failure_policy(AuditFailurePolicy::Propagate);

        assert!(evaluator.evaluate_dtp("I21", &[], None, &caller()).await.is_err());

        audit.set_failing(false);
        assert!(evaluator.evaluate_dtp("I21", &[], None, &caller()).await.is_ok());
        assert_eq!(audit.len().await, 1);
    }
}

// ============================================================================
// Reference Data Tests
// ============================================================================

mod reference_tests {
    use super::*;

    #[test]
    fn test_accessors_expose_tables_verbatim() {
        let (evaluator, _) = recording_evaluator();

        assert_eq!(evaluator.cdl_conditions().len(), 27);
        assert_eq!(evaluator.dtps()[0].dtp_code, "DTP001");
        assert!(!evaluator.emergency_conditions().is_empty());
        assert_eq!(*evaluator.coverage_rules(), COVERAGE_RULES);
        assert!(!evaluator.coverage_rules().co_payment_allowed);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime")
}

proptest! {
    #[test]
    fn prop_unlisted_diagnosis_never_eligible(code in unlisted_diagnosis_strategy()) {
        let (evaluator, _) = recording_evaluator();
        let verdict = runtime()
            .block_on(evaluator.check_eligibility(&code, None, false, &caller()))
            .unwrap();
        prop_assert!(!verdict.is_pmb_eligible);
    }

    #[test]
    fn prop_emergency_always_wins(
        diagnosis in arbitrary_code_strategy(),
        procedure in proptest::option::of(arbitrary_code_strategy()),
    ) {
        let (evaluator, _) = recording_evaluator();
        let verdict = runtime()
            .block_on(evaluator.check_eligibility(&diagnosis, procedure.as_deref(), true, &caller()))
            .unwrap();
        prop_assert_eq!(verdict.category, Some(PmbCategory::Emergency));
    }

    #[test]
    fn prop_cdl_codes_are_chronic_without_procedure(code in cdl_diagnosis_strategy()) {
        let (evaluator, _) = recording_evaluator();
        let verdict = runtime()
            .block_on(evaluator.check_eligibility(&code, None, false, &caller()))
            .unwrap();
        prop_assert_eq!(verdict.category, Some(PmbCategory::Chronic));
    }

    #[test]
    fn prop_check_eligibility_is_idempotent(
        diagnosis in icd10_strategy(),
        procedure in proptest::option::of(procedure_code_strategy()),
        emergency in any::<bool>(),
    ) {
        let (evaluator, _) = recording_evaluator();
        let rt = runtime();
        let first = rt
            .block_on(evaluator.check_eligibility(&diagnosis, procedure.as_deref(), emergency, &caller()))
            .unwrap();
        let second = rt
            .block_on(evaluator.check_eligibility(&diagnosis, procedure.as_deref(), emergency, &caller()))
            .unwrap();
        prop_assert_eq!(first, second);
    }
}
