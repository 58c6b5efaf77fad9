//! PMB rule evaluator
//!
//! Wraps the pure `PmbRuleSet` matching with audit recording. The evaluator
//! holds no mutable state, so one instance is cloned into every request
//! handler.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, info};

use crate::error::{PmbError, PmbResult};
use crate::ports::{
    actions, entities, AuditEvent, AuditFailurePolicy, AuditPort, CallerIdentity, NO_CLAIM_ID,
};
use crate::protection::{Claim, ProtectedClaim, ProtectionOutcome, PROTECTION_BREAKDOWN};
use crate::reference::{ChronicDiseaseEntry, CoverageRules, DiagnosisTreatmentPair};
use crate::rules::PmbRuleSet;
use crate::verdict::{DtpEvaluationResult, EligibilityVerdict};

/// Evaluates diagnosis and procedure codes against the PMB rules
#[derive(Clone)]
pub struct PmbEvaluator {
    rules: Arc<PmbRuleSet>,
    audit: Arc<dyn AuditPort>,
    failure_policy: AuditFailurePolicy,
}

impl PmbEvaluator {
    /// Creates an evaluator over the statutory tables
    pub fn new(audit: Arc<dyn AuditPort>) -> Self {
        Self::with_rules(Arc::new(PmbRuleSet::statutory()), audit)
    }

    /// Creates an evaluator over a specific rule set
    pub fn with_rules(rules: Arc<PmbRuleSet>, audit: Arc<dyn AuditPort>) -> Self {
        Self {
            rules,
            audit,
            failure_policy: AuditFailurePolicy::default(),
        }
    }

    /// Sets how audit sink failures are handled
    pub fn with_failure_policy(mut self, policy: AuditFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Determines whether a diagnosis/procedure pair is a PMB
    ///
    /// Precedence is emergency, then DTP (only with a procedure code), then
    /// CDL. DTP and CDL matches are audited; emergencies and misses are not.
    pub async fn check_eligibility(
        &self,
        diagnosis_code: &str,
        procedure_code: Option<&str>,
        is_emergency: bool,
        caller: &CallerIdentity,
    ) -> PmbResult<EligibilityVerdict> {
        let verdict = self
            .rules
            .match_eligibility(diagnosis_code, procedure_code, is_emergency);

        debug!(
            diagnosis_code,
            procedure_code = procedure_code.unwrap_or(""),
            is_emergency,
            category = verdict.category.map(|c| c.as_str()).unwrap_or("none"),
            "PMB eligibility evaluated"
        );

        match (&verdict.matched_dtp, &verdict.matched_cdl) {
            (Some(dtp), _) => {
                let event = AuditEvent::pmb(
                    entities::DIAGNOSIS,
                    diagnosis_code,
                    caller,
                    actions::DTP_MATCH,
                    json!({
                        "diagnosis_code": diagnosis_code,
                        "procedure_code": procedure_code,
                        "dtp_code": dtp.dtp_code,
                    }),
                );
                self.record(event).await?;
            }
            (None, Some(cdl)) => {
                let event = AuditEvent::pmb(
                    entities::DIAGNOSIS,
                    diagnosis_code,
                    caller,
                    actions::CDL_MATCH,
                    json!({
                        "diagnosis_code": diagnosis_code,
                        "cdl_code": cdl.code,
                        "condition_name": cdl.name,
                    }),
                );
                self.record(event).await?;
            }
            (None, None) => {}
        }

        Ok(verdict)
    }

    /// Matches a diagnosis against the DTP table for any of several procedures
    ///
    /// Emergency and CDL rules are not consulted. Always audited, matched or
    /// not, against the claim id exactly as the caller supplied it.
    pub async fn evaluate_dtp(
        &self,
        diagnosis_code: &str,
        procedure_codes: &[String],
        claim_id: Option<&str>,
        caller: &CallerIdentity,
    ) -> PmbResult<DtpEvaluationResult> {
        let result = self
            .rules
            .match_dtp(diagnosis_code, procedure_codes, claim_id);

        let entity_id = claim_id.unwrap_or(NO_CLAIM_ID);

        debug!(
            diagnosis_code,
            claim = %entity_id,
            matched = result.matched,
            "DTP evaluated"
        );

        let event = AuditEvent::pmb(
            entities::CLAIM,
            entity_id,
            caller,
            actions::DTP_EVALUATED,
            json!({
                "diagnosis_code": diagnosis_code,
                "procedure_codes": procedure_codes,
                "matched": result.matched,
                "dtp_code": result.dtp_code(),
            }),
        );
        self.record(event).await?;

        Ok(result)
    }

    /// Applies PMB protections to a claim if any rule covers it
    pub async fn apply_protection(
        &self,
        claim: Claim,
        caller: &CallerIdentity,
    ) -> PmbResult<ProtectionOutcome> {
        let verdict = self
            .check_eligibility(
                &claim.diagnosis_code,
                claim.procedure_code.as_deref(),
                claim.is_emergency,
                caller,
            )
            .await?;

        let protected = match ProtectedClaim::from_verdict(claim, &verdict) {
            Ok(protected) => protected,
            Err(claim) => return Ok(ProtectionOutcome::unprotected(claim)),
        };

        info!(
            claim = %protected.claim.id,
            category = %protected.pmb_category,
            diagnosis_code = %protected.claim.diagnosis_code,
            "PMB protection applied"
        );

        let event = AuditEvent::pmb(
            entities::CLAIM,
            protected.claim.id.to_string(),
            caller,
            actions::PROTECTION_APPLIED,
            json!({
                "category": protected.pmb_category,
                "diagnosis_code": protected.claim.diagnosis_code,
                "protections_removed": PROTECTION_BREAKDOWN,
            }),
        );
        self.record(event).await?;

        Ok(ProtectionOutcome::Protected(protected))
    }

    pub fn cdl_conditions(&self) -> &[ChronicDiseaseEntry] {
        self.rules.cdl_conditions()
    }

    pub fn dtps(&self) -> &[DiagnosisTreatmentPair] {
        self.rules.dtps()
    }

    pub fn emergency_conditions(&self) -> &[String] {
        self.rules.emergency_conditions()
    }

    pub fn coverage_rules(&self) -> &CoverageRules {
        self.rules.coverage_rules()
    }

    async fn record(&self, event: AuditEvent) -> PmbResult<()> {
        let action = event.action.clone();
        match self.audit.log_event(event).await {
            Ok(()) => Ok(()),
            Err(err) => match self.failure_policy {
                AuditFailurePolicy::LogAndContinue => {
                    error!(action = %action, error = %err, "Audit sink failed; continuing");
                    Ok(())
                }
                AuditFailurePolicy::Propagate => Err(PmbError::audit_failed(action, err)),
            },
        }
    }
}

impl std::fmt::Debug for PmbEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PmbEvaluator")
            .field("cdl_conditions", &self.rules.cdl_conditions().len())
            .field("dtps", &self.rules.dtps().len())
            .field("failure_policy", &self.failure_policy)
            .finish()
    }
}
