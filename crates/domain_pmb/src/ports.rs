//! PMB Domain Ports
//!
//! The evaluator records rule matches through an injected audit sink. The
//! sink is a port so the server can wire a tracing adapter while tests wire an
//! in-memory recorder.
//!
//! ```rust,ignore
//! use domain_pmb::{PmbEvaluator, NoopAuditPort};
//! use std::sync::Arc;
//!
//! let evaluator = PmbEvaluator::new(Arc::new(NoopAuditPort));
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use core_kernel::{DomainPort, PortError};

/// Event type stamped on every PMB audit event
pub const PMB_EVENT_TYPE: &str = "pmb";

/// Entity id used when a DTP evaluation is not tied to a claim
pub const NO_CLAIM_ID: &str = "no-claim-id";

/// Audit actions emitted by the evaluator
pub mod actions {
    pub const DTP_MATCH: &str = "pmb_dtp_match";
    pub const CDL_MATCH: &str = "pmb_cdl_match";
    pub const DTP_EVALUATED: &str = "dtp_evaluated";
    pub const PROTECTION_APPLIED: &str = "pmb_protection_applied";
}

/// Audit entity types
pub mod entities {
    pub const DIAGNOSIS: &str = "diagnosis";
    pub const CLAIM: &str = "claim";
}

/// The authenticated actor on whose behalf an operation runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub user_id: String,
}

impl CallerIdentity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self { user_id: user_id.into() }
    }

    /// Identity used for internal calls with no authenticated user
    pub fn system() -> Self {
        Self::new("system")
    }
}

/// A single audit record handed to the sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub event_type: String,
    pub entity_type: String,
    pub entity_id: String,
    pub user_id: String,
    pub action: String,
    pub metadata: Value,
    pub occurred_at: DateTime<Utc>,
}

impl AuditEvent {
    /// Creates a PMB audit event stamped with the current time
    pub fn pmb(
        entity_type: &str,
        entity_id: impl Into<String>,
        caller: &CallerIdentity,
        action: &str,
        metadata: Value,
    ) -> Self {
        Self {
            event_type: PMB_EVENT_TYPE.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: entity_id.into(),
            user_id: caller.user_id.clone(),
            action: action.to_string(),
            metadata,
            occurred_at: Utc::now(),
        }
    }
}

/// What the evaluator does when the audit sink rejects an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditFailurePolicy {
    /// Log the failure and return the verdict anyway
    #[default]
    LogAndContinue,
    /// Fail the operation
    Propagate,
}

/// Audit sink consumed by the PMB evaluator
#[async_trait]
pub trait AuditPort: DomainPort {
    /// Records one event
    async fn log_event(&self, event: AuditEvent) -> Result<(), PortError>;
}

/// Audit sink that discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditPort;

impl DomainPort for NoopAuditPort {}

#[async_trait]
impl AuditPort for NoopAuditPort {
    async fn log_event(&self, _event: AuditEvent) -> Result<(), PortError> {
        Ok(())
    }
}

/// Recording implementation of AuditPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory audit sink that keeps every event it accepts
    #[derive(Debug, Default, Clone)]
    pub struct InMemoryAuditPort {
        events: Arc<RwLock<Vec<AuditEvent>>>,
        failing: Arc<AtomicBool>,
    }

    impl InMemoryAuditPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// A sink that rejects every event as unavailable
        pub fn failing() -> Self {
            let port = Self::new();
            port.set_failing(true);
            port
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        pub async fn events(&self) -> Vec<AuditEvent> {
            self.events.read().await.clone()
        }

        pub async fn actions(&self) -> Vec<String> {
            self.events
                .read()
                .await
                .iter()
                .map(|e| e.action.clone())
                .collect()
        }

        pub async fn len(&self) -> usize {
            self.events.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.events.read().await.is_empty()
        }
    }

    impl DomainPort for InMemoryAuditPort {}

    #[async_trait]
    impl AuditPort for InMemoryAuditPort {
        async fn log_event(&self, event: AuditEvent) -> Result<(), PortError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::unavailable("in-memory audit sink"));
            }
            self.events.write().await.push(event);
            Ok(())
        }
    }
}
