//! Tracing-backed audit sink
//!
//! Emits every PMB audit event as a structured record on the `audit` target so
//! the log pipeline can route it to long-term storage.

use async_trait::async_trait;
use tracing::info;

use core_kernel::{DomainPort, PortError};
use domain_pmb::{AuditEvent, AuditPort};

/// Audit adapter that writes events to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditAdapter;

impl TracingAuditAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for TracingAuditAdapter {}

#[async_trait]
impl AuditPort for TracingAuditAdapter {
    async fn log_event(&self, event: AuditEvent) -> Result<(), PortError> {
        let metadata = serde_json::to_string(&event.metadata)
            .map_err(|e| PortError::internal_from("unserializable audit metadata", e))?;

        info!(
            target: "audit",
            event_type = %event.event_type,
            entity_type = %event.entity_type,
            entity_id = %event.entity_id,
            user_id = %event.user_id,
            action = %event.action,
            metadata = %metadata,
            occurred_at = %event.occurred_at.to_rfc3339(),
            "audit event"
        );

        Ok(())
    }
}
