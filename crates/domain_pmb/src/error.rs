//! PMB domain errors

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur while evaluating PMB rules
///
/// Rule matching itself cannot fail; the only failure is an audit sink
/// rejection under `AuditFailurePolicy::Propagate`.
#[derive(Debug, Error)]
pub enum PmbError {
    #[error("Audit sink failed while recording {action}: {source}")]
    AuditFailed {
        action: String,
        #[source]
        source: PortError,
    },
}

impl PmbError {
    pub fn audit_failed(action: impl Into<String>, source: PortError) -> Self {
        PmbError::AuditFailed {
            action: action.into(),
            source,
        }
    }
}

pub type PmbResult<T> = Result<T, PmbError>;
