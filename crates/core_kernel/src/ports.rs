//! Ports and Adapters Infrastructure
//!
//! Domain crates declare port traits for the collaborators they consume
//! (the PMB evaluator consumes an audit sink) and extend the `DomainPort`
//! marker defined here. Adapters implement those traits, so the domain can be
//! wired to a tracing sink in the server and to an in-memory recorder in tests.
//!
//! ```rust,ignore
//! #[async_trait]
//! pub trait AuditPort: DomainPort {
//!     async fn log_event(&self, event: AuditEvent) -> Result<(), PortError>;
//! }
//!
//! let evaluator = PmbEvaluator::new(Arc::new(TracingAuditAdapter::new()));
//! ```

use thiserror::Error;

/// Error type for port operations
///
/// All port implementations return this type so that callers handle internal
/// and external adapters the same way.
#[derive(Debug, Error)]
pub enum PortError {
    /// The external system is unavailable
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PortError {
    /// Creates a ServiceUnavailable error
    pub fn unavailable(service: impl Into<String>) -> Self {
        PortError::ServiceUnavailable {
            service: service.into(),
        }
    }

    /// Wraps the error that made an adapter fail
    pub fn internal_from(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PortError::Internal {
            message: message.into(),
            source: Box::new(source),
        }
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared across request handlers, so every implementation must be
/// thread-safe and `'static`.
pub trait DomainPort: Send + Sync + 'static {}
