use crate::error::{ConfigError, TransportError};
use crate::session::SessionId;

/// Fire-and-forget sink for failures that never reach the end user verbatim.
pub trait Diagnostics {
    fn configuration_rejected(&self, error: &ConfigError);
    fn transport_failed(&self, session_id: &SessionId, error: &TransportError);
}

/// Default sink: structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn configuration_rejected(&self, error: &ConfigError) {
        tracing::error!(error = %error, "omni widget not mounted");
    }

    fn transport_failed(&self, session_id: &SessionId, error: &TransportError) {
        tracing::error!(session_id = %session_id, error = %error, "omni widget API error");
    }
}
