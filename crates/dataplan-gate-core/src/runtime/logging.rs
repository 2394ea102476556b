// crates/dataplan-gate-core/src/runtime/logging.rs
// ============================================================================
// Module: Tracing Logger
// Description: Logger collaborator that forwards to the tracing facade.
// Dependencies: tracing, crate::interfaces
// ============================================================================

//! ## Overview
//! Diagnostics are emitted under the `dataplan_gate` target; installing a
//! subscriber is left to the host binary.

use tracing::error;
use tracing::warn;

use crate::interfaces::Logger;

/// [`Logger`] implementation backed by `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        warn!(target: "dataplan_gate", "{message}");
    }

    fn error(&self, message: &str) {
        error!(target: "dataplan_gate", "{message}");
    }
}
