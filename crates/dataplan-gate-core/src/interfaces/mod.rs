// crates/dataplan-gate-core/src/interfaces/mod.rs
// ============================================================================
// Module: Data Plan Gate Interfaces
// Description: Collaborator contracts for event conversion, identity naming, and logging.
// Purpose: Keep the blocking engine free of ambient global state.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The compiler and mutator receive their collaborators explicitly. Default
//! implementations live in [`crate::runtime`]; callers embedding the engine in
//! a different SDK supply their own.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::CanonicalEvent;
use crate::core::RuntimeEvent;

// ============================================================================
// SECTION: Event Converter
// ============================================================================

/// Converts runtime events into canonical events for key resolution.
pub trait EventConverter {
    /// Produces the canonical description of `event`.
    ///
    /// Events that cannot be addressed by a data plan map to
    /// [`CanonicalEvent::Unrecognized`].
    fn canonicalize(&self, event: &RuntimeEvent) -> CanonicalEvent;
}

impl<T: EventConverter + ?Sized> EventConverter for &T {
    fn canonicalize(&self, event: &RuntimeEvent) -> CanonicalEvent {
        (**self).canonicalize(event)
    }
}

// ============================================================================
// SECTION: Identity Type Registry
// ============================================================================

/// Maps numeric identity type codes to canonical identity names.
pub trait IdentityTypeRegistry {
    /// Returns the canonical name of `code`, or `None` for codes the platform does not define.
    fn identity_name(&self, code: u32) -> Option<&str>;
}

impl<T: IdentityTypeRegistry + ?Sized> IdentityTypeRegistry for &T {
    fn identity_name(&self, code: u32) -> Option<&str> {
        (**self).identity_name(code)
    }
}

// ============================================================================
// SECTION: Logger
// ============================================================================

/// Fire-and-forget sink for data-plan diagnostics.
pub trait Logger {
    /// Records a non-fatal warning.
    fn warn(&self, message: &str);

    /// Records an error.
    fn error(&self, message: &str);
}

impl<T: Logger + ?Sized> Logger for &T {
    fn warn(&self, message: &str) {
        (**self).warn(message);
    }

    fn error(&self, message: &str) {
        (**self).error(message);
    }
}
