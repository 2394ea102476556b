// crates/dataplan-gate-core/src/lib.rs
// ============================================================================
// Module: Data Plan Gate Core Library
// Description: Public API surface for the data-plan blocking engine.
// Purpose: Expose core types, collaborator interfaces, and runtime helpers.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Data Plan Gate compiles a data-plan document into a flat lookup table and
//! applies it to analytics events before they reach downstream forwarders.
//! Unplanned events are dropped and unplanned attributes and identities are
//! stripped, each under its own policy toggle. The engine is synchronous,
//! performs no I/O, and integrates through explicit collaborator traits.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use interfaces::EventConverter;
pub use interfaces::IdentityTypeRegistry;
pub use interfaces::Logger;
pub use runtime::AttributeGate;
pub use runtime::BlockingPolicy;
pub use runtime::CompiledDataPlan;
pub use runtime::DataPlanCompiler;
pub use runtime::EventMutator;
pub use runtime::KitBlocker;
pub use runtime::LookupTable;
pub use runtime::PolicyOverrides;
pub use runtime::SdkEventConverter;
pub use runtime::StandardIdentityRegistry;
pub use runtime::TracingLogger;
