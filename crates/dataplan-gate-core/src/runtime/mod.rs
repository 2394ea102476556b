// crates/dataplan-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Data Plan Gate Runtime
// Description: Compiler, mutator, attribute gate, and default collaborators.
// Purpose: Turn data-plan documents into decisions applied to live events.
// Dependencies: crate::{core, interfaces}, tracing
// ============================================================================

//! ## Overview
//! Compilation happens once per data-plan load; everything downstream borrows
//! the resulting [`CompiledDataPlan`] read-only. Both the mutator and the
//! attribute gate consult that one table so their answers cannot diverge.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod blocker;
pub mod compiler;
pub mod converter;
pub mod gate;
pub mod logging;
pub mod mutator;
pub mod policy;
pub mod registry;
pub mod table;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use blocker::KitBlocker;
pub use compiler::DataPlanCompiler;
pub use converter::SdkEventConverter;
pub use gate::AttributeGate;
pub use logging::TracingLogger;
pub use mutator::EventMutator;
pub use policy::BlockingPolicy;
pub use policy::PolicyOverrides;
pub use registry::StandardIdentityRegistry;
pub use table::CompiledDataPlan;
pub use table::LookupTable;
