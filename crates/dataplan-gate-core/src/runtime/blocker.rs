// crates/dataplan-gate-core/src/runtime/blocker.rs
// ============================================================================
// Module: Kit Blocker
// Description: Facade owning a compiled plan and its collaborators.
// Purpose: Offer the two entry points forwarders call per event.
// Dependencies: crate::core, crate::interfaces, crate::runtime
// ============================================================================

//! ## Overview
//! [`KitBlocker`] compiles a document once at construction and then answers
//! [`KitBlocker::create_blocked_event`] and
//! [`KitBlocker::is_attribute_key_blocked`] for the life of the forwarder.
//! Construction never fails: malformed points are reported through the
//! [`Logger`] and a missing document yields a pass-through blocker.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::DataPlanDocument;
use crate::core::RuntimeEvent;
use crate::interfaces::EventConverter;
use crate::interfaces::IdentityTypeRegistry;
use crate::interfaces::Logger;
use crate::runtime::compiler::DataPlanCompiler;
use crate::runtime::converter::SdkEventConverter;
use crate::runtime::gate::AttributeGate;
use crate::runtime::logging::TracingLogger;
use crate::runtime::mutator::EventMutator;
use crate::runtime::policy::PolicyOverrides;
use crate::runtime::registry::StandardIdentityRegistry;
use crate::runtime::table::CompiledDataPlan;

// ============================================================================
// SECTION: Kit Blocker
// ============================================================================

/// Compiled data plan bundled with the collaborators needed to apply it.
#[derive(Debug, Clone)]
pub struct KitBlocker<C = SdkEventConverter, R = StandardIdentityRegistry> {
    /// Compiled plan.
    plan: CompiledDataPlan,
    /// Runtime-to-canonical event converter.
    converter: C,
    /// Identity code registry.
    identities: R,
}

impl KitBlocker {
    /// Compiles `document` with the default collaborators.
    #[must_use]
    pub fn with_defaults(document: Option<&DataPlanDocument>) -> Self {
        Self::with_overrides(document, PolicyOverrides::default())
    }

    /// Compiles `document` with the default collaborators and host overrides.
    #[must_use]
    pub fn with_overrides(document: Option<&DataPlanDocument>, overrides: PolicyOverrides) -> Self {
        let plan = DataPlanCompiler::new(TracingLogger).with_overrides(overrides).compile(document);
        Self::from_plan(plan, SdkEventConverter, StandardIdentityRegistry)
    }
}

impl<C, R> KitBlocker<C, R>
where
    C: EventConverter,
    R: IdentityTypeRegistry,
{
    /// Compiles `document`, reporting diagnostics through `logger`.
    #[must_use]
    pub fn new<L: Logger>(
        document: Option<&DataPlanDocument>,
        logger: L,
        converter: C,
        identities: R,
    ) -> Self {
        let plan = DataPlanCompiler::new(logger).compile(document);
        Self::from_plan(plan, converter, identities)
    }

    /// Wraps an already compiled plan.
    #[must_use]
    pub const fn from_plan(plan: CompiledDataPlan, converter: C, identities: R) -> Self {
        Self {
            plan,
            converter,
            identities,
        }
    }

    /// Returns the compiled plan.
    #[must_use]
    pub const fn plan(&self) -> &CompiledDataPlan {
        &self.plan
    }

    /// Applies every blocking stage; `None` means the event must not be forwarded.
    #[must_use]
    pub fn create_blocked_event(&self, event: RuntimeEvent) -> Option<RuntimeEvent> {
        EventMutator::new(&self.plan, &self.converter, &self.identities).mutate(event)
    }

    /// Returns true when the user attribute `key` would be stripped.
    #[must_use]
    pub fn is_attribute_key_blocked(&self, key: &str) -> bool {
        AttributeGate::new(&self.plan).is_attribute_key_blocked(key)
    }
}
