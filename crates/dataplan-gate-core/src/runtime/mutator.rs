// crates/dataplan-gate-core/src/runtime/mutator.rs
// ============================================================================
// Module: Event Mutator
// Description: Applies a compiled data plan to runtime events.
// Purpose: Drop unplanned events and strip unplanned attributes and identities.
// Dependencies: tracing, crate::core, crate::interfaces, crate::runtime::table
// ============================================================================

//! ## Overview
//! The pipeline runs five stages in a fixed order: event gate, event-attribute
//! gate, product-attribute gate, user-attribute gate, user-identity gate. Only
//! the event gate can drop an event; the others prune keys. Pruning rebuilds
//! each map or list from its retained entries.
//!
//! The mutator owns the event for the duration of one call and returns either
//! the same event, updated, or `None` to signal "do not forward". Running the
//! pipeline on its own output changes nothing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use tracing::debug;

use crate::core::CanonicalEvent;
use crate::core::MatchKey;
use crate::core::PropertyFilter;
use crate::core::RuntimeEvent;
use crate::core::resolve_match_key;
use crate::core::resolve_product_attribute_key;
use crate::interfaces::EventConverter;
use crate::interfaces::IdentityTypeRegistry;
use crate::runtime::table::CompiledDataPlan;

// ============================================================================
// SECTION: Event Mutator
// ============================================================================

/// Applies a compiled data plan to runtime events.
#[derive(Debug, Clone)]
pub struct EventMutator<'a, C, R> {
    /// Compiled plan consulted by every stage.
    plan: &'a CompiledDataPlan,
    /// Runtime-to-canonical event converter.
    converter: C,
    /// Identity code registry.
    identities: R,
}

impl<'a, C, R> EventMutator<'a, C, R>
where
    C: EventConverter,
    R: IdentityTypeRegistry,
{
    /// Creates a mutator over a compiled plan.
    #[must_use]
    pub const fn new(plan: &'a CompiledDataPlan, converter: C, identities: R) -> Self {
        Self {
            plan,
            converter,
            identities,
        }
    }

    /// Runs the full pipeline; `None` means the event must not be forwarded.
    #[must_use]
    pub fn mutate(&self, event: RuntimeEvent) -> Option<RuntimeEvent> {
        if !self.plan.policy.enabled {
            return Some(event);
        }
        let canonical = self.converter.canonicalize(&event);
        let event = self.apply_event_gates(event, &canonical)?;
        let event = self.apply_product_gate(event, &canonical);
        let event = self.mutate_user_attributes(event);
        Some(self.mutate_user_identities(event))
    }

    /// Runs the event gate and the event-attribute gate.
    #[must_use]
    pub fn mutate_event_attributes(&self, event: RuntimeEvent) -> Option<RuntimeEvent> {
        let canonical = self.converter.canonicalize(&event);
        self.apply_event_gates(event, &canonical)
    }

    /// Runs the product-attribute gate.
    #[must_use]
    pub fn mutate_product_attributes(&self, event: RuntimeEvent) -> RuntimeEvent {
        let canonical = self.converter.canonicalize(&event);
        self.apply_product_gate(event, &canonical)
    }

    /// Runs the user-attribute gate.
    #[must_use]
    pub fn mutate_user_attributes(&self, mut event: RuntimeEvent) -> RuntimeEvent {
        if !self.plan.policy.block_user_attributes {
            return event;
        }
        let Some(filter) = self.allow_set(&MatchKey::user_attributes()) else {
            return event;
        };
        event.user_attributes =
            event.user_attributes.take().map(|attributes| filter.retain_permitted(attributes));
        event
    }

    /// Runs the user-identity gate.
    ///
    /// Identities whose type code has no registered name are removed.
    #[must_use]
    pub fn mutate_user_identities(&self, mut event: RuntimeEvent) -> RuntimeEvent {
        if !self.plan.policy.block_user_identities {
            return event;
        }
        let Some(filter) = self.allow_set(&MatchKey::user_identities()) else {
            return event;
        };
        event.user_identities = event.user_identities.take().map(|identities| {
            identities
                .into_iter()
                .filter(|identity| {
                    self.identities
                        .identity_name(identity.identity_type)
                        .is_some_and(|name| filter.permits(name))
                })
                .collect()
        });
        event
    }

    /// Event gate followed by the event-attribute gate.
    fn apply_event_gates(
        &self,
        mut event: RuntimeEvent,
        canonical: &CanonicalEvent,
    ) -> Option<RuntimeEvent> {
        let policy = &self.plan.policy;
        let key = resolve_match_key(canonical);
        let filter = self.plan.table.lookup(key.as_ref());

        if policy.block_events && filter.is_none() {
            debug!(key = key.as_ref().map_or("", MatchKey::as_str), "dropping unplanned event");
            return None;
        }

        if policy.block_event_attributes
            && let Some(filter @ PropertyFilter::AllowSet(_)) = filter
        {
            event.event_attributes =
                event.event_attributes.take().map(|attributes| filter.retain_permitted(attributes));
        }
        Some(event)
    }

    /// Product-attribute gate; prunes each product independently.
    fn apply_product_gate(&self, mut event: RuntimeEvent, canonical: &CanonicalEvent) -> RuntimeEvent {
        if !self.plan.policy.block_event_attributes || !event.has_product_list() {
            return event;
        }
        let key = resolve_product_attribute_key(canonical);
        let Some(filter @ PropertyFilter::AllowSet(_)) = self.plan.table.lookup(key.as_ref()) else {
            return event;
        };
        let products =
            event.product_action.as_mut().and_then(|action| action.product_list.as_mut());
        for product in products.into_iter().flatten() {
            product.attributes =
                product.attributes.take().map(|attributes| filter.retain_permitted(attributes));
        }
        event
    }

    /// Returns the entry under `key` when it is a closed allow-set.
    fn allow_set(&self, key: &MatchKey) -> Option<&'a PropertyFilter> {
        match self.plan.table.get(key.as_str()) {
            Some(filter @ PropertyFilter::AllowSet(_)) => Some(filter),
            _ => None,
        }
    }
}
