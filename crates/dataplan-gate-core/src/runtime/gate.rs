// crates/dataplan-gate-core/src/runtime/gate.rs
// ============================================================================
// Module: Attribute Gate
// Description: Single-key user-attribute admission query.
// Purpose: Let hosts check one attribute key before setting it.
// Dependencies: crate::core, crate::runtime::table
// ============================================================================

//! ## Overview
//! The gate answers against the same compiled table the mutator uses, so a key
//! it reports as allowed survives the user-attribute stage and vice versa.

use crate::core::MatchKey;
use crate::core::PropertyFilter;
use crate::runtime::table::CompiledDataPlan;

/// Read-only view over a compiled plan answering attribute-key queries.
#[derive(Debug, Clone, Copy)]
pub struct AttributeGate<'a> {
    /// Compiled plan consulted by each query.
    plan: &'a CompiledDataPlan,
}

impl<'a> AttributeGate<'a> {
    /// Creates a gate over a compiled plan.
    #[must_use]
    pub const fn new(plan: &'a CompiledDataPlan) -> Self {
        Self {
            plan,
        }
    }

    /// Returns true when `key` would be stripped from user attributes.
    ///
    /// # Invariants
    /// - Always false when blocking is disabled or user attributes are not blocked.
    /// - Always false when the plan has no `user_attributes` entry.
    #[must_use]
    pub fn is_attribute_key_blocked(&self, key: &str) -> bool {
        let policy = &self.plan.policy;
        if !policy.enabled || !policy.block_user_attributes {
            return false;
        }
        match self.plan.table.get(MatchKey::user_attributes().as_str()) {
            Some(filter @ PropertyFilter::AllowSet(_)) => !filter.permits(key),
            Some(PropertyFilter::AllowAll) | None => false,
        }
    }
}
