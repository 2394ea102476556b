// crates/dataplan-gate-core/src/runtime/table.rs
// ============================================================================
// Module: Lookup Table
// Description: Write-once mapping from match keys to property filters.
// Purpose: Hold the compiled data plan in a form callers can read but not modify.
// Dependencies: serde, crate::core, crate::runtime::policy
// ============================================================================

//! ## Overview
//! [`LookupTable`] exposes read accessors only. Entries are inserted by the
//! compiler through crate-private methods, so once a [`CompiledDataPlan`] is
//! handed out it can be shared across threads without locking.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::MatchKey;
use crate::core::PropertyFilter;
use crate::runtime::policy::BlockingPolicy;

// ============================================================================
// SECTION: Lookup Table
// ============================================================================

/// Compiled mapping from match key to property filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LookupTable {
    /// Entries keyed by canonical match key.
    entries: BTreeMap<MatchKey, PropertyFilter>,
}

impl LookupTable {
    /// Inserts or overwrites an entry, returning the previous filter.
    pub(crate) fn insert(
        &mut self,
        key: MatchKey,
        filter: PropertyFilter,
    ) -> Option<PropertyFilter> {
        self.entries.insert(key, filter)
    }

    /// Returns the filter stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&PropertyFilter> {
        self.entries.get(key)
    }

    /// Returns the filter for an optional key; `None` keys never match.
    #[must_use]
    pub fn lookup(&self, key: Option<&MatchKey>) -> Option<&PropertyFilter> {
        key.and_then(|key| self.entries.get(key))
    }

    /// Returns true when `key` has an entry.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&MatchKey, &PropertyFilter)> {
        self.entries.iter()
    }
}

// ============================================================================
// SECTION: Compiled Data Plan
// ============================================================================

/// Output of data-plan compilation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledDataPlan {
    /// Resolved blocking policy.
    pub(crate) policy: BlockingPolicy,
    /// Compiled lookup table.
    pub(crate) table: LookupTable,
}

impl CompiledDataPlan {
    /// Returns the plan used when no data plan is loaded.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            policy: BlockingPolicy::disabled(),
            table: LookupTable::default(),
        }
    }

    /// Returns the blocking policy.
    #[must_use]
    pub const fn policy(&self) -> &BlockingPolicy {
        &self.policy
    }

    /// Returns the lookup table.
    #[must_use]
    pub const fn table(&self) -> &LookupTable {
        &self.table
    }
}
