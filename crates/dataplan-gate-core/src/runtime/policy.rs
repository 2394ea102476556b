// crates/dataplan-gate-core/src/runtime/policy.rs
// ============================================================================
// Module: Blocking Policy
// Description: The four blocking toggles and the derived enabled flag.
// Purpose: Resolve a document policy block plus optional overrides into one record.
// Dependencies: serde, crate::core
// ============================================================================

//! ## Overview
//! Every flag defaults to "not enforced". `enabled` records whether any
//! blocking configuration was supplied at all; with it false every gate is a
//! no-op.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::PolicyBlock;

// ============================================================================
// SECTION: Blocking Policy
// ============================================================================

/// Resolved blocking policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockingPolicy {
    /// Drop events with no table entry.
    pub block_events: bool,
    /// Strip unplanned event and product attributes.
    pub block_event_attributes: bool,
    /// Strip unplanned user attributes.
    pub block_user_attributes: bool,
    /// Strip unplanned user identities.
    pub block_user_identities: bool,
    /// True when any blocking configuration is present.
    pub enabled: bool,
}

impl BlockingPolicy {
    /// Returns the policy used when no data plan is loaded.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            block_events: false,
            block_event_attributes: false,
            block_user_attributes: false,
            block_user_identities: false,
            enabled: false,
        }
    }

    /// Resolves a document policy block; an absent block yields the disabled policy.
    #[must_use]
    pub fn from_block(block: Option<&PolicyBlock>) -> Self {
        let Some(block) = block else {
            return Self::disabled();
        };
        Self {
            block_events: block.block_events.unwrap_or(false),
            block_event_attributes: block.block_event_attributes.unwrap_or(false),
            block_user_attributes: block.block_user_attributes.unwrap_or(false),
            block_user_identities: block.block_user_identities.unwrap_or(false),
            enabled: true,
        }
    }

    /// Applies host-side overrides on top of the document policy.
    ///
    /// Each set override replaces its flag; any set override enables blocking.
    #[must_use]
    pub fn with_overrides(self, overrides: PolicyOverrides) -> Self {
        if overrides.is_empty() {
            return self;
        }
        Self {
            block_events: overrides.block_events.unwrap_or(self.block_events),
            block_event_attributes: overrides
                .block_event_attributes
                .unwrap_or(self.block_event_attributes),
            block_user_attributes: overrides
                .block_user_attributes
                .unwrap_or(self.block_user_attributes),
            block_user_identities: overrides
                .block_user_identities
                .unwrap_or(self.block_user_identities),
            enabled: true,
        }
    }
}

// ============================================================================
// SECTION: Overrides
// ============================================================================

/// Host-supplied replacements for individual policy flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyOverrides {
    /// Override for `block_events`.
    #[serde(default)]
    pub block_events: Option<bool>,
    /// Override for `block_event_attributes`.
    #[serde(default)]
    pub block_event_attributes: Option<bool>,
    /// Override for `block_user_attributes`.
    #[serde(default)]
    pub block_user_attributes: Option<bool>,
    /// Override for `block_user_identities`.
    #[serde(default)]
    pub block_user_identities: Option<bool>,
}

impl PolicyOverrides {
    /// Returns true when no override is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.block_events.is_none()
            && self.block_event_attributes.is_none()
            && self.block_user_attributes.is_none()
            && self.block_user_identities.is_none()
    }
}
