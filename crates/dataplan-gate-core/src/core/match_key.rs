// crates/dataplan-gate-core/src/core/match_key.rs
// ============================================================================
// Module: Data Plan Match Keys
// Description: Match types, match descriptors, and canonical match keys.
// Purpose: Provide the single canonicalization shared by plan compilation and event lookup.
// Dependencies: serde, crate::core::canonical
// ============================================================================

//! ## Overview
//! Every planned event, attribute family, and identity family is addressed by a
//! [`MatchKey`]. Keys are produced only by [`MatchDescriptor::primary_key`] and
//! [`MatchDescriptor::product_attribute_key`]; data-plan match clauses and live
//! events are both lowered into a [`MatchDescriptor`] first, so a planned event
//! and the runtime event it describes always collide on the same key.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::borrow::Borrow;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::canonical::CanonicalEvent;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Separator placed between key segments.
const KEY_SEPARATOR: &str = ":";

/// Trailing segment appended to commerce keys for product-level attributes.
pub const PRODUCT_ATTRIBUTES_SEGMENT: &str = "ProductAttributes";

// ============================================================================
// SECTION: Match Types
// ============================================================================

/// Data-plan match type.
///
/// # Invariants
/// - [`MatchType::as_str`] and [`MatchType::parse`] are exact inverses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    /// Custom (page) event with a type and a name.
    CustomEvent,
    /// Screen view identified by screen name.
    ScreenView,
    /// Commerce product action (add to cart, purchase, ...).
    ProductAction,
    /// Commerce promotion action (view, click).
    PromotionAction,
    /// Commerce product impression.
    ProductImpression,
    /// User attribute family.
    UserAttributes,
    /// User identity family.
    UserIdentities,
}

impl MatchType {
    /// All supported match types in declaration order.
    pub const ALL: [Self; 7] = [
        Self::CustomEvent,
        Self::ScreenView,
        Self::ProductAction,
        Self::PromotionAction,
        Self::ProductImpression,
        Self::UserAttributes,
        Self::UserIdentities,
    ];

    /// Returns the wire name of the match type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CustomEvent => "custom_event",
            Self::ScreenView => "screen_view",
            Self::ProductAction => "product_action",
            Self::PromotionAction => "promotion_action",
            Self::ProductImpression => "product_impression",
            Self::UserAttributes => "user_attributes",
            Self::UserIdentities => "user_identities",
        }
    }

    /// Parses a wire name; unsupported names return `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|match_type| match_type.as_str() == value)
    }

    /// Returns true for the three commerce match types.
    #[must_use]
    pub const fn is_commerce(self) -> bool {
        matches!(self, Self::ProductAction | Self::PromotionAction | Self::ProductImpression)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Match Keys
// ============================================================================

/// Canonical lookup key for one planned event or attribute family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchKey(String);

impl MatchKey {
    /// Joins key segments with the canonical separator.
    fn from_segments(segments: &[&str]) -> Self {
        Self(segments.join(KEY_SEPARATOR))
    }

    /// Returns the fixed key of the user attribute family.
    #[must_use]
    pub fn user_attributes() -> Self {
        MatchDescriptor::UserAttributes.primary_key()
    }

    /// Returns the fixed key of the user identity family.
    #[must_use]
    pub fn user_identities() -> Self {
        MatchDescriptor::UserIdentities.primary_key()
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MatchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Borrow<str> for MatchKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// SECTION: Match Descriptors
// ============================================================================

/// Borrowed, type-specific description of a match target.
///
/// Both [`crate::core::document::MatchClause`] and [`CanonicalEvent`] lower into
/// this type; it is the only input to key generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDescriptor<'a> {
    /// Custom event criteria.
    CustomEvent {
        /// Custom event type name (e.g. `navigation`).
        custom_event_type: &'a str,
        /// Event name.
        event_name: &'a str,
    },
    /// Screen view criteria.
    ScreenView {
        /// Screen name.
        screen_name: &'a str,
    },
    /// Product action criteria.
    ProductAction {
        /// Product action name (e.g. `purchase`).
        action: &'a str,
    },
    /// Promotion action criteria.
    PromotionAction {
        /// Promotion action name (e.g. `view`).
        action: &'a str,
    },
    /// Product impression; carries no action segment.
    ProductImpression,
    /// User attribute family.
    UserAttributes,
    /// User identity family.
    UserIdentities,
}

impl MatchDescriptor<'_> {
    /// Returns the match type described.
    #[must_use]
    pub const fn match_type(&self) -> MatchType {
        match self {
            Self::CustomEvent {
                ..
            } => MatchType::CustomEvent,
            Self::ScreenView {
                ..
            } => MatchType::ScreenView,
            Self::ProductAction {
                ..
            } => MatchType::ProductAction,
            Self::PromotionAction {
                ..
            } => MatchType::PromotionAction,
            Self::ProductImpression => MatchType::ProductImpression,
            Self::UserAttributes => MatchType::UserAttributes,
            Self::UserIdentities => MatchType::UserIdentities,
        }
    }

    /// Builds the primary match key.
    #[must_use]
    pub fn primary_key(&self) -> MatchKey {
        let kind = self.match_type().as_str();
        match *self {
            Self::CustomEvent {
                custom_event_type,
                event_name,
            } => MatchKey::from_segments(&[kind, custom_event_type, event_name]),
            // The middle segment is reserved and always empty for screen views.
            Self::ScreenView {
                screen_name,
            } => MatchKey::from_segments(&[kind, "", screen_name]),
            Self::ProductAction {
                action,
            }
            | Self::PromotionAction {
                action,
            } => MatchKey::from_segments(&[kind, action]),
            Self::ProductImpression => MatchKey::from_segments(&[kind, ""]),
            Self::UserAttributes | Self::UserIdentities => MatchKey::from_segments(&[kind]),
        }
    }

    /// Builds the product-attribute key; only commerce descriptors have one.
    #[must_use]
    pub fn product_attribute_key(&self) -> Option<MatchKey> {
        if !self.match_type().is_commerce() {
            return None;
        }
        let primary = self.primary_key();
        Some(MatchKey::from_segments(&[primary.as_str(), PRODUCT_ATTRIBUTES_SEGMENT]))
    }
}

// ============================================================================
// SECTION: Event Resolution
// ============================================================================

/// Resolves the primary key of a canonical event.
///
/// Returns `None` for unrecognized events; a missing key never matches a table entry.
#[must_use]
pub fn resolve_match_key(event: &CanonicalEvent) -> Option<MatchKey> {
    event.match_descriptor().map(|descriptor| descriptor.primary_key())
}

/// Resolves the product-attribute key of a canonical event.
#[must_use]
pub fn resolve_product_attribute_key(event: &CanonicalEvent) -> Option<MatchKey> {
    event.match_descriptor().and_then(|descriptor| descriptor.product_attribute_key())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
