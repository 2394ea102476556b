// crates/dataplan-gate-core/src/core/canonical.rs
// ============================================================================
// Module: Canonical Event Model
// Description: Category-tagged event descriptions used for match resolution.
// Purpose: Decouple key resolution from the runtime event's field layout.
// Dependencies: crate::core::match_key
// ============================================================================

//! ## Overview
//! A [`CanonicalEvent`] is what an [`crate::interfaces::EventConverter`]
//! produces from a runtime event. It carries only the fields key resolution
//! needs and nothing else.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::match_key::MatchDescriptor;

// ============================================================================
// SECTION: Canonical Events
// ============================================================================

/// Canonical, category-tagged event description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonicalEvent {
    /// Custom event.
    CustomEvent {
        /// Custom event type name.
        custom_event_type: String,
        /// Event name.
        event_name: String,
    },
    /// Screen view.
    ScreenView {
        /// Screen name.
        screen_name: String,
    },
    /// Commerce event payload.
    Commerce(CommercePayload),
    /// Any category the data plan cannot address, or an event missing required fields.
    Unrecognized,
}

/// Commerce payload presence, by branch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommercePayload {
    /// Product action name, when a product action is present.
    pub product_action: Option<String>,
    /// Promotion action name, when a promotion action is present.
    pub promotion_action: Option<String>,
    /// Whether product impressions are present.
    pub has_product_impressions: bool,
}

impl CommercePayload {
    /// Selects the single branch used for matching.
    ///
    /// Priority is product action, then promotion action, then impressions.
    #[must_use]
    pub fn match_descriptor(&self) -> Option<MatchDescriptor<'_>> {
        if let Some(action) = self.product_action.as_deref() {
            return Some(MatchDescriptor::ProductAction {
                action,
            });
        }
        if let Some(action) = self.promotion_action.as_deref() {
            return Some(MatchDescriptor::PromotionAction {
                action,
            });
        }
        if self.has_product_impressions {
            return Some(MatchDescriptor::ProductImpression);
        }
        None
    }
}

impl CanonicalEvent {
    /// Lowers the event into a match descriptor.
    #[must_use]
    pub fn match_descriptor(&self) -> Option<MatchDescriptor<'_>> {
        match self {
            Self::CustomEvent {
                custom_event_type,
                event_name,
            } => Some(MatchDescriptor::CustomEvent {
                custom_event_type,
                event_name,
            }),
            Self::ScreenView {
                screen_name,
            } => Some(MatchDescriptor::ScreenView {
                screen_name,
            }),
            Self::Commerce(payload) => payload.match_descriptor(),
            Self::Unrecognized => None,
        }
    }
}
