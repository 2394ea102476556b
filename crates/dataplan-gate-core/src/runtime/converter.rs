// crates/dataplan-gate-core/src/runtime/converter.rs
// ============================================================================
// Module: SDK Event Converter
// Description: Default conversion from SDK runtime events to canonical events.
// Purpose: Name event categories and commerce actions the way data plans do.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! The SDK carries categories and actions as numeric codes; data plans name
//! them (`navigation`, `add_to_cart`, ...). [`SdkEventConverter`] performs that
//! translation and nothing else.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::CanonicalEvent;
use crate::core::CommercePayload;
use crate::core::EventCategory;
use crate::core::RuntimeEvent;
use crate::core::event::custom_event_type_name;
use crate::core::event::product_action_name;
use crate::core::event::promotion_action_name;
use crate::interfaces::EventConverter;

// ============================================================================
// SECTION: Converter
// ============================================================================

/// Converter for the SDK's runtime event shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct SdkEventConverter;

impl EventConverter for SdkEventConverter {
    fn canonicalize(&self, event: &RuntimeEvent) -> CanonicalEvent {
        match event.category() {
            EventCategory::CustomEvent => event.event_name.as_ref().map_or(
                CanonicalEvent::Unrecognized,
                |name| CanonicalEvent::CustomEvent {
                    custom_event_type: custom_event_type_name(event.event_category.unwrap_or(0))
                        .to_string(),
                    event_name: name.clone(),
                },
            ),
            EventCategory::ScreenView => {
                event.event_name.as_ref().map_or(CanonicalEvent::Unrecognized, |name| {
                    CanonicalEvent::ScreenView {
                        screen_name: name.clone(),
                    }
                })
            }
            EventCategory::Commerce => CanonicalEvent::Commerce(CommercePayload {
                product_action: event
                    .product_action
                    .as_ref()
                    .map(|action| product_action_name(action.product_action_type).to_string()),
                promotion_action: event
                    .promotion_action
                    .as_ref()
                    .map(|action| promotion_action_name(action.promotion_action_type).to_string()),
                has_product_impressions: event
                    .product_impressions
                    .as_ref()
                    .is_some_and(|impressions| !impressions.is_empty()),
            }),
            EventCategory::Other => CanonicalEvent::Unrecognized,
        }
    }
}
