// crates/dataplan-gate-core/tests/proptest_properties.rs
// ============================================================================
// Module: Blocking Property-Based Tests
// Description: Property tests for key symmetry and mutation idempotence.
// Purpose: Check pipeline invariants across arbitrary names and attribute sets.
// ============================================================================

//! Property-based tests for blocking invariants.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    reason = "Test-only assertions and helpers are permitted."
)]

mod common;

use std::collections::BTreeSet;

use common::attributes;
use common::closed_object;
use common::custom_event;
use common::point;
use common::with_identities;
use common::with_user_attributes;
use dataplan_gate_core::DataPlanDocument;
use dataplan_gate_core::KitBlocker;
use dataplan_gate_core::PolicyBlock;
use dataplan_gate_core::core::event::custom_event_type_name;
use proptest::prelude::*;
use serde_json::Value;
use serde_json::json;

fn full_policy() -> PolicyBlock {
    PolicyBlock {
        block_events: Some(true),
        block_event_attributes: Some(true),
        block_user_attributes: Some(true),
        block_user_identities: Some(true),
    }
}

fn event_validator(names: &[&str]) -> Value {
    json!({
        "definition": {
            "properties": {
                "data": {"properties": {"custom_attributes": closed_object(names)}}
            }
        }
    })
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 :_]{0,16}"
}

fn key_set_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-z]{1,6}", 0 .. 6)
}

proptest! {
    #[test]
    fn planned_custom_events_are_never_dropped(code in 0u32 .. 12, name in name_strategy()) {
        let document = DataPlanDocument {
            policy: Some(full_policy()),
            data_points: vec![point(
                "custom_event",
                &json!({"custom_event_type": custom_event_type_name(code), "event_name": name}),
                json!({}),
            )],
        };
        let blocker = KitBlocker::with_defaults(Some(&document));

        let event = custom_event(&name, code, &[]);
        prop_assert_eq!(blocker.create_blocked_event(event.clone()), Some(event));
    }

    #[test]
    fn mutation_is_idempotent_for_arbitrary_attributes(
        planned in key_set_strategy(),
        event_keys in key_set_strategy(),
        user_keys in key_set_strategy(),
        identity_codes in prop::collection::vec(0u32 .. 25, 0 .. 6),
    ) {
        let planned: Vec<&str> = planned.iter().map(String::as_str).collect();
        let document = DataPlanDocument {
            policy: Some(full_policy()),
            data_points: vec![
                point(
                    "custom_event",
                    &json!({"custom_event_type": "navigation", "event_name": "tap"}),
                    event_validator(&planned),
                ),
                point("user_attributes", &json!({}), json!({"definition": closed_object(&planned)})),
                point(
                    "user_identities",
                    &json!({}),
                    json!({"definition": closed_object(&["email", "customerid", "other3"])}),
                ),
            ],
        };
        let blocker = KitBlocker::with_defaults(Some(&document));

        let event_pairs: Vec<(&str, &str)> = event_keys.iter().map(|key| (key.as_str(), "v")).collect();
        let user_pairs: Vec<(&str, &str)> = user_keys.iter().map(|key| (key.as_str(), "v")).collect();
        let identities: Vec<(u32, &str)> = identity_codes.iter().map(|code| (*code, "id")).collect();
        let event = with_identities(
            with_user_attributes(custom_event("tap", 1, &event_pairs), &user_pairs),
            &identities,
        );

        let once = blocker.create_blocked_event(event).unwrap();
        let twice = blocker.create_blocked_event(once.clone()).unwrap();
        prop_assert_eq!(&once, &twice);

        let expected: Vec<(&str, &str)> = event_pairs
            .iter()
            .copied()
            .filter(|(key, _)| planned.contains(key))
            .collect();
        prop_assert_eq!(once.event_attributes, Some(attributes(&expected)));
    }
}
