// crates/dataplan-gate-core/tests/attribute_gate.rs
// ============================================================================
// Module: Attribute Gate Tests
// Description: Single-key user-attribute admission queries.
// ============================================================================
//! ## Overview
//! Validates gate answers across policy states and their agreement with the
//! user-attribute mutation stage.

#![allow(clippy::unwrap_used, reason = "Tests use unwrap on deterministic fixtures.")]
#![allow(clippy::expect_used, reason = "Tests use expect for explicit failure messages.")]

mod common;

use common::blocking_plan;
use common::custom_event;
use common::plan_with_flags;
use common::replace_definition;
use common::with_user_attributes;
use dataplan_gate_core::AttributeGate;
use dataplan_gate_core::KitBlocker;
use serde_json::json;

#[test]
fn unplanned_key_is_blocked_under_a_closed_definition() {
    let blocker = KitBlocker::with_defaults(Some(&blocking_plan()));

    assert!(blocker.is_attribute_key_blocked("blocked attribute"));
    assert!(!blocker.is_attribute_key_blocked("my attribute"));
    assert!(!blocker.is_attribute_key_blocked("a third attribute"));
}

#[test]
fn open_definition_blocks_nothing() {
    let mut document = blocking_plan();
    replace_definition(&mut document, "user_attributes", json!({"additionalProperties": true}));
    let blocker = KitBlocker::with_defaults(Some(&document));

    assert!(!blocker.is_attribute_key_blocked("blocked attribute"));
}

#[test]
fn nothing_is_blocked_when_user_attribute_blocking_is_off() {
    let blocker = KitBlocker::with_defaults(Some(&plan_with_flags(true, true, false, true)));

    assert!(!blocker.is_attribute_key_blocked("blocked attribute"));
}

#[test]
fn nothing_is_blocked_without_a_data_plan() {
    let blocker = KitBlocker::with_defaults(None);

    assert!(!AttributeGate::new(blocker.plan()).is_attribute_key_blocked("anything"));
}

#[test]
fn nothing_is_blocked_without_a_user_attribute_point() {
    let mut document = blocking_plan();
    document.data_points.retain(|point| point["match"]["type"] != "user_attributes");
    let blocker = KitBlocker::with_defaults(Some(&document));

    assert!(!blocker.is_attribute_key_blocked("blocked attribute"));
}

#[test]
fn gate_agrees_with_user_attribute_stage() {
    let blocker = KitBlocker::with_defaults(Some(&blocking_plan()));
    let keys = ["my attribute", "my other attribute", "unplanned", ""];
    let pairs: Vec<(&str, &str)> = keys.iter().map(|key| (*key, "value")).collect();
    let event = with_user_attributes(custom_event("Search Event", 3, &[]), &pairs);

    let mutated = blocker.create_blocked_event(event).unwrap();
    let kept = mutated.user_attributes.unwrap();
    for key in keys {
        assert_eq!(blocker.is_attribute_key_blocked(key), !kept.contains_key(key), "key `{key}`");
    }
}
