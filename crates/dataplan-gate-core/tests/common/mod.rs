// crates/dataplan-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Shared Test Fixtures
// Description: Data-plan fixtures, recording logger, and event builders.
// ============================================================================

//! Shared helpers for the core integration tests.

#![allow(dead_code, reason = "Not every test binary uses every fixture.")]

use std::cell::RefCell;

use dataplan_gate_core::AttributeMap;
use dataplan_gate_core::DataPlanDocument;
use dataplan_gate_core::Logger;
use dataplan_gate_core::MessageType;
use dataplan_gate_core::Product;
use dataplan_gate_core::ProductAction;
use dataplan_gate_core::RuntimeEvent;
use dataplan_gate_core::UserIdentity;
use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Data Plan Fixtures
// ============================================================================

/// Number of valid points in [`plan_value`].
pub const VALID_POINTS: usize = 12;

/// Number of commerce points in [`plan_value`].
pub const COMMERCE_POINTS: usize = 5;

/// Validator whose event custom attributes are a closed set.
fn event_attributes_validator(names: &[&str]) -> Value {
    json!({
        "type": "object",
        "definition": {
            "properties": {
                "data": {
                    "properties": {
                        "custom_attributes": closed_object(names)
                    }
                }
            }
        }
    })
}

/// Validator whose event custom attributes accept anything.
fn open_event_attributes_validator() -> Value {
    json!({
        "definition": {
            "properties": {
                "data": {
                    "properties": {
                        "custom_attributes": {
                            "additionalProperties": true,
                            "properties": {}
                        }
                    }
                }
            }
        }
    })
}

/// Validator for a commerce point with event and product attribute sets.
fn commerce_validator(event_names: &[&str], product_names: &[&str]) -> Value {
    json!({
        "definition": {
            "properties": {
                "data": {
                    "properties": {
                        "custom_attributes": closed_object(event_names),
                        "product_action": {
                            "properties": {
                                "products": {
                                    "items": {
                                        "properties": {
                                            "custom_attributes": closed_object(product_names)
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Object schema declaring `names` with no additional properties.
pub fn closed_object(names: &[&str]) -> Value {
    let properties: serde_json::Map<String, Value> =
        names.iter().map(|name| ((*name).to_string(), json!({"type": "string"}))).collect();
    json!({
        "additionalProperties": false,
        "properties": properties
    })
}

/// Builds one data point.
pub fn point(match_type: &str, criteria: &Value, validator: Value) -> Value {
    json!({
        "match": {
            "type": match_type,
            "criteria": criteria
        },
        "validator": validator
    })
}

/// Returns the data points of the standard fixture plan.
pub fn data_points() -> Vec<Value> {
    vec![
        point(
            "custom_event",
            &json!({"event_name": "Search Event", "custom_event_type": "search"}),
            open_event_attributes_validator(),
        ),
        point(
            "custom_event",
            &json!({"event_name": "locationEvent", "custom_event_type": "location"}),
            event_attributes_validator(&["foo", "foo foo", "foo number"]),
        ),
        point(
            "product_action",
            &json!({"action": "add_to_cart"}),
            commerce_validator(
                &[
                    "attributeNumMinMax",
                    "attributeEmail",
                    "attributeNumEnum",
                    "attributeStringAlpha",
                    "attributeBoolean",
                ],
                &["plannedAttr1", "plannedAttr2"],
            ),
        ),
        point(
            "product_action",
            &json!({"action": "purchase"}),
            commerce_validator(&["transaction_note"], &["plannedAttr1", "plannedAttr2"]),
        ),
        point(
            "product_action",
            &json!({"action": "view_detail"}),
            json!({"definition": {}}),
        ),
        point(
            "promotion_action",
            &json!({"action": "view"}),
            event_attributes_validator(&["not required", "required"]),
        ),
        point(
            "custom_event",
            &json!({"event_name": "TestEvent", "custom_event_type": "navigation"}),
            json!({"definition": {}}),
        ),
        point("product_impression", &json!({}), event_attributes_validator(&["thing1"])),
        point(
            "screen_view",
            &json!({"screen_name": "A New ScreenViewEvent"}),
            json!({"definition": {"properties": {"data": null}}}),
        ),
        point(
            "screen_view",
            &json!({"screen_name": "my screeeen"}),
            event_attributes_validator(&["test1key", "test2key"]),
        ),
        point(
            "user_attributes",
            &json!({}),
            json!({"definition": closed_object(&["my attribute", "my other attribute", "a third attribute"])}),
        ),
        point(
            "user_identities",
            &json!({}),
            json!({"definition": {"additionalProperties": true, "properties": {}}}),
        ),
        json!({"match": {"type": "custom_event", "criteria": {"event_name": "no validator"}}}),
    ]
}

/// Returns the fixture plan in the wire layout with the given policy flags.
pub fn plan_value(ev: bool, ea: bool, ua: bool, ui: bool) -> Value {
    json!({
        "dtpn": {
            "blok": {"ev": ev, "ea": ea, "ua": ua, "ui": ui},
            "vers": {
                "version": 1,
                "data_plan_id": "test",
                "version_document": {
                    "data_points": data_points()
                }
            }
        }
    })
}

/// Parses the fixture plan with every policy flag set.
pub fn blocking_plan() -> DataPlanDocument {
    plan_with_flags(true, true, true, true)
}

/// Parses the fixture plan with explicit policy flags.
pub fn plan_with_flags(ev: bool, ea: bool, ua: bool, ui: bool) -> DataPlanDocument {
    DataPlanDocument::from_value(plan_value(ev, ea, ua, ui)).unwrap()
}

/// Replaces the validator definition of the first point of `match_type`.
pub fn replace_definition(document: &mut DataPlanDocument, match_type: &str, definition: Value) {
    let point = document
        .data_points
        .iter_mut()
        .find(|point| point["match"]["type"] == match_type)
        .unwrap();
    point["validator"]["definition"] = definition;
}

// ============================================================================
// SECTION: Recording Logger
// ============================================================================

/// Logger that keeps every message for later assertions.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    /// Warning messages in emission order.
    pub warnings: RefCell<Vec<String>>,
    /// Error messages in emission order.
    pub errors: RefCell<Vec<String>>,
}

impl Logger for RecordingLogger {
    fn warn(&self, message: &str) {
        self.warnings.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}

// ============================================================================
// SECTION: Event Builders
// ============================================================================

/// Builds an attribute map from string pairs.
pub fn attributes(pairs: &[(&str, &str)]) -> AttributeMap {
    pairs.iter().map(|(key, value)| ((*key).to_string(), json!(value))).collect()
}

/// Builds a custom event with the given custom event type code.
pub fn custom_event(name: &str, category: u32, attrs: &[(&str, &str)]) -> RuntimeEvent {
    RuntimeEvent {
        event_name: Some(name.to_string()),
        event_data_type: Some(MessageType::PageEvent.code()),
        event_category: Some(category),
        event_attributes: Some(attributes(attrs)),
        ..RuntimeEvent::default()
    }
}

/// Builds a screen view.
pub fn screen_view(name: &str, attrs: &[(&str, &str)]) -> RuntimeEvent {
    RuntimeEvent {
        event_name: Some(name.to_string()),
        event_data_type: Some(MessageType::PageView.code()),
        event_attributes: Some(attributes(attrs)),
        ..RuntimeEvent::default()
    }
}

/// Builds a product with custom attributes and untouched extra fields.
pub fn product(name: &str, sku: &str, price: u64, attrs: &[(&str, &str)]) -> Product {
    let mut product = Product {
        name: Some(name.to_string()),
        sku: Some(sku.to_string()),
        attributes: Some(attributes(attrs)),
        ..Product::default()
    };
    product.extra.insert("Price".to_string(), json!(price));
    product.extra.insert("Category".to_string(), json!("category"));
    product
}

/// Builds a commerce event with a product action.
pub fn product_action_event(action_code: u32, products: Vec<Product>) -> RuntimeEvent {
    RuntimeEvent {
        event_name: Some("eCommerce - event".to_string()),
        event_data_type: Some(MessageType::Commerce.code()),
        product_action: Some(ProductAction {
            product_action_type: action_code,
            product_list: Some(products),
            ..ProductAction::default()
        }),
        ..RuntimeEvent::default()
    }
}

/// Adds user attributes to an event.
pub fn with_user_attributes(mut event: RuntimeEvent, attrs: &[(&str, &str)]) -> RuntimeEvent {
    event.user_attributes = Some(attributes(attrs));
    event
}

/// Adds user identities to an event.
pub fn with_identities(mut event: RuntimeEvent, identities: &[(u32, &str)]) -> RuntimeEvent {
    event.user_identities = Some(
        identities.iter().map(|(code, value)| UserIdentity::new(*code, *value)).collect(),
    );
    event
}
