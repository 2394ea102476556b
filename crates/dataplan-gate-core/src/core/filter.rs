// crates/dataplan-gate-core/src/core/filter.rs
// ============================================================================
// Module: Property Filters
// Description: Allow-all / allow-set filters and schema fragment navigation.
// Purpose: Derive compiled attribute filters from data-plan validator schemas.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A data-plan validator is a JSON-Schema-like document. Only two facts are
//! read from it: whether a node allows additional properties, and which
//! property names it declares. Everything else (types, ranges, required-ness)
//! is ignored. Absent nodes fail open to [`PropertyFilter::AllowAll`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::core::match_key::MatchType;

// ============================================================================
// SECTION: Property Filters
// ============================================================================

/// Compiled filter for one match key.
///
/// # Invariants
/// - A filter is either fully open or an explicit, closed name set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "properties", rename_all = "snake_case")]
pub enum PropertyFilter {
    /// Any property name is permitted.
    AllowAll,
    /// Only the listed property names are permitted.
    AllowSet(BTreeSet<String>),
}

impl PropertyFilter {
    /// Builds an allow-set filter from property names.
    #[must_use]
    pub fn allow_set<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AllowSet(names.into_iter().map(Into::into).collect())
    }

    /// Returns true when `name` passes the filter.
    #[must_use]
    pub fn permits(&self, name: &str) -> bool {
        match self {
            Self::AllowAll => true,
            Self::AllowSet(names) => names.contains(name),
        }
    }

    /// Returns a map holding only the entries whose keys pass the filter.
    #[must_use]
    pub fn retain_permitted<V>(&self, entries: BTreeMap<String, V>) -> BTreeMap<String, V> {
        match self {
            Self::AllowAll => entries,
            Self::AllowSet(_) => entries.into_iter().filter(|(key, _)| self.permits(key)).collect(),
        }
    }
}

// ============================================================================
// SECTION: Filter Scopes
// ============================================================================

/// Schema location a filter is extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterScope {
    /// `definition.properties.data.properties.custom_attributes`.
    EventAttributes,
    /// Custom attributes of items in `data.product_action.products`.
    ProductAttributes,
    /// The validator definition itself (user attributes and identities).
    Profile,
}

impl FilterScope {
    /// Returns the primary filter scope of a match type.
    #[must_use]
    pub const fn for_match_type(match_type: MatchType) -> Self {
        match match_type {
            MatchType::UserAttributes | MatchType::UserIdentities => Self::Profile,
            MatchType::CustomEvent
            | MatchType::ScreenView
            | MatchType::ProductAction
            | MatchType::PromotionAction
            | MatchType::ProductImpression => Self::EventAttributes,
        }
    }
}

// ============================================================================
// SECTION: Schema Fragments
// ============================================================================

/// Borrowed view over one node of a validator schema.
#[derive(Debug, Clone, Copy)]
pub struct SchemaFragment<'a> {
    /// Underlying JSON node.
    node: &'a Value,
}

impl<'a> SchemaFragment<'a> {
    /// Wraps a JSON node; `null` is treated as absent.
    #[must_use]
    pub fn new(node: &'a Value) -> Option<Self> {
        if node.is_null() {
            return None;
        }
        Some(Self {
            node,
        })
    }

    /// Returns a member of this node by field name.
    fn field(self, name: &str) -> Option<Self> {
        self.node.get(name).and_then(Self::new)
    }

    /// Returns a declared property node.
    #[must_use]
    pub fn property(self, name: &str) -> Option<Self> {
        self.field("properties").and_then(|properties| properties.field(name))
    }

    /// Returns the `items` node of an array schema.
    #[must_use]
    pub fn items(self) -> Option<Self> {
        self.field("items")
    }

    /// Returns the validator `definition` node.
    #[must_use]
    pub fn definition(self) -> Option<Self> {
        self.field("definition")
    }

    /// Returns true when the node permits undeclared properties.
    ///
    /// A boolean `true` or a nested schema object both permit them.
    #[must_use]
    pub fn allows_additional_properties(self) -> bool {
        match self.node.get("additionalProperties") {
            Some(Value::Bool(allowed)) => *allowed,
            Some(Value::Object(_)) => true,
            _ => false,
        }
    }

    /// Returns the declared property names in schema order.
    #[must_use]
    pub fn property_names(self) -> Vec<&'a str> {
        match self.node.get("properties") {
            Some(Value::Object(properties)) => properties.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Locates the event-level custom attributes node from a validator root.
    #[must_use]
    pub fn event_custom_attributes(self) -> Option<Self> {
        self.definition()?.property("data")?.property("custom_attributes")
    }

    /// Locates the product-level custom attributes node from a validator root.
    #[must_use]
    pub fn product_custom_attributes(self) -> Option<Self> {
        self.definition()?
            .property("data")?
            .property("product_action")?
            .property("products")?
            .items()?
            .property("custom_attributes")
    }

    /// Converts this node into a filter.
    #[must_use]
    pub fn to_filter(self) -> PropertyFilter {
        if self.allows_additional_properties() {
            return PropertyFilter::AllowAll;
        }
        PropertyFilter::allow_set(self.property_names())
    }
}

// ============================================================================
// SECTION: Filter Extraction
// ============================================================================

/// Extracts the filter for `scope` from a validator root.
///
/// Missing nodes fail open to [`PropertyFilter::AllowAll`].
#[must_use]
pub fn extract_filter(validator: &Value, scope: FilterScope) -> PropertyFilter {
    let Some(root) = SchemaFragment::new(validator) else {
        return PropertyFilter::AllowAll;
    };
    let node = match scope {
        FilterScope::EventAttributes => root.event_custom_attributes(),
        FilterScope::ProductAttributes => root.product_custom_attributes(),
        FilterScope::Profile => root.definition(),
    };
    node.map_or(PropertyFilter::AllowAll, SchemaFragment::to_filter)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::FilterScope;
    use super::PropertyFilter;
    use super::extract_filter;

    #[test]
    fn schema_object_additional_properties_allows_all() {
        let validator = json!({
            "definition": {
                "properties": {
                    "data": {
                        "properties": {
                            "custom_attributes": {
                                "additionalProperties": { "type": "string" },
                                "properties": { "a": {} }
                            }
                        }
                    }
                }
            }
        });
        assert_eq!(extract_filter(&validator, FilterScope::EventAttributes), PropertyFilter::AllowAll);
    }

    #[test]
    fn null_custom_attributes_fails_open() {
        let validator = json!({
            "definition": {
                "properties": { "data": { "properties": { "custom_attributes": null } } }
            }
        });
        assert_eq!(extract_filter(&validator, FilterScope::EventAttributes), PropertyFilter::AllowAll);
    }

    #[test]
    fn boolean_property_schemas_still_contribute_names() {
        let validator = json!({
            "definition": {
                "additionalProperties": false,
                "properties": { "email": true, "customerid": {} }
            }
        });
        assert_eq!(
            extract_filter(&validator, FilterScope::Profile),
            PropertyFilter::allow_set(["customerid", "email"])
        );
    }
}
