// crates/dataplan-gate-core/src/core/document.rs
// ============================================================================
// Module: Data Plan Document
// Description: Raw data-plan documents, policy blocks, and data points.
// Purpose: Parse data-plan JSON in either accepted layout without failing on bad points.
// Dependencies: serde, serde_json, thiserror, crate::core::match_key
// ============================================================================

//! ## Overview
//! A data plan arrives either in the documented layout
//! (`policy` + `versionDocument.dataPoints`) or in the platform's wire layout
//! (`dtpn.blok` + `dtpn.vers.version_document.data_points`), optionally inside
//! a `{ "document": ... }` envelope. Data points are kept as raw JSON and
//! decoded one at a time by [`DataPlanPoint::decode`] so the compiler can skip
//! a malformed point without rejecting the whole document.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::core::match_key::MatchDescriptor;
use crate::core::match_key::MatchType;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing a data-plan document.
#[derive(Debug, Error)]
pub enum DataPlanError {
    /// Input is not valid JSON.
    #[error("data plan is not valid json: {0}")]
    Json(String),
    /// JSON does not have the shape of a data plan.
    #[error("data plan has an invalid layout: {0}")]
    Layout(String),
}

/// Reasons a single data point is excluded from compilation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointError {
    /// The point has no `match` clause.
    #[error("data point is missing its match clause")]
    MissingMatch,
    /// The point has no `validator`.
    #[error("data point is missing its validator")]
    MissingValidator,
    /// The match clause names an unsupported type.
    #[error("data point has unsupported match type `{0}`")]
    UnsupportedMatchType(String),
    /// The match clause is structurally invalid.
    #[error("data point match clause is malformed: {0}")]
    Malformed(String),
}

// ============================================================================
// SECTION: Policy Block
// ============================================================================

/// Blocking policy block as written in the document.
///
/// Non-boolean flag values are read by truthiness: `0`, `""` and `false` are
/// off, `null` is absent, anything else is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyBlock {
    /// Drop unplanned events.
    #[serde(
        default,
        rename = "blockEvents",
        alias = "ev",
        deserialize_with = "deserialize_flag"
    )]
    pub block_events: Option<bool>,
    /// Strip unplanned event and product attributes.
    #[serde(
        default,
        rename = "blockEventAttributes",
        alias = "ea",
        deserialize_with = "deserialize_flag"
    )]
    pub block_event_attributes: Option<bool>,
    /// Strip unplanned user attributes.
    #[serde(
        default,
        rename = "blockUserAttributes",
        alias = "ua",
        deserialize_with = "deserialize_flag"
    )]
    pub block_user_attributes: Option<bool>,
    /// Strip unplanned user identities.
    #[serde(
        default,
        rename = "blockUserIdentities",
        alias = "ui",
        deserialize_with = "deserialize_flag"
    )]
    pub block_user_identities: Option<bool>,
}

/// Reads a policy flag, coercing non-boolean values by truthiness.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null => None,
        Value::Bool(flag) => Some(flag),
        Value::Number(number) => Some(number.as_f64().is_some_and(|n| n.abs() > 0.0)),
        Value::String(text) => Some(!text.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    }))
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// Parsed data-plan document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataPlanDocument {
    /// Policy block; `None` when the document declares no blocking.
    pub policy: Option<PolicyBlock>,
    /// Raw data points in document order.
    pub data_points: Vec<Value>,
}

/// Documented layout.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentedLayout {
    /// Policy block.
    #[serde(default)]
    policy: Option<PolicyBlock>,
    /// Version document holding the data points.
    #[serde(default)]
    version_document: Option<VersionDocument>,
}

/// Version document shared by both layouts.
#[derive(Debug, Deserialize)]
struct VersionDocument {
    /// Raw data points.
    #[serde(default, rename = "dataPoints", alias = "data_points")]
    data_points: Option<Vec<Value>>,
}

/// Wire layout root.
#[derive(Debug, Deserialize)]
struct WireLayout {
    /// Data plan section.
    dtpn: WirePlan,
}

/// Wire layout data plan section.
#[derive(Debug, Deserialize)]
struct WirePlan {
    /// Policy block.
    #[serde(default)]
    blok: Option<PolicyBlock>,
    /// Version section.
    #[serde(default)]
    vers: Option<WireVersion>,
}

/// Wire layout version section.
#[derive(Debug, Deserialize)]
struct WireVersion {
    /// Version document.
    #[serde(default)]
    version_document: Option<VersionDocument>,
}

impl DataPlanDocument {
    /// Parses a data plan from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`DataPlanError`] when the text is not JSON or not a data plan.
    pub fn from_json_str(text: &str) -> Result<Self, DataPlanError> {
        let value: Value =
            serde_json::from_str(text).map_err(|err| DataPlanError::Json(err.to_string()))?;
        Self::from_value(value)
    }

    /// Parses a data plan from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`DataPlanError::Layout`] when the value is not a data plan.
    pub fn from_value(value: Value) -> Result<Self, DataPlanError> {
        let value = match value {
            Value::Object(mut root) if root.get("document").is_some_and(Value::is_object) => {
                root.remove("document").unwrap_or(Value::Null)
            }
            other => other,
        };
        if !value.is_object() {
            return Err(DataPlanError::Layout("document root must be an object".to_string()));
        }
        if value.get("dtpn").is_some() {
            let wire: WireLayout = serde_json::from_value(value)
                .map_err(|err| DataPlanError::Layout(err.to_string()))?;
            let data_points = wire
                .dtpn
                .vers
                .and_then(|vers| vers.version_document)
                .and_then(|doc| doc.data_points)
                .unwrap_or_default();
            return Ok(Self {
                policy: wire.dtpn.blok,
                data_points,
            });
        }
        let documented: DocumentedLayout =
            serde_json::from_value(value).map_err(|err| DataPlanError::Layout(err.to_string()))?;
        Ok(Self {
            policy: documented.policy,
            data_points: documented
                .version_document
                .and_then(|doc| doc.data_points)
                .unwrap_or_default(),
        })
    }
}

// ============================================================================
// SECTION: Match Clauses
// ============================================================================

/// Type-specific match criteria. Absent fields contribute empty key segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCriteria {
    /// Custom event type name.
    #[serde(default)]
    pub custom_event_type: Option<String>,
    /// Custom event name.
    #[serde(default)]
    pub event_name: Option<String>,
    /// Screen name.
    #[serde(default)]
    pub screen_name: Option<String>,
    /// Commerce action name.
    #[serde(default)]
    pub action: Option<String>,
}

/// Decoded match clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchClause {
    /// Match type.
    pub match_type: MatchType,
    /// Match criteria.
    pub criteria: MatchCriteria,
}

/// Raw match clause shape.
#[derive(Debug, Deserialize)]
struct RawMatchClause {
    /// Match type wire name.
    #[serde(rename = "type")]
    match_type: String,
    /// Match criteria.
    #[serde(default)]
    criteria: Option<MatchCriteria>,
}

impl MatchClause {
    /// Lowers the clause into a match descriptor.
    #[must_use]
    pub fn descriptor(&self) -> MatchDescriptor<'_> {
        let criteria = &self.criteria;
        match self.match_type {
            MatchType::CustomEvent => MatchDescriptor::CustomEvent {
                custom_event_type: criteria.custom_event_type.as_deref().unwrap_or_default(),
                event_name: criteria.event_name.as_deref().unwrap_or_default(),
            },
            MatchType::ScreenView => MatchDescriptor::ScreenView {
                screen_name: criteria.screen_name.as_deref().unwrap_or_default(),
            },
            MatchType::ProductAction => MatchDescriptor::ProductAction {
                action: criteria.action.as_deref().unwrap_or_default(),
            },
            MatchType::PromotionAction => MatchDescriptor::PromotionAction {
                action: criteria.action.as_deref().unwrap_or_default(),
            },
            MatchType::ProductImpression => MatchDescriptor::ProductImpression,
            MatchType::UserAttributes => MatchDescriptor::UserAttributes,
            MatchType::UserIdentities => MatchDescriptor::UserIdentities,
        }
    }
}

// ============================================================================
// SECTION: Data Points
// ============================================================================

/// Decoded data point.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPlanPoint<'a> {
    /// Match clause.
    pub match_clause: MatchClause,
    /// Validator schema root (borrowed from the document).
    pub validator: &'a Value,
}

impl<'a> DataPlanPoint<'a> {
    /// Decodes one raw data point.
    ///
    /// # Errors
    ///
    /// Returns [`PointError`] describing why the point cannot be compiled.
    pub fn decode(raw: &'a Value) -> Result<Self, PointError> {
        let raw_match = raw.get("match").filter(|value| !value.is_null());
        let Some(raw_match) = raw_match else {
            return Err(PointError::MissingMatch);
        };
        let Some(validator) = raw.get("validator").filter(|value| !value.is_null()) else {
            return Err(PointError::MissingValidator);
        };
        let clause = RawMatchClause::deserialize(raw_match)
            .map_err(|err| PointError::Malformed(err.to_string()))?;
        let match_type = MatchType::parse(&clause.match_type)
            .ok_or_else(|| PointError::UnsupportedMatchType(clause.match_type.clone()))?;
        Ok(Self {
            match_clause: MatchClause {
                match_type,
                criteria: clause.criteria.unwrap_or_default(),
            },
            validator,
        })
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::DataPlanDocument;
    use super::DataPlanPoint;
    use super::PointError;

    #[test]
    fn wire_layout_maps_abbreviated_policy_flags() {
        let doc = DataPlanDocument::from_value(json!({
            "document": {
                "dtpn": {
                    "blok": { "ev": true, "ea": false, "ua": true },
                    "vers": { "version_document": { "data_points": [{}] } }
                }
            }
        }));
        assert!(doc.is_ok(), "wire layout rejected: {doc:?}");
        let doc = doc.unwrap_or_default();
        let policy = doc.policy.unwrap_or_default();
        assert_eq!(policy.block_events, Some(true));
        assert_eq!(policy.block_event_attributes, Some(false));
        assert_eq!(policy.block_user_attributes, Some(true));
        assert_eq!(policy.block_user_identities, None);
        assert_eq!(doc.data_points.len(), 1);
    }

    #[test]
    fn null_match_counts_as_missing() {
        let raw = json!({ "match": null, "validator": {} });
        assert_eq!(DataPlanPoint::decode(&raw), Err(PointError::MissingMatch));
    }

    #[test]
    fn scalar_root_is_a_layout_error() {
        assert!(DataPlanDocument::from_json_str("[1, 2]").is_err());
    }
}
