// crates/dataplan-gate-core/src/core/event.rs
// ============================================================================
// Module: Runtime Event Model
// Description: SDK event shape consumed and mutated by the blocking pipeline.
// Purpose: Provide typed access to the fields the pipeline inspects or prunes.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`RuntimeEvent`] mirrors the SDK's event payload. Only the fields the
//! blocking pipeline reads or prunes are typed; every other field is retained
//! verbatim in the flattened `extra` maps so a mutated event serializes back
//! to the same shape it arrived in.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::Error as _;
use serde_json::Value;

// ============================================================================
// SECTION: Attribute Maps
// ============================================================================

/// Attribute map keyed by attribute name.
pub type AttributeMap = BTreeMap<String, Value>;

// ============================================================================
// SECTION: Type Codes
// ============================================================================

/// SDK message type codes carried in `EventDataType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    /// Session start.
    SessionStart,
    /// Session end.
    SessionEnd,
    /// Screen (page) view.
    PageView,
    /// Custom (page) event.
    PageEvent,
    /// Crash report.
    CrashReport,
    /// Opt-out change.
    OptOut,
    /// Application state transition.
    AppStateTransition,
    /// Profile change.
    Profile,
    /// Commerce event.
    Commerce,
    /// User attribute change.
    UserAttributeChange,
    /// User identity change.
    UserIdentityChange,
    /// Media event.
    Media,
}

impl MessageType {
    /// Decodes a numeric message type code.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::SessionStart),
            2 => Some(Self::SessionEnd),
            3 => Some(Self::PageView),
            4 => Some(Self::PageEvent),
            5 => Some(Self::CrashReport),
            6 => Some(Self::OptOut),
            10 => Some(Self::AppStateTransition),
            14 => Some(Self::Profile),
            16 => Some(Self::Commerce),
            17 => Some(Self::UserAttributeChange),
            18 => Some(Self::UserIdentityChange),
            20 => Some(Self::Media),
            _ => None,
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::SessionStart => 1,
            Self::SessionEnd => 2,
            Self::PageView => 3,
            Self::PageEvent => 4,
            Self::CrashReport => 5,
            Self::OptOut => 6,
            Self::AppStateTransition => 10,
            Self::Profile => 14,
            Self::Commerce => 16,
            Self::UserAttributeChange => 17,
            Self::UserIdentityChange => 18,
            Self::Media => 20,
        }
    }
}

/// Returns the custom event type name for an `EventCategory` code.
#[must_use]
pub const fn custom_event_type_name(code: u32) -> &'static str {
    match code {
        1 => "navigation",
        2 => "location",
        3 => "search",
        4 => "transaction",
        5 => "user_content",
        6 => "user_preference",
        7 => "social",
        8 => "other",
        9 => "media",
        _ => "unknown",
    }
}

/// Returns the product action name for a `ProductActionType` code.
#[must_use]
pub const fn product_action_name(code: u32) -> &'static str {
    match code {
        1 => "add_to_cart",
        2 => "remove_from_cart",
        3 => "checkout",
        4 => "checkout_option",
        5 => "click",
        6 => "view_detail",
        7 => "purchase",
        8 => "refund",
        9 => "add_to_wishlist",
        10 => "remove_from_wishlist",
        _ => "unknown",
    }
}

/// Returns the promotion action name for a `PromotionActionType` code.
#[must_use]
pub const fn promotion_action_name(code: u32) -> &'static str {
    match code {
        1 => "view",
        2 => "click",
        _ => "unknown",
    }
}

// ============================================================================
// SECTION: Event Category
// ============================================================================

/// Coarse event category used by the blocking pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    /// Custom event.
    CustomEvent,
    /// Screen view.
    ScreenView,
    /// Commerce event.
    Commerce,
    /// Anything else.
    Other,
}

// ============================================================================
// SECTION: Runtime Event
// ============================================================================

/// SDK event as handed to the blocking pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuntimeEvent {
    /// Event name (screen name for screen views).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    /// Message type code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_data_type: Option<u32>,
    /// Custom event type code, or commerce event type code for commerce events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_category: Option<u32>,
    /// Event-level custom attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_attributes: Option<AttributeMap>,
    /// Product action payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_action: Option<ProductAction>,
    /// Promotion action payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_action: Option<PromotionAction>,
    /// Product impression payloads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_impressions: Option<Vec<ProductImpression>>,
    /// User attributes attached to the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_attributes: Option<AttributeMap>,
    /// User identities attached to the event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_identities: Option<Vec<UserIdentity>>,
    /// Fields the pipeline does not inspect.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl RuntimeEvent {
    /// Returns the decoded message type.
    #[must_use]
    pub fn message_type(&self) -> Option<MessageType> {
        self.event_data_type.and_then(MessageType::from_code)
    }

    /// Returns the coarse event category.
    #[must_use]
    pub fn category(&self) -> EventCategory {
        match self.message_type() {
            Some(MessageType::PageEvent) => EventCategory::CustomEvent,
            Some(MessageType::PageView) => EventCategory::ScreenView,
            Some(MessageType::Commerce) => EventCategory::Commerce,
            _ => EventCategory::Other,
        }
    }

    /// Returns true when the event carries a product action product list.
    #[must_use]
    pub fn has_product_list(&self) -> bool {
        self.product_action.as_ref().is_some_and(|action| action.product_list.is_some())
    }
}

// ============================================================================
// SECTION: Commerce Payloads
// ============================================================================

/// Product action payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductAction {
    /// Product action type code.
    #[serde(default)]
    pub product_action_type: u32,
    /// Products acted upon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_list: Option<Vec<Product>>,
    /// Transaction fields (revenue, tax, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Promotion action payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PromotionAction {
    /// Promotion action type code.
    #[serde(default)]
    pub promotion_action_type: u32,
    /// Promotion entries.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Product impression payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProductImpression {
    /// Impression list name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_impression_list: Option<String>,
    /// Products shown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_list: Option<Vec<Product>>,
}

/// Product entry inside a product list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    /// Product name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Product SKU.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Product-level custom attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<AttributeMap>,
    /// Remaining product fields (price, category, variant, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

// ============================================================================
// SECTION: User Identities
// ============================================================================

/// One user identity attached to an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserIdentity {
    /// Numeric identity type code; decimal strings are accepted on input.
    #[serde(rename = "Type", deserialize_with = "deserialize_identity_code")]
    pub identity_type: u32,
    /// Identity value.
    pub identity: String,
}

impl UserIdentity {
    /// Creates a user identity.
    #[must_use]
    pub fn new(identity_type: u32, identity: impl Into<String>) -> Self {
        Self {
            identity_type,
            identity: identity.into(),
        }
    }
}

/// Identity type code as it appears on the wire.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireIdentityCode {
    /// Plain numeric code.
    Number(u32),
    /// Code sent as a decimal string.
    Text(String),
}

/// Reads an identity type code given as a number or a decimal string.
fn deserialize_identity_code<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match WireIdentityCode::deserialize(deserializer)? {
        WireIdentityCode::Number(code) => Ok(code),
        WireIdentityCode::Text(text) => text.trim().parse().map_err(|_| {
            D::Error::custom(format!("identity type code is not a number: {text}"))
        }),
    }
}
