// crates/dataplan-gate-core/src/core/mod.rs
// ============================================================================
// Module: Data Plan Gate Core Types
// Description: Data-plan documents, match keys, filters, and the runtime event model.
// Purpose: Provide the shared vocabulary of plan compilation and event blocking.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types are pure data: they hold no collaborators and perform no
//! logging. The runtime module drives them.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod canonical;
pub mod document;
pub mod event;
pub mod filter;
pub mod identity;
pub mod match_key;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use canonical::CanonicalEvent;
pub use canonical::CommercePayload;
pub use document::DataPlanDocument;
pub use document::DataPlanError;
pub use document::DataPlanPoint;
pub use document::MatchClause;
pub use document::MatchCriteria;
pub use document::PointError;
pub use document::PolicyBlock;
pub use event::AttributeMap;
pub use event::EventCategory;
pub use event::MessageType;
pub use event::Product;
pub use event::ProductAction;
pub use event::ProductImpression;
pub use event::PromotionAction;
pub use event::RuntimeEvent;
pub use event::UserIdentity;
pub use filter::FilterScope;
pub use filter::PropertyFilter;
pub use filter::SchemaFragment;
pub use filter::extract_filter;
pub use identity::IdentityType;
pub use match_key::MatchDescriptor;
pub use match_key::MatchKey;
pub use match_key::MatchType;
pub use match_key::PRODUCT_ATTRIBUTES_SEGMENT;
pub use match_key::resolve_match_key;
pub use match_key::resolve_product_attribute_key;
