// crates/dataplan-gate-config/src/lib.rs
// ============================================================================
// Module: Data Plan Gate Config Library
// Description: Configuration model, validation, and data-plan loading.
// Purpose: Single source of truth for dataplan-gate.toml semantics.
// Dependencies: dataplan-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `dataplan-gate-config` defines the configuration model for hosts of the
//! blocking engine: where the data plan lives, how large it may be, which
//! document policy flags the host overrides, and the log filter. Parsing is
//! strict and fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
