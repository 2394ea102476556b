// crates/dataplan-gate-core/src/runtime/registry.rs
// ============================================================================
// Module: Standard Identity Registry
// Description: Default identity type registry backed by the platform code table.
// Dependencies: crate::core, crate::interfaces
// ============================================================================

//! ## Overview
//! Resolves identity codes through [`IdentityType`].

use crate::core::IdentityType;
use crate::interfaces::IdentityTypeRegistry;

/// Registry of the platform-defined identity types.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardIdentityRegistry;

impl IdentityTypeRegistry for StandardIdentityRegistry {
    fn identity_name(&self, code: u32) -> Option<&str> {
        IdentityType::from_code(code).map(IdentityType::name)
    }
}
