// crates/dataplan-gate-core/src/core/identity.rs
// ============================================================================
// Module: User Identity Types
// Description: Platform identity type codes and their canonical names.
// Purpose: Translate numeric identity codes into data-plan identity names.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Events carry identities as numeric type codes while data plans declare them
//! by canonical name (`customerid`, `email`, ...). [`IdentityType`] is the
//! closed set of codes the platform defines.

// ============================================================================
// SECTION: Identity Types
// ============================================================================

/// Platform-defined user identity type.
///
/// # Invariants
/// - `from_code(t.code()) == Some(t)` for every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityType {
    /// Unclassified identity.
    Other,
    /// Customer identifier.
    CustomerId,
    /// Facebook identifier.
    Facebook,
    /// Twitter identifier.
    Twitter,
    /// Google identifier.
    Google,
    /// Microsoft identifier.
    Microsoft,
    /// Yahoo identifier.
    Yahoo,
    /// Email address.
    Email,
    /// Facebook custom audience identifier.
    FacebookCustomAudienceId,
    /// Secondary unclassified identity.
    Other2,
    /// Third unclassified identity.
    Other3,
    /// Fourth unclassified identity.
    Other4,
    /// Fifth unclassified identity.
    Other5,
    /// Sixth unclassified identity.
    Other6,
    /// Seventh unclassified identity.
    Other7,
    /// Eighth unclassified identity.
    Other8,
    /// Ninth unclassified identity.
    Other9,
    /// Tenth unclassified identity.
    Other10,
    /// Mobile phone number.
    MobileNumber,
    /// Secondary phone number.
    PhoneNumber2,
    /// Tertiary phone number.
    PhoneNumber3,
}

impl IdentityType {
    /// All identity types in code order.
    pub const ALL: [Self; 21] = [
        Self::Other,
        Self::CustomerId,
        Self::Facebook,
        Self::Twitter,
        Self::Google,
        Self::Microsoft,
        Self::Yahoo,
        Self::Email,
        Self::FacebookCustomAudienceId,
        Self::Other2,
        Self::Other3,
        Self::Other4,
        Self::Other5,
        Self::Other6,
        Self::Other7,
        Self::Other8,
        Self::Other9,
        Self::Other10,
        Self::MobileNumber,
        Self::PhoneNumber2,
        Self::PhoneNumber3,
    ];

    /// Returns the numeric code. Code 8 is unassigned.
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::Other => 0,
            Self::CustomerId => 1,
            Self::Facebook => 2,
            Self::Twitter => 3,
            Self::Google => 4,
            Self::Microsoft => 5,
            Self::Yahoo => 6,
            Self::Email => 7,
            Self::FacebookCustomAudienceId => 9,
            Self::Other2 => 10,
            Self::Other3 => 11,
            Self::Other4 => 12,
            Self::Other5 => 13,
            Self::Other6 => 14,
            Self::Other7 => 15,
            Self::Other8 => 16,
            Self::Other9 => 17,
            Self::Other10 => 18,
            Self::MobileNumber => 19,
            Self::PhoneNumber2 => 20,
            Self::PhoneNumber3 => 21,
        }
    }

    /// Decodes a numeric code.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|identity_type| identity_type.code() == code)
    }

    /// Returns the canonical name used in data plans.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Other => "other",
            Self::CustomerId => "customerid",
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::Google => "google",
            Self::Microsoft => "microsoft",
            Self::Yahoo => "yahoo",
            Self::Email => "email",
            Self::FacebookCustomAudienceId => "facebookcustomaudienceid",
            Self::Other2 => "other2",
            Self::Other3 => "other3",
            Self::Other4 => "other4",
            Self::Other5 => "other5",
            Self::Other6 => "other6",
            Self::Other7 => "other7",
            Self::Other8 => "other8",
            Self::Other9 => "other9",
            Self::Other10 => "other10",
            Self::MobileNumber => "mobile_number",
            Self::PhoneNumber2 => "phone_number_2",
            Self::PhoneNumber3 => "phone_number_3",
        }
    }
}
