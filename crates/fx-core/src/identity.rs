//! # Participant Identity
//!
//! A connector is known to the rest of the dataspace by a single stable
//! identifier (a DID on current protocol versions, a BPN on older ones).
//! [`ParticipantId`] keeps that identifier distinct from arbitrary strings.
//!
//! ## Validation
//!
//! The identifier must be non-blank and free of whitespace and control
//! characters. Deserialization routes through the same constructor, so an
//! invalid value cannot enter through configuration files either.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The stable identifier of a dataspace participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// Create a participant id, validating its format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::BlankParticipantId`] for an empty or
    /// whitespace-only value and [`ValidationError::IllegalParticipantId`]
    /// if the value contains whitespace or control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::BlankParticipantId);
        }
        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::IllegalParticipantId(s));
        }
        Ok(Self(s))
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the identifier uses DID syntax.
    pub fn is_did(&self) -> bool {
        self.0.starts_with("did:")
    }

    /// Consume the newtype and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<'de> Deserialize<'de> for ParticipantId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ParticipantId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ParticipantId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
