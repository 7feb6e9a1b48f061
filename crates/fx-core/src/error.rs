//! # Validation Errors
//!
//! Errors raised when a domain primitive is constructed from an
//! unacceptable raw value.

use thiserror::Error;

/// A raw value was rejected by a validating constructor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The participant identifier was empty or whitespace only.
    #[error("participant id must not be blank")]
    BlankParticipantId,

    /// The participant identifier contained whitespace or control characters.
    #[error("participant id contains illegal characters: {0:?}")]
    IllegalParticipantId(String),
}
