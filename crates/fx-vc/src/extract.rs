//! # Claims Extraction
//!
//! [`extract_credentials`] is the one routine that decides whether a claims
//! context carries usable credentials. The identity path and the policy path
//! both call it; they differ only in which [`ClaimHolder`] the failure message
//! names, never in what is accepted.
//!
//! ## Failure reasons
//!
//! | Variant                      | Condition                         |
//! |------------------------------|-----------------------------------|
//! | [`ClaimsError::MissingClaim`] | no `vc` claim (or `null`)         |
//! | [`ClaimsError::WrongType`]    | `vc` is not a credential sequence |
//! | [`ClaimsError::EmptyList`]    | `vc` is an empty sequence         |
//!
//! The rendered messages are matched by downstream log tooling and must not
//! change.

use thiserror::Error;

use fx_core::VC_CLAIM;

use crate::claims::{ClaimsContext, VcClaim};
use crate::credential::VerifiableCredential;

/// Expected shape of the `vc` claim, as named in [`ClaimsError::WrongType`].
pub const EXPECTED_VC_CLAIM_TYPE: &str = "array of VerifiableCredential";

/// The object a claims context was read from, named in failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimHolder {
    /// The token presented during a protocol handshake (identity path).
    ClaimToken,
    /// The participant agent attached to a policy context (policy path).
    ParticipantAgent,
}

impl ClaimHolder {
    /// The holder name as it appears in messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimHolder::ClaimToken => "ClaimToken",
            ClaimHolder::ParticipantAgent => "ParticipantAgent",
        }
    }

    /// Verb introducing the observed type in [`ClaimsError::WrongType`].
    fn observed_verb(&self) -> &'static str {
        match self {
            ClaimHolder::ClaimToken => "got",
            ClaimHolder::ParticipantAgent => "received",
        }
    }
}

impl std::fmt::Display for ClaimHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a claims context did not yield any credentials.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimsError {
    /// No `vc` claim was present.
    #[error("{holder} did not contain a '{claim}' claim.")]
    MissingClaim {
        /// Where the claims came from.
        holder: ClaimHolder,
        /// The claim name.
        claim: &'static str,
    },

    /// The `vc` claim was not a sequence of credentials.
    #[error(
        "{holder} contains a '{claim}' claim, but the type is incorrect. Expected {expected}, {verb} {actual}.",
        verb = .holder.observed_verb()
    )]
    WrongType {
        /// Where the claims came from.
        holder: ClaimHolder,
        /// The claim name.
        claim: &'static str,
        /// The accepted shape.
        expected: &'static str,
        /// The observed shape.
        actual: String,
    },

    /// The `vc` claim was an empty sequence.
    #[error("{holder} contains a '{claim}' claim but it did not contain any VerifiableCredentials.")]
    EmptyList {
        /// Where the claims came from.
        holder: ClaimHolder,
        /// The claim name.
        claim: &'static str,
    },
}

impl ClaimsError {
    /// The holder named by this error.
    pub fn holder(&self) -> ClaimHolder {
        match self {
            ClaimsError::MissingClaim { holder, .. }
            | ClaimsError::WrongType { holder, .. }
            | ClaimsError::EmptyList { holder, .. } => *holder,
        }
    }
}

/// Return the non-empty credential sequence held by `claims`.
///
/// # Errors
///
/// Returns [`ClaimsError`] if the `vc` claim is missing, not a sequence of
/// credentials, or empty. The returned slice is never empty.
pub fn extract_credentials(
    claims: &ClaimsContext,
    holder: ClaimHolder,
) -> Result<&[VerifiableCredential], ClaimsError> {
    match claims.vc_claim() {
        VcClaim::Missing => Err(ClaimsError::MissingClaim {
            holder,
            claim: VC_CLAIM,
        }),
        VcClaim::WrongType { actual } => Err(ClaimsError::WrongType {
            holder,
            claim: VC_CLAIM,
            expected: EXPECTED_VC_CLAIM_TYPE,
            actual: actual.clone(),
        }),
        VcClaim::Credentials(credentials) if credentials.is_empty() => {
            Err(ClaimsError::EmptyList {
                holder,
                claim: VC_CLAIM,
            })
        }
        VcClaim::Credentials(credentials) => Ok(credentials),
    }
}
