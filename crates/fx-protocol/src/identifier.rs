//! # Participant Identifier Extraction
//!
//! Resolves the stable participant identifier of a remote party from the
//! membership credential in its claim token.
//!
//! ## Algorithm
//!
//! 1. Extract the credential sequence from the claims
//!    ([`extract_credentials`] with [`ClaimHolder::ClaimToken`]).
//! 2. Take the **first** credential declaring either
//!    [`IDENTITY_CREDENTIAL`] (deprecated) or [`FX_IDENTITY_CREDENTIAL`].
//! 3. Read the identifier from that credential through the strategy. Later
//!    membership credentials are never consulted, even if the first one lacks
//!    the identifier.
//!
//! Every failure is an [`IdentityError`]; there is no fallback identity.

mod bpn;
mod did;

use std::sync::OnceLock;

use thiserror::Error;

use fx_core::FX_CREDENTIAL_NS;
use fx_vc::{
    extract_credentials, matches_any, ClaimHolder, ClaimsContext, ClaimsError,
    CredentialTypePredicate, VerifiableCredential,
};

pub use bpn::BpnExtraction;
pub use did::DidExtraction;

/// Legacy membership credential type name.
#[deprecated(since = "0.1.0", note = "use `FX_IDENTITY_CREDENTIAL`")]
pub const IDENTITY_CREDENTIAL: &str = "MembershipCredential";

/// Current membership credential type name.
pub const FX_IDENTITY_CREDENTIAL: &str = "FxMembershipCredential";

// Accepted for the deprecation window only.
#[allow(deprecated)]
const LEGACY_IDENTITY_CREDENTIAL: &str = IDENTITY_CREDENTIAL;

/// Errors from participant identifier extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// The claim token did not carry a usable credential sequence.
    #[error("Failed to fetch credentials from the claim token: {0}")]
    Credentials(#[from] ClaimsError),

    /// No membership credential matched, or the first match had no identifier.
    #[error("Required credential type '{legacy}' or '{current}' not present in ClaimToken, cannot extract property '{property}'")]
    MissingIdentity {
        /// The deprecated membership type name.
        legacy: &'static str,
        /// The current membership type name.
        current: &'static str,
        /// The identity property that was sought.
        property: String,
    },
}

/// Strategy reading a participant identifier from a membership credential.
///
/// Implementations differ only in which credential attribute carries the
/// identifier; the shared algorithm lives in [`extract_participant_id`].
pub trait ParticipantIdExtraction: Send + Sync + std::fmt::Debug {
    /// Qualified name of the property being extracted, used in errors.
    fn identity_property(&self) -> &str;

    /// Read the identifier from a matched membership credential.
    fn identifier(&self, credential: &VerifiableCredential) -> Option<String>;
}

/// Predicates accepting the legacy and the current membership credential type.
pub fn membership_predicates() -> &'static [CredentialTypePredicate] {
    static PREDICATES: OnceLock<[CredentialTypePredicate; 2]> = OnceLock::new();
    PREDICATES.get_or_init(|| {
        [
            CredentialTypePredicate::new(FX_CREDENTIAL_NS, LEGACY_IDENTITY_CREDENTIAL),
            CredentialTypePredicate::new(FX_CREDENTIAL_NS, FX_IDENTITY_CREDENTIAL),
        ]
    })
}

/// Extract the participant identifier of the party presenting `claims`.
///
/// # Errors
///
/// Returns [`IdentityError::Credentials`] if the claims carry no usable
/// credential sequence, and [`IdentityError::MissingIdentity`] if no
/// membership credential is present or the first one yields no identifier.
pub fn extract_participant_id<E>(strategy: &E, claims: &ClaimsContext) -> Result<String, IdentityError>
where
    E: ParticipantIdExtraction + ?Sized,
{
    let credentials = extract_credentials(claims, ClaimHolder::ClaimToken).map_err(|e| {
        tracing::warn!(error = %e, "cannot establish participant identity");
        IdentityError::from(e)
    })?;

    let identifier = credentials
        .iter()
        .find(|vc| matches_any(membership_predicates(), vc))
        .and_then(|vc| strategy.identifier(vc));

    match identifier {
        Some(id) => {
            tracing::debug!(
                property = strategy.identity_property(),
                participant_id = %id,
                "resolved participant identity"
            );
            Ok(id)
        }
        None => {
            let err = IdentityError::MissingIdentity {
                legacy: LEGACY_IDENTITY_CREDENTIAL,
                current: FX_IDENTITY_CREDENTIAL,
                property: strategy.identity_property().to_string(),
            };
            tracing::warn!(error = %err, credentials = credentials.len(), "cannot establish participant identity");
            Err(err)
        }
    }
}

/// Returns the value unless it is blank.
fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fx_core::qualify;
    use fx_vc::CredentialSubject;
    use serde_json::json;

    #[derive(Debug)]
    struct SubjectName;

    impl ParticipantIdExtraction for SubjectName {
        fn identity_property(&self) -> &str {
            "name"
        }

        fn identifier(&self, credential: &VerifiableCredential) -> Option<String> {
            credential
                .first_subject()
                .and_then(|s| s.string_attribute(FX_CREDENTIAL_NS, "name"))
                .map(str::to_owned)
        }
    }

    fn membership(type_name: &str, name: Option<&str>) -> VerifiableCredential {
        let mut subject = CredentialSubject::new(Some("did:web:holder".into()));
        if let Some(name) = name {
            subject = subject.with_attribute("name", name);
        }
        VerifiableCredential::new(
            ["VerifiableCredential".to_string(), qualify(FX_CREDENTIAL_NS, type_name)],
            "did:web:issuer",
            subject,
        )
    }

    #[test]
    fn first_match_wins() {
        let claims = ClaimsContext::from_credentials(vec![
            membership("FxMembershipCredential", Some("first")),
            membership("FxMembershipCredential", Some("second")),
        ]);
        assert_eq!(extract_participant_id(&SubjectName, &claims).unwrap(), "first");
    }

    #[test]
    fn first_match_without_identifier_does_not_fall_through() {
        let claims = ClaimsContext::from_credentials(vec![
            membership("MembershipCredential", None),
            membership("FxMembershipCredential", Some("second")),
        ]);
        let err = extract_participant_id(&SubjectName, &claims).unwrap_err();
        assert!(matches!(err, IdentityError::MissingIdentity { .. }));
    }

    #[test]
    fn non_membership_credentials_are_skipped() {
        let claims = ClaimsContext::from_credentials(vec![
            membership("BogusCredential", Some("bogus")),
            membership("MembershipCredential", Some("legacy")),
        ]);
        assert_eq!(extract_participant_id(&SubjectName, &claims).unwrap(), "legacy");
    }

    #[test]
    fn missing_identity_message_names_both_types() {
        let claims = ClaimsContext::from_credentials(vec![membership("BogusCredential", None)]);
        let err = extract_participant_id(&SubjectName, &claims).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Required credential type 'MembershipCredential' or 'FxMembershipCredential' not present in ClaimToken, cannot extract property 'name'"
        );
    }

    #[test]
    fn claims_failure_is_wrapped() {
        let claims = ClaimsContext::empty().with_claim("vc", json!([]));
        let err = extract_participant_id(&SubjectName, &claims).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to fetch credentials from the claim token: ClaimToken contains a 'vc' claim but it did not contain any VerifiableCredentials."
        );
        assert!(matches!(err, IdentityError::Credentials(ClaimsError::EmptyList { .. })));
    }

    #[test]
    fn works_through_trait_object() {
        let strategy: Box<dyn ParticipantIdExtraction> = Box::new(SubjectName);
        let claims = ClaimsContext::from_credentials(vec![membership(
            "FxMembershipCredential",
            Some("boxed"),
        )]);
        assert_eq!(extract_participant_id(strategy.as_ref(), &claims).unwrap(), "boxed");
    }

    #[test]
    fn blank_values_are_absent() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank("BPNL1"), Some("BPNL1".to_string()));
    }
}
