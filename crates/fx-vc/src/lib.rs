//! # fx-vc — Verifiable Credentials for the Factory-X Connector
//!
//! Everything the trust core needs to know about the credentials a remote
//! party presents, once the authentication layer has verified them:
//!
//! - **Credential structure** ([`VerifiableCredential`]) with ordered type
//!   list and credential subjects carrying flat attribute maps.
//! - **Claims context** ([`ClaimsContext`]): the parse step that turns a raw
//!   claims object into a typed `vc` claim up front.
//! - **Claims extraction** ([`extract_credentials`]): the single validation
//!   routine shared by the identity path and the policy path.
//! - **Type filtering** ([`CredentialTypePredicate`], [`matches_any`]).
//!
//! Signature and proof verification happen upstream and are not repeated here.

pub mod claims;
pub mod credential;
pub mod extract;
pub mod predicate;

// Re-export primary types.
pub use claims::{json_kind, ClaimsContext, VcClaim};
pub use credential::{
    ContextValue, CredentialSubject, CredentialTypeValue, Issuer, SubjectValue,
    VerifiableCredential,
};
pub use extract::{extract_credentials, ClaimHolder, ClaimsError, EXPECTED_VC_CLAIM_TYPE};
pub use predicate::{matches_any, CredentialTypePredicate};
