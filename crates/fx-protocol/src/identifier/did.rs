//! DID extraction: the participant is the subject of its membership credential.

use fx_vc::VerifiableCredential;

use super::{non_blank, ParticipantIdExtraction};

/// Reads the participant DID from the membership credential subject's `id`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DidExtraction;

impl ParticipantIdExtraction for DidExtraction {
    fn identity_property(&self) -> &str {
        "credentialSubject.id"
    }

    fn identifier(&self, credential: &VerifiableCredential) -> Option<String> {
        credential
            .first_subject()
            .and_then(|s| s.id.as_deref())
            .and_then(non_blank)
    }
}
