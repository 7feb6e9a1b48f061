//! Business Partner Number extraction, used by protocol versions that
//! identify participants by BPN rather than DID.

use fx_core::{qualify, FX_CREDENTIAL_NS};
use fx_vc::VerifiableCredential;

use super::{non_blank, ParticipantIdExtraction};

const HOLDER_IDENTIFIER: &str = "holderIdentifier";

/// Reads the BPN from the membership credential subject's `holderIdentifier`.
#[derive(Debug, Clone)]
pub struct BpnExtraction {
    property: String,
}

impl BpnExtraction {
    /// Create the strategy.
    pub fn new() -> Self {
        Self {
            property: qualify(FX_CREDENTIAL_NS, HOLDER_IDENTIFIER),
        }
    }
}

impl Default for BpnExtraction {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticipantIdExtraction for BpnExtraction {
    fn identity_property(&self) -> &str {
        &self.property
    }

    fn identifier(&self, credential: &VerifiableCredential) -> Option<String> {
        credential
            .first_subject()
            .and_then(|s| s.string_attribute(FX_CREDENTIAL_NS, HOLDER_IDENTIFIER))
            .and_then(non_blank)
    }
}
