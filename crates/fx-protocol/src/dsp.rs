//! # Dataspace Protocol Versions
//!
//! The connector speaks two versions of the Dataspace Protocol over HTTP.
//! Both identify counterparties by DID; the 2025-1 version is served under
//! its own path below the base callback address.

use std::sync::Arc;

use fx_core::ParticipantId;

use crate::identifier::DidExtraction;
use crate::registry::{DataspaceProfileContext, ProfileContextRegistry, RegistryError};
use crate::webhook::WebhookAddress;

/// A supported protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProtocolVersion {
    /// Protocol identifier.
    pub protocol: &'static str,
    /// Version string.
    pub version: &'static str,
    /// Path appended to the base callback address, empty for the base itself.
    pub path: &'static str,
}

/// Dataspace Protocol 0.8 over HTTP.
pub const DSP_V08: ProtocolVersion = ProtocolVersion {
    protocol: "dataspace-protocol-http",
    version: "v0.8",
    path: "",
};

/// Dataspace Protocol 2025-1 over HTTP.
pub const DSP_2025_1: ProtocolVersion = ProtocolVersion {
    protocol: "dataspace-protocol-http:2025-1",
    version: "2025-1",
    path: "/2025-1",
};

/// Register the contexts of every supported protocol version.
///
/// `base_webhook` is this node's base DSP callback address; versions with a
/// path derive their address from it lazily.
///
/// # Errors
///
/// Returns [`RegistryError::Duplicate`] if a version is already registered.
pub fn register_dataspace_protocol(
    registry: &ProfileContextRegistry,
    base_webhook: &WebhookAddress,
    participant_id: &ParticipantId,
) -> Result<(), RegistryError> {
    for version in [DSP_V08, DSP_2025_1] {
        let webhook = if version.path.is_empty() {
            base_webhook.clone()
        } else {
            base_webhook.with_suffix(version.path)
        };
        registry.register(DataspaceProfileContext {
            protocol: version.protocol.to_string(),
            version: version.version.to_string(),
            webhook,
            participant_id: participant_id.clone(),
            id_extraction: Arc::new(DidExtraction),
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_both_versions() {
        let registry = ProfileContextRegistry::new();
        let base = WebhookAddress::lazy(|| "http://provider/api/v1/dsp".to_string());
        let id = ParticipantId::new("did:web:provider").unwrap();

        register_dataspace_protocol(&registry, &base, &id).unwrap();

        assert_eq!(
            registry.protocols(),
            vec!["dataspace-protocol-http", "dataspace-protocol-http:2025-1"]
        );
        assert_eq!(
            registry.webhook_address(DSP_V08.protocol).as_deref(),
            Some("http://provider/api/v1/dsp")
        );
        assert_eq!(
            registry.webhook_address(DSP_2025_1.protocol).as_deref(),
            Some("http://provider/api/v1/dsp/2025-1")
        );
        let ctx = registry.get(DSP_2025_1.protocol).unwrap();
        assert_eq!(ctx.version, "2025-1");
        assert_eq!(ctx.participant_id, id);
        assert_eq!(ctx.id_extraction.identity_property(), "credentialSubject.id");
    }

    #[test]
    fn webhooks_are_not_resolved_at_registration() {
        let registry = ProfileContextRegistry::new();
        let base = WebhookAddress::lazy(|| "http://provider".to_string());
        let id = ParticipantId::new("did:web:provider").unwrap();
        register_dataspace_protocol(&registry, &base, &id).unwrap();
        assert!(!base.is_resolved());
    }

    #[test]
    fn second_registration_fails() {
        let registry = ProfileContextRegistry::new();
        let base = WebhookAddress::fixed("http://provider");
        let id = ParticipantId::new("did:web:provider").unwrap();
        register_dataspace_protocol(&registry, &base, &id).unwrap();
        assert!(matches!(
            register_dataspace_protocol(&registry, &base, &id),
            Err(RegistryError::Duplicate(_))
        ));
    }
}
