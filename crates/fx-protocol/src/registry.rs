//! # Protocol Context Registry
//!
//! Each dataspace protocol version this connector speaks is described by a
//! [`DataspaceProfileContext`]: where counterparties call back, who this node
//! is, and how to tell who the counterparty is. Contexts are registered once
//! at startup and read on every inbound message.

use std::sync::Arc;

use parking_lot::RwLock;
use thiserror::Error;

use fx_core::ParticipantId;
use fx_vc::ClaimsContext;

use crate::identifier::{extract_participant_id, IdentityError, ParticipantIdExtraction};
use crate::webhook::WebhookAddress;

/// Errors from registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A context for this protocol identifier is already registered.
    #[error("protocol context already registered: {0}")]
    Duplicate(String),

    /// No context is registered for this protocol identifier.
    #[error("no protocol context registered for: {0}")]
    UnknownProtocol(String),

    /// The counterparty's identity could not be established.
    #[error(transparent)]
    Identity(#[from] IdentityError),
}

/// Everything needed to serve one protocol version.
#[derive(Clone)]
pub struct DataspaceProfileContext {
    /// Protocol identifier, e.g. `dataspace-protocol-http:2025-1`.
    pub protocol: String,
    /// Protocol version string, e.g. `2025-1`.
    pub version: String,
    /// This node's callback address for the version.
    pub webhook: WebhookAddress,
    /// This node's own participant identifier.
    pub participant_id: ParticipantId,
    /// How counterparties are identified on this version.
    pub id_extraction: Arc<dyn ParticipantIdExtraction>,
}

impl std::fmt::Debug for DataspaceProfileContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataspaceProfileContext")
            .field("protocol", &self.protocol)
            .field("version", &self.version)
            .field("webhook", &self.webhook)
            .field("participant_id", &self.participant_id)
            .field("id_extraction", &self.id_extraction.identity_property())
            .finish()
    }
}

impl DataspaceProfileContext {
    /// Resolve the counterparty's participant id from its claims.
    pub fn counterparty_id(&self, claims: &ClaimsContext) -> Result<String, IdentityError> {
        extract_participant_id(self.id_extraction.as_ref(), claims)
    }
}

/// Registered protocol contexts, in registration order.
///
/// Cloning shares the underlying registry.
#[derive(Debug, Clone, Default)]
pub struct ProfileContextRegistry {
    contexts: Arc<RwLock<Vec<DataspaceProfileContext>>>,
}

impl ProfileContextRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a context.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Duplicate`] if the protocol identifier is
    /// already registered; the existing context is kept.
    pub fn register(&self, context: DataspaceProfileContext) -> Result<(), RegistryError> {
        let mut contexts = self.contexts.write();
        if contexts.iter().any(|c| c.protocol == context.protocol) {
            return Err(RegistryError::Duplicate(context.protocol));
        }
        tracing::info!(
            protocol = %context.protocol,
            version = %context.version,
            participant_id = %context.participant_id,
            "registered dataspace profile context"
        );
        contexts.push(context);
        Ok(())
    }

    /// The context registered for `protocol`.
    pub fn get(&self, protocol: &str) -> Option<DataspaceProfileContext> {
        self.contexts
            .read()
            .iter()
            .find(|c| c.protocol == protocol)
            .cloned()
    }

    /// All registered contexts, in registration order.
    pub fn list(&self) -> Vec<DataspaceProfileContext> {
        self.contexts.read().clone()
    }

    /// Registered protocol identifiers, in registration order.
    pub fn protocols(&self) -> Vec<String> {
        self.contexts
            .read()
            .iter()
            .map(|c| c.protocol.clone())
            .collect()
    }

    /// Number of registered contexts.
    pub fn len(&self) -> usize {
        self.contexts.read().len()
    }

    /// Whether no context is registered.
    pub fn is_empty(&self) -> bool {
        self.contexts.read().is_empty()
    }

    /// This node's webhook address for `protocol`, resolving it if needed.
    pub fn webhook_address(&self, protocol: &str) -> Option<String> {
        self.get(protocol).map(|c| c.webhook.get().to_string())
    }

    /// Resolve the counterparty's participant id for a message on `protocol`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownProtocol`] for an unregistered
    /// protocol and [`RegistryError::Identity`] if extraction fails.
    pub fn participant_id(
        &self,
        protocol: &str,
        claims: &ClaimsContext,
    ) -> Result<String, RegistryError> {
        let context = self
            .get(protocol)
            .ok_or_else(|| RegistryError::UnknownProtocol(protocol.to_string()))?;
        Ok(context.counterparty_id(claims)?)
    }
}
