//! # fx-protocol — Dataspace Protocol Wiring
//!
//! Establishes *who* a remote party is and makes that decision available to
//! every supported dataspace protocol version.
//!
//! ## Architecture
//!
//! - **Identifier** (`identifier.rs`): the hard-fail participant id
//!   extraction over membership credentials, parameterized by a
//!   [`ParticipantIdExtraction`] strategy ([`BpnExtraction`],
//!   [`DidExtraction`]).
//!
//! - **Webhook** (`webhook.rs`): compute-once callback addresses.
//!
//! - **Registry** (`registry.rs`): per-version profile contexts binding a
//!   protocol version to its webhook, this node's participant id, and the
//!   extraction strategy.
//!
//! - **DSP** (`dsp.rs`): the protocol versions this connector speaks and the
//!   startup registration of their contexts.
//!
//! - **Config** (`config.rs`): environment-driven connector configuration.
//!
//! ## Error discipline
//!
//! Identity cannot be partially established. Every extraction failure is an
//! [`IdentityError`] that the caller must propagate, aborting the current
//! handshake.

pub mod config;
pub mod dsp;
pub mod identifier;
pub mod registry;
pub mod webhook;

pub use config::{ConfigError, ConnectorConfig, DEFAULT_DSP_CALLBACK_ADDRESS};
pub use dsp::{register_dataspace_protocol, ProtocolVersion, DSP_2025_1, DSP_V08};
pub use identifier::{
    extract_participant_id, membership_predicates, BpnExtraction, DidExtraction, IdentityError,
    ParticipantIdExtraction, FX_IDENTITY_CREDENTIAL,
};
#[allow(deprecated)]
pub use identifier::IDENTITY_CREDENTIAL;
pub use registry::{DataspaceProfileContext, ProfileContextRegistry, RegistryError};
pub use webhook::WebhookAddress;
