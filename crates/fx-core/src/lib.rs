//! # fx-core — Foundational Types for the Factory-X Connector
//!
//! The leaf crate of the workspace. It holds the vocabulary shared by the
//! credential, protocol and policy layers:
//!
//! - **Namespaces** (`namespace.rs`): the JSON-LD namespaces credential types
//!   and policy left operands are qualified with.
//!
//! - **Identity** (`identity.rs`): the [`ParticipantId`] newtype, validated at
//!   construction and at deserialization.
//!
//! - **Errors** (`error.rs`): [`ValidationError`] for rejected primitives.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fx-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod namespace;

pub use error::ValidationError;
pub use identity::ParticipantId;
pub use namespace::{qualify, FX_CREDENTIAL_NS, FX_POLICY_NS, VC_CLAIM};
