//! # fx-cli — CLI Tool for the Factory-X Connector Trust Core
//!
//! Provides the `fx` command-line interface for inspecting how the
//! connector judges a counterparty, offline, from a claims file.
//!
//! ## Subcommands
//!
//! - `fx identify` — Extract the counterparty identifier from claims.
//! - `fx evaluate` — Evaluate a credential constraint against claims.
//! - `fx contexts` — List the registered protocol contexts.
//!
//! ```bash
//! fx identify --claims token.json --strategy bpn
//! fx evaluate --claims token.json --left Certification --right ISO9001
//! EDC_PARTICIPANT_ID=did:web:provider fx contexts
//! ```

pub mod contexts;
pub mod evaluate;
pub mod identify;

use std::path::Path;

use anyhow::{Context, Result};

use fx_vc::ClaimsContext;

/// Load a claims object from a JSON file.
pub fn load_claims(path: &Path) -> Result<ClaimsContext> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read claims file: {}", path.display()))?;
    let claims: ClaimsContext = serde_json::from_str(&raw)
        .with_context(|| format!("claims file is not a JSON object: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        claims = claims.claim_names().count(),
        "loaded claims"
    );
    Ok(claims)
}
