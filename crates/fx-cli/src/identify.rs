//! # Identify CLI — Resolve a counterparty identifier from claims.
//!
//! ```bash
//! fx identify --claims token.json              # DID (credentialSubject.id)
//! fx identify --claims token.json --strategy bpn
//! ```
//!
//! Prints the identifier on success. A missing or malformed membership
//! credential is a hard failure: the message goes to stderr and the exit
//! code is 1.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};

use fx_protocol::{
    extract_participant_id, BpnExtraction, DidExtraction, IdentityError, ParticipantIdExtraction,
};
use fx_vc::ClaimsContext;

use crate::load_claims;

/// Identifier extraction strategy.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The membership credential subject's DID.
    Did,
    /// The membership credential's business partner number.
    Bpn,
}

/// Identify subcommand arguments.
#[derive(Args, Debug)]
pub struct IdentifyArgs {
    /// JSON file holding the claims object presented by the counterparty.
    #[arg(long)]
    pub claims: PathBuf,

    /// Which identifier to extract.
    #[arg(long, value_enum, default_value_t = Strategy::Did)]
    pub strategy: Strategy,
}

/// Extract the counterparty identifier from `claims` with `strategy`.
pub fn identify(claims: &ClaimsContext, strategy: Strategy) -> Result<String, IdentityError> {
    let extraction: Box<dyn ParticipantIdExtraction> = match strategy {
        Strategy::Did => Box::new(DidExtraction),
        Strategy::Bpn => Box::new(BpnExtraction::new()),
    };
    extract_participant_id(extraction.as_ref(), claims)
}

/// Execute the identify subcommand.
pub fn run_identify(args: &IdentifyArgs) -> Result<u8> {
    let claims = load_claims(&args.claims)?;
    match identify(&claims, args.strategy) {
        Ok(id) => {
            println!("{id}");
            Ok(0)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn membership_claims() -> ClaimsContext {
        serde_json::from_value(json!({
            "vc": [{
                "type": ["VerifiableCredential", "https://w3id.org/factoryx/credentials/FxMembershipCredential"],
                "issuer": "did:web:issuer",
                "credentialSubject": {
                    "id": "did:web:consumer",
                    "holderIdentifier": "BPNL000000000001"
                }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn identify_by_strategy() {
        let claims = membership_claims();
        assert_eq!(identify(&claims, Strategy::Did).unwrap(), "did:web:consumer");
        assert_eq!(identify(&claims, Strategy::Bpn).unwrap(), "BPNL000000000001");
    }

    #[test]
    fn identify_without_vc_claim_fails() {
        let err = identify(&ClaimsContext::empty(), Strategy::Did).unwrap_err();
        assert!(matches!(err, IdentityError::Credentials(_)));
    }

    #[test]
    fn run_identify_exit_codes() {
        let mut good = tempfile::NamedTempFile::new().unwrap();
        write!(
            good,
            "{}",
            json!({"vc": [{
                "type": ["https://w3id.org/factoryx/credentials/MembershipCredential"],
                "issuer": "did:web:issuer",
                "credentialSubject": {"id": "did:web:consumer"}
            }]})
        )
        .unwrap();
        let args = IdentifyArgs {
            claims: good.path().to_path_buf(),
            strategy: Strategy::Did,
        };
        assert_eq!(run_identify(&args).unwrap(), 0);

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, r#"{{"vc": "oops"}}"#).unwrap();
        let args = IdentifyArgs {
            claims: bad.path().to_path_buf(),
            strategy: Strategy::Bpn,
        };
        assert_eq!(run_identify(&args).unwrap(), 1);
    }
}
