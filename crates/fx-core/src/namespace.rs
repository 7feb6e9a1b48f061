//! # Namespaces
//!
//! Credential types and policy left operands travel as fully qualified IRIs.
//! A qualified name is the namespace immediately followed by the short name;
//! no separator is inserted, so every namespace here already ends in `/`.

/// Namespace of Factory-X credential types and credential subject attributes.
pub const FX_CREDENTIAL_NS: &str = "https://w3id.org/factoryx/credentials/";

/// Namespace of Factory-X policy left operands.
pub const FX_POLICY_NS: &str = "https://w3id.org/factoryx/policy/";

/// The only claim the trust core reads from a claims mapping.
pub const VC_CLAIM: &str = "vc";

/// Join a namespace and a short name into a qualified name.
pub fn qualify(namespace: &str, short_name: &str) -> String {
    let mut qualified = String::with_capacity(namespace.len() + short_name.len());
    qualified.push_str(namespace);
    qualified.push_str(short_name);
    qualified
}
