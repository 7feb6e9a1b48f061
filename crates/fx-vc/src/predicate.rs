//! # Credential Type Filter
//!
//! A [`CredentialTypePredicate`] matches a credential whose type list contains
//! one specific qualified name. Matching is exact string equality: no
//! wildcards, no case folding, no namespace inference.
//!
//! Several predicates are combined with [`matches_any`], which is how a
//! deprecated type name is accepted alongside its successor.

use fx_core::qualify;

use crate::credential::VerifiableCredential;

/// Matches credentials declaring the type `<namespace><type_name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialTypePredicate {
    namespace: String,
    type_name: String,
    qualified: String,
}

impl CredentialTypePredicate {
    /// Create a predicate for `type_name` within `namespace`.
    pub fn new(namespace: impl Into<String>, type_name: impl Into<String>) -> Self {
        let namespace = namespace.into();
        let type_name = type_name.into();
        let qualified = qualify(&namespace, &type_name);
        Self {
            namespace,
            type_name,
            qualified,
        }
    }

    /// The namespace this predicate is scoped to.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The short type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The qualified type name compared against credential types.
    pub fn qualified_name(&self) -> &str {
        &self.qualified
    }

    /// Whether `credential` declares this predicate's qualified type.
    pub fn test(&self, credential: &VerifiableCredential) -> bool {
        credential.has_type(&self.qualified)
    }
}

/// Whether any of `predicates` matches `credential`.
///
/// An empty predicate list matches nothing.
pub fn matches_any(predicates: &[CredentialTypePredicate], credential: &VerifiableCredential) -> bool {
    predicates.iter().any(|p| p.test(credential))
}
