//! # Claims Context
//!
//! The claims a remote party asserts for one request arrive as an untyped
//! JSON object. [`ClaimsContext::parse`] classifies the `vc` claim once, at
//! the boundary, into a [`VcClaim`]; the extractor and every consumer after it
//! work on that tagged union instead of re-inspecting raw JSON.
//!
//! Claims other than `vc` are retained verbatim and never interpreted.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use fx_core::VC_CLAIM;

use crate::credential::VerifiableCredential;

/// The classified state of the `vc` claim.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum VcClaim {
    /// No `vc` entry, or an explicit JSON `null`.
    #[default]
    Missing,
    /// A sequence of credentials. May be empty.
    Credentials(Vec<VerifiableCredential>),
    /// Present, but not a sequence of credentials.
    WrongType {
        /// Description of the observed JSON shape.
        actual: String,
    },
}

impl VcClaim {
    /// Classify a raw `vc` claim value.
    ///
    /// An array is accepted only if every element deserializes as a
    /// credential; the first offending element decides the reported type.
    pub fn parse(value: Value) -> Self {
        match value {
            Value::Null => VcClaim::Missing,
            Value::Array(items) => {
                let mut credentials = Vec::with_capacity(items.len());
                for (index, item) in items.into_iter().enumerate() {
                    let kind = json_kind(&item);
                    match serde_json::from_value::<VerifiableCredential>(item) {
                        Ok(vc) => credentials.push(vc),
                        Err(e) => {
                            tracing::debug!(index, error = %e, "vc claim element is not a verifiable credential");
                            return VcClaim::WrongType {
                                actual: format!("array containing {kind}"),
                            };
                        }
                    }
                }
                VcClaim::Credentials(credentials)
            }
            other => VcClaim::WrongType {
                actual: json_kind(&other).to_string(),
            },
        }
    }
}

/// The claims presented by a remote party for a single request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct ClaimsContext {
    vc: VcClaim,
    other: BTreeMap<String, Value>,
}

impl ClaimsContext {
    /// A context with no claims at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a raw claims object.
    pub fn parse(raw: Map<String, Value>) -> Self {
        raw.into_iter()
            .fold(Self::default(), |ctx, (name, value)| ctx.with_claim(name, value))
    }

    /// Build a context whose `vc` claim holds already-typed credentials.
    pub fn from_credentials(credentials: Vec<VerifiableCredential>) -> Self {
        Self {
            vc: VcClaim::Credentials(credentials),
            other: BTreeMap::new(),
        }
    }

    /// Add or replace a claim. A `vc` claim is classified on insertion.
    pub fn with_claim(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        if name == VC_CLAIM {
            self.vc = VcClaim::parse(value);
        } else {
            self.other.insert(name, value);
        }
        self
    }

    /// The classified `vc` claim.
    pub fn vc_claim(&self) -> &VcClaim {
        &self.vc
    }

    /// Any claim other than `vc`, verbatim.
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.other.get(name)
    }

    /// Names of the retained claims other than `vc`.
    pub fn claim_names(&self) -> impl Iterator<Item = &str> {
        self.other.keys().map(String::as_str)
    }
}

impl From<Map<String, Value>> for ClaimsContext {
    fn from(raw: Map<String, Value>) -> Self {
        Self::parse(raw)
    }
}

/// Name of the JSON kind of `value`, as used in diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
