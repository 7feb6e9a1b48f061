//! # ODRL Operators
//!
//! The comparison operators a constraint may use. Parsing accepts the short
//! name in any case (`eq`, `EQ`), the `odrl:` prefixed form, and the full
//! ODRL IRI.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const ODRL_NS: &str = "http://www.w3.org/ns/odrl/2/";

/// A constraint operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    /// Equal to.
    Eq,
    /// Not equal to.
    Neq,
    /// Greater than.
    Gt,
    /// Greater than or equal to.
    Geq,
    /// Less than.
    Lt,
    /// Less than or equal to.
    Leq,
    /// Member of.
    In,
    /// Has part.
    HasPart,
    /// Is an instance of.
    IsA,
    /// Contains all of.
    IsAllOf,
    /// Contains any of.
    IsAnyOf,
    /// Contains none of.
    IsNoneOf,
}

impl Operator {
    /// All operators.
    pub const ALL: [Operator; 12] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Gt,
        Operator::Geq,
        Operator::Lt,
        Operator::Leq,
        Operator::In,
        Operator::HasPart,
        Operator::IsA,
        Operator::IsAllOf,
        Operator::IsAnyOf,
        Operator::IsNoneOf,
    ];

    /// Canonical upper-case name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "EQ",
            Operator::Neq => "NEQ",
            Operator::Gt => "GT",
            Operator::Geq => "GEQ",
            Operator::Lt => "LT",
            Operator::Leq => "LEQ",
            Operator::In => "IN",
            Operator::HasPart => "HAS_PART",
            Operator::IsA => "IS_A",
            Operator::IsAllOf => "IS_ALL_OF",
            Operator::IsAnyOf => "IS_ANY_OF",
            Operator::IsNoneOf => "IS_NONE_OF",
        }
    }

    /// The ODRL term, e.g. `isNoneOf`.
    pub fn odrl_term(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Geq => "gteq",
            Operator::Lt => "lt",
            Operator::Leq => "lteq",
            Operator::In => "isPartOf",
            Operator::HasPart => "hasPart",
            Operator::IsA => "isA",
            Operator::IsAllOf => "isAllOf",
            Operator::IsAnyOf => "isAnyOf",
            Operator::IsNoneOf => "isNoneOf",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operator string matched none of the accepted forms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown operator: {0}")]
pub struct OperatorParseError(pub String);

impl std::str::FromStr for Operator {
    type Err = OperatorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let term = s
            .strip_prefix(ODRL_NS)
            .or_else(|| s.strip_prefix("odrl:"))
            .unwrap_or(s);
        Operator::ALL
            .into_iter()
            .find(|op| {
                op.as_str().eq_ignore_ascii_case(term)
                    || op.odrl_term().eq_ignore_ascii_case(term)
                    || op.as_str().replace('_', "").eq_ignore_ascii_case(term)
            })
            .ok_or_else(|| OperatorParseError(s.to_string()))
    }
}
