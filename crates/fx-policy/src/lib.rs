//! # fx-policy — Credential Constraint Functions
//!
//! Decides whether a policy constraint that references credential
//! attributes is satisfied by the party being evaluated.
//!
//! ## Architecture
//!
//! - **Operator** (`operator.rs`): the ODRL operator vocabulary.
//!
//! - **Context** (`context.rs`): the [`PolicyContext`] a constraint is
//!   evaluated in, the [`ParticipantAgent`] it exposes, and the [`Rule`] a
//!   constraint is attached to.
//!
//! - **Function** (`function.rs`): the [`AtomicConstraintFunction`] trait and
//!   the [`ConstraintFunctions`] dispatcher keyed on left operands.
//!
//! - **Certification** (`certification.rs`): the
//!   `<policy-ns>Certification` constraint.
//!
//! ## Error discipline
//!
//! Constraint functions never fail. A structural problem is reported to the
//! context as a diagnostic and the constraint evaluates to `false`, so one
//! malformed claim cannot abort the evaluation of sibling constraints.

pub mod certification;
pub mod context;
pub mod credential;
pub mod function;
pub mod operator;

pub use certification::{
    CertificationTypeConstraintFunction, CERTIFICATION_CREDENTIAL, CERTIFICATION_LITERAL,
    CERTIFICATION_TYPE_ATTRIBUTE,
};
pub use context::{ParticipantAgent, ParticipantAgentPolicyContext, PolicyContext, Rule, RuleKind};
pub use function::{AtomicConstraintFunction, ConstraintFunctions};
pub use operator::{Operator, OperatorParseError};
