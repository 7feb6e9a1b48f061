//! # Certification Constraint
//!
//! Evaluates `<policy-ns>Certification EQ "<type>"`: satisfied when the
//! participant agent presents at least one certification credential whose
//! subject carries `certificationType == <type>`.
//!
//! ## Evaluation order
//!
//! 1. Operator must be `EQ`.
//! 2. Right operand must be a string.
//! 3. The context must expose a participant agent.
//! 4. The agent's `vc` claim must hold a non-empty credential sequence.
//! 5. Any certification credential with a matching type satisfies the
//!    constraint.
//!
//! The first failing step reports one problem and the constraint evaluates
//! to `false`. Finding no matching credential is a plain `false` with no
//! problem reported.

use std::sync::OnceLock;

use serde_json::Value;

use fx_core::{qualify, FX_CREDENTIAL_NS, FX_POLICY_NS};
use fx_vc::{matches_any, CredentialTypePredicate, VerifiableCredential};

use crate::context::{PolicyContext, Rule};
use crate::credential::{agent_credentials, check_operator, check_string_operand, require_agent};
use crate::function::AtomicConstraintFunction;
use crate::operator::Operator;

/// Short name of the left operand, qualified with the policy namespace.
pub const CERTIFICATION_LITERAL: &str = "Certification";

/// Credential type carrying certification claims.
pub const CERTIFICATION_CREDENTIAL: &str = "CertificationCredential";

/// Subject attribute holding the certification type.
pub const CERTIFICATION_TYPE_ATTRIBUTE: &str = "certificationType";

const ALLOWED_OPERATORS: [Operator; 1] = [Operator::Eq];

fn certification_left_operand() -> &'static str {
    static LEFT: OnceLock<String> = OnceLock::new();
    LEFT.get_or_init(|| qualify(FX_POLICY_NS, CERTIFICATION_LITERAL))
}

fn certification_predicates() -> &'static [CredentialTypePredicate] {
    static PREDICATES: OnceLock<[CredentialTypePredicate; 1]> = OnceLock::new();
    PREDICATES.get_or_init(|| [CredentialTypePredicate::new(FX_CREDENTIAL_NS, CERTIFICATION_CREDENTIAL)])
}

/// Whether any subject of `credential` certifies `certification_type`.
fn certifies(credential: &VerifiableCredential, certification_type: &str) -> bool {
    credential.subjects().iter().any(|subject| {
        subject.string_attribute(FX_CREDENTIAL_NS, CERTIFICATION_TYPE_ATTRIBUTE)
            == Some(certification_type)
    })
}

/// The `Certification` constraint function.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificationTypeConstraintFunction;

impl CertificationTypeConstraintFunction {
    /// A function handling `<policy-ns>Certification`.
    pub fn new() -> Self {
        Self
    }

    fn check<C: PolicyContext>(
        &self,
        operator: Operator,
        right: &Value,
        ctx: &C,
    ) -> Result<bool, String> {
        check_operator(operator, &ALLOWED_OPERATORS)?;
        let certification_type = check_string_operand(right)?;
        let agent = require_agent(ctx)?;
        let credentials = agent_credentials(agent)?;

        let satisfied = credentials
            .iter()
            .filter(|vc| matches_any(certification_predicates(), vc))
            .any(|vc| certifies(vc, certification_type));
        tracing::debug!(
            certification_type,
            credentials = credentials.len(),
            satisfied,
            "evaluated certification constraint"
        );
        Ok(satisfied)
    }
}

impl<C: PolicyContext> AtomicConstraintFunction<C> for CertificationTypeConstraintFunction {
    fn can_handle(&self, left: &Value) -> bool {
        left.as_str() == Some(certification_left_operand())
    }

    fn evaluate(
        &self,
        _left: &Value,
        operator: Operator,
        right: &Value,
        _rule: Option<&Rule>,
        ctx: &mut C,
    ) -> bool {
        match self.check(operator, right, ctx) {
            Ok(satisfied) => satisfied,
            Err(problem) => {
                tracing::warn!(%problem, "certification constraint not evaluable");
                ctx.report_problem(problem);
                false
            }
        }
    }
}
