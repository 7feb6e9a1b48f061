//! # Credential Constraint Preconditions
//!
//! The checks every credential-backed constraint runs before looking at the
//! credentials themselves. Each helper returns the validated value or the
//! problem text; the caller reports the problem to its context, so a failed
//! evaluation yields exactly one diagnostic.

use serde_json::Value;

use fx_vc::{extract_credentials, json_kind, ClaimHolder, VerifiableCredential};

use crate::context::{ParticipantAgent, PolicyContext};
use crate::operator::Operator;

/// Accept `operator` only if it is one of `allowed`.
pub fn check_operator(operator: Operator, allowed: &[Operator]) -> Result<Operator, String> {
    if allowed.contains(&operator) {
        return Ok(operator);
    }
    let allowed = allowed
        .iter()
        .map(Operator::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    Err(format!(
        "Invalid operator: this constraint only allows the following operators: [{allowed}], but received '{operator}'."
    ))
}

/// Accept a right operand only if it is a JSON string.
pub fn check_string_operand(right: &Value) -> Result<&str, String> {
    right.as_str().ok_or_else(|| {
        format!(
            "Invalid right-operand: this constraint only allows the following right-operand types: [String], but received '{}'.",
            json_kind(right)
        )
    })
}

/// The participant agent exposed by `ctx`.
pub fn require_agent<C: PolicyContext>(ctx: &C) -> Result<&ParticipantAgent, String> {
    ctx.participant_agent()
        .ok_or_else(|| "Required PolicyContext data not found: ParticipantAgent".to_string())
}

/// The credentials presented by `agent`.
pub fn agent_credentials(agent: &ParticipantAgent) -> Result<&[VerifiableCredential], String> {
    extract_credentials(agent.claims(), ClaimHolder::ParticipantAgent).map_err(|e| {
        tracing::debug!(error = %e, "participant agent presented no usable credentials");
        e.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParticipantAgentPolicyContext;
    use fx_vc::ClaimsContext;
    use serde_json::json;

    #[test]
    fn operator_outside_allowed_set_is_rejected() {
        assert_eq!(check_operator(Operator::Eq, &[Operator::Eq]), Ok(Operator::Eq));
        assert_eq!(
            check_operator(Operator::Neq, &[Operator::Eq, Operator::In]).unwrap_err(),
            "Invalid operator: this constraint only allows the following operators: [EQ, IN], but received 'NEQ'."
        );
    }

    #[test]
    fn non_string_operand_names_json_kind() {
        assert_eq!(check_string_operand(&json!("x")), Ok("x"));
        assert!(check_string_operand(&json!(42))
            .unwrap_err()
            .ends_with("but received 'number'."));
        assert!(check_string_operand(&json!(["a"]))
            .unwrap_err()
            .ends_with("but received 'array'."));
    }

    #[test]
    fn missing_agent_is_rejected() {
        let ctx = ParticipantAgentPolicyContext::without_agent();
        assert_eq!(
            require_agent(&ctx).unwrap_err(),
            "Required PolicyContext data not found: ParticipantAgent"
        );
    }

    #[test]
    fn agent_without_vc_claim() {
        let agent = ParticipantAgent::new(ClaimsContext::empty(), Default::default());
        assert_eq!(
            agent_credentials(&agent).unwrap_err(),
            "ParticipantAgent did not contain a 'vc' claim."
        );
    }
}
