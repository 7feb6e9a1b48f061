//! # Evaluate CLI — Evaluate a credential constraint against claims.
//!
//! ```bash
//! fx evaluate --claims agent.json --left Certification --right ISO9001
//! fx evaluate --claims agent.json \
//!     --left https://w3id.org/factoryx/policy/Certification --operator odrl:eq --right ISO9001
//! ```
//!
//! Prints `true` or `false`, then one line per reported problem. Exit code 0
//! when the constraint is satisfied, 2 when it is not.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;

use fx_core::{qualify, FX_POLICY_NS};
use fx_policy::{
    CertificationTypeConstraintFunction, ConstraintFunctions, Operator, ParticipantAgent,
    ParticipantAgentPolicyContext, PolicyContext, Rule,
};
use fx_vc::ClaimsContext;

use crate::load_claims;

/// Evaluate subcommand arguments.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// JSON file holding the participant agent's claims.
    #[arg(long)]
    pub claims: PathBuf,

    /// Left operand. A bare name is qualified with the Factory-X policy namespace.
    #[arg(long)]
    pub left: String,

    /// Constraint operator (`eq`, `EQ`, `odrl:eq` or the ODRL IRI).
    #[arg(long, default_value = "eq")]
    pub operator: Operator,

    /// Right operand. Parsed as JSON when `--right-json` is set.
    #[arg(long)]
    pub right: String,

    /// Treat the right operand as a JSON value instead of a string.
    #[arg(long)]
    pub right_json: bool,

    /// Action of the permission the constraint belongs to.
    #[arg(long, default_value = "use")]
    pub action: String,
}

/// Outcome of one constraint evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Whether the constraint holds.
    pub satisfied: bool,
    /// Problems reported while evaluating, in order.
    pub problems: Vec<String>,
}

/// The constraint functions the connector registers.
pub fn default_functions() -> ConstraintFunctions<ParticipantAgentPolicyContext> {
    ConstraintFunctions::new().with(CertificationTypeConstraintFunction::new())
}

/// Qualify a bare left operand with the policy namespace.
pub fn left_operand(raw: &str) -> String {
    if raw.contains(':') {
        raw.to_string()
    } else {
        qualify(FX_POLICY_NS, raw)
    }
}

/// Evaluate `left operator right` for an agent presenting `claims`.
pub fn evaluate(
    claims: ClaimsContext,
    left: &str,
    operator: Operator,
    right: &Value,
    rule: &Rule,
) -> Evaluation {
    let mut ctx =
        ParticipantAgentPolicyContext::new(ParticipantAgent::new(claims, Default::default()));
    let left = Value::String(left_operand(left));
    let satisfied = default_functions().evaluate(&left, operator, right, Some(rule), &mut ctx);
    Evaluation {
        satisfied,
        problems: ctx.problems().to_vec(),
    }
}

/// Execute the evaluate subcommand.
pub fn run_evaluate(args: &EvaluateArgs) -> Result<u8> {
    let claims = load_claims(&args.claims)?;
    let right = if args.right_json {
        serde_json::from_str(&args.right).context("--right is not valid JSON")?
    } else {
        Value::String(args.right.clone())
    };
    let rule = Rule::permission(args.action.as_str());

    let evaluation = evaluate(claims, &args.left, args.operator, &right, &rule);
    println!("{}", evaluation.satisfied);
    for problem in &evaluation.problems {
        println!("  {problem}");
    }
    Ok(if evaluation.satisfied { 0 } else { 2 })
}
