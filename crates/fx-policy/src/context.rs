//! # Policy Evaluation Context
//!
//! A constraint is evaluated inside a [`PolicyContext`]. The context exposes
//! whatever data the evaluation scope provides (for credential constraints,
//! the [`ParticipantAgent`]) and collects human-readable problems reported
//! by constraint functions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fx_vc::ClaimsContext;

/// The party a policy is evaluated for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticipantAgent {
    claims: ClaimsContext,
    attributes: BTreeMap<String, String>,
    identity: Option<String>,
}

impl ParticipantAgent {
    /// Create an agent from its claims and attributes.
    pub fn new(claims: ClaimsContext, attributes: BTreeMap<String, String>) -> Self {
        Self {
            claims,
            attributes,
            identity: None,
        }
    }

    /// Attach the identity established during the protocol handshake.
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// The claims the agent presented.
    pub fn claims(&self) -> &ClaimsContext {
        &self.claims
    }

    /// Agent attributes set by the runtime.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// The established participant identity, if known.
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }
}

/// The evaluation scope of a constraint.
pub trait PolicyContext {
    /// The participant agent being evaluated, if the scope provides one.
    fn participant_agent(&self) -> Option<&ParticipantAgent>;

    /// Record a problem encountered during evaluation.
    fn report_problem(&mut self, problem: String);

    /// Problems recorded so far, in reporting order.
    fn problems(&self) -> &[String];

    /// Whether any problem has been recorded.
    fn has_problems(&self) -> bool {
        !self.problems().is_empty()
    }
}

/// A policy context scoped to a single participant agent.
#[derive(Debug, Clone, Default)]
pub struct ParticipantAgentPolicyContext {
    agent: Option<ParticipantAgent>,
    problems: Vec<String>,
}

impl ParticipantAgentPolicyContext {
    /// A context exposing `agent`.
    pub fn new(agent: ParticipantAgent) -> Self {
        Self {
            agent: Some(agent),
            problems: Vec::new(),
        }
    }

    /// A context that exposes no participant agent.
    pub fn without_agent() -> Self {
        Self::default()
    }
}

impl PolicyContext for ParticipantAgentPolicyContext {
    fn participant_agent(&self) -> Option<&ParticipantAgent> {
        self.agent.as_ref()
    }

    fn report_problem(&mut self, problem: String) {
        tracing::debug!(%problem, "policy evaluation problem");
        self.problems.push(problem);
    }

    fn problems(&self) -> &[String] {
        &self.problems
    }
}

/// The kind of rule a constraint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    /// Something the assignee may do.
    Permission,
    /// Something the assignee must not do.
    Prohibition,
    /// Something the assignee must do.
    Duty,
}

/// The rule a constraint is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// The rule kind.
    pub kind: RuleKind,
    /// The governed action, e.g. `use`.
    pub action: String,
}

impl Rule {
    /// A permission for `action`.
    pub fn permission(action: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Permission,
            action: action.into(),
        }
    }
}
