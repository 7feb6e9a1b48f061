//! # Constraint Functions
//!
//! An [`AtomicConstraintFunction`] decides one atomic constraint
//! `left operator right`. Functions are registered on a
//! [`ConstraintFunctions`] table and selected by their left operand.

use std::fmt;

use serde_json::Value;

use crate::context::{PolicyContext, Rule};
use crate::operator::Operator;

// ---------------------------------------------------------------------------
// AtomicConstraintFunction Trait
// ---------------------------------------------------------------------------

/// Evaluates atomic constraints for one family of left operands.
///
/// Implementations never fail: a constraint that cannot be evaluated reports
/// a problem to `ctx` and evaluates to `false`.
pub trait AtomicConstraintFunction<C: PolicyContext>: Send + Sync + fmt::Debug {
    /// Whether this function evaluates constraints with the given left operand.
    fn can_handle(&self, left: &Value) -> bool;

    /// Evaluate `left operator right` in `ctx`.
    fn evaluate(
        &self,
        left: &Value,
        operator: Operator,
        right: &Value,
        rule: Option<&Rule>,
        ctx: &mut C,
    ) -> bool;
}

// ---------------------------------------------------------------------------
// ConstraintFunctions
// ---------------------------------------------------------------------------

/// Ordered table of constraint functions.
///
/// The first registered function whose [`can_handle`] accepts the left
/// operand evaluates the constraint.
///
/// [`can_handle`]: AtomicConstraintFunction::can_handle
pub struct ConstraintFunctions<C: PolicyContext> {
    functions: Vec<Box<dyn AtomicConstraintFunction<C>>>,
}

impl<C: PolicyContext> Default for ConstraintFunctions<C> {
    fn default() -> Self {
        Self {
            functions: Vec::new(),
        }
    }
}

impl<C: PolicyContext> fmt::Debug for ConstraintFunctions<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstraintFunctions")
            .field("functions", &self.functions)
            .finish()
    }
}

impl<C: PolicyContext> ConstraintFunctions<C> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a function.
    pub fn register(&mut self, function: impl AtomicConstraintFunction<C> + 'static) {
        tracing::debug!(function = ?function, "registered constraint function");
        self.functions.push(Box::new(function));
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, function: impl AtomicConstraintFunction<C> + 'static) -> Self {
        self.register(function);
        self
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether no function is registered.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Whether some registered function handles `left`.
    pub fn handles(&self, left: &Value) -> bool {
        self.functions.iter().any(|f| f.can_handle(left))
    }

    /// Dispatch `left operator right` to the first function handling `left`.
    ///
    /// An unhandled left operand is reported to `ctx` and evaluates to
    /// `false`.
    pub fn evaluate(
        &self,
        left: &Value,
        operator: Operator,
        right: &Value,
        rule: Option<&Rule>,
        ctx: &mut C,
    ) -> bool {
        match self.functions.iter().find(|f| f.can_handle(left)) {
            Some(function) => function.evaluate(left, operator, right, rule, ctx),
            None => {
                let left = match left {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                tracing::warn!(%left, "no constraint function for left operand");
                ctx.report_problem(format!(
                    "No constraint function registered for left operand '{left}'"
                ));
                false
            }
        }
    }
}
