//! Tree-walking evaluator for guard and action expressions.
//!
//! # Architecture
//!
//! All evaluation goes through [`Interpreter::eval`], a single exhaustive
//! match over `ExprKind`. Helper modules hold the larger arms:
//!
//! - `binders` - quantifiers, set filter and map, LET
//! - `records` - record construction, EXCEPT, field access, indexing
//! - `typed` - the annotated entry point
//!
//! # Scope Discipline
//!
//! Constructs that bind names swap the active scope for a fresh child and
//! restore it through [`ScopedInterpreter`] on drop, so an error propagated
//! with `?` from inside a binder never leaves a stale scope active.
//!
//! # Next-State Delta
//!
//! Each `x' = e` primes `x` in the active scope and records it in the
//! interpreter's delta. The delta outlives the scope that produced it: the
//! assignments of a block are all reported by the enclosing `evaluate`.

mod binders;
mod builder;
mod records;
mod scope_guard;
mod typed;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;
pub use typed::admits;

use std::collections::BTreeMap;

use smallvec::SmallVec;
use tlx_ir::{BinaryOp, BuiltinSet, CaseArm, Expr, ExprKind, OpCategory, Span};
use tlx_values::{InfiniteDomain, Number, SetValue, Side, Value};
use tracing::trace;

use crate::association::AssociationContext;
use crate::builtins::BuiltinRegistry;
use crate::environment::{LocalScope, Namespace, Scope};
use crate::errors::{
    name_not_found, no_matching_branch, operand_type, type_mismatch, EvalError, EvalResult,
};
use crate::operators::{
    bool_operand, check_legal, combine_logic, evaluate_arithmetic, evaluate_bag_algebra,
    evaluate_comparison, evaluate_equality, evaluate_membership, evaluate_set_algebra,
};
use crate::shared::SharedRegistry;
use crate::stack::ensure_sufficient_stack;

/// Outcome of evaluating one expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    pub value: Value,
    /// Every primed binding accumulated so far, by name.
    pub primed: BTreeMap<String, Value>,
}

/// The evaluator. Owns the active scope chain and the next-state delta.
#[derive(Debug)]
pub struct Interpreter {
    scope: LocalScope<Scope>,
    builtins: SharedRegistry<BuiltinRegistry>,
    delta: BTreeMap<String, Value>,
}

impl Interpreter {
    /// An interpreter with a fresh root scope and the default built-ins.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// The active scope.
    pub fn scope(&self) -> &LocalScope<Scope> {
        &self.scope
    }

    pub fn builtins(&self) -> &SharedRegistry<BuiltinRegistry> {
        &self.builtins
    }

    /// The association context carried by the active scope, if any.
    pub fn associations(&self) -> Option<LocalScope<AssociationContext>> {
        self.scope.borrow().associations().cloned()
    }

    /// Bind `name` in the active scope.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.scope.borrow_mut().bind(name, value);
    }

    /// Evaluate `expr`, returning its value and the primed bindings
    /// accumulated so far.
    ///
    /// On error every prime made by `expr` is undone.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Evaluation, EvalError> {
        let before = self.delta.clone();
        match self.eval(expr) {
            Ok(value) => Ok(Evaluation {
                value,
                primed: self.delta.clone(),
            }),
            Err(err) => {
                self.restore_primed(before);
                Err(err)
            }
        }
    }

    /// Primed bindings accumulated so far.
    pub fn primed(&self) -> &BTreeMap<String, Value> {
        &self.delta
    }

    /// Hand over the accumulated delta, leaving it empty. Primed reads in
    /// the next action see current values again.
    pub fn take_primed(&mut self) -> BTreeMap<String, Value> {
        self.scope.borrow_mut().clear_primed();
        std::mem::take(&mut self.delta)
    }

    /// Roll the delta and the active scope back to `snapshot`.
    fn restore_primed(&mut self, snapshot: BTreeMap<String, Value>) {
        let mut scope = self.scope.borrow_mut();
        for (name, value) in &self.delta {
            match snapshot.get(name) {
                Some(old) if old == value => {}
                Some(old) => scope.bind_primed(name.as_str(), old.clone()),
                None => scope.unprime(name),
            }
        }
        drop(scope);
        self.delta = snapshot;
    }

    /// The next-state value of `name`, or its current value if it has not
    /// been primed.
    pub fn lookup_primed(&self, name: &str) -> EvalResult {
        let scoped = self.scope.borrow().lookup_primed(name);
        match scoped {
            Ok(Some(value)) => Ok(value),
            outcome => match self.delta.get(name) {
                Some(value) => Ok(value.clone()),
                None => {
                    outcome?;
                    self.scope.borrow().lookup(name)
                }
            },
        }
    }

    /// Evaluate one node with stack safety.
    #[tracing::instrument(level = "trace", skip(self, expr), fields(span = %expr.span))]
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_inner(expr))
            .map_err(|err| Self::attach_span(err, expr.span))
    }

    /// Record the failing node's location once; the innermost node wins.
    #[cold]
    fn attach_span(err: EvalError, span: Span) -> EvalError {
        if err.span.is_none() && !span.is_dummy() {
            err.with_span(span)
        } else {
            err
        }
    }

    /// Dispatch on every `ExprKind` variant. No catch-all.
    fn eval_inner(&mut self, expr: &Expr) -> EvalResult {
        match &expr.kind {
            // Literals
            ExprKind::Number(text) => Number::parse_literal(text).map(Value::Number),
            ExprKind::Bool(b) => Ok(Value::Bool(*b)),
            ExprKind::Str(s) => Ok(Value::string(s.as_str())),
            ExprKind::BuiltinSet(set) => Ok(builtin_set_value(*set)),

            // References
            ExprKind::Ident(name) => self.eval_ident(name),
            ExprKind::Primed(name) => self.lookup_primed(name),
            ExprKind::Existing => self
                .scope
                .borrow()
                .existing_value()
                .ok_or_else(|| name_not_found("@")),
            ExprKind::SelfRef => self
                .scope
                .borrow()
                .self_record()
                .cloned()
                .ok_or_else(|| name_not_found("self")),

            // Binary operators
            ExprKind::Arithmetic { op, left, right } => {
                let (l, r) = self.eval_operands(left, right)?;
                evaluate_arithmetic(*op, &l, &r)
            }
            ExprKind::Comparison { op, left, right } => {
                let (l, r) = self.eval_operands(left, right)?;
                evaluate_comparison(*op, &l, &r)
            }
            ExprKind::Logic { op, left, right } => self.eval_logic(*op, left, right),
            ExprKind::SetAlgebra { op, left, right } => {
                let (l, r) = self.eval_operands(left, right)?;
                evaluate_set_algebra(*op, &l, &r)
            }
            ExprKind::BagAlgebra { op, left, right } => {
                let (l, r) = self.eval_operands(left, right)?;
                evaluate_bag_algebra(*op, &l, &r)
            }
            ExprKind::Equality {
                negated,
                left,
                right,
            } => {
                let (l, r) = self.eval_operands(left, right)?;
                Ok(evaluate_equality(&l, &r, *negated))
            }
            ExprKind::Membership {
                negated,
                element,
                set,
            } => {
                let (e, s) = self.eval_operands(element, set)?;
                evaluate_membership(&e, &s, *negated)
            }

            // Unary operators
            ExprKind::Not(operand) => {
                let value = self.eval(operand)?;
                Ok(Value::Bool(!bool_operand(Side::Only, "¬", &value)?))
            }
            ExprKind::Negate(operand) => {
                let value = self.eval(operand)?;
                match value.as_number() {
                    Some(n) => Ok(Value::Number(n.neg())),
                    None => Err(operand_type(Side::Only, "-", "a Number", &value)),
                }
            }

            // Constructors
            ExprKind::SetLiteral(elements) => Ok(Value::set(self.eval_list(elements)?)),
            ExprKind::TupleLiteral(elements) => Ok(Value::tuple(self.eval_list(elements)?)),
            ExprKind::RecordLiteral(fields) => self.eval_record_literal(fields),
            ExprKind::Range { low, high } => self.eval_range(low, high),

            // Binders
            ExprKind::Quantified {
                quantifier,
                binding,
                body,
            } => self.eval_quantified(*quantifier, binding, body),
            ExprKind::SetFilter { binding, predicate } => self.eval_set_filter(binding, predicate),
            ExprKind::SetMap { body, binding } => self.eval_set_map(body, binding),
            ExprKind::Let { name, value, body } => self.eval_let(name, value, body),

            // Records and tuples
            ExprKind::Except { base, clauses } => self.eval_except(base, clauses),
            ExprKind::Field { record, field } => self.eval_field(record, field),
            ExprKind::Index { tuple, index } => self.eval_index(tuple, index),

            // Control
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.eval(cond)?;
                if condition(&cond)? {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
            ExprKind::Case { arms, other } => self.eval_case(arms, other.as_deref()),
            ExprKind::Block(statements) => self.eval_block(statements),

            // State transitions
            ExprKind::Assign { name, value } => {
                let value = self.eval(value)?;
                self.prime(name, value);
                Ok(Value::Bool(true))
            }
            ExprKind::Unchanged(names) => {
                for name in names {
                    let current = self.scope.borrow().lookup(name)?;
                    self.prime(name, current);
                }
                Ok(Value::Bool(true))
            }

            ExprKind::BuiltinCall {
                module,
                operation,
                args,
            } => {
                let args = self.eval_list(args)?;
                self.builtins.call(module, operation, &args)
            }
        }
    }

    fn eval_operands(&mut self, left: &Expr, right: &Expr) -> Result<(Value, Value), EvalError> {
        let left = self.eval(left)?;
        let right = self.eval(right)?;
        Ok((left, right))
    }

    fn eval_list(&mut self, exprs: &[Expr]) -> Result<SmallVec<[Value; 4]>, EvalError> {
        exprs.iter().map(|expr| self.eval(expr)).collect()
    }

    /// A name from the scope chain, else a field of the `self` record.
    fn eval_ident(&self, name: &str) -> EvalResult {
        let scope = self.scope.borrow();
        match scope.lookup(name) {
            Ok(value) => Ok(value),
            Err(err) => match scope.self_record() {
                Some(Value::Record(record)) => record.get(name).cloned().ok_or(err),
                _ => Err(err),
            },
        }
    }

    /// `∧`/`∨` skip the right operand once the left decides the result.
    fn eval_logic(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> EvalResult {
        check_legal(op, OpCategory::Logic)?;
        let left_val = self.eval(left)?;
        match op {
            BinaryOp::And | BinaryOp::Or => {
                let symbol = op.as_symbol();
                let l = bool_operand(Side::Left, symbol, &left_val)?;
                if l == (op == BinaryOp::Or) {
                    return Ok(Value::Bool(l));
                }
                let right_val = self.eval(right)?;
                Ok(Value::Bool(bool_operand(Side::Right, symbol, &right_val)?))
            }
            _ => {
                let right_val = self.eval(right)?;
                combine_logic(op, &left_val, &right_val)
            }
        }
    }

    /// `low..high`, both ends inclusive.
    fn eval_range(&mut self, low: &Expr, high: &Expr) -> EvalResult {
        let (low, high) = self.eval_operands(low, high)?;
        let low = integer_bound(Side::Left, &low)?;
        let high = integer_bound(Side::Right, &high)?;
        Ok(Value::set((low..=high).map(Value::int)))
    }

    fn eval_case(&mut self, arms: &[CaseArm], other: Option<&Expr>) -> EvalResult {
        for arm in arms {
            let guard = self.eval(&arm.guard)?;
            if condition(&guard)? {
                return self.eval(&arm.body);
            }
        }
        match other {
            Some(other) => self.eval(other),
            None => Err(no_matching_branch()),
        }
    }

    /// Statements run in order in a block-return scope; the value is the
    /// last statement's. An empty block is `TRUE`.
    fn eval_block(&mut self, statements: &[Expr]) -> EvalResult {
        let mut scoped = self.scoped(Namespace::BlockReturn);
        let mut last = Value::Bool(true);
        for statement in statements {
            last = scoped.eval(statement)?;
        }
        Ok(last)
    }

    fn prime(&mut self, name: &str, value: Value) {
        trace!(variable = name, value = %value, "primed");
        self.scope.borrow_mut().bind_primed(name, value.clone());
        self.delta.insert(name.to_string(), value);
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn builtin_set_value(set: BuiltinSet) -> Value {
    match set {
        BuiltinSet::Nat => Value::Set(SetValue::infinite(InfiniteDomain::Naturals)),
        BuiltinSet::Int => Value::Set(SetValue::infinite(InfiniteDomain::Integers)),
        BuiltinSet::Real => Value::Set(SetValue::infinite(InfiniteDomain::Reals)),
        BuiltinSet::Boolean => Value::set([Value::Bool(false), Value::Bool(true)]),
    }
}

fn condition(value: &Value) -> Result<bool, EvalError> {
    value
        .as_bool()
        .ok_or_else(|| type_mismatch("a Boolean condition", value.kind().name()))
}

fn integer_bound(side: Side, value: &Value) -> Result<i64, EvalError> {
    value
        .as_number()
        .filter(|n| n.is_integral())
        .and_then(Number::to_i64)
        .ok_or_else(|| operand_type(side, "..", "an Integer", value))
}
