//! Binary operator implementations for the evaluator.
//!
//! One entry point per node category. Each checks that the operator belongs
//! to the category's legal set, checks operand kinds (naming the offending
//! side), then dispatches on the operator. Logic operators that short-circuit
//! are handled by the interpreter; `combine_logic` covers the strict forms.

use tlx_ir::{BinaryOp, OpCategory};
use tlx_values::{BagValue, Number, SetValue, Side, Value};

use crate::errors::{operand_type, unknown_operator, EvalError, EvalResult};

pub(crate) fn check_legal(op: BinaryOp, category: OpCategory) -> Result<(), EvalError> {
    if op.is_legal_in(category) {
        Ok(())
    } else {
        Err(unknown_operator(op.as_symbol(), category.name()))
    }
}

fn number_operand(side: Side, op: BinaryOp, value: &Value) -> Result<&Number, EvalError> {
    value
        .as_number()
        .ok_or_else(|| operand_type(side, op.as_symbol(), "a Number", value))
}

pub(crate) fn bool_operand(side: Side, op: &str, value: &Value) -> Result<bool, EvalError> {
    value
        .as_bool()
        .ok_or_else(|| operand_type(side, op, "a Boolean", value))
}

fn set_operand<'v>(side: Side, op: &str, value: &'v Value) -> Result<&'v SetValue, EvalError> {
    value
        .as_set()
        .ok_or_else(|| operand_type(side, op, "a Set", value))
}

fn bag_operand(side: Side, op: BinaryOp, value: &Value) -> Result<&BagValue, EvalError> {
    value
        .as_bag()
        .ok_or_else(|| operand_type(side, op.as_symbol(), "a Bag", value))
}

/// `+ - * / % ÷ ^` on numbers.
pub fn evaluate_arithmetic(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    check_legal(op, OpCategory::Arithmetic)?;
    let a = number_operand(Side::Left, op, left)?;
    let b = number_operand(Side::Right, op, right)?;
    let result = match op {
        BinaryOp::Add => a.add(b),
        BinaryOp::Sub => a.sub(b),
        BinaryOp::Mul => a.mul(b),
        BinaryOp::Div => a.div(b)?,
        BinaryOp::Mod => a.modulo(b)?,
        BinaryOp::IntDiv => a.int_div(b)?,
        BinaryOp::Pow => a.pow(b)?,
        _ => return Err(unknown_operator(op.as_symbol(), OpCategory::Arithmetic.name())),
    };
    Ok(Value::Number(result))
}

/// `< ≤ > ≥` on numbers, comparing mathematical values across kinds.
pub fn evaluate_comparison(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    check_legal(op, OpCategory::Comparison)?;
    let a = number_operand(Side::Left, op, left)?;
    let b = number_operand(Side::Right, op, right)?;
    let result = match op {
        BinaryOp::Lt => a < b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::GtEq => a >= b,
        _ => return Err(unknown_operator(op.as_symbol(), OpCategory::Comparison.name())),
    };
    Ok(Value::Bool(result))
}

/// `∧ ∨ ⇒ ≡` with both operands already evaluated.
pub fn combine_logic(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    check_legal(op, OpCategory::Logic)?;
    let a = bool_operand(Side::Left, op.as_symbol(), left)?;
    let b = bool_operand(Side::Right, op.as_symbol(), right)?;
    let result = match op {
        BinaryOp::And => a && b,
        BinaryOp::Or => a || b,
        BinaryOp::Implies => !a || b,
        BinaryOp::Equiv => a == b,
        _ => return Err(unknown_operator(op.as_symbol(), OpCategory::Logic.name())),
    };
    Ok(Value::Bool(result))
}

/// `∪ ∩ \` produce sets; `⊆ ⊂ ⊇ ⊃` produce booleans.
pub fn evaluate_set_algebra(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    check_legal(op, OpCategory::SetAlgebra)?;
    let a = set_operand(Side::Left, op.as_symbol(), left)?;
    let b = set_operand(Side::Right, op.as_symbol(), right)?;
    Ok(match op {
        BinaryOp::Union => Value::Set(a.union(b)?),
        BinaryOp::Intersect => Value::Set(a.intersect(b)?),
        BinaryOp::Difference => Value::Set(a.difference(b)?),
        BinaryOp::SubsetEq => Value::Bool(a.is_subset(b)),
        BinaryOp::ProperSubset => Value::Bool(a.is_proper_subset(b)),
        BinaryOp::SupersetEq => Value::Bool(a.is_superset(b)),
        BinaryOp::ProperSuperset => Value::Bool(a.is_proper_superset(b)),
        _ => return Err(unknown_operator(op.as_symbol(), OpCategory::SetAlgebra.name())),
    })
}

/// `⊕ ⊖ ⊔` produce bags; `⊑` and friends produce booleans.
pub fn evaluate_bag_algebra(op: BinaryOp, left: &Value, right: &Value) -> EvalResult {
    check_legal(op, OpCategory::BagAlgebra)?;
    let a = bag_operand(Side::Left, op, left)?;
    let b = bag_operand(Side::Right, op, right)?;
    Ok(match op {
        BinaryOp::BagSum => Value::Bag(a.sum(b)),
        BinaryOp::BagDifference => Value::Bag(a.difference(b)),
        BinaryOp::BagUnion => Value::Bag(a.union(b)),
        BinaryOp::SubBag => Value::Bool(a.is_subbag(b)),
        BinaryOp::ProperSubBag => Value::Bool(a.is_proper_subbag(b)),
        BinaryOp::SuperBag => Value::Bool(a.is_superbag(b)),
        BinaryOp::ProperSuperBag => Value::Bool(a.is_proper_superbag(b)),
        _ => return Err(unknown_operator(op.as_symbol(), OpCategory::BagAlgebra.name())),
    })
}

/// `e ∈ S`. Works for infinite sets.
pub fn evaluate_membership(element: &Value, set: &Value, negated: bool) -> EvalResult {
    let symbol = if negated { "∉" } else { "∈" };
    let set = set_operand(Side::Right, symbol, set)?;
    Ok(Value::Bool(set.contains(element) != negated))
}

/// Content equality; a kind mismatch is simply unequal.
pub fn evaluate_equality(left: &Value, right: &Value, negated: bool) -> Value {
    Value::Bool((left == right) != negated)
}

#[cfg(test)]
mod tests;
