//! Evaluation of checker-annotated trees.
//!
//! The annotated path evaluates exactly like the plain one and then
//! confirms the value against the annotation. A disagreement means the
//! checker and the engine differ about the tree; it is reported, never
//! papered over with a different value.

use tlx_ir::{Type, TypedExpr};
use tlx_values::Value;

use super::{Evaluation, Interpreter};
use crate::errors::{type_mismatch, EvalError};

/// Whether `value` inhabits `ty`.
///
/// Record types list required fields; extra fields are allowed. An infinite
/// set inhabits a set type whose element type admits numbers.
pub fn admits(ty: &Type, value: &Value) -> bool {
    match (ty, value) {
        (Type::Any, _)
        | (Type::Number, Value::Number(_))
        | (Type::Boolean, Value::Bool(_))
        | (Type::String, Value::Str(_)) => true,
        (Type::Set(elem), Value::Set(set)) => match set.elements() {
            Ok(elements) => elements.into_iter().all(|v| admits(elem, v)),
            Err(_) => matches!(**elem, Type::Number | Type::Any),
        },
        (Type::Bag(elem), Value::Bag(bag)) => {
            bag.elements().into_iter().all(|(v, _)| admits(elem, v))
        }
        (Type::Tuple(elem), Value::Tuple(elements)) => elements.iter().all(|v| admits(elem, v)),
        (Type::Record(fields), Value::Record(record)) => fields
            .iter()
            .all(|(name, ty)| record.get(name).is_some_and(|v| admits(ty, v))),
        _ => false,
    }
}

impl Interpreter {
    /// Evaluate the annotated tree and check the result against its type.
    pub fn evaluate_typed(&mut self, typed: &TypedExpr) -> Result<Evaluation, EvalError> {
        let evaluation = self.evaluate(&typed.expr)?;
        if admits(&typed.ty, &evaluation.value) {
            Ok(evaluation)
        } else {
            Err(Self::attach_span(
                type_mismatch(typed.ty.to_string(), evaluation.value.kind().name()),
                typed.expr.span,
            ))
        }
    }
}
