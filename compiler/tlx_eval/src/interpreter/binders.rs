//! Quantifiers, set comprehensions and LET.
//!
//! Every binder enumerates its set in canonical order and evaluates the
//! body once per element in a fresh local scope.

use tlx_ir::{Expr, Quantifier};
use tlx_values::{SetValue, Side, Value};

use super::Interpreter;
use crate::errors::{invalid_binding, operand_type, type_mismatch, EvalError, EvalResult};

impl Interpreter {
    /// `∀`/`∃`, stopping at the first element that decides the result.
    pub(super) fn eval_quantified(
        &mut self,
        quantifier: Quantifier,
        binding: &Expr,
        body: &Expr,
    ) -> EvalResult {
        let (var, elements) = self.enumerate_binding(binding, "quantifier")?;
        let (symbol, decisive) = match quantifier {
            Quantifier::ForAll => ("∀", false),
            Quantifier::Exists => ("∃", true),
        };
        for element in elements {
            let holds = self.with_binding(var, element, |scoped| scoped.eval(body))?;
            if predicate(symbol, &holds)? == decisive {
                return Ok(Value::Bool(decisive));
            }
        }
        Ok(Value::Bool(!decisive))
    }

    /// `{v ∈ S : P}`.
    pub(super) fn eval_set_filter(&mut self, binding: &Expr, predicate_expr: &Expr) -> EvalResult {
        let (var, elements) = self.enumerate_binding(binding, "set filter")?;
        let mut kept = SetValue::new();
        for element in elements {
            let keep = self.with_binding(var, element.clone(), |scoped| {
                scoped.eval(predicate_expr)
            })?;
            if predicate("set filter", &keep)? {
                kept.insert(element);
            }
        }
        Ok(Value::Set(kept))
    }

    /// `{e : v ∈ S}`.
    pub(super) fn eval_set_map(&mut self, body: &Expr, binding: &Expr) -> EvalResult {
        let (var, elements) = self.enumerate_binding(binding, "set map")?;
        let mut image = SetValue::new();
        for element in elements {
            image.insert(self.with_binding(var, element, |scoped| scoped.eval(body))?);
        }
        Ok(Value::Set(image))
    }

    pub(super) fn eval_let(&mut self, name: &str, value: &Expr, body: &Expr) -> EvalResult {
        let value = self.eval(value)?;
        self.with_binding(name, value, |scoped| scoped.eval(body))
    }

    /// Split `v ∈ S` into the variable and the elements of `S`.
    fn enumerate_binding<'e>(
        &mut self,
        binding: &'e Expr,
        node: &'static str,
    ) -> Result<(&'e str, Vec<Value>), EvalError> {
        let Some((var, set_expr)) = binding.as_binding() else {
            return Err(invalid_binding(node));
        };
        match self.eval(set_expr)? {
            Value::Set(set) => Ok((var, set.to_vec()?)),
            other => Err(operand_type(Side::Right, "∈", "a Set", &other)),
        }
    }
}

fn predicate(node: &str, value: &Value) -> Result<bool, EvalError> {
    value
        .as_bool()
        .ok_or_else(|| type_mismatch(format!("a Boolean body for `{node}`"), value.kind().name()))
}
