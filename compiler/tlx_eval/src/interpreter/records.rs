//! Record and tuple access.

use tlx_ir::{ExceptClause, Expr, FieldInit};
use tlx_values::{Number, RecordValue, SetValue, Side, Value};

use super::Interpreter;
use crate::errors::{index_out_of_bounds, operand_type, type_mismatch, EvalResult};

impl Interpreter {
    pub(super) fn eval_record_literal(&mut self, fields: &[FieldInit]) -> EvalResult {
        let mut record = RecordValue::new();
        for init in fields {
            let value = self.eval(&init.value)?;
            record.set(init.name.as_str(), value);
        }
        Ok(Value::Record(record))
    }

    /// `[base EXCEPT !.f = e, ...]`.
    ///
    /// Clauses apply left to right to a copy of `base`; inside each, `@` is
    /// the field's value in that copy. The copy keeps the base's identity.
    pub(super) fn eval_except(&mut self, base: &Expr, clauses: &[ExceptClause]) -> EvalResult {
        let mut updated = match self.eval(base)? {
            Value::Record(record) => record,
            other => return Err(type_mismatch("a Record to update", other.kind().name())),
        };
        for clause in clauses {
            let existing = updated.field(&clause.field)?.clone();
            let value = self.with_existing(existing, |scoped| scoped.eval(&clause.value))?;
            updated.set(clause.field.as_str(), value);
        }
        Ok(Value::Record(updated))
    }

    /// `record.field`; association names on the record's class navigate
    /// the link table instead.
    pub(super) fn eval_field(&mut self, record: &Expr, field: &str) -> EvalResult {
        let target = self.eval(record)?;
        let Value::Record(record) = &target else {
            return Err(type_mismatch(
                format!("a Record with field `{field}`"),
                target.kind().name(),
            ));
        };
        if let Some(related) = self.navigate(record, field) {
            return Ok(Value::Set(related));
        }
        record.field(field).cloned()
    }

    fn navigate(&self, record: &RecordValue, field: &str) -> Option<SetValue> {
        let scope = self.scope.borrow();
        let context = scope.associations()?.borrow();
        context.navigate(record, scope.self_class(), field)
    }

    /// `tuple[i]`, 1-indexed.
    pub(super) fn eval_index(&mut self, tuple: &Expr, index: &Expr) -> EvalResult {
        let (target, position) = self.eval_operands(tuple, index)?;
        let Value::Tuple(elements) = &target else {
            return Err(operand_type(Side::Left, "[]", "a Tuple", &target));
        };
        let i = position
            .as_number()
            .filter(|n| n.is_integral())
            .and_then(Number::to_i64)
            .ok_or_else(|| operand_type(Side::Right, "[]", "an Integer", &position))?;
        let slot = usize::try_from(i).map_err(|_| index_out_of_bounds(i, elements.len()))?;
        elements.get(slot).cloned()
    }
}
