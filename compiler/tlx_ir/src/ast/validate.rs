//! Structural well-formedness checks.
//!
//! Run once by whoever builds a tree. The evaluator does not repeat these
//! checks; it only guards the few shapes it cannot work without.

use super::{BinaryOp, Expr, ExprKind, OpCategory};
use crate::IrError;

impl Expr {
    /// Check that every node has its required children and that binary
    /// operators belong to their node's legal operator set.
    pub fn validate(&self) -> Result<(), IrError> {
        match &self.kind {
            ExprKind::Number(text) => {
                if is_numeric_literal(text) {
                    Ok(())
                } else {
                    Err(IrError::InvalidNumber(text.clone()))
                }
            }
            ExprKind::Bool(_)
            | ExprKind::Str(_)
            | ExprKind::BuiltinSet(_)
            | ExprKind::Existing
            | ExprKind::SelfRef => Ok(()),
            ExprKind::Ident(name) | ExprKind::Primed(name) => non_empty_name(name, "identifier"),

            ExprKind::Arithmetic { op, left, right } => {
                binary(*op, OpCategory::Arithmetic, left, right)
            }
            ExprKind::Comparison { op, left, right } => {
                binary(*op, OpCategory::Comparison, left, right)
            }
            ExprKind::Logic { op, left, right } => binary(*op, OpCategory::Logic, left, right),
            ExprKind::SetAlgebra { op, left, right } => {
                binary(*op, OpCategory::SetAlgebra, left, right)
            }
            ExprKind::BagAlgebra { op, left, right } => {
                binary(*op, OpCategory::BagAlgebra, left, right)
            }
            ExprKind::Equality { left, right, .. } => {
                left.validate()?;
                right.validate()
            }
            ExprKind::Membership { element, set, .. } => {
                element.validate()?;
                set.validate()
            }
            ExprKind::Range { low, high } => {
                low.validate()?;
                high.validate()
            }
            ExprKind::Not(operand) | ExprKind::Negate(operand) => operand.validate(),

            ExprKind::SetLiteral(elements) | ExprKind::TupleLiteral(elements) => {
                elements.iter().try_for_each(Expr::validate)
            }
            ExprKind::RecordLiteral(fields) => {
                for (i, field) in fields.iter().enumerate() {
                    non_empty_name(&field.name, "record field")?;
                    if fields[..i].iter().any(|f| f.name == field.name) {
                        return Err(IrError::DuplicateField(field.name.clone()));
                    }
                    field.value.validate()?;
                }
                Ok(())
            }

            ExprKind::Quantified { binding, body, .. } => {
                validate_binding(binding, "quantifier")?;
                body.validate()
            }
            ExprKind::SetFilter { binding, predicate } => {
                validate_binding(binding, "set filter")?;
                predicate.validate()
            }
            ExprKind::SetMap { body, binding } => {
                validate_binding(binding, "set map")?;
                body.validate()
            }
            ExprKind::Let { name, value, body } => {
                non_empty_name(name, "LET")?;
                value.validate()?;
                body.validate()
            }

            ExprKind::Except { base, clauses } => {
                if clauses.is_empty() {
                    return Err(IrError::MissingChild {
                        node: "EXCEPT",
                        child: "clause",
                    });
                }
                base.validate()?;
                for clause in clauses {
                    non_empty_name(&clause.field, "EXCEPT clause")?;
                    clause.value.validate()?;
                }
                Ok(())
            }
            ExprKind::Field { record, field } => {
                non_empty_name(field, "field access")?;
                record.validate()
            }
            ExprKind::Index { tuple, index } => {
                tuple.validate()?;
                index.validate()
            }

            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                cond.validate()?;
                then_branch.validate()?;
                else_branch.validate()
            }
            ExprKind::Case { arms, other } => {
                if arms.is_empty() {
                    return Err(IrError::MissingChild {
                        node: "CASE",
                        child: "arm",
                    });
                }
                for arm in arms {
                    arm.guard.validate()?;
                    arm.body.validate()?;
                }
                other.as_deref().map_or(Ok(()), Expr::validate)
            }
            ExprKind::Block(statements) => {
                if statements.is_empty() {
                    return Err(IrError::MissingChild {
                        node: "block",
                        child: "statement",
                    });
                }
                statements.iter().try_for_each(Expr::validate)
            }

            ExprKind::Assign { name, value } => {
                non_empty_name(name, "assignment")?;
                value.validate()
            }
            ExprKind::Unchanged(names) => {
                if names.is_empty() {
                    return Err(IrError::MissingChild {
                        node: "UNCHANGED",
                        child: "variable",
                    });
                }
                names
                    .iter()
                    .try_for_each(|name| non_empty_name(name, "UNCHANGED"))
            }
            ExprKind::BuiltinCall {
                module,
                operation,
                args,
            } => {
                non_empty_name(module, "built-in module")?;
                non_empty_name(operation, "built-in operation")?;
                args.iter().try_for_each(Expr::validate)
            }
        }
    }
}

fn binary(op: BinaryOp, category: OpCategory, left: &Expr, right: &Expr) -> Result<(), IrError> {
    if !op.is_legal_in(category) {
        return Err(IrError::UnknownOperator {
            op: op.as_symbol().to_string(),
            node: category.name(),
        });
    }
    left.validate()?;
    right.validate()
}

fn validate_binding(binding: &Expr, node: &'static str) -> Result<(), IrError> {
    match binding.as_binding() {
        Some((_, set)) => set.validate(),
        None => Err(IrError::MalformedBinding {
            node,
            found: binding.to_string(),
        }),
    }
}

fn non_empty_name(name: &str, node: &'static str) -> Result<(), IrError> {
    if name.is_empty() {
        Err(IrError::MissingChild {
            node,
            child: "name",
        })
    } else {
        Ok(())
    }
}

/// `-?digits`, `-?digits.digits` or `-?digits/digits`.
fn is_numeric_literal(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if let Some((whole, frac)) = body.split_once('.') {
        all_digits(whole) && all_digits(frac)
    } else if let Some((num, den)) = body.split_once('/') {
        all_digits(num) && all_digits(den)
    } else {
        all_digits(body)
    }
}
