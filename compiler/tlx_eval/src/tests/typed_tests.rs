//! The annotated entry point agrees with the plain one.

use pretty_assertions::assert_eq;
use tlx_ir::{BinaryOp, BuiltinSet, Expr, Span, Type, TypedExpr};

use super::int_set;
use crate::errors::EvalErrorKind;
use crate::{admits, Interpreter, Value};

fn samples() -> Vec<(Expr, Type)> {
    vec![
        (
            Expr::binary(BinaryOp::Add, Expr::int(1), Expr::int(2)),
            Type::Number,
        ),
        (
            Expr::binary(BinaryOp::Lt, Expr::int(1), Expr::int(2)),
            Type::Boolean,
        ),
        (Expr::string("s"), Type::String),
        (int_set(&[1, 2]), Type::set_of(Type::Number)),
        (
            Expr::tuple(vec![Expr::bool(true)]),
            Type::tuple_of(Type::Boolean),
        ),
        (
            Expr::record(vec![("a", Expr::int(1)), ("b", Expr::string("x"))]),
            Type::Record(vec![("a".to_string(), Type::Number)]),
        ),
        (
            Expr::call("Bags", "SetToBag", vec![int_set(&[3])]),
            Type::bag_of(Type::Number),
        ),
        (Expr::builtin_set(BuiltinSet::Nat), Type::set_of(Type::Number)),
        (Expr::assign("x", Expr::int(1)), Type::Boolean),
        (Expr::int(7), Type::Any),
    ]
}

#[test]
fn typed_and_untyped_paths_agree() {
    for (expr, ty) in samples() {
        let plain = Interpreter::new().evaluate(&expr).unwrap();
        let typed = Interpreter::new()
            .evaluate_typed(&TypedExpr::new(expr.clone(), ty.clone()))
            .unwrap_or_else(|err| panic!("{expr} : {ty} failed: {err}"));
        assert_eq!(plain, typed, "{expr}");
    }
}

#[test]
fn typed_path_propagates_evaluation_errors() {
    let typed = TypedExpr::new(Expr::ident("missing"), Type::Number);
    assert!(matches!(
        Interpreter::new().evaluate_typed(&typed).unwrap_err().kind,
        EvalErrorKind::NameNotFound { .. }
    ));
}

#[test]
fn annotation_disagreement_is_reported() {
    let expr = Expr::new(Expr::int(1).kind, Span::new(2, 3));
    let typed = TypedExpr::new(expr, Type::Boolean);
    let err = Interpreter::new().evaluate_typed(&typed).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::TypeMismatch {
            expected: "Boolean".to_string(),
            got: "Number".to_string(),
        }
    );
    assert_eq!(err.span, Some(Span::new(2, 3)));
}

#[test]
fn admits_checks_element_types() {
    let mixed = Value::set([Value::int(1), Value::string("a")]);
    assert!(!admits(&Type::set_of(Type::Number), &mixed));
    assert!(admits(&Type::set_of(Type::Any), &mixed));
    assert!(admits(&Type::set_of(Type::String), &Value::set([])));

    let record = Value::record([("a", Value::int(1))]);
    assert!(!admits(
        &Type::Record(vec![("b".to_string(), Type::Number)]),
        &record
    ));
    assert!(!admits(&Type::Number, &Value::error("boom")));
    assert!(admits(&Type::Any, &Value::error("boom")));
}
