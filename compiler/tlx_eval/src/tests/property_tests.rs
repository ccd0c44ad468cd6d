//! Algebraic properties of evaluation, checked end to end.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tlx_ir::{BinaryOp, Expr};

use super::{eval, int_set};
use crate::{Interpreter, NumberKind, Value};

fn bind_real(interpreter: &mut Interpreter, r: f64) -> Expr {
    interpreter.bind("r", Value::real(r));
    Expr::ident("r")
}

#[test]
fn kind_normalization() {
    let cases = [
        ("10/2", NumberKind::Natural, "5"),
        ("-10/2", NumberKind::Integer, "-5"),
        ("10/4", NumberKind::Rational, "5/2"),
    ];
    for (literal, kind, text) in cases {
        let value = eval(&Expr::number(literal)).unwrap();
        assert_eq!(value.as_number().unwrap().kind(), kind, "{literal}");
        assert_eq!(value.to_string(), text);
    }
}

#[test]
fn set_dedup() {
    let twice = Expr::set(vec![Expr::int(5), Expr::number("10/2")]);
    assert_eq!(eval(&twice).unwrap().as_set().unwrap().len().unwrap(), 1);

    let union = eval(&Expr::binary(
        BinaryOp::Union,
        int_set(&[1, 2]),
        int_set(&[2, 3]),
    ))
    .unwrap();
    let union = union.as_set().unwrap();
    assert_eq!(union.len().unwrap(), 3);
    for n in 1..=3 {
        assert!(union.contains(&Value::int(n)));
    }
}

#[test]
fn bag_algebra() {
    let mut interpreter = Interpreter::new();
    interpreter.bind("a", Value::bag(std::iter::repeat(Value::int(1)).take(5)));
    interpreter.bind("b", Value::bag(std::iter::repeat(Value::int(1)).take(2)));
    let copies = |bag: Expr| Expr::call("Bags", "CopiesIn", vec![Expr::int(1), bag]);

    let difference = Expr::binary(BinaryOp::BagDifference, Expr::ident("a"), Expr::ident("b"));
    assert_eq!(interpreter.eval(&copies(difference)).unwrap(), Value::int(3));

    let sub = |op, l: &str, r: &str| {
        Expr::binary(op, Expr::ident(l), Expr::ident(r))
    };
    assert_eq!(
        interpreter.eval(&sub(BinaryOp::SubBag, "b", "a")).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        interpreter.eval(&sub(BinaryOp::SubBag, "a", "b")).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        interpreter.eval(&sub(BinaryOp::ProperSubBag, "b", "a")).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        interpreter.eval(&sub(BinaryOp::ProperSubBag, "a", "a")).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        interpreter.eval(&sub(BinaryOp::SubBag, "a", "a")).unwrap(),
        Value::Bool(true)
    );
}

proptest! {
    #[test]
    fn numeric_contamination(
        r in -1.0e6f64..1.0e6,
        n in -1000i64..1000,
        op in prop::sample::select(vec![BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div]),
    ) {
        prop_assume!(op != BinaryOp::Div || n != 0);
        let mut interpreter = Interpreter::new();
        let real = bind_real(&mut interpreter, r);
        let value = interpreter.eval(&Expr::binary(op, real, Expr::int(n))).unwrap();
        prop_assert_eq!(value.as_number().unwrap().kind(), NumberKind::Real);
    }

    #[test]
    fn union_size_is_bounded_by_operands(
        a in prop::collection::vec(-20i64..20, 0..10),
        b in prop::collection::vec(-20i64..20, 0..10),
    ) {
        let union = eval(&Expr::binary(BinaryOp::Union, int_set(&a), int_set(&b))).unwrap();
        let size = union.as_set().unwrap().len().unwrap();
        let left = eval(&int_set(&a)).unwrap().as_set().unwrap().len().unwrap();
        let right = eval(&int_set(&b)).unwrap().as_set().unwrap().len().unwrap();
        prop_assert!(size >= left.max(right));
        prop_assert!(size <= left + right);
    }

    #[test]
    fn forall_agrees_with_not_exists_not(values in prop::collection::vec(-10i64..10, 0..8)) {
        let positive = |v: &str| Expr::binary(BinaryOp::Gt, Expr::ident(v), Expr::int(0));
        let all = Expr::forall("v", int_set(&values), positive("v"));
        let none_fail = Expr::logical_not(Expr::exists(
            "v",
            int_set(&values),
            Expr::logical_not(positive("v")),
        ));
        prop_assert_eq!(eval(&all).unwrap(), eval(&none_fail).unwrap());
        prop_assert_eq!(
            eval(&all).unwrap(),
            Value::Bool(values.iter().all(|&v| v > 0))
        );
    }

    #[test]
    fn filter_keeps_a_subset(values in prop::collection::vec(-10i64..10, 0..8), bound in -10i64..10) {
        let filtered = Expr::filter(
            "v",
            int_set(&values),
            Expr::binary(BinaryOp::GtEq, Expr::ident("v"), Expr::int(bound)),
        );
        let subset = Expr::binary(BinaryOp::SubsetEq, filtered.clone(), int_set(&values));
        prop_assert_eq!(eval(&subset).unwrap(), Value::Bool(true));
        let expected = values.iter().filter(|&&v| v >= bound).count();
        let size = eval(&filtered).unwrap().as_set().unwrap().len().unwrap();
        let distinct: std::collections::BTreeSet<_> =
            values.iter().filter(|&&v| v >= bound).collect();
        prop_assert!(size <= expected);
        prop_assert_eq!(size, distinct.len());
    }
}
