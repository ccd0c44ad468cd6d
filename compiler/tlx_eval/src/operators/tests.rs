use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;

fn ints(values: &[i64]) -> Value {
    Value::set(values.iter().copied().map(Value::int))
}

fn bag(entries: &[(i64, usize)]) -> Value {
    let mut bag = BagValue::new();
    for (value, count) in entries {
        bag.insert(Value::int(*value), *count);
    }
    Value::Bag(bag)
}

#[test]
fn arithmetic_dispatch() {
    let (a, b) = (Value::int(7), Value::int(2));
    assert_eq!(evaluate_arithmetic(BinaryOp::Add, &a, &b).unwrap(), Value::int(9));
    assert_eq!(evaluate_arithmetic(BinaryOp::Sub, &a, &b).unwrap(), Value::int(5));
    assert_eq!(evaluate_arithmetic(BinaryOp::Mul, &a, &b).unwrap(), Value::int(14));
    assert_eq!(
        evaluate_arithmetic(BinaryOp::Div, &a, &b).unwrap().to_string(),
        "7/2"
    );
    assert_eq!(evaluate_arithmetic(BinaryOp::Mod, &a, &b).unwrap(), Value::int(1));
    assert_eq!(evaluate_arithmetic(BinaryOp::IntDiv, &a, &b).unwrap(), Value::int(3));
    assert_eq!(evaluate_arithmetic(BinaryOp::Pow, &a, &b).unwrap(), Value::int(49));
}

#[test]
fn arithmetic_names_the_offending_side() {
    let err = evaluate_arithmetic(BinaryOp::Add, &Value::int(1), &Value::Bool(true)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::OperandType {
            side: Side::Right,
            op: "+".to_string(),
            expected: "a Number",
            got: "Boolean".to_string(),
        }
    );
    let err = evaluate_comparison(BinaryOp::Lt, &Value::string("a"), &Value::int(1)).unwrap_err();
    assert!(matches!(
        err.kind,
        EvalErrorKind::OperandType {
            side: Side::Left,
            ..
        }
    ));
}

#[test]
fn operator_outside_category_is_rejected() {
    let err = evaluate_arithmetic(BinaryOp::Union, &Value::int(1), &Value::int(2)).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownOperator {
            op: "∪".to_string(),
            node: "arithmetic".to_string(),
        }
    );
    assert!(evaluate_set_algebra(BinaryOp::Add, &ints(&[]), &ints(&[])).is_err());
    assert!(combine_logic(BinaryOp::Lt, &Value::Bool(true), &Value::Bool(true)).is_err());
}

#[test]
fn comparison_crosses_numeric_kinds() {
    let half = Value::Number(Number::new_rational(1, 2).unwrap());
    assert_eq!(
        evaluate_comparison(BinaryOp::Lt, &half, &Value::real(0.75)).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_comparison(BinaryOp::GtEq, &Value::int(5), &Value::real(5.0)).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn strict_logic_truth_tables() {
    let (t, f) = (Value::Bool(true), Value::Bool(false));
    assert_eq!(combine_logic(BinaryOp::Implies, &f, &f).unwrap(), t);
    assert_eq!(combine_logic(BinaryOp::Implies, &t, &f).unwrap(), f);
    assert_eq!(combine_logic(BinaryOp::Equiv, &f, &f).unwrap(), t);
    assert_eq!(combine_logic(BinaryOp::Equiv, &t, &f).unwrap(), f);
    assert!(combine_logic(BinaryOp::And, &t, &Value::int(1)).is_err());
}

#[test]
fn set_algebra_dispatch() {
    let (a, b) = (ints(&[1, 2]), ints(&[2, 3]));
    let union = evaluate_set_algebra(BinaryOp::Union, &a, &b).unwrap();
    assert_eq!(union, ints(&[1, 2, 3]));
    assert_eq!(union.as_set().unwrap().len().unwrap(), 3);
    assert_eq!(
        evaluate_set_algebra(BinaryOp::Intersect, &a, &b).unwrap(),
        ints(&[2])
    );
    assert_eq!(
        evaluate_set_algebra(BinaryOp::Difference, &a, &b).unwrap(),
        ints(&[1])
    );
    assert_eq!(
        evaluate_set_algebra(BinaryOp::ProperSubset, &ints(&[1]), &a).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_set_algebra(BinaryOp::SupersetEq, &a, &a).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_set_algebra(BinaryOp::ProperSuperset, &a, &a).unwrap(),
        Value::Bool(false)
    );
}

#[test]
fn bag_algebra_dispatch() {
    let (five, two) = (bag(&[(1, 5)]), bag(&[(1, 2)]));
    let diff = evaluate_bag_algebra(BinaryOp::BagDifference, &five, &two).unwrap();
    assert_eq!(diff, bag(&[(1, 3)]));
    assert_eq!(
        evaluate_bag_algebra(BinaryOp::BagSum, &five, &two).unwrap(),
        bag(&[(1, 7)])
    );
    assert_eq!(
        evaluate_bag_algebra(BinaryOp::BagUnion, &five, &two).unwrap(),
        five
    );
    assert_eq!(
        evaluate_bag_algebra(BinaryOp::SubBag, &two, &five).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_bag_algebra(BinaryOp::ProperSubBag, &five, &five).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        evaluate_bag_algebra(BinaryOp::ProperSuperBag, &five, &two).unwrap(),
        Value::Bool(true)
    );
    assert!(evaluate_bag_algebra(BinaryOp::BagSum, &five, &ints(&[1])).is_err());
}

#[test]
fn membership_and_equality() {
    let s = ints(&[1, 2]);
    assert_eq!(
        evaluate_membership(&Value::int(1), &s, false).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(
        evaluate_membership(&Value::int(3), &s, true).unwrap(),
        Value::Bool(true)
    );
    assert!(matches!(
        evaluate_membership(&Value::int(1), &Value::int(1), false)
            .unwrap_err()
            .kind,
        EvalErrorKind::OperandType { .. }
    ));

    assert_eq!(
        evaluate_equality(&Value::int(1), &Value::string("1"), false),
        Value::Bool(false)
    );
    assert_eq!(
        evaluate_equality(&Value::int(1), &Value::string("1"), true),
        Value::Bool(true)
    );
}
