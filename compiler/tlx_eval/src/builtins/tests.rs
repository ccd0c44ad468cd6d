use pretty_assertions::assert_eq;

use super::*;
use crate::errors::EvalErrorKind;

fn seq(values: &[i64]) -> Value {
    Value::tuple(values.iter().copied().map(Value::int))
}

fn call(module: &str, operation: &str, args: &[Value]) -> EvalResult {
    BuiltinRegistry::with_defaults().call(module, operation, args)
}

#[test]
fn default_modules_are_registered() {
    let registry = BuiltinRegistry::default();
    for (module, op) in [
        ("Seq", "Head"),
        ("Seq", "SubSeq"),
        ("Stack", "Push"),
        ("Queue", "Dequeue"),
        ("Bags", "CopiesIn"),
        ("Bags", "EmptyBag"),
        ("Sets", "Cardinality"),
    ] {
        assert!(registry.contains(module, op), "missing _{module}!{op}");
    }
    assert!(registry.names().contains(&"_Seq!Len"));
}

#[test]
fn unknown_builtin_fails() {
    let err = call("Seq", "Frobnicate", &[]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::UnknownBuiltin {
            name: "_Seq!Frobnicate".to_string()
        }
    );
}

#[test]
fn wrong_arity_fails() {
    let err = call("Seq", "Head", &[]).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "_Seq!Head".to_string(),
            expected: 1,
            got: 0,
        }
    );
}

#[test]
fn wrong_argument_kind_fails() {
    let err = call("Seq", "Len", &[Value::int(3)]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::TypeMismatch { .. }));
}

#[test]
fn sequence_operations() {
    let s = seq(&[1, 2, 3]);
    assert_eq!(call("Seq", "Head", &[s.clone()]).unwrap(), Value::int(1));
    assert_eq!(call("Seq", "Tail", &[s.clone()]).unwrap(), seq(&[2, 3]));
    assert_eq!(
        call("Seq", "Append", &[s.clone(), Value::int(4)]).unwrap(),
        seq(&[1, 2, 3, 4])
    );
    assert_eq!(call("Seq", "Len", &[s.clone()]).unwrap(), Value::int(3));
    assert_eq!(
        call("Seq", "Concat", &[s.clone(), seq(&[9])]).unwrap(),
        seq(&[1, 2, 3, 9])
    );
    assert_eq!(
        call("Seq", "SubSeq", &[s.clone(), Value::int(2), Value::int(3)]).unwrap(),
        seq(&[2, 3])
    );
    assert_eq!(call("Seq", "Reverse", &[s.clone()]).unwrap(), seq(&[3, 2, 1]));
    assert_eq!(
        call("Seq", "Contains", &[s.clone(), Value::int(2)]).unwrap(),
        Value::Bool(true)
    );
    assert_eq!(call("Seq", "IsEmpty", &[seq(&[])]).unwrap(), Value::Bool(true));
}

#[test]
fn head_of_empty_sequence_fails() {
    let err = call("Seq", "Head", &[seq(&[])]).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::EmptyCollection { .. }));
}

#[test]
fn arguments_are_not_modified() {
    let s = seq(&[1]);
    let args = [s.clone(), Value::int(2)];
    call("Seq", "Append", &args).unwrap();
    assert_eq!(args[0], s);
}

#[test]
fn stack_operations() {
    let s = seq(&[1, 2]);
    assert_eq!(
        call("Stack", "Push", &[s.clone(), Value::int(3)]).unwrap(),
        seq(&[1, 2, 3])
    );
    assert_eq!(call("Stack", "Pop", &[s.clone()]).unwrap(), seq(&[1]));
    assert_eq!(call("Stack", "Top", &[s]).unwrap(), Value::int(2));
    assert!(call("Stack", "Pop", &[seq(&[])]).is_err());
}

#[test]
fn queue_operations() {
    let q = seq(&[1, 2]);
    assert_eq!(
        call("Queue", "Enqueue", &[q.clone(), Value::int(3)]).unwrap(),
        seq(&[1, 2, 3])
    );
    assert_eq!(call("Queue", "Dequeue", &[q.clone()]).unwrap(), seq(&[2]));
    assert_eq!(call("Queue", "Front", &[q]).unwrap(), Value::int(1));
    assert_eq!(
        call("Queue", "IsEmpty", &[seq(&[])]).unwrap(),
        Value::Bool(true)
    );
}

#[test]
fn bag_operations() {
    let set = Value::set([Value::int(1), Value::int(2)]);
    let bag = call("Bags", "SetToBag", &[set.clone()]).unwrap();
    assert_eq!(call("Bags", "BagToSet", &[bag.clone()]).unwrap(), set);
    assert_eq!(
        call("Bags", "CopiesIn", &[Value::int(1), bag.clone()]).unwrap(),
        Value::int(1)
    );
    assert_eq!(
        call("Bags", "BagIn", &[Value::int(3), bag.clone()]).unwrap(),
        Value::Bool(false)
    );
    assert_eq!(
        call("Bags", "BagCardinality", &[Value::bag([Value::int(1), Value::int(1)])]).unwrap(),
        Value::int(2)
    );
    assert_eq!(call("Bags", "EmptyBag", &[]).unwrap(), Value::bag([]));
}

#[test]
fn set_cardinality_rejects_infinite_sets() {
    assert_eq!(
        call("Sets", "Cardinality", &[Value::set([Value::int(1), Value::int(1)])]).unwrap(),
        Value::int(1)
    );
    let nat = Value::Set(SetValue::infinite(tlx_values::InfiniteDomain::Naturals));
    assert!(matches!(
        call("Sets", "Cardinality", &[nat]).unwrap_err().kind,
        EvalErrorKind::InfiniteSet { .. }
    ));
}

#[test]
fn custom_builtins_extend_the_table() {
    fn double(args: &[Value]) -> EvalResult {
        let n = args[0].as_number().cloned().unwrap_or_else(|| Number::int(0));
        Ok(Value::Number(n.add(&n)))
    }
    let mut registry = BuiltinRegistry::empty();
    registry.register("Math", "Double", 1, double);
    assert_eq!(
        registry.call("Math", "Double", &[Value::int(21)]).unwrap(),
        Value::int(42)
    );
}
