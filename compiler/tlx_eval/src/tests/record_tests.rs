//! Records, EXCEPT and tuple indexing.

use pretty_assertions::assert_eq;
use tlx_ir::{BinaryOp, Expr};

use crate::errors::EvalErrorKind;
use crate::{Interpreter, Scope, Value};

fn val_rdy() -> Value {
    Value::record([("val", Value::int(1)), ("rdy", Value::int(0))])
}

#[test]
fn functional_update() {
    let mut interpreter = Interpreter::new();
    interpreter.bind("r", val_rdy());
    let update = Expr::except(
        Expr::ident("r"),
        vec![("val", Expr::int(9)), ("rdy", Expr::existing())],
    );
    assert_eq!(
        interpreter.eval(&update).unwrap(),
        Value::record([("val", Value::int(9)), ("rdy", Value::int(0))])
    );
    assert_eq!(interpreter.eval(&Expr::ident("r")).unwrap(), val_rdy());
}

#[test]
fn existing_value_sees_earlier_clauses() {
    let mut interpreter = Interpreter::new();
    interpreter.bind("r", val_rdy());
    let update = Expr::except(
        Expr::ident("r"),
        vec![
            ("val", Expr::int(5)),
            (
                "val",
                Expr::binary(BinaryOp::Add, Expr::existing(), Expr::int(1)),
            ),
        ],
    );
    let updated = interpreter.eval(&update).unwrap();
    assert_eq!(updated.as_record().unwrap().get("val"), Some(&Value::int(6)));
}

#[test]
fn except_on_missing_field_fails() {
    let mut interpreter = Interpreter::new();
    interpreter.bind("r", val_rdy());
    let update = Expr::except(Expr::ident("r"), vec![("nope", Expr::int(1))]);
    assert_eq!(
        interpreter.eval(&update).unwrap_err().kind,
        EvalErrorKind::FieldNotFound {
            field: "nope".to_string()
        }
    );
}

#[test]
fn except_requires_a_record() {
    let update = Expr::except(Expr::int(1), vec![("a", Expr::int(1))]);
    assert!(matches!(
        super::eval(&update).unwrap_err().kind,
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn field_access() {
    let record = Expr::record(vec![("a", Expr::int(1))]);
    assert_eq!(
        super::eval(&Expr::field(record.clone(), "a")).unwrap(),
        Value::int(1)
    );
    assert!(matches!(
        super::eval(&Expr::field(record, "b")).unwrap_err().kind,
        EvalErrorKind::FieldNotFound { .. }
    ));
    assert!(super::eval(&Expr::field(Expr::int(1), "a")).is_err());
}

#[test]
fn tuple_index_is_one_based() {
    let tuple = Expr::tuple(vec![Expr::string("a"), Expr::string("b")]);
    assert_eq!(
        super::eval(&Expr::index(tuple.clone(), Expr::int(1))).unwrap(),
        Value::string("a")
    );
    assert_eq!(
        super::eval(&Expr::index(tuple.clone(), Expr::int(2))).unwrap(),
        Value::string("b")
    );
    for bad in [0, 3, -1] {
        assert!(matches!(
            super::eval(&Expr::index(tuple.clone(), Expr::int(bad)))
                .unwrap_err()
                .kind,
            EvalErrorKind::IndexOutOfBounds { .. }
        ));
    }
}

#[test]
fn self_fields_resolve_as_names() {
    let mut interpreter = Interpreter::new();
    let root = Scope::root().with_self(val_rdy(), "Cell");
    *interpreter.scope().borrow_mut() = root;
    assert_eq!(interpreter.eval(&Expr::ident("val")).unwrap(), Value::int(1));
    assert_eq!(
        interpreter.eval(&Expr::field(Expr::self_ref(), "rdy")).unwrap(),
        Value::int(0)
    );

    interpreter.bind("val", Value::int(42));
    assert_eq!(interpreter.eval(&Expr::ident("val")).unwrap(), Value::int(42));
}

#[test]
fn self_outside_a_class_fails() {
    let err = super::eval(&Expr::self_ref()).unwrap_err();
    assert_eq!(
        err.kind,
        EvalErrorKind::NameNotFound {
            name: "self".to_string()
        }
    );
}
