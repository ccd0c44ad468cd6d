//! Association traversal through field access.

use pretty_assertions::assert_eq;
use tlx_ir::{BinaryOp, Expr};

use crate::{
    Association, AssociationContext, AssociationKey, Cardinality, Direction, Interpreter,
    InterpreterBuilder, LocalScope, RecordValue, Scope, Value,
};

struct Model {
    context: LocalScope<AssociationContext>,
    order: RecordValue,
    l1: RecordValue,
    l2: RecordValue,
}

fn item(sku: &str) -> RecordValue {
    RecordValue::from_fields([("sku", Value::string(sku))])
}

/// Order `o` linked to line items `l1` and `l2` under association `A`.
fn model() -> Model {
    let mut context = AssociationContext::new();
    context
        .register(
            Association::new("A", "items", "Order", "LineItem")
                .with_cardinalities(Cardinality::ExactlyOne, Cardinality::Many),
        )
        .unwrap();
    let mut order = RecordValue::from_fields([("id", Value::int(1))]);
    let (mut l1, mut l2) = (item("x"), item("y"));
    let key = AssociationKey::new("A");
    context.link(&key, &mut order, &mut l1).unwrap();
    context.link(&key, &mut order, &mut l2).unwrap();
    Model {
        context: LocalScope::new(context),
        order,
        l1,
        l2,
    }
}

fn interpreter(model: &Model) -> Interpreter {
    let mut interpreter = InterpreterBuilder::new()
        .associations(model.context.clone())
        .build();
    interpreter.bind("o", Value::Record(model.order.clone()));
    interpreter.bind("l1", Value::Record(model.l1.clone()));
    interpreter
}

#[test]
fn association_round_trip() {
    let model = model();
    let mut interpreter = interpreter(&model);

    let forward = interpreter.eval(&Expr::field(Expr::ident("o"), "items")).unwrap();
    assert_eq!(
        forward,
        Value::set([Value::Record(model.l1.clone()), Value::Record(model.l2.clone())])
    );
    let reverse = interpreter.eval(&Expr::field(Expr::ident("l1"), "_items")).unwrap();
    assert_eq!(reverse, Value::set([Value::Record(model.order.clone())]));

    model
        .context
        .borrow_mut()
        .unlink(&AssociationKey::new("A"), &model.order, &model.l1);
    let forward = interpreter.eval(&Expr::field(Expr::ident("o"), "items")).unwrap();
    assert_eq!(forward, Value::set([Value::Record(model.l2.clone())]));
}

#[test]
fn traversal_composes_with_set_operators() {
    let model = model();
    let mut interpreter = interpreter(&model);
    let every_item_has_sku = Expr::forall(
        "i",
        Expr::field(Expr::ident("o"), "items"),
        Expr::binary(
            BinaryOp::Or,
            Expr::equals(Expr::field(Expr::ident("i"), "sku"), Expr::string("x")),
            Expr::equals(Expr::field(Expr::ident("i"), "sku"), Expr::string("y")),
        ),
    );
    assert_eq!(
        interpreter.eval(&every_item_has_sku).unwrap(),
        Value::Bool(true)
    );
    let count = Expr::call(
        "Sets",
        "Cardinality",
        vec![Expr::field(Expr::ident("o"), "items")],
    );
    assert_eq!(interpreter.eval(&count).unwrap(), Value::int(2));
}

#[test]
fn self_navigation_uses_the_scope_class() {
    let model = model();
    let root = Scope::root()
        .with_self(Value::Record(model.order.clone()), "Order")
        .with_associations(model.context.clone());
    let mut interpreter = InterpreterBuilder::new()
        .scope(LocalScope::new(root))
        .build();
    let items = interpreter
        .eval(&Expr::field(Expr::self_ref(), "items"))
        .unwrap();
    assert_eq!(items.as_set().unwrap().len().unwrap(), 2);
}

#[test]
fn unlinked_record_of_the_class_navigates_to_empty() {
    let model = model();
    let root = Scope::root()
        .with_self(Value::record([("id", Value::int(2))]), "Order")
        .with_associations(model.context.clone());
    let mut interpreter = InterpreterBuilder::new()
        .scope(LocalScope::new(root))
        .build();
    assert_eq!(
        interpreter
            .eval(&Expr::field(Expr::self_ref(), "items"))
            .unwrap(),
        Value::set([])
    );
}

#[test]
fn plain_fields_win_when_no_association_matches() {
    let model = model();
    let mut interpreter = interpreter(&model);
    assert_eq!(
        interpreter.eval(&Expr::field(Expr::ident("o"), "id")).unwrap(),
        Value::int(1)
    );
    assert_eq!(
        interpreter.eval(&Expr::field(Expr::ident("l1"), "sku")).unwrap(),
        Value::string("x")
    );
}

#[test]
fn context_is_shared_not_copied() {
    let model = model();
    let interpreter = interpreter(&model);
    let shared = interpreter.associations().unwrap();
    assert!(shared.ptr_eq(&model.context));
    assert_eq!(
        shared
            .borrow()
            .related(&AssociationKey::new("A"), &model.order, Direction::Forward)
            .into_values()
            .len(),
        2
    );
}
