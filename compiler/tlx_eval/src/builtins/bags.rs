//! `_Bags` built-ins.

use tlx_values::{BagValue, Value};

use super::{bag_arg, count_value, set_arg, BuiltinRegistry};
use crate::errors::EvalResult;

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry.register("Bags", "SetToBag", 1, set_to_bag);
    registry.register("Bags", "BagToSet", 1, bag_to_set);
    registry.register("Bags", "CopiesIn", 2, copies_in);
    registry.register("Bags", "BagIn", 2, bag_in);
    registry.register("Bags", "BagCardinality", 1, bag_cardinality);
    registry.register("Bags", "EmptyBag", 0, empty_bag);
}

fn set_to_bag(args: &[Value]) -> EvalResult {
    Ok(Value::Bag(BagValue::from_set(set_arg(args, 0)?)?))
}

fn bag_to_set(args: &[Value]) -> EvalResult {
    Ok(Value::Set(bag_arg(args, 0)?.to_set()))
}

/// `CopiesIn(e, B)`: occurrences of `e` in `B`.
fn copies_in(args: &[Value]) -> EvalResult {
    Ok(count_value(bag_arg(args, 1)?.count(&args[0])))
}

/// `BagIn(e, B)`: whether `e` occurs at least once.
fn bag_in(args: &[Value]) -> EvalResult {
    Ok(Value::Bool(bag_arg(args, 1)?.contains(&args[0])))
}

fn bag_cardinality(args: &[Value]) -> EvalResult {
    Ok(count_value(bag_arg(args, 0)?.cardinality()))
}

fn empty_bag(_args: &[Value]) -> EvalResult {
    Ok(Value::Bag(BagValue::new()))
}
