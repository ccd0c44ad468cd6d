//! `_Seq`, `_Stack`, `_Queue` and `_Sets` built-ins.
//!
//! Every operation returns a new value; arguments are never modified.

use tlx_values::Value;

use super::{count_value, position_arg, set_arg, tuple_arg, BuiltinRegistry};
use crate::errors::EvalResult;

pub(super) fn register(registry: &mut BuiltinRegistry) {
    registry.register("Seq", "Head", 1, seq_head);
    registry.register("Seq", "Tail", 1, seq_tail);
    registry.register("Seq", "Append", 2, seq_append);
    registry.register("Seq", "Len", 1, seq_len);
    registry.register("Seq", "Concat", 2, seq_concat);
    registry.register("Seq", "SubSeq", 3, seq_subseq);
    registry.register("Seq", "Reverse", 1, seq_reverse);
    registry.register("Seq", "Contains", 2, seq_contains);
    registry.register("Seq", "IsEmpty", 1, seq_is_empty);

    registry.register("Stack", "Push", 2, stack_push);
    registry.register("Stack", "Pop", 1, stack_pop);
    registry.register("Stack", "Top", 1, stack_top);
    registry.register("Stack", "IsEmpty", 1, seq_is_empty);

    registry.register("Queue", "Enqueue", 2, queue_enqueue);
    registry.register("Queue", "Dequeue", 1, queue_dequeue);
    registry.register("Queue", "Front", 1, queue_front);
    registry.register("Queue", "IsEmpty", 1, seq_is_empty);

    registry.register("Sets", "Cardinality", 1, set_cardinality);
}

// Sequences

fn seq_head(args: &[Value]) -> EvalResult {
    tuple_arg(args, 0)?.head().cloned()
}

fn seq_tail(args: &[Value]) -> EvalResult {
    Ok(Value::Tuple(tuple_arg(args, 0)?.tail()?))
}

fn seq_append(args: &[Value]) -> EvalResult {
    let mut seq = tuple_arg(args, 0)?.clone();
    seq.append(args[1].clone());
    Ok(Value::Tuple(seq))
}

fn seq_len(args: &[Value]) -> EvalResult {
    Ok(count_value(tuple_arg(args, 0)?.len()))
}

fn seq_concat(args: &[Value]) -> EvalResult {
    let left = tuple_arg(args, 0)?;
    let right = tuple_arg(args, 1)?;
    Ok(Value::Tuple(left.concat(right)))
}

fn seq_subseq(args: &[Value]) -> EvalResult {
    let seq = tuple_arg(args, 0)?;
    let from = position_arg(args, 1)?;
    let to = position_arg(args, 2)?;
    Ok(Value::Tuple(seq.subseq(from, to)?))
}

fn seq_reverse(args: &[Value]) -> EvalResult {
    Ok(Value::Tuple(tuple_arg(args, 0)?.reverse()))
}

fn seq_contains(args: &[Value]) -> EvalResult {
    Ok(Value::Bool(tuple_arg(args, 0)?.contains(&args[1])))
}

fn seq_is_empty(args: &[Value]) -> EvalResult {
    Ok(Value::Bool(tuple_arg(args, 0)?.is_empty()))
}

// Stacks: the top is the last element.

fn stack_push(args: &[Value]) -> EvalResult {
    let mut stack = tuple_arg(args, 0)?.clone();
    stack.push(args[1].clone());
    Ok(Value::Tuple(stack))
}

fn stack_pop(args: &[Value]) -> EvalResult {
    let mut stack = tuple_arg(args, 0)?.clone();
    stack.pop()?;
    Ok(Value::Tuple(stack))
}

fn stack_top(args: &[Value]) -> EvalResult {
    tuple_arg(args, 0)?.top().cloned()
}

// Queues: enqueue at the end, dequeue from the front.

fn queue_enqueue(args: &[Value]) -> EvalResult {
    let mut queue = tuple_arg(args, 0)?.clone();
    queue.enqueue(args[1].clone());
    Ok(Value::Tuple(queue))
}

fn queue_dequeue(args: &[Value]) -> EvalResult {
    let mut queue = tuple_arg(args, 0)?.clone();
    queue.dequeue()?;
    Ok(Value::Tuple(queue))
}

fn queue_front(args: &[Value]) -> EvalResult {
    tuple_arg(args, 0)?.front().cloned()
}

// Sets

fn set_cardinality(args: &[Value]) -> EvalResult {
    Ok(count_value(set_arg(args, 0)?.len()?))
}
