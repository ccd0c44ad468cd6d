//! Runtime values and evaluation errors for the tlx evaluator.
//!
//! - `Value`: the closed set of runtime kinds (Number, Boolean, String,
//!   Set, Bag, Tuple, Record, Error)
//! - `Number`: exact rationals with a contaminating `Real` approximation
//! - `EvalError`/`EvalErrorKind`: structured failures and their factories

pub mod errors;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalNote, EvalResult, Side};
pub use value::{
    BagValue, Identity, InfiniteDomain, Number, NumberKind, RecordValue, SetValue, TupleValue,
    Value, ValueKind,
};
