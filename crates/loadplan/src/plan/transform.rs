use crate::value::Value;

///
/// RowTransformer
///
/// Caller-supplied row reshaping. When a transformer is active the full
/// column array is always passed through, and the result is an opaque holder
/// object: typed column access is no longer possible.
///

pub trait RowTransformer {
    fn transform(&self, values: Vec<Value>, aliases: &[String]) -> Value;
}

///
/// TupleTransformer
///
/// Wraps the column array in a tuple holder. The simplest constructor-style
/// transform; useful as a default holder shape and in tests.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TupleTransformer;

impl RowTransformer for TupleTransformer {
    fn transform(&self, values: Vec<Value>, _aliases: &[String]) -> Value {
        Value::Tuple(values)
    }
}
