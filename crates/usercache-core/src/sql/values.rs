use crate::sql::ComposeError;
use derive_more::{Deref, IntoIterator};
use sea_query::{Value, Values};

///
/// BoundArgs
///
/// Positional arguments in the order their `?` placeholders appear.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct BoundArgs(Vec<String>);

impl BoundArgs {
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Text form of the values collected while building a statement.
    pub(crate) fn from_values(values: Values) -> Result<Self, ComposeError> {
        values
            .0
            .into_iter()
            .map(value_text)
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl From<Vec<String>> for BoundArgs {
    fn from(args: Vec<String>) -> Self {
        Self(args)
    }
}

// Composed statements only bind text and row counts.
fn value_text(value: Value) -> Result<String, ComposeError> {
    match value {
        Value::String(Some(s)) => Ok(*s),
        Value::Int(Some(n)) => Ok(n.to_string()),
        Value::BigInt(Some(n)) => Ok(n.to_string()),
        Value::Unsigned(Some(n)) => Ok(n.to_string()),
        Value::BigUnsigned(Some(n)) => Ok(n.to_string()),
        other => Err(ComposeError::UnsupportedValue(format!("{other:?}"))),
    }
}
