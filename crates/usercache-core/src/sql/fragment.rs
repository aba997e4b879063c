use crate::sql::{ComposeError, count_placeholders};
use sea_query::{Expr, SimpleExpr};

///
/// Fragment
///
/// Trusted SQL text paired with the arguments for its `?` placeholders.
/// The pairing is checked once, here, so a fragment can be spliced anywhere
/// without further bookkeeping.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fragment {
    sql: String,
    args: Vec<String>,
}

impl Fragment {
    pub fn new(sql: impl Into<String>, args: Vec<String>) -> Result<Self, ComposeError> {
        let sql = sql.into();
        let placeholders = count_placeholders(&sql);
        if placeholders != args.len() {
            return Err(ComposeError::ArgumentCountMismatch {
                placeholders,
                args: args.len(),
            });
        }

        Ok(Self { sql, args })
    }

    /// Build from the optional `(text, args)` shape callers usually carry.
    ///
    /// Arguments without text are a mismatch, not something to drop.
    pub fn from_optional(
        sql: Option<&str>,
        args: &[String],
    ) -> Result<Option<Self>, ComposeError> {
        match sql {
            Some(sql) => Self::new(sql, args.to_vec()).map(Some),
            None if args.is_empty() => Ok(None),
            None => Err(ComposeError::ArgumentCountMismatch {
                placeholders: 0,
                args: args.len(),
            }),
        }
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Parenthesized expression with the arguments bound in place.
    ///
    /// The closing paren sits on its own line so a trailing `--` comment in
    /// the text cannot swallow it.
    #[must_use]
    pub fn to_expr(&self) -> SimpleExpr {
        Expr::cust_with_values(format!("({}\n)", self.sql), self.args.iter().cloned())
    }
}
