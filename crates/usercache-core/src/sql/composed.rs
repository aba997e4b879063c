use crate::sql::{BoundArgs, ComposeError, count_placeholders};
use sea_query::{QueryStatementWriter, SelectStatement, SqliteQueryBuilder};
use sha2::{Digest, Sha256};
use std::fmt;

///
/// ComposedQuery
///
/// A SELECT statement together with its rendered SQLite text and positional
/// arguments. Construction checks that the argument count matches the
/// placeholders in the text.
///

#[derive(Clone, Debug)]
pub struct ComposedQuery {
    query: SelectStatement,
    sql: String,
    args: BoundArgs,
}

impl ComposedQuery {
    pub fn from_select(query: SelectStatement) -> Result<Self, ComposeError> {
        let (sql, values) = query.build(SqliteQueryBuilder);
        let args = BoundArgs::from_values(values)?;

        let placeholders = count_placeholders(&sql);
        if placeholders != args.len() {
            return Err(ComposeError::ArgumentCountMismatch {
                placeholders,
                args: args.len(),
            });
        }

        Ok(Self { query, sql, args })
    }

    #[must_use]
    pub const fn query(&self) -> &SelectStatement {
        &self.query
    }

    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    #[must_use]
    pub const fn args(&self) -> &BoundArgs {
        &self.args
    }

    #[must_use]
    pub fn into_parts(self) -> (SelectStatement, String, Vec<String>) {
        (self.query, self.sql, self.args.into_vec())
    }

    /// Stable hash of text and arguments, suitable as a statement cache key.
    #[must_use]
    pub fn fingerprint(&self) -> QueryFingerprint {
        let mut hasher = Sha256::new();
        write_str(&mut hasher, &self.sql);
        write_u32(&mut hasher, len_u32(self.args.len()));
        for arg in &self.args {
            write_str(&mut hasher, arg);
        }

        QueryFingerprint(hasher.finalize().into())
    }
}

///
/// QueryFingerprint
///

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct QueryFingerprint([u8; 32]);

impl QueryFingerprint {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for QueryFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

// Length-prefixed so ("ab", "c") and ("a", "bc") hash differently.
fn write_str(hasher: &mut Sha256, s: &str) {
    write_u32(hasher, len_u32(s.len()));
    hasher.update(s.as_bytes());
}

fn write_u32(hasher: &mut Sha256, n: u32) {
    hasher.update(n.to_be_bytes());
}

fn len_u32(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
