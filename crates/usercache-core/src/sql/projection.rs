use sea_query::{Asterisk, Expr, SelectStatement};

///
/// Projection
///
/// Result columns requested by a caller. `All` renders `*`; named columns
/// are trusted SQL and may be table-qualified (`cached_users.name`).
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Projection {
    #[default]
    All,
    Columns(Vec<String>),
}

impl Projection {
    /// Projection over the given names; no names selects everything.
    pub fn columns<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            Self::All
        } else {
            Self::Columns(names)
        }
    }

    /// Projection from an optional list of column names; `None` or an
    /// empty list selects everything.
    #[must_use]
    pub fn from_names(names: Option<&[&str]>) -> Self {
        names.map_or(Self::All, |names| Self::columns(names.iter().copied()))
    }

    pub(crate) fn apply(&self, select: &mut SelectStatement) {
        match self {
            Self::All => {
                select.column(Asterisk);
            }
            Self::Columns(names) => {
                for name in names {
                    select.expr(Expr::cust(name.as_str()));
                }
            }
        }
    }
}
