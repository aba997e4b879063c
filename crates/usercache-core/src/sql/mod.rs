//! Module: sql
//! Responsibility: glue between caller-supplied SQL pieces and `sea_query`
//! statements, and the bound-argument contract of a composed query.
//! Does not own: table layout or what any particular query means.
//! Boundary: statements are rendered with `SqliteQueryBuilder`; nothing
//! here executes them.
//!
//! Caller filters travel as a `Fragment` (text plus its arguments, checked
//! on construction) and are spliced with `Expr::cust_with_values`, so each
//! argument is bound at the position of its `?`.

mod composed;
mod fragment;
mod order;
mod placeholder;
mod projection;
mod values;


pub use composed::{ComposedQuery, QueryFingerprint};
pub use fragment::Fragment;
pub use order::OrderBy;
pub use placeholder::count_placeholders;
pub use projection::Projection;
pub use values::BoundArgs;

use thiserror::Error as ThisError;

///
/// ComposeError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ComposeError {
    #[error("argument count mismatch: {placeholders} placeholders, {args} arguments")]
    ArgumentCountMismatch { placeholders: usize, args: usize },

    #[error("bound value cannot be passed as a text argument: {0}")]
    UnsupportedValue(String),
}
