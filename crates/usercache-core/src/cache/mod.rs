//! Module: cache
//! Responsibility: queries over the cached-users and cached-relationships
//! tables, scoped to one account.
//! Does not own: SQL rendering (`sql`) or executing statements.

pub mod schema;
mod score;
mod users;

#[cfg(test)]
mod tests;

pub use score::{RelationshipFlags, SCORE_COLUMN, ScoreWeights};
pub use users::{with_relationship, with_score, with_score_weighted};
