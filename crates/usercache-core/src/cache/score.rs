use crate::cache::schema::{cached_relationships as rel, relationship_column};
use sea_query::{BinOper, Expr, SimpleExpr};
use serde::{Deserialize, Serialize};

/// Alias of the computed score column.
pub const SCORE_COLUMN: &str = "score";

///
/// ScoreWeights
///
/// Per-flag weights of the relevance score. A flag that is NULL (no
/// relationship row, or unknown) counts as 0.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    pub following: i64,
    pub notifications_enabled: i64,
    pub followed_by: i64,
    pub blocking: i64,
    pub blocked_by: i64,
    pub muting: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            following: 100,
            notifications_enabled: 50,
            followed_by: 50,
            blocking: -100,
            blocked_by: -100,
            muting: -100,
        }
    }
}

impl ScoreWeights {
    const fn terms(&self) -> [(&'static str, i64); 6] {
        [
            (rel::FOLLOWING, self.following),
            (rel::NOTIFICATIONS_ENABLED, self.notifications_enabled),
            (rel::FOLLOWED_BY, self.followed_by),
            (rel::BLOCKING, self.blocking),
            (rel::BLOCKED_BY, self.blocked_by),
            (rel::MUTING, self.muting),
        ]
    }

    /// SQL expression computing the score from relationship columns.
    ///
    /// Each flag reads as `CASE WHEN flag IS NULL THEN 0 ELSE flag END`.
    /// Weights render as literals, never as bound arguments, and a negative
    /// weight after the first term becomes a subtraction.
    #[must_use]
    pub fn expr(&self) -> SimpleExpr {
        let mut terms = self.terms().into_iter();
        let Some((name, weight)) = terms.next() else {
            return Expr::cust("0");
        };

        let mut sum = weighted_flag(name, weight);
        for (name, weight) in terms {
            sum = if weight < 0 {
                sum.binary(BinOper::Sub, weighted_flag(name, weight.saturating_neg()))
            } else {
                sum.binary(BinOper::Add, weighted_flag(name, weight))
            };
        }

        sum
    }

    /// Score for one set of flags, matching what [`Self::expr`] evaluates to.
    #[must_use]
    pub fn score(&self, flags: &RelationshipFlags) -> i64 {
        let values = [
            flags.following,
            flags.notifications_enabled,
            flags.followed_by,
            flags.blocking,
            flags.blocked_by,
            flags.muting,
        ];

        self.terms()
            .iter()
            .zip(values)
            .map(|((_, weight), value)| weight.saturating_mul(i64::from(value.unwrap_or(false))))
            .fold(0, i64::saturating_add)
    }
}

///
/// RelationshipFlags
///
/// Relationship flags as read from a (possibly missing) relationship row.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RelationshipFlags {
    pub following: Option<bool>,
    pub notifications_enabled: Option<bool>,
    pub followed_by: Option<bool>,
    pub blocking: Option<bool>,
    pub blocked_by: Option<bool>,
    pub muting: Option<bool>,
}

fn weighted_flag(name: &str, weight: i64) -> SimpleExpr {
    let flag = || Expr::col(relationship_column(name));
    let value = Expr::case(flag().is_null(), Expr::cust("0")).finally(flag());

    Into::<SimpleExpr>::into(value).binary(BinOper::Mul, Expr::cust(weight.to_string()))
}
