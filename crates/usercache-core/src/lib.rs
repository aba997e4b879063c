//! Core runtime for usercache: SQL composition over the cached-user tables,
//! text-span value types, and the byte formats they travel in.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod cache;
pub mod error;
pub mod obs;
pub mod serialize;
pub mod sql;
pub mod types;

///
/// Prelude
///
/// Domain vocabulary only. No errors, sinks or serializers.
///

pub mod prelude {
    pub use crate::{
        cache::{ScoreWeights, with_relationship, with_score},
        sql::{ComposedQuery, OrderBy, Projection},
        types::{AccountKey, RangeIndices, UserScope},
    };
}
