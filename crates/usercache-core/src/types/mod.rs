//! Module: types
//! Responsibility: small domain value types shared by the composer and callers.

mod account_key;
mod range_indices;


pub use account_key::{AccountKey, AccountKeyParseError, UserScope};
pub use range_indices::RangeIndices;
