use crate::serialize::{ParcelError, ParcelReader, ParcelWriter, Parcelable, from_parcel, to_parcel};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// RangeIndices
///
/// Start/end offsets of a span inside a text (hashtag, mention, url).
/// Whether the range is half-open or closed is up to the caller, and
/// `start <= end` is not enforced; reversed ranges pass through untouched.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RangeIndices {
    start: i32,
    end: i32,
}

impl RangeIndices {
    /// Size of the parcel record: two `i32`s.
    pub const PARCEL_SIZE: usize = 8;

    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn start(&self) -> i32 {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> i32 {
        self.end
    }

    /// Encode as a parcel record: `start` then `end`, little-endian.
    #[must_use]
    pub fn to_parcel(&self) -> Vec<u8> {
        to_parcel(self)
    }

    /// Decode a record produced by [`Self::to_parcel`].
    pub fn from_parcel(bytes: &[u8]) -> Result<Self, ParcelError> {
        from_parcel(bytes)
    }
}

impl Parcelable for RangeIndices {
    fn write_to(&self, dest: &mut ParcelWriter) {
        dest.write_i32(self.start);
        dest.write_i32(self.end);
    }

    fn read_from(source: &mut ParcelReader<'_>) -> Result<Self, ParcelError> {
        let start = source.read_i32()?;
        let end = source.read_i32()?;

        Ok(Self { start, end })
    }
}

impl fmt::Display for RangeIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Index{{start={}, end={}}}", self.start, self.end)
    }
}
