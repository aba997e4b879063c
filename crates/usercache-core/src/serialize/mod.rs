//! Module: serialize
//! Responsibility: the fixed-width parcel record format for values that
//! cross process boundaries.
//! Does not own: SQL composition or storage.

mod parcel;


pub use parcel::{ParcelError, ParcelReader, ParcelWriter, Parcelable};

/// Encode a value into a standalone parcel record.
#[must_use]
pub fn to_parcel<T: Parcelable>(value: &T) -> Vec<u8> {
    let mut writer = ParcelWriter::new();
    value.write_to(&mut writer);

    writer.into_bytes()
}

/// Decode a standalone parcel record, rejecting trailing bytes.
pub fn from_parcel<T: Parcelable>(bytes: &[u8]) -> Result<T, ParcelError> {
    let mut reader = ParcelReader::new(bytes);
    let value = T::read_from(&mut reader)?;
    reader.finish()?;

    Ok(value)
}
