use thiserror::Error as ThisError;

const I32_SIZE: usize = size_of::<i32>();

///
/// ParcelError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ParcelError {
    #[error("parcel ended early: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("parcel has {0} trailing bytes")]
    TrailingBytes(usize),
}

///
/// Parcelable
///
/// A value with a flat, fixed-order binary record.
/// Fields are written in declaration order; `read_from` must consume exactly
/// what `write_to` produced.
///

pub trait Parcelable: Sized {
    fn write_to(&self, dest: &mut ParcelWriter);

    fn read_from(source: &mut ParcelReader<'_>) -> Result<Self, ParcelError>;
}

///
/// ParcelWriter
///

#[derive(Debug, Default)]
pub struct ParcelWriter {
    bytes: Vec<u8>,
}

impl ParcelWriter {
    #[must_use]
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

///
/// ParcelReader
///

#[derive(Debug)]
pub struct ParcelReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> ParcelReader<'a> {
    #[must_use]
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn read_i32(&mut self) -> Result<i32, ParcelError> {
        let chunk = self.take(I32_SIZE)?;
        let mut raw = [0u8; I32_SIZE];
        raw.copy_from_slice(chunk);

        Ok(i32::from_le_bytes(raw))
    }

    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Succeed only when every byte has been consumed.
    pub const fn finish(self) -> Result<(), ParcelError> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(ParcelError::TrailingBytes(n)),
        }
    }

    fn take(&mut self, needed: usize) -> Result<&'a [u8], ParcelError> {
        let remaining = self.remaining();
        if remaining < needed {
            return Err(ParcelError::UnexpectedEof { needed, remaining });
        }

        let chunk = &self.bytes[self.offset..self.offset + needed];
        self.offset += needed;

        Ok(chunk)
    }
}
