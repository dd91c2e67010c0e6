//! Little-endian reading and writing helpers for the binary string pool.
//!
//! The flattened pool format is little-endian throughout. The writer first reserves the
//! fixed-size header and offset arrays and later patches them in place, while the reader
//! walks the same structures sequentially. Both go through the bounds-checked functions in
//! this module.
//!
//! # Key Components
//!
//! - [`crate::utils::io::PoolIO`] - Trait implemented by the primitive types the format uses
//! - [`crate::utils::io::read_le_at`] - Read a value at an offset and advance the offset
//! - [`crate::utils::io::write_le_at`] - Overwrite a value at an offset and advance the offset
//! - [`crate::utils::io::push_le`] - Append a value to a growable buffer
//!
//! # Usage Examples
//!
//! ```rust,ignore
//! use resforge::utils::io::{push_le, read_le_at, write_le_at};
//!
//! let mut buffer = Vec::new();
//! push_le(&mut buffer, 0u32);
//! push_le(&mut buffer, 2u16);
//!
//! let mut offset = 0;
//! write_le_at(&mut buffer, &mut offset, 7u32)?;
//!
//! let mut offset = 0;
//! let first: u32 = read_le_at(&buffer, &mut offset)?;
//! let second: u16 = read_le_at(&buffer, &mut offset)?;
//! assert_eq!((first, second), (7, 2));
//! # Ok::<(), resforge::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Trait for the primitive types that appear in the binary string pool.
///
/// Implemented for `u8`, `u16` and `u32`, the only widths the pool header, offset arrays,
/// length prefixes and span records use.
pub trait PoolIO: Sized + Copy {
    /// Associated type representing the byte array type for this numeric type.
    type Bytes: Sized + AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Read T from a byte buffer in little-endian
    fn from_le_bytes(bytes: Self::Bytes) -> Self;

    /// Write T to a byte buffer in little-endian
    fn to_le_bytes(self) -> Self::Bytes;
}

macro_rules! impl_pool_io {
    ($($ty:ty => $len:expr),* $(,)?) => {
        $(
            impl PoolIO for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }
            }
        )*
    };
}

impl_pool_io!(u8 => 1, u16 => 2, u32 => 4);

/// Safely reads a value of type `T` in little-endian byte order from the start of `data`.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le<T: PoolIO>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Safely reads a value of type `T` in little-endian byte order at `offset`, advancing the
/// offset by the number of bytes read.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn read_le_at<T: PoolIO>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let end = offset.checked_add(type_len).ok_or(OutOfBounds)?;
    if end > data.len() {
        return Err(OutOfBounds);
    }

    let Ok(read) = data[*offset..end].try_into() else {
        return Err(OutOfBounds);
    };

    *offset = end;

    Ok(T::from_le_bytes(read))
}

/// Safely overwrites a value of type `T` in little-endian byte order at `offset`, advancing
/// the offset by the number of bytes written.
///
/// # Errors
///
/// Returns [`crate::Error::OutOfBounds`] if there are insufficient bytes.
pub fn write_le_at<T: PoolIO>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let type_len = std::mem::size_of::<T>();
    let end = offset.checked_add(type_len).ok_or(OutOfBounds)?;
    if end > data.len() {
        return Err(OutOfBounds);
    }

    data[*offset..end].copy_from_slice(value.to_le_bytes().as_ref());
    *offset = end;

    Ok(())
}

/// Appends a value of type `T` in little-endian byte order to the end of `data`.
pub fn push_le<T: PoolIO>(data: &mut Vec<u8>, value: T) {
    data.extend_from_slice(value.to_le_bytes().as_ref());
}

/// Pads `data` with `fill` bytes until its length is a multiple of four.
pub fn align4(data: &mut Vec<u8>, fill: u8) {
    while data.len() % 4 != 0 {
        data.push(fill);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_le_values() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
        let mut offset = 0;

        let first: u16 = read_le_at(&data, &mut offset).unwrap();
        let second: u16 = read_le_at(&data, &mut offset).unwrap();
        let third: u32 = read_le_at(&data, &mut offset).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(third, 3);
        assert_eq!(offset, 8);
    }

    #[test]
    fn read_out_of_bounds() {
        let data = [0x01, 0x00, 0x02];
        let mut offset = 0;
        assert!(read_le_at::<u32>(&data, &mut offset).is_err());
        assert_eq!(offset, 0);

        let mut offset = usize::MAX;
        assert!(read_le_at::<u8>(&data, &mut offset).is_err());
    }

    #[test]
    fn write_and_patch() {
        let mut data = Vec::new();
        push_le(&mut data, 0u32);
        push_le(&mut data, 0xBEEFu16);
        assert_eq!(data.len(), 6);

        let mut offset = 0;
        write_le_at(&mut data, &mut offset, 0x0102_0304u32).unwrap();
        assert_eq!(offset, 4);
        assert_eq!(data, [0x04, 0x03, 0x02, 0x01, 0xEF, 0xBE]);

        let mut offset = 4;
        assert!(write_le_at(&mut data, &mut offset, 1u32).is_err());
    }

    #[test]
    fn alignment() {
        let mut data = vec![1, 2, 3, 4, 5];
        align4(&mut data, 0xFF);
        assert_eq!(data, [1, 2, 3, 4, 5, 0xFF, 0xFF, 0xFF]);

        align4(&mut data, 0);
        assert_eq!(data.len(), 8);
        assert_eq!(read_le::<u8>(&data).unwrap(), 1);
    }
}
