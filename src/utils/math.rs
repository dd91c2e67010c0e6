//! Checked integer conversions for the binary pool writer.

use crate::Result;

/// Converts a `usize` to `u32` for pool serialization, returning an error if the value
/// exceeds `u32::MAX`. Offsets, counts and indices in the pool format are all 32-bit.
///
/// # Errors
///
/// Returns an error if `value` exceeds `u32::MAX`.
pub fn to_u32(value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| malformed_error!("String pool value {value} exceeds u32::MAX"))
}

/// Converts a `u32` read from a flattened pool into a `usize` index.
#[must_use]
#[inline]
pub fn to_usize(value: u32) -> usize {
    value as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_u32_valid() {
        assert_eq!(to_u32(0).unwrap(), 0);
        assert_eq!(to_u32(1).unwrap(), 1);
        assert_eq!(to_u32(u32::MAX as usize).unwrap(), u32::MAX);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_to_u32_overflow() {
        assert!(to_u32(u32::MAX as usize + 1).is_err());
        assert!(to_u32(usize::MAX).is_err());
    }

    #[test]
    fn test_to_usize() {
        assert_eq!(to_usize(42), 42);
    }
}
