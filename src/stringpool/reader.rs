//! Read-only view over a flattened string pool chunk.

use crate::{
    stringpool::writer::{RES_STRING_POOL_TYPE, SPAN_END, STRING_POOL_HEADER_SIZE, UTF8_FLAG},
    utils::{
        io::{read_le, read_le_at},
        to_usize,
    },
    Error::OutOfBounds,
    Result,
};

/// A borrowed view of a string pool chunk as produced by [`crate::stringpool::StringPool::flatten`].
///
/// Construction validates the header and the extents of both offset arrays. Individual
/// strings and style blocks are decoded on access.
///
/// # Examples
///
/// ```rust
/// use resforge::stringpool::{StringPool, StringPoolView};
///
/// let mut pool = StringPool::new();
/// let _hello = pool.make_ref("hello");
///
/// let data = StringPool::flatten(&pool, false)?;
/// let view = StringPoolView::from(&data)?;
/// assert_eq!(view.len(), 1);
/// assert_eq!(view.get(0)?, "hello");
/// # Ok::<(), resforge::Error>(())
/// ```
pub struct StringPoolView<'a> {
    data: &'a [u8],
    string_count: usize,
    style_count: usize,
    utf8: bool,
    strings_start: usize,
    styles_start: usize,
}

impl<'a> StringPoolView<'a> {
    /// Creates a view over `data`, which must start with a string pool chunk header.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the buffer is too short, or
    /// [`crate::Error::Malformed`] if the header is inconsistent.
    pub fn from(data: &'a [u8]) -> Result<StringPoolView<'a>> {
        let chunk_type: u16 = read_le(data)?;
        let mut offset = 2;
        let header_size: u16 = read_le_at(data, &mut offset)?;
        let size = to_usize(read_le_at::<u32>(data, &mut offset)?);
        let string_count = to_usize(read_le_at::<u32>(data, &mut offset)?);
        let style_count = to_usize(read_le_at::<u32>(data, &mut offset)?);
        let flags: u32 = read_le_at(data, &mut offset)?;
        let strings_start = to_usize(read_le_at::<u32>(data, &mut offset)?);
        let styles_start = to_usize(read_le_at::<u32>(data, &mut offset)?);

        if chunk_type != RES_STRING_POOL_TYPE {
            return Err(malformed_error!(
                "Invalid string pool chunk type 0x{:04X}",
                chunk_type
            ));
        }
        if header_size != STRING_POOL_HEADER_SIZE {
            return Err(malformed_error!(
                "Invalid string pool header size {}",
                header_size
            ));
        }
        if size > data.len() {
            return Err(malformed_error!(
                "String pool size {} exceeds buffer of {} bytes",
                size,
                data.len()
            ));
        }

        let offsets_end = string_count
            .checked_add(style_count)
            .and_then(|count| count.checked_mul(4))
            .and_then(|bytes| bytes.checked_add(usize::from(header_size)))
            .ok_or(OutOfBounds)?;
        if offsets_end > size || (string_count > 0 && strings_start > size) {
            return Err(malformed_error!(
                "String pool offset arrays exceed the chunk size {}",
                size
            ));
        }
        if style_count > 0 && styles_start > size {
            return Err(malformed_error!(
                "String pool styles start {} exceeds the chunk size {}",
                styles_start,
                size
            ));
        }

        Ok(StringPoolView {
            data: &data[..size],
            string_count,
            style_count,
            utf8: flags & UTF8_FLAG != 0,
            strings_start,
            styles_start,
        })
    }

    /// Returns the number of strings in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.string_count
    }

    /// Returns true if the pool holds no strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.string_count == 0
    }

    /// Returns the number of style blocks, including empty ones.
    #[must_use]
    pub fn style_count(&self) -> usize {
        self.style_count
    }

    /// Returns true if string data is stored as UTF-8.
    #[must_use]
    pub fn is_utf8(&self) -> bool {
        self.utf8
    }

    fn string_offset(&self, index: usize) -> Result<usize> {
        if index >= self.string_count {
            return Err(OutOfBounds);
        }

        let mut offset = usize::from(STRING_POOL_HEADER_SIZE) + index * 4;
        let relative: u32 = read_le_at(self.data, &mut offset)?;
        self.strings_start
            .checked_add(to_usize(relative))
            .ok_or(OutOfBounds)
    }

    /// Decodes the string at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if `index` or the string data lies outside the
    /// pool, or [`crate::Error::Malformed`] if the data is not valid for the encoding.
    pub fn get(&self, index: usize) -> Result<String> {
        let mut offset = self.string_offset(index)?;

        if self.utf8 {
            let _utf16_len = decode_length_u8(self.data, &mut offset)?;
            let byte_len = decode_length_u8(self.data, &mut offset)?;
            let end = offset.checked_add(byte_len).ok_or(OutOfBounds)?;
            let bytes = self.data.get(offset..end).ok_or(OutOfBounds)?;

            return String::from_utf8(bytes.to_vec())
                .map_err(|e| malformed_error!("Invalid UTF-8 in string {} - {}", index, e));
        }

        let unit_len = decode_length_u16(self.data, &mut offset)?;
        let mut units = Vec::with_capacity(unit_len);
        for _ in 0..unit_len {
            units.push(read_le_at::<u16>(self.data, &mut offset)?);
        }

        String::from_utf16(&units)
            .map_err(|e| malformed_error!("Invalid UTF-16 in string {} - {}", index, e))
    }

    /// Returns the spans of the style at `index` as `(name, first_char, last_char)` triples.
    ///
    /// Strings past the last style block have no style and yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::OutOfBounds`] if the style block runs past the chunk.
    pub fn spans(&self, index: usize) -> Result<Vec<(u32, u32, u32)>> {
        if index >= self.style_count {
            return Ok(Vec::new());
        }

        let mut offset = usize::from(STRING_POOL_HEADER_SIZE) + (self.string_count + index) * 4;
        let relative: u32 = read_le_at(self.data, &mut offset)?;
        let mut offset = self
            .styles_start
            .checked_add(to_usize(relative))
            .ok_or(OutOfBounds)?;

        let mut spans = Vec::new();
        loop {
            let name: u32 = read_le_at(self.data, &mut offset)?;
            if name == SPAN_END {
                return Ok(spans);
            }
            let first: u32 = read_le_at(self.data, &mut offset)?;
            let last: u32 = read_le_at(self.data, &mut offset)?;
            spans.push((name, first, last));
        }
    }
}

fn decode_length_u8(data: &[u8], offset: &mut usize) -> Result<usize> {
    let first: u8 = read_le_at(data, offset)?;
    if first & 0x80 == 0 {
        return Ok(usize::from(first));
    }

    let second: u8 = read_le_at(data, offset)?;
    Ok((usize::from(first & 0x7F) << 8) | usize::from(second))
}

fn decode_length_u16(data: &[u8], offset: &mut usize) -> Result<usize> {
    let first: u16 = read_le_at(data, offset)?;
    if first & 0x8000 == 0 {
        return Ok(usize::from(first));
    }

    let second: u16 = read_le_at(data, offset)?;
    Ok((usize::from(first & 0x7FFF) << 16) | usize::from(second))
}
