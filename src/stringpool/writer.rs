//! Binary string pool serialization.
//!
//! The layout is the runtime's string pool chunk, little-endian throughout:
//!
//! ```text
//! header        type=0x0001 u16, headerSize=28 u16, size u32, stringCount u32,
//!               styleCount u32, flags u32, stringsStart u32, stylesStart u32
//! string index  stringCount x u32 byte offsets relative to stringsStart
//! style index   styleCount  x u32 byte offsets relative to stylesStart
//! strings       length prefixed, NUL terminated, then padded to 4 bytes
//! styles        per style: (name, firstChar, lastChar) x u32 spans, then END
//! trailer       8 x 0xFF when styles exist, padded to 4 bytes
//! ```
//!
//! Style `i` belongs to string `i`. Strings without a style below the highest styled index
//! get a block holding only `END`, so `styleCount` is the highest styled index plus one.

use crate::{
    stringpool::{StringPool, StyleEntry},
    utils::{
        io::{align4, push_le, write_le_at},
        to_u32,
    },
    Error, Result,
};

/// Chunk type of a string pool.
pub(crate) const RES_STRING_POOL_TYPE: u16 = 0x0001;
/// Size of the string pool chunk header.
pub(crate) const STRING_POOL_HEADER_SIZE: u16 = 28;
/// Header flag marking UTF-8 string data.
pub(crate) const UTF8_FLAG: u32 = 0x100;
/// Terminator of a style's span list.
pub(crate) const SPAN_END: u32 = 0xFFFF_FFFF;

/// Appends a length prefix made of 8-bit units.
///
/// Lengths up to 0x7F take one unit. Longer ones take two: the first has the high bit set and
/// holds the upper bits, the second the low eight bits.
fn encode_length_u8(out: &mut Vec<u8>, length: usize) -> Result<()> {
    const MASK: usize = 0x80;
    const MAX_SIZE: usize = MASK - 1;

    if length > 0x7FFF {
        return Err(Error::StringTooLong(length));
    }
    if length > MAX_SIZE {
        out.push((MASK | (MAX_SIZE & (length >> 8))) as u8);
    }
    out.push((length & 0xFF) as u8);
    Ok(())
}

/// Appends a length prefix made of 16-bit units, see [`encode_length_u8`].
fn encode_length_u16(out: &mut Vec<u8>, length: usize) -> Result<()> {
    const MASK: usize = 0x8000;
    const MAX_SIZE: usize = MASK - 1;

    if length > 0x7FFF_FFFF {
        return Err(Error::StringTooLong(length));
    }
    if length > MAX_SIZE {
        push_le(out, (MASK | (MAX_SIZE & (length >> 16))) as u16);
    }
    push_le(out, (length & 0xFFFF) as u16);
    Ok(())
}

impl StringPool {
    /// Serializes `pool` into a new buffer.
    ///
    /// # Arguments
    ///
    /// * `pool` - The pool to serialize
    /// * `utf8` - Store string data as UTF-8 instead of UTF-16
    ///
    /// # Errors
    ///
    /// Returns [`Error::StringTooLong`] if a string cannot be length-prefixed, or an error if
    /// an offset exceeds 32 bits.
    pub fn flatten(pool: &StringPool, utf8: bool) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        Self::flatten_into(&mut out, pool, utf8)?;
        Ok(out)
    }

    /// Serializes `pool` at the end of `out`.
    ///
    /// Offsets in the chunk are relative to where it starts in `out`. On error, `out` may
    /// hold a partial chunk.
    ///
    /// # Errors
    ///
    /// See [`StringPool::flatten`].
    pub fn flatten_into(out: &mut Vec<u8>, pool: &StringPool, utf8: bool) -> Result<()> {
        let start = out.len();

        let mut styles: Vec<&StyleEntry> = pool.styles().collect();
        styles.sort_by_key(|style| style.str().index());
        let style_count = styles.last().map_or(0, |style| style.str().index() + 1);

        // header and both offset arrays, patched once the data is written
        let header_size = usize::from(STRING_POOL_HEADER_SIZE);
        out.resize(start + header_size + 4 * (pool.len() + style_count), 0);

        let strings_start = out.len();
        let mut string_offsets = Vec::with_capacity(pool.len());
        for entry in pool.iter() {
            string_offsets.push(to_u32(out.len() - strings_start)?);

            let value = entry.value();
            if utf8 {
                let encoded = value.to_string_lossy();
                encode_length_u8(out, value.len())?;
                encode_length_u8(out, encoded.len())?;
                out.extend_from_slice(encoded.as_bytes());
                out.push(0);
            } else {
                encode_length_u16(out, value.len())?;
                for unit in value.as_slice() {
                    push_le(out, *unit);
                }
                push_le(out, 0u16);
            }
        }
        align4(out, 0);

        let mut style_offsets = Vec::with_capacity(style_count);
        let styles_start = out.len();
        if !styles.is_empty() {
            for style in &styles {
                while style.str().index() > style_offsets.len() {
                    style_offsets.push(to_u32(out.len() - styles_start)?);
                    push_le(out, SPAN_END);
                }
                style_offsets.push(to_u32(out.len() - styles_start)?);

                for span in style.spans() {
                    push_le(out, to_u32(span.name.index())?);
                    push_le(out, span.first_char);
                    push_le(out, span.last_char);
                }
                push_le(out, SPAN_END);
            }

            // a consumer reads a whole span past the last END
            out.extend_from_slice(&[0xFF; 8]);
            align4(out, 0);
        }

        let mut flags = 0;
        if utf8 {
            flags |= UTF8_FLAG;
        }

        let mut offset = start;
        write_le_at(out, &mut offset, RES_STRING_POOL_TYPE)?;
        write_le_at(out, &mut offset, STRING_POOL_HEADER_SIZE)?;
        let chunk_size = to_u32(out.len() - start)?;
        write_le_at(out, &mut offset, chunk_size)?;
        write_le_at(out, &mut offset, to_u32(pool.len())?)?;
        write_le_at(out, &mut offset, to_u32(style_count)?)?;
        write_le_at(out, &mut offset, flags)?;
        write_le_at(out, &mut offset, to_u32(strings_start - start)?)?;
        let styles_start_field = if styles.is_empty() {
            0
        } else {
            to_u32(styles_start - start)?
        };
        write_le_at(out, &mut offset, styles_start_field)?;

        for string_offset in string_offsets {
            write_le_at(out, &mut offset, string_offset)?;
        }
        for style_offset in style_offsets {
            write_le_at(out, &mut offset, style_offset)?;
        }

        Ok(())
    }
}
