//! Locale qualifiers.
//!
//! A locale occupies one or two qualifier tokens. The legacy form is a 2-3 letter language
//! optionally followed by an `r`-prefixed region (`en`, `en-rUS`, `fil-rPH`). The modified
//! BCP 47 form is a single token starting with `b+` whose subtags are separated by `+`
//! (`b+sr+Latn`, `b+es+419`, `b+de+Latn+DE+1901`).
//!
//! Languages and regions are stored packed into two bytes the way the runtime stores them:
//! two-character codes are kept verbatim, three-character codes are squeezed into 15 bits
//! with the high bit set.

use std::fmt::Write;

use crate::config::ConfigDescription;

/// A locale assembled from qualifier tokens, before it is packed into a configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleValue {
    /// Lower-case language, NUL padded.
    pub language: [u8; 4],
    /// Upper-case region, NUL padded.
    pub region: [u8; 4],
    /// Title-case script, NUL padded.
    pub script: [u8; 4],
    /// Lower-case variant, NUL padded.
    pub variant: [u8; 8],
}

impl LocaleValue {
    /// Parses the locale starting at the first of `parts`.
    ///
    /// Returns the number of tokens consumed, which is zero when the first token is not a
    /// locale at all. `None` means the tokens form a locale span that is malformed, which
    /// fails the whole qualifier string.
    ///
    /// # Arguments
    ///
    /// * `parts` - The remaining lower-cased qualifier tokens
    pub fn init_from_parts(&mut self, parts: &[&str]) -> Option<usize> {
        let Some(part) = parts.first() else {
            return Some(0);
        };

        if let Some(tag) = part.strip_prefix("b+") {
            let subtags: Vec<&str> = tag.split('+').collect();
            if !is_language(subtags[0]) {
                return None;
            }
            self.set_language(subtags[0]);

            match subtags.len() {
                1 => {}
                2 => {
                    let second = subtags[1];
                    match second.len() {
                        2 | 3 => self.set_region(second),
                        4 if !second.as_bytes()[0].is_ascii_digit() => self.set_script(second),
                        4..=8 => self.set_variant(second),
                        _ => return None,
                    }
                }
                3 => {
                    let second = subtags[1];
                    match second.len() {
                        4 => self.set_script(second),
                        2 | 3 => self.set_region(second),
                        _ => return None,
                    }

                    let third = subtags[2];
                    if third.len() >= 4 {
                        self.set_variant(third);
                    } else {
                        self.set_region(third);
                    }
                }
                4 => {
                    self.set_script(subtags[1]);
                    self.set_region(subtags[2]);
                    self.set_variant(subtags[3]);
                }
                _ => return None,
            }

            return Some(1);
        }

        if !is_language(part) || *part == "car" || *part == "any" {
            return Some(0);
        }

        self.set_language(part);
        match parts.get(1) {
            Some(region) if region.len() == 3 && region.starts_with('r') => {
                self.set_region(&region[1..]);
                Some(2)
            }
            _ => Some(1),
        }
    }

    /// Sets the language, lower-casing it.
    pub fn set_language(&mut self, language: &str) {
        self.language = [0; 4];
        copy_mapped(&mut self.language, language, |b| b.to_ascii_lowercase());
    }

    /// Sets the region, upper-casing it.
    pub fn set_region(&mut self, region: &str) {
        self.region = [0; 4];
        copy_mapped(&mut self.region, region, |b| b.to_ascii_uppercase());
    }

    /// Sets the script in title case (`Latn`).
    pub fn set_script(&mut self, script: &str) {
        self.script = [0; 4];
        copy_mapped(&mut self.script, script, |b| b.to_ascii_lowercase());
        self.script[0] = self.script[0].to_ascii_uppercase();
    }

    /// Sets the variant, lower-casing it.
    pub fn set_variant(&mut self, variant: &str) {
        self.variant = [0; 8];
        copy_mapped(&mut self.variant, variant, |b| b.to_ascii_lowercase());
    }

    /// Stores this locale into the locale fields of `config`.
    pub fn write_to(&self, config: &mut ConfigDescription) {
        config.language = pack_language_or_region(&self.language, b'a');
        config.country = pack_language_or_region(&self.region, b'0');
        config.locale_script = self.script;
        config.locale_variant = self.variant;
    }
}

fn is_language(part: &str) -> bool {
    (part.len() == 2 || part.len() == 3) && part.bytes().all(|b| b.is_ascii_alphabetic())
}

fn copy_mapped(out: &mut [u8], value: &str, map: impl Fn(u8) -> u8) {
    for (slot, byte) in out.iter_mut().zip(value.bytes()) {
        *slot = map(byte);
    }
}

/// Packs a 2 or 3 character code into the two-byte runtime representation.
///
/// Three character codes are stored as three 5-bit offsets from `base` with the high bit of
/// the first byte set.
pub(crate) fn pack_language_or_region(input: &[u8; 4], base: u8) -> [u8; 2] {
    if input[2] == 0 || input[2] == b'-' {
        return [input[0], input[1]];
    }

    let first = input[0].wrapping_sub(base) & 0x7f;
    let second = input[1].wrapping_sub(base) & 0x7f;
    let third = input[2].wrapping_sub(base) & 0x7f;

    [
        0x80 | (third << 2) | (second >> 3),
        (second << 5) | first,
    ]
}

/// Reverses [`pack_language_or_region`], returning the code as a string.
pub(crate) fn unpack_language_or_region(input: [u8; 2], base: u8) -> String {
    if input[0] & 0x80 != 0 {
        let first = input[1] & 0x1f;
        let second = ((input[1] & 0xe0) >> 5) | ((input[0] & 0x03) << 3);
        let third = (input[0] & 0x7c) >> 2;

        return [first, second, third]
            .iter()
            .map(|c| char::from(c + base))
            .collect();
    }

    if input[0] == 0 {
        return String::new();
    }

    [input[0], input[1]].iter().map(|&c| char::from(c)).collect()
}

fn nul_terminated(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    &bytes[..end]
}

/// Appends the locale of `config` to a qualifier string under construction.
///
/// Locales without script and variant use the legacy `en-rUS` form, everything else is
/// written as a `b+` tag. Three character regions (`419`) only parse in the tag form, so they
/// are written as a tag too.
pub(crate) fn append_locale(config: &ConfigDescription, out: &mut String) {
    if config.language[0] == 0 {
        return;
    }

    if !out.is_empty() {
        out.push('-');
    }

    let language = unpack_language_or_region(config.language, b'a');
    let script = nul_terminated(&config.locale_script);
    let variant = nul_terminated(&config.locale_variant);

    if script.is_empty() && variant.is_empty() && config.country[0] & 0x80 == 0 {
        out.push_str(&language);
        if config.country[0] != 0 {
            let _ = write!(out, "-r{}", unpack_language_or_region(config.country, b'0'));
        }
        return;
    }

    out.push_str("b+");
    out.push_str(&language);
    if !script.is_empty() {
        out.push('+');
        out.push_str(&String::from_utf8_lossy(script));
    }
    if config.country[0] != 0 {
        out.push('+');
        out.push_str(&unpack_language_or_region(config.country, b'0'));
    }
    if !variant.is_empty() {
        out.push('+');
        out.push_str(&String::from_utf8_lossy(variant));
    }
}
