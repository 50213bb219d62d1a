//! Integer to text conversion in bases 8 through 16.

use crate::{
    buffer::StrBuf,
    error::{FormatError, FormatErrorKind},
};

/// Longest rendering of a `u64`: `u64::MAX` in octal.
pub const MAX_DIGITS: usize = 22;

pub const LOWER_ALPHABET: &[u8; 16] = b"0123456789abcdef";
pub const UPPER_ALPHABET: &[u8; 16] = b"0123456789ABCDEF";

/// A validated base together with the glyphs used for each digit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Digits<'a> {
    base: u32,
    glyphs: &'a [u8],
}

impl Digits<'static> {
    pub const OCTAL: Self = Self { base: 8, glyphs: LOWER_ALPHABET };
    pub const DECIMAL: Self = Self { base: 10, glyphs: LOWER_ALPHABET };
    pub const LOWER_HEX: Self = Self { base: 16, glyphs: LOWER_ALPHABET };
    pub const UPPER_HEX: Self = Self { base: 16, glyphs: UPPER_ALPHABET };
}

impl<'a> Digits<'a> {
    /// Pairs `base` with `glyphs`, where `glyphs[d]` renders digit value `d`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatErrorKind::InvalidRadix`] when `base` is outside
    /// `8..=16` or `glyphs` has fewer than `base` entries. Either one is a bug
    /// at the call site.
    pub fn new(base: u32, glyphs: &'a [u8]) -> Result<Self, FormatErrorKind> {
        if !(8..=16).contains(&base) || glyphs.len() < base as usize {
            return Err(FormatErrorKind::InvalidRadix {
                base,
                alphabet_len: glyphs.len(),
            });
        }
        Ok(Self { base, glyphs })
    }

    #[inline]
    pub fn base(&self) -> u32 {
        self.base
    }

    /// Renders `value` into the tail of `scratch` and returns the rendered
    /// digits, most significant first.
    pub fn render<'s>(&self, mut value: u64, scratch: &'s mut [u8; MAX_DIGITS]) -> &'s [u8] {
        let base = u64::from(self.base);
        let mut start = MAX_DIGITS;
        loop {
            start -= 1;
            // `value % base < 16`, so the cast cannot truncate.
            #[expect(clippy::cast_possible_truncation)]
            let digit = (value % base) as usize;
            scratch[start] = self.glyphs[digit];
            value /= base;
            if value == 0 {
                break;
            }
        }
        &scratch[start..]
    }
}

/// Appends `magnitude` in `base` using `alphabet` to the string in `dest` at
/// `cursor`. Returns the new cursor.
///
/// # Errors
///
/// Fails with [`FormatErrorKind::InvalidRadix`] (at offset 0) if the base or
/// alphabet is invalid; nothing is written in that case.
pub fn int_to_text_into(
    dest: &mut [u8],
    cursor: usize,
    magnitude: u64,
    base: u32,
    alphabet: &[u8],
) -> Result<usize, FormatError> {
    let digits = Digits::new(base, alphabet).map_err(|kind| FormatError::new(kind, 0))?;
    Ok(StrBuf::at(dest, cursor).put_uint(magnitude, digits))
}
