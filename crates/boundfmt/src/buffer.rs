//! Bounded string buffers.
//!
//! A [`StrBuf`] is a caller-provided byte slice plus a write cursor. The
//! region `[0, cursor)` holds the text written so far and `bytes[cursor]` is
//! always a NUL terminator, so the cursor can never advance past
//! `capacity - 1`. Every append returns the new cursor, which lets callers
//! chain writes or resume writing into the same slice later with
//! [`StrBuf::at`].
//!
//! Sources are treated like C strings: copying stops at the first NUL byte of
//! the source even when the slice continues past it.
//!
//! A zero-length slice cannot hold the terminator; all operations on it are
//! no-ops that report a cursor of `0`.

use core::{fmt, str::Utf8Error};

use bstr::BStr;

use crate::digits::{Digits, MAX_DIGITS};

/// Returns the prefix of `src` before its first NUL byte.
#[inline]
pub(crate) fn until_nul(src: &[u8]) -> &[u8] {
    match src.iter().position(|&b| b == 0) {
        Some(end) => &src[..end],
        None => src,
    }
}

/// A NUL-terminated text region inside a borrowed byte slice.
pub struct StrBuf<'a> {
    bytes: &'a mut [u8],
    pos: usize,
}

impl<'a> StrBuf<'a> {
    /// Starts an empty string at the beginning of `bytes`.
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self::at(bytes, 0)
    }

    /// Resumes writing at `cursor`, usually a value returned by an earlier
    /// call on the same slice.
    ///
    /// The cursor is clamped to the last byte of the slice and a terminator is
    /// written there.
    pub fn at(bytes: &'a mut [u8], cursor: usize) -> Self {
        let pos = cursor.min(bytes.len().saturating_sub(1));
        let mut buf = Self { bytes, pos };
        buf.terminate();
        buf
    }

    /// Current cursor: number of bytes before the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }

    /// Size of the underlying slice, terminator slot included.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.len()
    }

    /// Bytes that can still be appended before the buffer is full.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.stop() - self.pos
    }

    /// `true` once only the terminator slot is left.
    ///
    /// Callers that need to detect truncation compare the length they meant
    /// to write against this (or against [`StrBuf::remaining`]).
    #[inline]
    pub fn is_full(&self) -> bool {
        self.pos >= self.stop()
    }

    /// The text written so far, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.pos]
    }

    /// The text written so far including the terminator, ready to hand to
    /// code expecting a C string. Empty for a zero-length slice.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        let end = (self.pos + 1).min(self.bytes.len());
        &self.bytes[..end]
    }

    pub fn as_bstr(&self) -> &BStr {
        BStr::new(self.as_bytes())
    }

    /// The text written so far as UTF-8.
    ///
    /// # Errors
    ///
    /// Truncation can split a multi-byte character, and `%s` arguments are
    /// arbitrary bytes, so the contents are not guaranteed to be UTF-8.
    pub fn as_str(&self) -> Result<&str, Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// Appends at most `max_n` bytes of `src` (all of it when `max_n` is
    /// `None`), stopping early at a NUL byte in `src` or when the buffer is
    /// full. Returns the new cursor.
    pub fn copy(&mut self, src: &[u8], max_n: Option<usize>) -> usize {
        let src = until_nul(src);
        let wanted = max_n.map_or(src.len(), |max| max.min(src.len()));
        let n = wanted.min(self.remaining());
        self.bytes[self.pos..self.pos + n].copy_from_slice(&src[..n]);
        self.pos += n;
        self.terminate();
        self.pos
    }

    #[inline]
    pub fn push_str(&mut self, s: &str) -> usize {
        self.copy(s.as_bytes(), None)
    }

    /// Appends one byte. A NUL byte is a terminator and appends nothing.
    #[inline]
    pub fn push_byte(&mut self, b: u8) -> usize {
        self.copy(&[b], Some(1))
    }

    /// Appends `n` copies of `b`, as many as fit.
    pub fn fill(&mut self, b: u8, n: usize) -> usize {
        if b == 0 {
            return self.pos;
        }
        let n = n.min(self.remaining());
        self.bytes[self.pos..self.pos + n].fill(b);
        self.pos += n;
        self.terminate();
        self.pos
    }

    /// Appends the digits of `magnitude`, most significant first.
    ///
    /// If the buffer runs out the trailing digits are the ones lost. That is
    /// fine for diagnostics but means a truncated number must not be parsed
    /// back.
    pub fn put_uint(&mut self, magnitude: u64, digits: Digits<'_>) -> usize {
        let mut scratch = [0u8; MAX_DIGITS];
        let text = digits.render(magnitude, &mut scratch);
        self.copy(text, None)
    }

    #[inline]
    fn stop(&self) -> usize {
        self.bytes.len().saturating_sub(1)
    }

    #[inline]
    fn terminate(&mut self) {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(
            self.bytes.is_empty() || self.pos < self.bytes.len(),
            "Internal error: cursor past the terminator slot"
        );
        if let Some(b) = self.bytes.get_mut(self.pos) {
            *b = 0;
        }
    }
}

/// Truncating writer: running out of room is not an error, so this never
/// returns `Err`.
impl fmt::Write for StrBuf<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.copy(s.as_bytes(), None);
        Ok(())
    }
}

impl fmt::Debug for StrBuf<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrBuf")
            .field("text", &self.as_bstr())
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Appends `source` to the string in `dest` at `cursor`, copying at most
/// `max_len` bytes (`None` for no limit). Returns the new cursor.
pub fn copy_into(dest: &mut [u8], cursor: usize, source: &[u8], max_len: Option<usize>) -> usize {
    StrBuf::at(dest, cursor).copy(source, max_len)
}
