//! Named-placeholder templates for log records.
//!
//! A template is literal text with `%(key)t` placeholders, where `key` names
//! a [`Field`] and `t` is one of `s`, `d` or `f`. The suffix is only checked,
//! not used: each field has a single rendering whatever the suffix.
//!
//! The scanner is deliberately lenient so templates can move between versions:
//!
//! - unknown keys render as nothing;
//! - `%(key)` followed by anything other than `s`, `d` or `f` is copied
//!   through verbatim;
//! - `%%` is a literal `%`, and any other `%` is copied as is;
//! - an unterminated `%(` ends the output at that point.
//!
//! A newline is always appended after the expansion.

mod field;

pub use field::Field;

use crate::{
    buffer::{StrBuf, until_nul},
    error::FormatError,
    options::ConverterOptions,
    record::Record,
};

pub(crate) fn expand(
    out: &mut StrBuf<'_>,
    template: &[u8],
    record: &Record<'_>,
    options: ConverterOptions,
) -> Result<usize, FormatError> {
    let mut rest = until_nul(template);

    // Keep scanning once the buffer is full so `%(message)s` is still checked.
    loop {
        let Some(percent) = rest.iter().position(|&b| b == b'%') else {
            out.copy(rest, None);
            break;
        };
        out.copy(&rest[..percent], None);
        let after = &rest[percent + 1..];

        match after.first() {
            Some(b'%') => {
                out.push_byte(b'%');
                rest = &after[1..];
            }
            Some(b'(') => {
                let Some(close) = after.iter().position(|&b| b == b')') else {
                    break;
                };
                match after.get(close + 1) {
                    Some(b's' | b'd' | b'f') => {
                        if let Some(field) = Field::from_key(&after[1..close]) {
                            field.render(out, record, options)?;
                        }
                        rest = &after[close + 2..];
                    }
                    _ => {
                        // Not a placeholder: keep `%(...)` as written.
                        out.copy(&rest[percent..=percent + 1 + close], None);
                        rest = &after[close + 1..];
                    }
                }
            }
            _ => {
                out.push_byte(b'%');
                rest = after;
            }
        }
    }

    out.copy(b"\n", Some(1));
    Ok(out.len())
}

/// Expands `template` against `record` into `dest`, starting at its first
/// byte, and returns the number of bytes written (terminator excluded).
///
/// ```
/// use boundfmt::{Arg, Record, format_record_into};
///
/// let args = [Arg::I32(7)];
/// let record = Record {
///     level_name: "ERROR",
///     message_format: "boom %d",
///     message_args: &args,
///     ..Record::default()
/// };
/// let mut buf = [0u8; 64];
/// let n = format_record_into(&mut buf, "%(levelname)s: %(message)s", &record).unwrap();
/// assert_eq!(&buf[..n], b"ERROR: boom 7\n");
/// ```
///
/// # Errors
///
/// Only the `message` field can fail, when the record's message format is
/// malformed or does not match its arguments.
pub fn format_record_into(dest: &mut [u8], template: &str, record: &Record<'_>) -> Result<usize, FormatError> {
    StrBuf::new(dest).format_record(template, record)
}

impl StrBuf<'_> {
    /// Appends `template` expanded against `record`, followed by a newline.
    /// Returns the new cursor.
    ///
    /// # Errors
    ///
    /// See [`format_record_into`].
    pub fn format_record(&mut self, template: &str, record: &Record<'_>) -> Result<usize, FormatError> {
        expand(self, template.as_bytes(), record, ConverterOptions::default())
    }

    /// Like [`StrBuf::format_record`], expanding the message with `options`.
    ///
    /// # Errors
    ///
    /// See [`format_record_into`].
    pub fn format_record_with(
        &mut self,
        template: &str,
        record: &Record<'_>,
        options: ConverterOptions,
    ) -> Result<usize, FormatError> {
        expand(self, template.as_bytes(), record, options)
    }
}

#[cfg(test)]
mod tests;
