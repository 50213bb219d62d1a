//! The printf-subset converter.
//!
//! The format string is consumed left to right: literal runs are copied
//! verbatim and each `%...` conversion is decoded by [`ConversionSpec::parse`]
//! and rendered from the next [`Arg`]. Nothing is allocated; all output goes
//! through [`StrBuf`], so it is truncated at the buffer end and always
//! terminated.
//!
//! Supported grammar:
//!
//! ```text
//! %[flags][separator][width][.precision][length]conversion
//!   flags       # 0 - space + '
//!   separator   , ; : _          (accepted, unused)
//!   length      hh h l ll j t z
//!   conversion  d i o u x X D O U p c s %  and  a A e E f F g G
//! ```
//!
//! Width and the `0 - + space #` flags are applied. Precision is parsed but
//! only honoured by [`FloatMode::Fixed`]; `%.3s` copies the whole string.
//! Positional selectors (`%1$d`), the `q`/`L` modifiers and unknown letters
//! are rejected with a [`FormatError`] instead of being guessed at.
//!
//! The whole format string is always parsed, even after the buffer fills up,
//! so a malformed format fails the same way regardless of buffer size.

mod arg;
mod conversion;
pub(crate) mod render;


pub use arg::Arg;
pub use conversion::{Conversion, ConversionSpec, Flags, LengthClass};
use render::{Body, FloatStyle, Layout};

use crate::{
    buffer::{StrBuf, until_nul},
    digits::Digits,
    error::{FormatError, FormatErrorKind},
    options::{ConverterOptions, FLOAT_PLACEHOLDER, FloatMode},
};

/// Hands out arguments in order, checking each against its conversion.
struct ArgCursor<'s, 'a> {
    args: &'s [Arg<'a>],
    next: usize,
}

impl<'a> ArgCursor<'_, 'a> {
    fn take(&mut self, offset: usize) -> Result<Arg<'a>, FormatError> {
        let index = self.next;
        let arg = self
            .args
            .get(index)
            .copied()
            .ok_or(FormatError::new(FormatErrorKind::MissingArgument { index }, offset))?;
        self.next += 1;
        Ok(arg)
    }

    /// Takes the next argument and projects it with `read`; a `None` means
    /// the argument is the wrong kind for `letter`.
    fn take_as<T>(
        &mut self,
        letter: u8,
        offset: usize,
        read: impl FnOnce(&Arg<'a>) -> Option<T>,
    ) -> Result<T, FormatError> {
        let index = self.next;
        let arg = self.take(offset)?;
        read(&arg).ok_or(FormatError::new(
            FormatErrorKind::ArgumentMismatch {
                index,
                conversion: letter,
            },
            offset,
        ))
    }
}

/// Formats `fmt` against `args` at the cursor of `out`.
pub(crate) fn convert(
    out: &mut StrBuf<'_>,
    fmt: &[u8],
    args: &[Arg<'_>],
    options: ConverterOptions,
) -> Result<usize, FormatError> {
    let fmt = until_nul(fmt);
    let mut args = ArgCursor { args, next: 0 };
    let mut rest = 0;

    loop {
        let percent = fmt[rest..]
            .iter()
            .position(|&b| b == b'%')
            .map_or(fmt.len(), |i| rest + i);
        out.copy(&fmt[rest..percent], None);
        if percent == fmt.len() {
            break;
        }

        let (spec, next) = ConversionSpec::parse(fmt, percent)?;
        emit(out, &spec, &mut args, options, percent)?;
        rest = next;
    }

    Ok(out.len())
}

fn emit(
    out: &mut StrBuf<'_>,
    spec: &ConversionSpec,
    args: &mut ArgCursor<'_, '_>,
    options: ConverterOptions,
    offset: usize,
) -> Result<(), FormatError> {
    let flags = spec.flags;
    let letter = spec.letter;

    match spec.conversion {
        Conversion::Percent => {
            out.push_byte(b'%');
        }
        Conversion::Signed => {
            let value = args.take_as(letter, offset, Arg::as_signed)?;
            let value = spec.length.narrow_signed(value);
            render::signed(out, value, Layout::numeric(spec.width, flags), flags);
        }
        Conversion::Unsigned | Conversion::Octal | Conversion::LowerHex | Conversion::UpperHex => {
            let value = args.take_as(letter, offset, Arg::as_unsigned)?;
            let value = spec.length.narrow_unsigned(value);
            let alternate = flags.alternate && value != 0;
            let (digits, prefix): (_, &[u8]) = match spec.conversion {
                Conversion::Octal if alternate => (Digits::OCTAL, b"0"),
                Conversion::Octal => (Digits::OCTAL, b""),
                Conversion::LowerHex if alternate => (Digits::LOWER_HEX, b"0x"),
                Conversion::LowerHex => (Digits::LOWER_HEX, b""),
                Conversion::UpperHex if alternate => (Digits::UPPER_HEX, b"0X"),
                Conversion::UpperHex => (Digits::UPPER_HEX, b""),
                _ => (Digits::DECIMAL, b""),
            };
            render::unsigned(out, value, digits, prefix, Layout::numeric(spec.width, flags));
        }
        Conversion::Pointer => {
            let address = args.take_as(letter, offset, Arg::as_unsigned)?;
            render::unsigned(
                out,
                address,
                Digits::LOWER_HEX,
                b"0x",
                Layout::numeric(spec.width, flags),
            );
        }
        Conversion::Char => {
            let mut utf8 = [0u8; 4];
            let arg = args.take(offset)?;
            let bytes: &[u8] = match arg {
                Arg::Char(c) => c.encode_utf8(&mut utf8).as_bytes(),
                _ => {
                    let index = args.next - 1;
                    let code = arg.as_unsigned().ok_or(FormatError::new(
                        FormatErrorKind::ArgumentMismatch {
                            index,
                            conversion: letter,
                        },
                        offset,
                    ))?;
                    utf8[0] = code.to_le_bytes()[0];
                    &utf8[..1]
                }
            };
            // A NUL character writes nothing, so it must not count toward the width.
            render::padded(out, Layout::text(spec.width, flags), None, b"", &Body::Bytes(until_nul(bytes)));
        }
        Conversion::Str => {
            let text = args.take_as(letter, offset, |arg| match *arg {
                Arg::Str(text) => Some(text),
                _ => None,
            })?;
            render::padded(
                out,
                Layout::text(spec.width, flags),
                None,
                b"",
                &Body::Bytes(until_nul(text)),
            );
        }
        Conversion::Float(letter) => {
            let value = args.take_as(letter, offset, |arg| match *arg {
                Arg::F64(value) => Some(value),
                _ => None,
            })?;
            match options.float_mode {
                FloatMode::Placeholder => {
                    render::padded(
                        out,
                        Layout::text(spec.width, flags),
                        None,
                        b"",
                        &Body::Bytes(FLOAT_PLACEHOLDER.as_bytes()),
                    );
                }
                FloatMode::Fixed => {
                    let precision = spec.precision.unwrap_or(6);
                    let style = match letter.to_ascii_lowercase() {
                        b'f' => FloatStyle::Fixed(precision),
                        b'e' => FloatStyle::Exponent(precision),
                        _ => FloatStyle::Shortest,
                    };
                    render::float(
                        out,
                        value,
                        style,
                        letter.is_ascii_uppercase(),
                        Layout::numeric(spec.width, flags),
                        flags,
                    );
                }
            }
        }
    }

    Ok(())
}

/// Formats `format` against `args` into the string in `dest` at `cursor`,
/// using the default [`ConverterOptions`]. Returns the new cursor.
///
/// # Errors
///
/// Returns a [`FormatError`] for a malformed format string or an argument
/// list that does not match it. Output produced before the offending
/// conversion stays in `dest`, terminated.
pub fn format_into(
    dest: &mut [u8],
    cursor: usize,
    format: &str,
    args: &[Arg<'_>],
) -> Result<usize, FormatError> {
    StrBuf::at(dest, cursor).format(format, args)
}

impl StrBuf<'_> {
    /// Appends `format` expanded against `args`. Returns the new cursor.
    ///
    /// # Errors
    ///
    /// See [`format_into`].
    pub fn format(&mut self, format: &str, args: &[Arg<'_>]) -> Result<usize, FormatError> {
        convert(self, format.as_bytes(), args, ConverterOptions::default())
    }

    /// Like [`StrBuf::format`] with explicit converter options.
    ///
    /// # Errors
    ///
    /// See [`format_into`].
    pub fn format_with(
        &mut self,
        format: &str,
        args: &[Arg<'_>],
        options: ConverterOptions,
    ) -> Result<usize, FormatError> {
        convert(self, format.as_bytes(), args, options)
    }
}
