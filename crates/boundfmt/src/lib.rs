//! Bounded, allocation-free text formatting into caller-provided buffers.
//!
//! Three layers, each usable on its own:
//!
//! - [`StrBuf`] and [`copy_into`]: truncating, always NUL-terminated appends
//!   into a byte slice;
//! - [`format_into`]: a printf subset driven by typed [`Arg`]s;
//! - [`format_record_into`]: `%(key)s` templates over a log [`Record`].
//!
//! The core is `no_std` and never allocates. With the `std` feature the
//! [`logger`] module plugs the template formatter into the `log` facade.

#![no_std]
#![allow(missing_docs)]

#[cfg(test)]
extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

mod buffer;
mod digits;
mod error;
mod options;
mod printf;
mod record;
mod template;

#[cfg(feature = "std")]
pub mod logger;
#[cfg(feature = "std")]
pub mod timefmt;

#[cfg(test)]
mod tests;

pub use buffer::{StrBuf, copy_into};
pub use digits::{Digits, LOWER_ALPHABET, MAX_DIGITS, UPPER_ALPHABET, int_to_text_into};
pub use error::{FormatError, FormatErrorKind};
pub use options::{ConverterOptions, FLOAT_PLACEHOLDER, FloatMode};
pub use printf::{Arg, Conversion, ConversionSpec, Flags, LengthClass, format_into};
pub use record::{Level, Record, level_name};
pub use template::{Field, format_record_into};

/// Appends a printf-subset format to a [`StrBuf`], converting each argument
/// with [`Arg::from`].
///
/// ```rust
/// # use boundfmt::{StrBuf, bformat};
/// let mut storage = [0u8; 32];
/// let mut out = StrBuf::new(&mut storage);
/// bformat!(out, "%s=%#x", "mask", 255u32).unwrap();
/// assert_eq!(out.as_str(), Ok("mask=0xff"));
/// ```
#[macro_export]
macro_rules! bformat {
    ($buf:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {
        ($buf).format($fmt, &[$($crate::Arg::from($arg)),*])
    };
}
