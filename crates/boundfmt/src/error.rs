use thiserror::Error;

/// A malformed format string or a mismatched argument list.
///
/// These are author errors in the format string or its call site, never a
/// consequence of the destination buffer being too small. Truncation is not
/// an error and is never reported through this type.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{kind} at byte {offset}")]
pub struct FormatError {
    /// What went wrong.
    pub kind: FormatErrorKind,
    /// Byte offset into the format string of the offending conversion.
    pub offset: usize,
}

impl FormatError {
    pub(crate) fn new(kind: FormatErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("unsupported conversion '{}'", char::from(*.0))]
    UnsupportedConversion(u8),
    #[error("unsupported length modifier '{}'", char::from(*.0))]
    UnsupportedLength(u8),
    #[error("positional argument selectors are not supported")]
    PositionalArgument,
    #[error("format string ends inside a conversion")]
    IncompleteConversion,
    #[error("missing argument for conversion {index}")]
    MissingArgument { index: usize },
    #[error("argument {index} does not match conversion '{}'", char::from(*.conversion))]
    ArgumentMismatch { index: usize, conversion: u8 },
    #[error("base {base} needs an alphabet of at least {base} digits (got {alphabet_len})")]
    InvalidRadix { base: u32, alphabet_len: usize },
}
