//! Decoding of a single `%...` conversion specification.

use crate::error::{FormatError, FormatErrorKind};

/// Flag characters seen between `%` and the width.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[expect(clippy::struct_excessive_bools)]
pub struct Flags {
    /// `#`
    pub alternate: bool,
    /// `0`
    pub zero_pad: bool,
    /// `-`
    pub left_justify: bool,
    /// ` `
    pub space: bool,
    /// `+`
    pub plus: bool,
    /// `'`, parsed and otherwise ignored: grouping is locale dependent.
    pub grouping: bool,
}

impl Flags {
    fn set(&mut self, c: u8) -> bool {
        match c {
            b'#' => self.alternate = true,
            b'0' => self.zero_pad = true,
            b'-' => self.left_justify = true,
            b' ' => self.space = true,
            b'+' => self.plus = true,
            b'\'' => self.grouping = true,
            _ => return false,
        }
        true
    }
}

/// Width class selected by the length modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LengthClass {
    /// `hh`
    Char,
    /// `h`
    Short,
    /// No modifier.
    #[default]
    Int,
    /// `l`
    Long,
    /// `ll`
    LongLong,
    /// `j`
    IntMax,
    /// `t`
    PtrDiff,
    /// `z`
    Size,
}

impl LengthClass {
    /// Narrows a signed value for the classes below `int`. Wider classes use
    /// the width the argument already carries.
    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn narrow_signed(self, value: i64) -> i64 {
        match self {
            Self::Char => i64::from(value as i8),
            Self::Short => i64::from(value as i16),
            _ => value,
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    pub(crate) fn narrow_unsigned(self, value: u64) -> u64 {
        match self {
            Self::Char => u64::from(value as u8),
            Self::Short => u64::from(value as u16),
            _ => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    /// `d i D`
    Signed,
    /// `u U`
    Unsigned,
    /// `o O`
    Octal,
    /// `x`
    LowerHex,
    /// `X`
    UpperHex,
    /// `p`
    Pointer,
    /// `c`
    Char,
    /// `s`
    Str,
    /// `a A e E f F g G`, carrying the letter.
    Float(u8),
    /// `%`
    Percent,
}

impl Conversion {
    fn from_letter(c: u8) -> Option<Self> {
        Some(match c {
            b'd' | b'i' | b'D' => Self::Signed,
            b'u' | b'U' => Self::Unsigned,
            b'o' | b'O' => Self::Octal,
            b'x' => Self::LowerHex,
            b'X' => Self::UpperHex,
            b'p' => Self::Pointer,
            b'c' => Self::Char,
            b's' => Self::Str,
            b'a' | b'A' | b'e' | b'E' | b'f' | b'F' | b'g' | b'G' => Self::Float(c),
            b'%' => Self::Percent,
            _ => return None,
        })
    }
}

/// One decoded conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSpec {
    pub flags: Flags,
    /// Vector separator (`, ; : _`); recorded, unused by scalar conversions.
    pub separator: Option<u8>,
    /// Minimum field width; `None` when unspecified.
    pub width: Option<usize>,
    /// Parsed but only honoured by fixed-point float rendering.
    pub precision: Option<usize>,
    pub length: LengthClass,
    pub conversion: Conversion,
    /// The conversion letter as written.
    pub letter: u8,
}

impl ConversionSpec {
    /// Decodes the conversion starting at `fmt[start]`, which must be `%`.
    /// Returns the spec and the index just past its conversion letter.
    ///
    /// # Errors
    ///
    /// Positional selectors, the `q` and `L` modifiers, unknown conversion
    /// letters and a format ending mid-conversion are rejected.
    pub fn parse(fmt: &[u8], start: usize) -> Result<(Self, usize), FormatError> {
        debug_assert_eq!(fmt.get(start), Some(&b'%'));
        let err = |kind| FormatError::new(kind, start);
        let mut i = start + 1;
        let at = |i: usize| fmt.get(i).copied();

        let mut flags = Flags::default();
        while let Some(c) = at(i) {
            if !flags.set(c) {
                break;
            }
            i += 1;
        }

        let separator = match at(i) {
            Some(c @ (b',' | b';' | b':' | b'_')) => {
                i += 1;
                Some(c)
            }
            _ => None,
        };

        let (width, next) = decimal(fmt, i);
        i = next;
        if at(i) == Some(b'$') {
            return Err(err(FormatErrorKind::PositionalArgument));
        }

        let mut precision = None;
        if at(i) == Some(b'.') {
            let (digits, next) = decimal(fmt, i + 1);
            precision = Some(digits.unwrap_or(0));
            i = next;
        }

        let length = match at(i) {
            Some(b'h') if at(i + 1) == Some(b'h') => {
                i += 2;
                LengthClass::Char
            }
            Some(b'h') => {
                i += 1;
                LengthClass::Short
            }
            Some(b'l') if at(i + 1) == Some(b'l') => {
                i += 2;
                LengthClass::LongLong
            }
            Some(b'l') => {
                i += 1;
                LengthClass::Long
            }
            Some(b'j') => {
                i += 1;
                LengthClass::IntMax
            }
            Some(b't') => {
                i += 1;
                LengthClass::PtrDiff
            }
            Some(b'z') => {
                i += 1;
                LengthClass::Size
            }
            Some(c @ (b'q' | b'L')) => return Err(err(FormatErrorKind::UnsupportedLength(c))),
            _ => LengthClass::Int,
        };

        let letter = at(i).ok_or_else(|| err(FormatErrorKind::IncompleteConversion))?;
        let conversion = Conversion::from_letter(letter)
            .ok_or_else(|| err(FormatErrorKind::UnsupportedConversion(letter)))?;
        let length = match letter {
            b'D' | b'O' | b'U' => LengthClass::Long,
            _ => length,
        };

        Ok((
            Self {
                flags,
                separator,
                width,
                precision,
                length,
                conversion,
                letter,
            },
            i + 1,
        ))
    }
}

/// Reads a run of ASCII digits at `fmt[i..]`, saturating on overflow.
fn decimal(fmt: &[u8], mut i: usize) -> (Option<usize>, usize) {
    let mut value: Option<usize> = None;
    while let Some(&c) = fmt.get(i) {
        if !c.is_ascii_digit() {
            break;
        }
        let digit = usize::from(c - b'0');
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(digit));
        i += 1;
    }
    (value, i)
}
