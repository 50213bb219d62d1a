//! Field rendering shared by the converter and the template formatter:
//! width padding, signs and radix prefixes around a body of text.

use core::fmt::{self, Write};

use super::conversion::Flags;
use crate::{
    buffer::StrBuf,
    digits::{Digits, MAX_DIGITS},
};

/// The text between the sign/prefix and the padding.
pub(crate) enum Body<'b> {
    Bytes(&'b [u8]),
    Display(&'b dyn fmt::Display),
    /// Display text with this many `'0'`s spliced in before the exponent
    /// marker, or appended when there is none.
    Zeros(&'b dyn fmt::Display, usize),
}

impl Body<'_> {
    fn len(&self) -> usize {
        match self {
            Body::Bytes(bytes) => bytes.len(),
            Body::Display(value) => display_len(*value),
            Body::Zeros(value, zeros) => display_len(*value).saturating_add(*zeros),
        }
    }

    fn write(&self, out: &mut StrBuf<'_>) {
        match self {
            Body::Bytes(bytes) => {
                out.copy(bytes, None);
            }
            Body::Display(value) => {
                let _ = write!(out, "{value}");
            }
            Body::Zeros(value, zeros) => {
                let mut splice = ZerosBeforeExponent { out: &mut *out, zeros: *zeros };
                let _ = write!(splice, "{value}");
                let zeros = splice.zeros;
                out.fill(b'0', zeros);
            }
        }
    }
}

fn display_len(value: &dyn fmt::Display) -> usize {
    let mut counter = Counter(0);
    // `Counter` never fails.
    let _ = write!(counter, "{value}");
    counter.0
}

struct Counter(usize);

impl Write for Counter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Forwards to `out`, filling in `zeros` before the first `e`/`E`.
struct ZerosBeforeExponent<'o, 'b> {
    out: &'o mut StrBuf<'b>,
    zeros: usize,
}

impl Write for ZerosBeforeExponent<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match s.find(['e', 'E']) {
            Some(at) if self.zeros > 0 => {
                self.out.write_str(&s[..at])?;
                self.out.fill(b'0', self.zeros);
                self.zeros = 0;
                self.out.write_str(&s[at..])
            }
            _ => self.out.write_str(s),
        }
    }
}

/// How a rendered field is laid out inside its width.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Layout {
    pub width: Option<usize>,
    pub left: bool,
    /// Pad with zeros between the sign/prefix and the body.
    pub zeros: bool,
}

impl Layout {
    pub(crate) fn numeric(width: Option<usize>, flags: Flags) -> Self {
        Self {
            width,
            left: flags.left_justify,
            zeros: flags.zero_pad && !flags.left_justify,
        }
    }

    pub(crate) fn text(width: Option<usize>, flags: Flags) -> Self {
        Self {
            width,
            left: flags.left_justify,
            zeros: false,
        }
    }

    pub(crate) fn zero_padded(width: usize) -> Self {
        Self {
            width: Some(width),
            left: false,
            zeros: true,
        }
    }
}

/// Writes `sign`, `prefix` and `body` padded out to `layout.width`.
pub(crate) fn padded(
    out: &mut StrBuf<'_>,
    layout: Layout,
    sign: Option<u8>,
    prefix: &[u8],
    body: &Body<'_>,
) -> usize {
    let used = (usize::from(sign.is_some()) + prefix.len()).saturating_add(body.len());
    let pad = layout.width.map_or(0, |width| width.saturating_sub(used));

    if !layout.left && !layout.zeros {
        out.fill(b' ', pad);
    }
    if let Some(sign) = sign {
        out.push_byte(sign);
    }
    out.copy(prefix, None);
    if layout.zeros {
        out.fill(b'0', pad);
    }
    body.write(out);
    if layout.left {
        out.fill(b' ', pad);
    }
    out.len()
}

/// The sign character, if any, for a value with the given sign.
pub(crate) fn sign_for(negative: bool, flags: Flags) -> Option<u8> {
    if negative {
        Some(b'-')
    } else if flags.plus {
        Some(b'+')
    } else if flags.space {
        Some(b' ')
    } else {
        None
    }
}

pub(crate) fn signed(out: &mut StrBuf<'_>, value: i64, layout: Layout, flags: Flags) -> usize {
    let mut scratch = [0u8; MAX_DIGITS];
    let digits = Digits::DECIMAL.render(value.unsigned_abs(), &mut scratch);
    padded(out, layout, sign_for(value < 0, flags), b"", &Body::Bytes(digits))
}

pub(crate) fn unsigned(out: &mut StrBuf<'_>, value: u64, digits: Digits<'_>, prefix: &[u8], layout: Layout) -> usize {
    let mut scratch = [0u8; MAX_DIGITS];
    let text = digits.render(value, &mut scratch);
    padded(out, layout, None, prefix, &Body::Bytes(text))
}

/// Most fractional digits handed to `core::fmt`, which rejects precisions
/// above `u16::MAX`. The smallest subnormal `f64` has 1074 fractional digits,
/// so every digit past this one is a `'0'`.
pub(crate) const MAX_FLOAT_PRECISION: usize = 1100;

/// How the digits of a finite float are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FloatStyle {
    /// `%f`: this many fractional digits.
    Fixed(usize),
    /// `%e`: Rust exponent notation with this many fractional digits.
    Exponent(usize),
    /// Shortest text that reads back to the same value.
    Shortest,
}

/// Writes `value` in `style`. `upper` selects `E`, `INF` and `NAN`.
pub(crate) fn float(
    out: &mut StrBuf<'_>,
    value: f64,
    style: FloatStyle,
    upper: bool,
    layout: Layout,
    flags: Flags,
) -> usize {
    let negative = value.is_sign_negative() && !value.is_nan();
    let (style, zeros) = style.clamped();
    let text = FloatText {
        magnitude: if negative { -value } else { value },
        style,
        upper,
    };
    if value.is_finite() {
        padded(out, layout, sign_for(negative, flags), b"", &Body::Zeros(&text, zeros))
    } else {
        let layout = Layout { zeros: false, ..layout };
        padded(out, layout, sign_for(negative, flags), b"", &Body::Display(&text))
    }
}

/// `%f`-style fixed-point text with `precision` fractional digits.
pub(crate) fn fixed(out: &mut StrBuf<'_>, value: f64, precision: usize, layout: Layout, flags: Flags) -> usize {
    float(out, value, FloatStyle::Fixed(precision), false, layout, flags)
}

struct FloatText {
    magnitude: f64,
    style: FloatStyle,
    upper: bool,
}

impl FloatStyle {
    /// The style with its precision capped at [`MAX_FLOAT_PRECISION`], and
    /// the number of zeros the cap cut off.
    fn clamped(self) -> (Self, usize) {
        match self {
            FloatStyle::Fixed(precision) => (
                FloatStyle::Fixed(precision.min(MAX_FLOAT_PRECISION)),
                precision.saturating_sub(MAX_FLOAT_PRECISION),
            ),
            FloatStyle::Exponent(precision) => (
                FloatStyle::Exponent(precision.min(MAX_FLOAT_PRECISION)),
                precision.saturating_sub(MAX_FLOAT_PRECISION),
            ),
            FloatStyle::Shortest => (FloatStyle::Shortest, 0),
        }
    }
}

impl fmt::Display for FloatText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.magnitude;
        match (self.upper, self.style) {
            (false, _) if m.is_nan() => f.write_str("nan"),
            (true, _) if m.is_nan() => f.write_str("NAN"),
            (false, _) if m.is_infinite() => f.write_str("inf"),
            (true, _) if m.is_infinite() => f.write_str("INF"),
            (_, FloatStyle::Fixed(precision)) => write!(f, "{m:.precision$}"),
            (false, FloatStyle::Exponent(precision)) => write!(f, "{m:.precision$e}"),
            (true, FloatStyle::Exponent(precision)) => write!(f, "{m:.precision$E}"),
            (_, FloatStyle::Shortest) => write!(f, "{m}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn flags(spec: &str) -> Flags {
        let mut flags = Flags::default();
        for c in spec.bytes() {
            match c {
                b'-' => flags.left_justify = true,
                b'0' => flags.zero_pad = true,
                b'+' => flags.plus = true,
                b' ' => flags.space = true,
                _ => unreachable!(),
            }
        }
        flags
    }

    #[rstest]
    #[case(42, None, "", "42")]
    #[case(-42, None, "", "-42")]
    #[case(42, Some(5), "", "   42")]
    #[case(-42, Some(5), "0", "-0042")]
    #[case(42, Some(5), "-", "42   ")]
    #[case(42, Some(5), "-0", "42   ")]
    #[case(42, None, "+", "+42")]
    #[case(42, None, " ", " 42")]
    #[case(i64::MIN, None, "", "-9223372036854775808")]
    fn signed_layouts(#[case] value: i64, #[case] width: Option<usize>, #[case] f: &str, #[case] expected: &str) {
        let mut storage = [0u8; 32];
        let mut out = StrBuf::new(&mut storage);
        let flags = flags(f);
        signed(&mut out, value, Layout::numeric(width, flags), flags);
        assert_eq!(out.as_str(), Ok(expected));
    }

    #[test]
    fn padding_never_overruns() {
        let mut storage = [0u8; 4];
        let mut out = StrBuf::new(&mut storage);
        let end = signed(&mut out, 7, Layout::numeric(Some(usize::MAX), Flags::default()), Flags::default());
        assert_eq!(end, 3);
        assert_eq!(out.as_bytes_with_nul(), b"   \0");
    }

    #[rstest]
    #[case(1.5, 6, "1.500000")]
    #[case(-0.25, 2, "-0.25")]
    #[case(-0.0, 1, "-0.0")]
    #[case(2.0, 0, "2")]
    #[case(f64::NAN, 6, "nan")]
    #[case(f64::NEG_INFINITY, 6, "-inf")]
    fn fixed_point(#[case] value: f64, #[case] precision: usize, #[case] expected: &str) {
        let mut storage = [0u8; 32];
        let mut out = StrBuf::new(&mut storage);
        fixed(&mut out, value, precision, Layout::default(), Flags::default());
        assert_eq!(out.as_str(), Ok(expected));
    }

    #[rstest]
    #[case(1500.0, FloatStyle::Exponent(2), false, "1.50e3")]
    #[case(1500.0, FloatStyle::Exponent(2), true, "1.50E3")]
    #[case(0.1, FloatStyle::Shortest, false, "0.1")]
    #[case(f64::INFINITY, FloatStyle::Shortest, true, "INF")]
    #[case(f64::NAN, FloatStyle::Fixed(3), true, "NAN")]
    fn float_styles(#[case] value: f64, #[case] style: FloatStyle, #[case] upper: bool, #[case] expected: &str) {
        let mut storage = [0u8; 32];
        let mut out = StrBuf::new(&mut storage);
        float(&mut out, value, style, upper, Layout::default(), Flags::default());
        assert_eq!(out.as_str(), Ok(expected));
    }

    #[test]
    fn non_finite_is_space_padded() {
        let mut storage = [0u8; 32];
        let mut out = StrBuf::new(&mut storage);
        fixed(&mut out, f64::INFINITY, 6, Layout::zero_padded(5), Flags::default());
        assert_eq!(out.as_str(), Ok("  inf"));
    }

    #[rstest]
    #[case(0.25, FloatStyle::Fixed(1200), "0.25", 1198, "")]
    #[case(1.5, FloatStyle::Exponent(1200), "1.5", 1199, "e0")]
    #[case(-2.0, FloatStyle::Exponent(MAX_FLOAT_PRECISION + 1), "-2.", MAX_FLOAT_PRECISION + 1, "e0")]
    fn precision_past_the_cap_is_zero_filled(
        #[case] value: f64,
        #[case] style: FloatStyle,
        #[case] head: &str,
        #[case] zeros: usize,
        #[case] tail: &str,
    ) {
        let mut expected = alloc::string::String::from(head);
        expected.extend(core::iter::repeat_n('0', zeros));
        expected.push_str(tail);

        let mut storage = alloc::vec![0u8; 4096];
        let mut out = StrBuf::new(&mut storage);
        float(&mut out, value, style, false, Layout::default(), Flags::default());
        assert_eq!(out.as_str(), Ok(expected.as_str()));
    }

    #[test]
    fn width_counts_zeros_past_the_cap() {
        let mut storage = alloc::vec![0u8; 4096];
        let mut out = StrBuf::new(&mut storage);
        let layout = Layout::numeric(Some(1210), Flags::default());
        let end = fixed(&mut out, 1.0, 1200, layout, Flags::default());
        assert_eq!(end, 1210);
        assert!(out.as_bytes().starts_with(b"        1.000"));
    }

    #[test]
    fn zero_padded_float_keeps_sign_first() {
        let mut storage = [0u8; 32];
        let mut out = StrBuf::new(&mut storage);
        fixed(&mut out, -1.5, 1, Layout::zero_padded(7), Flags::default());
        assert_eq!(out.as_str(), Ok("-0001.5"));
    }
}
