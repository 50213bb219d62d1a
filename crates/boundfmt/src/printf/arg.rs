use bstr::BStr;

/// One argument to a printf-style conversion.
///
/// Each variant carries its own width, which is what a C variadic list leaves
/// implicit. Integer conversions reinterpret the argument's bits at that width
/// (so `%u` of `Arg::I32(-1)` is `4294967295` and `%d` of `Arg::U8(255)` is
/// `-1`), then narrow further for the `hh` and `h` modifiers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Arg<'a> {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    Char(char),
    /// Bytes for `%s`; copying stops at the first NUL, like a C string.
    Str(&'a [u8]),
    /// An address for `%p`.
    Ptr(usize),
    F64(f64),
}

impl Arg<'_> {
    /// The address of `value`, for `%p`.
    pub fn ptr<T: ?Sized>(value: &T) -> Self {
        Arg::Ptr(core::ptr::from_ref(value).addr())
    }

    /// The argument read as a signed integer of its own width.
    #[expect(clippy::cast_possible_wrap)]
    pub(crate) fn as_signed(&self) -> Option<i64> {
        Some(match *self {
            Arg::I8(v) => i64::from(v),
            Arg::I16(v) => i64::from(v),
            Arg::I32(v) => i64::from(v),
            Arg::I64(v) => v,
            Arg::Isize(v) => v as i64,
            Arg::U8(v) => i64::from(v as i8),
            Arg::U16(v) => i64::from(v as i16),
            Arg::U32(v) => i64::from(v as i32),
            Arg::U64(v) => v as i64,
            Arg::Usize(v) | Arg::Ptr(v) => v as isize as i64,
            Arg::Char(c) => i64::from(u32::from(c)),
            Arg::Str(_) | Arg::F64(_) => return None,
        })
    }

    /// The argument read as an unsigned integer of its own width.
    #[expect(clippy::cast_sign_loss)]
    pub(crate) fn as_unsigned(&self) -> Option<u64> {
        Some(match *self {
            Arg::I8(v) => u64::from(v as u8),
            Arg::I16(v) => u64::from(v as u16),
            Arg::I32(v) => u64::from(v as u32),
            Arg::I64(v) => v as u64,
            Arg::Isize(v) => v as usize as u64,
            Arg::U8(v) => u64::from(v),
            Arg::U16(v) => u64::from(v),
            Arg::U32(v) => u64::from(v),
            Arg::U64(v) => v,
            Arg::Usize(v) | Arg::Ptr(v) => v as u64,
            Arg::Char(c) => u64::from(u32::from(c)),
            Arg::Str(_) | Arg::F64(_) => return None,
        })
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Arg<'_> {
                #[inline]
                fn from(value: $ty) -> Self {
                    Arg::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    char => Char,
    f64 => F64,
}

impl From<f32> for Arg<'_> {
    fn from(value: f32) -> Self {
        Arg::F64(f64::from(value))
    }
}

impl From<bool> for Arg<'_> {
    fn from(value: bool) -> Self {
        Arg::I32(i32::from(value))
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(value: &'a str) -> Self {
        Arg::Str(value.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(value: &'a [u8]) -> Self {
        Arg::Str(value)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Arg<'a> {
    fn from(value: &'a [u8; N]) -> Self {
        Arg::Str(value)
    }
}

impl<'a> From<&'a BStr> for Arg<'a> {
    fn from(value: &'a BStr) -> Self {
        Arg::Str(value)
    }
}

impl<T: ?Sized> From<*const T> for Arg<'_> {
    fn from(value: *const T) -> Self {
        Arg::Ptr(value.addr())
    }
}

impl<T: ?Sized> From<*mut T> for Arg<'_> {
    fn from(value: *mut T) -> Self {
        Arg::Ptr(value.addr())
    }
}
