use arbitrary::Arbitrary;
use boundfmt::Arg;

/// Owned stand-in for [`Arg`] that `arbitrary` can generate.
#[derive(Debug, Arbitrary)]
pub enum FuzzArg {
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U32(u32),
    U64(u64),
    Usize(usize),
    Char(char),
    Str(Vec<u8>),
    Ptr(usize),
    F64(f64),
}

impl FuzzArg {
    pub fn as_arg(&self) -> Arg<'_> {
        match *self {
            FuzzArg::I8(v) => Arg::I8(v),
            FuzzArg::I16(v) => Arg::I16(v),
            FuzzArg::I32(v) => Arg::I32(v),
            FuzzArg::I64(v) => Arg::I64(v),
            FuzzArg::U8(v) => Arg::U8(v),
            FuzzArg::U32(v) => Arg::U32(v),
            FuzzArg::U64(v) => Arg::U64(v),
            FuzzArg::Usize(v) => Arg::Usize(v),
            FuzzArg::Char(c) => Arg::Char(c),
            FuzzArg::Str(ref bytes) => Arg::Str(bytes),
            FuzzArg::Ptr(address) => Arg::Ptr(address),
            FuzzArg::F64(v) => Arg::F64(v),
        }
    }
}

/// Position of the terminator, which must exist inside `buf`.
pub fn terminator(buf: &[u8]) -> usize {
    buf.iter()
        .position(|&b| b == 0)
        .expect("output must be NUL-terminated")
}
