#![no_main]

mod args;

use arbitrary::Arbitrary;
use args::{FuzzArg, terminator};
use boundfmt::{ConverterOptions, FloatMode, StrBuf};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u8,
    cursor: u8,
    fixed_floats: bool,
    format: String,
    args: Vec<FuzzArg>,
}

fn format(input: &Input) {
    let args: Vec<_> = input.args.iter().map(FuzzArg::as_arg).collect();
    let options = ConverterOptions {
        float_mode: if input.fixed_floats {
            FloatMode::Fixed
        } else {
            FloatMode::Placeholder
        },
    };

    let capacity = 1 + usize::from(input.capacity);
    let mut small = vec![b'x'; capacity];
    let small_result = StrBuf::at(&mut small, usize::from(input.cursor)).format_with(&input.format, &args, options);

    let mut large = vec![b'x'; 1 << 16];
    let large_result = StrBuf::at(&mut large, usize::from(input.cursor)).format_with(&input.format, &args, options);

    // Buffer size never changes whether the format is accepted.
    match (&small_result, &large_result) {
        (Ok(end), Ok(_)) => assert_eq!(*end, terminator(&small)),
        (Err(s), Err(l)) => assert_eq!(s, l),
        _ => panic!("outcome depends on capacity: {small_result:?} vs {large_result:?}"),
    }

    let end = terminator(&small);
    assert!(end < capacity);
    assert_eq!(small[..end], large[..end]);
}

fuzz_target!(|input: Input| format(&input));
