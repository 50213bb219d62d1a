#![no_main]

mod args;

use arbitrary::Arbitrary;
use args::{FuzzArg, terminator};
use boundfmt::{Record, format_record_into, level_name};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    capacity: u16,
    template: String,
    level: i32,
    path: String,
    message: String,
    args: Vec<FuzzArg>,
}

fn template(input: &Input) {
    let args: Vec<_> = input.args.iter().map(FuzzArg::as_arg).collect();
    let file_name = input.path.rsplit('/').next().unwrap_or_default();
    let record = Record {
        name: "root",
        level_number: input.level,
        level_name: level_name(input.level),
        source_path: &input.path,
        file_name,
        function_name: "fuzz",
        line_number: 1,
        created: 1.5,
        relative_created: 0.25,
        timestamp: "1970-01-01 00:00:01",
        msecs: 500,
        thread_id: 1,
        thread_name: "main",
        process_id: 1,
        message_format: &input.message,
        message_args: &args,
    };

    let capacity = 1 + usize::from(input.capacity);
    let mut buf = vec![b'x'; capacity];
    let result = format_record_into(&mut buf, &input.template, &record);
    let end = terminator(&buf);
    assert!(end < capacity);
    if let Ok(n) = result {
        assert_eq!(n, end);
    }
}

fuzz_target!(|input: Input| template(&input));
