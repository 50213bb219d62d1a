use alloc::{string::String, vec::Vec};

use quickcheck::QuickCheck;

use super::quickcheck_tests;
use crate::{Arg, Field, Record, format_record_into};

const ARGS: [Arg<'static>; 2] = [Arg::Str(b"eth0"), Arg::U32(1500)];

fn record() -> Record<'static> {
    Record {
        name: "root",
        level_number: 20,
        level_name: "INFO",
        source_path: "src/net/link.rs",
        file_name: "link.rs",
        function_name: "net::link",
        line_number: 88,
        created: 1_600_000_000.5,
        relative_created: 12.25,
        timestamp: "2020-09-13 12:26:40",
        msecs: 500,
        thread_id: 1,
        thread_name: "main",
        process_id: 77,
        message_format: "%s mtu %u",
        message_args: &ARGS,
    }
}

/// Property: any template expands without error into a newline-terminated
/// line, and a smaller buffer holds a prefix of that line.
#[test]
fn template_truncation_yields_prefix_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(pieces: Vec<(String, u8)>, capacity: u8) -> bool {
        // Mix free text with real placeholders so both paths get exercised.
        let mut template = String::new();
        for (text, key) in &pieces {
            template.push_str(text);
            let field = Field::ALL[usize::from(*key) % Field::ALL.len()];
            template.push_str("%(");
            template.push_str(field.key());
            template.push_str(")s");
        }

        let record = record();
        let mut large = alloc::vec![0u8; 1 << 17];
        let mut small = alloc::vec![0u8; 1 + usize::from(capacity % 64)];
        let (Ok(large_end), Ok(small_end)) = (
            format_record_into(&mut large, &template, &record),
            format_record_into(&mut small, &template, &record),
        ) else {
            return false;
        };

        large_end < large.len() - 1
            && large[large_end - 1] == b'\n'
            && small_end < small.len()
            && small[small_end] == 0
            && small[..small_end] == large[..small_end]
    }

    QuickCheck::new()
        .tests(quickcheck_tests())
        .quickcheck(prop as fn(Vec<(String, u8)>, u8) -> bool);
}
