use alloc::string::String;

use rstest::rstest;

use super::*;
use crate::{
    FloatMode,
    error::FormatErrorKind,
    printf::Arg,
};

const ARGS: [Arg<'static>; 2] = [Arg::Str(b"disk"), Arg::I32(93)];

fn sample() -> Record<'static> {
    Record {
        name: "root",
        level_number: 30,
        level_name: "WARN",
        source_path: "src/storage/volume.rs",
        file_name: "volume.rs",
        function_name: "storage::volume",
        line_number: 212,
        created: 1_700_000_000.25,
        relative_created: 1234.5,
        timestamp: "2023-11-14 22:13:20",
        msecs: 7,
        thread_id: 3,
        thread_name: "main",
        process_id: 4242,
        message_format: "%s is %d%% full",
        message_args: &ARGS,
    }
}

fn expand_with(capacity: usize, template: &str, record: &Record<'_>) -> Result<String, FormatError> {
    let mut storage = alloc::vec![0xFFu8; capacity];
    let n = format_record_into(&mut storage, template, record)?;
    assert_eq!(storage[n], 0);
    Ok(String::from_utf8(storage[..n].to_vec()).unwrap())
}

fn expand(template: &str) -> String {
    expand_with(256, template, &sample()).unwrap()
}

#[test]
fn level_and_message() {
    let args = [Arg::I32(7)];
    let record = Record {
        level_name: "ERROR",
        message_format: "boom %d",
        message_args: &args,
        ..Record::default()
    };
    assert_eq!(
        expand_with(64, "%(levelname)s: %(message)s", &record).unwrap(),
        "ERROR: boom 7\n"
    );
}

#[rstest]
#[case("%(name)s", "root\n")]
#[case("%(levelno)d", "30\n")]
#[case("%(levelname)s", "WARN\n")]
#[case("%(pathname)s", "src/storage/volume.rs\n")]
#[case("%(filename)s", "volume.rs\n")]
#[case("%(funcName)s", "storage::volume\n")]
#[case("%(lineno)d", "212\n")]
#[case("%(created)f", "1700000000.250000\n")]
#[case("%(asctime)s", "2023-11-14 22:13:20\n")]
#[case("%(msecs)d", "007\n")]
#[case("%(thread)d", "3\n")]
#[case("%(threadName)s", "main\n")]
#[case("%(process)d", "4242\n")]
#[case("%(message)s", "disk is 93% full\n")]
#[case("%(relativeCreated)f", "1234.500000\n")]
fn every_field(#[case] template: &str, #[case] expected: &str) {
    assert_eq!(expand(template), expected);
}

#[rstest]
#[case("%(lineno)s")]
#[case("%(lineno)d")]
#[case("%(lineno)f")]
fn suffix_does_not_change_rendering(#[case] template: &str) {
    assert_eq!(expand(template), "212\n");
}

#[test]
fn unknown_key_renders_nothing() {
    assert_eq!(expand("%(bogus)s-end"), "-end\n");
    assert_eq!(expand("[%(Name)s]"), "[]\n");
}

#[test]
fn non_placeholder_is_copied() {
    assert_eq!(expand("%(name)x tail"), "%(name)x tail\n");
    assert_eq!(expand("%(name)"), "%(name)\n");
}

#[test]
fn unterminated_placeholder_stops_output() {
    assert_eq!(expand("before %(name and more"), "before \n");
}

#[rstest]
#[case("100%%", "100%\n")]
#[case("50% off", "50% off\n")]
#[case("trailing %", "trailing %\n")]
#[case("%d", "%d\n")]
fn bare_percent(#[case] template: &str, #[case] expected: &str) {
    assert_eq!(expand(template), expected);
}

#[test]
fn newline_is_always_appended() {
    assert_eq!(expand(""), "\n");
    assert_eq!(expand("line\n"), "line\n\n");
}

#[rstest]
#[case(1, "")]
#[case(2, "W")]
#[case(5, "WARN")]
#[case(6, "WARN:")]
#[case(8, "WARN: x")]
#[case(9, "WARN: x\n")]
fn truncation_drops_the_newline_first(#[case] capacity: usize, #[case] expected: &str) {
    assert_eq!(expand_with(capacity, "%(levelname)s: x", &sample()).unwrap(), expected);
}

#[test]
fn default_format_line() {
    assert_eq!(
        expand("%(asctime)s - %(levelname)s - %(message)s"),
        "2023-11-14 22:13:20 - WARN - disk is 93% full\n"
    );
}

#[test]
fn python_style_line() {
    assert_eq!(
        expand("%(asctime)s,%(msecs)d %(name)s %(filename)s:%(lineno)d [%(process)d/%(threadName)s] %(message)s"),
        "2023-11-14 22:13:20,007 root volume.rs:212 [4242/main] disk is 93% full\n"
    );
}

#[test]
fn message_float_mode_follows_options() {
    let args = [Arg::F64(0.5)];
    let record = Record {
        message_format: "ratio %.2f",
        message_args: &args,
        ..Record::default()
    };
    assert_eq!(expand_with(64, "%(message)s", &record).unwrap(), "ratio <float>\n");

    let mut storage = [0u8; 64];
    let mut out = StrBuf::new(&mut storage);
    out.format_record_with(
        "%(message)s",
        &record,
        ConverterOptions {
            float_mode: FloatMode::Fixed,
        },
    )
    .unwrap();
    assert_eq!(out.as_str(), Ok("ratio 0.50\n"));
}

#[test]
fn malformed_message_is_an_error() {
    let record = Record {
        message_format: "%d",
        ..Record::default()
    };
    let err = expand_with(64, "x %(message)s", &record).unwrap_err();
    assert_eq!(err.kind, FormatErrorKind::MissingArgument { index: 0 });
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(64)]
fn malformed_message_fails_at_any_capacity(#[case] capacity: usize) {
    let record = Record {
        name: "rootlogger",
        message_format: "%d",
        ..Record::default()
    };
    let err = expand_with(capacity, "%(name)s %(message)s", &record).unwrap_err();
    assert_eq!(err.kind, FormatErrorKind::MissingArgument { index: 0 });
    assert_eq!(err.offset, 0);
}

#[rstest]
#[case(-1, "-1")]
#[case(i32::MAX, "2147483647")]
#[case(i32::MIN, "-2147483648")]
fn line_and_process_are_signed(#[case] value: i32, #[case] expected: &str) {
    let record = Record {
        line_number: value,
        process_id: value,
        ..Record::default()
    };
    let line = expand_with(64, "%(lineno)d %(process)d", &record).unwrap();
    assert_eq!(line, alloc::format!("{expected} {expected}\n"));
}

#[test]
fn message_is_not_reexpanded_as_template() {
    let args = [Arg::Str(b"%(name)s")];
    let record = Record {
        name: "root",
        message_format: "%s",
        message_args: &args,
        ..Record::default()
    };
    assert_eq!(expand_with(64, "%(message)s", &record).unwrap(), "%(name)s\n");
}
