use crate::printf::Arg;

/// Standard level numbers. Any `i32` is a valid level number; these are the
/// ones with names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(i32)]
pub enum Level {
    NotSet = 0,
    Debug = 10,
    Info = 20,
    Warn = 30,
    Error = 40,
    Critical = 50,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::NotSet,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Critical,
    ];

    #[inline]
    pub fn number(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::NotSet => "NOTSET",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Critical => "CRIT",
        }
    }
}

/// Name for an arbitrary level number: the name of the lowest standard level
/// at or above it, or `UNDEFINED` past [`Level::Critical`].
///
/// ```
/// use boundfmt::level_name;
/// assert_eq!(level_name(20), "INFO");
/// assert_eq!(level_name(15), "INFO");
/// assert_eq!(level_name(-3), "NOTSET");
/// assert_eq!(level_name(51), "UNDEFINED");
/// ```
pub fn level_name(levelno: i32) -> &'static str {
    Level::ALL
        .iter()
        .find(|level| level.number() >= levelno)
        .map_or("UNDEFINED", |level| level.name())
}

/// One log event as seen by the template formatter.
///
/// The record is filled in by whoever raises the event and only read while
/// formatting. Field names in templates (`%(lineno)d`, ...) map onto these
/// fields; see [`Field`](crate::Field).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Record<'a> {
    /// Logger name (`%(name)s`).
    pub name: &'a str,
    pub level_number: i32,
    pub level_name: &'a str,
    /// Full source path of the call site.
    pub source_path: &'a str,
    /// Last component of `source_path`.
    pub file_name: &'a str,
    pub function_name: &'a str,
    pub line_number: i32,
    /// Seconds since the Unix epoch.
    pub created: f64,
    /// Milliseconds since the logging layer started.
    pub relative_created: f64,
    /// Human-readable timestamp (`%(asctime)s`).
    pub timestamp: &'a str,
    /// Millisecond part of `created`.
    pub msecs: u32,
    pub thread_id: u64,
    pub thread_name: &'a str,
    pub process_id: i32,
    /// printf-subset format for `%(message)s`, expanded against
    /// `message_args`.
    pub message_format: &'a str,
    pub message_args: &'a [Arg<'a>],
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, "NOTSET")]
    #[case(1, "DEBUG")]
    #[case(10, "DEBUG")]
    #[case(30, "WARN")]
    #[case(41, "CRIT")]
    #[case(50, "CRIT")]
    #[case(i32::MAX, "UNDEFINED")]
    #[case(i32::MIN, "NOTSET")]
    fn names_round_up(#[case] levelno: i32, #[case] expected: &str) {
        assert_eq!(level_name(levelno), expected);
    }

    #[test]
    fn standard_levels_name_themselves() {
        for level in Level::ALL {
            assert_eq!(level_name(level.number()), level.name());
        }
    }
}
