//! A `log::Log` implementation that renders every event through a
//! `%(key)s` template.
//!
//! Each event is captured into a [`Record`], expanded into a 1024-byte stack
//! buffer and written to the sink in one call. Lines longer than the buffer
//! are truncated. Sink errors are swallowed: logging never fails the caller.

use core::{
    fmt::Write as _,
    sync::atomic::{AtomicU64, Ordering},
};
use std::{
    boxed::Box,
    fs::OpenOptions,
    io::{self, Write},
    path::PathBuf,
    string::{String, ToString},
    sync::{Mutex, PoisonError},
    thread,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::{
    buffer::StrBuf,
    error::FormatError,
    printf::Arg,
    record::{Record, level_name},
    template::format_record_into,
    timefmt,
};

/// Size of the stack buffer each line is formatted into.
pub const LINE_CAPACITY: usize = 1024;

const TIMESTAMP_CAPACITY: usize = 128;

/// Logger name reported as `%(name)s`.
pub const ROOT_LOGGER: &str = "root";

const UNKNOWN_THREAD: &str = "UnknownThread";

/// Configuration for [`Logger`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoggerOptions {
    /// Events with a lower level number are dropped.
    ///
    /// # Default
    ///
    /// `0` (everything is logged)
    pub level: i32,
    /// Template each line is rendered with. A newline is appended.
    ///
    /// # Default
    ///
    /// `%(asctime)s - %(levelname)s - %(message)s`
    pub format: String,
    /// Layout of `%(asctime)s`, see [`timefmt`].
    ///
    /// # Default
    ///
    /// `%Y-%m-%d %H:%M:%S`
    pub time_format: String,
    /// Seconds east of UTC that `%(asctime)s` is shown at.
    ///
    /// # Default
    ///
    /// `0` (UTC)
    pub utc_offset: i32,
    /// File to append to. Standard error when unset or when the file cannot
    /// be opened.
    ///
    /// # Default
    ///
    /// `None`
    pub file: Option<PathBuf>,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        Self {
            level: 0,
            format: "%(asctime)s - %(levelname)s - %(message)s".to_string(),
            time_format: "%Y-%m-%d %H:%M:%S".to_string(),
            utc_offset: 0,
            file: None,
        }
    }
}

impl LoggerOptions {
    /// Defaults overridden by `LOGGING_LOG_LEVEL`, `LOGGING_LOG_FORMAT`,
    /// `LOGGING_TIME_FORMAT`, `LOGGING_UTC_OFFSET` (seconds) and
    /// `LOGGING_LOG_FILE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(format) = lookup("LOGGING_LOG_FORMAT") {
            options.format = format;
        }
        if let Some(time_format) = lookup("LOGGING_TIME_FORMAT") {
            options.time_format = time_format;
        }
        if let Some(level) = lookup("LOGGING_LOG_LEVEL") {
            options.level = parse_int(&level);
        }
        if let Some(offset) = lookup("LOGGING_UTC_OFFSET") {
            options.utc_offset = parse_int(&offset);
        }
        if let Some(file) = lookup("LOGGING_LOG_FILE") {
            options.file = Some(PathBuf::from(file));
        }
        options
    }
}

/// Reads the leading integer of `text`, `0` if there is none. Trailing junk
/// is ignored and out of range values saturate.
fn parse_int(text: &str) -> i32 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i32, |acc, d| acc.saturating_mul(10).saturating_add(i32::from(d - b'0')));
    if negative { magnitude.saturating_neg() } else { magnitude }
}

/// Level number for a `log` crate level. `Trace` sits below `DEBUG`.
pub fn level_number(level: log::Level) -> i32 {
    match level {
        log::Level::Error => 40,
        log::Level::Warn => 30,
        log::Level::Info => 20,
        log::Level::Debug => 10,
        log::Level::Trace => 5,
    }
}

/// The most verbose `log` filter that still passes `threshold`.
pub fn max_level_for(threshold: i32) -> log::LevelFilter {
    [
        log::Level::Trace,
        log::Level::Debug,
        log::Level::Info,
        log::Level::Warn,
        log::Level::Error,
    ]
    .into_iter()
    .find(|&level| level_number(level) >= threshold)
    .map_or(log::LevelFilter::Off, |level| level.to_level_filter())
}

/// Where an event was raised.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Location<'a> {
    pub path: &'a str,
    pub line: u32,
    pub function: &'a str,
}

impl<'a> Location<'a> {
    pub fn new(path: &'a str, line: u32, function: &'a str) -> Self {
        Self { path, line, function }
    }

    /// The caller's file and line. There is no function name to be had this
    /// way, so `function` is left empty.
    #[track_caller]
    pub fn caller() -> Location<'static> {
        let caller = core::panic::Location::caller();
        Location::new(caller.file(), caller.line(), "")
    }

    fn file_name(&self) -> &'a str {
        self.path.rfind('/').map_or(self.path, |slash| &self.path[slash + 1..])
    }
}

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

std::thread_local! {
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

fn since_epoch() -> Duration {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default()
}

/// The longest UTF-8 prefix of `bytes`. Truncation can split a character.
fn utf8_prefix(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => core::str::from_utf8(&bytes[..err.valid_up_to()]).unwrap_or_default(),
    }
}

/// Template-driven logger writing whole lines to a sink.
pub struct Logger {
    options: LoggerOptions,
    sink: Mutex<Box<dyn Write + Send>>,
    started: f64,
}

impl core::fmt::Debug for Logger {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Logger")
            .field("options", &self.options)
            .field("started", &self.started)
            .finish_non_exhaustive()
    }
}

impl Logger {
    pub fn new(options: LoggerOptions, sink: impl Write + Send + 'static) -> Self {
        Self {
            options,
            sink: Mutex::new(Box::new(sink)),
            started: since_epoch().as_secs_f64(),
        }
    }

    /// Opens `options.file` for appending, falling back to standard error.
    pub fn from_options(options: LoggerOptions) -> Self {
        let file = options
            .file
            .as_ref()
            .and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());
        match file {
            Some(file) => Self::new(options, file),
            None => Self::new(options, io::stderr()),
        }
    }

    pub fn options(&self) -> &LoggerOptions {
        &self.options
    }

    /// Logs a printf-style message at `level`. Nothing happens below the
    /// configured threshold.
    ///
    /// # Errors
    ///
    /// A `format` that is malformed or does not match `args`; nothing is
    /// written in that case.
    pub fn raise(&self, level: i32, location: Location<'_>, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        if level < self.options.level {
            return Ok(());
        }
        self.emit(level, location, format, args)
    }

    fn emit(&self, level: i32, location: Location<'_>, format: &str, args: &[Arg<'_>]) -> Result<(), FormatError> {
        let now = since_epoch();
        let created = now.as_secs_f64();

        let mut timestamp = [0u8; TIMESTAMP_CAPACITY];
        let seconds = i64::try_from(now.as_secs()).unwrap_or(i64::MAX);
        let n = timefmt::format_offset_into(
            &mut timestamp,
            0,
            &self.options.time_format,
            seconds,
            self.options.utc_offset,
        );

        let current = thread::current();
        let record = Record {
            name: ROOT_LOGGER,
            level_number: level,
            level_name: level_name(level),
            source_path: location.path,
            file_name: location.file_name(),
            function_name: location.function,
            line_number: i32::try_from(location.line).unwrap_or(i32::MAX),
            created,
            relative_created: (created - self.started) * 1000.0,
            timestamp: utf8_prefix(&timestamp[..n]),
            msecs: now.subsec_millis(),
            thread_id: THREAD_ID.with(|id| *id),
            thread_name: current.name().unwrap_or(UNKNOWN_THREAD),
            process_id: i32::try_from(std::process::id()).unwrap_or(i32::MAX),
            message_format: format,
            message_args: args,
        };

        let mut line = [0u8; LINE_CAPACITY];
        let n = format_record_into(&mut line, &self.options.format, &record)?;

        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = sink.write_all(&line[..n]);
        Ok(())
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        level_number(metadata.level()) >= self.options.level
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let mut storage = [0u8; LINE_CAPACITY];
        let mut message = StrBuf::new(&mut storage);
        let _ = write!(message, "{}", record.args());

        let location = Location::new(
            record.file().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
            record.module_path().unwrap_or(""),
        );
        // `%s` with one string argument cannot fail.
        let _ = self.emit(
            level_number(record.level()),
            location,
            "%s",
            &[Arg::Str(message.as_bytes())],
        );
    }

    fn flush(&self) {
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        let _ = sink.flush();
    }
}

/// Installs a [`Logger`] configured from the environment as the global
/// `log` logger.
///
/// # Errors
///
/// Fails if a global logger is already installed.
pub fn init() -> Result<(), log::SetLoggerError> {
    init_with(LoggerOptions::from_env())
}

/// Like [`init`] with explicit options.
///
/// # Errors
///
/// Fails if a global logger is already installed.
pub fn init_with(options: LoggerOptions) -> Result<(), log::SetLoggerError> {
    let max_level = max_level_for(options.level);
    log::set_boxed_logger(Box::new(Logger::from_options(options)))?;
    log::set_max_level(max_level);
    Ok(())
}
