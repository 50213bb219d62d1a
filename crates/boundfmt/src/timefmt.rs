//! A small strftime subset for `%(asctime)s`, rendered in UTC or at a fixed
//! offset from it.
//!
//! Supported directives:
//!
//! ```text
//! %Y %y %m %d %e %j %H %I %M %S %p %a %A %b %B %F %T %s %z %%
//! ```
//!
//! Anything else after a `%` is copied through unchanged, as is a trailing
//! `%`. Output goes through [`StrBuf`] and is truncated like everything else.

use crate::{
    buffer::{StrBuf, until_nul},
    digits::Digits,
    printf::{
        Flags,
        render::{self, Layout},
    },
};

const SECONDS_PER_DAY: i64 = 86_400;

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Days before the first of each month in a common year.
const DAYS_BEFORE_MONTH: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Broken-down time at a fixed offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilTime {
    pub year: i64,
    /// `1..=12`
    pub month: u32,
    /// `1..=31`
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    /// `0` is Sunday.
    pub weekday: u32,
    /// `1..=366`
    pub day_of_year: u32,
    /// The seconds since the Unix epoch this was built from.
    pub unix: i64,
    /// Seconds east of UTC the other fields were shifted by.
    pub offset: i32,
}

impl CivilTime {
    /// Splits seconds since the Unix epoch into UTC calendar fields.
    pub fn from_unix(unix: i64) -> Self {
        Self::from_unix_offset(unix, 0)
    }

    /// Like [`CivilTime::from_unix`], with the wall clock `offset` seconds
    /// east of UTC.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_unix_offset(unix: i64, offset: i32) -> Self {
        let local = unix.saturating_add(i64::from(offset));
        let days = local.div_euclid(SECONDS_PER_DAY);
        let secs = local.rem_euclid(SECONDS_PER_DAY) as u32;

        // Shift the epoch to 0000-03-01 so leap days fall at the end of each
        // 400-year era.
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
        let year = yoe + era * 400 + i64::from(month <= 2);

        let leap_day = u32::from(month > 2 && is_leap(year));
        Self {
            year,
            month,
            day,
            hour: secs / 3600,
            minute: secs / 60 % 60,
            second: secs % 60,
            weekday: (days + 4).rem_euclid(7) as u32,
            day_of_year: DAYS_BEFORE_MONTH[month as usize - 1] + day + leap_day,
            unix,
            offset,
        }
    }
}

fn is_leap(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn short_year(year: i64) -> u32 {
    year.rem_euclid(100) as u32
}

fn two_digits(out: &mut StrBuf<'_>, value: u32) {
    render::unsigned(out, u64::from(value), Digits::DECIMAL, b"", Layout::zero_padded(2));
}

fn directive(out: &mut StrBuf<'_>, time: &CivilTime, c: u8) {
    let flags = Flags::default();
    match c {
        b'Y' => {
            render::signed(out, time.year, Layout::default(), flags);
        }
        b'y' => two_digits(out, short_year(time.year)),
        b'm' => two_digits(out, time.month),
        b'd' => two_digits(out, time.day),
        b'e' => {
            render::unsigned(
                out,
                u64::from(time.day),
                Digits::DECIMAL,
                b"",
                Layout::numeric(Some(2), flags),
            );
        }
        b'j' => {
            render::unsigned(
                out,
                u64::from(time.day_of_year),
                Digits::DECIMAL,
                b"",
                Layout::zero_padded(3),
            );
        }
        b'H' => two_digits(out, time.hour),
        b'I' => two_digits(out, (time.hour + 11) % 12 + 1),
        b'M' => two_digits(out, time.minute),
        b'S' => two_digits(out, time.second),
        b'p' => {
            out.push_str(if time.hour < 12 { "AM" } else { "PM" });
        }
        b'a' => {
            out.push_str(&WEEKDAYS[time.weekday as usize][..3]);
        }
        b'A' => {
            out.push_str(WEEKDAYS[time.weekday as usize]);
        }
        b'b' => {
            out.push_str(&MONTHS[time.month as usize - 1][..3]);
        }
        b'B' => {
            out.push_str(MONTHS[time.month as usize - 1]);
        }
        b'F' => {
            directive(out, time, b'Y');
            out.push_byte(b'-');
            directive(out, time, b'm');
            out.push_byte(b'-');
            directive(out, time, b'd');
        }
        b'T' => {
            directive(out, time, b'H');
            out.push_byte(b':');
            directive(out, time, b'M');
            out.push_byte(b':');
            directive(out, time, b'S');
        }
        b's' => {
            render::signed(out, time.unix, Layout::default(), flags);
        }
        b'z' => {
            out.push_byte(if time.offset < 0 { b'-' } else { b'+' });
            let minutes = time.offset.unsigned_abs() / 60;
            two_digits(out, minutes / 60);
            two_digits(out, minutes % 60);
        }
        b'%' => {
            out.push_byte(b'%');
        }
        other => {
            out.push_byte(b'%');
            out.push_byte(other);
        }
    }
}

/// Appends `time` rendered with `format`. Returns the new cursor.
pub fn format_time(out: &mut StrBuf<'_>, format: &str, time: &CivilTime) -> usize {
    let mut rest = until_nul(format.as_bytes());
    while !out.is_full() {
        let Some(percent) = rest.iter().position(|&b| b == b'%') else {
            out.copy(rest, None);
            break;
        };
        out.copy(&rest[..percent], None);
        match rest.get(percent + 1) {
            Some(&c) => {
                directive(out, time, c);
                rest = &rest[percent + 2..];
            }
            None => {
                out.push_byte(b'%');
                break;
            }
        }
    }
    out.len()
}

/// Appends `unix` seconds rendered with `format` in UTC into the string in
/// `dest` at `cursor`. Returns the new cursor.
///
/// ```
/// use boundfmt::timefmt::format_utc_into;
///
/// let mut buf = [0u8; 32];
/// let n = format_utc_into(&mut buf, 0, "%Y-%m-%d %H:%M:%S", 1_700_000_000);
/// assert_eq!(&buf[..n], b"2023-11-14 22:13:20");
/// ```
pub fn format_utc_into(dest: &mut [u8], cursor: usize, format: &str, unix: i64) -> usize {
    format_offset_into(dest, cursor, format, unix, 0)
}

/// Like [`format_utc_into`] with the wall clock `offset` seconds east of UTC.
///
/// ```
/// use boundfmt::timefmt::format_offset_into;
///
/// let mut buf = [0u8; 32];
/// let n = format_offset_into(&mut buf, 0, "%H:%M %z", 1_700_000_000, -5 * 3600);
/// assert_eq!(&buf[..n], b"17:13 -0500");
/// ```
pub fn format_offset_into(dest: &mut [u8], cursor: usize, format: &str, unix: i64, offset: i32) -> usize {
    format_time(
        &mut StrBuf::at(dest, cursor),
        format,
        &CivilTime::from_unix_offset(unix, offset),
    )
}
