use crate::{
    buffer::StrBuf,
    digits::Digits,
    error::FormatError,
    options::ConverterOptions,
    printf::{
        Flags,
        render::{self, Layout},
    },
    record::Record,
};

/// A record field addressable from a template as `%(key)s`.
///
/// Keys are matched exactly and case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    LevelNo,
    LevelName,
    PathName,
    FileName,
    FuncName,
    LineNo,
    Created,
    AscTime,
    Msecs,
    Thread,
    ThreadName,
    Process,
    Message,
    RelativeCreated,
}

impl Field {
    pub const ALL: [Field; 15] = [
        Field::Name,
        Field::LevelNo,
        Field::LevelName,
        Field::PathName,
        Field::FileName,
        Field::FuncName,
        Field::LineNo,
        Field::Created,
        Field::AscTime,
        Field::Msecs,
        Field::Thread,
        Field::ThreadName,
        Field::Process,
        Field::Message,
        Field::RelativeCreated,
    ];

    pub fn from_key(key: &[u8]) -> Option<Self> {
        Some(match key {
            b"name" => Field::Name,
            b"levelno" => Field::LevelNo,
            b"levelname" => Field::LevelName,
            b"pathname" => Field::PathName,
            b"filename" => Field::FileName,
            b"funcName" => Field::FuncName,
            b"lineno" => Field::LineNo,
            b"created" => Field::Created,
            b"asctime" => Field::AscTime,
            b"msecs" => Field::Msecs,
            b"thread" => Field::Thread,
            b"threadName" => Field::ThreadName,
            b"process" => Field::Process,
            b"message" => Field::Message,
            b"relativeCreated" => Field::RelativeCreated,
            _ => return None,
        })
    }

    pub fn key(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::LevelNo => "levelno",
            Field::LevelName => "levelname",
            Field::PathName => "pathname",
            Field::FileName => "filename",
            Field::FuncName => "funcName",
            Field::LineNo => "lineno",
            Field::Created => "created",
            Field::AscTime => "asctime",
            Field::Msecs => "msecs",
            Field::Thread => "thread",
            Field::ThreadName => "threadName",
            Field::Process => "process",
            Field::Message => "message",
            Field::RelativeCreated => "relativeCreated",
        }
    }

    /// Appends this field of `record`. Each field has one fixed rendering.
    pub(crate) fn render(
        self,
        out: &mut StrBuf<'_>,
        record: &Record<'_>,
        options: ConverterOptions,
    ) -> Result<usize, FormatError> {
        let plain = Layout::default();
        let flags = Flags::default();
        Ok(match self {
            Field::Name => out.push_str(record.name),
            Field::LevelName => out.push_str(record.level_name),
            Field::PathName => out.push_str(record.source_path),
            Field::FileName => out.push_str(record.file_name),
            Field::FuncName => out.push_str(record.function_name),
            Field::AscTime => out.push_str(record.timestamp),
            Field::ThreadName => out.push_str(record.thread_name),
            Field::LevelNo => render::signed(out, i64::from(record.level_number), plain, flags),
            Field::LineNo => render::signed(out, i64::from(record.line_number), plain, flags),
            Field::Process => render::signed(out, i64::from(record.process_id), plain, flags),
            Field::Thread => out.put_uint(record.thread_id, Digits::DECIMAL),
            Field::Msecs => render::unsigned(
                out,
                u64::from(record.msecs),
                Digits::DECIMAL,
                b"",
                Layout::zero_padded(3),
            ),
            Field::Created => render::fixed(out, record.created, 6, plain, flags),
            Field::RelativeCreated => render::fixed(out, record.relative_created, 6, plain, flags),
            Field::Message => out.format_with(record.message_format, record.message_args, options)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key().as_bytes()), Some(field));
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Field::from_key(b"Name"), None);
        assert_eq!(Field::from_key(b"funcname"), None);
        assert_eq!(Field::from_key(b"name "), None);
        assert_eq!(Field::from_key(b""), None);
    }
}
