use crate::counting::CountingReader;
use crate::encode::ArchiveSink;
use crate::error::ArchiveError;
use flate2::Compression;
use std::fs::File;
use std::io::{self, Write};
use std::time::SystemTime;
use time::OffsetDateTime;
use walk::{WalkEntry, permissions_mode, slash_path};
use zip::write::{SimpleFileOptions, StreamWriter};
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Zip output written without seeking: every entry is followed by a data
/// descriptor, so the sink can be a pipe or a socket.
pub(crate) struct ZipSink<W: Write> {
    writer: ZipWriter<StreamWriter<W>>,
    level: i64,
}

impl<W: Write> ZipSink<W> {
    pub(crate) fn new(output: W, level: Compression) -> Self {
        Self {
            writer: ZipWriter::new_stream(output),
            level: i64::from(level.level()),
        }
    }

    fn options(&self, entry: &WalkEntry) -> SimpleFileOptions {
        let metadata = entry.metadata();
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(self.level))
            .unix_permissions(permissions_mode(metadata))
            .large_file(metadata.len() >= u64::from(u32::MAX));
        match metadata.modified().ok().and_then(dos_time) {
            Some(modified) => options.last_modified_time(modified),
            None => options,
        }
    }
}

impl<W: Write> ArchiveSink for ZipSink<W> {
    fn append(&mut self, entry: &WalkEntry, file: File) -> Result<u64, ArchiveError> {
        let relative = entry.relative_path();
        if relative.to_str().is_none() {
            return Err(ArchiveError::NonUtf8Name {
                path: entry.full_path().to_path_buf(),
            });
        }
        let options = self.options(entry);
        self.writer
            .start_file(slash_path(relative), options)
            .map_err(zip_error)?;

        let mut reader = CountingReader::new(file);
        io::copy(&mut reader, &mut self.writer).map_err(|source| {
            if reader.failed() {
                ArchiveError::Read {
                    path: entry.full_path().to_path_buf(),
                    source,
                }
            } else {
                ArchiveError::Write(source)
            }
        })?;
        Ok(reader.bytes_read())
    }

    fn finish(self) -> Result<(), ArchiveError> {
        let mut output = self.writer.finish().map_err(zip_error)?;
        output.flush().map_err(ArchiveError::Write)
    }
}

fn zip_error(error: zip::result::ZipError) -> ArchiveError {
    match error {
        zip::result::ZipError::Io(source) => ArchiveError::Write(source),
        other => ArchiveError::Zip(other),
    }
}

/// MS-DOS timestamp for `modified`, or `None` outside 1980..=2107.
fn dos_time(modified: SystemTime) -> Option<DateTime> {
    let utc = OffsetDateTime::from(modified);
    DateTime::from_date_and_time(
        u16::try_from(utc.year()).ok()?,
        u8::from(utc.month()),
        utc.day(),
        utc.hour(),
        utc.minute(),
        utc.second(),
    )
    .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn dos_time_keeps_calendar_fields() {
        // 2020-09-13 12:26:40 UTC
        let modified = UNIX_EPOCH + Duration::from_secs(1_600_000_000);
        let converted = dos_time(modified).expect("in range");
        assert_eq!(converted.year(), 2020);
        assert_eq!(converted.month(), 9);
        assert_eq!(converted.day(), 13);
        assert_eq!(converted.hour(), 12);
        assert_eq!(converted.minute(), 26);
        assert_eq!(converted.second(), 40);
    }

    #[test]
    fn dos_time_rejects_dates_before_1980() {
        assert!(dos_time(UNIX_EPOCH).is_none());
    }
}
