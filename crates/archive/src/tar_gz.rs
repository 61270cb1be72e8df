use crate::counting::CountingReader;
use crate::encode::ArchiveSink;
use crate::error::ArchiveError;
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::File;
use std::io::{Read, Write};
use std::time::UNIX_EPOCH;
use tar::{Builder, EntryType, Header};
use walk::{WalkEntry, permissions_mode};

/// Tar stream wrapped in gzip. The tar trailer is written before the gzip
/// trailer. Entry names keep the raw bytes of the relative path.
pub(crate) struct TarGzSink<W: Write> {
    builder: Builder<GzEncoder<W>>,
}

impl<W: Write> TarGzSink<W> {
    pub(crate) fn new(output: W, level: Compression) -> Self {
        Self {
            builder: Builder::new(GzEncoder::new(output, level)),
        }
    }
}

impl<W: Write> ArchiveSink for TarGzSink<W> {
    fn append(&mut self, entry: &WalkEntry, file: File) -> Result<u64, ArchiveError> {
        let metadata = entry.metadata();
        let expected = metadata.len();

        let mut header = Header::new_gnu();
        header.set_entry_type(EntryType::Regular);
        header.set_size(expected);
        header.set_mode(permissions_mode(metadata));
        header.set_mtime(
            metadata
                .modified()
                .ok()
                .and_then(|modified| modified.duration_since(UNIX_EPOCH).ok())
                .map_or(0, |elapsed| elapsed.as_secs()),
        );

        let mut reader = CountingReader::new(file.take(expected));
        self.builder
            .append_data(&mut header, entry.relative_path(), &mut reader)
            .map_err(|source| {
                if reader.failed() {
                    ArchiveError::Read {
                        path: entry.full_path().to_path_buf(),
                        source,
                    }
                } else {
                    ArchiveError::Write(source)
                }
            })?;

        if reader.bytes_read() != expected {
            return Err(ArchiveError::SizeChanged {
                path: entry.full_path().to_path_buf(),
            });
        }
        Ok(expected)
    }

    fn finish(self) -> Result<(), ArchiveError> {
        let gzip = self.builder.into_inner().map_err(ArchiveError::Write)?;
        let mut output = gzip.finish().map_err(ArchiveError::Write)?;
        output.flush().map_err(ArchiveError::Write)
    }
}
