use crate::error::ArchiveError;
use crate::format::ArchiveFormat;
use crate::level::CompressionLevel;
use crate::tar_gz::TarGzSink;
use crate::zip_sink::ZipSink;
use logging::{debug_log, info_log};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use walk::{EntryKind, WalkBuilder, WalkEntry};

/// Totals reported after an archive was written completely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ArchiveStats {
    /// Regular files stored.
    pub files: u64,
    /// Uncompressed payload bytes stored.
    pub bytes: u64,
}

/// Destination for regular files found during traversal.
pub(crate) trait ArchiveSink {
    /// Stores `file` under the entry's relative path and returns the number
    /// of bytes copied.
    fn append(&mut self, entry: &WalkEntry, file: File) -> Result<u64, ArchiveError>;

    /// Writes format trailers and flushes the output.
    fn finish(self) -> Result<(), ArchiveError>;
}

/// Archive encoder configured with a format and a compression level.
#[derive(Clone, Copy, Debug)]
pub struct ArchiveEncoder {
    format: ArchiveFormat,
    level: CompressionLevel,
}

impl ArchiveEncoder {
    /// Creates an encoder for `format` using the default compression level.
    #[must_use]
    pub fn new(format: ArchiveFormat) -> Self {
        Self {
            format,
            level: CompressionLevel::Default,
        }
    }

    /// Overrides the deflate level.
    #[must_use]
    pub const fn level(mut self, level: CompressionLevel) -> Self {
        self.level = level;
        self
    }

    /// Writes every regular file below `root` into `output`.
    ///
    /// Entry names are relative to `root` and separated by `/`. Symlinks,
    /// directories and special files are skipped; symlinked directories are
    /// never entered. Any failure aborts immediately, possibly leaving a
    /// truncated archive in `output`.
    pub fn encode<W: Write>(&self, root: &Path, output: W) -> Result<ArchiveStats, ArchiveError> {
        debug_log!(
            Archive,
            1,
            "encoding {} as {}",
            root.display(),
            self.format
        );
        let stats = match self.format {
            ArchiveFormat::TarGz => fill(root, TarGzSink::new(output, self.level.into()))?,
            ArchiveFormat::Zip => fill(root, ZipSink::new(output, self.level.into()))?,
        };
        info_log!(
            Archive,
            1,
            "archived {} files ({} bytes) from {}",
            stats.files,
            stats.bytes,
            root.display()
        );
        Ok(stats)
    }
}

/// Writes every regular file below `root` into `output` in `format`.
///
/// # Examples
///
/// ```
/// use archive::{ArchiveFormat, encode_archive};
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// std::fs::write(temp.path().join("a.txt"), b"alpha")?;
///
/// let mut out = Vec::new();
/// let stats = encode_archive(temp.path(), ArchiveFormat::TarGz, &mut out)?;
/// assert_eq!((stats.files, stats.bytes), (1, 5));
/// assert_eq!(&out[..2], &[0x1f, 0x8b]);
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
pub fn encode_archive<P: AsRef<Path>, W: Write>(
    root: P,
    format: ArchiveFormat,
    output: W,
) -> Result<ArchiveStats, ArchiveError> {
    ArchiveEncoder::new(format).encode(root.as_ref(), output)
}

fn fill<S: ArchiveSink>(root: &Path, mut sink: S) -> Result<ArchiveStats, ArchiveError> {
    let mut stats = ArchiveStats::default();
    let walker = WalkBuilder::new(root).include_root(false).build()?;

    for entry in walker {
        let entry = entry?;
        if entry.kind() != EntryKind::File {
            debug_log!(
                Archive,
                3,
                "skipping non-regular entry {}",
                entry.relative_path().display()
            );
            continue;
        }

        let file = File::open(entry.full_path()).map_err(|source| ArchiveError::Read {
            path: entry.full_path().to_path_buf(),
            source,
        })?;
        let bytes = sink.append(&entry, file)?;
        debug_log!(
            Archive,
            2,
            "added {} ({} bytes)",
            entry.relative_path().display(),
            bytes
        );

        stats.files += 1;
        stats.bytes += bytes;
    }

    sink.finish()?;
    Ok(stats)
}
