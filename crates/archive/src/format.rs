use crate::error::ArchiveError;
use std::fmt;
use std::str::FromStr;

/// Container formats offered for directory downloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// POSIX tar wrapped in gzip.
    TarGz,
    /// Zip with deflated entries.
    Zip,
}

impl ArchiveFormat {
    /// Parses the value of the `dl` query parameter.
    pub fn from_query(value: &str) -> Result<Self, ArchiveError> {
        match value {
            "targz" => Ok(Self::TarGz),
            "zip" => Ok(Self::Zip),
            other => Err(ArchiveError::UnsupportedFormat(other.to_owned())),
        }
    }

    /// Query parameter value naming this format.
    #[must_use]
    pub const fn query_name(self) -> &'static str {
        match self {
            Self::TarGz => "targz",
            Self::Zip => "zip",
        }
    }

    /// File extension including the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::TarGz => ".tar.gz",
            Self::Zip => ".zip",
        }
    }

    /// MIME type for the archive body.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::TarGz => "application/gzip",
            Self::Zip => "application/zip",
        }
    }
}

impl FromStr for ArchiveFormat {
    type Err = ArchiveError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_query(value)
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_name())
    }
}

/// Download file name for the directory at `request_path`.
///
/// The last non-empty segment names the archive; the served root is called
/// `root`.
///
/// ```
/// use archive::{ArchiveFormat, download_name};
///
/// assert_eq!(download_name("/photos/2024/", ArchiveFormat::Zip), "2024.zip");
/// assert_eq!(download_name("/", ArchiveFormat::TarGz), "root.tar.gz");
/// ```
#[must_use]
pub fn download_name(request_path: &str, format: ArchiveFormat) -> String {
    let stem = request_path
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("root");
    format!("{stem}{}", format.extension())
}

/// `Content-Disposition` header value announcing `name` as an attachment.
#[must_use]
pub fn content_disposition(name: &str) -> String {
    format!("attachment; filename={name}")
}
