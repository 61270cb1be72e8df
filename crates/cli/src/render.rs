//! Plain-text rendering of responses for terminal output.

use crate::error::CliError;
use dirindex_core::{ArchiveDownload, BrowseError, Response, SearchResults};
use listing::{Listing, human_size};
use logging::info_log;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use walk::FileInfo;

/// Writes `response` to `stdout`, or an archive to `output` when given.
pub(crate) fn render<Out: Write>(
    response: Response,
    output: Option<&Path>,
    stdout: &mut Out,
) -> Result<(), CliError> {
    match response {
        Response::File(served) => {
            let mut file = served.into_file();
            io::copy(&mut file, stdout).map_err(CliError::Output)?;
        }
        Response::IndexHtml(path) => {
            let mut file = File::open(&path)
                .map_err(|source| CliError::Browse(BrowseError::Open { path, source }))?;
            io::copy(&mut file, stdout).map_err(CliError::Output)?;
        }
        Response::Listing(listing) => write_listing(&listing, stdout).map_err(CliError::Output)?,
        Response::Search(results) => write_search(results, stdout)?,
        Response::Archive(download) => write_archive(&download, output, stdout)?,
    }
    stdout.flush().map_err(CliError::Output)
}

fn entry_line(info: &FileInfo) -> String {
    let (size, suffix) = if info.acts_as_dir() {
        (String::from("-"), "/")
    } else {
        (human_size(info.size()), "")
    };
    format!(
        "{:<15} {:>8}  {}{}",
        info.icon_name(),
        size,
        info.name(),
        suffix
    )
}

fn write_listing<Out: Write>(listing: &Listing, out: &mut Out) -> io::Result<()> {
    writeln!(out, "Index of {}", listing.path())?;
    if !listing.is_root() {
        writeln!(out, "{:<15} {:>8}  ../", "folder", "-")?;
    }
    for info in listing.entries() {
        writeln!(out, "{}", entry_line(info))?;
    }
    if let Some(readme) = listing.readme() {
        writeln!(out)?;
        writeln!(out, "--- {} ---", readme.name())?;
        writeln!(out, "{}", readme.html().trim_end())?;
    }
    Ok(())
}

fn write_search<Out: Write>(mut results: SearchResults, out: &mut Out) -> Result<(), CliError> {
    for found in results.by_ref() {
        let suffix = if found.info().acts_as_dir() { "/" } else { "" };
        if let Err(error) = writeln!(out, "{}{}", found.relative_path(), suffix)
            .and_then(|()| out.flush())
        {
            // Dropping `results` cancels the producer.
            return Err(CliError::Output(error));
        }
    }
    results.finish()?;
    Ok(())
}

fn write_archive<Out: Write>(
    download: &ArchiveDownload,
    output: Option<&Path>,
    stdout: &mut Out,
) -> Result<(), CliError> {
    info_log!(
        Archive,
        2,
        "Content-Disposition: {}",
        download.content_disposition()
    );
    let stats = match output {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::CreateOutput {
                path: path.to_path_buf(),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            let stats = download.write_to(&mut writer)?;
            writer.flush().map_err(CliError::Output)?;
            stats
        }
        None => download.write_to(&mut *stdout)?,
    };
    info_log!(
        Archive,
        1,
        "{}: {} files, {} bytes",
        download.file_name(),
        stats.files,
        stats.bytes
    );
    Ok(())
}
