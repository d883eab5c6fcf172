//! Snapshot codec.
//!
//! Snapshots are JSON arrays of flat [`Record`] objects, pretty-printed with a
//! two-space indent. Saved snapshots are in ascending key order; loading
//! accepts any order.

use super::record::Record;
use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::info;

/// Parses a snapshot from `reader`.
///
/// `source_name` only labels errors.
///
/// # Errors
///
/// Returns `Error::MalformedSnapshot` if the input is not a JSON array of
/// records, and `Error::Io` if reading fails.
pub fn read_records<R: Read>(reader: R, source_name: &str) -> Result<Vec<Record>> {
    serde_json::from_reader(reader).map_err(|e| {
        if e.is_io() {
            Error::Io(e.into())
        } else {
            Error::malformed_snapshot(source_name, e)
        }
    })
}

/// Writes `records` to `writer` as an indented JSON array.
///
/// # Errors
///
/// Returns `Error::Io` if writing fails.
pub fn write_records<W: Write>(mut writer: W, records: &[Record]) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, records).map_err(std::io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads a snapshot file.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be opened or read, and
/// `Error::MalformedSnapshot` if its content is not a list of records.
pub fn load_file(path: &Path) -> Result<Vec<Record>> {
    let file = File::open(path)?;
    let records = read_records(BufReader::new(file), &path.display().to_string())?;
    info!(path = %path.display(), records = records.len(), "read snapshot");
    Ok(records)
}

/// Overwrites `path` with a snapshot of `records`.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be created or written.
pub fn save_file(path: &Path, records: &[Record]) -> Result<()> {
    let file = File::create(path)?;
    write_records(BufWriter::new(file), records)?;
    info!(path = %path.display(), records = records.len(), "wrote snapshot");
    Ok(())
}

/// Checks that `path` can be overwritten without touching it.
///
/// An existing file must not be a directory or read-only; a missing file
/// needs an existing parent directory.
///
/// # Errors
///
/// Returns `Error::Io` describing why the target cannot be written.
pub fn check_writable(path: &Path) -> Result<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Err(io::Error::new(
            io::ErrorKind::IsADirectory,
            format!("{} is a directory", path.display()),
        )
        .into()),
        Ok(meta) if meta.permissions().readonly() => Err(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{} is read-only", path.display()),
        )
        .into()),
        Ok(_) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let parent = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            if fs::metadata(parent)?.is_dir() {
                Ok(())
            } else {
                Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("{} is not a directory", parent.display()),
                )
                .into())
            }
        }
        Err(e) => Err(e.into()),
    }
}
