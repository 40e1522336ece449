use crate::error::{FetchError, Result};
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::ZipArchive;

/// Name of the first entry, in central-directory order, ending with `binary_name`.
pub fn find_binary<R: Read + Seek>(archive: &ZipArchive<R>, binary_name: &str) -> Option<String> {
    archive
        .file_names()
        .find(|name| name.ends_with(binary_name))
        .map(str::to_string)
}

/// Writes the matching entry of an in-memory zip to `dest_path`.
pub fn extract_binary(bytes: &[u8], binary_name: &str, dest_path: &Path) -> Result<PathBuf> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    debug!(entries = archive.len(), "opened archive");

    let entry_name = find_binary(&archive, binary_name).ok_or_else(|| FetchError::BinaryNotFound {
        name: binary_name.to_string(),
    })?;
    debug!(entry = %entry_name, dest = %dest_path.display(), "extracting");

    let mut entry = archive.by_name(&entry_name)?;
    let mut outfile = File::create(dest_path)?;
    std::io::copy(&mut entry, &mut outfile)?;

    Ok(dest_path.to_path_buf())
}
