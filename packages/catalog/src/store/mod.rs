//! Catalog data file persistence.
//!
//! The catalog is always replaced wholesale. Writes go to a temporary file
//! in the target directory and are renamed into place, so readers see
//! either the old catalog or the new one.

use std::fs::{File, Permissions};
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::types::item::CatalogItem;

/// Write `items` as a pretty-printed JSON array, replacing `path`.
pub fn write_catalog(path: impl AsRef<Path>, items: &[CatalogItem]) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    write_atomic(path.as_ref(), json.as_bytes())?;
    tracing::info!(path = %path.as_ref().display(), count = items.len(), "Saved catalog");
    Ok(())
}

/// Read the catalog data file.
pub fn read_catalog(path: impl AsRef<Path>) -> Result<Vec<CatalogItem>> {
    let text = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&text)?)
}

/// Replace `path` with `contents`, creating parent directories.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    match_permissions(tmp.as_file(), path)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Give the replacement the existing file's permissions, or `0644` for a
/// new file. Temp files start out owner-only.
fn match_permissions(file: &File, path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) => file.set_permissions(meta.permissions())?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => set_default_mode(file)?,
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

#[cfg(unix)]
fn set_default_mode(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_mode(_file: &File) -> io::Result<()> {
    Ok(())
}
