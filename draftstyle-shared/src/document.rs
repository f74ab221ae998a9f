//! Whole-file JSON documents with forgiving reads and atomic writes.
//!
//! Both the preset file and the parameter file follow the same rules: a
//! missing, unreadable or malformed document reads as empty, and a save
//! creates parent directories, then writes a sibling temporary file and
//! renames it over the target.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::PrettyFormatter;
use tracing::{debug, warn};

use crate::errors::{StoreError, StoreResult};

/// Indentation used for every document written to disk
const INDENT: &[u8] = b"    ";

/// Read and decode a document, or `None` if there is nothing usable at `path`.
///
/// Never touches the file system beyond the read itself.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist, treating as empty", path.display());
            return None;
        }
        Err(e) => {
            warn!("Failed to read {}, treating as empty: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(document) => Some(document),
        Err(e) => {
            warn!(
                "Discarding malformed document {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

/// Render a document with stable four-space indentation.
pub(crate) fn to_pretty_json<T: Serialize>(document: &T) -> StoreResult<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    document.serialize(&mut serializer)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Serialize `document` and replace the file at `path` with it.
///
/// Serialization happens before anything is written, so a failure leaves the
/// file system untouched.
pub(crate) fn write_document<T: Serialize>(path: &Path, document: &T) -> StoreResult<()> {
    let content = to_pretty_json(document)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| StoreError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let staging = staging_path(path);
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Err(e) = fs::write(&staging, &content) {
        let _ = fs::remove_file(&staging);
        return Err(write_err(e));
    }
    if let Err(e) = fs::rename(&staging, path) {
        let _ = fs::remove_file(&staging);
        return Err(write_err(e));
    }

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

/// Temporary sibling used while replacing `path`.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
