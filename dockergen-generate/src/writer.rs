//! Idempotent artifact writer.
//!
//! ## `write_artifact` protocol
//!
//! 1. Render content (already done by caller).
//! 2. Read the current file, if any.
//! 3. Byte-identical → skip, leaving mtime untouched.
//! 4. Dry-run → report what would be written and stop.
//! 5. Create the parent directory chain (existing directories are fine).
//! 6. Write to `<file>.dockergen.tmp` beside the target.
//! 7. Rename to the final path.
//!
//! The temp file is removed whenever step 6 or 7 fails.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{io_err, GenerateError};

/// Suffix of the sibling temp file used during a write.
pub const TMP_SUFFIX: &str = "dockergen.tmp";

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of an individual artifact write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — on-disk content already matches.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
    /// Rendered but not written: a later definition derives the same file.
    Superseded { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path }
            | WriteResult::Superseded { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// Directory creation
// ---------------------------------------------------------------------------

/// Create `dir` and all missing ancestors.
///
/// An existing directory, including one created concurrently by another
/// writer, counts as success.
pub fn ensure_dir(dir: &Path) -> Result<(), GenerateError> {
    match std::fs::create_dir_all(dir) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists && dir.is_dir() => Ok(()),
        Err(e) => Err(io_err(dir, e)),
    }
}

// ---------------------------------------------------------------------------
// write_artifact
// ---------------------------------------------------------------------------

/// Write `content` to `path` unless it is already there.
pub fn write_artifact(
    path: &Path,
    content: &str,
    dry_run: bool,
) -> Result<WriteResult, GenerateError> {
    write_artifact_with_tmp(path, content, dry_run, &tmp_path_for(path))
}

/// `<dir>/<name>.dockergen.tmp`
pub fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!("{name}.{TMP_SUFFIX}"))
}

fn write_artifact_with_tmp(
    path: &Path,
    content: &str,
    dry_run: bool,
    tmp: &Path,
) -> Result<WriteResult, GenerateError> {
    if let Some(existing) = read_existing(path)? {
        if existing == content.as_bytes() {
            tracing::debug!(path = %path.display(), "unchanged");
            return Ok(WriteResult::Unchanged {
                path: path.to_path_buf(),
            });
        }
    }

    if dry_run {
        tracing::info!(path = %path.display(), "[dry-run] would write");
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    if let Err(e) = std::fs::write(tmp, content) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(tmp, e));
    }

    if let Err(e) = std::fs::rename(tmp, path) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(path, e));
    }

    tracing::info!(path = %path.display(), "wrote");
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

fn read_existing(path: &Path) -> Result<Option<Vec<u8>>, GenerateError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(io_err(path, e)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
