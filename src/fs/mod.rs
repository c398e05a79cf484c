// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

pub mod mock;

/// Abstract filesystem interface.
///
/// Event files are only ever touched through this trait, so target discovery
/// and status rewrites can be exercised against [`mock::MockFileSystem`].
pub trait FileSystem: Send + Sync + Debug {
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Replace the file's contents in place.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
    fn exists(&self, path: &Path) -> bool;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether the current process may rewrite the file.
    fn is_writable(&self, path: &Path) -> bool;
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Return a list of entries in a directory.
    /// Returns full paths.
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("reading file {:?}", path))
    }

    /// Writes a sibling temp file and renames it over `path`, so readers
    /// see either the old or the new contents. The original permissions are
    /// kept. Falls back to an in-place write when the directory itself is
    /// not writable.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        // A rename would otherwise replace a file we may not write to.
        if path.exists() && !self.is_writable(path) {
            anyhow::bail!("no write access to {:?}", path);
        }

        let tmp = temp_sibling(path);
        match write_synced(&tmp, contents) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::PermissionDenied => {
                let _ = fs::remove_file(&tmp);
                debug!(path = ?path, "directory not writable; rewriting in place");
                return fs::write(path, contents)
                    .with_context(|| format!("writing to file {:?}", path));
            }
            Err(err) => {
                let _ = fs::remove_file(&tmp);
                return Err(err).with_context(|| format!("writing temp file {:?}", tmp));
            }
        }

        let replaced = fs::metadata(path)
            .and_then(|meta| fs::set_permissions(&tmp, meta.permissions()))
            .and_then(|()| fs::rename(&tmp, path));
        if let Err(err) = replaced {
            let _ = fs::remove_file(&tmp);
            return Err(err).with_context(|| format!("replacing file {:?}", path));
        }
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn is_writable(&self, path: &Path) -> bool {
        // Append mode neither creates nor truncates.
        fs::OpenOptions::new().append(true).open(path).is_ok()
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        fs::canonicalize(path).with_context(|| format!("canonicalizing {:?}", path))
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path).with_context(|| format!("reading dir {:?}", path))? {
            let entry = entry?;
            entries.push(entry.path());
        }
        Ok(entries)
    }
}

/// `.<name>.triggerd.tmp` next to `path`.
fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.triggerd.tmp"))
}

fn write_synced(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
