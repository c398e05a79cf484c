// src/targets.rs

//! Turn command-line targets into the list of event files to process.
//!
//! - An explicit file is accepted when it is a writable regular file.
//! - A directory contributes writable files whose extension is allowed,
//!   recursing into subdirectories when configured.
//!
//! The result is sorted and de-duplicated, so each event file is handed to
//! exactly one processing task.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use tracing::{debug, warn};

use crate::config::EventsSection;
use crate::fs::FileSystem;

/// Which directory entries count as event files.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    pub extensions: Vec<String>,
    pub recursive: bool,
}

impl From<&EventsSection> for DiscoveryOptions {
    fn from(events: &EventsSection) -> Self {
        Self {
            extensions: events.extensions.clone(),
            recursive: events.recursive,
        }
    }
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self::from(&EventsSection::default())
    }
}

/// Compile `*.<ext>` patterns, matched case-insensitively against file names.
fn extension_matcher(extensions: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for ext in extensions {
        let pattern = format!("*.{}", ext.trim_start_matches('.'));
        let glob = GlobBuilder::new(&pattern)
            .case_insensitive(true)
            .literal_separator(true)
            .build()
            .with_context(|| format!("invalid extension pattern '{}'", pattern))?;
        builder.add(glob);
    }
    builder.build().context("building extension matcher")
}

pub fn discover_targets(
    fs: &dyn FileSystem,
    targets: &[PathBuf],
    options: &DiscoveryOptions,
) -> Result<Vec<PathBuf>> {
    let matcher = extension_matcher(&options.extensions)?;
    let mut found = BTreeSet::new();

    for target in targets {
        if fs.is_file(target) {
            if fs.is_writable(target) {
                found.insert(canonical(fs, target));
            } else {
                warn!(path = ?target, "no write access; skipping");
            }
        } else if fs.is_dir(target) {
            collect_dir(fs, target, &matcher, options.recursive, &mut found);
        } else if fs.exists(target) {
            warn!(path = ?target, "not a regular file or directory; skipping");
        } else {
            warn!(path = ?target, "does not exist; skipping");
        }
    }

    Ok(found.into_iter().collect())
}

/// Unreadable directories are skipped with a warning, like any other
/// rejected target.
fn collect_dir(
    fs: &dyn FileSystem,
    dir: &Path,
    matcher: &GlobSet,
    recursive: bool,
    found: &mut BTreeSet<PathBuf>,
) {
    let mut entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = ?dir, error = %err, "cannot read directory; skipping");
            return;
        }
    };
    entries.sort();

    for entry in entries {
        if fs.is_dir(&entry) {
            if recursive {
                collect_dir(fs, &entry, matcher, recursive, found);
            }
            continue;
        }

        let Some(name) = entry.file_name() else {
            continue;
        };
        if !fs.is_file(&entry) || !matcher.is_match(Path::new(name)) {
            debug!(path = ?entry, "not an event file; ignoring");
            continue;
        }
        if !fs.is_writable(&entry) {
            warn!(path = ?entry, "no write access; skipping");
            continue;
        }
        found.insert(canonical(fs, &entry));
    }
}

fn canonical(fs: &dyn FileSystem, path: &Path) -> PathBuf {
    fs.canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
