use std::collections::HashSet;
use std::path::Path;

use satin_core::{Error, Isrc, Result};
use walkdir::WalkDir;

/// ISRC names found directly inside a reference directory.
///
/// A valid ISRC is expected to have at least one file named `<ISRC>.*`
/// (any extension, including multi-part ones like `.tar.gz`) next to the
/// others. Matching is case-sensitive.
#[derive(Debug, Clone)]
pub struct ReferenceIndex {
    names: HashSet<String>,
}

impl ReferenceIndex {
    /// Index the regular files directly under `dir`.
    ///
    /// Subdirectories are not descended into. Entries that cannot be
    /// resolved, such as dangling symlinks, are skipped with a warning.
    pub fn scan(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(Error::NotFound {
                what: "reference directory",
                path: dir.to_path_buf(),
            });
        }

        let mut names = HashSet::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() > 0 => {
                    log::warn!("Skipping unreadable reference entry: {}", err);
                    continue;
                }
                Err(err) => return Err(Error::Io(err.into())),
            };

            if !entry.file_type().is_file() {
                continue;
            }

            names.insert(isrc_name(&entry.file_name().to_string_lossy()).to_string());
        }

        log::debug!("Indexed {} reference files in {}", names.len(), dir.display());
        Ok(Self { names })
    }

    #[must_use]
    pub fn contains(&self, isrc: &Isrc) -> bool {
        self.names.contains(isrc.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// The part of a file name before its first `.`.
fn isrc_name(file_name: &str) -> &str {
    file_name
        .split_once('.')
        .map_or(file_name, |(name, _)| name)
}
