//! RDF file discovery
//!
//! Walks an input directory depth-first and yields the regular files
//! whose extension is in the format table.

use std::fs;
use std::path::{Path, PathBuf};
use std::vec;

use crate::format::is_rdf_file_name;

/// Lazy, single-pass traversal of candidate RDF files under a root
///
/// Entries of each directory are visited in file name order. Unreadable
/// directories and entries are skipped, so a missing root simply yields
/// nothing.
#[derive(Debug)]
pub struct RdfFiles {
    pending: Vec<vec::IntoIter<PathBuf>>,
}

impl RdfFiles {
    fn new(root: &Path) -> Self {
        Self {
            pending: vec![sorted_entries(root).into_iter()],
        }
    }
}

impl Iterator for RdfFiles {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entries = self.pending.last_mut()?;
            let Some(path) = entries.next() else {
                self.pending.pop();
                continue;
            };

            // Symlinked directories are not descended into
            let file_type = match fs::symlink_metadata(&path) {
                Ok(metadata) => metadata.file_type(),
                Err(_) => continue,
            };

            if file_type.is_dir() {
                self.pending.push(sorted_entries(&path).into_iter());
            } else if path.is_file() && is_rdf_file_name(&path) {
                return Some(path);
            }
        }
    }
}

/// Collect candidate RDF files under `root`
pub fn collect_rdf_files(root: impl AsRef<Path>) -> RdfFiles {
    RdfFiles::new(root.as_ref())
}

fn sorted_entries(dir: &Path) -> Vec<PathBuf> {
    let mut entries: Vec<PathBuf> = match fs::read_dir(dir) {
        Ok(entries) => entries.flatten().map(|entry| entry.path()).collect(),
        Err(_) => return Vec::new(),
    };
    entries.sort();
    entries
}
