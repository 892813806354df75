//! Input discovery with case-insensitive directory and extension matching

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Compare two directory entry names ignoring case
#[must_use]
pub fn names_match(entry: &str, wanted: &str) -> bool {
    entry == wanted || entry.to_lowercase() == wanted.to_lowercase()
}

/// Pick the entry matching `wanted`, preferring an exact match over a
/// case-folded one.
pub fn resolve_name<'a, I>(entries: I, wanted: &str) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut folded = None;
    for entry in entries {
        if entry == wanted {
            return Some(entry);
        }
        if folded.is_none() && names_match(entry, wanted) {
            folded = Some(entry);
        }
    }
    folded
}

/// Whether `name` ends in `.extension`, ignoring case
#[must_use]
pub fn has_extension(name: &str, extension: &str) -> bool {
    let extension = extension.trim_start_matches('.');
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| names_match(ext, extension))
}

fn entry_names(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Locate the subdirectory of `root` named `category`, ignoring case
#[must_use]
pub fn resolve_dir(root: &Path, category: &str) -> Option<PathBuf> {
    let names = entry_names(root).ok()?;
    let found = resolve_name(names.iter().map(String::as_str), category)?;
    let path = root.join(found);
    path.is_dir().then_some(path)
}

/// List message files of one category, sorted by name.
///
/// A missing category directory is logged and yields no files. Entries
/// that are not directories are kept even if they cannot be opened, so
/// unreadable files still count toward the batch.
#[must_use]
pub fn discover_category(root: &Path, category: &str, extension: &str) -> Vec<PathBuf> {
    let Some(dir) = resolve_dir(root, category) else {
        warn!(
            "Directory not found: {} (category {category})",
            root.join(category).display()
        );
        return Vec::new();
    };

    let names = match entry_names(&dir) {
        Ok(names) => names,
        Err(e) => {
            warn!("Cannot list {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let files: Vec<PathBuf> = names
        .iter()
        .filter(|name| has_extension(name, extension))
        .map(|name| dir.join(name))
        .filter(|path| !path.is_dir())
        .collect();

    debug!("Found {} files in {}", files.len(), dir.display());
    files
}
