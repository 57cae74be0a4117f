//! Single-level directory listing.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use compact_str::CompactString;

use dirtree_core::{NodeKind, PatternSet, ScanError, ScanWarning};

/// One listed directory entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Base name of the entry.
    pub name: CompactString,
    /// Full path (`parent.join(name)`).
    pub path: PathBuf,
    /// Directory or file, following symlinks.
    pub kind: NodeKind,
    /// Whether the entry itself is a symbolic link.
    pub is_symlink: bool,
}

impl DirEntry {
    pub fn is_dir(&self) -> bool {
        self.kind.is_dir()
    }
}

/// Lists the immediate children of a directory.
///
/// Entries whose base name is in the pattern set are dropped. The rest come
/// back directories first, then files, each group ordered by case-insensitive
/// name.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    pub fn new() -> Self {
        Self
    }

    /// List `path`, failing if the directory itself cannot be read.
    ///
    /// Individual entries that vanish or cannot be inspected mid-listing are
    /// skipped.
    pub fn list(&self, path: &Path, patterns: &PatternSet) -> Result<Vec<DirEntry>, ScanError> {
        let read_dir = std::fs::read_dir(path).map_err(|e| ScanError::io(path, e))?;

        let mut entries: Vec<DirEntry> = read_dir
            .filter_map(|entry| {
                let entry = entry.ok()?;
                let name = entry.file_name().to_string_lossy().to_string();
                if patterns.matches(&name) {
                    return None;
                }
                let file_type = entry.file_type().ok()?;
                let entry_path = entry.path();
                let is_symlink = file_type.is_symlink();
                // Symlinks are classified by their target; broken links are files.
                let is_dir = if is_symlink {
                    entry_path.is_dir()
                } else {
                    file_type.is_dir()
                };
                Some(DirEntry {
                    name: name.into(),
                    path: entry_path,
                    kind: if is_dir {
                        NodeKind::Directory
                    } else {
                        NodeKind::File
                    },
                    is_symlink,
                })
            })
            .collect();

        entries.sort_by(compare_entries);
        tracing::debug!(path = %path.display(), entries = entries.len(), "listed directory");
        Ok(entries)
    }

    /// List `path`, turning a read failure into a warning and an empty listing.
    pub fn list_or_warn(
        &self,
        path: &Path,
        patterns: &PatternSet,
        warnings: &mut Vec<ScanWarning>,
    ) -> Vec<DirEntry> {
        match self.list(path, patterns) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(path = %path.display(), "skipping unreadable directory: {err}");
                warnings.push(ScanWarning::from_error(path, &err));
                Vec::new()
            }
        }
    }
}

/// Directories first, then case-insensitive name, then exact name.
fn compare_entries(a: &DirEntry, b: &DirEntry) -> Ordering {
    match (a.is_dir(), b.is_dir()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("beta")).unwrap();
        fs::create_dir(root.join("Alpha")).unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join("zeta.txt"), "z").unwrap();
        fs::write(root.join("Readme.md"), "r").unwrap();
        fs::write(root.join("apple.rs"), "a").unwrap();

        temp
    }

    fn names(entries: &[DirEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_dirs_first_then_case_insensitive() {
        let temp = create_test_dir();
        let entries = DirectoryScanner::new()
            .list(temp.path(), &PatternSet::new())
            .unwrap();

        assert_eq!(
            names(&entries),
            vec![".git", "Alpha", "beta", "apple.rs", "Readme.md", "zeta.txt"]
        );
        assert!(entries[..3].iter().all(DirEntry::is_dir));
        assert!(entries[3..].iter().all(|e| !e.is_dir()));
    }

    #[test]
    fn test_patterns_filter_exact_names() {
        let temp = create_test_dir();
        let patterns: PatternSet = [".git", "apple"].into_iter().collect();
        let entries = DirectoryScanner::new()
            .list(temp.path(), &patterns)
            .unwrap();

        assert!(!names(&entries).contains(&".git"));
        // "apple" does not match "apple.rs".
        assert!(names(&entries).contains(&"apple.rs"));
    }

    #[test]
    fn test_full_paths() {
        let temp = create_test_dir();
        let entries = DirectoryScanner::new()
            .list(temp.path(), &PatternSet::new())
            .unwrap();
        for entry in entries {
            assert_eq!(entry.path, temp.path().join(entry.name.as_str()));
        }
    }

    #[test]
    fn test_missing_directory_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let err = DirectoryScanner::new()
            .list(&missing, &PatternSet::new())
            .unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_list_or_warn_yields_empty() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let mut warnings = Vec::new();

        let entries = DirectoryScanner::new().list_or_warn(&missing, &PatternSet::new(), &mut warnings);
        assert!(entries.is_empty());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, missing);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_classified_by_target() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("real")).unwrap();
        std::os::unix::fs::symlink(root.join("real"), root.join("link")).unwrap();
        std::os::unix::fs::symlink(root.join("gone"), root.join("broken")).unwrap();

        let entries = DirectoryScanner::new().list(root, &PatternSet::new()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        let broken = entries.iter().find(|e| e.name == "broken").unwrap();

        assert!(link.is_dir());
        assert!(link.is_symlink);
        assert!(!broken.is_dir());
        assert!(broken.is_symlink);
    }
}
