use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, TreeError};
use crate::model::entry::{EntryKind, FsEntry};

/// Source of directory listings for the walker.
pub trait EntryLister {
    /// Immediate children of `dir`, already in display order.
    fn list(&self, dir: &Path) -> Result<Vec<FsEntry>>;

    /// Stable identity of a directory, used to notice when a descent would loop.
    fn identity(&self, dir: &Path) -> Option<PathBuf>;
}

/// Lists the real filesystem.
#[derive(Debug, Clone, Copy)]
pub struct FsLister {
    follow_links: bool,
}

impl FsLister {
    pub fn new(follow_links: bool) -> Self {
        Self { follow_links }
    }

    fn kind_of(&self, entry: &fs::DirEntry) -> EntryKind {
        // A dangling link or an unreadable item counts as a file.
        let is_dir = if self.follow_links {
            fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false)
        } else {
            entry.file_type().map(|t| t.is_dir()).unwrap_or(false)
        };
        if is_dir {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }
}

impl Default for FsLister {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EntryLister for FsLister {
    fn list(&self, dir: &Path) -> Result<Vec<FsEntry>> {
        let read_dir = fs::read_dir(dir).map_err(|source| TreeError::Enumeration {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|source| TreeError::Enumeration {
                path: dir.to_path_buf(),
                source,
            })?;
            let name = entry.file_name().to_string_lossy().to_string();
            let kind = self.kind_of(&entry);
            entries.push(FsEntry::new(name, entry.path(), kind));
        }

        Ok(sort_entries(entries))
    }

    fn identity(&self, dir: &Path) -> Option<PathBuf> {
        fs::canonicalize(dir).ok()
    }
}

/// Directories first, then files, each group by case-insensitive name.
/// Equal keys keep their incoming order.
pub fn sort_entries(entries: Vec<FsEntry>) -> Vec<FsEntry> {
    let (mut dirs, mut files): (Vec<_>, Vec<_>) = entries.into_iter().partition(FsEntry::is_dir);

    dirs.sort_by_cached_key(|e| e.name.to_lowercase());
    files.sort_by_cached_key(|e| e.name.to_lowercase());

    dirs.extend(files);
    dirs
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn names(entries: &[FsEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn lists_directories_before_files_case_insensitively() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir(root.join("beta")).unwrap();
        fs::create_dir(root.join("Alpha")).unwrap();
        fs::write(root.join("zeta.txt"), "").unwrap();
        fs::write(root.join("Readme.md"), "").unwrap();
        fs::write(root.join("apple.rs"), "").unwrap();

        let entries = FsLister::default().list(root).unwrap();

        assert_eq!(
            names(&entries),
            vec!["Alpha", "beta", "apple.rs", "Readme.md", "zeta.txt"]
        );
        assert!(entries[0].is_dir());
        assert!(!entries[2].is_dir());
        assert_eq!(entries[0].path, root.join("Alpha"));
    }

    #[test]
    fn hidden_entries_are_not_filtered() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::write(tmp.path().join(".env"), "").unwrap();

        let entries = FsLister::default().list(tmp.path()).unwrap();

        assert_eq!(names(&entries), vec![".git", ".env"]);
    }

    #[test]
    fn empty_directory_lists_nothing() {
        let tmp = TempDir::new().unwrap();
        assert!(FsLister::default().list(tmp.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_directory_is_an_enumeration_error() {
        let tmp = TempDir::new().unwrap();
        let gone = tmp.path().join("gone");

        let err = FsLister::default().list(&gone).unwrap_err();

        match err {
            TreeError::Enumeration { path, .. } => assert_eq!(path, gone),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn link_to_directory_follows_setting() {
        use std::os::unix::fs::symlink;

        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("target")).unwrap();
        symlink(tmp.path().join("target"), tmp.path().join("link")).unwrap();
        symlink(tmp.path().join("nowhere"), tmp.path().join("dangling")).unwrap();

        let followed = FsLister::new(true).list(tmp.path()).unwrap();
        assert_eq!(names(&followed), vec!["link", "target", "dangling"]);
        assert!(followed[0].is_dir());

        let unfollowed = FsLister::new(false).list(tmp.path()).unwrap();
        assert_eq!(names(&unfollowed), vec!["target", "dangling", "link"]);
        assert!(!unfollowed[2].is_dir());
    }

    #[test]
    fn identity_resolves_relative_components() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        let lister = FsLister::default();

        assert_eq!(
            lister.identity(&tmp.path().join("a").join("..")),
            lister.identity(tmp.path())
        );
        assert_eq!(lister.identity(&tmp.path().join("missing")), None);
    }

    #[test]
    fn sort_keeps_enumeration_order_for_case_twins() {
        let entries = vec![
            FsEntry::new("a", "first", EntryKind::File),
            FsEntry::new("B", "b", EntryKind::File),
            FsEntry::new("A", "second", EntryKind::File),
        ];

        let sorted = sort_entries(entries);

        let paths: Vec<_> = sorted.iter().map(|e| e.path.to_str().unwrap()).collect();
        assert_eq!(paths, vec!["first", "second", "b"]);
    }

    proptest! {
        #[test]
        fn sort_orders_kind_then_lowercase_name_stably(
            items in prop::collection::vec(("[a-cA-C]{1,3}", any::<bool>()), 0..24)
        ) {
            let entries: Vec<FsEntry> = items
                .iter()
                .enumerate()
                .map(|(i, (name, is_dir))| {
                    let kind = if *is_dir { EntryKind::Directory } else { EntryKind::File };
                    FsEntry::new(name.clone(), i.to_string(), kind)
                })
                .collect();

            let sorted = sort_entries(entries);
            prop_assert_eq!(sorted.len(), items.len());

            for pair in sorted.windows(2) {
                let (a, b) = (&pair[0], &pair[1]);
                prop_assert!(a.is_dir() || !b.is_dir(), "file before directory");
                if a.is_dir() == b.is_dir() {
                    let (ka, kb) = (a.name.to_lowercase(), b.name.to_lowercase());
                    prop_assert!(ka <= kb);
                    if ka == kb {
                        let ia: usize = a.path.to_str().unwrap().parse().unwrap();
                        let ib: usize = b.path.to_str().unwrap().parse().unwrap();
                        prop_assert!(ia < ib, "tie lost enumeration order");
                    }
                }
            }
        }
    }
}
