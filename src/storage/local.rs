//! Native filesystem storage rooted at a base directory

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::{Metadata, Storage};

/// Configuration for [`LocalStorage`].
#[derive(Debug, Clone)]
pub struct LocalConfig {
    /// Resolve symlinks when reading metadata. When false, links are reported
    /// as non-directories and never descended into.
    pub follow_symlinks: bool,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalMetadata {
    name: String,
    is_dir: bool,
    size: u64,
}

impl LocalMetadata {
    fn from_fs(name: String, meta: &fs::Metadata) -> Self {
        let is_dir = meta.is_dir();
        Self {
            name,
            is_dir,
            size: if is_dir { 0 } else { meta.len() },
        }
    }
}

impl Metadata for LocalMetadata {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_dir(&self) -> bool {
        self.is_dir
    }

    fn size(&self) -> u64 {
        self.size
    }
}

/// Storage backed by `std::fs`.
///
/// Paths handed to [`Storage`] methods are relative to the base directory;
/// `""` and `"."` address the base itself. Absolute paths are joined as-is,
/// which replaces the base.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base: PathBuf,
    config: LocalConfig,
}

impl LocalStorage {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            config: LocalConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LocalConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn resolve(&self, path: &str) -> PathBuf {
        if path.is_empty() || path == "." {
            self.base.clone()
        } else {
            self.base.join(path)
        }
    }

    fn read_metadata(&self, full: &Path) -> io::Result<fs::Metadata> {
        if self.config.follow_symlinks {
            fs::metadata(full)
        } else {
            fs::symlink_metadata(full)
        }
    }

    /// Metadata for a listed entry, taken from the directory entry itself.
    ///
    /// Never fails: a child that cannot be stat'ed is still listed, and the
    /// failure surfaces when that child's own path is stat'ed. Sizes are best
    /// effort and default to 0.
    fn child_metadata(&self, entry: &fs::DirEntry) -> LocalMetadata {
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type().ok();
        let is_symlink = file_type.is_some_and(|t| t.is_symlink());

        if self.config.follow_symlinks && is_symlink {
            // Dangling links are listed as non-directories
            if let Ok(target) = fs::metadata(entry.path()) {
                return LocalMetadata::from_fs(name, &target);
            }
        }

        let is_dir = file_type.is_some_and(|t| t.is_dir());
        let size = if is_dir {
            0
        } else {
            entry.metadata().map(|m| m.len()).unwrap_or(0)
        };
        LocalMetadata { name, is_dir, size }
    }
}

/// Get the last segment of a path, defaulting to "." for the base.
fn entry_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| ".".to_string())
}

impl Storage for LocalStorage {
    type Metadata = LocalMetadata;
    type Error = io::Error;

    fn stat(&self, path: &str) -> io::Result<LocalMetadata> {
        let meta = self.read_metadata(&self.resolve(path))?;
        Ok(LocalMetadata::from_fs(entry_name(path), &meta))
    }

    fn list_children(&self, path: &str) -> io::Result<Vec<LocalMetadata>> {
        let full = self.resolve(path);
        let mut entries = fs::read_dir(&full)?.collect::<io::Result<Vec<_>>>()?;
        entries.sort_by_key(|e| e.file_name());
        log::debug!("listed {} entries in {}", entries.len(), full.display());

        Ok(entries
            .iter()
            .map(|entry| self.child_metadata(entry))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("src/bin")).expect("Failed to create dirs");
        fs::write(dir.path().join("src/lib.rs"), "pub mod a;").expect("Failed to write file");
        fs::write(dir.path().join("Cargo.toml"), "[package]").expect("Failed to write file");
        dir
    }

    #[test]
    fn test_stat_base_and_children() {
        let dir = scratch();
        let storage = LocalStorage::new(dir.path());
        assert_eq!(storage.base(), dir.path());

        let base = storage.stat(".").expect("stat base");
        assert_eq!(base.name(), ".");
        assert!(base.is_dir());
        assert_eq!(base.size(), 0);

        let lib = storage.stat("src/lib.rs").expect("stat file");
        assert_eq!(lib.name(), "lib.rs");
        assert!(!lib.is_dir());
        assert_eq!(lib.size(), "pub mod a;".len() as u64);
    }

    #[test]
    fn test_list_children_sorted_by_name() {
        let dir = scratch();
        let storage = LocalStorage::new(dir.path());

        let names: Vec<String> = storage
            .list_children("")
            .expect("list base")
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names, vec!["Cargo.toml", "src"]);

        let src: Vec<(String, bool)> = storage
            .list_children("src")
            .expect("list src")
            .iter()
            .map(|m| (m.name().to_string(), m.is_dir()))
            .collect();
        assert_eq!(
            src,
            vec![("bin".to_string(), true), ("lib.rs".to_string(), false)]
        );
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let dir = scratch();
        let storage = LocalStorage::new(dir.path());

        let err = storage.stat("nope").expect_err("stat should fail");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(storage.list_children("nope").is_err());
    }

    #[test]
    fn test_list_children_of_file_fails() {
        let dir = scratch();
        let storage = LocalStorage::new(dir.path());
        assert!(storage.list_children("Cargo.toml").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_follow_config() {
        let dir = scratch();
        std::os::unix::fs::symlink(dir.path().join("src"), dir.path().join("link"))
            .expect("Failed to create symlink");

        let following = LocalStorage::new(dir.path());
        assert!(following.stat("link").expect("stat link").is_dir());

        let literal = LocalStorage::new(dir.path()).with_config(LocalConfig {
            follow_symlinks: false,
        });
        assert!(!literal.stat("link").expect("stat link").is_dir());
        let link = literal
            .list_children("")
            .expect("list base")
            .into_iter()
            .find(|m| m.name() == "link")
            .expect("link listed");
        assert!(!link.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_lists_but_fails_stat() {
        let dir = scratch();
        std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("dangling"))
            .expect("Failed to create symlink");

        let storage = LocalStorage::new(dir.path());
        let children = storage.list_children("").expect("list base");
        assert!(children.iter().any(|m| m.name() == "dangling" && !m.is_dir()));
        assert!(storage.stat("dangling").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unsearchable_directory_still_lists() {
        use std::os::unix::fs::PermissionsExt;

        let dir = scratch();
        let locked = dir.path().join("locked");
        fs::create_dir(&locked).expect("Failed to create dir");
        fs::write(locked.join("child.txt"), "x").expect("Failed to write file");
        fs::create_dir(locked.join("inner")).expect("Failed to create dir");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o444))
            .expect("Failed to set permissions");

        // Privileged users bypass the missing search bit
        let privileged = fs::metadata(locked.join("child.txt")).is_ok();
        let storage = LocalStorage::new(dir.path());
        let listed = storage.list_children("locked");
        let stat = storage.stat("locked/child.txt");

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))
            .expect("Failed to restore permissions");
        if privileged {
            return;
        }

        let children: Vec<(String, bool)> = listed
            .expect("listing needs only read permission")
            .iter()
            .map(|m| (m.name().to_string(), m.is_dir()))
            .collect();
        assert_eq!(
            children,
            vec![("child.txt".to_string(), false), ("inner".to_string(), true)]
        );
        let err = stat.expect_err("stat needs search permission");
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
