//! Writer for one category's subtree of the backup root.
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::tools::Category;

/// Destination directory for a single collector.
///
/// The directory is created lazily on the first write, so a category that
/// captured nothing leaves no subtree behind. Writes replace existing files
/// at the same name; files not written this run are left untouched.
#[derive(Debug)]
pub struct Subtree {
    dir: PathBuf,
    written: usize,
}

impl Subtree {
    /// Subtree for `category` under `backup_root`.
    #[must_use]
    pub fn new(backup_root: &Path, category: Category) -> Self {
        Self {
            dir: backup_root.join(category.dir_name()),
            written: 0,
        }
    }

    /// Path of the subtree directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Number of entries written so far.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }

    fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating directory {}", self.dir.display()))
    }

    /// Copy the file at `src` to `<subtree>/<name>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the subtree cannot be created or the copy fails.
    pub fn copy_file(&mut self, src: &Path, name: &str) -> Result<()> {
        self.ensure()?;
        let dst = self.dir.join(name);
        std::fs::copy(src, &dst)
            .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
        self.written += 1;
        Ok(())
    }

    /// Copy the directory tree at `src` to `<subtree>/<name>`, merging into
    /// whatever is already there.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory cannot be created or any file copy fails.
    pub fn copy_dir(&mut self, src: &Path, name: &str) -> Result<()> {
        self.ensure()?;
        copy_dir_recursive(src, &self.dir.join(name))?;
        self.written += 1;
        Ok(())
    }

    /// Write `contents` to `<subtree>/<name>`, replacing any previous file.
    ///
    /// # Errors
    ///
    /// Returns an error if the subtree cannot be created or the write fails.
    pub fn write(&mut self, name: &str, contents: impl AsRef<[u8]>) -> Result<()> {
        self.ensure()?;
        let dst = self.dir.join(name);
        std::fs::write(&dst, contents).with_context(|| format!("writing {}", dst.display()))?;
        self.written += 1;
        Ok(())
    }
}

/// Recursively copy a directory tree.
///
/// Links are not traversed: a symlink to a file is copied as that file's
/// contents, while symlinks to directories and anything that is neither a
/// file nor a directory are skipped.
///
/// # Errors
///
/// Returns an error if the source cannot be walked, a destination directory
/// cannot be created, or a file cannot be copied.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.with_context(|| format!("walking {}", src.display()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .with_context(|| format!("{} escapes {}", entry.path().display(), src.display()))?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            std::fs::create_dir_all(&target)
                .with_context(|| format!("creating directory {}", target.display()))?;
        } else if file_type.is_file() || (file_type.is_symlink() && entry.path().is_file()) {
            std::fs::copy(entry.path(), &target).with_context(|| {
                format!("copying {} to {}", entry.path().display(), target.display())
            })?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn subtree_is_created_lazily() {
        let root = tempfile::tempdir().unwrap();
        let mut subtree = Subtree::new(root.path(), Category::Git);
        assert!(!subtree.path().exists(), "nothing written yet");
        subtree.write("user_info.json", "{}").unwrap();
        assert!(subtree.path().is_dir());
        assert_eq!(subtree.written(), 1);
    }

    #[test]
    fn write_replaces_existing_file() {
        let root = tempfile::tempdir().unwrap();
        let mut subtree = Subtree::new(root.path(), Category::Packages);
        subtree.write("cargo_packages.txt", "old contents that are longer").unwrap();
        subtree.write("cargo_packages.txt", "new").unwrap();
        assert_eq!(
            std::fs::read_to_string(subtree.path().join("cargo_packages.txt")).unwrap(),
            "new"
        );
    }

    #[test]
    fn unrelated_files_survive() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("dotfiles");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(".legacyrc"), "keep").unwrap();

        let src = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join(".bashrc"), "alias ll='ls -l'").unwrap();

        let mut subtree = Subtree::new(root.path(), Category::Dotfiles);
        subtree.copy_file(&src.path().join(".bashrc"), ".bashrc").unwrap();
        assert!(dir.join(".legacyrc").exists());
        assert!(dir.join(".bashrc").exists());
    }

    #[test]
    fn copies_files_and_subdirectories() {
        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();

        std::fs::write(src.path().join("a.json"), b"aaa").unwrap();
        std::fs::create_dir(src.path().join("sub")).unwrap();
        std::fs::write(src.path().join("sub/b.json"), b"bbb").unwrap();

        let target = dst.path().join("out");
        copy_dir_recursive(src.path(), &target).unwrap();

        assert_eq!(std::fs::read(target.join("a.json")).unwrap(), b"aaa");
        assert_eq!(std::fs::read(target.join("sub/b.json")).unwrap(), b"bbb");
    }

    #[test]
    fn copy_dir_missing_source_fails() {
        let dst = tempfile::tempdir().unwrap();
        let result = copy_dir_recursive(Path::new("/nonexistent/devsync/src"), dst.path());
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_directories_are_not_traversed() {
        use std::os::unix::fs::symlink;

        let src = tempfile::tempdir().unwrap();
        let dst = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("rust.json"), b"{}").unwrap();
        std::fs::create_dir(src.path().join("nested")).unwrap();
        std::fs::write(src.path().join("nested/go.json"), b"[]").unwrap();
        symlink("..", src.path().join("nested/loop")).unwrap();
        symlink(src.path().join("rust.json"), src.path().join("alias.json")).unwrap();

        let target = dst.path().join("snippets");
        copy_dir_recursive(src.path(), &target).unwrap();

        assert_eq!(std::fs::read(target.join("rust.json")).unwrap(), b"{}");
        assert_eq!(std::fs::read(target.join("nested/go.json")).unwrap(), b"[]");
        assert_eq!(std::fs::read(target.join("alias.json")).unwrap(), b"{}");
        assert!(!target.join("nested/loop").exists());
        assert!(!target.join("alias.json").is_symlink());
    }
}
