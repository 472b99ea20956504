//! Directory reading for trek.
//!
//! Provides the [Entry] snapshot used throughout trek, the [DirectoryListing] produced by
//! every directory read, and the [DirReader] which applies the hidden-file, sort and
//! capacity policy.

use crate::core::error::CoreError;

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Default number of entries kept per directory read.
pub const DEFAULT_DIR_CAPACITY: usize = 300;

/// Kind of a directory entry, resolved through symlinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    File,
    Directory,
    /// A symlink whose target could not be resolved.
    BrokenSymlink,
}

/// A single entry of a directory listing.
///
/// Immutable snapshot taken at listing time. The filesystem may have changed since.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    name: Box<str>,
    lowercase: Box<str>,
    path: PathBuf,
    kind: EntryKind,
    flags: u8,
    size: Option<u64>,
    modified: Option<SystemTime>,
}

impl Entry {
    pub const IS_HIDDEN: u8 = 1 << 0;
    pub const IS_SYMLINK: u8 = 1 << 1;

    pub fn new(
        path: PathBuf,
        kind: EntryKind,
        flags: u8,
        size: Option<u64>,
        modified: Option<SystemTime>,
    ) -> Self {
        let name: Box<str> = match path.file_name() {
            Some(n) => n.to_string_lossy().into(),
            None => path.to_string_lossy().into(),
        };
        let lowercase = name.to_lowercase().into_boxed_str();
        // sizes only make sense for files
        let size = if kind == EntryKind::File { size } else { None };
        Entry {
            name,
            lowercase,
            path,
            kind,
            flags,
            size,
            modified,
        }
    }

    // Accessors

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn lowercase_name(&self) -> &str {
        &self.lowercase
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    #[inline]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    #[inline]
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    #[inline]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        self.flags & Self::IS_HIDDEN != 0
    }

    #[inline]
    pub fn is_symlink(&self) -> bool {
        self.flags & Self::IS_SYMLINK != 0
    }

    #[inline]
    pub fn is_broken_symlink(&self) -> bool {
        self.kind == EntryKind::BrokenSymlink
    }

    /// Lowercased text after the final '.' of the name, if any.
    ///
    /// A leading dot alone (".bashrc") is not an extension.
    pub fn extension(&self) -> Option<&str> {
        let idx = self.lowercase.rfind('.')?;
        if idx == 0 || idx + 1 == self.lowercase.len() {
            return None;
        }
        Some(&self.lowercase[idx + 1..])
    }

    /// Builds an entry by stat-ing a single path.
    pub fn from_path(path: &Path) -> Result<Entry, CoreError> {
        let link_md = fs::symlink_metadata(path).map_err(|e| CoreError::from_io(&e, path))?;
        Ok(entry_from_metadata(path.to_path_buf(), &link_md))
    }
}

/// Sort order used by every listing: directories first, then case-insensitive name.
pub fn compare_entries(a: &Entry, b: &Entry) -> Ordering {
    let a_key = (!a.is_dir(), a.lowercase_name());
    let b_key = (!b.is_dir(), b.lowercase_name());
    a_key.cmp(&b_key).then_with(|| a.name().cmp(b.name()))
}

/// Result of one directory read. Never mutated, only replaced.
#[derive(Debug, Clone)]
pub struct DirectoryListing {
    path: PathBuf,
    entries: Vec<Entry>,
    truncated: bool,
    error: Option<CoreError>,
}

impl DirectoryListing {
    pub fn empty(path: PathBuf) -> Self {
        DirectoryListing {
            path,
            entries: Vec::new(),
            truncated: false,
            error: None,
        }
    }

    fn failed(path: PathBuf, error: CoreError) -> Self {
        DirectoryListing {
            path,
            entries: Vec::new(),
            truncated: false,
            error: Some(error),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    #[inline]
    pub fn error(&self) -> Option<&CoreError> {
        self.error.as_ref()
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Turns a failed listing into its error.
    pub fn into_result(self) -> Result<DirectoryListing, CoreError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self),
        }
    }

    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }
}

/// Lists immediate children of a directory under a hidden-file and capacity policy.
#[derive(Debug, Clone, Copy)]
pub struct DirReader {
    show_hidden: bool,
    capacity: usize,
}

impl DirReader {
    pub fn new(show_hidden: bool, capacity: usize) -> Self {
        Self {
            show_hidden,
            capacity: capacity.max(1),
        }
    }

    #[inline]
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Reads the directory at `path`.
    ///
    /// Failures produce an empty listing with [DirectoryListing::error] set.
    pub fn read(&self, path: &Path) -> DirectoryListing {
        self.read_filtered(path, |_| true)
    }

    /// Reads the directory at `path`, keeping only entries accepted by `keep`.
    ///
    /// The predicate runs before the capacity cap, so the cap applies to matches.
    pub fn read_filtered<F>(&self, path: &Path, mut keep: F) -> DirectoryListing
    where
        F: FnMut(&Entry) -> bool,
    {
        match fs::metadata(path) {
            Ok(md) if !md.is_dir() => {
                return DirectoryListing::failed(
                    path.to_path_buf(),
                    CoreError::NotADirectory(path.to_path_buf()),
                );
            }
            Ok(_) => {}
            Err(e) => {
                return DirectoryListing::failed(path.to_path_buf(), CoreError::from_io(&e, path));
            }
        }

        let iter = match fs::read_dir(path) {
            Ok(iter) => iter,
            Err(e) => {
                log::debug!("read_dir failed on {}: {}", path.display(), e);
                return DirectoryListing::failed(path.to_path_buf(), CoreError::from_io(&e, path));
            }
        };

        let mut entries = Vec::with_capacity(64);
        for dir_entry in iter {
            let Ok(dir_entry) = dir_entry else {
                continue;
            };
            let Ok(link_md) = dir_entry.metadata() else {
                continue;
            };
            let entry = entry_from_metadata(dir_entry.path(), &link_md);
            if !self.show_hidden && entry.is_hidden() {
                continue;
            }
            if keep(&entry) {
                entries.push(entry);
            }
        }

        entries.sort_by(compare_entries);
        let truncated = entries.len() > self.capacity;
        entries.truncate(self.capacity);

        DirectoryListing {
            path: path.to_path_buf(),
            entries,
            truncated,
            error: None,
        }
    }
}

impl Default for DirReader {
    fn default() -> Self {
        Self::new(false, DEFAULT_DIR_CAPACITY)
    }
}

/// Builds an [Entry] from the non-following metadata of `path`.
/// Symlinks are resolved once to learn the target kind.
fn entry_from_metadata(path: PathBuf, link_md: &fs::Metadata) -> Entry {
    let mut flags = 0u8;

    let name_hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false);
    if name_hidden {
        flags |= Entry::IS_HIDDEN;
    }

    #[cfg(windows)]
    {
        use std::os::windows::fs::MetadataExt;
        if link_md.file_attributes() & 0x2 != 0 {
            flags |= Entry::IS_HIDDEN;
        }
    }

    let (kind, size, modified) = if link_md.file_type().is_symlink() {
        flags |= Entry::IS_SYMLINK;
        match fs::metadata(&path) {
            Ok(target) if target.is_dir() => (EntryKind::Directory, None, target.modified().ok()),
            Ok(target) => (EntryKind::File, Some(target.len()), target.modified().ok()),
            Err(_) => (EntryKind::BrokenSymlink, None, link_md.modified().ok()),
        }
    } else if link_md.is_dir() {
        (EntryKind::Directory, None, link_md.modified().ok())
    } else {
        (EntryKind::File, Some(link_md.len()), link_md.modified().ok())
    };

    Entry::new(path, kind, flags, size, modified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn entry_flags_and_extension() {
        let e = Entry::new(
            PathBuf::from("/tmp/.Hidden.TXT"),
            EntryKind::File,
            Entry::IS_HIDDEN,
            Some(3),
            None,
        );
        assert!(e.is_hidden());
        assert!(!e.is_symlink());
        assert_eq!(e.extension(), Some("txt"));
        assert_eq!(e.name(), ".Hidden.TXT");

        let dotfile = Entry::new(PathBuf::from("/tmp/.bashrc"), EntryKind::File, 0, None, None);
        assert_eq!(dotfile.extension(), None);

        let trailing = Entry::new(PathBuf::from("/tmp/notes."), EntryKind::File, 0, None, None);
        assert_eq!(trailing.extension(), None);
    }

    #[test]
    fn directories_never_carry_size() {
        let d = Entry::new(PathBuf::from("/tmp/d"), EntryKind::Directory, 0, Some(4096), None);
        assert_eq!(d.size(), None);
    }

    #[test]
    fn read_sorts_dirs_first_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join("beta.txt"))?;
        File::create(dir.path().join("Alpha.txt"))?;
        fs::create_dir(dir.path().join("zeta"))?;
        fs::create_dir(dir.path().join("Gamma"))?;

        let listing = DirReader::default().read(dir.path());
        let names: Vec<_> = listing.entries().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Gamma", "zeta", "Alpha.txt", "beta.txt"]);
        assert!(!listing.truncated());
        assert!(listing.is_ok());
        Ok(())
    }

    #[test]
    fn read_respects_hidden_policy() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        File::create(dir.path().join(".secret"))?;
        File::create(dir.path().join("plain"))?;

        let hidden_off = DirReader::new(false, 300).read(dir.path());
        assert_eq!(hidden_off.len(), 1);

        let hidden_on = DirReader::new(true, 300).read(dir.path());
        assert_eq!(hidden_on.len(), 2);
        assert!(hidden_on.entries().iter().any(|e| e.is_hidden()));
        Ok(())
    }

    #[test]
    fn read_truncates_at_capacity() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        for i in 0..12 {
            File::create(dir.path().join(format!("f{i:02}")))?;
        }
        let listing = DirReader::new(false, 10).read(dir.path());
        assert_eq!(listing.len(), 10);
        assert!(listing.truncated());
        assert_eq!(listing.entries()[0].name(), "f00");
        assert_eq!(listing.entries()[9].name(), "f09");
        Ok(())
    }

    #[test]
    fn read_records_file_metadata() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let mut f = File::create(dir.path().join("data.bin"))?;
        f.write_all(b"12345")?;
        drop(f);

        let listing = DirReader::default().read(dir.path());
        let entry = &listing.entries()[0];
        assert_eq!(entry.kind(), EntryKind::File);
        assert_eq!(entry.size(), Some(5));
        assert!(entry.modified().is_some());
        assert!(entry.path().is_absolute());
        Ok(())
    }

    #[test]
    fn read_missing_dir_is_empty_with_error() {
        let path = PathBuf::from("/path/does/not/exist");
        let listing = DirReader::default().read(&path);
        assert!(listing.is_empty());
        assert_eq!(listing.error(), Some(&CoreError::NotFound(path)));
    }

    #[test]
    fn read_file_is_not_a_directory() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("plain.txt");
        File::create(&file)?;
        let listing = DirReader::default().read(&file);
        assert_eq!(listing.error(), Some(&CoreError::NotADirectory(file)));
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn read_classifies_symlinks() -> Result<(), Box<dyn std::error::Error>> {
        use std::os::unix::fs::symlink;

        let dir = tempdir()?;
        fs::create_dir(dir.path().join("real"))?;
        symlink(dir.path().join("real"), dir.path().join("link_dir"))?;
        symlink(dir.path().join("gone"), dir.path().join("link_broken"))?;

        let listing = DirReader::default().read(dir.path());
        let link_dir = &listing.entries()[listing.position_of("link_dir").ok_or("no link_dir")?];
        assert_eq!(link_dir.kind(), EntryKind::Directory);
        assert!(link_dir.is_symlink());

        let broken = &listing.entries()[listing.position_of("link_broken").ok_or("no broken")?];
        assert_eq!(broken.kind(), EntryKind::BrokenSymlink);
        Ok(())
    }
}
