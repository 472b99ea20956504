//! Preview providers for the right-hand pane.
//!
//! A [PreviewKind] is resolved from the entry kind and the file extension, and the
//! [PreviewRegistry] dispatches to the matching [PreviewProvider]. Providers only ever
//! read, and every failure turns into a description carrying the error text.

use crate::core::error::CoreError;
use crate::core::fm::{DirReader, EntryKind};
use crate::core::formatter::{format_file_size, format_file_time};

use phf::phf_map;

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

// Bytes peeked for NUL detection before showing a file as text
const BINARY_PEEK_BYTES: usize = 1024;

pub const TRUNCATION_MARKER: &str = "... (truncated)";

/// What kind of preview a path gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreviewKind {
    Directory,
    Image,
    Video,
    Audio,
    Archive,
    Pdf,
    TextCode,
    Executable,
    Database,
    Unknown,
    Missing,
}

impl PreviewKind {
    pub fn label(self) -> &'static str {
        match self {
            PreviewKind::Directory => "Directory",
            PreviewKind::Image => "Image File",
            PreviewKind::Video => "Video File",
            PreviewKind::Audio => "Audio File",
            PreviewKind::Archive => "Archive File",
            PreviewKind::Pdf => "PDF Document",
            PreviewKind::TextCode => "Text/Code File",
            PreviewKind::Executable => "Executable/Library",
            PreviewKind::Database => "Database File",
            PreviewKind::Unknown => "Binary/Unknown File",
            PreviewKind::Missing => "Missing",
        }
    }

    /// Resolves the preview kind of `path` from its already known entry kind.
    pub fn resolve(path: &Path, kind: EntryKind) -> Self {
        match kind {
            EntryKind::Directory => PreviewKind::Directory,
            EntryKind::BrokenSymlink => PreviewKind::Missing,
            EntryKind::File => lowercase_extension(path)
                .and_then(|ext| PREVIEW_KINDS.get(ext.as_str()).copied())
                .unwrap_or(PreviewKind::Unknown),
        }
    }
}

static PREVIEW_KINDS: phf::Map<&'static str, PreviewKind> = phf_map! {
    "png" => PreviewKind::Image,
    "jpg" => PreviewKind::Image,
    "jpeg" => PreviewKind::Image,
    "gif" => PreviewKind::Image,
    "bmp" => PreviewKind::Image,
    "webp" => PreviewKind::Image,
    "ico" => PreviewKind::Image,
    "svg" => PreviewKind::Image,
    "tiff" => PreviewKind::Image,

    "mp4" => PreviewKind::Video,
    "avi" => PreviewKind::Video,
    "mkv" => PreviewKind::Video,
    "mov" => PreviewKind::Video,
    "wmv" => PreviewKind::Video,
    "flv" => PreviewKind::Video,
    "webm" => PreviewKind::Video,
    "m4v" => PreviewKind::Video,

    "mp3" => PreviewKind::Audio,
    "wav" => PreviewKind::Audio,
    "flac" => PreviewKind::Audio,
    "ogg" => PreviewKind::Audio,
    "m4a" => PreviewKind::Audio,
    "aac" => PreviewKind::Audio,
    "wma" => PreviewKind::Audio,
    "opus" => PreviewKind::Audio,

    "zip" => PreviewKind::Archive,
    "tar" => PreviewKind::Archive,
    "gz" => PreviewKind::Archive,
    "tgz" => PreviewKind::Archive,
    "bz2" => PreviewKind::Archive,
    "xz" => PreviewKind::Archive,
    "7z" => PreviewKind::Archive,
    "rar" => PreviewKind::Archive,
    "zst" => PreviewKind::Archive,

    "pdf" => PreviewKind::Pdf,

    "py" => PreviewKind::TextCode,
    "txt" => PreviewKind::TextCode,
    "md" => PreviewKind::TextCode,
    "rst" => PreviewKind::TextCode,
    "json" => PreviewKind::TextCode,
    "yaml" => PreviewKind::TextCode,
    "yml" => PreviewKind::TextCode,
    "toml" => PreviewKind::TextCode,
    "ini" => PreviewKind::TextCode,
    "cfg" => PreviewKind::TextCode,
    "csv" => PreviewKind::TextCode,
    "log" => PreviewKind::TextCode,
    "c" => PreviewKind::TextCode,
    "h" => PreviewKind::TextCode,
    "cc" => PreviewKind::TextCode,
    "cpp" => PreviewKind::TextCode,
    "hpp" => PreviewKind::TextCode,
    "js" => PreviewKind::TextCode,
    "jsx" => PreviewKind::TextCode,
    "ts" => PreviewKind::TextCode,
    "tsx" => PreviewKind::TextCode,
    "html" => PreviewKind::TextCode,
    "css" => PreviewKind::TextCode,
    "sh" => PreviewKind::TextCode,
    "rs" => PreviewKind::TextCode,
    "go" => PreviewKind::TextCode,
    "java" => PreviewKind::TextCode,
    "kt" => PreviewKind::TextCode,
    "rb" => PreviewKind::TextCode,
    "php" => PreviewKind::TextCode,
    "lua" => PreviewKind::TextCode,
    "swift" => PreviewKind::TextCode,

    "exe" => PreviewKind::Executable,
    "dll" => PreviewKind::Executable,
    "so" => PreviewKind::Executable,
    "dylib" => PreviewKind::Executable,
    "app" => PreviewKind::Executable,

    "db" => PreviewKind::Database,
    "sqlite" => PreviewKind::Database,
    "sqlite3" => PreviewKind::Database,
};

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Limits applied by the providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    pub max_lines: usize,
    pub max_bytes: usize,
    pub dir_entries: usize,
    pub show_hidden: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_lines: 100,
            max_bytes: 2000,
            dir_entries: 80,
            show_hidden: true,
        }
    }
}

/// Display-ready description of a path. Opaque to the navigation core.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewDescription {
    pub title: String,
    pub kind_label: String,
    pub fields: Vec<(String, String)>,
    pub lines: Vec<String>,
}

impl PreviewDescription {
    fn new(title: impl Into<String>, kind: PreviewKind) -> Self {
        Self {
            title: title.into(),
            kind_label: kind.label().to_string(),
            fields: Vec::new(),
            lines: Vec::new(),
        }
    }

    fn field(mut self, label: &str, value: impl Into<String>) -> Self {
        self.fields.push((label.to_string(), value.into()));
        self
    }

    fn failed(title: impl Into<String>, kind: PreviewKind, err: &CoreError) -> Self {
        let mut desc = Self::new(title, kind);
        desc.lines.push(format!("[Error: {}]", err));
        desc
    }

    /// Looks up a field value by label.
    pub fn field_value(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }
}

pub trait PreviewProvider: Send {
    fn describe(&self, path: &Path, kind: PreviewKind) -> PreviewDescription;
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Counts folders and files and lists the first entries.
pub struct DirectoryPreview {
    entries: usize,
    show_hidden: bool,
}

impl PreviewProvider for DirectoryPreview {
    fn describe(&self, path: &Path, kind: PreviewKind) -> PreviewDescription {
        let title = format!("Directory: {}", display_name(path));
        let listing = DirReader::new(self.show_hidden, usize::MAX).read(path);
        if let Some(err) = listing.error() {
            return PreviewDescription::failed(title, kind, err);
        }

        let dirs = listing.entries().iter().filter(|e| e.is_dir()).count();
        let files = listing.len() - dirs;
        let mut desc = PreviewDescription::new(title, kind)
            .field("Folders", dirs.to_string())
            .field("Files", files.to_string());

        desc.lines = listing
            .entries()
            .iter()
            .take(self.entries)
            .map(|e| {
                if e.is_dir() {
                    format!("{}/", e.name())
                } else {
                    e.name().to_string()
                }
            })
            .collect();
        if listing.len() > self.entries {
            desc.lines.push(format!("... and {} more", listing.len() - self.entries));
        }
        if listing.is_empty() {
            desc.lines.push("[empty directory]".to_string());
        }
        desc
    }
}

/// Shows the head of a text file.
pub struct TextPreview {
    max_lines: usize,
    max_bytes: usize,
}

impl PreviewProvider for TextPreview {
    fn describe(&self, path: &Path, kind: PreviewKind) -> PreviewDescription {
        let mut desc = match file_description(path, kind) {
            Ok(desc) => desc,
            Err(failed) => return failed,
        };

        let mut buf = Vec::with_capacity(self.max_bytes.min(64 * 1024));
        let read = File::open(path).and_then(|f| {
            // one extra byte tells whether the file goes on
            f.take(self.max_bytes as u64 + 1).read_to_end(&mut buf)
        });
        if let Err(e) = read {
            desc.lines
                .push(format!("[Error: {}]", CoreError::from_io(&e, path)));
            return desc;
        }

        if buf[..buf.len().min(BINARY_PEEK_BYTES)].contains(&0) {
            desc.lines.push("[Binary file - preview hidden]".to_string());
            return desc;
        }

        let truncated_bytes = buf.len() > self.max_bytes;
        buf.truncate(self.max_bytes);
        let text = String::from_utf8_lossy(&buf);

        let mut lines = text.lines();
        desc.lines = lines
            .by_ref()
            .take(self.max_lines)
            .map(str::to_string)
            .collect();
        if truncated_bytes || lines.next().is_some() {
            desc.lines.push(String::new());
            desc.lines.push(TRUNCATION_MARKER.to_string());
        }
        if desc.lines.is_empty() {
            desc.lines.push("[Empty file]".to_string());
        }
        desc
    }
}

/// Metadata-only preview used by media, archives, executables, databases and unknown files.
pub struct InfoPreview;

impl PreviewProvider for InfoPreview {
    fn describe(&self, path: &Path, kind: PreviewKind) -> PreviewDescription {
        let desc = match file_description(path, kind) {
            Ok(desc) => desc,
            Err(failed) => return failed,
        };
        let ext = lowercase_extension(path);
        match kind {
            PreviewKind::Database => desc.field("Type", "SQLite"),
            PreviewKind::Executable => {
                desc.field("Type", ext.unwrap_or_default().to_uppercase())
            }
            PreviewKind::Unknown => desc.field(
                "Extension",
                ext.map(|e| format!(".{e}"))
                    .unwrap_or_else(|| "(none)".to_string()),
            ),
            _ => desc.field("Format", ext.unwrap_or_default().to_uppercase()),
        }
    }
}

/// Shown for broken symlinks and vanished paths.
pub struct MissingPreview;

impl PreviewProvider for MissingPreview {
    fn describe(&self, path: &Path, kind: PreviewKind) -> PreviewDescription {
        let err = CoreError::NotFound(path.to_path_buf());
        PreviewDescription::failed(format!("File: {}", display_name(path)), kind, &err)
    }
}

/// Common header of every file preview: title, size and modification time.
fn file_description(
    path: &Path,
    kind: PreviewKind,
) -> Result<PreviewDescription, PreviewDescription> {
    let title = format!("File: {}", display_name(path));
    match fs::metadata(path) {
        Ok(md) => Ok(PreviewDescription::new(title, kind)
            .field("Size", format_file_size(Some(md.len()), false))
            .field("Modified", format_file_time(md.modified().ok()))),
        Err(e) => Err(PreviewDescription::failed(
            title,
            kind,
            &CoreError::from_io(&e, path),
        )),
    }
}

/// Dispatches a [PreviewKind] to its provider.
pub struct PreviewRegistry {
    directory: DirectoryPreview,
    text: TextPreview,
    info: InfoPreview,
    missing: MissingPreview,
}

impl PreviewRegistry {
    pub fn new(options: PreviewOptions) -> Self {
        Self {
            directory: DirectoryPreview {
                entries: options.dir_entries,
                show_hidden: options.show_hidden,
            },
            text: TextPreview {
                max_lines: options.max_lines,
                max_bytes: options.max_bytes,
            },
            info: InfoPreview,
            missing: MissingPreview,
        }
    }

    pub fn provider(&self, kind: PreviewKind) -> &dyn PreviewProvider {
        match kind {
            PreviewKind::Directory => &self.directory,
            PreviewKind::TextCode => &self.text,
            PreviewKind::Missing => &self.missing,
            _ => &self.info,
        }
    }

    /// Resolves the preview kind and describes `path`.
    pub fn describe(&self, path: &Path, kind: EntryKind) -> PreviewDescription {
        let preview_kind = PreviewKind::resolve(path, kind);
        self.provider(preview_kind).describe(path, preview_kind)
    }
}

impl Default for PreviewRegistry {
    fn default() -> Self {
        Self::new(PreviewOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn kinds_resolve_from_extension() {
        let k = |name: &str| PreviewKind::resolve(Path::new(name), EntryKind::File);
        assert_eq!(k("a.PNG"), PreviewKind::Image);
        assert_eq!(k("movie.mkv"), PreviewKind::Video);
        assert_eq!(k("main.rs"), PreviewKind::TextCode);
        assert_eq!(k("lib.so"), PreviewKind::Executable);
        assert_eq!(k("data.sqlite3"), PreviewKind::Database);
        assert_eq!(k("Makefile"), PreviewKind::Unknown);
        assert_eq!(
            PreviewKind::resolve(Path::new("x.rs"), EntryKind::Directory),
            PreviewKind::Directory
        );
        assert_eq!(
            PreviewKind::resolve(Path::new("x.rs"), EntryKind::BrokenSymlink),
            PreviewKind::Missing
        );
    }

    #[test]
    fn text_preview_caps_lines() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("notes.txt");
        let body: String = (0..10).map(|i| format!("line {i}\n")).collect();
        fs::write(&file, body)?;

        let registry = PreviewRegistry::new(PreviewOptions {
            max_lines: 3,
            ..PreviewOptions::default()
        });
        let desc = registry.describe(&file, EntryKind::File);
        assert_eq!(desc.kind_label, "Text/Code File");
        assert_eq!(desc.title, "File: notes.txt");
        assert_eq!(&desc.lines[..3], &["line 0", "line 1", "line 2"]);
        assert_eq!(desc.lines.last().map(String::as_str), Some(TRUNCATION_MARKER));
        Ok(())
    }

    #[test]
    fn text_preview_caps_bytes() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("long.md");
        fs::write(&file, "x".repeat(5000))?;

        let desc = PreviewRegistry::default().describe(&file, EntryKind::File);
        assert_eq!(desc.lines[0].len(), 2000);
        assert_eq!(desc.lines.last().map(String::as_str), Some(TRUNCATION_MARKER));
        assert!(desc.field_value("Size").is_some());
        Ok(())
    }

    #[test]
    fn short_text_has_no_marker() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("short.py");
        fs::write(&file, "print('hi')\n")?;

        let desc = PreviewRegistry::default().describe(&file, EntryKind::File);
        assert_eq!(desc.lines, vec!["print('hi')".to_string()]);
        Ok(())
    }

    #[test]
    fn binary_text_is_hidden() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let file = dir.path().join("weird.txt");
        fs::write(&file, [b'a', 0, b'b'])?;

        let desc = PreviewRegistry::default().describe(&file, EntryKind::File);
        assert_eq!(desc.lines, vec!["[Binary file - preview hidden]".to_string()]);
        Ok(())
    }

    #[test]
    fn directory_preview_counts() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        fs::create_dir(dir.path().join("sub"))?;
        fs::write(dir.path().join("a.txt"), "a")?;
        fs::write(dir.path().join("b.txt"), "b")?;

        let desc = PreviewRegistry::default().describe(dir.path(), EntryKind::Directory);
        assert_eq!(desc.field_value("Folders"), Some("1"));
        assert_eq!(desc.field_value("Files"), Some("2"));
        assert_eq!(desc.lines, vec!["sub/", "a.txt", "b.txt"]);
        Ok(())
    }

    #[test]
    fn info_preview_fields() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempdir()?;
        let image = dir.path().join("cat.jpg");
        let db = dir.path().join("app.db");
        let other = dir.path().join("blob");
        for f in [&image, &db, &other] {
            fs::write(f, "")?;
        }

        let registry = PreviewRegistry::default();
        let desc = registry.describe(&image, EntryKind::File);
        assert_eq!(desc.kind_label, "Image File");
        assert_eq!(desc.field_value("Format"), Some("JPG"));

        assert_eq!(
            registry.describe(&db, EntryKind::File).field_value("Type"),
            Some("SQLite")
        );
        assert_eq!(
            registry.describe(&other, EntryKind::File).field_value("Extension"),
            Some("(none)")
        );
        Ok(())
    }

    #[test]
    fn missing_file_reports_error() {
        let desc =
            PreviewRegistry::default().describe(Path::new("/no/such/file.txt"), EntryKind::File);
        assert!(desc.lines[0].starts_with("[Error: Not found"));
        assert!(desc.fields.is_empty());
    }
}
