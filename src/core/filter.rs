//! Attribute filters over directory entries.
//!
//! A [FilterSpec] selects entries by extension, by coarse [Category] or by a name substring.
//! [FilterMatcher] is the compiled predicate used by the filter mode and the search engine.

use crate::core::fm::Entry;

use phf::phf_map;
use std::fmt;

/// Coarse file categories used by category filters and previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Image,
    Video,
    Audio,
    Code,
    Document,
    Archive,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Video => "video",
            Category::Audio => "audio",
            Category::Code => "code",
            Category::Document => "document",
            Category::Archive => "archive",
        }
    }

    /// Looks up a lowercase extension in the category table.
    pub fn of_extension(ext: &str) -> Option<Category> {
        CATEGORY_MAP.get(ext).copied()
    }

    /// Parses a user alias such as "img" or "docs".
    pub fn from_alias(alias: &str) -> Option<Category> {
        CATEGORY_ALIASES.get(alias).copied()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Extension to category table. Keys are lowercase, without the dot.
static CATEGORY_MAP: phf::Map<&'static str, Category> = phf_map! {
    "png" => Category::Image,
    "jpg" => Category::Image,
    "jpeg" => Category::Image,
    "gif" => Category::Image,
    "bmp" => Category::Image,
    "webp" => Category::Image,
    "ico" => Category::Image,
    "svg" => Category::Image,
    "tiff" => Category::Image,

    "mp4" => Category::Video,
    "avi" => Category::Video,
    "mkv" => Category::Video,
    "mov" => Category::Video,
    "wmv" => Category::Video,
    "flv" => Category::Video,
    "webm" => Category::Video,
    "m4v" => Category::Video,

    "mp3" => Category::Audio,
    "wav" => Category::Audio,
    "flac" => Category::Audio,
    "ogg" => Category::Audio,
    "m4a" => Category::Audio,
    "aac" => Category::Audio,
    "wma" => Category::Audio,
    "opus" => Category::Audio,

    "py" => Category::Code,
    "js" => Category::Code,
    "ts" => Category::Code,
    "jsx" => Category::Code,
    "tsx" => Category::Code,
    "cpp" => Category::Code,
    "cc" => Category::Code,
    "c" => Category::Code,
    "h" => Category::Code,
    "hpp" => Category::Code,
    "java" => Category::Code,
    "rs" => Category::Code,
    "go" => Category::Code,
    "rb" => Category::Code,
    "php" => Category::Code,
    "sh" => Category::Code,
    "css" => Category::Code,
    "html" => Category::Code,
    "lua" => Category::Code,
    "swift" => Category::Code,
    "kt" => Category::Code,
    "json" => Category::Code,
    "yaml" => Category::Code,
    "yml" => Category::Code,
    "toml" => Category::Code,

    "pdf" => Category::Document,
    "doc" => Category::Document,
    "docx" => Category::Document,
    "txt" => Category::Document,
    "md" => Category::Document,
    "rst" => Category::Document,
    "odt" => Category::Document,
    "rtf" => Category::Document,

    "zip" => Category::Archive,
    "tar" => Category::Archive,
    "gz" => Category::Archive,
    "tgz" => Category::Archive,
    "bz2" => Category::Archive,
    "xz" => Category::Archive,
    "7z" => Category::Archive,
    "rar" => Category::Archive,
    "zst" => Category::Archive,
};

static CATEGORY_ALIASES: phf::Map<&'static str, Category> = phf_map! {
    "img" => Category::Image,
    "image" => Category::Image,
    "images" => Category::Image,
    "vid" => Category::Video,
    "video" => Category::Video,
    "audio" => Category::Audio,
    "music" => Category::Audio,
    "code" => Category::Code,
    "src" => Category::Code,
    "doc" => Category::Document,
    "docs" => Category::Document,
    "document" => Category::Document,
    "archive" => Category::Archive,
    "arc" => Category::Archive,
};

/// What a filter selects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    ByExtension(String),
    ByCategory(Category),
    ByNameSubstring(String),
}

impl FilterSpec {
    /// Parses filter input.
    ///
    /// * empty input: `None`, which matches everything
    /// * a category alias ("img", "video", "docs", ...): [FilterSpec::ByCategory]
    /// * ".ext": [FilterSpec::ByExtension]
    /// * anything else: [FilterSpec::ByNameSubstring]
    pub fn parse(text: &str) -> Option<FilterSpec> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        let lowered = trimmed.to_lowercase();
        if let Some(category) = Category::from_alias(&lowered) {
            return Some(FilterSpec::ByCategory(category));
        }
        if let Some(ext) = lowered.strip_prefix('.') {
            if ext.is_empty() {
                return None;
            }
            return Some(FilterSpec::ByExtension(ext.to_string()));
        }
        Some(FilterSpec::ByNameSubstring(trimmed.to_string()))
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterSpec::ByExtension(ext) => write!(f, "extension .{}", ext),
            FilterSpec::ByCategory(cat) => write!(f, "category {}", cat),
            FilterSpec::ByNameSubstring(s) => write!(f, "name contains \"{}\"", s),
        }
    }
}

/// Compiled, normalized form of a [FilterSpec].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMatcher {
    All,
    Extension(String),
    Category(Category),
    Name(String),
}

impl FilterMatcher {
    /// Compiles a spec. `None` and empty specs match everything.
    pub fn compile(spec: Option<&FilterSpec>) -> Self {
        match spec {
            None => FilterMatcher::All,
            Some(FilterSpec::ByExtension(ext)) => {
                let ext = ext.trim().trim_start_matches('.').to_lowercase();
                if ext.is_empty() {
                    FilterMatcher::All
                } else {
                    FilterMatcher::Extension(ext)
                }
            }
            Some(FilterSpec::ByCategory(cat)) => FilterMatcher::Category(*cat),
            Some(FilterSpec::ByNameSubstring(s)) => {
                if s.is_empty() {
                    FilterMatcher::All
                } else {
                    FilterMatcher::Name(s.to_lowercase())
                }
            }
        }
    }

    /// Shorthand for a case-insensitive name substring matcher.
    pub fn name_contains(query: &str) -> Self {
        Self::compile(Some(&FilterSpec::ByNameSubstring(query.to_string())))
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        match self {
            FilterMatcher::All => true,
            FilterMatcher::Extension(ext) => entry.extension() == Some(ext.as_str()),
            FilterMatcher::Category(cat) => {
                !entry.is_dir()
                    && entry.extension().and_then(Category::of_extension) == Some(*cat)
            }
            FilterMatcher::Name(needle) => entry.lowercase_name().contains(needle.as_str()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, FilterMatcher::All)
    }
}

impl fmt::Display for FilterMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMatcher::All => write!(f, "all"),
            FilterMatcher::Extension(ext) => write!(f, ".{}", ext),
            FilterMatcher::Category(cat) => write!(f, "{}", cat),
            FilterMatcher::Name(s) => write!(f, "\"{}\"", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fm::EntryKind;
    use std::path::PathBuf;

    fn file(name: &str) -> Entry {
        Entry::new(PathBuf::from("/x").join(name), EntryKind::File, 0, Some(1), None)
    }

    fn dir(name: &str) -> Entry {
        Entry::new(PathBuf::from("/x").join(name), EntryKind::Directory, 0, None, None)
    }

    #[test]
    fn extension_filter_is_exact_and_case_insensitive() {
        let m = FilterMatcher::compile(Some(&FilterSpec::ByExtension("py".into())));
        assert!(m.matches(&file("main.py")));
        assert!(m.matches(&file("MAIN.PY")));
        assert!(!m.matches(&file("main.pyc")));
        assert!(!m.matches(&file("py")));

        let dotted = FilterMatcher::compile(Some(&FilterSpec::ByExtension(".PY".into())));
        assert_eq!(dotted, m);
    }

    #[test]
    fn category_filter_uses_table_and_skips_dirs() {
        let m = FilterMatcher::compile(Some(&FilterSpec::ByCategory(Category::Image)));
        assert!(m.matches(&file("cat.png")));
        assert!(m.matches(&file("cat.JPG")));
        assert!(!m.matches(&file("cat.txt")));
        assert!(!m.matches(&file("noext")));
        assert!(!m.matches(&dir("photos.png")));
    }

    #[test]
    fn name_filter_matches_substring() {
        let m = FilterMatcher::name_contains("Crab");
        assert!(m.matches(&file("my_crab.rs")));
        assert!(m.matches(&dir("CRABS")));
        assert!(m.matches(&file(".crabrc")));
        assert!(!m.matches(&file("lobster.rs")));
    }

    #[test]
    fn empty_spec_matches_everything() {
        assert!(FilterMatcher::compile(None).is_all());
        assert!(FilterMatcher::name_contains("").is_all());
        assert!(FilterMatcher::compile(None).matches(&dir("anything")));
    }

    #[test]
    fn parse_recognizes_aliases_and_extensions() {
        assert_eq!(FilterSpec::parse("   "), None);
        assert_eq!(
            FilterSpec::parse("img"),
            Some(FilterSpec::ByCategory(Category::Image))
        );
        assert_eq!(
            FilterSpec::parse("Video"),
            Some(FilterSpec::ByCategory(Category::Video))
        );
        assert_eq!(
            FilterSpec::parse(".RS"),
            Some(FilterSpec::ByExtension("rs".into()))
        );
        assert_eq!(
            FilterSpec::parse("report"),
            Some(FilterSpec::ByNameSubstring("report".into()))
        );
        assert_eq!(FilterSpec::parse("."), None);
    }
}
