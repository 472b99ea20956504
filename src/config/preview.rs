//! The `[preview]` configuration table.

use crate::core::preview::PreviewOptions;
use crate::utils::clamp_setting;

use serde::Deserialize;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Preview {
    enabled: bool,
    max_lines: usize,
    max_bytes: usize,
    dir_entries: usize,
}

impl Default for Preview {
    fn default() -> Self {
        let defaults = PreviewOptions::default();
        Preview {
            enabled: true,
            max_lines: defaults.max_lines,
            max_bytes: defaults.max_bytes,
            dir_entries: defaults.dir_entries,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InternalPreview {
    enabled: bool,
    max_lines: usize,
    max_bytes: usize,
    dir_entries: usize,
}

impl From<Preview> for InternalPreview {
    fn from(p: Preview) -> Self {
        Self {
            enabled: p.enabled,
            max_lines: clamp_setting("max_lines", p.max_lines, 1, 10_000),
            max_bytes: clamp_setting("max_bytes", p.max_bytes, 64, 1024 * 1024),
            dir_entries: clamp_setting("dir_entries", p.dir_entries, 1, 10_000),
        }
    }
}

impl InternalPreview {
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Provider limits for a preview under the given hidden-file policy.
    pub fn options(&self, show_hidden: bool) -> PreviewOptions {
        PreviewOptions {
            max_lines: self.max_lines,
            max_bytes: self.max_bytes,
            dir_entries: self.dir_entries,
            show_hidden,
        }
    }
}
