//! Helpers for trek.
//!
//! Small utilities used throughout trek:
//! - Looking up the home directory and displaying it as "~" in paths
//! - Expanding a leading "~" in user supplied paths
//! - Clamping config values into safe ranges

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// The user's home directory, if it can be determined.
pub fn get_home() -> Option<PathBuf> {
    dirs::home_dir()
}

/// Util function to shorten home directory to ~.
/// Is used by the path header in the ui render function.
pub fn shorten_home_path<P: AsRef<Path>>(path: P) -> String {
    shorten_with_home(path.as_ref(), get_home().as_deref())
}

fn shorten_with_home(path: &Path, home: Option<&Path>) -> String {
    if let Some(home_dir) = home
        && let Ok(stripped) = path.strip_prefix(home_dir)
    {
        if stripped.as_os_str().is_empty() {
            return "~".to_string();
        }
        let mut short = stripped.display().to_string();
        if short.starts_with(MAIN_SEPARATOR) {
            short.remove(0);
        }
        return format!("~{}{}", MAIN_SEPARATOR, short);
    }
    path.display().to_string()
}

/// Expands a leading "~" to the home directory.
pub fn expand_home_path(input: &str) -> PathBuf {
    if input == "~" {
        if let Some(home) = get_home() {
            return home;
        }
    } else if let Some(rest) = input.strip_prefix("~/")
        && let Some(home) = get_home()
    {
        return home.join(rest);
    }
    PathBuf::from(input)
}

/// Clamps a config value into `min..=max`, warning when it had to be changed.
pub fn clamp_setting(name: &str, value: usize, min: usize, max: usize) -> usize {
    let clamped = value.clamp(min, max);
    if clamped != value {
        log::warn!(
            "{}={} out of range ({}..={}), clamped to {}",
            name,
            value,
            min,
            max,
            clamped
        );
    }
    clamped
}

/// Helper utils tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorten_replaces_home_prefix() {
        let home = Path::new("/home/crab");
        assert_eq!(shorten_with_home(Path::new("/home/crab"), Some(home)), "~");
        assert_eq!(
            shorten_with_home(Path::new("/home/crab/src/trek"), Some(home)),
            format!("~{0}src{0}trek", MAIN_SEPARATOR)
        );
        assert_eq!(
            shorten_with_home(Path::new("/home/crabby"), Some(home)),
            "/home/crabby"
        );
        assert_eq!(shorten_with_home(Path::new("/tmp"), None), "/tmp");
    }

    #[test]
    fn expand_only_touches_leading_tilde() {
        assert_eq!(expand_home_path("/tmp/~x"), PathBuf::from("/tmp/~x"));
        assert_eq!(expand_home_path("relative"), PathBuf::from("relative"));
        if let Some(home) = get_home() {
            assert_eq!(expand_home_path("~"), home);
            assert_eq!(expand_home_path("~/docs"), home.join("docs"));
        }
    }

    #[test]
    fn clamp_setting_limits_range() {
        assert_eq!(clamp_setting("x", 5, 1, 10), 5);
        assert_eq!(clamp_setting("x", 0, 1, 10), 1);
        assert_eq!(clamp_setting("x", 50, 1, 10), 10);
    }
}
