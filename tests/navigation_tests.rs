//! Navigation tests for trek
//!
//! These tests drive the controller the way the UI does and check that failed moves leave
//! the state untouched, and that history and hidden-file toggling round-trip.
//!
//! Temporary directories are cleaned up automatically after each test.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tempfile::tempdir;
use trek_tui::app::{Action, AppState, Mode};
use trek_tui::config::Config;
use trek_tui::core::{CoreError, DirReader, Entry, NavHistory};

fn press(app: &mut AppState, code: KeyCode) {
    app.handle_keypress(KeyEvent::new(code, KeyModifiers::NONE));
}

fn names(app: &AppState) -> Vec<String> {
    app.visible_entries()
        .iter()
        .map(|e| e.name().to_string())
        .collect()
}

#[test]
fn test_listing_is_sorted_dirs_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["beta.txt", "Alpha.txt", ".hidden"] {
        fs::File::create(dir.path().join(name))?;
    }
    fs::create_dir(dir.path().join("zeta"))?;

    let listing = DirReader::new(false, 300).read(dir.path());
    let names: Vec<_> = listing.entries().iter().map(Entry::name).collect();
    assert_eq!(names, vec!["zeta", "Alpha.txt", "beta.txt"]);
    assert!(!listing.truncated());

    let all = DirReader::new(true, 300).read(dir.path());
    assert_eq!(all.len(), 4);
    Ok(())
}

#[test]
fn test_failed_enter_leaves_state_unchanged() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let locked = dir.path().join("locked");
    fs::create_dir(&locked)?;
    fs::File::create(dir.path().join("file.txt"))?;

    let config = Config::default();
    let mut app = AppState::from_dir(&config, dir.path())?;
    let before = names(&app);

    // the directory disappears between listing and entering
    fs::remove_dir(&locked)?;
    let err = app.apply(Action::Enter).err();
    assert_eq!(err, Some(CoreError::NotFound(locked)));

    assert_eq!(app.nav().current_dir(), dir.path());
    assert_eq!(names(&app), before);
    assert_eq!(app.nav().selected_idx(), 0);
    assert!(app.nav().history().back_stack().is_empty());
    Ok(())
}

#[test]
fn test_toggle_hidden_twice_restores_listing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in [".env", "main.rs", "lib.rs"] {
        fs::File::create(dir.path().join(name))?;
    }

    let config = Config::default();
    let mut app = AppState::from_dir(&config, dir.path())?;
    let before = names(&app);

    app.apply(Action::ToggleHidden)?;
    assert!(names(&app).contains(&".env".to_string()));
    app.apply(Action::ToggleHidden)?;
    assert_eq!(names(&app), before);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_back_at_root_is_boundary() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    let mut app = AppState::from_dir(&config, Path::new("/"))?;
    let before = names(&app);

    let err = app.apply(Action::Back).err();
    assert!(matches!(err, Some(CoreError::BoundaryCondition(_))));
    assert_eq!(app.nav().current_dir(), Path::new("/"));
    assert_eq!(names(&app), before);
    assert!(app.nav().history().forward_stack().is_empty());
    Ok(())
}

#[test]
fn test_history_roundtrip_through_controller() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let a = dir.path().join("a");
    let b = a.join("b");
    fs::create_dir_all(&b)?;

    let config = Config::default();
    let mut app = AppState::from_dir(&config, dir.path())?;
    app.apply(Action::Enter)?;
    app.apply(Action::Enter)?;
    assert_eq!(app.nav().current_dir(), b);

    app.apply(Action::Back)?;
    assert_eq!(app.nav().current_dir(), a);
    assert_eq!(app.nav().history().forward_stack(), &[b.clone()]);

    app.apply(Action::Forward)?;
    assert_eq!(app.nav().current_dir(), b);
    assert!(app.nav().history().forward_stack().is_empty());
    Ok(())
}

#[test]
fn test_history_stacks() -> Result<(), Box<dyn std::error::Error>> {
    let mut history = NavHistory::new(PathBuf::from("/start"));
    history.push(PathBuf::from("/a"));
    history.push(PathBuf::from("/b"));

    history.back()?;
    assert_eq!(history.current(), Path::new("/a"));
    assert_eq!(history.forward_stack(), &[PathBuf::from("/b")]);

    history.forward()?;
    assert_eq!(history.current(), Path::new("/b"));
    assert!(history.forward_stack().is_empty());
    Ok(())
}

#[test]
fn test_search_mode_cancel_returns_to_listing() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::File::create(dir.path().join("one.txt"))?;

    let config = Config::default();
    let mut app = AppState::from_dir(&config, dir.path())?;
    app.apply(Action::StartSearch)?;
    assert_eq!(app.mode(), Mode::Searching);
    assert!(app.visible_entries().is_empty());

    app.apply(Action::Cancel)?;
    assert_eq!(app.mode(), Mode::Browsing);
    assert_eq!(names(&app), vec!["one.txt"]);
    Ok(())
}

#[test]
fn test_relative_start_path_reaches_parent() -> Result<(), Box<dyn std::error::Error>> {
    let cwd = fs::canonicalize(std::env::current_dir()?)?;
    let parent = cwd.parent().ok_or("working directory has no parent")?;

    let config = Config::default();
    let mut app = AppState::from_dir(&config, Path::new("."))?;
    assert_eq!(app.nav().current_dir(), cwd);
    assert!(app.visible_entries().iter().all(|e| e.path().is_absolute()));

    app.apply(Action::Back)?;
    assert_eq!(app.nav().current_dir(), parent);
    assert_eq!(app.nav().history().forward_stack(), &[cwd.clone()]);
    Ok(())
}

#[test]
fn test_queued_search_result_is_dropped_after_cancel() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("src"))?;
    fs::File::create(dir.path().join("src").join("crab.rs"))?;

    let config = Config::from_toml(
        r#"
        [general]
        search_debounce_ms = 0
        "#,
    )?;
    let mut app = AppState::from_dir(&config, dir.path())?;

    press(&mut app, KeyCode::Char('/'));
    for c in "crab".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    thread::sleep(Duration::from_millis(5));
    app.tick();

    // the finished search sits in the response queue while the prompt is reopened
    thread::sleep(Duration::from_millis(300));
    press(&mut app, KeyCode::Esc);
    press(&mut app, KeyCode::Char('/'));
    app.tick();

    assert_eq!(app.mode(), Mode::Searching);
    assert!(app.visible_entries().is_empty());
    assert!(app.notice().is_none());
    Ok(())
}
