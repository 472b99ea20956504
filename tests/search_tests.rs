use rand::seq::SliceRandom;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use tempfile::tempdir;
use trek_tui::core::{FilterMatcher, SearchOptions, search};

fn token() -> Arc<AtomicBool> {
    Arc::new(AtomicBool::new(false))
}

#[test]
fn test_search_is_breadth_first() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    // the deep directory sorts before the shallow file
    fs::create_dir_all(dir.path().join("a_sub").join("deep"))?;
    fs::write(dir.path().join("a_sub").join("deep").join("b.txt"), "")?;
    fs::write(dir.path().join("z.txt"), "")?;

    let matcher = FilterMatcher::name_contains(".txt");
    let result = search(
        dir.path(),
        |e| matcher.matches(e),
        SearchOptions::default(),
        token(),
    )
    .into_result();

    let names: Vec<_> = result.matches().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["z.txt", "b.txt"]);
    assert!(result.exhausted());
    assert_eq!(result.visited_dirs(), 3);
    Ok(())
}

#[test]
fn test_search_stops_at_result_cap() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let mut names: Vec<String> = (0..500).map(|i| format!("match_{i:03}.log")).collect();
    names.shuffle(&mut rand::rng());
    for name in &names {
        fs::File::create(dir.path().join(name))?;
    }

    let options = SearchOptions {
        max_results: 150,
        dir_capacity: 1000,
        ..SearchOptions::default()
    };
    let matcher = FilterMatcher::name_contains("match");
    let result = search(dir.path(), |e| matcher.matches(e), options, token()).into_result();

    assert_eq!(result.len(), 150);
    assert!(!result.exhausted());
    assert!(!result.cancelled());
    // discovery order follows the sorted listing, not creation order
    assert_eq!(result.matches()[0].name(), "match_000.log");
    Ok(())
}

#[test]
fn test_search_matches_are_case_insensitive() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("Nested"))?;
    fs::File::create(dir.path().join("Nested").join("CRABBY.rs"))?;
    fs::File::create(dir.path().join("other.rs"))?;

    let matcher = FilterMatcher::name_contains("crabby");
    let result = search(
        dir.path(),
        |e| matcher.matches(e),
        SearchOptions::default(),
        token(),
    )
    .into_result();

    assert_eq!(result.len(), 1);
    assert_eq!(
        result.matches()[0].path(),
        dir.path().join("Nested").join("CRABBY.rs")
    );
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_search_survives_symlink_cycle() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let inner = dir.path().join("inner");
    fs::create_dir(&inner)?;
    std::os::unix::fs::symlink(dir.path(), inner.join("loop"))?;

    let result = search(dir.path(), |_| false, SearchOptions::default(), token()).into_result();

    assert!(result.exhausted());
    assert!(result.is_empty());
    assert_eq!(result.visited_dirs(), 2);
    Ok(())
}
