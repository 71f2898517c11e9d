use std::path::Path;

use prefpane::prelude::*;
use prefpane::Error;
use prefpane::text::NoResources;

const CATALOG: &str = r#"{
  "default": "en",
  "locales": {
    "en": {
      "strings": { "title": "Settings", "theme": "Theme", "mode": "Mode" },
      "arrays": { "themes": ["Light", "Dark"], "theme_values": ["light", "dark"] }
    },
    "de": {
      "strings": { "theme": "Design" },
      "arrays": { "themes": ["Hell", "Dunkel"] }
    }
  }
}"#;

const SCREEN: &str = r#"{
  "title": "@title",
  "items": [
    { "kind": "section", "title": "@mode" },
    { "kind": "toggle", "key": "sync", "title": "Sync", "value": true },
    { "kind": "input", "key": "name", "title": "Name", "value": "pi" },
    { "kind": "selector", "key": "theme", "title": "@theme", "entries": "@themes", "entry_values": "@theme_values" }
  ]
}"#;

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_screen_loads_with_catalog_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::load(&write(dir.path(), "catalog.json", CATALOG), "en").unwrap();
    let screen = Screen::load(&write(dir.path(), "screen.json", SCREEN), catalog).unwrap();

    assert_eq!(screen.resolve_title(), "Settings");
    assert_eq!(screen.list.len(), 4);
    let theme = screen.list.get(3).unwrap();
    assert_eq!(theme.resolve_title(screen.list.resources()), "Theme");
    assert_eq!(
        theme.value_label(screen.list.resources()).as_deref(),
        Some("Light")
    );
}

#[test]
fn test_regional_locale_falls_back_to_language_then_default() {
    let catalog = Catalog::from_json(CATALOG, "de-AT").unwrap();
    assert_eq!(catalog.locale(), "de");
    assert_eq!(catalog.string("theme").as_deref(), Some("Design"));
    // Missing from "de", found in the default locale.
    assert_eq!(catalog.string("mode").as_deref(), Some("Mode"));
    assert_eq!(
        catalog.string_array("theme_values"),
        Some(vec!["light".to_string(), "dark".to_string()])
    );

    let unknown = Catalog::from_json(CATALOG, "ja").unwrap();
    assert_eq!(unknown.locale(), "en");
}

#[test]
fn test_missing_files_report_their_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    for err in [
        Screen::load(&missing, NoResources).err(),
        Catalog::load(&missing, "en").err(),
        MemoryPreferences::load(&missing).err(),
    ] {
        match err {
            Some(Error::Io { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}

#[test]
fn test_malformed_screen_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "screen.json", r#"{"items": [{"kind": "dial"}]}"#);
    assert!(matches!(
        Screen::load(&path, NoResources),
        Err(Error::Json(_))
    ));
}

#[test]
fn test_prefs_file_refreshes_screen_and_captures_back() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = Catalog::from_json(CATALOG, "en").unwrap();
    let mut screen = Screen::from_json(SCREEN, catalog).unwrap();
    let prefs_path = write(
        dir.path(),
        "prefs.json",
        r#"{"sync": false, "name": "kitchen", "theme": "dark", "unknown": 1}"#,
    );

    let prefs = MemoryPreferences::load(&prefs_path).unwrap();
    assert_eq!(screen.list.refresh(&prefs), 3);
    assert_eq!(screen.list.get(1).unwrap().value(), Some(ItemValue::Bool(false)));
    assert_eq!(
        screen.list.get(2).unwrap().value(),
        Some(ItemValue::Text("kitchen".to_string()))
    );
    assert_eq!(screen.list.get(3).unwrap().value(), Some(ItemValue::Index(1)));

    let captured = MemoryPreferences::capture(&screen.list);
    assert_eq!(captured.get("theme"), Some(ItemValue::Text("dark".to_string())));
    assert_eq!(captured.get("unknown"), None);
    assert_eq!(screen.list.refresh(&captured), 0);
}
