use std::path::PathBuf;

use prefpane::config::{
    ConfigFlags, clear_config_flags, load_config_flags, parse_flag_tokens, save_config_flags,
};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".prefpanerc");
    let content = r"
# comment
--no-confirm

--locale de
   
--log-file=prefpane.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.no_confirm);
    assert_eq!(flags.locale.as_deref(), Some("de"));
    assert_eq!(flags.log_file, Some(PathBuf::from("prefpane.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".prefpanerc");
    std::fs::write(&path, "--no-confirm\n--locale de\n--catalog strings.json\n").unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "prefpane".to_string(),
        "--locale".to_string(),
        "fr".to_string(),
        "--print".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_confirm, "file flags should remain enabled");
    assert!(effective.print, "cli flags should be applied");
    assert_eq!(effective.locale.as_deref(), Some("fr"), "cli should override locale");
    assert_eq!(
        effective.catalog,
        Some(PathBuf::from("strings.json")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}

#[test]
fn test_saved_flags_load_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefpane").join("config");
    let flags = ConfigFlags {
        catalog: Some(PathBuf::from("strings.json")),
        prefs: Some(PathBuf::from("current.json")),
        no_confirm: true,
        ..ConfigFlags::default()
    };

    save_config_flags(&path, &flags).unwrap();
    assert_eq!(load_config_flags(&path).unwrap(), flags);

    clear_config_flags(&path).unwrap();
    assert!(!path.exists());
    clear_config_flags(&path).unwrap();
}
