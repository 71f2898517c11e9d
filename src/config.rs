use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Defaults read from rc files, in the same shape as the CLI flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub catalog: Option<PathBuf>,
    pub locale: Option<String>,
    pub prefs: Option<PathBuf>,
    pub no_confirm: bool,
    pub print: bool,
    pub log_file: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: booleans accumulate, options from `other` win.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            catalog: other.catalog.clone().or_else(|| self.catalog.clone()),
            locale: other.locale.clone().or_else(|| self.locale.clone()),
            prefs: other.prefs.clone().or_else(|| self.prefs.clone()),
            no_confirm: self.no_confirm || other.no_confirm,
            print: self.print || other.print,
            log_file: other.log_file.clone().or_else(|| self.log_file.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("prefpane").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("prefpane")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("prefpane").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("prefpane")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".prefpanerc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = vec!["# prefpane defaults (saved with --save)".to_string()];
    if let Some(catalog) = &flags.catalog {
        lines.push(format!("--catalog {}", catalog.display()));
    }
    if let Some(locale) = &flags.locale {
        lines.push(format!("--locale {locale}"));
    }
    if let Some(prefs) = &flags.prefs {
        lines.push(format!("--prefs {}", prefs.display()));
    }
    if flags.no_confirm {
        lines.push("--no-confirm".to_string());
    }
    if flags.print {
        lines.push("--print".to_string());
    }
    if let Some(log_file) = &flags.log_file {
        lines.push(format!("--log-file {}", log_file.display()));
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the flags this module knows out of a token stream, ignoring the rest.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = tokens[i].as_str();
        let next = tokens.get(i + 1);
        match token {
            "--no-confirm" => flags.no_confirm = true,
            "--print" => flags.print = true,
            "--catalog" => {
                if let Some(next) = next {
                    flags.catalog = Some(PathBuf::from(next));
                    i += 1;
                }
            }
            "--locale" => {
                if let Some(next) = next {
                    flags.locale = Some(next.clone());
                    i += 1;
                }
            }
            "--prefs" => {
                if let Some(next) = next {
                    flags.prefs = Some(PathBuf::from(next));
                    i += 1;
                }
            }
            "--log-file" => {
                if let Some(next) = next {
                    flags.log_file = Some(PathBuf::from(next));
                    i += 1;
                }
            }
            _ => {
                if let Some(value) = token.strip_prefix("--catalog=") {
                    flags.catalog = Some(PathBuf::from(value));
                } else if let Some(value) = token.strip_prefix("--locale=") {
                    flags.locale = Some(value.to_string());
                } else if let Some(value) = token.strip_prefix("--prefs=") {
                    flags.prefs = Some(PathBuf::from(value));
                } else if let Some(value) = token.strip_prefix("--log-file=") {
                    flags.log_file = Some(PathBuf::from(value));
                }
            }
        }
        i += 1;
    }
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_flag_tokens_extracts_known_flags() {
        let args: Vec<String> = [
            "prefpane",
            "--no-confirm",
            "--catalog",
            "strings.json",
            "--locale=de-AT",
            "--prefs",
            "prefs.json",
            "--log-file=prefpane.log",
            "screen.json",
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        let flags = parse_flag_tokens(&args);
        assert!(flags.no_confirm);
        assert!(!flags.print);
        assert_eq!(flags.catalog, Some(PathBuf::from("strings.json")));
        assert_eq!(flags.locale.as_deref(), Some("de-AT"));
        assert_eq!(flags.prefs, Some(PathBuf::from("prefs.json")));
        assert_eq!(flags.log_file, Some(PathBuf::from("prefpane.log")));
    }

    #[test]
    fn test_trailing_option_without_value_is_ignored() {
        let args = vec!["--locale".to_string()];
        assert_eq!(parse_flag_tokens(&args), ConfigFlags::default());
    }

    #[test]
    fn test_config_union_merges_cli_over_file_for_options() {
        let file = ConfigFlags {
            print: true,
            locale: Some("en".to_string()),
            catalog: Some(PathBuf::from("file.json")),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_confirm: true,
            locale: Some("de".to_string()),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.print);
        assert!(merged.no_confirm);
        assert_eq!(merged.locale.as_deref(), Some("de"));
        assert_eq!(merged.catalog, Some(PathBuf::from("file.json")));
    }

    #[test]
    fn test_save_load_and_clear_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(".prefpanerc");
        let flags = ConfigFlags {
            catalog: Some(PathBuf::from("strings.json")),
            locale: Some("fr".to_string()),
            prefs: Some(PathBuf::from("prefs.json")),
            no_confirm: true,
            print: true,
            log_file: Some(PathBuf::from("prefpane.log")),
        };

        save_config_flags(&path, &flags).unwrap();
        assert_eq!(load_config_flags(&path).unwrap(), flags);

        clear_config_flags(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(load_config_flags(&path).unwrap(), ConfigFlags::default());
    }
}
