//! Prefpane - edit a settings screen in the terminal.
//!
//! # Usage
//!
//! ```bash
//! prefpane
//! prefpane settings.json --catalog strings.json --locale de
//! prefpane settings.json --prefs current.json --print > updated.json
//! ```

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use prefpane::app::App;
use prefpane::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};
use prefpane::prefs::MemoryPreferences;
use prefpane::screen::Screen;
use prefpane::text::{Catalog, NoResources, ResourceProvider};

const DEMO_SCREEN: &str = include_str!("../demos/screen.json");
const DEMO_CATALOG: &str = include_str!("../demos/catalog.json");

/// Edit a settings screen in the terminal
#[derive(Parser, Debug)]
#[command(name = "prefpane", version, about, long_about = None)]
struct Cli {
    /// Screen definition to edit (a built-in demo screen when omitted)
    #[arg(value_name = "SCREEN")]
    screen: Option<PathBuf>,

    /// String catalog used to resolve `@key` text
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Catalog locale (defaults to LC_ALL / LANG)
    #[arg(long, value_name = "TAG")]
    locale: Option<String>,

    /// Preference file loaded at start and re-read with `r`
    #[arg(long, value_name = "PATH")]
    prefs: Option<PathBuf>,

    /// Edit items flagged `confirm` without asking
    #[arg(long)]
    no_confirm: bool,

    /// Print the final values as JSON on exit
    #[arg(long)]
    print: bool,

    /// Write logs to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

impl Cli {
    fn flags(&self) -> ConfigFlags {
        ConfigFlags {
            catalog: self.catalog.clone(),
            locale: self.locale.clone(),
            prefs: self.prefs.clone(),
            no_confirm: self.no_confirm,
            print: self.print,
            log_file: self.log_file.clone(),
        }
    }
}

/// Log to `log_file` at INFO when given; otherwise only warnings reach
/// stderr. `RUST_LOG` overrides the file default.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(Level::WARN.into()))
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

/// Locale from the environment, `de_DE.UTF-8` becoming `de-DE`.
fn locale_from_env() -> String {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|value| !value.is_empty() && value != "C" && value != "POSIX")
        .and_then(|value| value.split('.').next().map(|tag| tag.replace('_', "-")))
        .unwrap_or_else(|| "en".to_string())
}

fn load_screen(path: Option<&Path>, flags: &ConfigFlags) -> Result<Screen> {
    let locale = flags.locale.clone().unwrap_or_else(locale_from_env);
    let resources: Box<dyn ResourceProvider> = match (&flags.catalog, path) {
        (Some(catalog), _) => Box::new(
            Catalog::load(catalog, &locale)
                .with_context(|| format!("Failed to load catalog {}", catalog.display()))?,
        ),
        (None, None) => Box::new(Catalog::from_json(DEMO_CATALOG, &locale)?),
        (None, Some(_)) => Box::new(NoResources),
    };

    match path {
        Some(path) => Screen::load(path, resources)
            .with_context(|| format!("Failed to load screen {}", path.display())),
        None => Ok(Screen::from_json(DEMO_SCREEN, resources)?),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = cli.flags();

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.log_file.as_deref())?;

    if let Some(path) = &cli.screen
        && !path.exists()
    {
        anyhow::bail!("Screen not found: {}", path.display());
    }
    let screen = load_screen(cli.screen.as_deref(), &effective)?;

    let app = App::new(screen)
        .with_confirm(!effective.no_confirm)
        .with_prefs_path(effective.prefs.clone())
        .with_config_paths(
            Some(global_path),
            local_path.exists().then_some(local_path),
        );

    let screen = app.run().context("Application error")?;

    if effective.print {
        let values = MemoryPreferences::capture(&screen.list);
        println!("{}", serde_json::to_string_pretty(&values)?);
    }
    Ok(())
}
