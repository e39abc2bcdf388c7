use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};

use calc_core::{AngleMode, Calculator, Preferences};
use calc_ui::prefs_file::TomlPreferenceStore;
use calc_ui::settings::{self, DEFAULT_SETTINGS_FILE, SettingsOverrides};
use calc_ui::{logging, repl};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Interactive scientific calculator.
///
/// Reads commands from stdin (type `help` for a list) and prints the display
/// after every line. Settings come from a TOML file and can be overridden
/// with the flags below.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Settings file. A missing file means defaults.
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    config: PathBuf,

    /// Maximum number of history entries kept.
    #[arg(long)]
    history_limit: Option<usize>,

    /// Angle mode for trigonometric functions (`deg` or `rad`).
    #[arg(long, value_parser = parse_angle)]
    angle: Option<AngleMode>,

    /// Digits shown by the result formatter.
    #[arg(long)]
    precision: Option<u8>,

    /// Preferences file for the persisted theme.
    #[arg(long)]
    prefs: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset (e.g. `warn`, `calc_core=debug`).
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Write the resolved settings back to the settings file and exit.
    #[arg(long)]
    write_config: bool,
}

impl Cli {
    fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            history_limit: self.history_limit,
            angle_mode: self.angle,
            display_precision: self.precision,
            preferences_path: self.prefs.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

fn parse_angle(value: &str) -> Result<AngleMode, String> {
    AngleMode::parse(&value.to_ascii_lowercase())
        .ok_or_else(|| format!("expected 'deg' or 'rad', got '{value}'"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = settings::load_settings(&cli.config)
        .with_context(|| format!("Failed to load settings: {}", cli.config.display()))?;
    cli.overrides().apply(&mut settings);

    if cli.write_config {
        settings::write_settings(&cli.config, &settings)
            .with_context(|| format!("Failed to write settings: {}", cli.config.display()))?;
        println!("wrote {}", cli.config.display());
        return Ok(());
    }

    logging::init_logging(&settings.log_level, cli.log_file.as_deref())
        .context("Failed to initialise logging")?;
    debug!(?settings, "resolved settings");

    let preferences = match &settings.preferences_path {
        Some(path) => {
            let store = TomlPreferenceStore::open(path)
                .with_context(|| format!("Failed to open preferences: {}", path.display()))?;
            Preferences::load(Box::new(store))
        }
        None => Preferences::in_memory(),
    };

    let mut calc =
        Calculator::new(settings.engine, preferences).context("Invalid engine settings")?;
    info!(theme = %calc.theme(), "calculator ready");

    let stdin = io::stdin();
    let prompt = stdin.is_terminal().then_some("calc> ");
    repl::run(&mut calc, stdin.lock(), io::stdout().lock(), prompt)
}
