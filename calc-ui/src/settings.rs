//! Front-end settings stored in a TOML file (default `calc.toml`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calc_core::{AngleMode, EngineConfig};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SETTINGS_FILE: &str = "calc.toml";

/// Everything the `calc` binary reads at startup.
///
/// Missing fields fall back to defaults, so an empty file is valid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CalcSettings {
    /// Default tracing filter when `RUST_LOG` is not set.
    pub log_level: String,

    /// Where the theme preference is persisted. `None` keeps it in memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences_path: Option<PathBuf>,

    pub engine: EngineConfig,
}

impl Default for CalcSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            preferences_path: None,
            engine: EngineConfig::default(),
        }
    }
}

impl CalcSettings {
    pub fn validate(&self) -> Result<()> {
        self.engine.validate().context("invalid [engine] settings")?;
        if self.log_level.trim().is_empty() {
            anyhow::bail!("log_level must not be empty");
        }
        Ok(())
    }
}

/// Command-line values that take precedence over the settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub history_limit: Option<usize>,
    pub angle_mode: Option<AngleMode>,
    pub display_precision: Option<u8>,
    pub preferences_path: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl SettingsOverrides {
    /// Replaces every field of `settings` that has an override.
    pub fn apply(
        self,
        settings: &mut CalcSettings,
    ) {
        if let Some(limit) = self.history_limit {
            settings.engine.history_limit = limit;
        }
        if let Some(angle) = self.angle_mode {
            settings.engine.angle_mode = angle;
        }
        if let Some(precision) = self.display_precision {
            settings.engine.display_precision = precision;
        }
        if let Some(path) = self.preferences_path {
            settings.preferences_path = Some(path);
        }
        if let Some(level) = self.log_level {
            settings.log_level = level;
        }
    }
}

/// Load settings from a TOML file.
///
/// If the file is missing, returns `CalcSettings::default()`.
pub fn load_settings(path: &Path) -> Result<CalcSettings> {
    if !path.exists() {
        return Ok(CalcSettings::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let settings: CalcSettings =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    settings.validate()?;
    Ok(settings)
}

/// Atomically write settings to disk (temp file + rename).
pub fn write_settings(
    path: &Path,
    settings: &CalcSettings,
) -> Result<()> {
    settings.validate()?;
    let mut buf = toml::to_string_pretty(settings).context("serialize settings toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

pub(crate) fn write_atomic(
    path: &Path,
    contents: &str,
) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("path missing parent {}", path.display()))?;
    if !parent.as_os_str().is_empty() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}
