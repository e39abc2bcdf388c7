//! [`PreferenceStore`] backed by a flat TOML table on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use calc_core::{PreferenceError, PreferenceStore};
use tracing::debug;

use crate::settings::write_atomic;

/// Preferences file holding `key = "value"` pairs.
///
/// The file is read once when opened and rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct TomlPreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl TomlPreferenceStore {
    /// Opens the store at `path`. A missing file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            let contents =
                fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
            toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        debug!(path = %path.display(), entries = values.len(), "opened preferences file");
        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        let buf = toml::to_string(&self.values).context("serialize preferences")?;
        write_atomic(&self.path, &buf)
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, PreferenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<(), PreferenceError> {
        let previous = self.values.insert(key.to_string(), value.to_string());
        self.flush().map_err(|error| {
            match previous {
                Some(old) => self.values.insert(key.to_string(), old),
                None => self.values.remove(key),
            };
            PreferenceError::Write {
                key: key.to_string(),
                message: format!("{error:#}"),
            }
        })
    }
}
