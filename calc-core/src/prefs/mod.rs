//! Display preferences that outlive a session.
//!
//! Only the colour theme is persisted. Storage is behind [`PreferenceStore`]
//! so the engine never touches the filesystem itself; front ends inject a
//! concrete store and tests use [`MemoryPreferenceStore`].

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

/// Key under which the theme is stored.
pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreferenceError {
    #[error("failed to read preference '{key}': {message}")]
    Read { key: String, message: String },

    #[error("failed to write preference '{key}': {message}")]
    Write { key: String, message: String },
}

/// String key/value storage for preferences.
pub trait PreferenceStore {
    /// Returns the stored value, or `None` if the key was never set.
    fn get(
        &self,
        key: &str,
    ) -> Result<Option<String>, PreferenceError>;

    fn set(
        &mut self,
        key: &str,
        value: &str,
    ) -> Result<(), PreferenceError>;
}

/// Volatile store used by default and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn with_value(
        mut self,
        key: &str,
        value: &str,
    ) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn value(
        &self,
        key: &str,
    ) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
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
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The loaded theme plus the store it is written back to.
///
/// Store failures never reach the caller: a failed read falls back to the
/// default theme and a failed write keeps the in-memory theme, both logged.
pub struct Preferences {
    theme: Theme,
    store: Box<dyn PreferenceStore>,
}

impl Preferences {
    /// Reads the theme from `store`, defaulting to [`Theme::Dark`].
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let theme = match store.get(THEME_KEY) {
            Ok(Some(value)) => Theme::parse(&value).unwrap_or_else(|| {
                warn!(value = %value, "unrecognised stored theme, using default");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(error) => {
                warn!(%error, "could not read theme preference, using default");
                Theme::default()
            }
        };
        debug!(%theme, "loaded preferences");
        Self { theme, store }
    }

    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryPreferenceStore::default()))
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    pub fn set_theme(
        &mut self,
        theme: Theme,
    ) {
        self.theme = theme;
        if let Err(error) = self.store.set(THEME_KEY, theme.as_str()) {
            warn!(%error, %theme, "theme not persisted");
        }
    }

    /// Flips between dark and light and returns the new theme.
    pub fn toggle_theme(&mut self) -> Theme {
        self.set_theme(self.theme.toggled());
        self.theme
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl fmt::Debug for Preferences {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("Preferences")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Store whose every call fails.
    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(
            &self,
            key: &str,
        ) -> Result<Option<String>, PreferenceError> {
            Err(PreferenceError::Read {
                key: key.to_string(),
                message: "unavailable".to_string(),
            })
        }

        fn set(
            &mut self,
            key: &str,
            _value: &str,
        ) -> Result<(), PreferenceError> {
            Err(PreferenceError::Write {
                key: key.to_string(),
                message: "read-only".to_string(),
            })
        }
    }

    #[test]
    fn default_theme_is_dark() {
        assert_eq!(Preferences::in_memory().theme(), Theme::Dark);
    }

    #[test]
    fn load_reads_stored_theme() {
        let store = MemoryPreferenceStore::default().with_value(THEME_KEY, "light");

        assert_eq!(Preferences::load(Box::new(store)).theme(), Theme::Light);
    }

    #[test]
    fn load_ignores_unknown_value() {
        let store = MemoryPreferenceStore::default().with_value(THEME_KEY, "solarized");

        assert_eq!(Preferences::load(Box::new(store)).theme(), Theme::Dark);
    }

    #[test]
    fn toggle_writes_through() {
        let mut prefs = Preferences::in_memory();

        assert_eq!(prefs.toggle_theme(), Theme::Light);
        assert_eq!(
            prefs.store().get(THEME_KEY),
            Ok(Some("light".to_string()))
        );

        assert_eq!(prefs.toggle_theme(), Theme::Dark);
        assert_eq!(prefs.store().get(THEME_KEY), Ok(Some("dark".to_string())));
    }

    #[test]
    fn broken_store_falls_back_and_keeps_in_memory_theme() {
        let mut prefs = Preferences::load(Box::new(BrokenStore));
        assert_eq!(prefs.theme(), Theme::Dark);

        prefs.set_theme(Theme::Light);

        assert_eq!(prefs.theme(), Theme::Light);
    }

    #[test]
    fn theme_parse_round_trips() {
        for theme in [Theme::Dark, Theme::Light] {
            assert_eq!(Theme::parse(theme.as_str()), Some(theme));
            assert_eq!(theme.toggled().toggled(), theme);
        }
        assert_eq!(Theme::parse("Dark"), None);
    }

    #[test]
    fn error_messages_name_key() {
        let error = PreferenceError::Write {
            key: THEME_KEY.to_string(),
            message: "disk full".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "failed to write preference 'theme': disk full"
        );
    }
}
