//! The calculation engine: actions, transitions and the session wrapper.
//!
//! [`Calculator`] owns one [`CalculatorState`] per session, applies actions to
//! it one at a time and notifies subscribed observers with the new snapshot.
//!
//! # Example
//!
//! ```
//! use calc_core::{Action, BinaryOp, Calculator};
//!
//! let mut calc = Calculator::default();
//! calc.dispatch(Action::Digit(2));
//! calc.dispatch(Action::Operator(BinaryOp::Add));
//! calc.dispatch(Action::Digit(2));
//! let state = calc.dispatch(Action::Equals);
//!
//! assert_eq!(state.display(), "4");
//! assert_eq!(state.history().latest(), Some("2 + 2 = 4"));
//! ```

mod action;
mod format;
mod numeric;
mod scientific;
mod transitions;

pub use action::{Action, BinaryOp, Bracket, MemoryOp, ScientificFn};
pub use format::format_operand;
pub use numeric::{
    CalcError, ParseOperandError, Sentinel, apply, check_result, format_plain, parse_operand,
};

use tracing::debug;

use crate::models::{CalculatorState, ConfigError, EngineConfig};
use crate::prefs::{Preferences, Theme};

/// Receives a snapshot after every dispatched action.
pub trait StateObserver {
    fn state_changed(
        &mut self,
        state: &CalculatorState,
    );
}

impl<F> StateObserver for F
where
    F: FnMut(&CalculatorState),
{
    fn state_changed(
        &mut self,
        state: &CalculatorState,
    ) {
        self(state);
    }
}

/// One calculator session.
pub struct Calculator {
    state: CalculatorState,
    config: EngineConfig,
    preferences: Preferences,
    observers: Vec<Box<dyn StateObserver>>,
}

impl Calculator {
    /// Creates a session from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(
        config: EngineConfig,
        preferences: Preferences,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: CalculatorState::new(&config),
            config,
            preferences,
            observers: Vec::new(),
        })
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn subscribe(
        &mut self,
        observer: impl StateObserver + 'static,
    ) {
        self.observers.push(Box::new(observer));
    }

    /// Applies `action` and notifies observers.
    pub fn dispatch(
        &mut self,
        action: Action,
    ) -> &CalculatorState {
        debug!(?action, "dispatching action");
        self.state.apply(action);
        for observer in &mut self.observers {
            observer.state_changed(&self.state);
        }
        &self.state
    }

    /// Dispatches the action bound to a keyboard key, if any.
    pub fn press_key(
        &mut self,
        key: &str,
    ) -> Option<&CalculatorState> {
        let action = Action::from_key(key)?;
        Some(self.dispatch(action))
    }

    /// Discards the session state and starts over from the configuration.
    pub fn reset(&mut self) {
        self.state = CalculatorState::new(&self.config);
        for observer in &mut self.observers {
            observer.state_changed(&self.state);
        }
    }

    pub fn theme(&self) -> Theme {
        self.preferences.theme()
    }

    pub fn set_theme(
        &mut self,
        theme: Theme,
    ) {
        self.preferences.set_theme(theme);
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.preferences.toggle_theme()
    }
}

impl Default for Calculator {
    fn default() -> Self {
        let config = EngineConfig::default();
        Self {
            state: CalculatorState::new(&config),
            config,
            preferences: Preferences::in_memory(),
            observers: Vec::new(),
        }
    }
}
