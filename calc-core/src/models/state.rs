//! The single state record owned by a calculator session.
//!
//! Transitions live in [`crate::engine`]; this module only holds the data
//! and its read-only accessors.

use crate::engine::{BinaryOp, Sentinel};
use crate::models::{AngleMode, DisplayMode, EngineConfig, History, Variable, Variables};

/// A binary operation waiting for its right-hand operand.
///
/// The left operand and operator are stored together so that one is never
/// set without the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingOperation {
    pub lhs: f64,
    pub op: BinaryOp,
}

/// Snapshot of everything the display layer needs to render a calculator.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    pub(crate) display: String,
    pub(crate) expression: String,
    pub(crate) pending: Option<PendingOperation>,
    pub(crate) waiting_for_new_value: bool,
    pub(crate) history: History,
    pub(crate) memory: f64,
    pub(crate) variables: Variables,
    pub(crate) current_variable: Option<Variable>,
    pub(crate) angle_mode: AngleMode,
    pub(crate) display_mode: DisplayMode,
    pub(crate) display_precision: u8,
}

impl CalculatorState {
    /// Creates the session-start state for `config`.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            display: "0".to_string(),
            expression: String::new(),
            pending: None,
            waiting_for_new_value: false,
            history: History::with_limit(config.history_limit),
            memory: 0.0,
            variables: Variables::default(),
            current_variable: None,
            angle_mode: config.angle_mode,
            display_mode: config.display_mode,
            display_precision: config.display_precision,
        }
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn pending(&self) -> Option<PendingOperation> {
        self.pending
    }

    /// Left operand of the pending operation.
    pub fn previous_value(&self) -> Option<f64> {
        self.pending.map(|p| p.lhs)
    }

    pub fn operation(&self) -> Option<BinaryOp> {
        self.pending.map(|p| p.op)
    }

    /// True when the next digit starts a new number instead of appending.
    pub fn is_waiting_for_new_value(&self) -> bool {
        self.waiting_for_new_value
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn memory(&self) -> f64 {
        self.memory
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variable(
        &self,
        variable: Variable,
    ) -> f64 {
        self.variables.get(variable)
    }

    /// Variable armed for a store by a previous recall.
    pub fn current_variable(&self) -> Option<Variable> {
        self.current_variable
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn display_precision(&self) -> u8 {
        self.display_precision
    }

    /// The sentinel currently shown, if any.
    pub fn sentinel(&self) -> Option<Sentinel> {
        Sentinel::parse(&self.display)
    }

    pub fn is_error(&self) -> bool {
        self.sentinel().is_some()
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn new_state_shows_zero_with_nothing_pending() {
        let state = CalculatorState::default();

        assert_eq!(state.display(), "0");
        assert_eq!(state.expression(), "");
        assert_eq!(state.previous_value(), None);
        assert_eq!(state.operation(), None);
        assert!(!state.is_waiting_for_new_value());
        assert!(state.history().is_empty());
        assert_eq!(state.memory(), 0.0);
        assert_eq!(state.current_variable(), None);
        assert!(!state.is_error());
    }

    #[test]
    fn new_state_takes_modes_from_config() {
        let config = EngineConfig {
            history_limit: 5,
            angle_mode: AngleMode::Rad,
            display_mode: DisplayMode::Eng,
            display_precision: 3,
        };

        let state = CalculatorState::new(&config);

        assert_eq!(state.history().limit(), 5);
        assert_eq!(state.angle_mode(), AngleMode::Rad);
        assert_eq!(state.display_mode(), DisplayMode::Eng);
        assert_eq!(state.display_precision(), 3);
    }

    #[test]
    fn pending_accessors_expose_both_halves() {
        let mut state = CalculatorState::default();
        state.pending = Some(PendingOperation {
            lhs: 3.0,
            op: BinaryOp::Multiply,
        });

        assert_eq!(state.previous_value(), Some(3.0));
        assert_eq!(state.operation(), Some(BinaryOp::Multiply));
    }

    #[test]
    fn sentinel_display_is_reported_as_error() {
        let mut state = CalculatorState::default();
        state.display = "-Infinity".to_string();

        assert_eq!(state.sentinel(), Some(Sentinel::NegativeInfinity));
        assert!(state.is_error());
    }
}
