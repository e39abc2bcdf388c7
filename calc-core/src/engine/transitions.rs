//! State transitions, one per [`Action`].
//!
//! Every transition runs to completion and never fails. Calculation errors
//! are absorbed here and shown as a sentinel on the display; while a
//! sentinel is shown only digit/decimal entry, clear, backspace and history
//! recall change the numeric state.

use tracing::{debug, info, warn};

use crate::models::{AngleMode, CalculatorState, DisplayMode, MAX_PRECISION, PendingOperation, Variable};

use super::action::{Action, BinaryOp, Bracket, MemoryOp, ScientificFn};
use super::format::format_operand;
use super::numeric::{CalcError, apply, check_result, format_plain, parse_operand};
use super::scientific;

impl CalculatorState {
    /// Applies one action in place.
    pub fn apply(
        &mut self,
        action: Action,
    ) {
        match action {
            Action::Digit(digit) => self.append_digit(digit),
            Action::Decimal => self.append_decimal(),
            Action::Operator(op) => self.choose_operator(op),
            Action::Equals => self.equals(),
            Action::Clear => self.clear(),
            Action::Backspace => self.backspace(),
            Action::Scientific(func) => self.apply_function(func),
            Action::Memory(op) => self.memory_op(op),
            Action::Variable(variable) => self.toggle_variable(variable),
            Action::StoreVariable(variable) => self.store_variable(variable),
            Action::Bracket(bracket) => self.insert_bracket(bracket),
            Action::ToggleSign => self.toggle_sign(),
            Action::Percentage => self.percentage(),
            Action::SetAngleMode(mode) => self.set_angle_mode(mode),
            Action::SetDisplayMode(mode) => self.set_display_mode(mode),
            Action::SetPrecision(precision) => self.set_precision(precision),
            Action::RecallHistory(index) => self.recall_history(index),
            Action::ClearHistory => self.history.clear(),
        }
    }

    /// Returns the state that results from applying `action` to a copy.
    pub fn reduce(
        &self,
        action: Action,
    ) -> Self {
        let mut next = self.clone();
        next.apply(action);
        next
    }

    // =========================================================================
    // Input accumulation
    // =========================================================================

    pub fn append_digit(
        &mut self,
        digit: u8,
    ) {
        if digit > 9 {
            warn!(digit, "ignoring out-of-range digit");
            return;
        }
        let digit = char::from(b'0' + digit);

        self.recover_from_sentinel();
        self.current_variable = None;

        if self.waiting_for_new_value {
            self.display = digit.to_string();
            self.waiting_for_new_value = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else if self.display == "-0" {
            self.display = format!("-{digit}");
        } else {
            self.display.push(digit);
        }
    }

    pub fn append_decimal(&mut self) {
        self.recover_from_sentinel();
        self.current_variable = None;

        if self.waiting_for_new_value {
            self.display = "0.".to_string();
            self.waiting_for_new_value = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    pub fn backspace(&mut self) {
        if self.is_error() {
            self.clear();
            return;
        }
        // Results are replaced, not trimmed.
        if self.waiting_for_new_value {
            self.display = "0".to_string();
            self.waiting_for_new_value = false;
            return;
        }
        self.display.pop();
        if self.display.is_empty() || self.display == "-" {
            self.display = "0".to_string();
        }
    }

    /// Resets entry and the pending operation. History, memory and
    /// variables are kept.
    pub fn clear(&mut self) {
        self.display = "0".to_string();
        self.expression.clear();
        self.pending = None;
        self.waiting_for_new_value = false;
        self.current_variable = None;
    }

    // =========================================================================
    // Binary operations
    // =========================================================================

    /// Arms `op`, folding any pending operation first.
    pub fn choose_operator(
        &mut self,
        op: BinaryOp,
    ) {
        if self.is_error() {
            return;
        }
        let Some(input) = self.operand("operator") else {
            return;
        };

        let lhs = match self.pending.take() {
            None => input,
            Some(pending) => match apply(pending.op, pending.lhs, input) {
                Ok(result) => {
                    self.display = self.format(result);
                    result
                }
                Err(error) => {
                    // The new operator is dropped along with the pending one.
                    self.fail(error);
                    return;
                }
            },
        };

        self.pending = Some(PendingOperation { lhs, op });
        self.expression = format!("{} {op}", format_plain(lhs));
        self.waiting_for_new_value = true;
    }

    /// Completes the pending operation and records it in history.
    pub fn equals(&mut self) {
        if self.is_error() {
            return;
        }
        let Some(pending) = self.pending else {
            return;
        };
        let Some(input) = self.operand("equals") else {
            return;
        };

        self.pending = None;
        self.waiting_for_new_value = true;

        match apply(pending.op, pending.lhs, input) {
            Ok(result) => {
                let formatted = self.format(result);
                let trace = format!(
                    "{} {} {} = {formatted}",
                    format_plain(pending.lhs),
                    pending.op,
                    format_plain(input),
                );
                self.display = formatted;
                self.record(trace);
            }
            Err(error) => self.fail(error),
        }
    }

    // =========================================================================
    // Scientific functions
    // =========================================================================

    pub fn apply_function(
        &mut self,
        func: ScientificFn,
    ) {
        if self.is_error() {
            return;
        }
        let value = if func.is_constant() {
            0.0
        } else {
            match self.operand(func.name()) {
                Some(value) => value,
                None => return,
            }
        };

        match scientific::evaluate(func, value, self.angle_mode) {
            Ok(result) => {
                let formatted = self.format(result);
                let trace = if func.is_constant() {
                    format!("{} = {formatted}", func.name())
                } else {
                    format!("{}({}) = {formatted}", func.name(), format_plain(value))
                };
                self.display = formatted;
                self.waiting_for_new_value = true;
                self.record(trace);
            }
            Err(error) => self.fail(error),
        }
    }

    // =========================================================================
    // Memory and variables
    // =========================================================================

    pub fn memory_op(
        &mut self,
        op: MemoryOp,
    ) {
        if self.is_error() {
            debug!(op = op.label(), "memory operation ignored on error display");
            return;
        }
        match op {
            MemoryOp::Clear => self.memory = 0.0,
            MemoryOp::Recall => {
                self.display = self.format(self.memory);
                self.waiting_for_new_value = true;
            }
            MemoryOp::Add | MemoryOp::Subtract => {
                let Some(value) = self.operand(op.label()) else {
                    return;
                };
                let next = match op {
                    MemoryOp::Subtract => self.memory - value,
                    _ => self.memory + value,
                };
                match check_result(next) {
                    Ok(next) => self.memory = next,
                    Err(error) => warn!(op = op.label(), %error, "memory register left unchanged"),
                }
            }
        }
    }

    /// Recalls `variable`, or stores into it if it is already armed.
    pub fn toggle_variable(
        &mut self,
        variable: Variable,
    ) {
        if self.is_error() {
            return;
        }
        if self.current_variable == Some(variable) {
            self.store_variable(variable);
        } else {
            self.display = self.format(self.variables.get(variable));
            self.current_variable = Some(variable);
            self.waiting_for_new_value = true;
        }
    }

    pub fn store_variable(
        &mut self,
        variable: Variable,
    ) {
        if self.is_error() {
            return;
        }
        let Some(value) = self.operand("store") else {
            return;
        };
        self.variables.set(variable, value);
        self.current_variable = None;
        debug!(%variable, value, "variable stored");
    }

    // =========================================================================
    // Display decorations and unary shortcuts
    // =========================================================================

    /// Appends a bracket to the display. Brackets are never evaluated.
    pub fn insert_bracket(
        &mut self,
        bracket: Bracket,
    ) {
        if self.is_error() {
            return;
        }
        if self.waiting_for_new_value || self.display == "0" {
            self.display = bracket.as_char().to_string();
            self.waiting_for_new_value = false;
        } else {
            self.display.push(bracket.as_char());
        }
    }

    pub fn toggle_sign(&mut self) {
        if self.is_error() || self.display == "0" {
            return;
        }
        match self.display.strip_prefix('-') {
            Some(rest) => self.display = rest.to_string(),
            None => self.display.insert(0, '-'),
        }
    }

    pub fn percentage(&mut self) {
        if self.is_error() {
            return;
        }
        let Some(value) = self.operand("percentage") else {
            return;
        };
        match check_result(value / 100.0) {
            Ok(result) => {
                self.display = self.format(result);
                self.waiting_for_new_value = true;
            }
            Err(error) => self.fail(error),
        }
    }

    // =========================================================================
    // Configuration and history
    // =========================================================================

    pub fn set_angle_mode(
        &mut self,
        mode: AngleMode,
    ) {
        self.angle_mode = mode;
    }

    pub fn set_display_mode(
        &mut self,
        mode: DisplayMode,
    ) {
        self.display_mode = mode;
    }

    pub fn set_precision(
        &mut self,
        precision: u8,
    ) {
        if precision > MAX_PRECISION {
            warn!(precision, max = MAX_PRECISION, "clamping display precision");
        }
        self.display_precision = precision.min(MAX_PRECISION);
    }

    /// Loads the result of a history entry as the current operand.
    pub fn recall_history(
        &mut self,
        index: usize,
    ) {
        let Some(result) = self.history.result_of(index) else {
            debug!(index, "no history entry to recall");
            return;
        };
        self.display = result.to_string();
        self.waiting_for_new_value = true;
        self.current_variable = None;
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn format(
        &self,
        value: f64,
    ) -> String {
        format_operand(value, self.display_mode, self.display_precision)
    }

    fn operand(
        &self,
        context: &'static str,
    ) -> Option<f64> {
        match parse_operand(&self.display) {
            Ok(value) => Some(value),
            Err(error) => {
                warn!(context, %error, "ignoring action on non-numeric display");
                None
            }
        }
    }

    fn recover_from_sentinel(&mut self) {
        if self.is_error() {
            self.display = "0".to_string();
            self.expression.clear();
            self.waiting_for_new_value = false;
        }
    }

    fn fail(
        &mut self,
        error: CalcError,
    ) {
        warn!(%error, "calculation failed");
        self.display = error.sentinel().as_str().to_string();
        self.expression = error.to_string();
        self.pending = None;
    }

    fn record(
        &mut self,
        trace: String,
    ) {
        info!(entry = %trace, "history entry recorded");
        self.expression.clone_from(&trace);
        if let Some(evicted) = self.history.push(trace) {
            debug!(entry = %evicted, "evicted oldest history entry");
        }
    }
}
