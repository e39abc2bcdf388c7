//! The closed set of user gestures the engine accepts.

use std::fmt;

use crate::models::{AngleMode, DisplayMode, Variable};

/// Arithmetic operator for immediate-execution sequencing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
        }
    }

    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary transforms and constants of the scientific keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScientificFn {
    Sin,
    Cos,
    Tan,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
    Sqrt,
    Pow2,
    Pow3,
    Exp,
    /// `1/x`.
    Reciprocal,
    Pi,
    E,
}

impl ScientificFn {
    pub const ALL: [ScientificFn; 12] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Log,
        Self::Ln,
        Self::Sqrt,
        Self::Pow2,
        Self::Pow3,
        Self::Exp,
        Self::Reciprocal,
        Self::Pi,
        Self::E,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Sqrt => "sqrt",
            Self::Pow2 => "pow2",
            Self::Pow3 => "pow3",
            Self::Exp => "exp",
            Self::Reciprocal => "reciprocal",
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Constants ignore the display entirely.
    pub fn is_constant(&self) -> bool {
        matches!(self, Self::Pi | Self::E)
    }
}

/// Operations on the single memory register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryOp {
    /// `MC`
    Clear,
    /// `MR`
    Recall,
    /// `M+`
    Add,
    /// `M-`
    Subtract,
}

impl MemoryOp {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "MC",
            Self::Recall => "MR",
            Self::Add => "M+",
            Self::Subtract => "M-",
        }
    }
}

/// Decorative bracket characters; never evaluated as grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bracket {
    Open,
    Close,
}

impl Bracket {
    pub fn as_char(&self) -> char {
        match self {
            Self::Open => '(',
            Self::Close => ')',
        }
    }
}

/// One user gesture. Every action is total: applying it never fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// A decimal digit, `0..=9`. Larger values are ignored.
    Digit(u8),
    Decimal,
    Operator(BinaryOp),
    Equals,
    Clear,
    Backspace,
    Scientific(ScientificFn),
    Memory(MemoryOp),
    /// Recall `variable`, or store into it when it is already armed.
    Variable(Variable),
    /// Store the display into `variable` regardless of what is armed.
    StoreVariable(Variable),
    Bracket(Bracket),
    ToggleSign,
    Percentage,
    SetAngleMode(AngleMode),
    SetDisplayMode(DisplayMode),
    SetPrecision(u8),
    /// Load the result of history entry `index` (0 is the oldest).
    RecallHistory(usize),
    ClearHistory,
}

impl Action {
    /// Maps a keyboard key name to an action.
    ///
    /// Understands digits, `.`, the four operators, `Enter`/`=`, `Escape`
    /// and `Backspace`.
    ///
    /// ```
    /// use calc_core::{Action, BinaryOp};
    ///
    /// assert_eq!(Action::from_key("7"), Some(Action::Digit(7)));
    /// assert_eq!(Action::from_key("*"), Some(Action::Operator(BinaryOp::Multiply)));
    /// assert_eq!(Action::from_key("Enter"), Some(Action::Equals));
    /// assert_eq!(Action::from_key("Tab"), None);
    /// ```
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "." => Some(Self::Decimal),
            "Enter" | "=" => Some(Self::Equals),
            "Escape" => Some(Self::Clear),
            "Backspace" => Some(Self::Backspace),
            _ => {
                if let Some(op) = BinaryOp::from_symbol(key) {
                    return Some(Self::Operator(op));
                }
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => c
                        .to_digit(10)
                        .and_then(|d| u8::try_from(d).ok())
                        .map(Self::Digit),
                    _ => None,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_key_maps_every_digit() {
        for d in 0..=9u8 {
            assert_eq!(Action::from_key(&d.to_string()), Some(Action::Digit(d)));
        }
    }

    #[test]
    fn from_key_maps_operators_and_controls() {
        assert_eq!(
            Action::from_key("+"),
            Some(Action::Operator(BinaryOp::Add))
        );
        assert_eq!(
            Action::from_key("-"),
            Some(Action::Operator(BinaryOp::Subtract))
        );
        assert_eq!(
            Action::from_key("/"),
            Some(Action::Operator(BinaryOp::Divide))
        );
        assert_eq!(Action::from_key("="), Some(Action::Equals));
        assert_eq!(Action::from_key("."), Some(Action::Decimal));
        assert_eq!(Action::from_key("Escape"), Some(Action::Clear));
        assert_eq!(Action::from_key("Backspace"), Some(Action::Backspace));
    }

    #[test]
    fn from_key_ignores_unbound_keys() {
        assert_eq!(Action::from_key("a"), None);
        assert_eq!(Action::from_key("12"), None);
        assert_eq!(Action::from_key(""), None);
        assert_eq!(Action::from_key("F5"), None);
    }

    #[test]
    fn scientific_names_round_trip() {
        for func in ScientificFn::ALL {
            assert_eq!(ScientificFn::parse(func.name()), Some(func));
        }
        assert_eq!(ScientificFn::parse("cosh"), None);
    }

    #[test]
    fn only_pi_and_e_are_constants() {
        let constants: Vec<_> = ScientificFn::ALL
            .into_iter()
            .filter(ScientificFn::is_constant)
            .collect();

        assert_eq!(constants, vec![ScientificFn::Pi, ScientificFn::E]);
    }
}
