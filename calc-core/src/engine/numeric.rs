//! String/number boundary and error taxonomy.
//!
//! Every value the engine reads from the display goes through
//! [`parse_operand`], and every computed value goes through [`check_result`]
//! before it is shown. Failures never leave the engine: a [`CalcError`] is
//! turned into the [`Sentinel`] string the display shows instead.

use std::fmt;

use thiserror::Error;

use super::action::BinaryOp;

/// Reserved display strings standing in for non-numeric results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    Error,
    Infinity,
    NegativeInfinity,
}

impl Sentinel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Infinity => "Infinity",
            Self::NegativeInfinity => "-Infinity",
        }
    }

    pub fn parse(display: &str) -> Option<Self> {
        match display {
            "Error" => Some(Self::Error),
            "Infinity" => Some(Self::Infinity),
            "-Infinity" => Some(Self::NegativeInfinity),
            _ => None,
        }
    }
}

impl fmt::Display for Sentinel {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a calculation has no finite result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("division by zero")]
    DivideByZero,

    /// Input outside the function's domain, e.g. `sqrt` of a negative.
    #[error("{function} requires {requirement}")]
    Domain {
        function: &'static str,
        requirement: &'static str,
    },

    #[error("result is not a number")]
    NotANumber,

    /// Result exceeds the finite range of an f64.
    #[error("result overflows the representable range")]
    Overflow { negative: bool },

    /// Input sits exactly on a singularity of the function.
    #[error("{function} is undefined at this input")]
    Asymptote { function: &'static str },
}

impl CalcError {
    /// The display sentinel this error is rendered as.
    pub fn sentinel(&self) -> Sentinel {
        match self {
            Self::DivideByZero | Self::Domain { .. } | Self::NotANumber => Sentinel::Error,
            Self::Overflow { negative: true } => Sentinel::NegativeInfinity,
            Self::Overflow { negative: false } | Self::Asymptote { .. } => Sentinel::Infinity,
        }
    }
}

/// Classifies a raw f64 result, passing finite values through.
pub fn check_result(value: f64) -> Result<f64, CalcError> {
    if value.is_nan() {
        Err(CalcError::NotANumber)
    } else if value.is_infinite() {
        Err(CalcError::Overflow {
            negative: value.is_sign_negative(),
        })
    } else {
        Ok(value)
    }
}

/// Applies a binary operator, rejecting division by zero.
pub fn apply(
    op: BinaryOp,
    a: f64,
    b: f64,
) -> Result<f64, CalcError> {
    let raw = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Subtract => a - b,
        BinaryOp::Multiply => a * b,
        BinaryOp::Divide => {
            if b == 0.0 {
                return Err(CalcError::DivideByZero);
            }
            a / b
        }
    };
    check_result(raw)
}

/// Error returned when the display does not hold a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("display '{display}' is not a numeric operand")]
pub struct ParseOperandError {
    display: String,
}

/// Reads the display as a number.
///
/// Decorative brackets are ignored. Sentinels, a lone sign and anything
/// other than a decimal literal (optionally with an exponent) are rejected.
pub fn parse_operand(display: &str) -> Result<f64, ParseOperandError> {
    let error = || ParseOperandError {
        display: display.to_string(),
    };

    if Sentinel::parse(display).is_some() {
        return Err(error());
    }

    let literal: String = display
        .chars()
        .filter(|c| !matches!(c, '(' | ')'))
        .collect();

    // f64::from_str also accepts "inf" and "NaN"; the display never should.
    let is_literal = !literal.is_empty()
        && literal
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !is_literal {
        return Err(error());
    }

    literal.parse::<f64>().map_err(|_| error())
}

/// Shortest round-trip rendering of a finite value, with `-0` shown as `0`.
///
/// Used for operands inside traces, where the exact value typed matters more
/// than the configured display notation.
pub fn format_plain(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
