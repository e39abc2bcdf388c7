use std::f64::consts::{E, PI};

use crate::models::AngleMode;

use super::action::ScientificFn;
use super::numeric::{CalcError, check_result};

/// Distance in degrees from 90° + 180°k treated as an exact `tan` asymptote.
const ASYMPTOTE_TOLERANCE: f64 = 0.0001;

/// Evaluates a scientific function on `value`.
///
/// Constants ignore `value`. Trigonometric inputs are in degrees when
/// `angle_mode` is [`AngleMode::Deg`].
pub fn evaluate(
    func: ScientificFn,
    value: f64,
    angle_mode: AngleMode,
) -> Result<f64, CalcError> {
    let raw = match func {
        ScientificFn::Sin => to_radians(value, angle_mode).sin(),
        ScientificFn::Cos => to_radians(value, angle_mode).cos(),
        ScientificFn::Tan => {
            if angle_mode == AngleMode::Deg && is_tan_asymptote(value) {
                return Err(CalcError::Asymptote { function: "tan" });
            }
            to_radians(value, angle_mode).tan()
        }
        ScientificFn::Log => require_positive("log", value)?.log10(),
        ScientificFn::Ln => require_positive("ln", value)?.ln(),
        ScientificFn::Sqrt => {
            if value < 0.0 {
                return Err(CalcError::Domain {
                    function: "sqrt",
                    requirement: "a non-negative input",
                });
            }
            value.sqrt()
        }
        ScientificFn::Pow2 => value * value,
        ScientificFn::Pow3 => value * value * value,
        ScientificFn::Exp => value.exp(),
        ScientificFn::Reciprocal => {
            if value == 0.0 {
                return Err(CalcError::Asymptote {
                    function: "reciprocal",
                });
            }
            1.0 / value
        }
        ScientificFn::Pi => PI,
        ScientificFn::E => E,
    };
    check_result(raw)
}

fn to_radians(
    value: f64,
    angle_mode: AngleMode,
) -> f64 {
    match angle_mode {
        AngleMode::Deg => value * (PI / 180.0),
        AngleMode::Rad => value,
    }
}

fn is_tan_asymptote(degrees: f64) -> bool {
    let offset = (degrees - 90.0).rem_euclid(180.0);
    offset < ASYMPTOTE_TOLERANCE || 180.0 - offset < ASYMPTOTE_TOLERANCE
}

fn require_positive(
    function: &'static str,
    value: f64,
) -> Result<f64, CalcError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(CalcError::Domain {
            function,
            requirement: "a positive input",
        })
    }
}
