//! Rendering of computed results in fixed, scientific or engineering notation.

use crate::models::{DisplayMode, MAX_PRECISION};

use super::numeric::{check_result, format_plain};

/// Magnitude from which fixed-point output switches to scientific notation.
const FIXED_LIMIT: f64 = 1e21;

/// Formats a computed value for the display.
///
/// Non-finite values come out as their sentinel string. Precision is capped
/// at [`MAX_PRECISION`].
///
/// # Example
///
/// ```
/// use calc_core::DisplayMode;
/// use calc_core::engine::format_operand;
///
/// assert_eq!(format_operand(2.0 / 3.0, DisplayMode::Fix, 6), "0.666667");
/// assert_eq!(format_operand(0.5, DisplayMode::Fix, 6), "0.5");
/// assert_eq!(format_operand(1234.56, DisplayMode::Sci, 6), "1.234560e+3");
/// assert_eq!(format_operand(12345.6, DisplayMode::Eng, 6), "12.345600e+3");
/// ```
pub fn format_operand(
    value: f64,
    mode: DisplayMode,
    precision: u8,
) -> String {
    if let Err(error) = check_result(value) {
        return error.sentinel().as_str().to_string();
    }

    let precision = usize::from(precision.min(MAX_PRECISION));
    match mode {
        DisplayMode::Fix if value.abs() >= FIXED_LIMIT => scientific(value, precision),
        DisplayMode::Fix => fixed(value, precision),
        DisplayMode::Sci => scientific(value, precision),
        DisplayMode::Eng => engineering(value, precision),
    }
}

/// Largest magnitude below which every f64 can still carry a fraction.
const INTEGRAL_LIMIT: f64 = 4_503_599_627_370_496.0; // 2^52

/// Rounds `value` to `precision` decimals, ties away from zero.
fn round_half_away(
    value: f64,
    precision: usize,
) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let scaled = value * factor;
    if !scaled.is_finite() || scaled.abs() >= INTEGRAL_LIMIT {
        return value;
    }
    scaled.round() / factor
}

/// Splits a finite, non-zero value into a decimal mantissa in `[1, 10)` and
/// its exponent, without dividing by a power of ten that could underflow.
fn decompose(value: f64) -> Option<(f64, i32)> {
    let rendered = format!("{value:e}");
    let (mantissa, exponent) = rendered.split_once('e')?;
    Some((mantissa.parse().ok()?, exponent.parse().ok()?))
}

fn fixed(
    value: f64,
    precision: usize,
) -> String {
    let rendered = format!("{:.precision$}", round_half_away(value, precision));
    // Round trip through f64 to drop trailing zeros and a bare trailing '.'.
    match rendered.parse::<f64>() {
        Ok(rounded) => format_plain(rounded),
        Err(_) => rendered,
    }
}

fn scientific(
    value: f64,
    precision: usize,
) -> String {
    let Some((mantissa, mut exponent)) = decompose(value) else {
        return format_plain(value);
    };
    let mut rounded = round_half_away(mantissa, precision);
    if rounded.abs() >= 10.0 {
        exponent += 1;
        rounded = round_half_away(mantissa / 10.0, precision);
    }
    format!("{rounded:.precision$}e{exponent:+}")
}

fn engineering(
    value: f64,
    precision: usize,
) -> String {
    if value == 0.0 {
        return format!("{:.precision$}e+0", 0.0);
    }
    let Some((mantissa, exponent)) = decompose(value) else {
        return format_plain(value);
    };

    let mut group = exponent.div_euclid(3) * 3;
    let mut scaled = mantissa * 10f64.powi(exponent - group);
    // Rounding can carry the mantissa up to 1000; move to the next group.
    if round_half_away(scaled, precision).abs() >= 1000.0 {
        group += 3;
        scaled /= 1000.0;
    }

    format!("{:.precision$}e{group:+}", round_half_away(scaled, precision))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::engine::parse_operand;

    // =========================================================================
    // fix
    // =========================================================================

    #[test]
    fn fix_strips_trailing_zeros() {
        assert_eq!(format_operand(4.0, DisplayMode::Fix, 6), "4");
        assert_eq!(format_operand(0.1 + 0.2, DisplayMode::Fix, 6), "0.3");
        assert_eq!(format_operand(-2.5, DisplayMode::Fix, 6), "-2.5");
    }

    #[test]
    fn fix_rounds_to_precision() {
        assert_eq!(format_operand(1.0 / 3.0, DisplayMode::Fix, 2), "0.33");
        assert_eq!(format_operand(2.0f64.sqrt(), DisplayMode::Fix, 6), "1.414214");
        assert_eq!(format_operand(2.4, DisplayMode::Fix, 0), "2");
    }

    #[test]
    fn fix_rounds_ties_away_from_zero() {
        assert_eq!(format_operand(2.5, DisplayMode::Fix, 0), "3");
        assert_eq!(format_operand(-2.5, DisplayMode::Fix, 0), "-3");
        assert_eq!(format_operand(0.125, DisplayMode::Fix, 2), "0.13");
        assert_eq!(format_operand(1.0 / 128.0, DisplayMode::Fix, 6), "0.007813");
    }

    #[test]
    fn fix_leaves_large_integral_values_alone() {
        assert_eq!(format_operand(1e20, DisplayMode::Fix, 6), "100000000000000000000");
    }

    #[test]
    fn fix_hides_negative_zero_from_rounding() {
        assert_eq!(format_operand(-1e-12, DisplayMode::Fix, 6), "0");
    }

    #[test]
    fn fix_falls_back_to_scientific_for_huge_values() {
        assert_eq!(format_operand(1e21, DisplayMode::Fix, 2), "1.00e+21");
    }

    // =========================================================================
    // sci / eng
    // =========================================================================

    #[test]
    fn sci_uses_signed_exponent() {
        assert_eq!(format_operand(0.00123, DisplayMode::Sci, 3), "1.230e-3");
        assert_eq!(format_operand(-5.0, DisplayMode::Sci, 2), "-5.00e+0");
    }

    #[test]
    fn eng_exponent_is_multiple_of_three() {
        assert_eq!(format_operand(0.01, DisplayMode::Eng, 2), "10.00e-3");
        assert_eq!(format_operand(1_500_000.0, DisplayMode::Eng, 1), "1.5e+6");
        assert_eq!(format_operand(-42.0, DisplayMode::Eng, 0), "-42e+0");
    }

    #[test]
    fn eng_carries_rounded_mantissa_into_next_group() {
        assert_eq!(format_operand(999.9999999, DisplayMode::Eng, 3), "1.000e+3");
    }

    #[test]
    fn sci_rounds_mantissa_ties_away_from_zero() {
        assert_eq!(format_operand(1.25, DisplayMode::Sci, 1), "1.3e+0");
        assert_eq!(format_operand(9.96, DisplayMode::Sci, 1), "1.0e+1");
    }

    #[test]
    fn tiny_values_keep_a_numeric_mantissa() {
        assert_eq!(format_operand(5e-324, DisplayMode::Eng, 3), "5.000e-324");
        assert_eq!(format_operand(1e-310, DisplayMode::Eng, 3), "100.000e-312");
        assert_eq!(format_operand(5e-324, DisplayMode::Sci, 3), "5.000e-324");
        assert!(parse_operand(&format_operand(1e-310, DisplayMode::Eng, 3)).is_ok());
    }

    #[test]
    fn eng_formats_zero() {
        assert_eq!(format_operand(0.0, DisplayMode::Eng, 2), "0.00e+0");
    }

    // =========================================================================
    // sentinels / precision cap
    // =========================================================================

    #[test]
    fn non_finite_values_render_as_sentinels() {
        assert_eq!(format_operand(f64::NAN, DisplayMode::Fix, 6), "Error");
        assert_eq!(format_operand(f64::INFINITY, DisplayMode::Sci, 6), "Infinity");
        assert_eq!(
            format_operand(f64::NEG_INFINITY, DisplayMode::Eng, 6),
            "-Infinity"
        );
    }

    #[test]
    fn precision_is_capped() {
        assert_eq!(
            format_operand(1.0, DisplayMode::Sci, 40),
            format_operand(1.0, DisplayMode::Sci, MAX_PRECISION)
        );
    }
}
