//! Display policy for numeric results

use std::f64::consts::{E, FRAC_PI_2, PI};

/// Below this magnitude, a value displays as `0`
pub const ZERO_THRESHOLD : f64 = 1e-10;
/// Above this magnitude, a value displays in scientific notation
pub const SCIENTIFIC_THRESHOLD : f64 = 1e10;

/// Formats a numeric result for a label.
///
/// Returns `None` for NaN and infinities: no label is better than a placeholder.
/// Tiny values are `0`, huge ones get 4 fractional digits in scientific notation, and
/// everything else is rounded to 6 decimal places with trailing zeros trimmed.
pub fn format_value(value : f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    let magnitude = value.abs();
    if magnitude < ZERO_THRESHOLD {
        return Some(String::from("0"));
    }
    if magnitude > SCIENTIFIC_THRESHOLD {
        return Some(format!("{:.4e}", value));
    }

    let rounded = format!("{:.6}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => Some(String::from("0")),
        _    => Some(trimmed.to_string()),
    }
}

/// How close a value must be to a named constant to display as it
const CONSTANT_TOLERANCE : f64 = 1e-8;
/// How close a value must be to a fraction to display as it
const FRACTION_TOLERANCE : f64 = 1e-9;
/// Denominators tried, smallest first, so a matching fraction is always in lowest terms
const DENOMINATORS : &[u8] = &[2, 3, 4, 5, 6, 8, 10];

/// Formats a numeric result as markup, recognizing `\pi`, `\frac{\pi}{2}`, `e`, `\frac{1}{e}`
/// and fractions with a small denominator. Other values format as [`format_value`] does.
pub fn format_symbolic(value : f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value.abs() < ZERO_THRESHOLD {
        return Some(String::from("0"));
    }

    let constants = [
        (PI,        r"\pi"),
        (-PI,       r"-\pi"),
        (FRAC_PI_2, r"\frac{\pi}{2}"),
        (-FRAC_PI_2, r"-\frac{\pi}{2}"),
        (E,         "e"),
        (1.0 / E,   r"\frac{1}{e}"),
    ];
    if let Some((_, markup)) = constants.iter().find(|(constant, _)| (value - constant).abs() < CONSTANT_TOLERANCE) {
        return Some(markup.to_string());
    }

    // integers are not fractions
    if (value - value.round()).abs() >= FRACTION_TOLERANCE {
        for &denominator in DENOMINATORS {
            let denominator = f64::from(denominator);
            let numerator = (value * denominator).round();
            if numerator.abs() < 100.0 && (value - numerator / denominator).abs() < FRACTION_TOLERANCE {
                let sign = if numerator < 0.0 { "-" } else { "" };
                return Some(format!(r"{}\frac{{{}}}{{{}}}", sign, numerator.abs(), denominator));
            }
        }
    }
    format_value(value)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values() {
        let tests = [
            (0.0,                 Some("0")),
            (1e-11,               Some("0")),
            (-1e-11,              Some("0")),
            (2.0,                 Some("2")),
            (-2.5,                Some("-2.5")),
            (1.0 / 3.0,           Some("0.333333")),
            (0.1 + 0.2,           Some("0.3")),
            (1e-7,                Some("0")),
            (-1e-7,               Some("0")),
            (100.0,               Some("100")),
            (1e10,                Some("10000000000")),
            (12345678901.0,       Some("1.2346e10")),
            (-2.5e12,             Some("-2.5000e12")),
            (f64::NAN,            None),
            (f64::INFINITY,       None),
            (f64::NEG_INFINITY,   None),
        ];

        for (value, expected) in tests {
            eprintln!("Value: {:?}", value);
            assert_eq!(format_value(value).as_deref(), expected);
        }
    }

    #[test]
    fn symbolic_values() {
        let tests = [
            (PI,                  Some(r"\pi")),
            (-PI,                 Some(r"-\pi")),
            (PI / 2.0,            Some(r"\frac{\pi}{2}")),
            (-PI / 2.0 + 1e-10,   Some(r"-\frac{\pi}{2}")),
            (E,                   Some("e")),
            (1.0 / E,             Some(r"\frac{1}{e}")),
            (0.5,                 Some(r"\frac{1}{2}")),
            (1.0 / 3.0,           Some(r"\frac{1}{3}")),
            (-0.75,               Some(r"-\frac{3}{4}")),
            (2.0 / 6.0,           Some(r"\frac{1}{3}")),
            (0.3,                 Some(r"\frac{3}{10}")),
            (99.5,                Some("99.5")),
            (3.0,                 Some("3")),
            (-2.0,                Some("-2")),
            (1.0 / 7.0,           Some("0.142857")),
            (1e-12,               Some("0")),
            (3.2e12,              Some("3.2000e12")),
            (f64::NAN,            None),
            (f64::INFINITY,       None),
            (f64::NEG_INFINITY,   None),
        ];

        for (value, expected) in tests {
            eprintln!("Value: {:?}", value);
            assert_eq!(format_symbolic(value).as_deref(), expected);
        }
    }
}
