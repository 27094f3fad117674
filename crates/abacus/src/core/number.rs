//! Number rendering and operand parsing shared by every front-end

/// Renders a real the way the calculator traces have always shown it.
///
/// Finite values keep a fractional part (`5.0`), switch to exponent form
/// below `1e-4` or from `1e16` upwards with a signed two-digit exponent
/// (`1e+16`, `2.5e-07`), and non-finite values render as `inf`, `-inf`
/// or `nan`.
#[must_use]
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let raw = format!("{value:e}");
        return match raw.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => raw,
        };
    }

    let mut rendered = value.to_string();
    if !rendered.contains('.') {
        rendered.push_str(".0");
    }
    rendered
}

/// Parses a user-supplied operand, `None` when the text is not a number
#[must_use]
pub fn parse_operand(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

/// Converts an angle in degrees to radians
#[must_use]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees.to_radians()
}

/// Converts an angle in radians to degrees
#[must_use]
pub fn radians_to_degrees(radians: f64) -> f64 {
    radians.to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_whole_numbers_keep_fraction() {
        assert_eq!(format_real(5.0), "5.0");
        assert_eq!(format_real(0.0), "0.0");
        assert_eq!(format_real(-0.0), "-0.0");
        assert_eq!(format_real(-42.0), "-42.0");
        assert_eq!(format_real(1e15), "1000000000000000.0");
    }

    #[test]
    fn test_format_fractions() {
        assert_eq!(format_real(0.5), "0.5");
        assert_eq!(format_real(-2.25), "-2.25");
        assert_eq!(format_real(0.0001), "0.0001");
    }

    #[test]
    fn test_format_large_uses_signed_exponent() {
        assert_eq!(format_real(1e16), "1e+16");
        assert_eq!(format_real(1.5e300), "1.5e+300");
        assert_eq!(format_real(-2e20), "-2e+20");
    }

    #[test]
    fn test_format_small_pads_exponent() {
        assert_eq!(format_real(1e-5), "1e-05");
        assert_eq!(format_real(2.5e-7), "2.5e-07");
        assert_eq!(format_real(1e-300), "1e-300");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_real(f64::INFINITY), "inf");
        assert_eq!(format_real(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_real(f64::NAN), "nan");
    }

    #[test]
    fn test_parse_operand() {
        assert_eq!(parse_operand("2"), Some(2.0));
        assert_eq!(parse_operand("  -3.5 "), Some(-3.5));
        assert_eq!(parse_operand("1e3"), Some(1000.0));
        assert_eq!(parse_operand("abc"), None);
        assert_eq!(parse_operand(""), None);
    }

    #[test]
    fn test_angle_conversion() {
        assert!((degrees_to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((radians_to_degrees(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
    }
}
