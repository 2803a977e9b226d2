//! Floating point tokens
//!
//! Numbers are written with a fixed number of significant digits and no
//! trailing zeros, switching to scientific notation for very small or very
//! large magnitudes (the `%g` conversion). With the default precision of 8,
//! `1.0 / 3.0` becomes `0.33333333` and `123456789.0` becomes `1.2345679e+08`.

pub fn format_float(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    // Round to the requested significant digits first; the exponent of the
    // rounded value decides the notation.
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            if exponent < 0 { '-' } else { '+' },
            exponent.abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, "0")]
    #[case(1.0, "1")]
    #[case(-2.5, "-2.5")]
    #[case(250.0, "250")]
    #[case(1.0 / 3.0, "0.33333333")]
    #[case(12345678.0, "12345678")]
    #[case(123456789.0, "1.2345679e+08")]
    #[case(99999999.9, "1e+08")]
    #[case(0.0001, "0.0001")]
    #[case(0.00001, "1e-05")]
    #[case(-0.000012345, "-1.2345e-05")]
    #[case(1e100, "1e+100")]
    fn test_default_precision(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_float(value, 8), expected);
    }

    #[test]
    fn test_low_precision() {
        assert_eq!(format_float(3.14159, 3), "3.14");
        assert_eq!(format_float(1234.0, 3), "1.23e+03");
        assert_eq!(format_float(0.5, 0), "0.5");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_float(f64::NAN, 8), "nan");
        assert_eq!(format_float(f64::INFINITY, 8), "inf");
        assert_eq!(format_float(f64::NEG_INFINITY, 8), "-inf");
    }
}
