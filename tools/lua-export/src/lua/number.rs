//! Decimal formatting for floating-point values
//!
//! Produces the same text as C's `%.{P}g`: `P` significant digits, trailing
//! zeros removed, exponent notation only for very large or very small
//! magnitudes. The table grammar has no literal for infinities or NaN, so
//! those are written as constant divisions.

/// Format `value` with `precision` significant digits
pub fn format_float(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "(0/0)".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "(1/0)" } else { "(-1/0)" }.to_owned();
    }
    if value == 0.0 {
        // Keep the sign: "-0" would load back as the integer 0
        return if value.is_sign_negative() { "-0.0" } else { "0" }.to_owned();
    }

    let precision = precision.max(1);
    let scientific = format!("{:.*e}", precision - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_fraction(mantissa), sign, exponent.abs())
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_owned()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
