//! Rendering of results and expressions for display.

/// Values at least this large are shown in scientific notation
const SCIENTIFIC_ABOVE: f64 = 1e15;
/// Non-zero values smaller than this are shown in scientific notation
const SCIENTIFIC_BELOW: f64 = 1e-10;

/// Render `value` for display.
///
/// Infinities are shown as `∞` and `-∞`, very large or very small values
/// in scientific notation with eight fractional digits, integral values
/// without decimal point, and everything else with at most ten fractional
/// digits.
///
/// # Examples
///
/// ```
/// # use sciculator::format;
/// assert_eq!(format(4.0), "4");
/// assert_eq!(format(0.1 + 0.2), "0.3");
/// assert_eq!(format(1.0 / 3.0), "0.3333333333");
/// assert_eq!(format(1e20), "1.00000000e+20");
/// assert_eq!(format(f64::INFINITY), "∞");
/// ```
#[must_use]
pub fn format(value: f64) -> String {
    if value.is_nan() {
        return "nan".into();
    }
    if value == f64::INFINITY {
        return "\u{221e}".into();
    }
    if value == f64::NEG_INFINITY {
        return "-\u{221e}".into();
    }

    let magnitude = value.abs();
    if magnitude > SCIENTIFIC_ABOVE || (magnitude < SCIENTIFIC_BELOW && value != 0.0) {
        return scientific(value);
    }
    if value == value.trunc() {
        // in range, and -0.0 prints as 0
        #[allow(clippy::cast_possible_truncation)]
        let integer = value as i64;
        return integer.to_string();
    }

    let fixed = format!("{:.10}", value);
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// `d.ddddddddde±XX`, with at least two exponent digits
fn scientific(value: f64) -> String {
    let formatted = format!("{:.8e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(exponent) => format!(
                "{}e{}{:02}",
                mantissa,
                if exponent < 0 { '-' } else { '+' },
                exponent.abs()
            ),
            Err(_) => formatted,
        },
        None => formatted,
    }
}

/// Make a raw expression more readable, replacing operators and some names
/// by their usual symbols.
///
/// # Examples
///
/// ```
/// # use sciculator::prettify;
/// assert_eq!(prettify("2**3*pi/sqrt(2)"), "2^3×π÷√(2)");
/// ```
#[must_use]
pub fn prettify(expression: &str) -> String {
    const REPLACEMENTS: [(&str, &str); 5] = [
        ("**", "^"),
        ("pi", "\u{3c0}"),
        ("sqrt", "\u{221a}"),
        ("*", "\u{d7}"),
        ("/", "\u{f7}"),
    ];
    REPLACEMENTS
        .iter()
        .fold(expression.to_owned(), |display, (from, to)| {
            display.replace(from, to)
        })
}
