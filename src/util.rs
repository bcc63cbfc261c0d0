use crate::error::Error;
use hashbrown::HashMap;
use num_bigint::BigUint;

/// Name of the constant holding the last computed result
pub const ANS: &str = "ans";

/// A function from the closed function table
#[derive(Debug, Clone, Copy)]
pub enum Function {
    /// Single argument function. A NaN result from a non-NaN argument is a
    /// domain error, an infinite result from a finite argument is a range
    /// error.
    Math(fn(f64) -> f64),
    /// Single argument function doing its own domain checks
    Checked(fn(f64) -> Result<f64, Error>),
    /// `round(x)` or `round(x, ndigits)`
    Round,
}

impl Function {
    /// Apply the function to already evaluated arguments
    pub fn call(self, name: &str, args: &[f64]) -> Result<f64, Error> {
        match self {
            Self::Math(func) => {
                let x = single(name, args)?;
                let result = func(x);
                if result.is_nan() && !x.is_nan() {
                    Err(Error::domain())
                } else if result.is_infinite() && x.is_finite() {
                    Err(Error::range())
                } else {
                    Ok(result)
                }
            }
            Self::Checked(func) => func(single(name, args)?),
            Self::Round => match *args {
                [x] => round(x),
                [x, ndigits] => round_digits(x, ndigits),
                _ => Err(Error::Arity {
                    name: name.into(),
                    expected: "1 or 2",
                    got: args.len(),
                }),
            },
        }
    }
}

fn single(name: &str, args: &[f64]) -> Result<f64, Error> {
    match *args {
        [x] => Ok(x),
        _ => Err(Error::Arity {
            name: name.into(),
            expected: "exactly 1",
            got: args.len(),
        }),
    }
}

lazy_static! {
    /// The function table, by lowercase name
    pub static ref FUNCTIONS: HashMap<&'static str, Function> = {
        let mut map = HashMap::<&'static str, Function>::new();
        map.insert("sin", Function::Math(f64::sin));
        map.insert("cos", Function::Math(f64::cos));
        map.insert("tan", Function::Math(f64::tan));
        map.insert("asin", Function::Math(f64::asin));
        map.insert("acos", Function::Math(f64::acos));
        map.insert("atan", Function::Math(f64::atan));
        map.insert("sinh", Function::Math(f64::sinh));
        map.insert("cosh", Function::Math(f64::cosh));
        map.insert("tanh", Function::Math(f64::tanh));
        map.insert("asinh", Function::Math(f64::asinh));
        map.insert("acosh", Function::Math(f64::acosh));
        map.insert("atanh", Function::Checked(atanh));
        map.insert("log", Function::Checked(log10));
        map.insert("ln", Function::Checked(ln));
        map.insert("log2", Function::Checked(log2));
        map.insert("sqrt", Function::Math(f64::sqrt));
        map.insert("abs", Function::Math(f64::abs));
        map.insert("factorial", Function::Checked(factorial));
        map.insert("ceil", Function::Checked(ceil));
        map.insert("floor", Function::Checked(floor));
        map.insert("round", Function::Round);
        map.insert("degrees", Function::Math(f64::to_degrees));
        map.insert("radians", Function::Math(f64::to_radians));
        map.shrink_to_fit();
        map
    };

    /// The constant table, `ans` excepted
    pub static ref CONSTANTS: HashMap<&'static str, f64> = {
        let mut map = HashMap::<&'static str, f64>::new();
        map.insert("pi", std::f64::consts::PI);
        map.insert("e", std::f64::consts::E);
        map.insert("tau", std::f64::consts::TAU);
        map.insert("inf", f64::INFINITY);
        map.shrink_to_fit();
        map
    };
}

fn atanh(x: f64) -> Result<f64, Error> {
    if x.abs() >= 1.0 {
        return Err(Error::domain());
    }
    Ok(x.atanh())
}

fn log10(x: f64) -> Result<f64, Error> {
    if x <= 0.0 {
        return Err(Error::domain());
    }
    Ok(x.log10())
}

fn ln(x: f64) -> Result<f64, Error> {
    if x <= 0.0 {
        return Err(Error::domain());
    }
    Ok(x.ln())
}

fn log2(x: f64) -> Result<f64, Error> {
    if x <= 0.0 {
        return Err(Error::domain());
    }
    Ok(x.log2())
}

/// Largest integer whose factorial fits in a `f64`
const MAX_FACTORIAL: f64 = 170.0;

fn factorial(x: f64) -> Result<f64, Error> {
    if !x.is_finite() || x.fract() != 0.0 {
        return Err(Error::Domain(
            "factorial() only accepts integral values".into(),
        ));
    }
    if x < 0.0 {
        return Err(Error::Domain(
            "factorial() not defined for negative values".into(),
        ));
    }
    if x > MAX_FACTORIAL {
        return Err(Error::Overflow("factorial() result too large".into()));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let n = x as u32;
    // exact product, then a single correctly rounded conversion
    let product = (2..=n).fold(BigUint::from(1_u32), |product, k| product * k);
    product
        .to_string()
        .parse()
        .map_err(|_| Error::Overflow("factorial() result too large".into()))
}

/// Values which can not be converted to an integer
fn check_integral(x: f64) -> Result<f64, Error> {
    if x.is_nan() {
        Err(Error::Domain("cannot convert float NaN to integer".into()))
    } else if x.is_infinite() {
        Err(Error::Overflow(
            "cannot convert float infinity to integer".into(),
        ))
    } else {
        Ok(x)
    }
}

fn ceil(x: f64) -> Result<f64, Error> {
    check_integral(x).map(f64::ceil)
}

fn floor(x: f64) -> Result<f64, Error> {
    check_integral(x).map(f64::floor)
}

/// Round half to even
fn round(x: f64) -> Result<f64, Error> {
    check_integral(x).map(f64::round_ties_even)
}

/// Beyond this many digits, rounding does not change a `f64`
const MAX_ROUND_DIGITS: f64 = 323.0;
/// Below this many digits, every `f64` rounds to zero
const MIN_ROUND_DIGITS: f64 = -308.0;

/// `round(x, ndigits)`, correctly rounded half to even on the exact decimal
/// value of `x`
fn round_digits(x: f64, ndigits: f64) -> Result<f64, Error> {
    if !ndigits.is_finite() || ndigits.fract() != 0.0 {
        return Err(Error::Domain(
            "round() digits must be an integral value".into(),
        ));
    }
    if !x.is_finite() || x == 0.0 || ndigits > MAX_ROUND_DIGITS {
        return Ok(x);
    }
    if ndigits < MIN_ROUND_DIGITS {
        return Ok(0.0_f64.copysign(x));
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let decimal = if ndigits >= 0.0 {
        format!("{:.*}", ndigits as usize, x)
    } else {
        round_whole_digits(x, (-ndigits) as usize)
    };
    let rounded: f64 = decimal
        .parse()
        .map_err(|_| Error::Domain(format!("invalid rounded value {}", decimal)))?;
    if rounded.is_infinite() {
        return Err(Error::Overflow(
            "rounded value too large to represent".into(),
        ));
    }
    Ok(rounded)
}

/// Decimal text of `x` rounded half to even to a multiple of `10^digits`.
/// `digits` must be at least one.
fn round_whole_digits(x: f64, digits: usize) -> String {
    let sign = if x.is_sign_negative() { "-" } else { "" };
    let whole = format!("{:.0}", x.abs().trunc());
    if whole.len() < digits {
        return format!("{}0", sign);
    }
    let (kept, dropped) = whole.split_at(whole.len() - digits);
    let first = dropped.as_bytes()[0];
    let above_half = dropped[1..].bytes().any(|digit| digit != b'0') || x.fract() != 0.0;
    let odd = kept.bytes().last().map_or(false, |digit| digit % 2 == 1);
    let kept = if kept.is_empty() { "0" } else { kept };
    let kept = if first > b'5' || (first == b'5' && (above_half || odd)) {
        increment(kept)
    } else {
        kept.to_owned()
    };
    format!("{}{}e{}", sign, kept, digits)
}

/// Add one to a string of decimal digits
fn increment(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return bytes.into_iter().map(char::from).collect();
        }
    }
    bytes.insert(0, b'1');
    bytes.into_iter().map(char::from).collect()
}
