//! Angle unit handling.
//!
//! The function table only knows radian based trigonometry. In degree mode,
//! the input text is rewritten before parsing so that direct trigonometric
//! functions receive `radians(<argument>)` and inverse ones are wrapped in
//! `degrees(...)`.

use crate::error::Error;
use std::fmt::{self, Display, Formatter};
use std::ops::Range;
use std::str::FromStr;

const DIRECT: [&str; 3] = ["sin", "cos", "tan"];
const INVERSE: [&str; 3] = ["asin", "acos", "atan"];

/// Unit used for the arguments of direct trigonometric functions and the
/// results of inverse ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleMode {
    /// Angles in degrees
    Degrees,
    /// Angles in radians
    Radians,
}

impl Default for AngleMode {
    fn default() -> Self {
        Self::Degrees
    }
}

impl AngleMode {
    /// Check if this is the degree mode
    #[must_use]
    pub fn is_degrees(self) -> bool {
        self == Self::Degrees
    }

    /// Get the other mode
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Rewrite `expression` for this mode, see [`rewrite`].
    #[must_use]
    pub fn rewrite(self, expression: &str) -> String {
        rewrite(expression, self.is_degrees())
    }
}

impl Display for AngleMode {
    fn fmt(&self, fmt: &mut Formatter) -> fmt::Result {
        match *self {
            Self::Degrees => write!(fmt, "DEG"),
            Self::Radians => write!(fmt, "RAD"),
        }
    }
}

impl FromStr for AngleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "deg" | "degree" | "degrees" => Ok(Self::Degrees),
            "rad" | "radian" | "radians" => Ok(Self::Radians),
            _ => Err(Error::Parse(format!("unknown angle mode '{}'", s))),
        }
    }
}

/// Rewrite the trigonometric calls of `expression` for degree mode.
///
/// When `degree_mode` is false the input is returned unchanged. Otherwise
/// every `sin(x)`, `cos(x)` and `tan(x)` call becomes
/// `sin(radians(x))`, and every `asin(x)`, `acos(x)` and `atan(x)` call
/// becomes `degrees(asin(x))`. Names are only matched when directly followed
/// by `(` and not preceded by a letter, and the argument extends to the
/// matching closing parenthesis. An argument already converted to radians
/// is not scanned again for other direct functions, so the result of nested
/// direct calls depends on the scan order `sin`, `cos`, `tan`: in
/// `sin(tan(30))` the inner `tan` keeps a radian argument, while
/// `tan(sin(30))` converts both.
///
/// This works on the raw text: unbalanced input is rewritten on a best
/// effort basis and left for the parser to reject.
///
/// # Examples
///
/// ```
/// # use sciculator::rewrite;
/// assert_eq!(rewrite("sin(30)", true), "sin(radians(30))");
/// assert_eq!(rewrite("asin(0.5)", true), "degrees(asin(0.5))");
/// assert_eq!(rewrite("sin(30)", false), "sin(30)");
/// ```
#[must_use]
pub fn rewrite(expression: &str, degree_mode: bool) -> String {
    if !degree_mode {
        return expression.to_owned();
    }

    let mut text = expression.to_owned();
    let mut converted: Vec<Range<usize>> = Vec::new();
    for name in DIRECT.iter() {
        let (next, spans) = Pass::new(&text, name, Wrap::Argument).run(&converted);
        text = next;
        converted = spans;
    }
    for name in INVERSE.iter() {
        text = Pass::new(&text, name, Wrap::Call).run(&[]).0;
    }

    tracing::debug!(expression, rewritten = %text, "degree mode rewrite");
    text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wrap {
    /// name(x) => name(radians(x))
    Argument,
    /// name(x) => degrees(name(x))
    Call,
}

/// A single left to right scan for one function name
struct Pass<'a> {
    text: &'a str,
    name: &'a str,
    wrap: Wrap,
    output: String,
    /// Byte ranges of `output` holding converted arguments
    spans: Vec<Range<usize>>,
}

impl<'a> Pass<'a> {
    fn new(text: &'a str, name: &'a str, wrap: Wrap) -> Self {
        Pass {
            text,
            name,
            wrap,
            output: String::with_capacity(text.len() + 16),
            spans: Vec::new(),
        }
    }

    /// Run the scan, copying the `skip` ranges of the input verbatim.
    /// Returns the rewritten text and the ranges of converted arguments in
    /// it.
    fn run(mut self, skip: &[Range<usize>]) -> (String, Vec<Range<usize>>) {
        let text = self.text;
        let mut skip = skip.iter().peekable();
        let mut i = 0;
        while i < text.len() {
            while skip.next_if(|range| range.end <= i).is_some() {}
            if let Some(range) = skip.next_if(|range| range.start == i) {
                let start = self.output.len();
                self.output.push_str(&text[range.clone()]);
                self.spans.push(start..self.output.len());
                i = range.end;
                continue;
            }
            i = self.step(i);
        }
        (self.output, self.spans)
    }

    /// Handle the input at byte `i`, returning the position of the next
    /// byte to handle.
    fn step(&mut self, i: usize) -> usize {
        let text = self.text;
        let name = self.name;
        if text[i..].starts_with(name) {
            let before = text[..i].chars().next_back();
            // inverse functions are handled by their own passes
            if self.wrap == Wrap::Argument && before == Some('a') {
                self.output.push_str(name);
                return i + name.len();
            }
            if !before.map_or(false, char::is_alphabetic) {
                let open = i + name.len();
                if text.as_bytes().get(open) == Some(&b'(') {
                    let close = matching_paren(text, open);
                    self.emit(&text[open + 1..close]);
                    return close + 1;
                }
            }
        }
        let c = match text[i..].chars().next() {
            Some(c) => c,
            None => return text.len(),
        };
        self.output.push(c);
        i + c.len_utf8()
    }

    fn emit(&mut self, argument: &str) {
        match self.wrap {
            Wrap::Argument => {
                self.output.push_str(self.name);
                self.output.push_str("(radians(");
                let start = self.output.len();
                self.output.push_str(argument);
                self.spans.push(start..self.output.len());
                self.output.push_str("))");
            }
            Wrap::Call => {
                self.output.push_str("degrees(");
                self.output.push_str(self.name);
                self.output.push('(');
                self.output.push_str(argument);
                self.output.push_str("))");
            }
        }
    }
}

/// Find the parenthesis closing the one at byte `open`, or the end of the
/// text if there is none.
fn matching_paren(text: &str, open: usize) -> usize {
    let mut depth = 0_usize;
    for (offset, byte) in text.as_bytes()[open..].iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return open + offset;
                }
            }
            _ => {}
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::{rewrite, AngleMode};
    use test_case::test_case;

    #[test_case("sin(30)" => "sin(radians(30))" ; "sine")]
    #[test_case("cos(60)" => "cos(radians(60))" ; "cosine")]
    #[test_case("tan(45)" => "tan(radians(45))" ; "tangent")]
    #[test_case("asin(0.5)" => "degrees(asin(0.5))" ; "arcsine")]
    #[test_case("acos(1)" => "degrees(acos(1))" ; "arccosine")]
    #[test_case("atan(1)" => "degrees(atan(1))" ; "arctangent")]
    #[test_case("asin(1)" => "degrees(asin(1))" ; "inverse names are not corrupted")]
    #[test_case("sin(cos(0)+1)" => "sin(radians(cos(0)+1))" ; "nested call stays in the argument")]
    #[test_case("sin((1+2)*3)" => "sin(radians((1+2)*3))" ; "nested parenthesis")]
    #[test_case("sin(30)+cos(60)" => "sin(radians(30))+cos(radians(60))" ; "several calls")]
    #[test_case("2*sin(30)*sin(30)" => "2*sin(radians(30))*sin(radians(30))" ; "repeated calls")]
    #[test_case("sin(asin(0.5))" => "sin(radians(degrees(asin(0.5))))" ; "inverse inside direct")]
    #[test_case("asin(sin(30))" => "degrees(asin(sin(radians(30))))" ; "direct inside inverse")]
    #[test_case("cos(sin(30))" => "cos(radians(sin(radians(30))))" ; "sine converted before cosine")]
    #[test_case("sin(tan(30))" => "sin(radians(tan(30)))" ; "tangent inside converted sine argument")]
    #[test_case("tan(sin(30))" => "tan(radians(sin(radians(30))))" ; "sine inside tangent is converted first")]
    #[test_case("sinh(1) + cosh(1)" => "sinh(1) + cosh(1)" ; "hyperbolic functions are untouched")]
    #[test_case("asinh(1)" => "asinh(1)" ; "inverse hyperbolic is untouched")]
    #[test_case("xsin(1)" => "xsin(1)" ; "longer identifier")]
    #[test_case("sin + 1" => "sin + 1" ; "bare name")]
    #[test_case("sin (30)" => "sin (30)" ; "name must touch the parenthesis")]
    #[test_case("2sin(30)" => "2sin(radians(30))" ; "digit before name")]
    #[test_case("sin(30" => "sin(radians(30))" ; "unbalanced input runs to the end")]
    #[test_case("asin(0.5" => "degrees(asin(0.5))" ; "unbalanced inverse")]
    #[test_case("sin()" => "sin(radians())" ; "empty argument")]
    #[test_case("π*sin(30)" => "π*sin(radians(30))" ; "non ascii text")]
    #[test_case("" => "" ; "empty input")]
    fn degrees(input: &str) -> String {
        rewrite(input, true)
    }

    #[test_case("sin(30)" ; "sine")]
    #[test_case("asin(0.5)" ; "arcsine")]
    #[test_case("sin(cos(" ; "garbage")]
    fn radians_mode_is_identity(input: &str) {
        assert_eq!(rewrite(input, false), input);
        assert_eq!(AngleMode::Radians.rewrite(input), input);
    }

    #[test]
    fn mode() {
        assert_eq!(AngleMode::default(), AngleMode::Degrees);
        assert_eq!(AngleMode::Degrees.toggle(), AngleMode::Radians);
        assert_eq!(AngleMode::Radians.toggle(), AngleMode::Degrees);
        assert_eq!(AngleMode::Degrees.to_string(), "DEG");
        assert_eq!(AngleMode::Radians.to_string(), "RAD");
        assert_eq!("deg".parse::<AngleMode>(), Ok(AngleMode::Degrees));
        assert_eq!("Radians".parse::<AngleMode>(), Ok(AngleMode::Radians));
        assert!("grad".parse::<AngleMode>().is_err());
        assert_eq!(
            AngleMode::Degrees.rewrite("tan(45)"),
            "tan(radians(45))"
        );
    }
}
