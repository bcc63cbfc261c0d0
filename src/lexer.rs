use crate::error::Error;
use crate::token::{Op, Token};
use std::iter::Peekable;
use std::str::Chars;

#[must_use]
/// Check if `ident` is a valid identifier name
///
/// # Examples
///
/// ```
/// # use sciculator::is_identifier;
///
/// assert_eq!(is_identifier("__abc3"), true);
/// assert_eq!(is_identifier("34zb"), false);
/// ```
pub fn is_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    // Check first char
    if !chars.next().map_or(false, is_identifier_start) {
        return false;
    }
    // Check all others
    for c in chars {
        if !is_identifier_part(c) {
            return false;
        }
    }
    return true;
}

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(string: &str) -> Lexer<'_> {
        Lexer {
            input: string.chars().peekable(),
        }
    }

    /// Split the whole input in tokens
    pub fn tokenize(mut self) -> Result<Vec<Token>, Error> {
        let mut output = Vec::new();
        while let Some(token) = self.next_token()? {
            output.push(token);
        }
        tracing::trace!(count = output.len(), "tokenized expression");
        Ok(output)
    }

    fn next_token(&mut self) -> Result<Option<Token>, Error> {
        if let Some(c) = self.input.next() {
            let token = match c {
                ' ' | '\t' | '\n' | '\r' => return self.next_token(),
                c if c.is_ascii_digit() => self.number(c)?,
                '.' => {
                    if self.input.peek().map_or(false, char::is_ascii_digit) {
                        self.number(c)?
                    } else {
                        return Err(Error::Parse("invalid syntax: unexpected '.'".into()));
                    }
                }
                c if is_identifier_start(c) => {
                    let mut ident = String::new();
                    ident.push(c);
                    'ident: while let Some(&c) = self.input.peek() {
                        if is_identifier_part(c) {
                            self.input.next();
                            ident.push(c);
                        } else {
                            break 'ident;
                        }
                    }
                    Token::Ident(ident)
                }
                '+' => Token::Op(Op::Plus),
                '-' => Token::Op(Op::Minus),
                '*' => self.doubled('*', Op::Mul, Op::Pow),
                '/' => self.doubled('/', Op::Div, Op::FloorDiv),
                '%' => Token::Op(Op::Mod),
                '|' => Token::Op(Op::BitOr),
                '^' => Token::Op(Op::BitXor),
                '&' => Token::Op(Op::BitAnd),
                '~' => Token::Op(Op::Invert),
                '<' | '>' => {
                    if self.input.next_if_eq(&c).is_none() {
                        return Err(Error::Parse(format!(
                            "comparisons are not supported: '{}'",
                            c
                        )));
                    }
                    Token::Op(if c == '<' { Op::Shl } else { Op::Shr })
                }
                '(' => Token::LParen,
                ')' => Token::RParen,
                ',' => Token::Comma,
                '"' | '\'' => {
                    return Err(Error::Parse(
                        "unsupported literal: strings are not supported".into(),
                    ));
                }
                other => {
                    return Err(Error::Parse(format!(
                        "unexpected character in input: {}",
                        other
                    )));
                }
            };
            Ok(Some(token))
        } else {
            Ok(None)
        }
    }

    /// Lex `single`, or `double` if the next char is `c` again
    fn doubled(&mut self, c: char, single: Op, double: Op) -> Token {
        if self.input.next_if_eq(&c).is_some() {
            Token::Op(double)
        } else {
            Token::Op(single)
        }
    }

    fn number(&mut self, first: char) -> Result<Token, Error> {
        if first == '0' {
            let radix = match self.input.peek() {
                Some('x') | Some('X') => Some((16, "hexadecimal")),
                Some('o') | Some('O') => Some((8, "octal")),
                Some('b') | Some('B') => Some((2, "binary")),
                _ => None,
            };
            if let Some((radix, name)) = radix {
                self.input.next();
                return self.radix_number(radix, name);
            }
        }

        let mut integer = String::new();
        let mut fraction = String::new();
        let mut exponent = String::new();
        let mut is_float = first == '.';

        if first == '.' {
            self.digits(&mut fraction)?;
        } else {
            integer.push(first);
            self.digits(&mut integer)?;
            if self.input.next_if_eq(&'.').is_some() {
                is_float = true;
                if self.input.peek().map_or(false, char::is_ascii_digit) {
                    self.digits(&mut fraction)?;
                }
            }
        }

        if let Some(e) = self.input.next_if(|&c| c == 'e' || c == 'E') {
            is_float = true;
            if let Some(sign) = self.input.next_if(|&c| c == '+' || c == '-') {
                exponent.push(sign);
            }
            if !self.input.peek().map_or(false, char::is_ascii_digit) {
                return Err(Error::Parse(format!(
                    "invalid decimal literal: missing digits after '{}'",
                    e
                )));
            }
            self.digits(&mut exponent)?;
        }

        let leading_zero = integer.len() > 1 && integer.starts_with('0');
        if !is_float && leading_zero && integer.contains(|c: char| c != '0') {
            return Err(Error::Parse(format!(
                "leading zeros in decimal integer literals are not permitted: {}",
                integer
            )));
        }
        self.check_literal_end()?;

        let text = format!(
            "{}.{}e{}",
            if integer.is_empty() { "0" } else { &integer },
            if fraction.is_empty() { "0" } else { &fraction },
            if exponent.is_empty() { "0" } else { &exponent },
        );
        text.parse()
            .map(Token::Number)
            .map_err(|_| Error::Parse(format!("invalid decimal literal: {}", text)))
    }

    /// Lex the digits of an integer literal written with a `0x`, `0o` or
    /// `0b` prefix, which has already been consumed.
    fn radix_number(&mut self, radix: u32, name: &str) -> Result<Token, Error> {
        let mut value = 0.0_f64;
        let mut count = 0;
        let mut last_underscore = false;
        while let Some(c) = self.input.next_if(|&c| c.is_ascii_alphanumeric() || c == '_') {
            if c == '_' {
                if last_underscore {
                    return Err(Error::Parse(format!("invalid {} literal", name)));
                }
                last_underscore = true;
                continue;
            }
            last_underscore = false;
            let digit = c
                .to_digit(radix)
                .ok_or_else(|| Error::Parse(format!("invalid digit '{}' in {} literal", c, name)))?;
            value = value * f64::from(radix) + f64::from(digit);
            count += 1;
        }
        if count == 0 || last_underscore {
            return Err(Error::Parse(format!("invalid {} literal", name)));
        }
        Ok(Token::Number(value))
    }

    /// Consume a run of decimal digits, with single `_` separators between
    /// them, pushing the digits to `buffer`.
    fn digits(&mut self, buffer: &mut String) -> Result<(), Error> {
        while let Some(&c) = self.input.peek() {
            if c.is_ascii_digit() {
                buffer.push(c);
                self.input.next();
            } else if c == '_' {
                self.input.next();
                if !self.input.peek().map_or(false, char::is_ascii_digit) {
                    return Err(Error::Parse("invalid decimal literal".into()));
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    /// A number can not be directly followed by an identifier
    fn check_literal_end(&mut self) -> Result<(), Error> {
        match self.input.peek() {
            Some('j') | Some('J') => Err(Error::Parse(
                "unsupported literal: complex numbers are not supported".into(),
            )),
            Some(&c) if is_identifier_part(c) => {
                Err(Error::Parse("invalid decimal literal".into()))
            }
            _ => Ok(()),
        }
    }
}

/// Check if `c` can appear at the first character of an identifier
fn is_identifier_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

/// Check if `c` can appear inside an identifier
fn is_identifier_part(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Op, Token};
    use test_case::test_case;

    #[test_case("2 + 2" => Ok(vec![Token::Number(2.0), Token::Op(Op::Plus), Token::Number(2.0)]) ; "addition is lexed properly")]
    #[test_case("2+2" => Ok(vec![Token::Number(2.0), Token::Op(Op::Plus), Token::Number(2.0)]) ; "spaces are optional")]
    #[test_case("2**-1" => Ok(vec![Token::Number(2.0), Token::Op(Op::Pow), Token::Op(Op::Minus), Token::Number(1.0)]) ; "power and sign")]
    #[test_case("7//2%3" => Ok(vec![Token::Number(7.0), Token::Op(Op::FloorDiv), Token::Number(2.0), Token::Op(Op::Mod), Token::Number(3.0)]) ; "floor division and modulo")]
    #[test_case("round(x, 2)" => Ok(vec![Token::Ident("round".into()), Token::LParen, Token::Ident("x".into()), Token::Comma, Token::Number(2.0), Token::RParen]) ; "call with arguments")]
    #[test_case("1 << 2 >> 3" => Ok(vec![Token::Number(1.0), Token::Op(Op::Shl), Token::Number(2.0), Token::Op(Op::Shr), Token::Number(3.0)]) ; "shifts")]
    fn tokenize(equation: &str) -> Result<Vec<Token>, Error> {
        Lexer::new(equation).tokenize()
    }

    #[test_case("42" => 42.0)]
    #[test_case("1.5" => 1.5)]
    #[test_case(".5" => 0.5)]
    #[test_case("5." => 5.0)]
    #[test_case("1e3" => 1000.0)]
    #[test_case("2.5E-2" => 0.025)]
    #[test_case("1.e1" => 10.0)]
    #[test_case("1_000" => 1000.0)]
    #[test_case("0x1f" => 31.0)]
    #[test_case("0o17" => 15.0)]
    #[test_case("0b101" => 5.0)]
    #[test_case("0X_FF" => 255.0)]
    #[test_case("00" => 0.0)]
    #[test_case("012.5" => 12.5)]
    fn numbers(input: &str) -> f64 {
        match Lexer::new(input).tokenize().unwrap().as_slice() {
            [Token::Number(value)] => *value,
            other => panic!("expected a single number, got {:?}", other),
        }
    }

    #[test_case("1j" ; "complex literal")]
    #[test_case("'a'" ; "string literal")]
    #[test_case("2x" ; "identifier glued to number")]
    #[test_case("1e" ; "empty exponent")]
    #[test_case("1__0" ; "double underscore")]
    #[test_case("1_" ; "trailing underscore")]
    #[test_case("012" ; "leading zero")]
    #[test_case("0x" ; "empty hexadecimal")]
    #[test_case("0b102" ; "bad binary digit")]
    #[test_case("1 < 2" ; "comparison")]
    #[test_case("3 $ 4" ; "unknown character")]
    #[test_case(". 5" ; "lonely dot")]
    fn invalid(input: &str) {
        assert!(matches!(Lexer::new(input).tokenize(), Err(Error::Parse(_))));
    }

    #[test]
    fn idents() {
        let identifier_starts = ['c', 'Z', '_', 'f'];
        for c in &identifier_starts {
            assert!(is_identifier_start(*c));
        }

        let non_identifier_starts = ['3', 'à', '@', ']', '[', '.'];
        for c in &non_identifier_starts {
            assert!(!is_identifier_start(*c));
        }

        let identifier_parts = ['c', 'Z', '_', 'f', '3'];
        for c in &identifier_parts {
            assert!(is_identifier_part(*c));
        }

        let non_identifier_parts = ['à', '@', '{', '}', '(', ')', '?', '&', '$', '.', '['];
        for c in &non_identifier_parts {
            assert!(!is_identifier_part(*c));
        }

        let identifiers = ["_______", "abc", "log2", "a__45__bc", "ans"];
        for v in &identifiers {
            assert!(is_identifier(v));
        }

        let non_identifiers = ["a-bc", "@bc", "6bc", "ab.c", ""];
        for nv in &non_identifiers {
            assert!(!is_identifier(nv));
        }
    }
}
