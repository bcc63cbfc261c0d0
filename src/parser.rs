use crate::ast::{Ast, BinaryOp, UnaryOp};
use crate::error::Error;
use crate::token::{Op, Token};
use std::iter::Peekable;
use std::vec::IntoIter;

/// Build the AST for a sequence of tokens.
pub fn parse(tokens: Vec<Token>) -> Result<Ast, Error> {
    Parser::new(tokens).parse()
}

/// Precedence climbing parser over the lexer output.
///
/// The grammar, from lowest to highest precedence:
///
/// ```text
/// expression := unary (binary-op unary)*
/// unary      := ('+' | '-' | '~') unary | power
/// power      := primary ('**' unary)?
/// primary    := number | identifier | identifier '(' args ')' | '(' expression ')'
/// ```
struct Parser {
    tokens: Peekable<IntoIter<Token>>,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens: tokens.into_iter().peekable(),
        }
    }

    fn parse(mut self) -> Result<Ast, Error> {
        if self.tokens.peek().is_none() {
            return Err(Error::Parse("empty expression".into()));
        }
        let ast = self.expression(0)?;
        match self.tokens.next() {
            None => Ok(ast),
            Some(token) => Err(unexpected(Some(&token))),
        }
    }

    fn expression(&mut self, min_precedence: u8) -> Result<Ast, Error> {
        let mut left = self.unary()?;
        while let Some(&Token::Op(op)) = self.tokens.peek() {
            let precedence = match op.precedence() {
                Some(precedence) if precedence >= min_precedence => precedence,
                _ => break,
            };
            let binary = match BinaryOp::from_op(op) {
                Some(binary) => binary,
                None => break,
            };
            self.tokens.next();
            let next_precedence = if op.is_left_associative() {
                precedence + 1
            } else {
                precedence
            };
            let right = self.expression(next_precedence)?;
            left = Ast::Binary(binary, Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<Ast, Error> {
        if let Some(&Token::Op(op)) = self.tokens.peek() {
            if let Some(unary) = UnaryOp::from_op(op) {
                self.tokens.next();
                let operand = self.unary()?;
                return Ok(Ast::Unary(unary, Box::new(operand)));
            }
        }
        self.power()
    }

    fn power(&mut self) -> Result<Ast, Error> {
        let base = self.primary()?;
        if self.tokens.next_if_eq(&Token::Op(Op::Pow)).is_some() {
            // right associative, and the exponent may carry its own sign
            let exponent = self.unary()?;
            return Ok(Ast::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Ast, Error> {
        let ast = match self.tokens.next() {
            Some(Token::Number(value)) => Ast::Number(value),
            Some(Token::Ident(name)) => {
                if self.tokens.next_if_eq(&Token::LParen).is_some() {
                    let args = self.arguments()?;
                    Ast::Call(name, args)
                } else {
                    return Ok(Ast::Identifier(name));
                }
            }
            Some(Token::LParen) => {
                let inner = self.expression(0)?;
                if self.tokens.next_if_eq(&Token::RParen).is_none() {
                    return Err(match self.tokens.peek() {
                        None => Error::Parse("mismatched parenthesis".into()),
                        token => unexpected(token),
                    });
                }
                inner
            }
            token => return Err(unexpected(token.as_ref())),
        };
        if self.tokens.peek() == Some(&Token::LParen) {
            return Err(Error::Parse(
                "only simple function calls are supported".into(),
            ));
        }
        Ok(ast)
    }

    /// Parse a comma separated argument list, the opening parenthesis being
    /// already consumed.
    fn arguments(&mut self) -> Result<Vec<Ast>, Error> {
        let mut args = Vec::new();
        if self.tokens.next_if_eq(&Token::RParen).is_some() {
            return Ok(args);
        }
        loop {
            args.push(self.expression(0)?);
            match self.tokens.next() {
                Some(Token::RParen) => break,
                Some(Token::Comma) => {
                    if self.tokens.next_if_eq(&Token::RParen).is_some() {
                        break;
                    }
                }
                None => return Err(Error::Parse("mismatched parenthesis".into())),
                token => return Err(unexpected(token.as_ref())),
            }
        }
        Ok(args)
    }
}

fn unexpected(token: Option<&Token>) -> Error {
    let message = match token {
        None => "unexpected end of expression".to_string(),
        Some(Token::Number(value)) => format!("unexpected number {}", value),
        Some(Token::Ident(name)) => format!("unexpected name '{}'", name),
        Some(Token::Op(op)) => format!("unexpected operator '{}'", op.symbol()),
        Some(Token::LParen) => "unexpected '('".to_string(),
        Some(Token::RParen) => "unexpected ')'".to_string(),
        Some(Token::Comma) => "unexpected ','".to_string(),
    };
    Error::Parse(message)
}

#[cfg(test)]
mod tests {
    use super::parse;
    use crate::ast::{Ast, BinaryOp, UnaryOp};
    use crate::error::Error;
    use crate::lexer::Lexer;
    use test_case::test_case;

    fn ast(input: &str) -> Result<Ast, Error> {
        parse(Lexer::new(input).tokenize()?)
    }

    fn num(value: f64) -> Box<Ast> {
        Box::new(Ast::Number(value))
    }

    #[test]
    fn precedence() {
        assert_eq!(
            ast("2+3*4"),
            Ok(Ast::Binary(
                BinaryOp::Add,
                num(2.0),
                Box::new(Ast::Binary(BinaryOp::Mul, num(3.0), num(4.0)))
            ))
        );
        assert_eq!(
            ast("8-3-2"),
            Ok(Ast::Binary(
                BinaryOp::Sub,
                Box::new(Ast::Binary(BinaryOp::Sub, num(8.0), num(3.0))),
                num(2.0)
            ))
        );
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(
            ast("2**3**2"),
            Ok(Ast::Binary(
                BinaryOp::Pow,
                num(2.0),
                Box::new(Ast::Binary(BinaryOp::Pow, num(3.0), num(2.0)))
            ))
        );
    }

    #[test]
    fn unary_binds_looser_than_power() {
        assert_eq!(
            ast("-2**2"),
            Ok(Ast::Unary(
                UnaryOp::Negate,
                Box::new(Ast::Binary(BinaryOp::Pow, num(2.0), num(2.0)))
            ))
        );
        assert_eq!(
            ast("2**-1"),
            Ok(Ast::Binary(
                BinaryOp::Pow,
                num(2.0),
                Box::new(Ast::Unary(UnaryOp::Negate, num(1.0)))
            ))
        );
        assert_eq!(
            ast("-2*3"),
            Ok(Ast::Binary(
                BinaryOp::Mul,
                Box::new(Ast::Unary(UnaryOp::Negate, num(2.0))),
                num(3.0)
            ))
        );
    }

    #[test]
    fn calls() {
        assert_eq!(
            ast("round(pi, 2)"),
            Ok(Ast::Call(
                "round".into(),
                vec![Ast::Identifier("pi".into()), Ast::Number(2.0)]
            ))
        );
        assert_eq!(ast("f()"), Ok(Ast::Call("f".into(), vec![])));
        assert_eq!(
            ast("round(2.5,)"),
            Ok(Ast::Call("round".into(), vec![Ast::Number(2.5)]))
        );
    }

    #[test]
    fn bitwise_operators_are_parsed() {
        assert_eq!(
            ast("1 | 2 ^ 3"),
            Ok(Ast::Binary(
                BinaryOp::BitOr,
                num(1.0),
                Box::new(Ast::Binary(BinaryOp::BitXor, num(2.0), num(3.0)))
            ))
        );
        assert_eq!(ast("~1"), Ok(Ast::Unary(UnaryOp::Invert, num(1.0))));
    }

    #[test_case("" ; "empty input")]
    #[test_case("   " ; "blank input")]
    #[test_case("(1 + 2" ; "unclosed parenthesis")]
    #[test_case("1 + 2)" ; "unopened parenthesis")]
    #[test_case("1 +" ; "missing operand")]
    #[test_case("* 2" ; "leading binary operator")]
    #[test_case("2 3" ; "adjacent numbers")]
    #[test_case("(2)(3)" ; "call on parenthesized expression")]
    #[test_case("2(3)" ; "call on number")]
    #[test_case("sin(1)(2)" ; "chained call")]
    #[test_case("sin(1 2)" ; "missing comma")]
    #[test_case("sin(,)" ; "lonely comma")]
    #[test_case("sin(1" ; "unclosed call")]
    #[test_case("1 ~ 2" ; "invert in infix position")]
    fn invalid(input: &str) {
        assert!(matches!(ast(input), Err(Error::Parse(_))));
    }
}
