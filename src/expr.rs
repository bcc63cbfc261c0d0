use crate::ast::Ast;
use crate::lexer::Lexer;
use crate::ops;
use crate::parser;
use crate::util::{ANS, CONSTANTS, FUNCTIONS};
use crate::Error;

/// Evaluate a single expression from `input`, with `ans` bound to zero.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(cause)` if
/// parsing or evaluating the expression failed.
///
/// # Example
///
/// ```
/// # use sciculator::eval;
/// assert_eq!(eval("45 - 2**3"), Ok(37.0));
/// assert_eq!(eval("7 // 2 + 7 % 2"), Ok(4.0));
/// assert!(eval("1 / 0").is_err());
/// ```
pub fn eval(input: &str) -> Result<f64, Error> {
    Expr::parse(input).and_then(|expr| expr.eval(0.0))
}

/// A parsed mathematical expression.
///
/// # Examples
/// ```
/// # use sciculator::Expr;
/// let expr = Expr::parse("3 + 5 * 2").unwrap();
/// assert_eq!(expr.eval(0.0), Ok(13.0));
///
/// let expr = Expr::parse("-2 * ans").unwrap();
/// assert_eq!(expr.eval(42.0), Ok(-84.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    ast: Ast,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// Names are not resolved here: an unknown constant or function is only
    /// reported by [`Expr::eval`].
    ///
    /// # Examples
    /// ```
    /// # use sciculator::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("3 + 5 * 2").is_ok());
    /// assert!(Expr::parse("foo(1)").is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("3eff + 5 * 2").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, Error> {
        let tokens = Lexer::new(expression).tokenize()?;
        let ast = parser::parse(tokens)?;
        tracing::trace!(nodes = ast.size(), "parsed expression");
        Ok(Self { ast })
    }

    /// Evaluate the expression, `ans` resolving to `last_answer`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use sciculator::{Error, Expr};
    /// let expr = Expr::parse("ans * 2").unwrap();
    /// assert_eq!(expr.eval(-5.0), Ok(-10.0));
    ///
    /// let expr = Expr::parse("sqrt(-1)").unwrap();
    /// assert!(matches!(expr.eval(0.0), Err(Error::Domain(_))));
    /// ```
    pub fn eval(&self, last_answer: f64) -> Result<f64, Error> {
        Self::inner_eval(&self.ast, last_answer)
    }

    /// Get the parsed syntax tree
    #[must_use]
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    fn inner_eval(ast: &Ast, last_answer: f64) -> Result<f64, Error> {
        match *ast {
            Ast::Number(number) => Ok(number),
            Ast::Identifier(ref name) => {
                if name == ANS {
                    return Ok(last_answer);
                }
                CONSTANTS
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| Error::UnknownName(name.clone()))
            }
            Ast::Unary(op, ref operand) => ops::unary(op, Self::inner_eval(operand, last_answer)?),
            Ast::Binary(op, ref left, ref right) => {
                let left = Self::inner_eval(left, last_answer)?;
                let right = Self::inner_eval(right, last_answer)?;
                ops::binary(op, left, right)
            }
            Ast::Call(ref name, ref args) => {
                let function = FUNCTIONS
                    .get(name.as_str())
                    .copied()
                    .ok_or_else(|| Error::UnknownFunction(name.clone()))?;
                let args = args
                    .iter()
                    .map(|arg| Self::inner_eval(arg, last_answer))
                    .collect::<Result<Vec<_>, _>>()?;
                function.call(name, &args)
            }
        }
    }
}

/// Expression evaluator remembering its last result.
///
/// The result of every successful [`Evaluator::evaluate`] call is stored and
/// available to the following expressions under the name `ans`. Failed
/// evaluations leave it untouched.
///
/// # Examples
/// ```
/// # use sciculator::Evaluator;
/// let mut evaluator = Evaluator::new();
/// assert_eq!(evaluator.evaluate("2 + 2"), Ok(4.0));
/// assert_eq!(evaluator.evaluate("ans * 10"), Ok(40.0));
///
/// assert!(evaluator.evaluate("1 / 0").is_err());
/// assert_eq!(evaluator.last_answer(), 40.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluator {
    last_answer: f64,
}

impl Evaluator {
    /// Create an evaluator, with `ans` set to zero
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Evaluate `expression`, and store the result as the new `ans` if
    /// the evaluation succeeded.
    pub fn evaluate(&mut self, expression: &str) -> Result<f64, Error> {
        match self.evaluate_pure(expression) {
            Ok(value) => {
                tracing::debug!(expression, value, "evaluated");
                self.last_answer = value;
                Ok(value)
            }
            Err(err) => {
                tracing::debug!(expression, error = %err, "evaluation rejected");
                Err(err)
            }
        }
    }

    /// Evaluate `expression` without updating `ans`
    pub fn evaluate_pure(&self, expression: &str) -> Result<f64, Error> {
        Expr::parse(expression)?.eval(self.last_answer)
    }

    /// Result of the last successful evaluation, or zero
    #[must_use]
    pub fn last_answer(&self) -> f64 {
        self.last_answer
    }
}
