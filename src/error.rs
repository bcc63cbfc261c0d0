/// Error type for the sciculator crate
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Error while parsing an expression
    #[error("ParseError: {0}")]
    Parse(String),
    /// Identifier not present in the constant table
    #[error("NameError: name '{0}' is not defined")]
    UnknownName(String),
    /// Call target not present in the function table
    #[error("NameError: unknown function '{0}'")]
    UnknownFunction(String),
    /// A known function called with the wrong number of arguments
    #[error("TypeError: {name}() takes {expected} argument(s) ({got} given)")]
    Arity {
        /// Name of the called function
        name: String,
        /// Human readable expected argument count
        expected: &'static str,
        /// Number of arguments actually given
        got: usize,
    },
    /// Operator recognised by the grammar but absent from the operator table
    #[error("UnsupportedOperator: {0}")]
    UnsupportedOperator(String),
    /// Division or modulo by zero
    #[error("ZeroDivisionError: {0}")]
    DivisionByZero(String),
    /// Operation undefined for its operands
    #[error("MathError: {0}")]
    Domain(String),
    /// Result too large to be represented
    #[error("OverflowError: {0}")]
    Overflow(String),
}

/// Coarse classification of an [`Error`], for callers choosing how to
/// report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not a valid expression
    Parse,
    /// Name resolution or call shape failed
    Name,
    /// A numeric operation is undefined (zero division, domain, overflow)
    Math,
}

impl Error {
    /// Get the [`ErrorKind`] of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Self::Parse(_) => ErrorKind::Parse,
            Self::UnknownName(_)
            | Self::UnknownFunction(_)
            | Self::Arity { .. }
            | Self::UnsupportedOperator(_) => ErrorKind::Name,
            Self::DivisionByZero(_) | Self::Domain(_) | Self::Overflow(_) => ErrorKind::Math,
        }
    }

    /// Check if this error comes from an undefined numeric operation
    #[must_use]
    pub fn is_math(&self) -> bool {
        self.kind() == ErrorKind::Math
    }

    pub(crate) fn domain() -> Self {
        Self::Domain("math domain error".into())
    }

    pub(crate) fn range() -> Self {
        Self::Overflow("math range error".into())
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};
    use test_case::test_case;

    #[test_case(Error::Parse("x".into()) => ErrorKind::Parse)]
    #[test_case(Error::UnknownName("x".into()) => ErrorKind::Name)]
    #[test_case(Error::UnsupportedOperator("^".into()) => ErrorKind::Name)]
    #[test_case(Error::DivisionByZero("division by zero".into()) => ErrorKind::Math)]
    #[test_case(Error::domain() => ErrorKind::Math)]
    #[test_case(Error::range() => ErrorKind::Math)]
    fn kind(error: Error) -> ErrorKind {
        error.kind()
    }

    #[test]
    fn messages() {
        assert_eq!(
            Error::UnknownName("xyz".into()).to_string(),
            "NameError: name 'xyz' is not defined"
        );
        let arity = Error::Arity {
            name: "sin".into(),
            expected: "exactly 1",
            got: 2,
        };
        assert_eq!(
            arity.to_string(),
            "TypeError: sin() takes exactly 1 argument(s) (2 given)"
        );
    }
}
