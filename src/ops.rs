//! The operator table: numeric meaning of every operator the evaluator
//! supports. Operators the parser knows but this table does not are
//! reported as [`Error::UnsupportedOperator`].

use crate::ast::{BinaryOp, UnaryOp};
use crate::error::Error;

/// Apply a prefix operator
pub fn unary(op: UnaryOp, operand: f64) -> Result<f64, Error> {
    match op {
        UnaryOp::Negate => Ok(-operand),
        UnaryOp::Identity => Ok(operand),
        UnaryOp::Invert => Err(unsupported(op.symbol())),
    }
}

/// Apply an infix operator
pub fn binary(op: BinaryOp, left: f64, right: f64) -> Result<f64, Error> {
    match op {
        BinaryOp::Add => Ok(left + right),
        BinaryOp::Sub => Ok(left - right),
        BinaryOp::Mul => Ok(left * right),
        BinaryOp::Div => {
            if right == 0.0 {
                return Err(Error::DivisionByZero("float division by zero".into()));
            }
            Ok(left / right)
        }
        BinaryOp::Mod => {
            if right == 0.0 {
                return Err(Error::DivisionByZero("float modulo by zero".into()));
            }
            Ok(divmod(left, right).1)
        }
        BinaryOp::FloorDiv => {
            if right == 0.0 {
                return Err(Error::DivisionByZero(
                    "float floor division by zero".into(),
                ));
            }
            Ok(divmod(left, right).0)
        }
        BinaryOp::Pow => pow(left, right),
        BinaryOp::BitOr
        | BinaryOp::BitXor
        | BinaryOp::BitAnd
        | BinaryOp::Shl
        | BinaryOp::Shr => Err(unsupported(op.symbol())),
    }
}

fn unsupported(symbol: &str) -> Error {
    Error::UnsupportedOperator(format!("unsupported operator '{}'", symbol))
}

/// Floored division and the matching modulo: the quotient rounds toward
/// negative infinity and the remainder takes the sign of the divisor.
/// `right` must not be zero.
fn divmod(left: f64, right: f64) -> (f64, f64) {
    let mut modulo = libm::fmod(left, right);
    let mut div = (left - modulo) / right;
    if modulo == 0.0 {
        modulo = libm::copysign(0.0, right);
    } else if (right < 0.0) != (modulo < 0.0) {
        modulo += right;
        div -= 1.0;
    }

    let quotient = if div == 0.0 {
        libm::copysign(0.0, left / right)
    } else {
        let mut floored = libm::floor(div);
        if div - floored > 0.5 {
            floored += 1.0;
        }
        floored
    };
    (quotient, modulo)
}

fn pow(base: f64, exponent: f64) -> Result<f64, Error> {
    if base == 0.0 && exponent < 0.0 {
        return Err(Error::DivisionByZero(
            "0.0 cannot be raised to a negative power".into(),
        ));
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        return Err(Error::Domain(
            "negative number cannot be raised to a fractional power".into(),
        ));
    }
    let result = base.powf(exponent);
    if result.is_infinite() && base.is_finite() && exponent.is_finite() {
        return Err(Error::Overflow("numerical result out of range".into()));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::{binary, unary};
    use crate::ast::{BinaryOp, UnaryOp};
    use crate::error::Error;
    use test_case::test_case;

    #[test_case(BinaryOp::Add, 2.0, 3.0 => Ok(5.0) ; "addition")]
    #[test_case(BinaryOp::Sub, 2.0, 3.0 => Ok(-1.0) ; "subtraction")]
    #[test_case(BinaryOp::Mul, 2.0, 3.0 => Ok(6.0) ; "multiplication")]
    #[test_case(BinaryOp::Div, 3.0, 2.0 => Ok(1.5) ; "true division")]
    #[test_case(BinaryOp::Pow, 2.0, 10.0 => Ok(1024.0) ; "power")]
    #[test_case(BinaryOp::Pow, 2.0, -1.0 => Ok(0.5) ; "negative exponent")]
    #[test_case(BinaryOp::Pow, -8.0, 3.0 => Ok(-512.0) ; "negative base integral exponent")]
    #[test_case(BinaryOp::Pow, 0.0, 0.0 => Ok(1.0) ; "zero to the zero")]
    #[test_case(BinaryOp::Mod, 7.0, 3.0 => Ok(1.0) ; "modulo")]
    #[test_case(BinaryOp::Mod, -7.0, 3.0 => Ok(2.0) ; "modulo of negative dividend")]
    #[test_case(BinaryOp::Mod, 7.0, -3.0 => Ok(-2.0) ; "modulo takes sign of divisor")]
    #[test_case(BinaryOp::Mod, 5.5, 2.0 => Ok(1.5) ; "fractional modulo")]
    #[test_case(BinaryOp::FloorDiv, 7.0, 2.0 => Ok(3.0) ; "floor division")]
    #[test_case(BinaryOp::FloorDiv, -7.0, 2.0 => Ok(-4.0) ; "floor division of negative dividend")]
    #[test_case(BinaryOp::FloorDiv, 7.0, -2.0 => Ok(-4.0) ; "floor division by negative divisor")]
    #[test_case(BinaryOp::FloorDiv, 7.5, 2.5 => Ok(3.0) ; "fractional floor division")]
    fn arithmetic(op: BinaryOp, left: f64, right: f64) -> Result<f64, Error> {
        binary(op, left, right)
    }

    #[test]
    fn signed_zeros() {
        let modulo = binary(BinaryOp::Mod, 6.0, -3.0).unwrap();
        assert!(modulo == 0.0 && modulo.is_sign_negative());
        let quotient = binary(BinaryOp::FloorDiv, -1.0, 3.0).unwrap();
        assert_eq!(quotient, -1.0);
        let quotient = binary(BinaryOp::FloorDiv, 1.0, -3.0).unwrap();
        assert_eq!(quotient, -1.0);
        let quotient = binary(BinaryOp::FloorDiv, 0.0, -3.0).unwrap();
        assert!(quotient == 0.0 && quotient.is_sign_negative());
    }

    #[test_case(BinaryOp::Div ; "division")]
    #[test_case(BinaryOp::Mod ; "modulo")]
    #[test_case(BinaryOp::FloorDiv ; "floor division")]
    fn division_by_zero(op: BinaryOp) {
        assert!(matches!(
            binary(op, 1.0, 0.0),
            Err(Error::DivisionByZero(_))
        ));
        assert!(matches!(
            binary(op, 1.0, -0.0),
            Err(Error::DivisionByZero(_))
        ));
    }

    #[test]
    fn power_errors() {
        assert!(matches!(
            binary(BinaryOp::Pow, 0.0, -1.0),
            Err(Error::DivisionByZero(_))
        ));
        assert!(matches!(
            binary(BinaryOp::Pow, -8.0, 1.0 / 3.0),
            Err(Error::Domain(_))
        ));
        assert!(matches!(
            binary(BinaryOp::Pow, 10.0, 400.0),
            Err(Error::Overflow(_))
        ));
        assert_eq!(
            binary(BinaryOp::Pow, f64::INFINITY, 2.0),
            Ok(f64::INFINITY)
        );
    }

    #[test]
    fn infinities_follow_ieee() {
        assert_eq!(
            binary(BinaryOp::Add, f64::INFINITY, 1.0),
            Ok(f64::INFINITY)
        );
        assert!(binary(BinaryOp::Sub, f64::INFINITY, f64::INFINITY)
            .unwrap()
            .is_nan());
        assert_eq!(binary(BinaryOp::Mul, 1e200, 1e200), Ok(f64::INFINITY));
    }

    #[test]
    fn unary_operators() {
        assert_eq!(unary(UnaryOp::Negate, 2.0), Ok(-2.0));
        assert_eq!(unary(UnaryOp::Identity, 2.0), Ok(2.0));
        assert!(matches!(
            unary(UnaryOp::Invert, 2.0),
            Err(Error::UnsupportedOperator(_))
        ));
    }

    #[test_case(BinaryOp::BitOr ; "or")]
    #[test_case(BinaryOp::BitXor ; "xor")]
    #[test_case(BinaryOp::BitAnd ; "and")]
    #[test_case(BinaryOp::Shl ; "left shift")]
    #[test_case(BinaryOp::Shr ; "right shift")]
    fn unsupported_operators(op: BinaryOp) {
        assert_eq!(
            binary(op, 1.0, 2.0),
            Err(Error::UnsupportedOperator(format!(
                "unsupported operator '{}'",
                op.symbol()
            )))
        );
    }
}
