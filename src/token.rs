/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A numeric literal
    Number(f64),
    /// An identifier: constant or function name
    Ident(String),
    /// An operator
    Op(Op),
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// Argument separator
    Comma,
}

/// Operators recognised by the lexer. Some of them (the bitwise ones) are
/// part of the grammar but not of the operator table, and fail at
/// evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Plus,
    Minus,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    BitOr,
    BitXor,
    BitAnd,
    Shl,
    Shr,
    Invert,
}

impl Op {
    /// Get the binary operator precedence. Operators with higher precedence
    /// should be evaluated first. `None` for operators that can not be used
    /// in infix position.
    pub fn precedence(self) -> Option<u8> {
        match self {
            Self::BitOr => Some(1),
            Self::BitXor => Some(2),
            Self::BitAnd => Some(3),
            Self::Shl | Self::Shr => Some(4),
            Self::Plus | Self::Minus => Some(5),
            Self::Mul | Self::Div | Self::FloorDiv | Self::Mod => Some(6),
            Self::Pow => Some(8),
            Self::Invert => None,
        }
    }

    /// Check if the operator is left associative
    pub fn is_left_associative(self) -> bool {
        self != Self::Pow
    }

    /// Source text of the operator
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "%",
            Self::Pow => "**",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Shl => "<<",
            Self::Shr => ">>",
            Self::Invert => "~",
        }
    }
}
