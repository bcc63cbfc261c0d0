use crate::token::Op;

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// -<operand>
    Negate,
    /// +<operand>
    Identity,
    /// ~<operand>, parsed but not evaluable
    Invert,
}

/// Infix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// <left> + <right>
    Add,
    /// <left> - <right>
    Sub,
    /// <left> * <right>
    Mul,
    /// <left> / <right>
    Div,
    /// <left> ** <right>
    Pow,
    /// <left> % <right>
    Mod,
    /// <left> // <right>
    FloorDiv,
    /// <left> | <right>, parsed but not evaluable
    BitOr,
    /// <left> ^ <right>, parsed but not evaluable
    BitXor,
    /// <left> & <right>, parsed but not evaluable
    BitAnd,
    /// <left> << <right>, parsed but not evaluable
    Shl,
    /// <left> >> <right>, parsed but not evaluable
    Shr,
}

impl UnaryOp {
    pub(crate) fn from_op(op: Op) -> Option<Self> {
        match op {
            Op::Minus => Some(Self::Negate),
            Op::Plus => Some(Self::Identity),
            Op::Invert => Some(Self::Invert),
            _ => None,
        }
    }

    /// Source text of the operator
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Identity => "+",
            Self::Invert => "~",
        }
    }
}

impl BinaryOp {
    pub(crate) fn from_op(op: Op) -> Option<Self> {
        match op {
            Op::Plus => Some(Self::Add),
            Op::Minus => Some(Self::Sub),
            Op::Mul => Some(Self::Mul),
            Op::Div => Some(Self::Div),
            Op::Pow => Some(Self::Pow),
            Op::Mod => Some(Self::Mod),
            Op::FloorDiv => Some(Self::FloorDiv),
            Op::BitOr => Some(Self::BitOr),
            Op::BitXor => Some(Self::BitXor),
            Op::BitAnd => Some(Self::BitAnd),
            Op::Shl => Some(Self::Shl),
            Op::Shr => Some(Self::Shr),
            Op::Invert => None,
        }
    }

    /// Source text of the operator
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "**",
            Self::Mod => "%",
            Self::FloorDiv => "//",
            Self::BitOr => "|",
            Self::BitXor => "^",
            Self::BitAnd => "&",
            Self::Shl => "<<",
            Self::Shr => ">>",
        }
    }
}

/// Ast nodes for the expressions
#[derive(Debug, Clone)]
pub enum Ast {
    /// A literal value
    Number(f64),
    /// A constant, resolved at evaluation time
    Identifier(String),
    /// <op><operand>
    Unary(UnaryOp, Box<Ast>),
    /// <left> <op> <right>
    Binary(BinaryOp, Box<Ast>, Box<Ast>),
    /// name(<args>...)
    Call(String, Vec<Ast>),
}

impl PartialEq<Self> for Ast {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ast::Number(v), Ast::Number(v2)) => v.to_le_bytes() == v2.to_le_bytes(),
            (Ast::Identifier(str), Ast::Identifier(str2)) => str == str2,
            (Ast::Unary(op, a), Ast::Unary(op2, a2)) => op == op2 && a == a2,
            (Ast::Binary(op, a, b), Ast::Binary(op2, a2, b2)) => op == op2 && a == a2 && b == b2,
            (Ast::Call(name, args), Ast::Call(name2, args2)) => name == name2 && args == args2,
            _ => false,
        }
    }
}
impl Eq for Ast {}

impl Ast {
    /// Number of nodes in this tree
    #[must_use]
    pub fn size(&self) -> usize {
        match self {
            Self::Number(_) | Self::Identifier(_) => 1,
            Self::Unary(_, operand) => 1 + operand.size(),
            Self::Binary(_, left, right) => 1 + left.size() + right.size(),
            Self::Call(_, args) => 1 + args.iter().map(Ast::size).sum::<usize>(),
        }
    }
}
