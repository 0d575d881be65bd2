use crate::ast::BinaryOp;
use tamarin_lexer::TokenKind;

/// Operator precedence levels (higher = binds tighter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Lowest precedence (for statements, grouped expressions, etc.)
    Lowest,
    /// Equality: `==`, `!=`
    Equality,
    /// Relational: `<`, `>`
    Comparison,
    /// Addition/subtraction: `+`, `-`
    Term,
    /// Multiplication/division: `*`, `/`
    Factor,
    /// Unary operators: `-`, `!`
    Unary,
    /// Call: `f(x)` — binds tighter than any operator
    Call,
}

impl Precedence {
    /// Get the precedence of a binary operator.
    pub fn of_binary(op: BinaryOp) -> Self {
        match op {
            BinaryOp::Eq | BinaryOp::NotEq => Precedence::Equality,
            BinaryOp::Lt | BinaryOp::Gt => Precedence::Comparison,
            BinaryOp::Add | BinaryOp::Sub => Precedence::Term,
            BinaryOp::Mul | BinaryOp::Div => Precedence::Factor,
        }
    }

    /// Get the precedence for a token that can continue an expression.
    pub fn of_infix_token(kind: TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::EqEq | TokenKind::BangEq => Precedence::Equality,
            TokenKind::Lt | TokenKind::Gt => Precedence::Comparison,
            TokenKind::Plus | TokenKind::Minus => Precedence::Term,
            TokenKind::Star | TokenKind::Slash => Precedence::Factor,
            TokenKind::LParen => Precedence::Call,
            _ => return None,
        })
    }
}

/// Convert a token kind to a binary operator.
pub fn token_to_binary_op(kind: TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::NotEq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Gt => BinaryOp::Gt,
        _ => return None,
    })
}
