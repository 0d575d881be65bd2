/// All token kinds in Tamarin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // LITERALS
    /// Integer literal: 123
    IntLiteral,

    /// Boolean true
    True,

    /// Boolean false
    False,

    // KEYWORDS
    Fn,
    Let,
    If,
    Else,
    Return,

    // IDENTIFIER
    /// Identifier: foo, _bar, add_two
    Identifier,

    // OPERATORS
    Assign,
    Plus,
    Minus,
    Bang,
    Star,
    Slash,
    Lt,
    Gt,
    EqEq,
    BangEq,

    // PUNCTUATION
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,

    /// End of input
    Eof,

    /// A character the lexer does not recognize
    Illegal,
}

impl TokenKind {
    /// Classify identifier text, mapping keywords to their dedicated kinds.
    ///
    /// Total over all strings: anything outside the keyword table is an
    /// `Identifier`.
    pub fn lookup_identifier(ident: &str) -> TokenKind {
        match ident {
            "fn" => TokenKind::Fn,
            "let" => TokenKind::Let,
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "return" => TokenKind::Return,
            _ => TokenKind::Identifier,
        }
    }

    /// Returns true if this token kind is a keyword.
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Fn
                | TokenKind::Let
                | TokenKind::True
                | TokenKind::False
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::Return
        )
    }

    /// Get a human-readable name for this token kind.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::IntLiteral => "integer",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Fn => "fn",
            TokenKind::Let => "let",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::Identifier => "identifier",
            TokenKind::Assign => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Bang => "!",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::EqEq => "==",
            TokenKind::BangEq => "!=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Eof => "end of input",
            TokenKind::Illegal => "illegal",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A token: its kind plus the literal source text it was scanned from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>) -> Self {
        Self {
            kind,
            literal: literal.into(),
        }
    }

    /// The end-of-input marker carries an empty literal.
    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "")
    }
}
