use crate::{Token, TokenKind};

/// The Tamarin lexer.
///
/// Converts source code into a stream of tokens in a single forward pass
/// with one character of lookahead. Scanning never fails: unrecognized
/// characters come back as `Illegal` tokens.
pub struct Lexer<'src> {
    bytes: &'src [u8],
    /// Byte offset of the current character.
    position: usize,
    /// Byte offset of the next character to read.
    read_position: usize,
    /// Current character; 0 is the end-of-input sentinel, so embedded NUL
    /// terminates the scan by design.
    ch: u8,
    /// Track if we've returned EOF
    at_eof: bool,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Self {
            bytes: source.as_bytes(),
            position: 0,
            read_position: 0,
            ch: 0,
            at_eof: false,
        };
        lexer.read_char();
        lexer
    }

    /// Get the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let token = match self.ch {
            b'=' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::EqEq, "==")
                } else {
                    Token::new(TokenKind::Assign, "=")
                }
            }
            b'!' => {
                if self.peek_char() == b'=' {
                    self.read_char();
                    Token::new(TokenKind::BangEq, "!=")
                } else {
                    Token::new(TokenKind::Bang, "!")
                }
            }
            b'+' => Token::new(TokenKind::Plus, "+"),
            b'-' => Token::new(TokenKind::Minus, "-"),
            b'*' => Token::new(TokenKind::Star, "*"),
            b'/' => Token::new(TokenKind::Slash, "/"),
            b'<' => Token::new(TokenKind::Lt, "<"),
            b'>' => Token::new(TokenKind::Gt, ">"),
            b',' => Token::new(TokenKind::Comma, ","),
            b';' => Token::new(TokenKind::Semicolon, ";"),
            b'(' => Token::new(TokenKind::LParen, "("),
            b')' => Token::new(TokenKind::RParen, ")"),
            b'{' => Token::new(TokenKind::LBrace, "{"),
            b'}' => Token::new(TokenKind::RBrace, "}"),
            0 => Token::eof(),
            ch if is_letter(ch) => {
                // The consumption loop already leaves the cursor past the
                // identifier, so return without the trailing read_char.
                let literal = self.read_identifier();
                return Token::new(TokenKind::lookup_identifier(literal), literal);
            }
            ch if ch.is_ascii_digit() => {
                // Same early return as identifiers.
                return Token::new(TokenKind::IntLiteral, self.read_number());
            }
            ch => Token::new(TokenKind::Illegal, (ch as char).to_string()),
        };

        self.read_char();
        token
    }

    /// Collect all tokens into a vector, ending with `Eof`.
    pub fn collect_all(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Advance the cursor by one character.
    fn read_char(&mut self) {
        self.ch = self.bytes.get(self.read_position).copied().unwrap_or(0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    /// Look at the next character without advancing.
    fn peek_char(&self) -> u8 {
        self.bytes.get(self.read_position).copied().unwrap_or(0)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    /// Consume the maximal run of letters and underscores.
    fn read_identifier(&mut self) -> &'src str {
        let start = self.position;
        while is_letter(self.ch) {
            self.read_char();
        }
        // Identifiers are always ASCII, so the slice is valid UTF-8.
        std::str::from_utf8(&self.bytes[start..self.position]).unwrap()
    }

    /// Consume the maximal run of digits.
    fn read_number(&mut self) -> &'src str {
        let start = self.position;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        std::str::from_utf8(&self.bytes[start..self.position]).unwrap()
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_eof {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.at_eof = true;
        }
        Some(token)
    }
}

fn is_letter(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}
