//! Lexical analysis (tokenization)
//!
//! The lexer converts Kestrel source code into a stream of tokens with
//! accurate span information. Spans are byte offsets into the original
//! source, so multi-byte characters inside strings and comments stay
//! addressable.

use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};
use kestrel_cst::Span;

/// Lexer state for tokenizing source code
pub struct Lexer {
    /// Characters of source code, each with its byte offset
    chars: Vec<(usize, char)>,
    /// Total byte length of the source
    source_len: usize,
    /// Current position in chars
    current: usize,
    /// Start position (in chars) of the current token
    start: usize,
}

impl Lexer {
    /// Create a new lexer for the given source code
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.char_indices().collect(),
            source_len: source.len(),
            current: 0,
            start: 0,
        }
    }

    /// Tokenize the source code
    ///
    /// The returned stream always ends with an `Eof` token. Stops at the
    /// first invalid character or unterminated string.
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        Ok(tokens)
    }

    /// Scan the next token
    fn next_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_whitespace_and_comments();

        self.start = self.current;

        if self.is_at_end() {
            return Ok(self.make_token(TokenKind::Eof));
        }

        let c = self.advance();

        let token = match c {
            // Single-character tokens
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            '{' => self.make_token(TokenKind::LeftBrace),
            '}' => self.make_token(TokenKind::RightBrace),
            ';' => self.make_token(TokenKind::Semicolon),
            ',' => self.make_token(TokenKind::Comma),
            '.' => self.make_token(TokenKind::Dot),
            ':' => self.make_token(TokenKind::Colon),
            '?' => self.make_token(TokenKind::Question),
            '+' => self.make_token(TokenKind::Plus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),

            // Operators with potential two-character forms
            '-' => {
                if self.match_char('>') {
                    self.make_token(TokenKind::Arrow)
                } else {
                    self.make_token(TokenKind::Minus)
                }
            }
            '=' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::EqualEqual)
                } else {
                    self.make_token(TokenKind::Equal)
                }
            }
            '!' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::BangEqual)
                } else {
                    self.make_token(TokenKind::Bang)
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::LessEqual)
                } else {
                    self.make_token(TokenKind::Less)
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.make_token(TokenKind::GreaterEqual)
                } else {
                    self.make_token(TokenKind::Greater)
                }
            }

            // String literals
            '"' => self.string()?,

            // Numbers
            c if c.is_ascii_digit() => self.number(),

            // Identifiers and keywords
            c if c.is_alphabetic() || c == '_' => self.identifier(),

            // Unexpected character
            _ => {
                return Err(SyntaxError::UnexpectedChar {
                    ch: c,
                    span: self.token_span(),
                })
            }
        };

        Ok(token)
    }

    /// Scan a string literal
    ///
    /// The lexeme keeps its surrounding quotes; the tree-builder strips them.
    /// Newlines inside strings are allowed.
    fn string(&mut self) -> Result<Token, SyntaxError> {
        while !self.is_at_end() && self.peek() != '"' {
            self.advance();
        }

        if self.is_at_end() {
            return Err(SyntaxError::UnterminatedString {
                span: self.token_span(),
            });
        }

        self.advance(); // closing quote
        Ok(self.make_token(TokenKind::String))
    }

    /// Scan a number literal (integer or decimal)
    fn number(&mut self) -> Token {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        // A dot only belongs to the number when a digit follows;
        // otherwise it is attribute access (e.g. `x.y` after `1`)
        if self.peek() == '.' && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance(); // .
            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        self.make_token(TokenKind::Number)
    }

    /// Scan an identifier or keyword
    fn identifier(&mut self) -> Token {
        while self.peek().is_alphanumeric() || self.peek() == '_' {
            self.advance();
        }

        let lexeme = self.token_text();
        let kind = TokenKind::is_keyword(&lexeme).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    /// Skip whitespace and `//` comments
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            if self.is_at_end() {
                return;
            }

            match self.peek() {
                ' ' | '\r' | '\t' | '\n' => {
                    self.advance();
                }
                '/' => {
                    if self.peek_next() == Some('/') {
                        while !self.is_at_end() && self.peek() != '\n' {
                            self.advance();
                        }
                    } else {
                        return;
                    }
                }
                _ => return,
            }
        }
    }

    // === Character navigation ===

    /// Advance to next character and return it
    fn advance(&mut self) -> char {
        let c = self.chars[self.current].1;
        self.current += 1;
        c
    }

    /// Peek at current character without advancing
    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current].1
        }
    }

    /// Peek at next character (current + 1)
    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.current + 1).map(|&(_, c)| c)
    }

    /// Check if current character matches expected, and advance if so
    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current].1 != expected {
            false
        } else {
            self.advance();
            true
        }
    }

    /// Check if we've reached the end of source
    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }

    /// Byte offset of the character at `index`, or the end of the source
    fn offset_at(&self, index: usize) -> usize {
        self.chars
            .get(index)
            .map(|&(offset, _)| offset)
            .unwrap_or(self.source_len)
    }

    // === Token creation ===

    /// Span of the token currently being scanned
    fn token_span(&self) -> Span {
        Span::new(self.offset_at(self.start), self.offset_at(self.current))
    }

    /// Source text of the token currently being scanned
    fn token_text(&self) -> String {
        self.chars[self.start..self.current]
            .iter()
            .map(|&(_, c)| c)
            .collect()
    }

    /// Create a token from the current scan window
    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.token_text(), self.token_span())
    }
}
