//! Token types for lexical analysis
//!
//! Defines all token types recognized by the Kestrel lexer.

use kestrel_cst::Span;
use serde::{Deserialize, Serialize};

/// Token type produced by the lexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source text of this token
    pub lexeme: String,
    /// Source location
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

/// Classification of token types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // Literals
    /// Number literal (42, 3.14)
    Number,
    /// String literal ("hello")
    String,
    /// Identifier
    Identifier,

    // Keywords
    /// `var` keyword
    Var,
    /// `fun` keyword
    Fun,
    /// `class` keyword
    Class,
    /// `if` keyword
    If,
    /// `else` keyword
    Else,
    /// `while` keyword
    While,
    /// `for` keyword
    For,
    /// `print` keyword
    Print,
    /// `return` keyword
    Return,
    /// `and` keyword
    And,
    /// `or` keyword
    Or,
    /// `true` keyword
    True,
    /// `false` keyword
    False,
    /// `nil` keyword
    Nil,
    /// `this` keyword
    This,
    /// `super` keyword
    Super,

    // Operators
    /// `+` (addition)
    Plus,
    /// `-` (subtraction or negation)
    Minus,
    /// `*` (multiplication)
    Star,
    /// `/` (division)
    Slash,
    /// `!` (logical not)
    Bang,
    /// `==` (equality)
    EqualEqual,
    /// `!=` (inequality)
    BangEqual,
    /// `<` (less than)
    Less,
    /// `<=` (less than or equal)
    LessEqual,
    /// `>` (greater than)
    Greater,
    /// `>=` (greater than or equal)
    GreaterEqual,

    // Punctuation
    /// `=` (assignment)
    Equal,
    /// `(` (left parenthesis)
    LeftParen,
    /// `)` (right parenthesis)
    RightParen,
    /// `{` (left brace)
    LeftBrace,
    /// `}` (right brace)
    RightBrace,
    /// `;` (semicolon)
    Semicolon,
    /// `,` (comma)
    Comma,
    /// `.` (attribute access)
    Dot,
    /// `:` (type hint separator)
    Colon,
    /// `?` (nullable type hint marker)
    Question,
    /// `->` (function return type hint)
    Arrow,

    // Special
    /// End of file
    Eof,
}

impl TokenKind {
    /// Check if a string is a keyword and return its token kind
    pub fn is_keyword(s: &str) -> Option<TokenKind> {
        match s {
            "var" => Some(TokenKind::Var),
            "fun" => Some(TokenKind::Fun),
            "class" => Some(TokenKind::Class),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "while" => Some(TokenKind::While),
            "for" => Some(TokenKind::For),
            "print" => Some(TokenKind::Print),
            "return" => Some(TokenKind::Return),
            "and" => Some(TokenKind::And),
            "or" => Some(TokenKind::Or),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "nil" => Some(TokenKind::Nil),
            "this" => Some(TokenKind::This),
            "super" => Some(TokenKind::Super),
            _ => None,
        }
    }

    /// Get the string representation of this token kind
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::Var => "var",
            TokenKind::Fun => "fun",
            TokenKind::Class => "class",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::While => "while",
            TokenKind::For => "for",
            TokenKind::Print => "print",
            TokenKind::Return => "return",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Nil => "nil",
            TokenKind::This => "this",
            TokenKind::Super => "super",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Bang => "!",
            TokenKind::EqualEqual => "==",
            TokenKind::BangEqual => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEqual => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEqual => ">=",
            TokenKind::Equal => "=",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::LeftBrace => "{",
            TokenKind::RightBrace => "}",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Arrow => "->",
            TokenKind::Eof => "EOF",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_creation() {
        let token = Token::new(TokenKind::Number, "42", Span::new(0, 2));
        assert_eq!(token.kind, TokenKind::Number);
        assert_eq!(token.lexeme, "42");
        assert_eq!(token.span, Span::new(0, 2));
    }

    #[test]
    fn test_keyword_detection() {
        assert_eq!(TokenKind::is_keyword("var"), Some(TokenKind::Var));
        assert_eq!(TokenKind::is_keyword("fun"), Some(TokenKind::Fun));
        assert_eq!(TokenKind::is_keyword("class"), Some(TokenKind::Class));
        assert_eq!(TokenKind::is_keyword("if"), Some(TokenKind::If));
        assert_eq!(TokenKind::is_keyword("else"), Some(TokenKind::Else));
        assert_eq!(TokenKind::is_keyword("while"), Some(TokenKind::While));
        assert_eq!(TokenKind::is_keyword("for"), Some(TokenKind::For));
        assert_eq!(TokenKind::is_keyword("print"), Some(TokenKind::Print));
        assert_eq!(TokenKind::is_keyword("return"), Some(TokenKind::Return));
        assert_eq!(TokenKind::is_keyword("and"), Some(TokenKind::And));
        assert_eq!(TokenKind::is_keyword("or"), Some(TokenKind::Or));
        assert_eq!(TokenKind::is_keyword("true"), Some(TokenKind::True));
        assert_eq!(TokenKind::is_keyword("false"), Some(TokenKind::False));
        assert_eq!(TokenKind::is_keyword("nil"), Some(TokenKind::Nil));
        assert_eq!(TokenKind::is_keyword("this"), Some(TokenKind::This));
        assert_eq!(TokenKind::is_keyword("super"), Some(TokenKind::Super));
    }

    #[test]
    fn test_non_keyword() {
        assert_eq!(TokenKind::is_keyword("foo"), None);
        assert_eq!(TokenKind::is_keyword("x"), None);
        assert_eq!(TokenKind::is_keyword("Var"), None); // Case-sensitive
        assert_eq!(TokenKind::is_keyword("printx"), None);
    }

    #[test]
    fn test_token_kind_as_str() {
        assert_eq!(TokenKind::Var.as_str(), "var");
        assert_eq!(TokenKind::Plus.as_str(), "+");
        assert_eq!(TokenKind::EqualEqual.as_str(), "==");
        assert_eq!(TokenKind::Arrow.as_str(), "->");
    }
}
