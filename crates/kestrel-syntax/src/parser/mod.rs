//! Parsing (tokens to parse tree)
//!
//! Recursive descent over the token stream, one method per grammar rule.
//! The output is the rule-named tree from `kestrel-cst`, not an AST: every
//! node keeps the shape the grammar gives it, and all interpretation
//! (literal folding, desugaring, operator binding) happens downstream.

mod expr;
mod stmt;

use crate::error::SyntaxError;
use crate::token::{Token, TokenKind};
use kestrel_cst::{Node, ParseTree};

/// Parser state for building a parse tree from tokens
pub struct Parser {
    pub(super) tokens: Vec<Token>,
    pub(super) current: usize,
}

impl Parser {
    /// Create a new parser for the given tokens
    ///
    /// The stream must end with an `Eof` token, as produced by the lexer.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse the token stream into a `program` tree
    pub fn parse(mut self) -> Result<ParseTree, SyntaxError> {
        let mut declarations = Vec::new();

        while !self.is_at_end() {
            declarations.push(self.declaration()?);
        }

        Ok(ParseTree::new("program", declarations))
    }

    // === Declarations ===

    /// Parse a declaration (class, function, variable) or statement
    pub(super) fn declaration(&mut self) -> Result<Node, SyntaxError> {
        if self.match_token(TokenKind::Class) {
            self.class_decl()
        } else if self.match_token(TokenKind::Fun) {
            self.function("function")
        } else if self.match_token(TokenKind::Var) {
            self.var_decl()
        } else {
            self.statement()
        }
    }

    /// Parse a variable declaration (the `var` keyword is already consumed)
    ///
    /// Emits `var_decl(VAR, type_hint?, expr?)`.
    pub(super) fn var_decl(&mut self) -> Result<Node, SyntaxError> {
        let name = self.consume_identifier("a variable name")?;
        let mut children = vec![self.var_node(&name)];

        if self.match_token(TokenKind::Colon) {
            children.push(self.type_hint()?);
        }

        if self.match_token(TokenKind::Equal) {
            children.push(self.expression()?);
        }

        self.consume(TokenKind::Semicolon, "';' after variable declaration")?;
        Ok(Node::tree("var_decl", children))
    }

    /// Parse a function or method (the introducing keyword, if any, is
    /// already consumed)
    ///
    /// Emits `fun_decl(VAR, params_decl, type_hint?, block)`.
    fn function(&mut self, kind: &str) -> Result<Node, SyntaxError> {
        let name = self.consume_identifier(&format!("a {kind} name"))?;

        self.consume(TokenKind::LeftParen, &format!("'(' after {kind} name"))?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RightParen) {
            loop {
                params.push(self.param_decl()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.consume(TokenKind::RightParen, "')' after parameters")?;

        let mut children = vec![self.var_node(&name), Node::tree("params_decl", params)];

        if self.match_token(TokenKind::Arrow) {
            children.push(self.type_hint()?);
        }

        self.consume(TokenKind::LeftBrace, &format!("'{{' before {kind} body"))?;
        children.push(self.block()?);

        Ok(Node::tree("fun_decl", children))
    }

    /// Parse a single parameter, emitting `param_decl(VAR, type_hint?)`
    fn param_decl(&mut self) -> Result<Node, SyntaxError> {
        let name = self.consume_identifier("a parameter name")?;
        let mut children = vec![self.var_node(&name)];

        if self.match_token(TokenKind::Colon) {
            children.push(self.type_hint()?);
        }

        Ok(Node::tree("param_decl", children))
    }

    /// Parse a class declaration (the `class` keyword is already consumed)
    ///
    /// Emits `class_decl(VAR, VAR?, fun_decl*)` where the optional second
    /// identifier is the superclass.
    fn class_decl(&mut self) -> Result<Node, SyntaxError> {
        let name = self.consume_identifier("a class name")?;
        let mut children = vec![self.var_node(&name)];

        if self.match_token(TokenKind::Less) {
            let superclass = self.consume_identifier("a superclass name")?;
            children.push(self.var_node(&superclass));
        }

        self.consume(TokenKind::LeftBrace, "'{' before class body")?;
        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            children.push(self.function("method")?);
        }
        self.consume(TokenKind::RightBrace, "'}' after class body")?;

        Ok(Node::tree("class_decl", children))
    }

    /// Parse a type hint, emitting `type_hint(VAR, QMARK?)`
    ///
    /// Hints are carried for documentation; nothing downstream acts on them.
    pub(super) fn type_hint(&mut self) -> Result<Node, SyntaxError> {
        let name = self.consume_identifier("a type name")?;
        let mut children = vec![self.var_node(&name)];

        if self.match_token(TokenKind::Question) {
            let q = self.previous();
            children.push(Node::token("QMARK", q.lexeme.clone(), q.span));
        }

        Ok(Node::tree("type_hint", children))
    }

    // === Token navigation ===

    /// Check if the current token matches, and consume it if so
    pub(super) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Check the current token without consuming it
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Consume the current token, which must match `kind`
    pub(super) fn consume(
        &mut self,
        kind: TokenKind,
        expected: &str,
    ) -> Result<Token, SyntaxError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.expected(expected))
        }
    }

    /// Consume an identifier token, described as `what` in error messages
    pub(super) fn consume_identifier(&mut self, what: &str) -> Result<Token, SyntaxError> {
        if self.check(TokenKind::Identifier) {
            Ok(self.advance().clone())
        } else {
            Err(self.expected(what))
        }
    }

    /// Build the error for an expectation the current token fails
    pub(super) fn expected(&self, expected: &str) -> SyntaxError {
        let found = match self.peek().kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.peek().lexeme),
        };
        SyntaxError::UnexpectedToken {
            expected: expected.to_string(),
            found,
            span: self.peek().span,
        }
    }

    /// Advance to the next token, returning the one just passed
    pub(super) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    /// The current (unconsumed) token
    pub(super) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    /// The most recently consumed token
    pub(super) fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    /// Check if all meaningful tokens are consumed
    pub(super) fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Emit an identifier token as a `VAR` leaf
    pub(super) fn var_node(&self, token: &Token) -> Node {
        Node::token("VAR", token.lexeme.clone(), token.span)
    }
}
