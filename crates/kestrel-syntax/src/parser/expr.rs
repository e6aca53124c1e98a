//! Expression parsing
//!
//! One method per precedence level, lowest binding first:
//! assignment < or < and < equality < comparison < term < factor < unary <
//! call/attribute < primary. Binary rules emit the tree rule named after
//! the operation (`add`, `lt`, `eq`, ...), which downstream code resolves
//! against its operator table.

use super::Parser;
use crate::error::SyntaxError;
use crate::token::TokenKind;
use kestrel_cst::{Node, ParseTree};

impl Parser {
    /// Parse an expression
    pub(super) fn expression(&mut self) -> Result<Node, SyntaxError> {
        self.assignment()
    }

    /// Assignment: `x = expr` or `obj.attr = expr`, right-associative
    ///
    /// Parsed by first reading a full expression, then reinterpreting it as
    /// a target when `=` follows: a `VAR` leaf becomes `assign`, a `getattr`
    /// tree becomes `setattr`. Anything else cannot be assigned to.
    fn assignment(&mut self) -> Result<Node, SyntaxError> {
        let expr = self.or_expr()?;

        if self.match_token(TokenKind::Equal) {
            let equals_span = self.previous().span;
            let value = self.assignment()?;

            return match expr {
                Node::Token(token) if token.kind == "VAR" => {
                    Ok(Node::tree("assign", vec![Node::Token(token), value]))
                }
                Node::Tree(tree) if tree.rule == "getattr" => {
                    let mut children = tree.children;
                    children.push(value);
                    Ok(Node::Tree(ParseTree::new("setattr", children)))
                }
                _ => Err(SyntaxError::InvalidAssignment { span: equals_span }),
            };
        }

        Ok(expr)
    }

    /// `or`, left-associative, emitting `or_`
    fn or_expr(&mut self) -> Result<Node, SyntaxError> {
        let mut expr = self.and_expr()?;

        while self.match_token(TokenKind::Or) {
            let right = self.and_expr()?;
            expr = Node::tree("or_", vec![expr, right]);
        }

        Ok(expr)
    }

    /// `and`, left-associative, emitting `and_`
    fn and_expr(&mut self) -> Result<Node, SyntaxError> {
        let mut expr = self.equality()?;

        while self.match_token(TokenKind::And) {
            let right = self.equality()?;
            expr = Node::tree("and_", vec![expr, right]);
        }

        Ok(expr)
    }

    /// `==` and `!=`, emitting `eq` / `ne`
    fn equality(&mut self) -> Result<Node, SyntaxError> {
        let mut expr = self.comparison()?;

        loop {
            let rule = if self.match_token(TokenKind::EqualEqual) {
                "eq"
            } else if self.match_token(TokenKind::BangEqual) {
                "ne"
            } else {
                break;
            };
            let right = self.comparison()?;
            expr = Node::tree(rule, vec![expr, right]);
        }

        Ok(expr)
    }

    /// `<` `<=` `>` `>=`, emitting `lt` / `le` / `gt` / `ge`
    fn comparison(&mut self) -> Result<Node, SyntaxError> {
        let mut expr = self.term()?;

        loop {
            let rule = if self.match_token(TokenKind::Greater) {
                "gt"
            } else if self.match_token(TokenKind::GreaterEqual) {
                "ge"
            } else if self.match_token(TokenKind::Less) {
                "lt"
            } else if self.match_token(TokenKind::LessEqual) {
                "le"
            } else {
                break;
            };
            let right = self.term()?;
            expr = Node::tree(rule, vec![expr, right]);
        }

        Ok(expr)
    }

    /// `+` and `-`, emitting `add` / `sub`
    fn term(&mut self) -> Result<Node, SyntaxError> {
        let mut expr = self.factor()?;

        loop {
            let rule = if self.match_token(TokenKind::Plus) {
                "add"
            } else if self.match_token(TokenKind::Minus) {
                "sub"
            } else {
                break;
            };
            let right = self.factor()?;
            expr = Node::tree(rule, vec![expr, right]);
        }

        Ok(expr)
    }

    /// `*` and `/`, emitting `mul` / `div`
    fn factor(&mut self) -> Result<Node, SyntaxError> {
        let mut expr = self.unary()?;

        loop {
            let rule = if self.match_token(TokenKind::Star) {
                "mul"
            } else if self.match_token(TokenKind::Slash) {
                "div"
            } else {
                break;
            };
            let right = self.unary()?;
            expr = Node::tree(rule, vec![expr, right]);
        }

        Ok(expr)
    }

    /// Prefix `!` and `-`, emitting `not_` / `neg`
    fn unary(&mut self) -> Result<Node, SyntaxError> {
        if self.match_token(TokenKind::Bang) {
            let operand = self.unary()?;
            return Ok(Node::tree("not_", vec![operand]));
        }
        if self.match_token(TokenKind::Minus) {
            let operand = self.unary()?;
            return Ok(Node::tree("neg", vec![operand]));
        }

        self.call()
    }

    /// Call and attribute access, left-associative
    ///
    /// Emits `call(expr, params)` and `getattr(expr, VAR)`, chaining on the
    /// result so `a.b(1).c` nests naturally.
    fn call(&mut self) -> Result<Node, SyntaxError> {
        let mut expr = self.primary()?;

        loop {
            if self.match_token(TokenKind::LeftParen) {
                let mut args = Vec::new();
                if !self.check(TokenKind::RightParen) {
                    loop {
                        args.push(self.expression()?);
                        if !self.match_token(TokenKind::Comma) {
                            break;
                        }
                    }
                }
                self.consume(TokenKind::RightParen, "')' after arguments")?;
                expr = Node::tree("call", vec![expr, Node::tree("params", args)]);
            } else if self.match_token(TokenKind::Dot) {
                let attr = self.consume_identifier("an attribute name after '.'")?;
                let attr = self.var_node(&attr);
                expr = Node::tree("getattr", vec![expr, attr]);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Literals, identifiers, `this`, `super.m`, and parenthesized groups
    fn primary(&mut self) -> Result<Node, SyntaxError> {
        if self.match_token(TokenKind::Number) {
            let t = self.previous();
            return Ok(Node::token("NUMBER", t.lexeme.clone(), t.span));
        }
        if self.match_token(TokenKind::String) {
            let t = self.previous();
            return Ok(Node::token("STRING", t.lexeme.clone(), t.span));
        }
        if self.match_token(TokenKind::True) || self.match_token(TokenKind::False) {
            let t = self.previous();
            return Ok(Node::token("BOOL", t.lexeme.clone(), t.span));
        }
        if self.match_token(TokenKind::Nil) {
            let t = self.previous();
            return Ok(Node::token("NIL", t.lexeme.clone(), t.span));
        }
        if self.match_token(TokenKind::This) {
            return Ok(Node::tree("this", vec![]));
        }
        if self.match_token(TokenKind::Super) {
            self.consume(TokenKind::Dot, "'.' after 'super'")?;
            let method = self.consume_identifier("a superclass method name")?;
            let method = self.var_node(&method);
            return Ok(Node::tree("super", vec![method]));
        }
        if self.match_token(TokenKind::Identifier) {
            let t = self.previous();
            return Ok(Node::token("VAR", t.lexeme.clone(), t.span));
        }
        if self.match_token(TokenKind::LeftParen) {
            let expr = self.expression()?;
            self.consume(TokenKind::RightParen, "')' after expression")?;
            return Ok(Node::tree("group", vec![expr]));
        }

        Err(self.expected("an expression"))
    }
}
