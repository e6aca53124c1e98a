//! Statement parsing

use super::Parser;
use crate::error::SyntaxError;
use crate::token::TokenKind;
use kestrel_cst::Node;

impl Parser {
    /// Parse a statement
    pub(super) fn statement(&mut self) -> Result<Node, SyntaxError> {
        if self.match_token(TokenKind::For) {
            self.for_stmt()
        } else if self.match_token(TokenKind::If) {
            self.if_stmt()
        } else if self.match_token(TokenKind::Print) {
            self.print_stmt()
        } else if self.match_token(TokenKind::Return) {
            self.return_stmt()
        } else if self.match_token(TokenKind::While) {
            self.while_stmt()
        } else if self.match_token(TokenKind::LeftBrace) {
            self.block()
        } else {
            self.expr_stmt()
        }
    }

    /// Parse a `print` statement, emitting `print_cmd(expr)`
    fn print_stmt(&mut self) -> Result<Node, SyntaxError> {
        let value = self.expression()?;
        self.consume(TokenKind::Semicolon, "';' after value")?;
        Ok(Node::tree("print_cmd", vec![value]))
    }

    /// Parse a `return` statement, emitting `return_stmt(expr?)`
    fn return_stmt(&mut self) -> Result<Node, SyntaxError> {
        let mut children = Vec::new();
        if !self.check(TokenKind::Semicolon) {
            children.push(self.expression()?);
        }
        self.consume(TokenKind::Semicolon, "';' after return value")?;
        Ok(Node::tree("return_stmt", children))
    }

    /// Parse an `if` statement, emitting `if_stmt(expr, stmt, stmt?)`
    fn if_stmt(&mut self) -> Result<Node, SyntaxError> {
        self.consume(TokenKind::LeftParen, "'(' after 'if'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "')' after condition")?;

        let mut children = vec![condition, self.statement()?];
        if self.match_token(TokenKind::Else) {
            children.push(self.statement()?);
        }

        Ok(Node::tree("if_stmt", children))
    }

    /// Parse a `while` statement, emitting `while_stmt(expr, stmt)`
    fn while_stmt(&mut self) -> Result<Node, SyntaxError> {
        self.consume(TokenKind::LeftParen, "'(' after 'while'")?;
        let condition = self.expression()?;
        self.consume(TokenKind::RightParen, "')' after condition")?;
        let body = self.statement()?;

        Ok(Node::tree("while_stmt", vec![condition, body]))
    }

    /// Parse a `for` statement
    ///
    /// Emits `for_stmt(for_init, for_cond, for_incr, stmt)`. The three
    /// clause wrappers are always present; a clause omitted in the source
    /// simply has no children. Desugaring to `while` happens downstream.
    fn for_stmt(&mut self) -> Result<Node, SyntaxError> {
        self.consume(TokenKind::LeftParen, "'(' after 'for'")?;

        let init = if self.match_token(TokenKind::Semicolon) {
            Node::tree("for_init", vec![])
        } else if self.match_token(TokenKind::Var) {
            // var_decl consumes its own semicolon
            Node::tree("for_init", vec![self.var_decl()?])
        } else {
            let expr = self.expression()?;
            self.consume(TokenKind::Semicolon, "';' after loop initializer")?;
            Node::tree("for_init", vec![Node::tree("expr_stmt", vec![expr])])
        };

        let cond = if self.check(TokenKind::Semicolon) {
            Node::tree("for_cond", vec![])
        } else {
            Node::tree("for_cond", vec![self.expression()?])
        };
        self.consume(TokenKind::Semicolon, "';' after loop condition")?;

        let incr = if self.check(TokenKind::RightParen) {
            Node::tree("for_incr", vec![])
        } else {
            Node::tree("for_incr", vec![self.expression()?])
        };
        self.consume(TokenKind::RightParen, "')' after for clauses")?;

        let body = self.statement()?;
        Ok(Node::tree("for_stmt", vec![init, cond, incr, body]))
    }

    /// Parse a block (the `{` is already consumed), emitting `block(decl*)`
    pub(super) fn block(&mut self) -> Result<Node, SyntaxError> {
        let mut declarations = Vec::new();

        while !self.check(TokenKind::RightBrace) && !self.is_at_end() {
            declarations.push(self.declaration()?);
        }

        self.consume(TokenKind::RightBrace, "'}' after block")?;
        Ok(Node::tree("block", declarations))
    }

    /// Parse an expression statement, emitting `expr_stmt(expr)`
    fn expr_stmt(&mut self) -> Result<Node, SyntaxError> {
        let expr = self.expression()?;
        self.consume(TokenKind::Semicolon, "';' after expression")?;
        Ok(Node::tree("expr_stmt", vec![expr]))
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{parse, parse_err};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_print_cmd_shape() {
        let tree = parse("print 42;");
        let stmt = tree.children[0].as_tree().unwrap();
        assert_eq!(stmt.rule, "print_cmd");
        assert_eq!(stmt.children[0].as_token().unwrap().kind, "NUMBER");
    }

    #[test]
    fn test_return_with_and_without_value() {
        let tree = parse("fun f() { return 1; return; }");
        let body = tree.children[0].as_tree().unwrap().children[2]
            .as_tree()
            .unwrap();

        let with_value = body.children[0].as_tree().unwrap();
        assert_eq!(with_value.rule, "return_stmt");
        assert_eq!(with_value.children.len(), 1);

        let bare = body.children[1].as_tree().unwrap();
        assert_eq!(bare.rule, "return_stmt");
        assert!(bare.children.is_empty());
    }

    #[test]
    fn test_if_with_else() {
        let tree = parse("if (true) print 1; else print 2;");
        let stmt = tree.children[0].as_tree().unwrap();
        assert_eq!(stmt.rule, "if_stmt");
        assert_eq!(stmt.children.len(), 3);
    }

    #[test]
    fn test_if_without_else() {
        let tree = parse("if (true) print 1;");
        let stmt = tree.children[0].as_tree().unwrap();
        assert_eq!(stmt.children.len(), 2);
    }

    #[test]
    fn test_while_shape() {
        let tree = parse("while (x < 3) { x = x + 1; }");
        let stmt = tree.children[0].as_tree().unwrap();
        assert_eq!(stmt.rule, "while_stmt");
        assert_eq!(stmt.children[0].as_tree().unwrap().rule, "lt");
        assert_eq!(stmt.children[1].as_tree().unwrap().rule, "block");
    }

    #[test]
    fn test_for_all_clauses() {
        let tree = parse("for (var i = 0; i < 3; i = i + 1) print i;");
        let stmt = tree.children[0].as_tree().unwrap();
        assert_eq!(stmt.rule, "for_stmt");

        let init = stmt.children[0].as_tree().unwrap();
        assert_eq!(init.rule, "for_init");
        assert_eq!(init.children[0].as_tree().unwrap().rule, "var_decl");

        let cond = stmt.children[1].as_tree().unwrap();
        assert_eq!(cond.rule, "for_cond");
        assert_eq!(cond.children[0].as_tree().unwrap().rule, "lt");

        let incr = stmt.children[2].as_tree().unwrap();
        assert_eq!(incr.rule, "for_incr");
        assert_eq!(incr.children[0].as_tree().unwrap().rule, "assign");

        assert_eq!(stmt.children[3].as_tree().unwrap().rule, "print_cmd");
    }

    #[test]
    fn test_for_empty_clauses() {
        let tree = parse("for (;;) print 1;");
        let stmt = tree.children[0].as_tree().unwrap();
        for (i, rule) in ["for_init", "for_cond", "for_incr"].iter().enumerate() {
            let clause = stmt.children[i].as_tree().unwrap();
            assert_eq!(&clause.rule, rule);
            assert!(clause.children.is_empty());
        }
    }

    #[test]
    fn test_for_expression_initializer() {
        let tree = parse("for (i = 0; ; ) print i;");
        let init = tree.children[0].as_tree().unwrap().children[0]
            .as_tree()
            .unwrap();
        assert_eq!(init.children[0].as_tree().unwrap().rule, "expr_stmt");
    }

    #[test]
    fn test_nested_blocks() {
        let tree = parse("{ { print 1; } }");
        let outer = tree.children[0].as_tree().unwrap();
        assert_eq!(outer.rule, "block");
        let inner = outer.children[0].as_tree().unwrap();
        assert_eq!(inner.rule, "block");
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse_err("{ print 1;");
        assert_eq!(
            err.to_string(),
            "Expected '}' after block, found end of input"
        );
    }
}
