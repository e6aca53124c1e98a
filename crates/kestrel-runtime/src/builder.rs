//! Tree building
//!
//! Bottom-up conversion of the rule-named parse tree into the AST. This is
//! where literals fold to runtime values, operator rule names resolve to
//! `&'static` descriptors, `for` loops desugar to `while`, and optional
//! clauses are normalized. The builder dispatches purely on rule and token
//! names, so any producer that emits the same vocabulary can feed it.
//! Unknown names and malformed shapes fail loudly; nothing is defaulted
//! silently.

use std::rc::Rc;

use thiserror::Error;

use kestrel_cst::{Node, ParseTree};

use crate::ast::{Expr, FunctionDef, Literal, Param, Program, Stmt};
use crate::ops::{BinaryOp, UnaryOp};

/// Errors produced while converting a parse tree.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// A rule name the builder has no construction for
    #[error("Unknown rule '{rule}'")]
    UnknownRule { rule: String },

    /// A token kind the builder has no folding for
    #[error("Unknown token kind '{kind}'")]
    UnknownToken { kind: String },

    /// A known rule with the wrong shape underneath it
    #[error("Malformed '{rule}' node: {msg}")]
    Malformed { rule: String, msg: String },

    /// Number literal text that does not parse
    #[error("Invalid number literal '{text}'")]
    BadNumber { text: String },
}

fn malformed(rule: &str, msg: impl Into<String>) -> BuildError {
    BuildError::Malformed {
        rule: rule.to_string(),
        msg: msg.into(),
    }
}

/// Convert a `program` parse tree into an AST.
pub fn build(tree: &ParseTree) -> Result<Program, BuildError> {
    if tree.rule != "program" {
        return Err(malformed(&tree.rule, "expected 'program' at the root"));
    }
    let stmts = tree
        .children
        .iter()
        .map(|node| build_stmt_node(node, "program"))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Program { stmts })
}

fn as_tree<'a>(node: &'a Node, context: &str) -> Result<&'a ParseTree, BuildError> {
    match node {
        Node::Tree(tree) => Ok(tree),
        Node::Token(token) => Err(malformed(
            context,
            format!("expected a rule node, found token '{}'", token.kind),
        )),
    }
}

fn expect_rule<'a>(node: &'a Node, rule: &str, context: &str) -> Result<&'a ParseTree, BuildError> {
    let tree = as_tree(node, context)?;
    if tree.rule != rule {
        return Err(malformed(
            context,
            format!("expected '{rule}' child, found '{}'", tree.rule),
        ));
    }
    Ok(tree)
}

fn ident(node: &Node, context: &str) -> Result<String, BuildError> {
    match node {
        Node::Token(token) if token.kind == "VAR" => Ok(token.text.clone()),
        _ => Err(malformed(context, "expected an identifier token")),
    }
}

fn build_stmt_node(node: &Node, context: &str) -> Result<Stmt, BuildError> {
    let tree = as_tree(node, context)?;
    build_stmt(tree)
}

fn build_stmt(tree: &ParseTree) -> Result<Stmt, BuildError> {
    let children = &tree.children;
    match tree.rule.as_str() {
        "var_decl" => {
            let name = ident(
                children.first().ok_or_else(|| malformed("var_decl", "missing name"))?,
                "var_decl",
            )?;
            let rest = &children[1..];
            let (type_hint, init_node) = match rest {
                [] => (None, None),
                [node] => match node {
                    Node::Tree(t) if t.rule == "type_hint" => (Some(build_type_hint(t)?), None),
                    other => (None, Some(other)),
                },
                [hint, init] => {
                    let hint = expect_rule(hint, "type_hint", "var_decl")?;
                    (Some(build_type_hint(hint)?), Some(init))
                }
                _ => return Err(malformed("var_decl", "too many children")),
            };
            let init = match init_node {
                Some(node) => build_expr(node)?,
                None => Expr::Literal(Literal::Nil),
            };
            Ok(Stmt::VarDecl {
                name,
                type_hint,
                init,
            })
        }
        "fun_decl" => Ok(Stmt::FunctionDecl(Rc::new(build_function(tree)?))),
        "class_decl" => {
            let name = ident(
                children.first().ok_or_else(|| malformed("class_decl", "missing name"))?,
                "class_decl",
            )?;
            let mut idx = 1;
            let superclass = match children.get(1) {
                Some(Node::Token(token)) if token.kind == "VAR" => {
                    idx = 2;
                    Some(token.text.clone())
                }
                _ => None,
            };
            let methods = children[idx..]
                .iter()
                .map(|node| {
                    let fun = expect_rule(node, "fun_decl", "class_decl")?;
                    Ok(Rc::new(build_function(fun)?))
                })
                .collect::<Result<Vec<_>, BuildError>>()?;
            Ok(Stmt::ClassDecl {
                name,
                superclass,
                methods,
            })
        }
        "print_cmd" => {
            let [expr] = children.as_slice() else {
                return Err(malformed("print_cmd", "expected exactly one expression"));
            };
            Ok(Stmt::Print(build_expr(expr)?))
        }
        "return_stmt" => {
            let expr = match children.as_slice() {
                [] => None,
                [expr] => Some(build_expr(expr)?),
                _ => return Err(malformed("return_stmt", "too many children")),
            };
            Ok(Stmt::Return(expr))
        }
        "block" => {
            let stmts = children
                .iter()
                .map(|node| build_stmt_node(node, "block"))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Stmt::Block(stmts))
        }
        "if_stmt" => {
            if children.len() < 2 || children.len() > 3 {
                return Err(malformed("if_stmt", "expected condition, branch and optional else"));
            }
            let condition = build_expr(&children[0])?;
            let then_branch = build_stmt_node(&children[1], "if_stmt")?;
            // A missing else is an empty block, so execution always has
            // both branches to choose from.
            let else_branch = match children.get(2) {
                Some(node) => build_stmt_node(node, "if_stmt")?,
                None => Stmt::Block(vec![]),
            };
            Ok(Stmt::If {
                condition,
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            })
        }
        "while_stmt" => {
            let [cond, body] = children.as_slice() else {
                return Err(malformed("while_stmt", "expected condition and body"));
            };
            Ok(Stmt::While {
                condition: build_expr(cond)?,
                body: Box::new(build_stmt_node(body, "while_stmt")?),
            })
        }
        "for_stmt" => build_for(tree),
        "expr_stmt" => {
            let [expr] = children.as_slice() else {
                return Err(malformed("expr_stmt", "expected exactly one expression"));
            };
            Ok(Stmt::Expr(build_expr(expr)?))
        }
        rule => Err(BuildError::UnknownRule {
            rule: rule.to_string(),
        }),
    }
}

/// Desugar `for (init; cond; incr) body` into
///
/// ```text
/// { init; while (cond) { body; incr; } }
/// ```
///
/// A missing condition becomes a `true` literal; missing init and
/// increment simply leave their slot out.
fn build_for(tree: &ParseTree) -> Result<Stmt, BuildError> {
    if tree.children.len() != 4 {
        return Err(malformed(
            "for_stmt",
            "expected init, condition, increment and body",
        ));
    }
    let init_tree = expect_rule(&tree.children[0], "for_init", "for_stmt")?;
    let cond_tree = expect_rule(&tree.children[1], "for_cond", "for_stmt")?;
    let incr_tree = expect_rule(&tree.children[2], "for_incr", "for_stmt")?;

    let init = init_tree
        .children
        .first()
        .map(|node| build_stmt_node(node, "for_init"))
        .transpose()?;
    let condition = match cond_tree.children.first() {
        Some(node) => build_expr(node)?,
        None => Expr::Literal(Literal::Bool(true)),
    };
    let increment = incr_tree.children.first().map(build_expr).transpose()?;
    let body = build_stmt_node(&tree.children[3], "for_stmt")?;

    let mut loop_body = vec![body];
    if let Some(incr) = increment {
        loop_body.push(Stmt::Expr(incr));
    }
    let while_loop = Stmt::While {
        condition,
        body: Box::new(Stmt::Block(loop_body)),
    };

    let mut stmts = Vec::new();
    if let Some(init) = init {
        stmts.push(init);
    }
    stmts.push(while_loop);
    Ok(Stmt::Block(stmts))
}

fn build_function(tree: &ParseTree) -> Result<FunctionDef, BuildError> {
    let children = &tree.children;
    if children.len() < 3 {
        return Err(malformed("fun_decl", "expected name, parameters and body"));
    }
    let name = ident(&children[0], "fun_decl")?;
    let params_tree = expect_rule(&children[1], "params_decl", "fun_decl")?;
    let params = params_tree
        .children
        .iter()
        .map(|node| build_param(expect_rule(node, "param_decl", "params_decl")?))
        .collect::<Result<Vec<_>, _>>()?;
    let (return_hint, body_idx) = match &children[2] {
        Node::Tree(t) if t.rule == "type_hint" => (Some(build_type_hint(t)?), 3),
        _ => (None, 2),
    };
    if children.len() != body_idx + 1 {
        return Err(malformed("fun_decl", "unexpected extra children"));
    }
    let body_tree = expect_rule(&children[body_idx], "block", "fun_decl")?;
    let body = body_tree
        .children
        .iter()
        .map(|node| build_stmt_node(node, "block"))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(FunctionDef {
        name,
        params,
        return_hint,
        body,
    })
}

fn build_param(tree: &ParseTree) -> Result<Param, BuildError> {
    let name = ident(
        tree.children.first().ok_or_else(|| malformed("param_decl", "missing name"))?,
        "param_decl",
    )?;
    let type_hint = match tree.children.get(1) {
        Some(node) => Some(build_type_hint(expect_rule(node, "type_hint", "param_decl")?)?),
        None => None,
    };
    if tree.children.len() > 2 {
        return Err(malformed("param_decl", "too many children"));
    }
    Ok(Param { name, type_hint })
}

/// Hints fold to their source spelling: `number`, `string?`, ...
fn build_type_hint(tree: &ParseTree) -> Result<String, BuildError> {
    let base = ident(
        tree.children.first().ok_or_else(|| malformed("type_hint", "missing type name"))?,
        "type_hint",
    )?;
    match tree.children.get(1) {
        None => Ok(base),
        Some(Node::Token(token)) if token.kind == "QMARK" => Ok(format!("{base}?")),
        Some(_) => Err(malformed("type_hint", "expected '?' token")),
    }
}

fn build_expr(node: &Node) -> Result<Expr, BuildError> {
    match node {
        Node::Token(token) => fold_token(token),
        Node::Tree(tree) => build_expr_tree(tree),
    }
}

/// Fold a terminal into a literal or variable read.
fn fold_token(token: &kestrel_cst::Token) -> Result<Expr, BuildError> {
    match token.kind.as_str() {
        "NUMBER" => Ok(Expr::Literal(Literal::Number(fold_number(&token.text)?))),
        "STRING" => {
            let inner = token
                .text
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .ok_or_else(|| malformed("STRING", "missing surrounding quotes"))?;
            Ok(Expr::Literal(Literal::String(inner.to_string())))
        }
        "BOOL" => match token.text.as_str() {
            "true" => Ok(Expr::Literal(Literal::Bool(true))),
            "false" => Ok(Expr::Literal(Literal::Bool(false))),
            other => Err(malformed("BOOL", format!("unexpected text '{other}'"))),
        },
        "NIL" => Ok(Expr::Literal(Literal::Nil)),
        "VAR" => Ok(Expr::Var(token.text.clone())),
        kind => Err(BuildError::UnknownToken {
            kind: kind.to_string(),
        }),
    }
}

/// Integer-looking text parses as an integer and widens; text with a
/// decimal point parses directly as a float.
fn fold_number(text: &str) -> Result<f64, BuildError> {
    let parsed = if text.contains('.') {
        text.parse::<f64>().ok()
    } else {
        text.parse::<i64>()
            .map(|i| i as f64)
            .or_else(|_| text.parse::<f64>())
            .ok()
    };
    parsed.ok_or_else(|| BuildError::BadNumber {
        text: text.to_string(),
    })
}

fn build_expr_tree(tree: &ParseTree) -> Result<Expr, BuildError> {
    let children = &tree.children;
    let rule = tree.rule.as_str();

    if let Some(op) = BinaryOp::for_rule(rule) {
        let [left, right] = children.as_slice() else {
            return Err(malformed(rule, "expected two operands"));
        };
        return Ok(Expr::Binary {
            op,
            left: Box::new(build_expr(left)?),
            right: Box::new(build_expr(right)?),
        });
    }
    if let Some(op) = UnaryOp::for_rule(rule) {
        let [operand] = children.as_slice() else {
            return Err(malformed(rule, "expected one operand"));
        };
        return Ok(Expr::Unary {
            op,
            operand: Box::new(build_expr(operand)?),
        });
    }

    match rule {
        "and_" | "or_" => {
            let [left, right] = children.as_slice() else {
                return Err(malformed(rule, "expected two operands"));
            };
            let left = Box::new(build_expr(left)?);
            let right = Box::new(build_expr(right)?);
            Ok(if rule == "and_" {
                Expr::And { left, right }
            } else {
                Expr::Or { left, right }
            })
        }
        "call" => {
            let [callee, params] = children.as_slice() else {
                return Err(malformed("call", "expected callee and arguments"));
            };
            let params = expect_rule(params, "params", "call")?;
            let args = params
                .children
                .iter()
                .map(build_expr)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Expr::Call {
                callee: Box::new(build_expr(callee)?),
                args,
            })
        }
        "assign" => {
            let [name, value] = children.as_slice() else {
                return Err(malformed("assign", "expected name and value"));
            };
            Ok(Expr::Assign {
                name: ident(name, "assign")?,
                value: Box::new(build_expr(value)?),
            })
        }
        "getattr" => {
            let [object, name] = children.as_slice() else {
                return Err(malformed("getattr", "expected object and attribute name"));
            };
            Ok(Expr::GetAttr {
                object: Box::new(build_expr(object)?),
                name: ident(name, "getattr")?,
            })
        }
        "setattr" => {
            let [object, name, value] = children.as_slice() else {
                return Err(malformed("setattr", "expected object, name and value"));
            };
            Ok(Expr::SetAttr {
                object: Box::new(build_expr(object)?),
                name: ident(name, "setattr")?,
                value: Box::new(build_expr(value)?),
            })
        }
        // Grouping is purely syntactic; the parenthesized expression
        // stands on its own in the AST.
        "group" => {
            let [inner] = children.as_slice() else {
                return Err(malformed("group", "expected exactly one expression"));
            };
            build_expr(inner)
        }
        "this" => {
            if !children.is_empty() {
                return Err(malformed("this", "expected no children"));
            }
            Ok(Expr::This)
        }
        "super" => {
            let [method] = children.as_slice() else {
                return Err(malformed("super", "expected a method name"));
            };
            Ok(Expr::Super {
                method: ident(method, "super")?,
            })
        }
        rule => Err(BuildError::UnknownRule {
            rule: rule.to_string(),
        }),
    }
}

// === Tests ===

#[cfg(test)]
mod tests {
    use super::*;
    use kestrel_cst::Span;
    use pretty_assertions::assert_eq;

    fn build_source(source: &str) -> Program {
        let tree = kestrel_syntax::parse(source).unwrap();
        build(&tree).unwrap()
    }

    fn first_expr(source: &str) -> Expr {
        match build_source(source).stmts.into_iter().next().unwrap() {
            Stmt::Expr(expr) | Stmt::Print(expr) => expr,
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_folds_literals() {
        assert_eq!(first_expr("42;"), Expr::Literal(Literal::Number(42.0)));
        assert_eq!(first_expr("4.5;"), Expr::Literal(Literal::Number(4.5)));
        assert_eq!(
            first_expr("\"hi\";"),
            Expr::Literal(Literal::String("hi".to_string()))
        );
        assert_eq!(first_expr("true;"), Expr::Literal(Literal::Bool(true)));
        assert_eq!(first_expr("nil;"), Expr::Literal(Literal::Nil));
    }

    #[test]
    fn test_binds_operator_descriptors() {
        let Expr::Binary { op, .. } = first_expr("1 + 2;") else {
            panic!("expected a binary node");
        };
        assert_eq!(op.symbol, "+");
        assert!(std::ptr::eq(op, &crate::ops::ADD));
    }

    #[test]
    fn test_group_is_transparent() {
        let Expr::Binary { op, left, .. } = first_expr("(1 + 2) * 3;") else {
            panic!("expected a binary node");
        };
        assert_eq!(op.symbol, "*");
        assert!(matches!(*left, Expr::Binary { op, .. } if op.symbol == "+"));
    }

    #[test]
    fn test_var_decl_defaults_to_nil() {
        let program = build_source("var x;");
        assert_eq!(
            program.stmts[0],
            Stmt::VarDecl {
                name: "x".to_string(),
                type_hint: None,
                init: Expr::Literal(Literal::Nil),
            }
        );
    }

    #[test]
    fn test_var_decl_with_hint() {
        let program = build_source("var x: number? = 1;");
        let Stmt::VarDecl { type_hint, .. } = &program.stmts[0] else {
            panic!("expected a var declaration");
        };
        assert_eq!(type_hint.as_deref(), Some("number?"));
    }

    #[test]
    fn test_if_without_else_gets_empty_block() {
        let program = build_source("if (true) print 1;");
        let Stmt::If { else_branch, .. } = &program.stmts[0] else {
            panic!("expected an if statement");
        };
        assert_eq!(**else_branch, Stmt::Block(vec![]));
    }

    #[test]
    fn test_for_desugars_to_while() {
        let program = build_source("for (var i = 0; i < 3; i = i + 1) print i;");
        let Stmt::Block(outer) = &program.stmts[0] else {
            panic!("expected the desugared outer block");
        };
        assert_eq!(outer.len(), 2);
        assert!(matches!(outer[0], Stmt::VarDecl { .. }));
        let Stmt::While { body, .. } = &outer[1] else {
            panic!("expected the desugared while loop");
        };
        let Stmt::Block(loop_body) = body.as_ref() else {
            panic!("expected the loop body block");
        };
        assert_eq!(loop_body.len(), 2);
        assert!(matches!(loop_body[0], Stmt::Print(_)));
        assert!(matches!(loop_body[1], Stmt::Expr(Expr::Assign { .. })));
    }

    #[test]
    fn test_for_with_empty_clauses() {
        let program = build_source("for (;;) print 1;");
        let Stmt::Block(outer) = &program.stmts[0] else {
            panic!("expected the desugared outer block");
        };
        assert_eq!(outer.len(), 1);
        let Stmt::While {
            condition,
            body,
        } = &outer[0]
        else {
            panic!("expected the desugared while loop");
        };
        assert_eq!(*condition, Expr::Literal(Literal::Bool(true)));
        let Stmt::Block(loop_body) = body.as_ref() else {
            panic!("expected the loop body block");
        };
        assert_eq!(loop_body.len(), 1);
    }

    #[test]
    fn test_function_shape() {
        let program = build_source("fun add(a: number, b) -> number { return a + b; }");
        let Stmt::FunctionDecl(def) = &program.stmts[0] else {
            panic!("expected a function declaration");
        };
        assert_eq!(def.name, "add");
        assert_eq!(def.params.len(), 2);
        assert_eq!(def.params[0].type_hint.as_deref(), Some("number"));
        assert_eq!(def.params[1].type_hint, None);
        assert_eq!(def.return_hint.as_deref(), Some("number"));
        assert!(matches!(def.body[0], Stmt::Return(Some(_))));
    }

    #[test]
    fn test_class_shape() {
        let program = build_source(
            "class Dog < Animal { init(name) { this.name = name; } bark() { print 1; } }",
        );
        let Stmt::ClassDecl {
            name,
            superclass,
            methods,
        } = &program.stmts[0]
        else {
            panic!("expected a class declaration");
        };
        assert_eq!(name, "Dog");
        assert_eq!(superclass.as_deref(), Some("Animal"));
        assert_eq!(methods.len(), 2);
        assert_eq!(methods[0].name, "init");
        assert!(matches!(
            methods[0].body[0],
            Stmt::Expr(Expr::SetAttr { .. })
        ));
    }

    #[test]
    fn test_attribute_and_super_expressions() {
        assert_eq!(
            first_expr("a.b;"),
            Expr::GetAttr {
                object: Box::new(Expr::Var("a".to_string())),
                name: "b".to_string(),
            }
        );
        let program = build_source("class A { m() { return super.m; } }");
        let Stmt::ClassDecl { methods, .. } = &program.stmts[0] else {
            panic!("expected a class declaration");
        };
        assert_eq!(
            methods[0].body[0],
            Stmt::Return(Some(Expr::Super {
                method: "m".to_string()
            }))
        );
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        let tree = ParseTree::new("program", vec![Node::tree("goto_stmt", vec![])]);
        assert_eq!(
            build(&tree).unwrap_err(),
            BuildError::UnknownRule {
                rule: "goto_stmt".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_token_is_rejected() {
        let tree = ParseTree::new(
            "program",
            vec![Node::tree(
                "print_cmd",
                vec![Node::token("CHAR", "c", Span::new(0, 1))],
            )],
        );
        assert_eq!(
            build(&tree).unwrap_err(),
            BuildError::UnknownToken {
                kind: "CHAR".to_string()
            }
        );
    }

    #[test]
    fn test_bad_number_is_rejected() {
        let tree = ParseTree::new(
            "program",
            vec![Node::tree(
                "print_cmd",
                vec![Node::token("NUMBER", "1.2.3", Span::new(0, 5))],
            )],
        );
        assert_eq!(
            build(&tree).unwrap_err(),
            BuildError::BadNumber {
                text: "1.2.3".to_string()
            }
        );
    }

    #[test]
    fn test_wrong_root_is_rejected() {
        let tree = ParseTree::new("block", vec![]);
        assert!(matches!(
            build(&tree).unwrap_err(),
            BuildError::Malformed { .. }
        ));
    }

    #[test]
    fn test_large_integer_literal_widens() {
        assert_eq!(fold_number("99999999999999999999").unwrap(), 1e20);
        assert_eq!(fold_number("7").unwrap(), 7.0);
        assert!(fold_number("abc").is_err());
    }

    #[test]
    fn test_pretty_snapshot() {
        let program = build_source(
            "var n = 3;\nwhile (n > 0) {\n  print n;\n  n = n - 1;\n}\n",
        );
        insta::assert_snapshot!(program.pretty().trim_end(), @r"
        Program
          VarDecl n
            Number 3
          While
            Binary >
              Var n
              Number 0
            Block
              Print
                Var n
              ExprStmt
                Assign n
                  Binary -
                    Var n
                    Number 1
        ");
    }
}
