//! AST traversal
//!
//! Read-only traversal over the node model for tooling and analysis: a
//! preorder [`Cursor`] iterator and a [`Visitor`] trait whose default
//! methods recurse into children.

use crate::ast::{Expr, Program, Stmt};

/// A borrowed reference to any node in the tree.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

impl<'a> NodeRef<'a> {
    fn push_children(&self, stack: &mut Vec<NodeRef<'a>>) {
        // Pushed in reverse so the stack pops them in source order.
        match self {
            NodeRef::Stmt(stmt) => match stmt {
                Stmt::Print(expr) | Stmt::Expr(expr) => stack.push(NodeRef::Expr(expr)),
                Stmt::VarDecl { init, .. } => stack.push(NodeRef::Expr(init)),
                Stmt::Block(stmts) => {
                    stack.extend(stmts.iter().rev().map(NodeRef::Stmt));
                }
                Stmt::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    stack.push(NodeRef::Stmt(else_branch));
                    stack.push(NodeRef::Stmt(then_branch));
                    stack.push(NodeRef::Expr(condition));
                }
                Stmt::While { condition, body } => {
                    stack.push(NodeRef::Stmt(body));
                    stack.push(NodeRef::Expr(condition));
                }
                Stmt::FunctionDecl(def) => {
                    stack.extend(def.body.iter().rev().map(NodeRef::Stmt));
                }
                Stmt::ClassDecl { methods, .. } => {
                    for def in methods.iter().rev() {
                        stack.extend(def.body.iter().rev().map(NodeRef::Stmt));
                    }
                }
                Stmt::Return(Some(expr)) => stack.push(NodeRef::Expr(expr)),
                Stmt::Return(None) => {}
            },
            NodeRef::Expr(expr) => match expr {
                Expr::Literal(_) | Expr::Var(_) | Expr::This | Expr::Super { .. } => {}
                Expr::Binary { left, right, .. }
                | Expr::And { left, right }
                | Expr::Or { left, right } => {
                    stack.push(NodeRef::Expr(right));
                    stack.push(NodeRef::Expr(left));
                }
                Expr::Unary { operand, .. } => stack.push(NodeRef::Expr(operand)),
                Expr::Call { callee, args } => {
                    stack.extend(args.iter().rev().map(NodeRef::Expr));
                    stack.push(NodeRef::Expr(callee));
                }
                Expr::Assign { value, .. } => stack.push(NodeRef::Expr(value)),
                Expr::GetAttr { object, .. } => stack.push(NodeRef::Expr(object)),
                Expr::SetAttr { object, value, .. } => {
                    stack.push(NodeRef::Expr(value));
                    stack.push(NodeRef::Expr(object));
                }
            },
        }
    }
}

/// Preorder iterator over a subtree: each node before its children,
/// children in source order.
pub struct Cursor<'a> {
    stack: Vec<NodeRef<'a>>,
}

impl<'a> Cursor<'a> {
    pub fn over_program(program: &'a Program) -> Self {
        Cursor {
            stack: program.stmts.iter().rev().map(NodeRef::Stmt).collect(),
        }
    }

    pub fn over_stmt(stmt: &'a Stmt) -> Self {
        Cursor {
            stack: vec![NodeRef::Stmt(stmt)],
        }
    }

    pub fn over_expr(expr: &'a Expr) -> Self {
        Cursor {
            stack: vec![NodeRef::Expr(expr)],
        }
    }
}

impl<'a> Iterator for Cursor<'a> {
    type Item = NodeRef<'a>;

    fn next(&mut self) -> Option<NodeRef<'a>> {
        let node = self.stack.pop()?;
        node.push_children(&mut self.stack);
        Some(node)
    }
}

/// Recursive traversal with overridable hooks. The default methods visit
/// every child, so an implementation only overrides what it cares about
/// and calls [`walk_stmt`] / [`walk_expr`] to keep descending.
pub trait Visitor {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_program<V: Visitor + ?Sized>(visitor: &mut V, program: &Program) {
    for stmt in &program.stmts {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Print(expr) | Stmt::Expr(expr) => visitor.visit_expr(expr),
        Stmt::VarDecl { init, .. } => visitor.visit_expr(init),
        Stmt::Block(stmts) => {
            for stmt in stmts {
                visitor.visit_stmt(stmt);
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(condition);
            visitor.visit_stmt(then_branch);
            visitor.visit_stmt(else_branch);
        }
        Stmt::While { condition, body } => {
            visitor.visit_expr(condition);
            visitor.visit_stmt(body);
        }
        Stmt::FunctionDecl(def) => {
            for stmt in &def.body {
                visitor.visit_stmt(stmt);
            }
        }
        Stmt::ClassDecl { methods, .. } => {
            for def in methods {
                for stmt in &def.body {
                    visitor.visit_stmt(stmt);
                }
            }
        }
        Stmt::Return(Some(expr)) => visitor.visit_expr(expr),
        Stmt::Return(None) => {}
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Literal(_) | Expr::Var(_) | Expr::This | Expr::Super { .. } => {}
        Expr::Binary { left, right, .. } | Expr::And { left, right } | Expr::Or { left, right } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Unary { operand, .. } => visitor.visit_expr(operand),
        Expr::Call { callee, args } => {
            visitor.visit_expr(callee);
            for arg in args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Assign { value, .. } => visitor.visit_expr(value),
        Expr::GetAttr { object, .. } => visitor.visit_expr(object),
        Expr::SetAttr { object, value, .. } => {
            visitor.visit_expr(object);
            visitor.visit_expr(value);
        }
    }
}

// === Tests ===
