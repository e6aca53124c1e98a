//! AST node model
//!
//! The tree the evaluator walks. It is strictly hierarchical: nodes own
//! their children and carry no parent links, and nothing mutates a node
//! after the builder produces it. Binary and unary nodes hold `&'static`
//! operator descriptors resolved at build time, so the evaluator never
//! inspects an operator name.

use std::fmt::Write;
use std::rc::Rc;

use serde::Serialize;

use crate::ops::{BinaryOp, UnaryOp};

/// A literal constant, already folded to its runtime form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Number(f64),
    String(String),
    Bool(bool),
    Nil,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Literal(Literal),
    /// Variable read
    Var(String),
    /// Arithmetic, comparison or equality, with its semantics bound in
    Binary {
        op: &'static BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: &'static UnaryOp,
        operand: Box<Expr>,
    },
    /// Short-circuit conjunction; yields an operand value, not a bool
    And { left: Box<Expr>, right: Box<Expr> },
    /// Short-circuit disjunction; yields an operand value, not a bool
    Or { left: Box<Expr>, right: Box<Expr> },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    /// Assignment to an existing variable; evaluates to the stored value
    Assign { name: String, value: Box<Expr> },
    /// Attribute read (`object.name`)
    GetAttr { object: Box<Expr>, name: String },
    /// Attribute write (`object.name = value`); evaluates to the stored value
    SetAttr {
        object: Box<Expr>,
        name: String,
        value: Box<Expr>,
    },
    /// The receiver inside a method body
    This,
    /// Superclass method access (`super.name`)
    Super { method: String },
}

/// A function or method parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub type_hint: Option<String>,
}

/// A function or method definition. Shared (`Rc`) between the declaration
/// statement and every closure created from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDef {
    pub name: String,
    pub params: Vec<Param>,
    pub return_hint: Option<String>,
    pub body: Vec<Stmt>,
}

/// A statement node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// `print expr;`
    Print(Expr),
    /// Expression evaluated for its effects
    Expr(Expr),
    /// `var name = init;`. The initializer is always present; the builder
    /// fills in a nil literal when the source omits one.
    VarDecl {
        name: String,
        type_hint: Option<String>,
        init: Expr,
    },
    Block(Vec<Stmt>),
    /// Both branches are always present; a missing `else` is an empty block.
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    FunctionDecl(Rc<FunctionDef>),
    ClassDecl {
        name: String,
        superclass: Option<String>,
        methods: Vec<Rc<FunctionDef>>,
    },
    Return(Option<Expr>),
}

/// A whole program: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

impl Program {
    /// Render an indented dump of the tree, one node per line.
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        out.push_str("Program\n");
        for stmt in &self.stmts {
            write_stmt(&mut out, stmt, 1);
        }
        out
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(h) => format!(": {h}"),
        None => String::new(),
    }
}

fn write_function(out: &mut String, label: &str, def: &FunctionDef, depth: usize) {
    indent(out, depth);
    let params: Vec<String> = def
        .params
        .iter()
        .map(|p| format!("{}{}", p.name, hint_suffix(&p.type_hint)))
        .collect();
    let ret = match &def.return_hint {
        Some(h) => format!(" -> {h}"),
        None => String::new(),
    };
    let _ = writeln!(out, "{label} {}({}){ret}", def.name, params.join(", "));
    for stmt in &def.body {
        write_stmt(out, stmt, depth + 1);
    }
}

fn write_stmt(out: &mut String, stmt: &Stmt, depth: usize) {
    match stmt {
        Stmt::Print(expr) => {
            indent(out, depth);
            out.push_str("Print\n");
            write_expr(out, expr, depth + 1);
        }
        Stmt::Expr(expr) => {
            indent(out, depth);
            out.push_str("ExprStmt\n");
            write_expr(out, expr, depth + 1);
        }
        Stmt::VarDecl {
            name,
            type_hint,
            init,
        } => {
            indent(out, depth);
            let _ = writeln!(out, "VarDecl {name}{}", hint_suffix(type_hint));
            write_expr(out, init, depth + 1);
        }
        Stmt::Block(stmts) => {
            indent(out, depth);
            out.push_str("Block\n");
            for stmt in stmts {
                write_stmt(out, stmt, depth + 1);
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
        } => {
            indent(out, depth);
            out.push_str("If\n");
            write_expr(out, condition, depth + 1);
            write_stmt(out, then_branch, depth + 1);
            write_stmt(out, else_branch, depth + 1);
        }
        Stmt::While { condition, body } => {
            indent(out, depth);
            out.push_str("While\n");
            write_expr(out, condition, depth + 1);
            write_stmt(out, body, depth + 1);
        }
        Stmt::FunctionDecl(def) => write_function(out, "FunctionDecl", def, depth),
        Stmt::ClassDecl {
            name,
            superclass,
            methods,
        } => {
            indent(out, depth);
            match superclass {
                Some(parent) => {
                    let _ = writeln!(out, "ClassDecl {name} < {parent}");
                }
                None => {
                    let _ = writeln!(out, "ClassDecl {name}");
                }
            }
            for def in methods {
                write_function(out, "Method", def, depth + 1);
            }
        }
        Stmt::Return(expr) => {
            indent(out, depth);
            out.push_str("Return\n");
            if let Some(expr) = expr {
                write_expr(out, expr, depth + 1);
            }
        }
    }
}

fn write_expr(out: &mut String, expr: &Expr, depth: usize) {
    indent(out, depth);
    match expr {
        Expr::Literal(lit) => {
            let _ = match lit {
                Literal::Number(n) => {
                    if n.fract() == 0.0 && n.is_finite() {
                        writeln!(out, "Number {n:.0}")
                    } else {
                        writeln!(out, "Number {n}")
                    }
                }
                Literal::String(s) => writeln!(out, "String {s:?}"),
                Literal::Bool(b) => writeln!(out, "Bool {b}"),
                Literal::Nil => writeln!(out, "Nil"),
            };
        }
        Expr::Var(name) => {
            let _ = writeln!(out, "Var {name}");
        }
        Expr::Binary { op, left, right } => {
            let _ = writeln!(out, "Binary {}", op.symbol);
            write_expr(out, left, depth + 1);
            write_expr(out, right, depth + 1);
        }
        Expr::Unary { op, operand } => {
            let _ = writeln!(out, "Unary {}", op.symbol);
            write_expr(out, operand, depth + 1);
        }
        Expr::And { left, right } => {
            out.push_str("And\n");
            write_expr(out, left, depth + 1);
            write_expr(out, right, depth + 1);
        }
        Expr::Or { left, right } => {
            out.push_str("Or\n");
            write_expr(out, left, depth + 1);
            write_expr(out, right, depth + 1);
        }
        Expr::Call { callee, args } => {
            out.push_str("Call\n");
            write_expr(out, callee, depth + 1);
            for arg in args {
                write_expr(out, arg, depth + 1);
            }
        }
        Expr::Assign { name, value } => {
            let _ = writeln!(out, "Assign {name}");
            write_expr(out, value, depth + 1);
        }
        Expr::GetAttr { object, name } => {
            let _ = writeln!(out, "GetAttr {name}");
            write_expr(out, object, depth + 1);
        }
        Expr::SetAttr {
            object,
            name,
            value,
        } => {
            let _ = writeln!(out, "SetAttr {name}");
            write_expr(out, object, depth + 1);
            write_expr(out, value, depth + 1);
        }
        Expr::This => out.push_str("This\n"),
        Expr::Super { method } => {
            let _ = writeln!(out, "Super {method}");
        }
    }
}

// === Tests ===
