//! Statement execution

use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::Stmt;
use crate::coerce;
use crate::env::Env;
use crate::interpreter::{Exec, Interpreter};
use crate::ops;
use crate::value::{ClassValue, Closure, RuntimeError, Value};

impl Interpreter {
    /// Execute one statement. `Exec::Return` propagates out of blocks and
    /// loops untouched; only a function call boundary consumes it.
    pub(super) fn exec_stmt(&self, stmt: &Stmt, env: &Env) -> Result<Exec, RuntimeError> {
        match stmt {
            Stmt::Print(expr) => {
                let value = self.eval_expr(expr, env)?;
                self.printer().println(&value.to_string());
                Ok(Exec::Normal)
            }
            Stmt::Expr(expr) => {
                self.eval_expr(expr, env)?;
                Ok(Exec::Normal)
            }
            Stmt::VarDecl { name, init, .. } => {
                let value = coerce::coerce(name, self.eval_expr(init, env)?);
                env.declare(name.as_str(), value);
                Ok(Exec::Normal)
            }
            Stmt::Block(stmts) => {
                // Each block runs in its own child scope.
                let scope = env.child();
                for stmt in stmts {
                    match self.exec_stmt(stmt, &scope)? {
                        Exec::Normal => {}
                        signal => return Ok(signal),
                    }
                }
                Ok(Exec::Normal)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if ops::truthy(&self.eval_expr(condition, env)?) {
                    self.exec_stmt(then_branch, env)
                } else {
                    self.exec_stmt(else_branch, env)
                }
            }
            Stmt::While { condition, body } => {
                while ops::truthy(&self.eval_expr(condition, env)?) {
                    match self.exec_stmt(body, env)? {
                        Exec::Normal => {}
                        signal => return Ok(signal),
                    }
                }
                Ok(Exec::Normal)
            }
            Stmt::FunctionDecl(def) => {
                // The closure captures the scope the declaration runs in,
                // so later bindings there are visible at call time.
                let closure = Closure {
                    def: def.clone(),
                    env: env.clone(),
                };
                env.declare(def.name.as_str(), Value::Function(Rc::new(closure)));
                Ok(Exec::Normal)
            }
            Stmt::ClassDecl {
                name,
                superclass,
                methods,
            } => {
                self.exec_class_decl(name, superclass.as_deref(), methods, env)?;
                Ok(Exec::Normal)
            }
            Stmt::Return(expr) => {
                let value = match expr {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Nil,
                };
                Ok(Exec::Return(value))
            }
        }
    }

    fn exec_class_decl(
        &self,
        name: &str,
        superclass: Option<&str>,
        methods: &[Rc<crate::ast::FunctionDef>],
        env: &Env,
    ) -> Result<(), RuntimeError> {
        let superclass = match superclass {
            Some(parent) => {
                let value = env.lookup(parent).ok_or_else(|| RuntimeError::NameError {
                    name: parent.to_string(),
                })?;
                match value {
                    Value::Class(class) => Some(class),
                    other => {
                        return Err(RuntimeError::TypeError {
                            msg: format!(
                                "superclass must be a class, not '{}'",
                                other.type_name()
                            ),
                        })
                    }
                }
            }
            None => None,
        };

        // Methods close over a scope carrying the `super` binding, so
        // `super.m` resolves against the superclass of the class that
        // declared the method, not of the receiver's class.
        let method_env = match &superclass {
            Some(parent) => {
                let scope = env.child();
                scope.declare("super", Value::Class(parent.clone()));
                scope
            }
            None => env.clone(),
        };

        let mut table = HashMap::new();
        for def in methods {
            table.insert(
                def.name.clone(),
                Rc::new(Closure {
                    def: def.clone(),
                    env: method_env.clone(),
                }),
            );
        }

        let class = ClassValue {
            name: name.to_string(),
            superclass,
            methods: table,
        };
        env.declare(name, Value::Class(Rc::new(class)));
        Ok(())
    }
}
