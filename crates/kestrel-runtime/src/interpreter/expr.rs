//! Expression evaluation

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::ast::{Expr, Literal};
use crate::coerce;
use crate::env::Env;
use crate::interpreter::{Exec, Interpreter};
use crate::ops;
use crate::value::{ClassValue, Closure, InstanceValue, RuntimeError, Value};

impl Interpreter {
    pub(super) fn eval_expr(&self, expr: &Expr, env: &Env) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(lit) => Ok(literal_value(lit)),
            Expr::Var(name) => env.lookup(name).ok_or_else(|| RuntimeError::NameError {
                name: name.clone(),
            }),
            Expr::Binary { op, left, right } => {
                let left = self.eval_expr(left, env)?;
                let right = self.eval_expr(right, env)?;
                (op.apply)(&left, &right)
            }
            Expr::Unary { op, operand } => {
                let operand = self.eval_expr(operand, env)?;
                (op.apply)(&operand)
            }
            // `and`/`or` yield the deciding operand itself, so
            // `nil or "x"` is `"x"` and `1 and 2` is `2`.
            Expr::And { left, right } => {
                let left = self.eval_expr(left, env)?;
                if !ops::truthy(&left) {
                    return Ok(left);
                }
                self.eval_expr(right, env)
            }
            Expr::Or { left, right } => {
                let left = self.eval_expr(left, env)?;
                if ops::truthy(&left) {
                    return Ok(left);
                }
                self.eval_expr(right, env)
            }
            Expr::Assign { name, value } => {
                let value = coerce::coerce(name, self.eval_expr(value, env)?);
                env.assign(name, value.clone())?;
                Ok(value)
            }
            Expr::Call { callee, args } => {
                let callee = self.eval_expr(callee, env)?;
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval_expr(arg, env)?);
                }
                match callee {
                    Value::Function(closure) => self.call_closure(&closure, values),
                    Value::Class(class) => self.instantiate(&class, values),
                    other => Err(RuntimeError::TypeError {
                        msg: format!("'{}' object is not callable", other.type_name()),
                    }),
                }
            }
            Expr::GetAttr { object, name } => {
                let object = self.eval_expr(object, env)?;
                self.get_attr(&object, name)
            }
            Expr::SetAttr {
                object,
                name,
                value,
            } => {
                let object = self.eval_expr(object, env)?;
                let value = coerce::coerce(name, self.eval_expr(value, env)?);
                match &object {
                    Value::Instance(instance) => {
                        instance
                            .fields
                            .borrow_mut()
                            .insert(name.clone(), value.clone());
                        Ok(value)
                    }
                    other => Err(RuntimeError::AttributeError {
                        type_name: other.type_name().to_string(),
                        name: name.clone(),
                    }),
                }
            }
            Expr::This => env.lookup("this").ok_or_else(|| RuntimeError::NameError {
                name: "this".to_string(),
            }),
            Expr::Super { method } => self.eval_super(method, env),
        }
    }

    /// Attribute reads check the instance's own fields first, then the
    /// method table of its class and superclasses. A found method comes
    /// back bound to the receiver.
    fn get_attr(&self, object: &Value, name: &str) -> Result<Value, RuntimeError> {
        let Value::Instance(instance) = object else {
            return Err(RuntimeError::AttributeError {
                type_name: object.type_name().to_string(),
                name: name.to_string(),
            });
        };
        if let Some(value) = instance.fields.borrow().get(name) {
            return Ok(value.clone());
        }
        match instance.class.find_method(name) {
            Some(method) => Ok(Value::Function(bind_method(&method, object.clone()))),
            None => Err(RuntimeError::AttributeError {
                type_name: instance.class.name.clone(),
                name: name.to_string(),
            }),
        }
    }

    fn eval_super(&self, method: &str, env: &Env) -> Result<Value, RuntimeError> {
        // The `super` binding only exists inside methods of a class that
        // has a superclass; `this` only inside methods.
        let superclass = match env.lookup("super") {
            Some(Value::Class(class)) => class,
            _ => {
                return Err(RuntimeError::NameError {
                    name: "super".to_string(),
                })
            }
        };
        let receiver = env.lookup("this").ok_or_else(|| RuntimeError::NameError {
            name: "this".to_string(),
        })?;
        match superclass.find_method(method) {
            Some(found) => Ok(Value::Function(bind_method(&found, receiver))),
            None => Err(RuntimeError::AttributeError {
                type_name: superclass.name.clone(),
                name: method.to_string(),
            }),
        }
    }

    /// Call a function value: check arity, bind arguments (with integral
    /// coercion on `i`..`n` parameter names) in a fresh child of the
    /// captured environment, then run the body until it returns.
    fn call_closure(&self, closure: &Closure, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let def = &closure.def;
        if args.len() != def.params.len() {
            return Err(RuntimeError::ArityError {
                name: def.name.clone(),
                expected: def.params.len(),
                received: args.len(),
            });
        }
        let env = closure.env.child();
        for (param, value) in def.params.iter().zip(args) {
            env.declare(param.name.as_str(), coerce::coerce(&param.name, value));
        }
        for stmt in &def.body {
            if let Exec::Return(value) = self.exec_stmt(stmt, &env)? {
                return Ok(value);
            }
        }
        Ok(Value::Nil)
    }

    /// Calling a class makes an instance. When the class chain has an
    /// `init` method it runs bound to the new instance with the call's
    /// arguments; otherwise the call must be argument-free. Either way the
    /// result is the instance.
    fn instantiate(&self, class: &Rc<ClassValue>, args: Vec<Value>) -> Result<Value, RuntimeError> {
        let instance = Value::Instance(Rc::new(InstanceValue {
            class: class.clone(),
            fields: RefCell::new(HashMap::new()),
        }));
        if let Some(init) = class.find_method("init") {
            let bound = bind_method(&init, instance.clone());
            self.call_closure(&bound, args)?;
        } else if !args.is_empty() {
            return Err(RuntimeError::ArityError {
                name: class.name.clone(),
                expected: 0,
                received: args.len(),
            });
        }
        Ok(instance)
    }
}

/// A bound method: the original closure wrapped in a scope where `this`
/// is the receiver.
fn bind_method(method: &Closure, receiver: Value) -> Rc<Closure> {
    let env = method.env.child();
    env.declare("this", receiver);
    Rc::new(Closure {
        def: method.def.clone(),
        env,
    })
}

fn literal_value(lit: &Literal) -> Value {
    match lit {
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::string(s.as_str()),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Nil => Value::Nil,
    }
}
