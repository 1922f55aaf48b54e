use crate::environment::Environment;
use crate::error::{Interrupt, RuntimeError};
use crate::value::object::{NativeFn, Obj, ObjKind};
use crate::value::Value;
use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;
use tlox_parser::ast::{Expr, Stmt};
use tlox_parser::lexer::{Token, TokenKind};

/// Calls to user defined functions can be nested at most this deep.
pub const MAX_CALL_DEPTH: usize = 128;

/// Tree walking interpreter. Output of `print` statements is written to `out`.
pub struct Interpreter<W> {
    /// The global scope. Persists for the lifetime of the interpreter.
    globals: Rc<RefCell<Environment>>,
    /// The innermost scope of the code being executed.
    environment: Rc<RefCell<Environment>>,
    /// Number of user defined function calls currently executing.
    call_depth: usize,
    out: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(out: W) -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));
        Self {
            environment: Rc::clone(&globals),
            globals,
            call_depth: 0,
            out,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Defines a native function in the global scope.
    pub fn add_native_fn(
        &mut self,
        ident: &str,
        func: &'static dyn Fn(&mut [Value]) -> Value,
        arity: usize,
    ) {
        let native = Obj {
            kind: ObjKind::NativeFn(NativeFn {
                ident: ident.to_string(),
                arity,
                func,
            }),
        };
        self.globals
            .borrow_mut()
            .define(ident, Value::Object(Rc::new(native)));
    }

    /// Executes `program`, stopping at the first runtime error.
    ///
    /// `program` must not contain a `return` outside of a function body, which
    /// `tlox_passes::return_check` reports as a syntax error. Such a `return`
    /// stops the program early.
    pub fn interpret(&mut self, program: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in program {
            match self.execute(stmt) {
                Ok(()) => {}
                Err(Interrupt::Error(err)) => return Err(err),
                Err(Interrupt::Return(_)) => break,
            }
        }
        Ok(())
    }

    fn execute(&mut self, stmt: &Stmt) -> Result<(), Interrupt> {
        match stmt {
            Stmt::ExprStmt(expr) => {
                self.evaluate(expr)?;
            }
            Stmt::PrintStmt(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{}", value).map_err(RuntimeError::from)?;
            }
            Stmt::VarDeclaration { ident, initializer } => {
                let value = match initializer {
                    Some(initializer) => self.evaluate(initializer)?,
                    None => Value::Nil,
                };
                self.environment
                    .borrow_mut()
                    .define(ident.lexeme.clone(), value);
            }
            Stmt::FnDeclaration(decl) => {
                let func = Obj::new_fn(Rc::clone(decl), Rc::clone(&self.environment));
                self.environment
                    .borrow_mut()
                    .define(decl.ident.lexeme.clone(), Value::Object(Rc::new(func)));
            }
            Stmt::Block(body) => {
                let env = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(body, env)?;
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)?;
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)?;
                }
            }
            Stmt::ReturnStmt { value, .. } => {
                let value = match value {
                    Some(value) => self.evaluate(value)?,
                    None => Value::Nil,
                };
                return Err(Interrupt::Return(value));
            }
        }
        Ok(())
    }

    /// Executes `body` with `env` as the current scope. The previous scope is restored
    /// however execution ends.
    fn execute_block(&mut self, body: &[Stmt], env: Environment) -> Result<(), Interrupt> {
        tracing::trace!(statements = body.len(), "entering block");
        let previous = std::mem::replace(&mut self.environment, Rc::new(RefCell::new(env)));

        let result = body.iter().try_for_each(|stmt| self.execute(stmt));

        self.environment = previous;
        result
    }

    /// Evaluates an expression in the current scope.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::NumberLit(val) => Ok(Value::Number(*val)),
            Expr::BoolLit(val) => Ok(Value::Bool(*val)),
            Expr::StringLit(val) => Ok(Value::new_string(val.as_str())),
            Expr::NilLit => Ok(Value::Nil),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Variable(ident) => self.environment.borrow().get(ident),
            Expr::Assign { ident, value } => {
                let value = self.evaluate(value)?;
                self.environment.borrow_mut().assign(ident, value.clone())?;
                Ok(value)
            }
            Expr::Unary { op, arg } => {
                let arg = self.evaluate(arg)?;
                match op.kind {
                    TokenKind::Minus => match arg.cast_to_number() {
                        Some(val) => Ok(Value::Number(-val)),
                        None => Err(RuntimeError::new(op, "Operand must be a number.")),
                    },
                    TokenKind::Bang => Ok(Value::Bool(!arg.is_truthy())),
                    _ => unreachable!("invalid unary operator {:?}", op.kind),
                }
            }
            Expr::Binary { lhs, op, rhs } => {
                let lhs = self.evaluate(lhs)?;
                let rhs = self.evaluate(rhs)?;
                self.binary(op, lhs, rhs)
            }
            Expr::Logical { lhs, op, rhs } => {
                let lhs = self.evaluate(lhs)?;
                let short_circuit = match op.kind {
                    TokenKind::Or => lhs.is_truthy(),
                    _ => !lhs.is_truthy(),
                };
                if short_circuit {
                    Ok(lhs)
                } else {
                    self.evaluate(rhs)
                }
            }
            Expr::FnCall {
                callee,
                paren,
                args,
            } => {
                let callee = self.evaluate(callee)?;
                let args = args
                    .iter()
                    .map(|arg| self.evaluate(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.call(callee, args, paren)
            }
        }
    }

    fn binary(&self, op: &Token, lhs: Value, rhs: Value) -> Result<Value, RuntimeError> {
        /// Generate evaluation for a binary operator over numbers.
        macro_rules! num_binary_op {
            ($op: tt, $result: path) => {
                match (lhs.cast_to_number(), rhs.cast_to_number()) {
                    (Some(a), Some(b)) => Ok($result(a $op b)),
                    _ => Err(RuntimeError::new(op, "Operands must be numbers.")),
                }
            };

            ($op: tt) => {
                num_binary_op!($op, Value::Number)
            };
        }

        match op.kind {
            TokenKind::Plus => {
                if let (Some(a), Some(b)) = (lhs.cast_to_number(), rhs.cast_to_number()) {
                    return Ok(Value::Number(a + b));
                }
                match (lhs.cast_to_str(), rhs.cast_to_str()) {
                    // handle string concatenation
                    (Some(a), Some(b)) => Ok(Value::new_string(format!("{}{}", a, b))),
                    _ => Err(RuntimeError::new(
                        op,
                        "Operands must be two numbers or two strings.",
                    )),
                }
            }
            TokenKind::Minus => num_binary_op!(-),
            TokenKind::Asterisk => num_binary_op!(*),
            TokenKind::Slash => num_binary_op!(/),
            TokenKind::GreaterThan => num_binary_op!(>, Value::Bool),
            TokenKind::GreaterThanEquals => num_binary_op!(>=, Value::Bool),
            TokenKind::LessThan => num_binary_op!(<, Value::Bool),
            TokenKind::LessThanEquals => num_binary_op!(<=, Value::Bool),
            TokenKind::EqualsEquals => Ok(Value::Bool(lhs == rhs)),
            TokenKind::NotEquals => Ok(Value::Bool(lhs != rhs)),
            _ => unreachable!("invalid binary operator {:?}", op.kind),
        }
    }

    /// Calls `callee` with already evaluated `args`. `paren` locates errors.
    fn call(
        &mut self,
        callee: Value,
        mut args: Vec<Value>,
        paren: &Token,
    ) -> Result<Value, RuntimeError> {
        let obj = match callee {
            Value::Object(obj) => obj,
            _ => return Err(RuntimeError::new(paren, "Can only call functions.")),
        };

        let argc = args.len();
        let check_arity = |arity: usize| {
            if arity == argc {
                Ok(())
            } else {
                Err(RuntimeError::new(
                    paren,
                    format!("Expected {} arguments but got {}.", arity, argc),
                ))
            }
        };

        match &obj.kind {
            ObjKind::Fn(func) => {
                check_arity(func.arity())?;
                if self.call_depth >= MAX_CALL_DEPTH {
                    return Err(RuntimeError::new(paren, "Stack overflow."));
                }
                tracing::debug!(function = func.ident(), line = paren.line, "calling function");
                let mut env = Environment::with_enclosing(Rc::clone(&func.closure));
                for (param, arg) in func.declaration.params.iter().zip(args) {
                    env.define(param.lexeme.clone(), arg);
                }

                self.call_depth += 1;
                let result = self.execute_block(&func.declaration.body, env);
                self.call_depth -= 1;

                match result {
                    Ok(()) => Ok(Value::Nil),
                    Err(Interrupt::Return(value)) => Ok(value),
                    Err(Interrupt::Error(err)) => Err(err),
                }
            }
            ObjKind::NativeFn(native) => {
                check_arity(native.arity)?;
                tracing::debug!(function = %native.ident, line = paren.line, "calling native function");
                Ok((native.func)(&mut args))
            }
            ObjKind::Str(_) => Err(RuntimeError::new(paren, "Can only call functions.")),
        }
    }
}
