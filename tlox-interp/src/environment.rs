//! Lexical scopes.

use crate::error::RuntimeError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tlox_parser::lexer::Token;

/// A single scope mapping names to values, linked to its enclosing scope.
#[derive(Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    /// The lexically enclosing scope. `None` for the global scope.
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Create a new global scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new scope nested inside `enclosing`.
    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Binds `name` in this scope, overwriting any existing binding in this scope and
    /// shadowing bindings in enclosing scopes.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), value);
    }

    /// Looks up `name` in this scope, then in each enclosing scope.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            return Ok(value.clone());
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.borrow().get(name),
            None => Err(undefined_variable(name)),
        }
    }

    /// Overwrites the nearest existing binding of `name`. Never creates a new binding.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            return Ok(());
        }
        match &self.enclosing {
            Some(enclosing) => enclosing.borrow_mut().assign(name, value),
            None => Err(undefined_variable(name)),
        }
    }
}

fn undefined_variable(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tlox_parser::lexer::TokenKind;

    fn ident(name: &str) -> Token {
        Token::new(TokenKind::Identifier, name, 1)
    }

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("a", Value::Number(1.0));
        assert_eq!(env.get(&ident("a")).unwrap(), Value::Number(1.0));

        // redefinition in the same scope overwrites
        env.define("a", Value::Bool(true));
        assert_eq!(env.get(&ident("a")).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_get_undefined() {
        let env = Environment::new();
        let err = env.get(&ident("missing")).unwrap_err();
        assert_eq!(err.to_string(), "[line 1] Undefined variable 'missing'.");
    }

    #[test]
    fn test_shadowing() {
        let global = Rc::new(RefCell::new(Environment::new()));
        global.borrow_mut().define("a", Value::Number(1.0));

        let mut inner = Environment::with_enclosing(Rc::clone(&global));
        inner.define("a", Value::Number(2.0));
        assert_eq!(inner.get(&ident("a")).unwrap(), Value::Number(2.0));
        assert_eq!(global.borrow().get(&ident("a")).unwrap(), Value::Number(1.0));

        drop(inner);
        assert_eq!(global.borrow().get(&ident("a")).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_assign_walks_outward() {
        let global = Rc::new(RefCell::new(Environment::new()));
        global.borrow_mut().define("a", Value::Number(1.0));

        let mut inner = Environment::with_enclosing(Rc::clone(&global));
        inner.assign(&ident("a"), Value::Number(3.0)).unwrap();
        assert_eq!(global.borrow().get(&ident("a")).unwrap(), Value::Number(3.0));
        assert_eq!(inner.get(&ident("a")).unwrap(), Value::Number(3.0));
    }

    #[test]
    fn test_assign_undefined_does_not_define() {
        let global = Rc::new(RefCell::new(Environment::new()));
        let mut inner = Environment::with_enclosing(Rc::clone(&global));

        let err = inner.assign(&ident("x"), Value::Nil).unwrap_err();
        assert_eq!(err.message(), "Undefined variable 'x'.");
        assert!(inner.get(&ident("x")).is_err());
        assert!(global.borrow().get(&ident("x")).is_err());
    }
}
