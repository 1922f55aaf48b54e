pub mod object;

use object::{Obj, ObjKind};
use std::fmt;
use std::rc::Rc;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    Object(Rc<Obj>),
}

impl Value {
    pub fn new_string(string: impl Into<String>) -> Self {
        Value::Object(Rc::new(Obj::new_string(string.into())))
    }

    /// Attempts to cast the `Value` into a `&str` or `None` if wrong type.
    pub fn cast_to_str(&self) -> Option<&str> {
        match self {
            Self::Object(obj) => match &obj.kind {
                ObjKind::Str(string) => Some(string),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn cast_to_number(&self) -> Option<f64> {
        match self {
            Self::Number(val) => Some(*val),
            _ => None,
        }
    }

    /// `nil` and `false` are falsy. Everything else, including `0` and `""`, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(l), Value::Bool(r)) => l == r,
            (Value::Number(l), Value::Number(r)) => l == r,
            (Value::Object(l), Value::Object(r)) => Rc::ptr_eq(l, r) || l == r,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(val) => write!(f, "{}", val),
            // `Display` for f64 already leaves out a trailing `.0` (`3.0` prints as `3`)
            Value::Number(val) => write!(f, "{}", val),
            Value::Object(obj) => write!(f, "{}", obj),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(obj) if obj.cast_to_str().is_some() => write!(f, "{:?}", obj.to_string()),
            _ => fmt::Display::fmt(self, f),
        }
    }
}
