use crate::environment::Environment;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tlox_parser::ast::FnDeclaration;

use super::Value;

/// A function implemented by the host.
#[derive(Clone)]
pub struct NativeFn {
    pub ident: String,
    pub arity: usize,
    pub func: &'static dyn Fn(&mut [Value]) -> Value,
}

/// A user defined function together with the environment it was declared in.
#[derive(Clone)]
pub struct Function {
    pub declaration: Rc<FnDeclaration>,
    /// A function declared in a block is also stored in that block's environment,
    /// so this forms an `Rc` cycle and the block's scope is never freed.
    /// Known leak, there is no garbage collector.
    pub closure: Rc<RefCell<Environment>>,
}

impl Function {
    pub fn ident(&self) -> &str {
        &self.declaration.ident.lexeme
    }

    /// Number of arguments that the function accepts.
    pub fn arity(&self) -> usize {
        self.declaration.params.len()
    }
}

#[derive(Clone)]
pub enum ObjKind {
    Str(String),
    Fn(Function),
    NativeFn(NativeFn),
}

/// Strings compare by content. Functions are only equal to themselves, which is
/// checked by [`Value`] comparing the `Rc` pointers.
impl PartialEq for ObjKind {
    fn eq(&self, other: &ObjKind) -> bool {
        match (self, other) {
            (Self::Str(l), Self::Str(r)) => l == r,
            _ => false,
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct Obj {
    pub kind: ObjKind,
}

impl Obj {
    pub fn new_string(str: String) -> Self {
        Self {
            kind: ObjKind::Str(str),
        }
    }

    pub fn new_fn(declaration: Rc<FnDeclaration>, closure: Rc<RefCell<Environment>>) -> Self {
        Self {
            kind: ObjKind::Fn(Function {
                declaration,
                closure,
            }),
        }
    }

    pub fn cast_to_str(&self) -> Option<&str> {
        match &self.kind {
            ObjKind::Str(string) => Some(string),
            _ => None,
        }
    }
}

impl fmt::Display for Obj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ObjKind::Str(str) => write!(f, "{}", str),
            ObjKind::Fn(func) => write!(f, "<fn {}>", func.ident()),
            ObjKind::NativeFn(_) => write!(f, "<native fn>"),
        }
    }
}
