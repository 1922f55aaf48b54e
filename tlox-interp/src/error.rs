use std::io;
use thiserror::Error;
use tlox_parser::lexer::Token;

use crate::value::Value;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A type mismatch, unresolved name or bad call. `token` locates the error in the source.
    #[error("[line {}] {}", .token.line, .message)]
    Eval { token: Token, message: String },
    /// Program output could not be written.
    #[error("failed to write program output: {0}")]
    Output(#[from] io::Error),
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl ToString) -> Self {
        RuntimeError::Eval {
            token: token.clone(),
            message: message.to_string(),
        }
    }

    /// Returns the error message without the line prefix.
    pub fn message(&self) -> String {
        match self {
            RuntimeError::Eval { message, .. } => message.clone(),
            RuntimeError::Output(err) => err.to_string(),
        }
    }
}

/// Unwinds statement execution, either because of an error or because of a `return`.
pub(crate) enum Interrupt {
    Error(RuntimeError),
    Return(Value),
}

impl From<RuntimeError> for Interrupt {
    fn from(err: RuntimeError) -> Self {
        Interrupt::Error(err)
    }
}
