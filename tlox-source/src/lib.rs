//! Source code representation and error management.

use std::{cell::RefCell, fmt};

/// Represents source code.
pub struct Source<'a> {
    /// Original source code.
    pub content: &'a str,
    /// Accumulated errors.
    pub errors: ErrorReporter,
}

impl<'a> Source<'a> {
    /// Create a new `Source` with the specified `content`.
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            errors: ErrorReporter::new(),
        }
    }

    /// Returns `true` if `Source` has no accumulated errors. Returns `false` otherwise.
    pub fn has_no_errors(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<'a> From<&'a str> for Source<'a> {
    fn from(content: &'a str) -> Self {
        Source::new(content)
    }
}

/// Where on its line a [`SyntaxError`] occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorLocation {
    /// No token is attached (lexical errors).
    Unknown,
    /// The error was found at the end marker.
    End,
    /// The error was found at the token with this lexeme.
    Lexeme(String),
}

impl fmt::Display for ErrorLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorLocation::Unknown => Ok(()),
            ErrorLocation::End => write!(f, " at end"),
            ErrorLocation::Lexeme(lexeme) => write!(f, " at '{}'", lexeme),
        }
    }
}

/// Represents a syntax error (compile time error).
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    message: String,
    line: usize,
    location: ErrorLocation,
}

impl SyntaxError {
    /// Create a new syntax error with the specified `message` on `line`.
    pub fn new(message: impl ToString, line: usize) -> Self {
        Self {
            message: message.to_string(),
            line,
            location: ErrorLocation::Unknown,
        }
    }

    /// Attaches a location to the error.
    pub fn at(mut self, location: ErrorLocation) -> Self {
        self.location = location;
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn location(&self) -> &ErrorLocation {
        &self.location
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[line {line}] Error{location}: {message}",
            line = self.line,
            location = self.location,
            message = self.message
        )
    }
}

/// Manages all the errors.
pub struct ErrorReporter {
    errors: RefCell<Vec<SyntaxError>>,
}

impl ErrorReporter {
    /// Create an empty `ErrorReporter`.
    pub fn new() -> Self {
        Self {
            errors: RefCell::new(Vec::new()),
        }
    }

    /// Adds an error to the `ErrorReporter`.
    /// This method uses the interior mutability pattern. This does not require mutability for ergonomics.
    pub fn add_error(&self, error: SyntaxError) {
        tracing::debug!(%error, "syntax error reported");
        // This should be the only place where self.errors is borrowed mutably.
        self.errors.borrow_mut().push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    /// Returns a copy of the accumulated errors, in the order they were reported.
    pub fn errors(&self) -> Vec<SyntaxError> {
        self.errors.borrow().clone()
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ErrorReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors.borrow();
        for error in errors.iter() {
            writeln!(f, "{}", error)?;
        }

        Ok(())
    }
}
