//! Tree walking evaluation of tlox programs.

pub mod environment;
pub mod error;
pub mod interpreter;
pub mod value;

pub use error::RuntimeError;
pub use interpreter::Interpreter;
pub use value::Value;
