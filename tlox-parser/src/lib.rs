//! Scanner, AST and recursive descent parser.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod visitor;
