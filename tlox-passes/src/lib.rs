//! Static passes run over the AST between parsing and evaluation.

pub mod return_check;
