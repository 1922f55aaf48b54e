//! Rejects `return` statements outside of function bodies.

use tlox_parser::ast::Stmt;
use tlox_parser::visitor::{walk_stmt, Visitor};
use tlox_source::{ErrorLocation, Source, SyntaxError};

/// Return statement checking pass.
pub struct ReturnCheck<'a> {
    /// How many function bodies enclose the statement being visited. `0` is top-level code.
    fn_depth: u32,
    source: &'a Source<'a>,
}

impl<'a> ReturnCheck<'a> {
    pub fn new(source: &'a Source) -> Self {
        Self {
            fn_depth: 0,
            source,
        }
    }

    pub fn check_program(&mut self, program: &[Stmt]) {
        for stmt in program {
            self.visit_stmt(stmt);
        }
    }
}

impl<'a, 'ast> Visitor<'ast> for ReturnCheck<'a> {
    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match stmt {
            Stmt::FnDeclaration(_) => {
                self.fn_depth += 1;
                walk_stmt(self, stmt);
                self.fn_depth -= 1;
            }
            Stmt::ReturnStmt { keyword, .. } => {
                if self.fn_depth == 0 {
                    self.source.errors.add_error(
                        SyntaxError::new("Can't return from top-level code.", keyword.line)
                            .at(ErrorLocation::Lexeme(keyword.lexeme.clone())),
                    );
                }
                walk_stmt(self, stmt);
            }
            _ => walk_stmt(self, stmt),
        }
    }
}
