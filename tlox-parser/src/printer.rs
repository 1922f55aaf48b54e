//! Renders AST nodes in a parenthesized prefix form, e.g. `(+ 1 (* 2 3))`.

use crate::ast::{Expr, Stmt};
use crate::visitor::Visitor;

#[derive(Default)]
pub struct AstPrinter {
    out: String,
}

impl AstPrinter {
    pub fn print_expr(expr: &Expr) -> String {
        let mut printer = Self::default();
        printer.visit_expr(expr);
        printer.out
    }

    pub fn print_stmt(stmt: &Stmt) -> String {
        let mut printer = Self::default();
        printer.visit_stmt(stmt);
        printer.out
    }

    /// Prints each statement of `program` on its own line.
    pub fn print_program(program: &[Stmt]) -> String {
        program
            .iter()
            .map(Self::print_stmt)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Writes `(name part part...)`.
    fn parenthesize<'ast>(&mut self, name: &str, exprs: impl IntoIterator<Item = &'ast Expr>) {
        self.out.push('(');
        self.out.push_str(name);
        for expr in exprs {
            self.out.push(' ');
            self.visit_expr(expr);
        }
        self.out.push(')');
    }

    fn stmt_list<'ast>(&mut self, stmts: impl IntoIterator<Item = &'ast Stmt>) {
        for stmt in stmts {
            self.out.push(' ');
            self.visit_stmt(stmt);
        }
    }
}

impl<'ast> Visitor<'ast> for AstPrinter {
    fn visit_expr(&mut self, expr: &'ast Expr) {
        match expr {
            Expr::NumberLit(val) => self.out.push_str(&val.to_string()),
            Expr::BoolLit(val) => self.out.push_str(&val.to_string()),
            Expr::StringLit(val) => {
                self.out.push('"');
                self.out.push_str(val);
                self.out.push('"');
            }
            Expr::NilLit => self.out.push_str("nil"),
            Expr::Variable(ident) => self.out.push_str(&ident.lexeme),
            Expr::Grouping(inner) => self.parenthesize("group", Some(inner.as_ref())),
            Expr::Assign { ident, value } => {
                self.out.push_str("(= ");
                self.out.push_str(&ident.lexeme);
                self.out.push(' ');
                self.visit_expr(value);
                self.out.push(')');
            }
            Expr::Binary { lhs, op, rhs } | Expr::Logical { lhs, op, rhs } => {
                self.parenthesize(&op.lexeme, vec![lhs.as_ref(), rhs.as_ref()])
            }
            Expr::Unary { op, arg } => self.parenthesize(&op.lexeme, Some(arg.as_ref())),
            Expr::FnCall { callee, args, .. } => {
                self.out.push_str("(call ");
                self.visit_expr(callee);
                for arg in args {
                    self.out.push(' ');
                    self.visit_expr(arg);
                }
                self.out.push(')');
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt) {
        match stmt {
            Stmt::VarDeclaration { ident, initializer } => {
                self.out.push_str("(var ");
                self.out.push_str(&ident.lexeme);
                if let Some(initializer) = initializer {
                    self.out.push(' ');
                    self.visit_expr(initializer);
                }
                self.out.push(')');
            }
            Stmt::FnDeclaration(decl) => {
                let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
                self.out.push_str("(fun ");
                self.out.push_str(&decl.ident.lexeme);
                self.out.push_str(" (");
                self.out.push_str(&params.join(" "));
                self.out.push(')');
                self.stmt_list(&decl.body);
                self.out.push(')');
            }
            Stmt::Block(body) => {
                self.out.push_str("(block");
                self.stmt_list(body);
                self.out.push(')');
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.out.push_str("(if ");
                self.visit_expr(condition);
                self.out.push(' ');
                self.visit_stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.out.push(' ');
                    self.visit_stmt(else_branch);
                }
                self.out.push(')');
            }
            Stmt::PrintStmt(expr) => self.parenthesize("print", Some(expr)),
            Stmt::ExprStmt(expr) => self.parenthesize(";", Some(expr)),
            Stmt::ReturnStmt { value, .. } => self.parenthesize("return", value.as_ref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Token, TokenKind};

    #[test]
    fn test_print_expr() {
        // -123 * (45.67)
        let expr = Expr::Binary {
            lhs: Box::new(Expr::Unary {
                op: Token::new(TokenKind::Minus, "-", 1),
                arg: Box::new(Expr::NumberLit(123.0)),
            }),
            op: Token::new(TokenKind::Asterisk, "*", 1),
            rhs: Box::new(Expr::Grouping(Box::new(Expr::NumberLit(45.67)))),
        };
        assert_eq!(AstPrinter::print_expr(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn test_print_literals() {
        assert_eq!(AstPrinter::print_expr(&Expr::NilLit), "nil");
        assert_eq!(AstPrinter::print_expr(&Expr::BoolLit(false)), "false");
        assert_eq!(
            AstPrinter::print_expr(&Expr::StringLit("s".to_string())),
            "\"s\""
        );
    }

    #[test]
    fn test_print_program() {
        let program = vec![
            Stmt::PrintStmt(Expr::NumberLit(1.0)),
            Stmt::Block(Vec::new()),
        ];
        assert_eq!(AstPrinter::print_program(&program), "(print 1)\n(block)");
    }
}
