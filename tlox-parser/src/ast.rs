use crate::lexer::Token;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLit(f64),
    BoolLit(bool),
    StringLit(String),
    NilLit,
    /// A parenthesized expression (e.g. `(1 + 1)`).
    Grouping(Box<Expr>),
    /// A variable reference (e.g. `foo`).
    Variable(Token),
    /// An assignment to a variable (e.g. `foo = 1`).
    Assign {
        ident: Token,
        value: Box<Expr>,
    },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: Token,
        rhs: Box<Expr>,
    },
    /// A short-circuiting `and` / `or` expression.
    Logical {
        lhs: Box<Expr>,
        op: Token,
        rhs: Box<Expr>,
    },
    /// A unary expression (e.g. `-1`, `!true`).
    Unary {
        op: Token,
        arg: Box<Expr>,
    },
    /// A call expression (e.g. `foo(1, 2)`).
    /// `paren` is the closing parenthesis, used to locate runtime errors.
    FnCall {
        callee: Box<Expr>,
        paren: Token,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnDeclaration {
    pub ident: Token,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDeclaration {
        ident: Token,
        initializer: Option<Expr>,
    },
    /// Shared so that function values can outlive the tree they were declared in.
    FnDeclaration(Rc<FnDeclaration>),
    Block(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    PrintStmt(Expr),
    ExprStmt(Expr),
    ReturnStmt {
        keyword: Token,
        value: Option<Expr>,
    },
}
