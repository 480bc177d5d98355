//! Typed AST: the same shape as `minic_par::ast`, but every expression
//! carries the type semantic analysis inferred for it.

use minic_par::ast::LiteralKind;

use crate::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: Type,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Program(Vec<Stmt>),
    FunctionDecl {
        return_type: Type,
        name: String,
        params: Vec<Param>,
        body: Vec<Stmt>,
    },
    Block(Vec<Stmt>),
    VarDecl {
        var_type: Type,
        name: String,
        init: Option<Expr>,
    },
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        cond: Expr,
        body: Box<Stmt>,
    },
    For {
        init: Option<Box<Stmt>>,
        cond: Option<Expr>,
        post: Option<Expr>,
        body: Box<Stmt>,
    },
    Print(Expr),
    Return {
        value: Option<Expr>,
    },
    ExprStmt(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Assign { name: String, value: Box<Expr> },
    Binary { left: Box<Expr>, op: String, right: Box<Expr> },
    Unary { op: String, right: Box<Expr> },
    Call { name: String, args: Vec<Expr> },
    Literal { value: String, kind: LiteralKind },
    Var { name: String },
    Grouping(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub line: u32,
    pub col: u32,
    pub inferred: Type,
}
