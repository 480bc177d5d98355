//! JSON projection of the raw AST, used for the `ast` field of the output
//! bundle. The typed projection (with `inferred` on every expression)
//! lives in `minic_sem::json` since only semantic analysis knows types.

use serde_json::{json, Value};

use crate::ast::{Expr, LiteralKind, Param, Stmt};

pub fn program_to_json(body: &[Stmt]) -> Value {
    json!({
        "type": "Program",
        "body": body.iter().map(stmt_to_json).collect::<Vec<_>>(),
    })
}

pub fn stmt_to_json(stmt: &Stmt) -> Value {
    match stmt {
        Stmt::Program(body) => program_to_json(body),
        Stmt::FunctionDecl {
            return_type,
            name,
            params,
            body,
            line,
            col,
        } => json!({
            "type": "FunctionDecl",
            "returnType": return_type.name(),
            "name": name,
            "params": params.iter().map(param_to_json).collect::<Vec<_>>(),
            "body": body.iter().map(stmt_to_json).collect::<Vec<_>>(),
            "line": line,
            "col": col,
        }),
        Stmt::Block(body) => json!({
            "type": "Block",
            "body": body.iter().map(stmt_to_json).collect::<Vec<_>>(),
        }),
        Stmt::VarDecl {
            var_type,
            name,
            init,
            line,
            col,
        } => json!({
            "type": "VarDecl",
            "varType": var_type.name(),
            "name": name,
            "init": init.as_ref().map(expr_to_json),
            "line": line,
            "col": col,
        }),
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => json!({
            "type": "If",
            "cond": expr_to_json(cond),
            "then": stmt_to_json(then_branch),
            "else": else_branch.as_ref().map(|s| stmt_to_json(s)),
        }),
        Stmt::While { cond, body } => json!({
            "type": "While",
            "cond": expr_to_json(cond),
            "body": stmt_to_json(body),
        }),
        Stmt::For {
            init,
            cond,
            post,
            body,
        } => json!({
            "type": "For",
            "init": init.as_ref().map(|s| stmt_to_json(s)),
            "cond": cond.as_ref().map(expr_to_json),
            "post": post.as_ref().map(expr_to_json),
            "body": stmt_to_json(body),
        }),
        Stmt::Print(expr) => json!({
            "type": "Print",
            "expr": expr_to_json(expr),
        }),
        Stmt::Return { value, line, col } => json!({
            "type": "Return",
            "value": value.as_ref().map(expr_to_json),
            "line": line,
            "col": col,
        }),
        Stmt::ExprStmt(expr) => json!({
            "type": "ExprStmt",
            "expr": expr_to_json(expr),
        }),
    }
}

fn param_to_json(p: &Param) -> Value {
    json!({ "type": p.ty.name(), "name": p.name })
}

pub fn expr_to_json(expr: &Expr) -> Value {
    match expr {
        Expr::Assign { name, value, line, col } => json!({
            "type": "Assign",
            "name": name,
            "value": expr_to_json(value),
            "line": line,
            "col": col,
        }),
        Expr::Binary { left, op, right, line, col } => json!({
            "type": "Binary",
            "op": op,
            "left": expr_to_json(left),
            "right": expr_to_json(right),
            "line": line,
            "col": col,
        }),
        Expr::Unary { op, right, line, col } => json!({
            "type": "Unary",
            "op": op,
            "right": expr_to_json(right),
            "line": line,
            "col": col,
        }),
        Expr::Call { name, args, line, col } => json!({
            "type": "Call",
            "name": name,
            "args": args.iter().map(expr_to_json).collect::<Vec<_>>(),
            "line": line,
            "col": col,
        }),
        Expr::Literal { value, kind, line, col } => json!({
            "type": "Literal",
            "value": value,
            "kind": literal_kind_name(*kind),
            "line": line,
            "col": col,
        }),
        Expr::Var { name, line, col } => json!({
            "type": "Var",
            "name": name,
            "line": line,
            "col": col,
        }),
        Expr::Grouping(inner) => json!({
            "type": "Grouping",
            "expr": expr_to_json(inner),
        }),
    }
}

fn literal_kind_name(kind: LiteralKind) -> &'static str {
    match kind {
        LiteralKind::Int => "int",
        LiteralKind::Float => "float",
        LiteralKind::Bool => "bool",
    }
}
