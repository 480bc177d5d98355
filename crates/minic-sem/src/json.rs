//! JSON projections of the typed tree and the symbol table, for the
//! `typed_ast` and `symbol_table` fields of the output bundle.

use minic_par::ast::LiteralKind;
use serde_json::{json, Value};

use crate::hir::{Expr, ExprKind, Param, Stmt};
use crate::scope::ScopeTree;

pub fn stmt_to_json(stmt: &Stmt) -> Value {
    match stmt {
        Stmt::Program(body) => json!({
            "type": "Program",
            "body": body.iter().map(stmt_to_json).collect::<Vec<_>>(),
        }),
        Stmt::FunctionDecl { return_type, name, params, body } => json!({
            "type": "FunctionDecl",
            "returnType": return_type.name(),
            "name": name,
            "params": params.iter().map(param_to_json).collect::<Vec<_>>(),
            "body": body.iter().map(stmt_to_json).collect::<Vec<_>>(),
        }),
        Stmt::Block(body) => json!({
            "type": "Block",
            "body": body.iter().map(stmt_to_json).collect::<Vec<_>>(),
        }),
        Stmt::VarDecl { var_type, name, init } => json!({
            "type": "VarDecl",
            "varType": var_type.name(),
            "name": name,
            "init": init.as_ref().map(expr_to_json),
        }),
        Stmt::If { cond, then_branch, else_branch } => json!({
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
        Stmt::For { init, cond, post, body } => json!({
            "type": "For",
            "init": init.as_ref().map(|s| stmt_to_json(s)),
            "cond": cond.as_ref().map(expr_to_json),
            "post": post.as_ref().map(expr_to_json),
            "body": stmt_to_json(body),
        }),
        Stmt::Print(expr) => json!({ "type": "Print", "expr": expr_to_json(expr) }),
        Stmt::Return { value } => json!({
            "type": "Return",
            "value": value.as_ref().map(expr_to_json),
        }),
        Stmt::ExprStmt(expr) => json!({ "type": "ExprStmt", "expr": expr_to_json(expr) }),
    }
}

fn param_to_json(p: &Param) -> Value {
    json!({ "type": p.ty.name(), "name": p.name })
}

pub fn expr_to_json(expr: &Expr) -> Value {
    let mut value = match &expr.kind {
        ExprKind::Assign { name, value } => json!({
            "type": "Assign",
            "name": name,
            "value": expr_to_json(value),
        }),
        ExprKind::Binary { left, op, right } => json!({
            "type": "Binary",
            "op": op,
            "left": expr_to_json(left),
            "right": expr_to_json(right),
        }),
        ExprKind::Unary { op, right } => json!({
            "type": "Unary",
            "op": op,
            "right": expr_to_json(right),
        }),
        ExprKind::Call { name, args } => json!({
            "type": "Call",
            "name": name,
            "args": args.iter().map(expr_to_json).collect::<Vec<_>>(),
        }),
        ExprKind::Literal { value, kind } => json!({
            "type": "Literal",
            "value": value,
            "kind": literal_kind_name(*kind),
        }),
        ExprKind::Var { name } => json!({ "type": "Var", "name": name }),
        ExprKind::Grouping(inner) => json!({ "type": "Grouping", "expr": expr_to_json(inner) }),
    };
    value["line"] = json!(expr.line);
    value["col"] = json!(expr.col);
    value["inferred"] = json!(expr.inferred.name());
    value
}

fn literal_kind_name(kind: LiteralKind) -> &'static str {
    match kind {
        LiteralKind::Int => "int",
        LiteralKind::Float => "float",
        LiteralKind::Bool => "bool",
    }
}

pub fn symbol_table_to_json(scopes: &ScopeTree) -> Value {
    let entries: Vec<Value> = scopes
        .all_scopes()
        .map(|(id, scope)| {
            let symbols: serde_json::Map<String, Value> = scope
                .bindings
                .iter()
                .map(|(name, ty)| (name.clone(), json!(ty.name())))
                .collect();
            json!({
                "level": scopes.level_of(id),
                "symbols": symbols,
            })
        })
        .collect();
    json!({ "scopes": entries })
}
