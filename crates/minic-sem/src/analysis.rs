//! Single-pass semantic analyzer: raw AST to typed AST (`hir`), alongside
//! the scope tree and function signature table the rest of the pipeline
//! (and the output bundle) needs.

use indexmap::IndexMap;
use minic_par::ast::{self, LiteralKind};
use minic_util::Diagnostic;

use crate::hir;
use crate::scope::{ScopeKind, ScopeTree};
use crate::types::Type;

#[derive(Debug, Clone)]
pub struct FuncSig {
    pub return_type: Type,
    pub params: Vec<(Type, String)>,
}

pub struct SemanticAnalyzer {
    scopes: ScopeTree,
    funcs: IndexMap<String, FuncSig>,
    diagnostics: Vec<Diagnostic>,
    return_stack: Vec<Type>,
}

pub struct AnalysisResult {
    pub hir: hir::Stmt,
    pub scopes: ScopeTree,
    pub funcs: IndexMap<String, FuncSig>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SemanticAnalyzer {
    pub fn analyze(program: &ast::Stmt) -> AnalysisResult {
        let mut analyzer = SemanticAnalyzer {
            scopes: ScopeTree::new(),
            funcs: IndexMap::new(),
            diagnostics: Vec::new(),
            return_stack: Vec::new(),
        };
        let ast::Stmt::Program(items) = program else {
            panic!("analyze() expects the parser's Program root");
        };
        analyzer.collect_signatures(items);
        let body = items.iter().map(|s| analyzer.visit_stmt(s)).collect();
        AnalysisResult {
            hir: hir::Stmt::Program(body),
            scopes: analyzer.scopes,
            funcs: analyzer.funcs,
            diagnostics: analyzer.diagnostics,
        }
    }

    fn error(&mut self, message: impl Into<String>, line: u32, col: u32) {
        self.diagnostics.push(Diagnostic::at(message, line, col));
    }

    fn collect_signatures(&mut self, items: &[ast::Stmt]) {
        for item in items {
            if let ast::Stmt::FunctionDecl {
                return_type,
                name,
                params,
                line,
                col,
                ..
            } = item
            {
                if self.funcs.contains_key(name) {
                    self.error(format!("function '{name}' is already declared"), *line, *col);
                    continue;
                }
                let params = params.iter().map(|p| (Type::from(p.ty), p.name.clone())).collect();
                self.funcs.insert(
                    name.clone(),
                    FuncSig {
                        return_type: Type::from(*return_type),
                        params,
                    },
                );
            }
        }
    }

    fn visit_stmt(&mut self, stmt: &ast::Stmt) -> hir::Stmt {
        match stmt {
            ast::Stmt::Program(items) => {
                hir::Stmt::Program(items.iter().map(|s| self.visit_stmt(s)).collect())
            }
            ast::Stmt::FunctionDecl {
                return_type,
                name,
                params,
                body,
                line,
                col,
            } => {
                if !self.return_stack.is_empty() {
                    self.error("nested function declarations are not allowed", *line, *col);
                }
                let return_type = Type::from(*return_type);
                self.scopes.enter(ScopeKind::Function);
                self.return_stack.push(return_type);
                let hir_params = params
                    .iter()
                    .map(|p| {
                        let ty = Type::from(p.ty);
                        if !self.scopes.define(&p.name, ty) {
                            self.error(format!("parameter '{}' is already declared", p.name), *line, *col);
                        }
                        hir::Param { ty, name: p.name.clone() }
                    })
                    .collect();
                // The body gets its own scope, nested under the params' scope,
                // so a local can shadow a same-named parameter: `define` only
                // rejects redeclarations within the current scope.
                self.scopes.enter(ScopeKind::Block);
                let hir_body = body.iter().map(|s| self.visit_stmt(s)).collect();
                self.scopes.exit();
                self.return_stack.pop();
                self.scopes.exit();
                hir::Stmt::FunctionDecl {
                    return_type,
                    name: name.clone(),
                    params: hir_params,
                    body: hir_body,
                }
            }
            ast::Stmt::Block(items) => {
                self.scopes.enter(ScopeKind::Block);
                let body = items.iter().map(|s| self.visit_stmt(s)).collect();
                self.scopes.exit();
                hir::Stmt::Block(body)
            }
            ast::Stmt::VarDecl {
                var_type,
                name,
                init,
                line,
                col,
            } => {
                let var_type = Type::from(*var_type);
                let init = init.as_ref().map(|e| self.visit_expr(e));
                if let Some(init) = &init {
                    if !Type::assignable(var_type, init.inferred) {
                        self.error(
                            format!(
                                "cannot initialize '{name}' of type '{var_type}' with a value of type '{}'",
                                init.inferred
                            ),
                            *line,
                            *col,
                        );
                    }
                }
                if !self.scopes.define(name, var_type) {
                    self.error(format!("'{name}' is already declared in this scope"), *line, *col);
                }
                hir::Stmt::VarDecl {
                    var_type,
                    name: name.clone(),
                    init,
                }
            }
            ast::Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let cond = self.visit_expr(cond);
                self.require_bool(&cond, "if condition");
                let then_branch = Box::new(self.visit_stmt(then_branch));
                let else_branch = else_branch.as_ref().map(|s| Box::new(self.visit_stmt(s)));
                hir::Stmt::If {
                    cond,
                    then_branch,
                    else_branch,
                }
            }
            ast::Stmt::While { cond, body } => {
                let cond = self.visit_expr(cond);
                self.require_bool(&cond, "while condition");
                let body = Box::new(self.visit_stmt(body));
                hir::Stmt::While { cond, body }
            }
            ast::Stmt::For { init, cond, post, body } => {
                self.scopes.enter(ScopeKind::Block);
                let init = init.as_ref().map(|s| Box::new(self.visit_stmt(s)));
                let cond = cond.as_ref().map(|e| {
                    let typed = self.visit_expr(e);
                    self.require_bool(&typed, "for condition");
                    typed
                });
                let post = post.as_ref().map(|e| self.visit_expr(e));
                let body = Box::new(self.visit_stmt(body));
                self.scopes.exit();
                hir::Stmt::For { init, cond, post, body }
            }
            ast::Stmt::Print(expr) => hir::Stmt::Print(self.visit_expr(expr)),
            ast::Stmt::Return { value, line, col } => {
                let value = value.as_ref().map(|e| self.visit_expr(e));
                if let Some(&return_type) = self.return_stack.last() {
                    match &value {
                        None => {
                            if return_type != Type::Void {
                                self.error(
                                    format!("function must return a value of type '{return_type}'"),
                                    *line,
                                    *col,
                                );
                            }
                        }
                        Some(v) => {
                            if !Type::assignable(return_type, v.inferred) {
                                self.error(
                                    format!(
                                        "return type mismatch: expected '{return_type}', found '{}'",
                                        v.inferred
                                    ),
                                    *line,
                                    *col,
                                );
                            }
                        }
                    }
                }
                hir::Stmt::Return { value }
            }
            ast::Stmt::ExprStmt(expr) => hir::Stmt::ExprStmt(self.visit_expr(expr)),
        }
    }

    fn require_bool(&mut self, expr: &hir::Expr, context: &str) {
        if expr.inferred != Type::Bool && expr.inferred != Type::Error {
            self.error(
                format!("{context} must be of type 'bool', found '{}'", expr.inferred),
                expr.line,
                expr.col,
            );
        }
    }

    fn visit_expr(&mut self, expr: &ast::Expr) -> hir::Expr {
        let (line, col) = expr.line_col();
        match expr {
            ast::Expr::Literal { value, kind, .. } => {
                let ty = match kind {
                    LiteralKind::Int => Type::Int,
                    LiteralKind::Float => Type::Float,
                    LiteralKind::Bool => Type::Bool,
                };
                hir::Expr {
                    kind: hir::ExprKind::Literal { value: value.clone(), kind: *kind },
                    line,
                    col,
                    inferred: ty,
                }
            }
            ast::Expr::Var { name, .. } => {
                let ty = match self.scopes.resolve(name) {
                    Some(ty) => ty,
                    None => {
                        self.error(format!("undeclared variable '{name}'"), line, col);
                        Type::Error
                    }
                };
                hir::Expr {
                    kind: hir::ExprKind::Var { name: name.clone() },
                    line,
                    col,
                    inferred: ty,
                }
            }
            ast::Expr::Grouping(inner) => {
                let inner = self.visit_expr(inner);
                let ty = inner.inferred;
                hir::Expr {
                    kind: hir::ExprKind::Grouping(Box::new(inner)),
                    line,
                    col,
                    inferred: ty,
                }
            }
            ast::Expr::Assign { name, value, .. } => {
                let value = self.visit_expr(value);
                let ty = match self.scopes.resolve(name) {
                    Some(var_ty) => {
                        if !Type::assignable(var_ty, value.inferred) {
                            self.error(
                                format!(
                                    "cannot assign a value of type '{}' to '{name}' of type '{var_ty}'",
                                    value.inferred
                                ),
                                line,
                                col,
                            );
                        }
                        var_ty
                    }
                    None => {
                        self.error(format!("undeclared variable '{name}'"), line, col);
                        Type::Error
                    }
                };
                hir::Expr {
                    kind: hir::ExprKind::Assign { name: name.clone(), value: Box::new(value) },
                    line,
                    col,
                    inferred: ty,
                }
            }
            ast::Expr::Unary { op, right, .. } => {
                let right = self.visit_expr(right);
                let ty = self.unary_result(op, right.inferred, line, col);
                hir::Expr {
                    kind: hir::ExprKind::Unary { op: op.clone(), right: Box::new(right) },
                    line,
                    col,
                    inferred: ty,
                }
            }
            ast::Expr::Binary { left, op, right, .. } => {
                let left = self.visit_expr(left);
                let right = self.visit_expr(right);
                let ty = self.binary_result(op, left.inferred, right.inferred, line, col);
                hir::Expr {
                    kind: hir::ExprKind::Binary {
                        left: Box::new(left),
                        op: op.clone(),
                        right: Box::new(right),
                    },
                    line,
                    col,
                    inferred: ty,
                }
            }
            ast::Expr::Call { name, args, .. } => {
                let sig = self.funcs.get(name).cloned();
                let typed_args: Vec<hir::Expr> = args.iter().map(|a| self.visit_expr(a)).collect();
                let ty = match sig {
                    None => {
                        self.error(format!("call to undeclared function '{name}'"), line, col);
                        Type::Error
                    }
                    Some(sig) => {
                        if sig.params.len() != typed_args.len() {
                            self.error(
                                format!(
                                    "function '{name}' expects {} argument(s), found {}",
                                    sig.params.len(),
                                    typed_args.len()
                                ),
                                line,
                                col,
                            );
                        } else {
                            for (arg, (param_ty, _)) in typed_args.iter().zip(sig.params.iter()) {
                                if !Type::assignable(*param_ty, arg.inferred) {
                                    self.error(
                                        format!(
                                            "argument type mismatch in call to '{name}': expected '{param_ty}', found '{}'",
                                            arg.inferred
                                        ),
                                        arg.line,
                                        arg.col,
                                    );
                                }
                            }
                        }
                        sig.return_type
                    }
                };
                hir::Expr {
                    kind: hir::ExprKind::Call { name: name.clone(), args: typed_args },
                    line,
                    col,
                    inferred: ty,
                }
            }
        }
    }

    fn unary_result(&mut self, op: &str, operand: Type, line: u32, col: u32) -> Type {
        if operand == Type::Error {
            return Type::Error;
        }
        match op {
            "!" => {
                if operand == Type::Bool {
                    Type::Bool
                } else {
                    self.error(format!("operator '!' requires a 'bool' operand, found '{operand}'"), line, col);
                    Type::Error
                }
            }
            "+" | "-" => {
                if operand.is_numeric() {
                    operand
                } else {
                    self.error(format!("operator '{op}' requires a numeric operand, found '{operand}'"), line, col);
                    Type::Error
                }
            }
            _ => unreachable!("parser only emits !, +, - as unary operators"),
        }
    }

    fn binary_result(&mut self, op: &str, left: Type, right: Type, line: u32, col: u32) -> Type {
        if left == Type::Error || right == Type::Error {
            return Type::Error;
        }
        match op {
            "+" | "-" | "*" | "/" => {
                if left.is_numeric() && right.is_numeric() {
                    if left == Type::Float || right == Type::Float {
                        Type::Float
                    } else {
                        Type::Int
                    }
                } else {
                    self.error(format!("operator '{op}' requires numeric operands, found '{left}' and '{right}'"), line, col);
                    Type::Error
                }
            }
            "%" => {
                if left == Type::Int && right == Type::Int {
                    Type::Int
                } else {
                    self.error(format!("operator '%' requires 'int' operands, found '{left}' and '{right}'"), line, col);
                    Type::Error
                }
            }
            "<" | "<=" | ">" | ">=" => {
                if left.is_numeric() && right.is_numeric() {
                    Type::Bool
                } else {
                    self.error(format!("operator '{op}' requires numeric operands, found '{left}' and '{right}'"), line, col);
                    Type::Error
                }
            }
            "==" | "!=" => {
                if left == right {
                    Type::Bool
                } else {
                    self.error(format!("cannot compare '{left}' with '{right}'"), line, col);
                    Type::Error
                }
            }
            "&&" | "||" => {
                if left == Type::Bool && right == Type::Bool {
                    Type::Bool
                } else {
                    self.error(format!("operator '{op}' requires 'bool' operands, found '{left}' and '{right}'"), line, col);
                    Type::Error
                }
            }
            _ => unreachable!("parser only emits the operators handled above"),
        }
    }
}
