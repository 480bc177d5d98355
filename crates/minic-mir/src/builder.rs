//! Lowers the typed tree (`minic_sem::hir`) into three-address IR.
//!
//! Temporary and label counters live on the builder instance and are
//! monotonic for the lifetime of one build — a fresh `IrBuilder` starts
//! fresh, so rendered IR for a given program is always the same.

use minic_sem::hir;
use minic_sem::Type;

use crate::mir::Instr;

pub struct IrBuilder {
    temp_count: u32,
    label_count: u32,
}

impl IrBuilder {
    pub fn new() -> Self {
        Self {
            temp_count: 0,
            label_count: 0,
        }
    }

    pub fn build(program: &hir::Stmt) -> Vec<Instr> {
        let mut builder = Self::new();
        let mut code = Vec::new();
        builder.stmt(program, &mut code);
        code
    }

    fn fresh_temp(&mut self) -> String {
        self.temp_count += 1;
        format!("t{}", self.temp_count)
    }

    fn fresh_label_id(&mut self) -> u32 {
        self.label_count += 1;
        self.label_count
    }

    fn stmt(&mut self, stmt: &hir::Stmt, code: &mut Vec<Instr>) {
        match stmt {
            hir::Stmt::Program(body) => {
                for s in body {
                    self.stmt(s, code);
                }
            }
            hir::Stmt::FunctionDecl { name, params, body, .. } => {
                let param_names = params.iter().map(|p| p.name.clone()).collect();
                code.push(Instr::FuncStart(name.clone(), param_names));
                for s in body {
                    self.stmt(s, code);
                }
                code.push(Instr::FuncEnd(name.clone()));
            }
            hir::Stmt::Block(body) => {
                for s in body {
                    self.stmt(s, code);
                }
            }
            hir::Stmt::VarDecl { name, init, .. } => {
                if let Some(init) = init {
                    let value = self.expr(init, code);
                    code.push(Instr::Assign(name.clone(), value));
                }
            }
            hir::Stmt::If { cond, then_branch, else_branch } => {
                let cond_op = self.expr(cond, code);
                let id = self.fresh_label_id();
                let l_else = format!("Lelse{id}");
                let l_end = format!("Lend{id}");
                code.push(Instr::IfFalse(cond_op, l_else.clone()));
                self.stmt(then_branch, code);
                code.push(Instr::Goto(l_end.clone()));
                code.push(Instr::Label(l_else));
                if let Some(else_branch) = else_branch {
                    self.stmt(else_branch, code);
                }
                code.push(Instr::Label(l_end));
            }
            hir::Stmt::While { cond, body } => {
                let id = self.fresh_label_id();
                let l_start = format!("Lwhile{id}");
                let l_end = format!("Lwend{id}");
                code.push(Instr::Label(l_start.clone()));
                let cond_op = self.expr(cond, code);
                code.push(Instr::IfFalse(cond_op, l_end.clone()));
                self.stmt(body, code);
                code.push(Instr::Goto(l_start));
                code.push(Instr::Label(l_end));
            }
            hir::Stmt::For { init, cond, post, body } => {
                if let Some(init) = init {
                    self.stmt(init, code);
                }
                let id = self.fresh_label_id();
                let l_start = format!("Lfor{id}");
                let l_end = format!("Lfend{id}");
                code.push(Instr::Label(l_start.clone()));
                if let Some(cond) = cond {
                    let cond_op = self.expr(cond, code);
                    code.push(Instr::IfFalse(cond_op, l_end.clone()));
                }
                self.stmt(body, code);
                if let Some(post) = post {
                    self.expr(post, code);
                }
                code.push(Instr::Goto(l_start));
                code.push(Instr::Label(l_end));
            }
            hir::Stmt::Print(expr) => {
                let value = self.expr(expr, code);
                code.push(Instr::Print(value));
            }
            hir::Stmt::Return { value } => {
                let value = value.as_ref().map(|e| self.expr(e, code));
                code.push(Instr::Return(value));
            }
            hir::Stmt::ExprStmt(expr) => {
                self.expr(expr, code);
            }
        }
    }

    fn expr(&mut self, expr: &hir::Expr, code: &mut Vec<Instr>) -> String {
        match &expr.kind {
            hir::ExprKind::Literal { value, .. } => value.clone(),
            hir::ExprKind::Var { name } => name.clone(),
            hir::ExprKind::Grouping(inner) => self.expr(inner, code),
            hir::ExprKind::Assign { name, value } => {
                let value_op = self.expr(value, code);
                code.push(Instr::Assign(name.clone(), value_op));
                name.clone()
            }
            hir::ExprKind::Unary { op, right } => {
                let right_op = self.expr(right, code);
                let dst = self.fresh_temp();
                code.push(Instr::Unary(dst.clone(), op.clone(), right_op));
                dst
            }
            hir::ExprKind::Binary { left, op, right } => {
                let left_op = self.expr(left, code);
                let right_op = self.expr(right, code);
                let dst = self.fresh_temp();
                code.push(Instr::Bin(dst.clone(), op.clone(), left_op, right_op));
                dst
            }
            hir::ExprKind::Call { name, args } => {
                let arg_ops = args.iter().map(|a| self.expr(a, code)).collect();
                if expr.inferred == Type::Void {
                    code.push(Instr::Call(None, name.clone(), arg_ops));
                    "0".to_string()
                } else {
                    let dst = self.fresh_temp();
                    code.push(Instr::Call(Some(dst.clone()), name.clone(), arg_ops));
                    dst
                }
            }
        }
    }
}

impl Default for IrBuilder {
    fn default() -> Self {
        Self::new()
    }
}
