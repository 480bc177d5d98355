//! Orchestrates the full pipeline — lex, parse, analyze, build IR,
//! optimize, lower to bytecode, peephole, run — and bundles every
//! stage's output into a single [`CompileResult`] record.

use serde::Serialize;
use tracing::info;

pub mod error;
pub use error::DriverError;

use minic_lex::{Lexer, Token};
use minic_lir::{lower, peephole};
use minic_mir::{optimize, IrBuilder};
use minic_par::{json as par_json, Parser};
use minic_runtime::Vm;
use minic_sem::{json as sem_json, SemanticAnalyzer};
use minic_util::Diagnostic;

#[derive(Debug, Clone, Serialize)]
pub struct TokenRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub lexeme: String,
    pub line: u32,
    pub col: u32,
}

impl From<&Token> for TokenRecord {
    fn from(t: &Token) -> Self {
        TokenRecord {
            kind: t.kind.name().to_string(),
            lexeme: t.lexeme.clone(),
            line: t.line,
            col: t.col,
        }
    }
}

/// The full output bundle for one `compile()` invocation.
#[derive(Debug, Clone, Serialize)]
pub struct CompileResult {
    pub stage_logs: Vec<String>,
    pub errors: Vec<Diagnostic>,
    pub tokens: Vec<TokenRecord>,
    pub ast: serde_json::Value,
    pub typed_ast: serde_json::Value,
    pub symbol_table: serde_json::Value,
    pub ir: Vec<String>,
    pub ir_optimized: Vec<String>,
    pub bytecode: Vec<String>,
    pub bytecode_optimized: Vec<String>,
    pub output: String,
    /// Threaded through from the CLI's `--persist` flag. This crate does
    /// not act on it; an external transport/persistence layer would.
    pub persist: bool,
}

pub struct Pipeline;

impl Pipeline {
    /// Runs every stage to completion regardless of earlier diagnostics
    /// and returns the complete bundle.
    pub fn compile(source: &str, persist: bool) -> CompileResult {
        let mut stage_logs = Vec::new();

        stage_logs.push("lex: start".to_string());
        let tokens = Lexer::new(source).tokenize();
        stage_logs.push(format!("lex: done, {} tokens", tokens.len()));
        info!(count = tokens.len(), "lexed source");

        stage_logs.push("parse: start".to_string());
        let (ast, mut errors) = Parser::new(tokens.clone()).parse();
        stage_logs.push(format!("parse: done, {} errors", errors.len()));
        info!(errors = errors.len(), "parsed tokens");

        stage_logs.push("analyze: start".to_string());
        let analysis = SemanticAnalyzer::analyze(&ast);
        stage_logs.push(format!("analyze: done, {} errors", analysis.diagnostics.len()));
        info!(errors = analysis.diagnostics.len(), "analyzed ast");
        errors.extend(analysis.diagnostics);

        stage_logs.push("ir: start".to_string());
        let ir = IrBuilder::build(&analysis.hir);
        stage_logs.push(format!("ir: done, {} instructions", ir.len()));

        stage_logs.push("optimize: start".to_string());
        let ir_optimized = optimize(&ir);
        stage_logs.push(format!("optimize: done, {} instructions", ir_optimized.len()));

        stage_logs.push("codegen: start".to_string());
        let bytecode = lower(&ir_optimized);
        stage_logs.push(format!("codegen: done, {} instructions", bytecode.len()));

        stage_logs.push("peephole: start".to_string());
        let bytecode_optimized = peephole(&bytecode);
        stage_logs.push(format!("peephole: done, {} instructions", bytecode_optimized.len()));

        stage_logs.push("run: start".to_string());
        let output = Vm::new(bytecode_optimized.clone()).run();
        stage_logs.push("run: done".to_string());
        info!("execution finished");

        let hir_ast = &analysis.hir;
        let typed_ast = sem_json::stmt_to_json(hir_ast);
        let ast_json = match &ast {
            minic_par::Stmt::Program(body) => par_json::program_to_json(body),
            other => par_json::stmt_to_json(other),
        };

        CompileResult {
            stage_logs,
            errors,
            tokens: tokens.iter().map(TokenRecord::from).collect(),
            ast: ast_json,
            typed_ast,
            symbol_table: sem_json::symbol_table_to_json(&analysis.scopes),
            ir: ir.iter().map(|i| i.to_string()).collect(),
            ir_optimized: ir_optimized.iter().map(|i| i.to_string()).collect(),
            bytecode: bytecode.iter().map(|b| b.to_string()).collect(),
            bytecode_optimized: bytecode_optimized.iter().map(|b| b.to_string()).collect(),
            output,
            persist,
        }
    }
}

/// Library entry point for callers outside this crate that only need a
/// compile result, with no CLI-level `--persist` marker to thread.
pub fn compile(source: &str) -> CompileResult {
    Pipeline::compile(source, false)
}
