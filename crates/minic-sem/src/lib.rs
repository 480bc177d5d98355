//! Semantic analysis: scoped name resolution, numeric promotion, and
//! type checking over the raw AST, producing a typed tree (`hir`).

pub mod analysis;
pub mod hir;
pub mod json;
pub mod scope;
pub mod types;

pub use analysis::{AnalysisResult, FuncSig, SemanticAnalyzer};
pub use types::Type;

#[cfg(test)]
mod tests {
    use super::*;
    use minic_lex::Lexer;
    use minic_par::Parser;

    fn analyze(src: &str) -> AnalysisResult {
        let tokens = Lexer::new(src).tokenize();
        let (ast, _) = Parser::new(tokens).parse();
        SemanticAnalyzer::analyze(&ast)
    }

    #[test]
    fn int_assignable_to_float() {
        let r = analyze("float y = 5;");
        assert!(r.diagnostics.is_empty());
    }

    #[test]
    fn undeclared_variable_is_error_type() {
        let r = analyze("print(x);");
        assert_eq!(r.diagnostics.len(), 1);
        let hir::Stmt::Program(body) = &r.hir else { panic!() };
        let hir::Stmt::Print(expr) = &body[0] else { panic!() };
        assert_eq!(expr.inferred, Type::Error);
    }

    #[test]
    fn redeclaration_in_same_scope_is_an_error() {
        let r = analyze("int x = 1; int x = 2;");
        assert_eq!(r.diagnostics.len(), 1);
    }

    #[test]
    fn shadowing_in_nested_scope_is_allowed() {
        let r = analyze("int x = 1; { int x = 2; }");
        assert!(r.diagnostics.is_empty());
    }

    #[test]
    fn function_call_arity_mismatch() {
        let r = analyze("int f(int a) { return a; } int r = f();");
        assert!(!r.diagnostics.is_empty());
    }

    #[test]
    fn equality_between_bool_and_int_is_rejected() {
        let r = analyze("bool b = true; int x = 1; print(b == x);");
        assert!(!r.diagnostics.is_empty());
    }

    #[test]
    fn modulo_requires_integers() {
        let r = analyze("float a = 1.5; print(a % 2);");
        assert!(!r.diagnostics.is_empty());
    }

    #[test]
    fn function_signatures_are_visible_before_their_definition_site() {
        let r = analyze("int a() { return b(); } int b() { return 1; }");
        assert!(r.diagnostics.is_empty());
    }

    #[test]
    fn local_may_shadow_a_same_named_parameter() {
        let r = analyze("int f(int x) { int x; return x; }");
        assert!(r.diagnostics.is_empty());
    }

    #[test]
    fn top_level_return_type_checks_but_never_errors() {
        let r = analyze("return 1 + true;");
        // the addition itself is ill-typed and reported...
        assert_eq!(r.diagnostics.len(), 1);
    }
}
