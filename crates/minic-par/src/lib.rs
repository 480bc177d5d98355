//! Recursive-descent parsing: tokens to a raw AST, plus its JSON
//! projection for the `ast` field of the output bundle.

pub mod ast;
pub mod json;
pub mod parser;

pub use ast::{Expr, LiteralKind, Param, Stmt, Type};
pub use parser::Parser;

#[cfg(test)]
mod tests {
    use super::*;
    use minic_lex::Lexer;

    fn parse(src: &str) -> (Stmt, Vec<minic_util::Diagnostic>) {
        let tokens = Lexer::new(src).tokenize();
        Parser::new(tokens).parse()
    }

    #[test]
    fn empty_program_has_no_errors() {
        let (_, diags) = parse("");
        assert!(diags.is_empty());
    }

    #[test]
    fn simple_var_decl() {
        let (ast, diags) = parse("int x = 5;");
        assert!(diags.is_empty());
        let Stmt::Program(body) = ast else { panic!() };
        assert_eq!(body.len(), 1);
        assert!(matches!(body[0], Stmt::VarDecl { .. }));
    }

    #[test]
    fn function_with_params_and_return() {
        let (ast, diags) = parse("int square(int n) { return n * n; }");
        assert!(diags.is_empty());
        let Stmt::Program(body) = ast else { panic!() };
        let Stmt::FunctionDecl { params, body, .. } = &body[0] else {
            panic!("expected function decl")
        };
        assert_eq!(params.len(), 1);
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn for_loop_with_empty_clauses_parses() {
        let (_, diags) = parse("for (;;) { print(1); }");
        assert!(diags.is_empty());
    }

    #[test]
    fn void_variable_is_diagnosed_but_still_parsed() {
        let (ast, diags) = parse("void x;");
        assert!(!diags.is_empty());
        let Stmt::Program(body) = ast else { panic!() };
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn missing_semicolon_recovers_and_keeps_parsing() {
        let (ast, diags) = parse("int x = 1 int y = 2;");
        assert!(!diags.is_empty());
        let Stmt::Program(body) = ast else { panic!() };
        assert_eq!(body.len(), 2);
    }

    #[test]
    fn operator_precedence_groups_correctly() {
        let (ast, _) = parse("int x = 1 + 2 * 3;");
        let Stmt::Program(body) = ast else { panic!() };
        let Stmt::VarDecl { init: Some(Expr::Binary { op, right, .. }), .. } = &body[0] else {
            panic!("expected binary init")
        };
        assert_eq!(op, "+");
        assert!(matches!(**right, Expr::Binary { .. }));
    }

    #[test]
    fn invalid_assignment_target_is_diagnosed() {
        let (_, diags) = parse("int x = 1; 5 = x;");
        assert!(!diags.is_empty());
    }
}
