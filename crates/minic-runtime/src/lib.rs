pub mod vm;

pub use vm::Vm;

#[cfg(test)]
mod tests {
    use minic_lex::Lexer;
    use minic_lir::{lower, peephole};
    use minic_mir::{optimize, IrBuilder};
    use minic_par::Parser;
    use minic_sem::SemanticAnalyzer;

    use super::*;

    fn run_source(src: &str) -> String {
        let tokens = Lexer::new(src).tokenize();
        let (ast, _) = Parser::new(tokens).parse();
        let analysis = SemanticAnalyzer::analyze(&ast);
        let ir = optimize(&IrBuilder::build(&analysis.hir));
        let bytecode = peephole(&lower(&ir));
        Vm::new(bytecode).run()
    }

    #[test]
    fn prints_a_variable() {
        assert_eq!(run_source("int x = 5; print(x);"), "5");
    }

    #[test]
    fn function_call_squares_its_argument() {
        assert_eq!(
            run_source("int square(int n) { return n * n; } int r = square(4); print(r);"),
            "16"
        );
    }

    #[test]
    fn for_loop_counts_up() {
        assert_eq!(
            run_source("for (int i = 1; i <= 3; i = i + 1) { print(i); }"),
            "1\n2\n3"
        );
    }

    #[test]
    fn if_statement_gates_on_condition() {
        assert_eq!(run_source("int x = 5; if (x > 0) { print(x); }"), "5");
    }

    #[test]
    fn mixed_int_float_addition() {
        assert_eq!(run_source("float a = 2.5; float b = 1.5; print(a + b);"), "4");
    }

    #[test]
    fn undeclared_variable_reads_as_zero_at_runtime() {
        assert_eq!(run_source("print(undefined_var);"), "0");
    }

    #[test]
    fn int_to_float_widening_assignment() {
        assert_eq!(run_source("int x = 5; float y = x; print(y);"), "5");
    }

    #[test]
    fn empty_source_produces_no_output() {
        assert_eq!(run_source(""), "");
    }
}
