//! Three-address IR: `IrBuilder` lowers the typed tree to it, `optimize`
//! folds constants and drops dead temporaries.

pub mod builder;
pub mod mir;
pub mod optimize;

pub use builder::IrBuilder;
pub use mir::Instr;
pub use optimize::optimize;

#[cfg(test)]
mod tests {
    use super::*;
    use minic_lex::Lexer;
    use minic_par::Parser;
    use minic_sem::SemanticAnalyzer;

    fn build(src: &str) -> Vec<Instr> {
        let tokens = Lexer::new(src).tokenize();
        let (ast, _) = Parser::new(tokens).parse();
        let result = SemanticAnalyzer::analyze(&ast);
        IrBuilder::build(&result.hir)
    }

    fn render(code: &[Instr]) -> Vec<String> {
        code.iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn var_decl_with_init_emits_a_single_assign() {
        let code = build("int x = 5;");
        assert_eq!(render(&code), vec!["x = 5"]);
    }

    #[test]
    fn var_decl_without_init_emits_nothing() {
        let code = build("int x;");
        assert!(code.is_empty());
    }

    #[test]
    fn binary_expression_uses_a_temp() {
        let code = build("int x = 1 + 2;");
        assert_eq!(render(&code), vec!["t1 = 1 + 2", "x = t1"]);
    }

    #[test]
    fn if_without_else_emits_else_and_end_labels() {
        let code = build("if (true) { print(1); }");
        assert_eq!(
            render(&code),
            vec![
                "iffalse 1 goto Lelse1",
                "print 1",
                "goto Lend1",
                "Lelse1:",
                "Lend1:",
            ]
        );
    }

    #[test]
    fn while_loop_shape() {
        let code = build("while (true) { print(1); }");
        assert_eq!(
            render(&code),
            vec![
                "Lwhile1:",
                "iffalse 1 goto Lwend1",
                "print 1",
                "goto Lwhile1",
                "Lwend1:",
            ]
        );
    }

    #[test]
    fn void_call_result_operand_is_zero() {
        let code = build("void f() { } int x = f();");
        // f() as a statement, then the call feeding x.
        assert!(render(&code).iter().any(|l| l == "x = 0"));
    }

    #[test]
    fn constant_fold_collapses_arithmetic() {
        let code = build("int x = 2 + 3 * 4;");
        let opt = optimize(&code);
        assert_eq!(render(&opt), vec!["x = 14"]);
    }

    #[test]
    fn constant_fold_applies_identities() {
        let code = build("int y = 9; int x = y + 0;");
        let opt = optimize(&code);
        assert_eq!(render(&opt), vec!["y = 9", "x = y"]);
    }

    #[test]
    fn dce_drops_unused_temporaries() {
        let code = vec![
            Instr::Bin("t1".into(), "+".into(), "1".into(), "2".into()),
            Instr::Assign("x".into(), "3".into()),
        ];
        let opt = optimize::dead_code_eliminate(&code);
        assert_eq!(render(&opt), vec!["x = 3"]);
    }

    #[test]
    fn dce_keeps_call_even_when_result_unused() {
        let code = vec![Instr::Call(Some("t1".into()), "f".into(), vec!["1".into()])];
        let opt = optimize::dead_code_eliminate(&code);
        assert_eq!(opt.len(), 1);
    }

    #[test]
    fn every_label_is_defined_exactly_once() {
        let code = build(
            "int i = 0; while (i < 3) { if (i == 1) { print(i); } i = i + 1; }",
        );
        let mut defined = std::collections::HashMap::new();
        for instr in &code {
            if let Instr::Label(name) = instr {
                *defined.entry(name.clone()).or_insert(0) += 1;
            }
        }
        assert!(defined.values().all(|&count| count == 1));
    }
}
