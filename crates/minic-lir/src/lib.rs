pub mod lir;
pub mod lower;
pub mod peephole;

pub use lir::Bytecode;
pub use lower::lower;
pub use peephole::peephole;

#[cfg(test)]
mod tests {
    use minic_lex::Lexer;
    use minic_mir::{optimize, IrBuilder};
    use minic_par::Parser;
    use minic_sem::SemanticAnalyzer;

    use super::*;

    fn compile_to_bytecode(src: &str) -> Vec<Bytecode> {
        let tokens = Lexer::new(src).tokenize();
        let (ast, _) = Parser::new(tokens).parse();
        let analysis = SemanticAnalyzer::analyze(&ast);
        let ir = optimize(&IrBuilder::build(&analysis.hir));
        peephole(&lower(&ir))
    }

    #[test]
    fn lowers_every_ir_instruction_to_its_bytecode_mirror() {
        let ir = vec![
            minic_mir::Instr::Label("L1".into()),
            minic_mir::Instr::Assign("x".into(), "1".into()),
            minic_mir::Instr::Print("x".into()),
        ];
        let bc = lower(&ir);
        assert_eq!(
            bc,
            vec![
                Bytecode::Label("L1".into()),
                Bytecode::Mov("x".into(), "1".into()),
                Bytecode::Print("x".into()),
            ]
        );
    }

    #[test]
    fn peephole_runs_after_lowering_an_if_statement() {
        let bc = compile_to_bytecode("int main() { int x; x = 1; if (x) { print(x); } return 0; }");
        assert!(!bc.iter().any(|b| matches!(b, Bytecode::Mov(d, s) if d == s)));
        for (i, instr) in bc.iter().enumerate() {
            if let Bytecode::Jmp(l) = instr {
                if let Some(Bytecode::Label(next)) = bc.get(i + 1) {
                    assert_ne!(l, next, "jump to immediately following label should be removed");
                }
            }
        }
    }

    #[test]
    fn function_definitions_lower_to_func_endfunc_pair() {
        let bc = compile_to_bytecode("int id(int x) { return x; } int main() { print(id(1)); return 0; }");
        assert!(bc.iter().any(|b| matches!(b, Bytecode::Func(n, _) if n == "id")));
        assert!(bc.iter().any(|b| matches!(b, Bytecode::EndFunc(n) if n == "id")));
        assert!(bc.iter().any(|b| matches!(b, Bytecode::Call(_, n, _) if n == "id")));
    }

    #[test]
    fn display_renders_call_without_destination_as_underscore() {
        let instr = Bytecode::Call(None, "f".into(), vec!["1".into()]);
        assert_eq!(instr.to_string(), "CALL _ = f(1)");
    }
}
