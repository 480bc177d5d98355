//! One-to-one structural translation from IR to bytecode. No decisions
//! are made here — every IR instruction has exactly one bytecode shape.

use minic_mir::Instr;

use crate::lir::Bytecode;

pub fn lower(code: &[Instr]) -> Vec<Bytecode> {
    code.iter().map(lower_one).collect()
}

fn lower_one(instr: &Instr) -> Bytecode {
    match instr {
        Instr::Label(n) => Bytecode::Label(n.clone()),
        Instr::Goto(l) => Bytecode::Jmp(l.clone()),
        Instr::IfFalse(c, l) => Bytecode::IfFalse(c.clone(), l.clone()),
        Instr::Assign(d, s) => Bytecode::Mov(d.clone(), s.clone()),
        Instr::Bin(d, op, l, r) => Bytecode::Bin(d.clone(), op.clone(), l.clone(), r.clone()),
        Instr::Unary(d, op, x) => Bytecode::Unary(d.clone(), op.clone(), x.clone()),
        Instr::Print(v) => Bytecode::Print(v.clone()),
        Instr::Return(v) => Bytecode::Ret(v.clone()),
        Instr::FuncStart(n, params) => Bytecode::Func(n.clone(), params.clone()),
        Instr::FuncEnd(n) => Bytecode::EndFunc(n.clone()),
        Instr::Call(d, n, args) => Bytecode::Call(d.clone(), n.clone(), args.clone()),
    }
}
