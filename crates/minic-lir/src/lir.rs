//! Bytecode instruction set: a structural mirror of the IR, with
//! uppercase mnemonics.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Bytecode {
    Label(String),
    Jmp(String),
    IfFalse(String, String),
    Mov(String, String),
    Unary(String, String, String),
    Bin(String, String, String, String),
    Print(String),
    Ret(Option<String>),
    Func(String, Vec<String>),
    EndFunc(String),
    Call(Option<String>, String, Vec<String>),
}

impl fmt::Display for Bytecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bytecode::Label(n) => write!(f, "{n}:"),
            Bytecode::Jmp(l) => write!(f, "JMP {l}"),
            Bytecode::IfFalse(c, l) => write!(f, "IFFALSE {c} {l}"),
            Bytecode::Mov(d, s) => write!(f, "MOV {d}, {s}"),
            Bytecode::Unary(d, op, s) => write!(f, "UNARY {d}, {op}, {s}"),
            Bytecode::Bin(d, op, l, r) => write!(f, "BIN {d}, {op}, {l}, {r}"),
            Bytecode::Print(v) => write!(f, "PRINT {v}"),
            Bytecode::Ret(Some(v)) => write!(f, "RET {v}"),
            Bytecode::Ret(None) => write!(f, "RET"),
            Bytecode::Func(n, params) => write!(f, "FUNC {n}({})", params.join(", ")),
            Bytecode::EndFunc(n) => write!(f, "ENDFUNC {n}"),
            Bytecode::Call(Some(d), n, args) => write!(f, "CALL {d} = {n}({})", args.join(", ")),
            Bytecode::Call(None, n, args) => write!(f, "CALL _ = {n}({})", args.join(", ")),
        }
    }
}
