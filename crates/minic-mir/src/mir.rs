//! Three-address IR instruction set, over string operands (a decimal
//! literal, a user variable name, or a `t<N>` temporary).

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    Label(String),
    Goto(String),
    IfFalse(String, String),
    Assign(String, String),
    Bin(String, String, String, String),
    Unary(String, String, String),
    Print(String),
    Return(Option<String>),
    FuncStart(String, Vec<String>),
    FuncEnd(String),
    Call(Option<String>, String, Vec<String>),
}

impl Instr {
    /// The name this instruction defines, if any — used by the
    /// optimizer's liveness pass.
    pub fn defines(&self) -> Option<&str> {
        match self {
            Instr::Assign(d, _) | Instr::Bin(d, _, _, _) | Instr::Unary(d, _, _) => Some(d),
            Instr::Call(Some(d), _, _) => Some(d),
            _ => None,
        }
    }

    /// Operands this instruction reads, in evaluation order.
    pub fn uses(&self) -> Vec<&str> {
        match self {
            Instr::Label(_) | Instr::FuncStart(..) | Instr::FuncEnd(_) => Vec::new(),
            Instr::Goto(_) => Vec::new(),
            Instr::IfFalse(c, _) => vec![c.as_str()],
            Instr::Assign(_, s) => vec![s.as_str()],
            Instr::Bin(_, _, l, r) => vec![l.as_str(), r.as_str()],
            Instr::Unary(_, _, x) => vec![x.as_str()],
            Instr::Print(v) => vec![v.as_str()],
            Instr::Return(v) => v.iter().map(|s| s.as_str()).collect(),
            Instr::Call(_, _, args) => args.iter().map(|s| s.as_str()).collect(),
        }
    }

    /// Whether dropping this instruction (when its result is unused)
    /// would be observable — i.e. it must always be kept.
    pub fn has_side_effect(&self) -> bool {
        matches!(
            self,
            Instr::Print(_)
                | Instr::Return(_)
                | Instr::IfFalse(..)
                | Instr::Goto(_)
                | Instr::Label(_)
                | Instr::FuncStart(..)
                | Instr::FuncEnd(_)
                | Instr::Call(..)
        )
    }
}

/// A name the IR builder produced rather than one written by the user.
pub fn is_temp(name: &str) -> bool {
    let Some(rest) = name.strip_prefix('t') else {
        return false;
    };
    !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for Instr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instr::Label(n) => write!(f, "{n}:"),
            Instr::Goto(l) => write!(f, "goto {l}"),
            Instr::IfFalse(c, l) => write!(f, "iffalse {c} goto {l}"),
            Instr::Assign(d, s) => write!(f, "{d} = {s}"),
            Instr::Bin(d, op, l, r) => write!(f, "{d} = {l} {op} {r}"),
            Instr::Unary(d, op, x) => write!(f, "{d} = {op}{x}"),
            Instr::Print(v) => write!(f, "print {v}"),
            Instr::Return(Some(v)) => write!(f, "return {v}"),
            Instr::Return(None) => write!(f, "return"),
            Instr::FuncStart(n, params) => write!(f, "func {n}({})", params.join(", ")),
            Instr::FuncEnd(n) => write!(f, "endfunc {n}"),
            Instr::Call(Some(d), n, args) => write!(f, "call {d} = {n}({})", args.join(", ")),
            Instr::Call(None, n, args) => write!(f, "call _ = {n}({})", args.join(", ")),
        }
    }
}
