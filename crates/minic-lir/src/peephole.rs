//! Three ordered bytecode cleanup passes: drop self-moves, drop jumps to
//! the very next instruction, then collapse runs of consecutive labels
//! and rewrite every jump target through the resulting rename chain.

use std::collections::{HashMap, HashSet};

use crate::lir::Bytecode;

pub fn peephole(code: &[Bytecode]) -> Vec<Bytecode> {
    let code = remove_self_moves(code);
    let code = remove_jump_to_next_label(&code);
    collapse_consecutive_labels(&code)
}

fn remove_self_moves(code: &[Bytecode]) -> Vec<Bytecode> {
    code.iter()
        .filter(|instr| !matches!(instr, Bytecode::Mov(d, s) if d == s))
        .cloned()
        .collect()
}

fn remove_jump_to_next_label(code: &[Bytecode]) -> Vec<Bytecode> {
    let mut out = Vec::with_capacity(code.len());
    for (i, instr) in code.iter().enumerate() {
        if let Bytecode::Jmp(target) = instr {
            if let Some(Bytecode::Label(next)) = code.get(i + 1) {
                if next == target {
                    continue;
                }
            }
        }
        out.push(instr.clone());
    }
    out
}

fn collapse_consecutive_labels(code: &[Bytecode]) -> Vec<Bytecode> {
    let mut rename: HashMap<String, String> = HashMap::new();
    let mut i = 0;
    while i < code.len() {
        if let Bytecode::Label(first) = &code[i] {
            let mut j = i + 1;
            while let Some(Bytecode::Label(later)) = code.get(j) {
                rename.insert(later.clone(), first.clone());
                j += 1;
            }
            i = j;
        } else {
            i += 1;
        }
    }

    let resolve = |mut name: String| -> String {
        let mut seen = HashSet::new();
        while let Some(next) = rename.get(&name) {
            if !seen.insert(name.clone()) {
                break;
            }
            name = next.clone();
        }
        name
    };

    code.iter()
        .filter_map(|instr| match instr {
            Bytecode::Label(n) if rename.contains_key(n) => None,
            Bytecode::Jmp(l) => Some(Bytecode::Jmp(resolve(l.clone()))),
            Bytecode::IfFalse(c, l) => Some(Bytecode::IfFalse(c.clone(), resolve(l.clone()))),
            other => Some(other.clone()),
        })
        .collect()
}
