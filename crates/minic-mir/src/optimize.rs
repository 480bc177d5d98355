//! Two fixed-order optimizer passes: constant folding (with a handful of
//! algebraic identities) followed by dead-code elimination on temporaries.
//! Neither pass iterates to a fixed point — one pass each, in order.

use minic_util::floor_rem_i64;

use crate::mir::{is_temp, Instr};

pub fn optimize(code: &[Instr]) -> Vec<Instr> {
    let folded = constant_fold(code);
    dead_code_eliminate(&folded)
}

fn parse_num(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

fn parse_int(s: &str) -> Option<i64> {
    s.parse::<i64>().ok()
}

fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

fn bool_str(b: bool) -> String {
    if b { "1".to_string() } else { "0".to_string() }
}

pub fn constant_fold(code: &[Instr]) -> Vec<Instr> {
    code.iter()
        .map(|instr| match instr {
            Instr::Bin(dst, op, l, r) => match fold_bin(op, l, r) {
                Some(value) => Instr::Assign(dst.clone(), value),
                None => instr.clone(),
            },
            Instr::Unary(dst, op, x) => match fold_unary(op, x) {
                Some(value) => Instr::Assign(dst.clone(), value),
                None => instr.clone(),
            },
            other => other.clone(),
        })
        .collect()
}

fn fold_unary(op: &str, x: &str) -> Option<String> {
    let v = parse_num(x)?;
    Some(match op {
        "!" => bool_str(v == 0.0),
        "+" => fmt_num(v),
        "-" => fmt_num(-v),
        _ => return None,
    })
}

fn fold_bin(op: &str, l: &str, r: &str) -> Option<String> {
    let lv = parse_num(l);
    let rv = parse_num(r);
    match op {
        "+" | "-" | "*" | "/" => {
            if let (Some(a), Some(b)) = (lv, rv) {
                return match op {
                    "+" => Some(fmt_num(a + b)),
                    "-" => Some(fmt_num(a - b)),
                    "*" => Some(fmt_num(a * b)),
                    "/" if b != 0.0 => Some(fmt_num(a / b)),
                    _ => None,
                };
            }
            match op {
                "+" if rv == Some(0.0) => Some(l.to_string()),
                "-" if rv == Some(0.0) => Some(l.to_string()),
                "*" if rv == Some(1.0) => Some(l.to_string()),
                "/" if rv == Some(1.0) => Some(l.to_string()),
                "*" if rv == Some(0.0) || lv == Some(0.0) => Some("0".to_string()),
                _ => None,
            }
        }
        "%" => {
            let a = parse_int(l)?;
            let b = parse_int(r)?;
            if b == 0 {
                None
            } else {
                Some(floor_rem_i64(a, b).to_string())
            }
        }
        "<" | "<=" | ">" | ">=" => {
            let (a, b) = (lv?, rv?);
            Some(bool_str(match op {
                "<" => a < b,
                "<=" => a <= b,
                ">" => a > b,
                ">=" => a >= b,
                _ => unreachable!(),
            }))
        }
        "==" | "!=" => {
            let (a, b) = (lv?, rv?);
            Some(bool_str(if op == "==" { a == b } else { a != b }))
        }
        "&&" | "||" => {
            let (a, b) = (lv?, rv?);
            let (at, bt) = (a != 0.0, b != 0.0);
            Some(bool_str(if op == "&&" { at && bt } else { at || bt }))
        }
        _ => None,
    }
}

fn is_constant_operand(op: &str) -> bool {
    parse_num(op).is_some()
}

pub fn dead_code_eliminate(code: &[Instr]) -> Vec<Instr> {
    use std::collections::HashSet;

    let mut live: HashSet<String> = HashSet::new();
    let mut keep = vec![false; code.len()];

    for (i, instr) in code.iter().enumerate().rev() {
        let def = instr.defines();
        let defines_live_var = match def {
            Some(d) => !is_temp(d) || live.contains(d),
            None => true,
        };
        let keep_this = instr.has_side_effect() || defines_live_var;
        keep[i] = keep_this;

        for used in instr.uses() {
            if !is_constant_operand(used) {
                live.insert(used.to_string());
            }
        }
        if keep_this {
            if let Some(d) = def {
                live.remove(d);
            }
        }
    }

    code.iter()
        .zip(keep)
        .filter_map(|(instr, k)| k.then(|| instr.clone()))
        .collect()
}
