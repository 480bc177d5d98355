//! Bytecode interpreter: every value is an `f64`; a call stack of
//! [`Frame`]s holds the caller's environment, return address, and
//! return destination across a call.

use minic_util::FxHashMap;
use minic_lir::Bytecode;

struct Frame {
    env: FxHashMap<String, f64>,
    ret_pc: usize,
    ret_dst: Option<String>,
}

struct FuncMeta {
    start: usize,
    end: usize,
    params: Vec<String>,
}

/// A running (or finished) bytecode program. Construct with [`Vm::new`],
/// drive to completion with [`Vm::run`].
pub struct Vm {
    code: Vec<Bytecode>,
    labels: FxHashMap<String, usize>,
    funcs: FxHashMap<String, FuncMeta>,
    pc: usize,
    stack: Vec<Frame>,
    global_env: FxHashMap<String, f64>,
    env: FxHashMap<String, f64>,
    output: Vec<String>,
    /// Caps total executed steps. `None` (the default) means unbounded.
    pub step_limit: Option<u64>,
}

impl Vm {
    pub fn new(code: Vec<Bytecode>) -> Self {
        let (labels, funcs) = index(&code);
        Vm {
            code,
            labels,
            funcs,
            pc: 0,
            stack: Vec::new(),
            global_env: FxHashMap::default(),
            env: FxHashMap::default(),
            output: Vec::new(),
            step_limit: None,
        }
    }

    /// Runs to completion and returns the program output, lines joined
    /// by `\n`.
    pub fn run(mut self) -> String {
        let mut steps: u64 = 0;
        while self.step() {
            steps += 1;
            if let Some(limit) = self.step_limit {
                if steps >= limit {
                    break;
                }
            }
        }
        self.output.join("\n")
    }

    /// Executes one instruction. Returns `false` once the program has
    /// ended (ran off the end or hit a top-level `RET`).
    fn step(&mut self) -> bool {
        if self.pc >= self.code.len() {
            return false;
        }
        let instr = self.code[self.pc].clone();
        self.pc += 1;

        match instr {
            Bytecode::Func(name, _) => {
                if self.stack.is_empty() {
                    let end = self.funcs.get(&name).map(|m| m.end).unwrap_or(self.pc - 1);
                    self.pc = end + 1;
                }
                true
            }
            Bytecode::EndFunc(_) => {
                if let Some(frame) = self.stack.pop() {
                    self.env = frame.env;
                    if let Some(dst) = frame.ret_dst {
                        self.set(&dst, 0.0);
                    }
                    self.pc = frame.ret_pc;
                }
                true
            }
            Bytecode::Label(_) => true,
            Bytecode::Jmp(label) => {
                if let Some(&target) = self.labels.get(&label) {
                    self.pc = target;
                }
                true
            }
            Bytecode::IfFalse(cond, label) => {
                if !is_true(self.get(&cond)) {
                    if let Some(&target) = self.labels.get(&label) {
                        self.pc = target;
                    }
                }
                true
            }
            Bytecode::Mov(dst, src) => {
                let v = self.get(&src);
                self.set(&dst, v);
                true
            }
            Bytecode::Unary(dst, op, src) => {
                let a = self.get(&src);
                let v = match op.as_str() {
                    "!" => {
                        if is_true(a) {
                            0.0
                        } else {
                            1.0
                        }
                    }
                    "+" => a,
                    "-" => -a,
                    _ => 0.0,
                };
                self.set(&dst, v);
                true
            }
            Bytecode::Bin(dst, op, left, right) => {
                let a = self.get(&left);
                let b = self.get(&right);
                let v = eval_bin(&op, a, b);
                self.set(&dst, v);
                true
            }
            Bytecode::Print(value) => {
                self.output.push(format_value(self.get(&value)));
                true
            }
            Bytecode::Call(dst, name, args) => {
                let arg_vals: Vec<f64> = args.iter().map(|a| self.get(a)).collect();
                let Some(meta) = self.funcs.get(&name) else {
                    return true;
                };
                let params = meta.params.clone();
                let start = meta.start;
                let caller_env = std::mem::take(&mut self.env);
                self.stack.push(Frame {
                    env: caller_env,
                    ret_pc: self.pc,
                    ret_dst: dst,
                });
                let mut callee_env = FxHashMap::default();
                for (i, param) in params.iter().enumerate() {
                    callee_env.insert(param.clone(), arg_vals.get(i).copied().unwrap_or(0.0));
                }
                self.env = callee_env;
                self.pc = start + 1;
                true
            }
            Bytecode::Ret(value) => {
                let Some(frame) = self.stack.pop() else {
                    self.pc = self.code.len();
                    return false;
                };
                let ret_val = value.map(|v| self.get(&v)).unwrap_or(0.0);
                self.env = frame.env;
                if let Some(dst) = frame.ret_dst {
                    self.set(&dst, ret_val);
                }
                self.pc = frame.ret_pc;
                true
            }
        }
    }

    fn get(&self, operand: &str) -> f64 {
        if let Ok(n) = operand.parse::<f64>() {
            return n;
        }
        let current = if self.stack.is_empty() { &self.global_env } else { &self.env };
        if let Some(&v) = current.get(operand) {
            return v;
        }
        self.global_env.get(operand).copied().unwrap_or(0.0)
    }

    fn set(&mut self, name: &str, value: f64) {
        if self.stack.is_empty() {
            self.global_env.insert(name.to_string(), value);
        } else {
            self.env.insert(name.to_string(), value);
        }
    }
}

fn index(code: &[Bytecode]) -> (FxHashMap<String, usize>, FxHashMap<String, FuncMeta>) {
    let mut labels = FxHashMap::default();
    let mut funcs: FxHashMap<String, FuncMeta> = FxHashMap::default();
    let mut open: Vec<String> = Vec::new();
    for (i, instr) in code.iter().enumerate() {
        match instr {
            Bytecode::Label(name) => {
                labels.insert(name.clone(), i);
            }
            Bytecode::Func(name, params) => {
                funcs.insert(
                    name.clone(),
                    FuncMeta { start: i, end: i, params: params.clone() },
                );
                open.push(name.clone());
            }
            Bytecode::EndFunc(_) => {
                if let Some(name) = open.pop() {
                    if let Some(meta) = funcs.get_mut(&name) {
                        meta.end = i;
                    }
                }
            }
            _ => {}
        }
    }
    (labels, funcs)
}

fn is_true(v: f64) -> bool {
    v != 0.0
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

fn eval_bin(op: &str, a: f64, b: f64) -> f64 {
    match op {
        "+" => a + b,
        "-" => a - b,
        "*" => a * b,
        "/" => a / b,
        "%" => minic_util::floor_rem_i64(a as i64, b as i64) as f64,
        "<" => bool_to_f64(a < b),
        "<=" => bool_to_f64(a <= b),
        ">" => bool_to_f64(a > b),
        ">=" => bool_to_f64(a >= b),
        "==" => bool_to_f64(a == b),
        "!=" => bool_to_f64(a != b),
        "&&" => bool_to_f64(a != 0.0 && b != 0.0),
        "||" => bool_to_f64(a != 0.0 || b != 0.0),
        _ => 0.0,
    }
}

fn bool_to_f64(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(code: Vec<Bytecode>) -> String {
        Vm::new(code).run()
    }

    #[test]
    fn print_a_literal() {
        let out = run(vec![Bytecode::Print("5".into())]);
        assert_eq!(out, "5");
    }

    #[test]
    fn jump_skips_instructions() {
        let out = run(vec![
            Bytecode::Jmp("L1".into()),
            Bytecode::Print("1".into()),
            Bytecode::Label("L1".into()),
            Bytecode::Print("2".into()),
        ]);
        assert_eq!(out, "2");
    }

    #[test]
    fn ret_at_top_level_ends_execution() {
        let out = run(vec![Bytecode::Ret(None), Bytecode::Print("1".into())]);
        assert_eq!(out, "");
    }

    #[test]
    fn function_body_is_skipped_unless_called() {
        let out = run(vec![
            Bytecode::Func("f".into(), vec![]),
            Bytecode::Print("99".into()),
            Bytecode::EndFunc("f".into()),
            Bytecode::Print("1".into()),
        ]);
        assert_eq!(out, "1");
    }

    #[test]
    fn call_and_return_value() {
        let out = run(vec![
            Bytecode::Jmp("Lmain".into()),
            Bytecode::Func("sq".into(), vec!["n".into()]),
            Bytecode::Bin("t1".into(), "*".into(), "n".into(), "n".into()),
            Bytecode::Ret(Some("t1".into())),
            Bytecode::EndFunc("sq".into()),
            Bytecode::Label("Lmain".into()),
            Bytecode::Call(Some("r".into()), "sq".into(), vec!["4".into()]),
            Bytecode::Print("r".into()),
        ]);
        assert_eq!(out, "16");
    }

    #[test]
    fn unknown_function_call_is_a_no_op() {
        let out = run(vec![
            Bytecode::Call(Some("r".into()), "missing".into(), vec![]),
            Bytecode::Print("r".into()),
        ]);
        assert_eq!(out, "0");
    }

    #[test]
    fn modulo_is_floor_style() {
        let out = run(vec![Bytecode::Bin("t1".into(), "%".into(), "-7".into(), "3".into()), Bytecode::Print("t1".into())]);
        assert_eq!(out, "2");
    }

    #[test]
    fn integral_floats_print_without_decimal_point() {
        let out = run(vec![Bytecode::Bin("t1".into(), "/".into(), "4".into(), "2".into()), Bytecode::Print("t1".into())]);
        assert_eq!(out, "2");
    }

    #[test]
    fn step_limit_halts_an_infinite_loop() {
        let mut vm = Vm::new(vec![Bytecode::Label("L".into()), Bytecode::Jmp("L".into())]);
        vm.step_limit = Some(1000);
        let out = vm.run();
        assert_eq!(out, "");
    }
}
