use minic_drv::{compile, Pipeline};

#[test]
fn variable_declaration_and_print() {
    let r = compile("int x = 5; print(x);");
    assert!(r.errors.is_empty());
    assert_eq!(r.output, "5");
}

#[test]
fn function_call_squares_its_argument() {
    let r = compile("int square(int n) { return n * n; } int r = square(4); print(r);");
    assert!(r.errors.is_empty());
    assert_eq!(r.output, "16");
}

#[test]
fn for_loop_counts_up() {
    let r = compile("for (int i = 1; i <= 3; i = i + 1) { print(i); }");
    assert!(r.errors.is_empty());
    assert_eq!(r.output, "1\n2\n3");
}

#[test]
fn if_statement_gates_on_condition() {
    let r = compile("int x = 5; if (x > 0) { print(x); }");
    assert!(r.errors.is_empty());
    assert_eq!(r.output, "5");
}

#[test]
fn float_addition_renders_without_a_decimal_point_when_integral() {
    let r = compile("float a = 2.5; float b = 1.5; print(a + b);");
    assert!(r.errors.is_empty());
    assert_eq!(r.output, "4");
}

#[test]
fn missing_expression_after_equals_is_a_syntax_error() {
    let r = compile("int x = ;");
    assert!(!r.errors.is_empty());
}

#[test]
fn undeclared_variable_is_a_semantic_error_but_runs_to_zero() {
    let r = compile("print(undefined_var);");
    assert!(!r.errors.is_empty());
    assert_eq!(r.output, "0");
}

#[test]
fn int_widens_to_float_without_error() {
    let r = compile("int x = 5; float y = x; print(y);");
    assert!(r.errors.is_empty());
    assert_eq!(r.output, "5");
}

#[test]
fn empty_source_has_no_output_and_no_errors() {
    let r = compile("");
    assert!(r.errors.is_empty());
    assert_eq!(r.output, "");
}

#[test]
fn stage_logs_appear_in_phase_order() {
    let r = compile("int x = 1; print(x);");
    let phases: Vec<&str> = r
        .stage_logs
        .iter()
        .filter(|l| l.ends_with(": start"))
        .map(|l| l.split(':').next().unwrap())
        .collect();
    assert_eq!(phases, ["lex", "parse", "analyze", "ir", "optimize", "codegen", "peephole", "run"]);
}

#[test]
fn typed_ast_annotates_every_expression_with_an_inferred_type() {
    let r = compile("int x = 1 + 2; print(x);");
    fn walk(v: &serde_json::Value, found: &mut bool) {
        if let Some(obj) = v.as_object() {
            if obj.contains_key("inferred") {
                assert!(obj["inferred"].is_string());
                *found = true;
            }
            for value in obj.values() {
                walk(value, found);
            }
        } else if let Some(arr) = v.as_array() {
            for value in arr {
                walk(value, found);
            }
        }
    }
    let mut found = false;
    walk(&r.typed_ast, &mut found);
    assert!(found);
}

#[test]
fn persist_flag_is_threaded_through_but_does_not_affect_compilation() {
    let r = Pipeline::compile("int x = 1; print(x);", true);
    assert!(r.persist);
    assert_eq!(r.output, "1");
}
