use super::*;
use crate::source_reader::read_script;

fn run(source: &str) -> Execution {
    let (arena, script) = read_script(source).expect("source should read");
    execute(&arena, script)
}

fn output_of(source: &str) -> Vec<String> {
    let execution = run(source);
    assert_eq!(execution.error, None, "unexpected error running {source}");
    execution.output
}

#[test]
fn test_log_joins_arguments() {
    assert_eq!(output_of("log(1); log('a', null);"), vec!["1", "a null"]);
}

#[test]
fn test_optional_chain_short_circuits_whole_chain() {
    assert_eq!(
        output_of("let a = null; log(a?.b.c.d);"),
        vec!["undefined"]
    );
    assert_eq!(
        output_of("let o = { b: { c: 2 } }; log(o?.b.c);"),
        vec!["2"]
    );
    assert_eq!(
        output_of("let o = { b: void 0 }; log(o.b?.c, o?.b?.());"),
        vec!["undefined undefined"]
    );
}

#[test]
fn test_parenthesized_chain_does_not_extend_short_circuit() {
    let execution = run("let a = null; (a?.b).c;");
    assert_eq!(execution.error_name(), Some("TypeError"));
}

#[test]
fn test_method_calls_bind_this() {
    let source = "
        let o = { v: 3, m: function() { return this.v; } };
        log(o.m());
        log(o.m?.());
        log(o?.m());
        let f = o.m;
        log(f.call(o));
        log((o.m)());
    ";
    assert_eq!(output_of(source), vec!["3", "3", "3", "3", "3"]);
}

#[test]
fn test_call_forwards_arguments_after_this() {
    let source = "
        function pick(a, b) { return b; }
        log(pick.call(null, 1, 2));
    ";
    assert_eq!(output_of(source), vec!["2"]);
}

#[test]
fn test_function_declarations_are_hoisted() {
    assert_eq!(
        output_of("log(f()); function f() { return 'hoisted'; }"),
        vec!["hoisted"]
    );
}

#[test]
fn test_closures_see_later_assignments() {
    let source = "
        let n = 1;
        function get() { return n; }
        n = 2;
        log(get());
    ";
    assert_eq!(output_of(source), vec!["2"]);
}

#[test]
fn test_equality_and_logic() {
    assert_eq!(
        output_of("log(null == void 0, null === void 0, 1 == '1', 1 != 2, !0);"),
        vec!["true false true true true"]
    );
    assert_eq!(output_of("log(0 || 'x', 1 && null);"), vec!["x null"]);
}

#[test]
fn test_property_assignment_and_element_access() {
    let source = "
        let o = {};
        o.x = 5;
        o['y'] = o.x;
        log(o.y, o['x'], o.missing);
    ";
    assert_eq!(output_of(source), vec!["5 5 undefined"]);
}

#[test]
fn test_if_else() {
    let source = "
        function classify(v) {
            if (v == null) { return 'nullish'; } else { return 'value'; }
        }
        log(classify(null), classify(0));
    ";
    assert_eq!(output_of(source), vec!["nullish value"]);
}

#[test]
fn test_errors_keep_prior_output() {
    let execution = run("log('before'); let a = {}; a.f();");
    assert_eq!(execution.output, vec!["before"]);
    assert_eq!(execution.error_name(), Some("TypeError"));

    let execution = run("log(missing);");
    assert_eq!(
        execution.error,
        Some(RuntimeError::ReferenceError("missing".to_string()))
    );
}

#[test]
fn test_native_functions() {
    let (arena, script) = read_script("log(twice(4));").expect("source should read");
    let mut interpreter = Interpreter::new(&arena);
    interpreter.define_native("twice", |_, args| match args.first() {
        Some(Value::Number(n)) => Ok(Value::Number(n * 2.0)),
        _ => Err(RuntimeError::TypeError("expected a number".to_string())),
    });
    interpreter.run(script).expect("script should run");
    assert_eq!(interpreter.output(), ["8"]);
}
