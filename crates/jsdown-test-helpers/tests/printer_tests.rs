use super::*;
use crate::source_reader::read_script;

fn reprint(source: &str) -> String {
    let (arena, script) = read_script(source).expect("source should read");
    print_node(&arena, script)
}

#[test]
fn test_optional_chains_print_as_written() {
    assert_eq!(reprint("let x = a?.b.c?.d(e);"), "let x = a?.b.c?.d(e);");
    assert_eq!(reprint("a.b?.();"), "a.b?.();");
    assert_eq!(reprint("a?.[0].b;"), "a?.[0].b;");
    assert_eq!(reprint("f()?.(1, 2);"), "f()?.(1, 2);");
}

#[test]
fn test_plain_link_on_chain_is_parenthesized() {
    assert_eq!(reprint("(a?.b).c;"), "(a?.b).c;");
    assert_eq!(reprint("(a?.b.c)(x);"), "(a?.b.c)(x);");
}

#[test]
fn test_precedence_parentheses() {
    assert_eq!(reprint("x = (a = b) == null;"), "x = (a = b) == null;");
    assert_eq!(
        reprint("x = a ? b : c ? d : e;"),
        "x = a ? b : c ? d : e;"
    );
    assert_eq!(reprint("x = (a ? b : c).d;"), "x = (a ? b : c).d;");
    assert_eq!(reprint("!void 0;"), "!void 0;");
    assert_eq!(reprint("a || b && c;"), "a || b && c;");
    assert_eq!(reprint("(a || b) && c;"), "(a || b) && c;");
}

#[test]
fn test_statements_and_blocks() {
    assert_eq!(
        reprint("function f(a) { if (a) { return a; } else { return; } }"),
        "function f(a) {\n  if (a) {\n    return a;\n  } else {\n    return;\n  }\n}"
    );
    assert_eq!(reprint("let a; var b = 1, c;"), "let a;\nvar b = 1, c;");
    assert_eq!(reprint(";"), ";");
}

#[test]
fn test_literals() {
    assert_eq!(
        reprint("let o = { a: 1, b: 'two', c: null, d: true };"),
        "let o = { a: 1, b: \"two\", c: null, d: true };"
    );
    assert_eq!(reprint("let e = {};"), "let e = {};");
}

#[test]
fn test_expression_statement_starting_with_object_is_wrapped() {
    assert_eq!(reprint("({ a: 1 }).a;"), "({ a: 1 }.a);");
}

#[test]
fn test_print_single_expression() {
    let (arena, script) = read_script("x = a?.b;").expect("source should read");
    let assign = arena.first_child(arena.first_child(script));
    assert_eq!(print_node(&arena, assign), "x = a?.b");
}
