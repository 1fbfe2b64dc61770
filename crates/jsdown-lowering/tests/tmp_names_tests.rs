use super::*;
use jsdown_test_helpers::read_script;

fn take(names: &mut impl TmpVarNameCreator, count: usize) -> Vec<String> {
    (0..count).map(|_| names.create_tmp_var_name()).collect()
}

#[test]
fn test_letters_then_digits() {
    let mut names = UniqueNameGenerator::new();
    let generated = take(&mut names, 28);

    assert_eq!(generated[0], "_a");
    assert_eq!(generated[1], "_b");
    assert_eq!(generated[25], "_z");
    assert_eq!(generated[26], "_0");
    assert_eq!(generated[27], "_1");
    assert_eq!(names.generated_count(), 28);
}

#[test]
fn test_reserved_names_are_skipped() {
    let mut names = UniqueNameGenerator::new();
    names.reserve_name("_a");
    names.reserve_name("_c");

    assert_eq!(take(&mut names, 3), vec!["_b", "_d", "_e"]);
    assert!(names.is_reserved("_a"));
    assert!(names.is_reserved("_b"));
    assert!(!names.is_reserved("_f"));
}

#[test]
fn test_reserve_names_in_script() {
    let (arena, script) = read_script("let _a = _b; _c.x; function f(_d) {}").expect("source");
    let mut names = UniqueNameGenerator::new();
    names.reserve_names_in(&arena, script);

    // Property names are not bindings.
    assert!(!names.is_reserved("x"));
    assert!(names.is_reserved("f"));
    assert_eq!(names.create_tmp_var_name(), "_e");
}

#[test]
fn test_closure_creator() {
    let mut n = 0;
    let mut creator = || {
        n += 1;
        format!("$tmp{n}")
    };

    assert_eq!(take(&mut creator, 2), vec!["$tmp1", "$tmp2"]);
}
