use super::*;
use jsdown_ast::SyntaxKind;
use jsdown_test_helpers::{find_first, find_name, read_script};

#[test]
fn test_reports_nearest_scope_in_order() {
    let (arena, script) = read_script("function f() { a; } b;").expect("source");
    let function = find_first(&arena, script, SyntaxKind::Function).expect("function");
    let a = find_name(&arena, script, "a").expect("a");
    let b = find_name(&arena, script, "b").expect("b");

    let mut changes = ChangeTracker::new();
    assert!(changes.is_empty());
    assert_eq!(changes.report_change_to_enclosing_scope(&arena, a), Some(function));
    assert_eq!(changes.report_change_to_enclosing_scope(&arena, b), Some(script));

    assert!(changes.is_changed(function));
    assert!(changes.is_changed(script));
    let scopes: Vec<_> = changes.changed_scopes().iter().copied().collect();
    assert_eq!(scopes, vec![function, script]);
}

#[test]
fn test_repeated_reports_are_recorded_once() {
    let (arena, script) = read_script("a; b;").expect("source");
    let a = find_name(&arena, script, "a").expect("a");
    let b = find_name(&arena, script, "b").expect("b");

    let mut changes = ChangeTracker::new();
    changes.report_change_to_enclosing_scope(&arena, a);
    changes.report_change_to_enclosing_scope(&arena, b);
    changes.report_change_to_enclosing_scope(&arena, script);

    assert_eq!(changes.changed_scopes().len(), 1);
}

#[test]
fn test_take_changed_scopes_empties_tracker() {
    let (arena, script) = read_script("a;").expect("source");
    let mut changes = ChangeTracker::new();
    changes.report_change_to_enclosing_scope(&arena, script);

    assert_eq!(changes.take_changed_scopes(), vec![script]);
    assert!(changes.is_empty());
    assert!(!changes.is_changed(script));
}

#[test]
fn test_node_outside_any_scope() {
    let mut arena = NodeArena::new();
    let orphan = arena.create_name("x", NodeIndex::NONE);
    let mut changes = ChangeTracker::new();

    assert_eq!(changes.report_change_to_enclosing_scope(&arena, orphan), None);
    assert!(changes.is_empty());
}
