use super::*;
use crate::TypeId;

fn source_name(arena: &mut NodeArena, text: &str, pos: u32) -> NodeIndex {
    let mut node = Node::with_text(SyntaxKind::Name, text).with_span(pos, pos + text.len() as u32);
    node.type_id = TypeId(7);
    arena.add_node(node, &[])
}

#[test]
fn test_created_nodes_are_detached_and_synthesized() {
    let mut arena = NodeArena::new();
    let null = arena.create_null(NodeIndex::NONE);

    assert!(arena.is_detached(null));
    let node = arena.get(null).expect("node exists");
    assert!(node.flags.contains(NodeFlags::SYNTHESIZED));
    assert!(!node.has_source_info());
    assert!(node.type_id.is_unknown());
}

#[test]
fn test_source_info_copied_from_reference() {
    let mut arena = NodeArena::new();
    let src = source_name(&mut arena, "obj", 10);

    let null = arena.create_null(src);
    let node = arena.get(null).expect("node exists");
    assert_eq!((node.pos, node.end), (10, 13));
    assert_eq!(node.type_id, TypeId(7));

    // The reference node itself is untouched and stays where it was.
    assert!(arena.is_detached(src));
    assert!(arena.children(src).is_empty());
}

#[test]
fn test_undefined_value_is_void_zero() {
    let mut arena = NodeArena::new();
    let undefined = arena.create_undefined_value(NodeIndex::NONE);

    assert_eq!(arena.kind(undefined), Some(SyntaxKind::Void));
    let zero = arena.first_child(undefined);
    assert_eq!(arena.kind(zero), Some(SyntaxKind::NumberLit));
    assert_eq!(arena.text(zero), Some("0"));
}

#[test]
fn test_assign_adopts_value() {
    let mut arena = NodeArena::new();
    let value = source_name(&mut arena, "a", 0);

    let assign = arena.create_assign("_a", value, value);

    assert_eq!(arena.kind(assign), Some(SyntaxKind::Assign));
    let target = arena.first_child(assign);
    assert_eq!(arena.text(target), Some("_a"));
    assert_eq!(arena.children(assign), &[target, value]);
    assert_eq!(arena.parent(value), assign);
    // The adopted operand keeps its own source info.
    assert_eq!(arena.get(value).map(|n| n.flags), Some(NodeFlags::empty()));
}

#[test]
fn test_hook_and_eq_shape() {
    let mut arena = NodeArena::new();
    let a = source_name(&mut arena, "a", 0);
    let null = arena.create_null(a);
    let eq = arena.create_eq(a, null, a);
    let undefined = arena.create_undefined_value(a);
    let rest = source_name(&mut arena, "rest", 5);
    let hook = arena.create_hook(eq, undefined, rest, rest);

    assert_eq!(arena.children(hook), &[eq, undefined, rest]);
    assert_eq!(arena.children(eq), &[a, null]);
    assert_eq!(arena.get(hook).map(|n| n.pos), Some(5));
}

#[test]
fn test_let_declaration_has_no_initializer() {
    let mut arena = NodeArena::new();
    let decl = arena.create_single_let_name_declaration("_b", NodeIndex::NONE);

    assert_eq!(arena.kind(decl), Some(SyntaxKind::Let));
    let binding = arena.first_child(decl);
    assert_eq!(arena.text(binding), Some("_b"));
    assert!(arena.children(binding).is_empty());
}

#[test]
fn test_get_prop_takes_receiver() {
    let mut arena = NodeArena::new();
    let f = arena.create_name("f", NodeIndex::NONE);
    let dot_call = arena.create_get_prop(f, "call", NodeIndex::NONE);

    assert_eq!(arena.children(dot_call), &[f]);
    assert_eq!(arena.text(dot_call), Some("call"));
    assert!(arena.is_normal_get(dot_call));
    assert_eq!(arena.parent(f), dot_call);
}
