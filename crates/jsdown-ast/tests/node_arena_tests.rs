use super::*;

fn name(arena: &mut NodeArena, text: &str) -> NodeIndex {
    arena.add_node(Node::with_text(SyntaxKind::Name, text), &[])
}

/// `a.b;` inside a script. Returns (script, statement, get_prop, a).
fn script_with_get_prop(arena: &mut NodeArena) -> (NodeIndex, NodeIndex, NodeIndex, NodeIndex) {
    let a = name(arena, "a");
    let get = arena.add_node(Node::with_text(SyntaxKind::GetProp, "b"), &[a]);
    let stmt = arena.add_node(Node::new(SyntaxKind::ExprResult), &[get]);
    let script = arena.add_node(Node::new(SyntaxKind::Script), &[stmt]);
    (script, stmt, get, a)
}

#[test]
fn test_add_node_sets_parents() {
    let mut arena = NodeArena::new();
    let (script, stmt, get, a) = script_with_get_prop(&mut arena);

    assert_eq!(arena.len(), 4);
    assert_eq!(arena.parent(a), get);
    assert_eq!(arena.parent(get), stmt);
    assert_eq!(arena.parent(stmt), script);
    assert!(arena.parent(script).is_none());
    assert_eq!(arena.children(get), &[a]);
    assert_eq!(arena.text(get), Some("b"));
}

#[test]
fn test_detach() {
    let mut arena = NodeArena::new();
    let (_, stmt, get, _) = script_with_get_prop(&mut arena);

    assert_eq!(arena.detach(get), get);
    assert!(arena.is_detached(get));
    assert!(arena.children(stmt).is_empty());
}

#[test]
fn test_replace_with_keeps_position() {
    let mut arena = NodeArena::new();
    let x = name(&mut arena, "x");
    let y = name(&mut arena, "y");
    let z = name(&mut arena, "z");
    let call = arena.add_node(Node::new(SyntaxKind::Call), &[x, y]);

    arena.replace_with(y, z);

    assert_eq!(arena.children(call), &[x, z]);
    assert_eq!(arena.parent(z), call);
    assert!(arena.is_detached(y));
}

#[test]
fn test_placeholder_swap_reuses_original() {
    // The swap sequence used by transforms: detach via placeholder, build a
    // wrapper around the freed node, put the wrapper back.
    let mut arena = NodeArena::new();
    let (_, stmt, get, _) = script_with_get_prop(&mut arena);

    let placeholder = arena.create_empty();
    arena.replace_with(get, placeholder);
    let wrapper = arena.add_node(Node::new(SyntaxKind::Not), &[get]);
    arena.replace_with(placeholder, wrapper);

    assert_eq!(arena.children(stmt), &[wrapper]);
    assert_eq!(arena.parent(get), wrapper);
    assert!(arena.is_detached(placeholder));
}

#[test]
fn test_add_child_front_back_before() {
    let mut arena = NodeArena::new();
    let b = name(&mut arena, "b");
    let call = arena.add_node(Node::new(SyntaxKind::Call), &[b]);

    let a = name(&mut arena, "a");
    arena.add_child_to_front(call, a);
    let d = name(&mut arena, "d");
    arena.add_child_to_back(call, d);
    let c = name(&mut arena, "c");
    arena.add_child_before(c, d);

    assert_eq!(arena.children(call), &[a, b, c, d]);
    for child in [a, b, c, d] {
        assert_eq!(arena.parent(child), call);
    }
}

#[test]
fn test_clone_node_is_shallow_and_detached() {
    let mut arena = NodeArena::new();
    let (_, _, get, _) = script_with_get_prop(&mut arena);

    let copy = arena.clone_node(get);

    assert_ne!(copy, get);
    assert!(arena.is_detached(copy));
    assert!(arena.children(copy).is_empty());
    assert_eq!(arena.kind(copy), Some(SyntaxKind::GetProp));
    assert_eq!(arena.text(copy), Some("b"));
}

#[test]
fn test_set_kind_and_chain_start_flag() {
    let mut arena = NodeArena::new();
    let a = name(&mut arena, "a");
    let mut node = Node::with_text(SyntaxKind::OptChainGetProp, "b");
    node.flags = NodeFlags::OPTIONAL_CHAIN_START;
    let get = arena.add_node(node, &[a]);
    assert!(arena.is_optional_chain_start(get));

    arena.set_kind(get, SyntaxKind::GetProp);
    arena.set_is_optional_chain_start(get, false);

    assert!(arena.is_normal_get(get));
    assert!(!arena.is_optional_chain_start(get));
}

#[test]
fn test_script_features() {
    let mut arena = NodeArena::new();
    let (script, ..) = script_with_get_prop(&mut arena);
    assert!(arena.script_features(script).is_empty());

    arena.add_feature_to_script(script, LanguageFeature::LetDeclarations);
    arena.add_feature_to_script(script, LanguageFeature::LetDeclarations);

    assert_eq!(arena.script_features(script), FeatureSet::LET_DECLARATIONS);
}

#[test]
fn test_none_index_is_inert() {
    let mut arena = NodeArena::new();
    assert!(arena.get(NodeIndex::NONE).is_none());
    assert!(arena.children(NodeIndex::NONE).is_empty());
    assert!(arena.first_child(NodeIndex::NONE).is_none());
    assert!(arena.clone_node(NodeIndex::NONE).is_none());
}
