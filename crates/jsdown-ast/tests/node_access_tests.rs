use crate::node::Node;
use crate::{NodeArena, NodeFlags, NodeIndex, SyntaxKind};

fn leaf(arena: &mut NodeArena, kind: SyntaxKind, text: &str) -> NodeIndex {
    arena.add_node(Node::with_text(kind, text), &[])
}

fn link(
    arena: &mut NodeArena,
    kind: SyntaxKind,
    text: Option<&str>,
    children: &[NodeIndex],
    start: bool,
) -> NodeIndex {
    let mut node = Node::new(kind);
    node.text = text.map(Into::into);
    if start {
        node.flags = NodeFlags::OPTIONAL_CHAIN_START;
    }
    arena.add_node(node, children)
}

struct Chain {
    script: NodeIndex,
    stmt: NodeIndex,
    a: NodeIndex,
    b: NodeIndex,
    c: NodeIndex,
    d: NodeIndex,
    end: NodeIndex,
    inner_end: NodeIndex,
}

/// `a?.b.c?.d(e?.f);`
fn build_chain(arena: &mut NodeArena) -> Chain {
    let a = leaf(arena, SyntaxKind::Name, "a");
    let b = link(arena, SyntaxKind::OptChainGetProp, Some("b"), &[a], true);
    let c = link(arena, SyntaxKind::OptChainGetProp, Some("c"), &[b], false);
    let d = link(arena, SyntaxKind::OptChainGetProp, Some("d"), &[c], true);
    let e = leaf(arena, SyntaxKind::Name, "e");
    let inner_end = link(arena, SyntaxKind::OptChainGetProp, Some("f"), &[e], true);
    let end = link(arena, SyntaxKind::OptChainCall, None, &[d, inner_end], false);
    let stmt = arena.add_node(Node::new(SyntaxKind::ExprResult), &[end]);
    let script = arena.add_node(Node::new(SyntaxKind::Script), &[stmt]);
    Chain {
        script,
        stmt,
        a,
        b,
        c,
        d,
        end,
        inner_end,
    }
}

#[test]
fn test_end_of_full_opt_chain() {
    let mut arena = NodeArena::new();
    let chain = build_chain(&mut arena);

    assert!(arena.is_end_of_full_opt_chain(chain.end));
    assert!(arena.is_end_of_full_opt_chain(chain.inner_end));
    assert!(!arena.is_end_of_full_opt_chain(chain.d));
    assert!(!arena.is_end_of_full_opt_chain(chain.b));
    assert!(!arena.is_end_of_full_opt_chain(chain.a));
}

#[test]
fn test_segment_start_and_end() {
    let mut arena = NodeArena::new();
    let chain = build_chain(&mut arena);

    assert_eq!(arena.get_start_of_opt_chain_segment(chain.end), Some(chain.d));
    assert_eq!(arena.get_start_of_opt_chain_segment(chain.c), Some(chain.b));
    assert_eq!(arena.get_start_of_opt_chain_segment(chain.a), None);

    assert_eq!(arena.get_end_of_opt_chain_segment(chain.b), Some(chain.c));
    assert_eq!(arena.get_end_of_opt_chain_segment(chain.d), Some(chain.end));
    assert_eq!(arena.get_end_of_opt_chain_segment(chain.a), None);
    assert!(arena.is_end_of_opt_chain_segment(chain.c));
    assert!(!arena.is_end_of_opt_chain_segment(chain.b));
}

#[test]
fn test_inconsistent_start_flag_is_reported() {
    let mut arena = NodeArena::new();
    let a = leaf(&mut arena, SyntaxKind::Name, "a");
    let b = link(&mut arena, SyntaxKind::OptChainGetProp, Some("b"), &[a], false);
    assert_eq!(arena.get_start_of_opt_chain_segment(b), None);
}

#[test]
fn test_first_child_relation() {
    let mut arena = NodeArena::new();
    let chain = build_chain(&mut arena);

    assert_eq!(arena.first_child(chain.end), chain.d);
    assert!(arena.is_first_child_of(chain.d, chain.end));
    assert!(!arena.is_first_child_of(chain.inner_end, chain.end));
    assert!(!arena.is_first_child_of(NodeIndex::NONE, chain.end));
}

#[test]
fn test_enclosing_nodes() {
    let mut arena = NodeArena::new();
    let chain = build_chain(&mut arena);

    assert_eq!(arena.get_enclosing_statement(chain.a), Some(chain.stmt));
    assert_eq!(arena.get_enclosing_statement(chain.stmt), Some(chain.stmt));
    assert_eq!(arena.get_enclosing_script(chain.a), Some(chain.script));
    assert_eq!(arena.get_enclosing_change_scope(chain.a), Some(chain.script));
    assert!(arena.is_statement(chain.stmt));
    assert!(!arena.is_statement(chain.end));
}

#[test]
fn test_enclosing_change_scope_is_innermost_function() {
    let mut arena = NodeArena::new();
    let x = leaf(&mut arena, SyntaxKind::Name, "x");
    let stmt = arena.add_node(Node::new(SyntaxKind::ExprResult), &[x]);
    let body = arena.add_node(Node::new(SyntaxKind::Block), &[stmt]);
    let fn_name = leaf(&mut arena, SyntaxKind::Name, "f");
    let params = arena.add_node(Node::new(SyntaxKind::ParamList), &[]);
    let func = arena.add_node(Node::new(SyntaxKind::Function), &[fn_name, params, body]);
    let _script = arena.add_node(Node::new(SyntaxKind::Script), &[func]);

    assert_eq!(arena.get_enclosing_change_scope(x), Some(func));
    assert_eq!(arena.get_enclosing_statement(x), Some(stmt));
}

#[test]
fn test_detached_node_has_no_enclosing_statement() {
    let mut arena = NodeArena::new();
    let a = leaf(&mut arena, SyntaxKind::Name, "a");
    assert_eq!(arena.get_enclosing_statement(a), None);
    assert_eq!(arena.get_enclosing_script(a), None);
}

#[test]
fn test_descendants_preorder() {
    let mut arena = NodeArena::new();
    let chain = build_chain(&mut arena);

    let order = arena.descendants_preorder(chain.stmt);

    assert_eq!(order.first(), Some(&chain.stmt));
    let pos = |n: NodeIndex| order.iter().position(|&x| x == n);
    assert!(pos(chain.end) < pos(chain.d));
    assert!(pos(chain.d) < pos(chain.inner_end));
    assert!(pos(chain.a) < pos(chain.inner_end));
    assert_eq!(order.len(), 8);
}

#[test]
fn test_start_of_opt_chain_segment_requires_chain_kind() {
    let mut arena = NodeArena::new();
    let chain = build_chain(&mut arena);

    assert!(arena.is_start_of_opt_chain_segment(chain.b));
    assert!(!arena.is_start_of_opt_chain_segment(chain.c));

    arena.set_kind(chain.b, SyntaxKind::GetProp);
    assert!(!arena.is_start_of_opt_chain_segment(chain.b));
    arena.clear_flag(chain.b, NodeFlags::OPTIONAL_CHAIN_START);
    assert!(!arena.is_optional_chain_start(chain.b));
}
