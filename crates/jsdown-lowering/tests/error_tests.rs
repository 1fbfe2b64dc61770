use super::*;
use jsdown_common::{DiagnosticCategory, diagnostic_codes};
use jsdown_test_helpers::{find_chain_ends, read_script};

fn chain_site(source: &str) -> NodeSite {
    let (arena, script) = read_script(source).expect("source should read");
    let end = find_chain_ends(&arena, script)[0];
    NodeSite::of(&arena, end)
}

#[test]
fn test_site_captures_kind_and_span() {
    let site = chain_site("a?.b;");

    assert_eq!(site.kind, Some(SyntaxKind::OptChainGetProp));
    assert_eq!((site.pos, site.end), (0, 4));
    assert_eq!(site.to_string(), format!("OptChainGetProp {} at 0", site.node));
}

#[test]
fn test_site_of_missing_node() {
    let arena = NodeArena::new();
    let site = NodeSite::of(&arena, NodeIndex::NONE);

    assert_eq!(site.kind, None);
    assert_eq!(site.to_string(), "<missing> #none");
}

#[test]
fn test_error_display_names_the_node() {
    let error = LoweringError::NotEndOfFullChain(chain_site("x = a?.b;"));
    let text = error.to_string();

    assert!(text.starts_with("OptChainGetProp #"), "{text}");
    assert!(text.ends_with("at 4 is not the end of a complete optional chain"), "{text}");
}

#[test]
fn test_to_diagnostic_uses_message_template() {
    let mut arena = NodeArena::new();
    let node = arena.add_node(
        jsdown_ast::Node::with_text(SyntaxKind::GetProp, "b").with_span(3, 7),
        &[],
    );
    let error = LoweringError::AlreadyRewritten(NodeSite::of(&arena, node));

    let diagnostic = error.to_diagnostic("input.js");
    assert_eq!(diagnostic.code, diagnostic_codes::OPTIONAL_CHAIN_ALREADY_REWRITTEN);
    assert_eq!(diagnostic.category, DiagnosticCategory::Error);
    assert_eq!(diagnostic.file, "input.js");
    assert_eq!((diagnostic.start, diagnostic.length), (3, 4));
    assert_eq!(
        diagnostic.message_text,
        "Optional chain ending at GetProp node was already rewritten."
    );
}

#[test]
fn test_synthetic_node_diagnostic_has_empty_span() {
    let mut arena = NodeArena::new();
    let node = arena.create_name("_a", NodeIndex::NONE);
    let diagnostic =
        LoweringError::InconsistentSegment(NodeSite::of(&arena, node)).to_diagnostic("input.js");

    assert_eq!((diagnostic.start, diagnostic.length), (0, 0));
    assert_eq!(
        diagnostic.message_text,
        "Optional chain segment reaches Name node before finding its start."
    );
}

#[test]
fn test_every_variant_has_its_own_code() {
    let site = NodeSite::of(&NodeArena::new(), NodeIndex::NONE);
    let errors = [
        LoweringError::AlreadyRewritten(site),
        LoweringError::NotEndOfFullChain(site),
        LoweringError::MissingParent(site),
        LoweringError::MissingEnclosingStatement(site),
        LoweringError::MissingEnclosingScript(site),
        LoweringError::ReceiverStillOptional(site),
        LoweringError::InconsistentSegment(site),
    ];

    let codes: Vec<u32> = errors.iter().map(LoweringError::code).collect();
    assert_eq!(codes, (9100..=9106).collect::<Vec<_>>());
    assert!(errors.iter().all(|e| e.site() == &site));
}
