//! Arena storage for AST nodes.
//!
//! Every node lives in [`NodeArena::nodes`] and is addressed by a
//! [`NodeIndex`]. Parent links are indices too, so the tree can be edited in
//! place without shared ownership. Nodes are never freed: a node removed from
//! the tree is merely detached (its `parent` is `NONE` and no node lists it as
//! a child) and may be reinserted elsewhere.
//!
//! # Tree invariant
//!
//! A node appears in at most one `children` list, and its `parent` field names
//! the owner of that list. Every structural edit below preserves this; the
//! insertion methods `debug_assert!` that the inserted node is detached.

use crate::base::{NodeIndex, TypeId};
use crate::flags::NodeFlags;
use crate::syntax_kind::SyntaxKind;
use jsdown_common::{FeatureSet, LanguageFeature};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

pub type NodeChildren = SmallVec<[NodeIndex; 4]>;

/// A single AST node.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: SyntaxKind,
    pub flags: NodeFlags,
    /// Start position in source (`Node::NO_POS` when synthetic)
    pub pos: u32,
    /// End position in source (`Node::NO_POS` when synthetic)
    pub end: u32,
    pub type_id: TypeId,
    /// Identifier, property name, or literal text
    pub text: Option<Box<str>>,
    parent: NodeIndex,
    children: NodeChildren,
}

impl Node {
    pub const NO_POS: u32 = u32::MAX;

    pub fn new(kind: SyntaxKind) -> Node {
        Node {
            kind,
            flags: NodeFlags::empty(),
            pos: Self::NO_POS,
            end: Self::NO_POS,
            type_id: TypeId::UNKNOWN,
            text: None,
            parent: NodeIndex::NONE,
            children: NodeChildren::new(),
        }
    }

    pub fn with_text(kind: SyntaxKind, text: impl Into<Box<str>>) -> Node {
        Node {
            text: Some(text.into()),
            ..Node::new(kind)
        }
    }

    pub fn with_span(mut self, pos: u32, end: u32) -> Node {
        self.pos = pos;
        self.end = end;
        self
    }

    #[inline]
    pub fn parent(&self) -> NodeIndex {
        self.parent
    }

    #[inline]
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    #[inline]
    pub fn has_source_info(&self) -> bool {
        self.pos != Self::NO_POS
    }

    #[inline]
    pub fn is_optional_chain_start(&self) -> bool {
        self.flags.contains(NodeFlags::OPTIONAL_CHAIN_START)
    }
}

/// Arena-based storage for AST nodes.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
    /// Language features recorded per `Script` node
    script_features: FxHashMap<NodeIndex, FeatureSet>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
            script_features: FxHashMap::default(),
        }
    }

    /// Number of nodes ever allocated, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[inline]
    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    #[inline]
    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    // ============================================================================
    // Node Creation
    // ============================================================================

    /// Add a node with the given children and return its index.
    ///
    /// Children must be detached; they become owned by the new node in order.
    pub fn add_node(&mut self, mut node: Node, children: &[NodeIndex]) -> NodeIndex {
        let index = NodeIndex(self.nodes.len() as u32);
        node.parent = NodeIndex::NONE;
        node.children = children.iter().copied().collect();
        self.nodes.push(node);
        for &child in children {
            self.set_parent(child, index);
        }
        index
    }

    /// Shallow copy of a node: same kind, flags, text, span and type, no
    /// children, detached.
    pub fn clone_node(&mut self, index: NodeIndex) -> NodeIndex {
        let Some(node) = self.get(index) else {
            return NodeIndex::NONE;
        };
        let copy = Node {
            kind: node.kind,
            flags: node.flags,
            pos: node.pos,
            end: node.end,
            type_id: node.type_id,
            text: node.text.clone(),
            parent: NodeIndex::NONE,
            children: NodeChildren::new(),
        };
        self.add_node(copy, &[])
    }

    // ============================================================================
    // Parent Mapping Helpers
    // ============================================================================

    #[inline]
    fn set_parent(&mut self, child: NodeIndex, parent: NodeIndex) {
        if let Some(node) = self.get_mut(child) {
            debug_assert!(
                node.parent.is_none() || parent.is_none(),
                "{child} already has parent {}",
                node.parent
            );
            node.parent = parent;
        }
    }

    fn child_position(&self, parent: NodeIndex, child: NodeIndex) -> Option<usize> {
        self.get(parent)?.children.iter().position(|&c| c == child)
    }

    // ============================================================================
    // Structural Edits
    // ============================================================================

    /// Remove a node from its parent. Returns the same index for chaining.
    pub fn detach(&mut self, index: NodeIndex) -> NodeIndex {
        let parent = self.parent(index);
        if let Some(position) = self.child_position(parent, index) {
            if let Some(parent_node) = self.get_mut(parent) {
                parent_node.children.remove(position);
            }
        }
        if let Some(node) = self.get_mut(index) {
            node.parent = NodeIndex::NONE;
        }
        index
    }

    /// Put detached `replacement` where `index` is, detaching `index`.
    pub fn replace_with(&mut self, index: NodeIndex, replacement: NodeIndex) {
        debug_assert!(self.is_detached(replacement), "{replacement} is attached");
        let parent = self.parent(index);
        let Some(position) = self.child_position(parent, index) else {
            debug_assert!(false, "{index} is not attached");
            return;
        };
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children[position] = replacement;
        }
        if let Some(node) = self.get_mut(index) {
            node.parent = NodeIndex::NONE;
        }
        self.set_parent(replacement, parent);
    }

    pub fn add_child_to_front(&mut self, parent: NodeIndex, child: NodeIndex) {
        debug_assert!(self.is_detached(child), "{child} is attached");
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.insert(0, child);
            self.set_parent(child, parent);
        }
    }

    pub fn add_child_to_back(&mut self, parent: NodeIndex, child: NodeIndex) {
        debug_assert!(self.is_detached(child), "{child} is attached");
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.push(child);
            self.set_parent(child, parent);
        }
    }

    /// Insert detached `new_child` immediately before its sibling-to-be `existing`.
    pub fn add_child_before(&mut self, new_child: NodeIndex, existing: NodeIndex) {
        debug_assert!(self.is_detached(new_child), "{new_child} is attached");
        let parent = self.parent(existing);
        let Some(position) = self.child_position(parent, existing) else {
            debug_assert!(false, "{existing} is not attached");
            return;
        };
        if let Some(parent_node) = self.get_mut(parent) {
            parent_node.children.insert(position, new_child);
        }
        self.set_parent(new_child, parent);
    }

    pub fn set_kind(&mut self, index: NodeIndex, kind: SyntaxKind) {
        if let Some(node) = self.get_mut(index) {
            node.kind = kind;
        }
    }

    pub fn set_flag(&mut self, index: NodeIndex, flag: NodeFlags, value: bool) {
        if let Some(node) = self.get_mut(index) {
            node.flags.set(flag, value);
        }
    }

    pub fn clear_flag(&mut self, index: NodeIndex, flag: NodeFlags) {
        self.set_flag(index, flag, false);
    }

    pub fn set_is_optional_chain_start(&mut self, index: NodeIndex, value: bool) {
        self.set_flag(index, NodeFlags::OPTIONAL_CHAIN_START, value);
    }

    // ============================================================================
    // Script Features
    // ============================================================================

    pub fn add_feature_to_script(&mut self, script: NodeIndex, feature: LanguageFeature) {
        debug_assert_eq!(self.kind(script), Some(SyntaxKind::Script));
        let features = self.script_features.entry(script).or_default();
        *features = features.with(feature);
    }

    pub fn script_features(&self, script: NodeIndex) -> FeatureSet {
        self.script_features
            .get(&script)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
#[path = "../tests/node_arena_tests.rs"]
mod tests;
