//! Read-only queries over a [`NodeArena`].
//!
//! Includes the optional-chain shape queries used by lowering:
//!
//! ```text
//! a?.b.c?.d(x)
//!
//! OptChainCall            <- end of full chain, continues segment 2
//! └─ OptChainGetProp .d   <- start of segment 2 (flagged)
//!    └─ OptChainGetProp .c  <- end of segment 1
//!       └─ OptChainGetProp .b  <- start of segment 1 (flagged)
//!          └─ Name a           <- receiver of segment 1
//! ```

use crate::base::NodeIndex;
use crate::node::NodeArena;
use crate::syntax_kind::SyntaxKind;

impl NodeArena {
    #[inline]
    pub fn kind(&self, index: NodeIndex) -> Option<SyntaxKind> {
        self.get(index).map(|n| n.kind)
    }

    #[inline]
    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.parent())
    }

    #[inline]
    pub fn children(&self, index: NodeIndex) -> &[NodeIndex] {
        self.get(index).map_or(&[][..], |n| n.children())
    }

    #[inline]
    pub fn first_child(&self, index: NodeIndex) -> NodeIndex {
        self.children(index)
            .first()
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    #[inline]
    pub fn text(&self, index: NodeIndex) -> Option<&str> {
        self.get(index).and_then(|n| n.text.as_deref())
    }

    #[inline]
    pub fn is_detached(&self, index: NodeIndex) -> bool {
        self.parent(index).is_none()
    }

    pub fn is_first_child_of(&self, child: NodeIndex, parent: NodeIndex) -> bool {
        child.is_some() && self.parent(child) == parent && self.first_child(parent) == child
    }

    #[inline]
    pub fn is_kind(&self, index: NodeIndex, kind: SyntaxKind) -> bool {
        self.kind(index) == Some(kind)
    }

    #[inline]
    pub fn is_call(&self, index: NodeIndex) -> bool {
        self.is_kind(index, SyntaxKind::Call)
    }

    #[inline]
    pub fn is_name(&self, index: NodeIndex) -> bool {
        self.is_kind(index, SyntaxKind::Name)
    }

    /// Plain (non-optional) property or element access.
    #[inline]
    pub fn is_normal_get(&self, index: NodeIndex) -> bool {
        self.kind(index).is_some_and(SyntaxKind::is_normal_get)
    }

    #[inline]
    pub fn is_opt_chain_node(&self, index: NodeIndex) -> bool {
        self.kind(index).is_some_and(SyntaxKind::is_opt_chain)
    }

    #[inline]
    pub fn is_optional_chain_start(&self, index: NodeIndex) -> bool {
        self.get(index).is_some_and(|n| n.is_optional_chain_start())
    }

    // ============================================================================
    // Optional Chain Shape
    // ============================================================================

    /// True when `index` is a chain node that no enclosing chain node continues.
    ///
    /// A chain node nested in a non-first position of another chain node (an
    /// index or an argument) ends its own, independent chain.
    pub fn is_end_of_full_opt_chain(&self, index: NodeIndex) -> bool {
        if !self.is_opt_chain_node(index) {
            return false;
        }
        let parent = self.parent(index);
        !(self.is_opt_chain_node(parent) && self.is_first_child_of(index, parent))
    }

    /// A chain node carrying the `?.` flag.
    pub fn is_start_of_opt_chain_segment(&self, index: NodeIndex) -> bool {
        self.is_opt_chain_node(index) && self.is_optional_chain_start(index)
    }

    /// True when `index` is the last node of its segment.
    pub fn is_end_of_opt_chain_segment(&self, index: NodeIndex) -> bool {
        if self.is_end_of_full_opt_chain(index) {
            return true;
        }
        self.is_opt_chain_node(index) && self.is_optional_chain_start(self.parent(index))
    }

    /// Follow first children from a chain node down to the `?.` node that
    /// begins its segment.
    ///
    /// Returns `None` when the walk leaves the chain before finding a flagged
    /// node.
    pub fn get_start_of_opt_chain_segment(&self, index: NodeIndex) -> Option<NodeIndex> {
        let mut current = index;
        while self.is_opt_chain_node(current) {
            if self.is_optional_chain_start(current) {
                return Some(current);
            }
            current = self.first_child(current);
        }
        None
    }

    /// Walk up from a chain node to the last node of its segment.
    ///
    /// Returns `None` when `index` is not a chain node.
    pub fn get_end_of_opt_chain_segment(&self, index: NodeIndex) -> Option<NodeIndex> {
        let mut current = index;
        loop {
            if !self.is_opt_chain_node(current) {
                return None;
            }
            if self.is_end_of_opt_chain_segment(current) {
                return Some(current);
            }
            current = self.parent(current);
        }
    }

    // ============================================================================
    // Enclosing Nodes
    // ============================================================================

    /// A statement is any node directly owned by a statement parent.
    pub fn is_statement(&self, index: NodeIndex) -> bool {
        self.kind(self.parent(index))
            .is_some_and(SyntaxKind::is_statement_parent)
    }

    /// The statement containing `index` (or `index` itself when it is one).
    pub fn get_enclosing_statement(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.ancestors_or_self(index)
            .find(|&n| self.is_statement(n))
    }

    pub fn get_enclosing_script(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.ancestors_or_self(index)
            .find(|&n| self.is_kind(n, SyntaxKind::Script))
    }

    /// Nearest function or script, the granularity of change reporting.
    pub fn get_enclosing_change_scope(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.ancestors_or_self(index)
            .find(|&n| self.kind(n).is_some_and(SyntaxKind::is_change_scope_root))
    }

    pub fn ancestors_or_self(&self, index: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        std::iter::successors(index.into_option(), move |&n| self.parent(n).into_option())
    }

    /// Pre-order list of `root` and every node below it.
    pub fn descendants_preorder(&self, root: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            if self.get(index).is_none() {
                continue;
            }
            out.push(index);
            stack.extend(self.children(index).iter().rev().copied());
        }
        out
    }
}

#[cfg(test)]
#[path = "../tests/node_access_tests.rs"]
mod tests;
