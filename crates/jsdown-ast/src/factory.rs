//! Node construction for transforms.
//!
//! Each `create_*` method returns a new, detached node. The `src` argument
//! names a reference node whose span and type are copied onto every node the
//! method allocates (pass [`NodeIndex::NONE`] to leave them missing). Nodes
//! passed in as operands must be detached; they become children of the result
//! and keep their own source info.

use crate::base::NodeIndex;
use crate::flags::NodeFlags;
use crate::node::{Node, NodeArena};
use crate::syntax_kind::SyntaxKind;

impl NodeArena {
    fn synthesize(
        &mut self,
        kind: SyntaxKind,
        text: Option<&str>,
        children: &[NodeIndex],
        src: NodeIndex,
    ) -> NodeIndex {
        let mut node = Node::new(kind);
        node.text = text.map(Into::into);
        node.flags = NodeFlags::SYNTHESIZED;
        if let Some(src_node) = self.get(src) {
            node.pos = src_node.pos;
            node.end = src_node.end;
            node.type_id = src_node.type_id;
        }
        self.add_node(node, children)
    }

    /// `;` used as a stand-in while a subtree is rebuilt.
    pub fn create_empty(&mut self) -> NodeIndex {
        self.synthesize(SyntaxKind::Empty, None, &[], NodeIndex::NONE)
    }

    pub fn create_name(&mut self, name: &str, src: NodeIndex) -> NodeIndex {
        self.synthesize(SyntaxKind::Name, Some(name), &[], src)
    }

    pub fn create_null(&mut self, src: NodeIndex) -> NodeIndex {
        self.synthesize(SyntaxKind::Null, None, &[], src)
    }

    pub fn create_number(&mut self, value: &str, src: NodeIndex) -> NodeIndex {
        self.synthesize(SyntaxKind::NumberLit, Some(value), &[], src)
    }

    /// `void 0`
    pub fn create_undefined_value(&mut self, src: NodeIndex) -> NodeIndex {
        let zero = self.create_number("0", src);
        self.synthesize(SyntaxKind::Void, None, &[zero], src)
    }

    /// `receiver.name`
    pub fn create_get_prop(&mut self, receiver: NodeIndex, name: &str, src: NodeIndex) -> NodeIndex {
        self.synthesize(SyntaxKind::GetProp, Some(name), &[receiver], src)
    }

    /// `left == right`
    pub fn create_eq(&mut self, left: NodeIndex, right: NodeIndex, src: NodeIndex) -> NodeIndex {
        self.synthesize(SyntaxKind::Eq, None, &[left, right], src)
    }

    /// `cond ? when_true : when_false`
    pub fn create_hook(
        &mut self,
        cond: NodeIndex,
        when_true: NodeIndex,
        when_false: NodeIndex,
        src: NodeIndex,
    ) -> NodeIndex {
        self.synthesize(SyntaxKind::Hook, None, &[cond, when_true, when_false], src)
    }

    /// `name = value`
    pub fn create_assign(&mut self, name: &str, value: NodeIndex, src: NodeIndex) -> NodeIndex {
        let target = self.create_name(name, src);
        self.synthesize(SyntaxKind::Assign, None, &[target, value], src)
    }

    /// `let name;`
    pub fn create_single_let_name_declaration(&mut self, name: &str, src: NodeIndex) -> NodeIndex {
        let binding = self.create_name(name, src);
        self.synthesize(SyntaxKind::Let, None, &[binding], src)
    }
}

#[cfg(test)]
#[path = "../tests/factory_tests.rs"]
mod tests;
