//! Test utilities for jsdown.
//!
//! - [`source_reader`]: reads a small JavaScript subset (including `?.`)
//!   into a [`jsdown_ast::NodeArena`]
//! - [`printer`]: prints a tree back as JavaScript
//! - [`interpreter`]: runs a tree so original and lowered programs can be
//!   compared by what they log

pub mod interpreter;
pub use interpreter::{Execution, Interpreter, RuntimeError, Value, execute};

pub mod printer;
pub use printer::{Printer, print_node};

pub mod source_reader;
pub use source_reader::{ReadError, read_script, read_script_into};

use jsdown_ast::{NodeArena, NodeIndex, SyntaxKind};

/// Find the first node of `kind` in pre-order under `root`.
pub fn find_first(arena: &NodeArena, root: NodeIndex, kind: SyntaxKind) -> Option<NodeIndex> {
    arena
        .descendants_preorder(root)
        .into_iter()
        .find(|&n| arena.is_kind(n, kind))
}

/// Find the first `Name` node with the given text.
pub fn find_name(arena: &NodeArena, root: NodeIndex, name: &str) -> Option<NodeIndex> {
    arena
        .descendants_preorder(root)
        .into_iter()
        .find(|&n| arena.is_name(n) && arena.text(n) == Some(name))
}

/// Every end of a complete optional chain under `root`, in pre-order.
pub fn find_chain_ends(arena: &NodeArena, root: NodeIndex) -> Vec<NodeIndex> {
    arena
        .descendants_preorder(root)
        .into_iter()
        .filter(|&n| arena.is_end_of_full_opt_chain(n))
        .collect()
}
