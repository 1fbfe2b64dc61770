//! Arena-backed JavaScript AST for the jsdown compiler.
//!
//! - [`NodeArena`] owns every node; [`NodeIndex`] handles address them.
//! - Parents are stored as indices, so transforms edit the tree in place
//!   (`detach`, `replace_with`, `add_child_*`) without shared ownership.
//! - [`node_access`] holds read-only queries, including optional-chain shape
//!   queries; [`factory`] builds synthetic subtrees.

pub mod base;
pub use base::{NodeIndex, TypeId};

pub mod flags;
pub use flags::NodeFlags;

pub mod syntax_kind;
pub use syntax_kind::SyntaxKind;

pub mod node;
pub use node::{Node, NodeArena, NodeChildren};

pub mod node_access;

pub mod factory;
