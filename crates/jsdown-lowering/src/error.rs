//! Errors raised when optional-chain lowering meets a tree that breaks its
//! preconditions.
//!
//! Every variant is an internal defect (a pass ran twice, or an earlier pass
//! produced an inconsistent chain), not a problem with user source.

use jsdown_ast::{NodeArena, NodeIndex, SyntaxKind};
use jsdown_common::{Diagnostic, DiagnosticMessage, diagnostic_messages, format_message};
use std::fmt;
use thiserror::Error;

/// The node an error is about, captured at the time of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSite {
    pub node: NodeIndex,
    /// `None` when the index does not name a node
    pub kind: Option<SyntaxKind>,
    pub pos: u32,
    pub end: u32,
}

impl NodeSite {
    pub fn of(arena: &NodeArena, node: NodeIndex) -> NodeSite {
        match arena.get(node) {
            Some(n) => NodeSite {
                node,
                kind: Some(n.kind),
                pos: n.pos,
                end: n.end,
            },
            None => NodeSite {
                node,
                kind: None,
                pos: jsdown_ast::Node::NO_POS,
                end: jsdown_ast::Node::NO_POS,
            },
        }
    }

    fn kind_name(&self) -> &'static str {
        self.kind.map_or("<missing>", SyntaxKind::as_str)
    }

    fn has_source_info(&self) -> bool {
        self.pos != jsdown_ast::Node::NO_POS
    }
}

impl fmt::Display for NodeSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind_name(), self.node)?;
        if self.has_source_info() {
            write!(f, " at {}", self.pos)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoweringError {
    #[error("optional chain ending at {0} was already rewritten")]
    AlreadyRewritten(NodeSite),

    #[error("{0} is not the end of a complete optional chain")]
    NotEndOfFullChain(NodeSite),

    #[error("optional chain ending at {0} has no parent")]
    MissingParent(NodeSite),

    #[error("optional chain ending at {0} has no enclosing statement")]
    MissingEnclosingStatement(NodeSite),

    #[error("optional chain ending at {0} is not inside a script")]
    MissingEnclosingScript(NodeSite),

    #[error("segment receiver {0} is still an optional chain")]
    ReceiverStillOptional(NodeSite),

    #[error("optional chain segment reaches {0} before finding its start")]
    InconsistentSegment(NodeSite),
}

impl LoweringError {
    pub fn site(&self) -> &NodeSite {
        match self {
            LoweringError::AlreadyRewritten(site)
            | LoweringError::NotEndOfFullChain(site)
            | LoweringError::MissingParent(site)
            | LoweringError::MissingEnclosingStatement(site)
            | LoweringError::MissingEnclosingScript(site)
            | LoweringError::ReceiverStillOptional(site)
            | LoweringError::InconsistentSegment(site) => site,
        }
    }

    pub fn message(&self) -> DiagnosticMessage {
        match self {
            LoweringError::AlreadyRewritten(_) => {
                diagnostic_messages::OPTIONAL_CHAIN_ALREADY_REWRITTEN
            }
            LoweringError::NotEndOfFullChain(_) => {
                diagnostic_messages::OPTIONAL_CHAIN_NOT_END_OF_FULL_CHAIN
            }
            LoweringError::MissingParent(_) => diagnostic_messages::OPTIONAL_CHAIN_MISSING_PARENT,
            LoweringError::MissingEnclosingStatement(_) => {
                diagnostic_messages::OPTIONAL_CHAIN_MISSING_ENCLOSING_STATEMENT
            }
            LoweringError::MissingEnclosingScript(_) => {
                diagnostic_messages::OPTIONAL_CHAIN_MISSING_ENCLOSING_SCRIPT
            }
            LoweringError::ReceiverStillOptional(_) => {
                diagnostic_messages::OPTIONAL_CHAIN_RECEIVER_STILL_OPTIONAL
            }
            LoweringError::InconsistentSegment(_) => {
                diagnostic_messages::OPTIONAL_CHAIN_INCONSISTENT_SEGMENT
            }
        }
    }

    #[inline]
    pub fn code(&self) -> u32 {
        self.message().code
    }

    /// Convert into a diagnostic anchored at the offending node.
    ///
    /// Synthetic nodes have no span; their diagnostics start at 0 with length 0.
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        let site = self.site();
        let message = self.message();
        let text = format_message(message.message, &[site.kind_name()]);
        let (start, length) = if site.has_source_info() {
            (site.pos, site.end.saturating_sub(site.pos))
        } else {
            (0, 0)
        };
        Diagnostic::error(file, start, length, text, message.code)
    }
}

#[cfg(test)]
#[path = "../tests/error_tests.rs"]
mod tests;
