//! Records which functions and scripts a pass modified.
//!
//! Later analyses only revisit scopes listed here. A change is attributed to
//! the nearest enclosing `Function` or `Script` of the edited node.

use indexmap::IndexSet;
use jsdown_ast::{NodeArena, NodeIndex};
use rustc_hash::FxBuildHasher;
use tracing::trace;

#[derive(Debug, Default)]
pub struct ChangeTracker {
    /// Changed scopes in first-report order
    changed: IndexSet<NodeIndex, FxBuildHasher>,
}

impl ChangeTracker {
    pub fn new() -> ChangeTracker {
        ChangeTracker::default()
    }

    /// Mark the change scope enclosing `node` as changed and return it.
    ///
    /// Returns `None` when `node` is not inside a function or script.
    pub fn report_change_to_enclosing_scope(
        &mut self,
        arena: &NodeArena,
        node: NodeIndex,
    ) -> Option<NodeIndex> {
        let scope = arena.get_enclosing_change_scope(node)?;
        if self.changed.insert(scope) {
            trace!(%scope, kind = ?arena.kind(scope), "scope changed");
        }
        Some(scope)
    }

    pub fn is_changed(&self, scope: NodeIndex) -> bool {
        self.changed.contains(&scope)
    }

    pub fn changed_scopes(&self) -> &IndexSet<NodeIndex, FxBuildHasher> {
        &self.changed
    }

    pub fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }

    /// Drain the recorded scopes, leaving the tracker empty.
    pub fn take_changed_scopes(&mut self) -> Vec<NodeIndex> {
        self.changed.drain(..).collect()
    }
}

#[cfg(test)]
#[path = "../tests/change_tracker_tests.rs"]
mod tests;
