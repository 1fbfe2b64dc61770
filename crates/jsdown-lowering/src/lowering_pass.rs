//! Script-level driver for optional chain lowering.

use crate::change_tracker::ChangeTracker;
use crate::error::LoweringError;
use crate::optional_chain::{RewriteContext, rewrite_optional_chain};
use crate::options::LoweringOptions;
use crate::tmp_names::UniqueNameGenerator;
use jsdown_ast::{NodeArena, NodeIndex};
use jsdown_common::LanguageFeature;
use tracing::{debug, info_span, trace};

/// Outcome of lowering one script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoweringReport {
    pub chains_rewritten: usize,
    /// Functions and scripts whose bodies changed, in first-change order
    pub changed_scopes: Vec<NodeIndex>,
}

impl LoweringReport {
    pub fn is_unchanged(&self) -> bool {
        self.chains_rewritten == 0
    }
}

/// Lowers every optional chain in a script when the target lacks `?.`.
///
/// The name generator is borrowed so that several scripts of one compilation
/// unit draw temporaries from the same sequence. [`run`](Self::run) only
/// reserves the names of its own script; lower a multi-script unit with
/// [`run_all`](Self::run_all).
pub struct OptionalChainLoweringPass<'a> {
    arena: &'a mut NodeArena,
    names: &'a mut UniqueNameGenerator,
    options: LoweringOptions,
    changes: ChangeTracker,
}

impl<'a> OptionalChainLoweringPass<'a> {
    pub fn new(
        arena: &'a mut NodeArena,
        names: &'a mut UniqueNameGenerator,
        options: LoweringOptions,
    ) -> OptionalChainLoweringPass<'a> {
        OptionalChainLoweringPass {
            arena,
            names,
            options,
            changes: ChangeTracker::new(),
        }
    }

    /// Rewrite all optional chains under `script`.
    ///
    /// Stops at the first chain that fails to rewrite; chains handled before
    /// it stay rewritten.
    pub fn run(self, script: NodeIndex) -> Result<LoweringReport, LoweringError> {
        self.run_all(&[script])
    }

    /// Rewrite all optional chains in every script of a compilation unit.
    ///
    /// Top-level `let`s of separate scripts share one global scope, so every
    /// script's names are reserved before any temporary is handed out.
    pub fn run_all(mut self, scripts: &[NodeIndex]) -> Result<LoweringReport, LoweringError> {
        let _span = info_span!(
            "lower_optional_chains",
            scripts = scripts.len(),
            target = %self.options.target
        )
        .entered();

        if !self.options.needs_lowering(LanguageFeature::OptionalChaining) {
            debug!("target supports optional chaining natively");
            return Ok(LoweringReport::default());
        }

        for &script in scripts {
            self.names.reserve_names_in(self.arena, script);
        }

        let mut report = LoweringReport::default();
        for &script in scripts {
            report.chains_rewritten += self.lower_script(script)?;
        }
        report.changed_scopes = self.changes.take_changed_scopes();
        debug!(
            chains = report.chains_rewritten,
            scopes = report.changed_scopes.len(),
            "optional chains lowered"
        );
        Ok(report)
    }

    fn lower_script(&mut self, script: NodeIndex) -> Result<usize, LoweringError> {
        let chain_ends: Vec<NodeIndex> = self
            .arena
            .descendants_preorder(script)
            .into_iter()
            .filter(|&node| self.arena.is_end_of_full_opt_chain(node))
            .collect();

        for &end in &chain_ends {
            let ctx = RewriteContext::new(self.arena, self.names, &mut self.changes);
            rewrite_optional_chain(ctx, end)?;
        }
        trace!(%script, chains = chain_ends.len(), "script lowered");
        Ok(chain_ends.len())
    }
}

#[cfg(test)]
#[path = "../tests/lowering_pass_tests.rs"]
mod tests;
