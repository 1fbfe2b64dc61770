//! Optional chain lowering.
//!
//! Rewrites a complete optional chain into guarded conditional expressions
//! that only use pre-ES2020 constructs. Each `?.` segment becomes
//!
//! ```text
//! (tmp = receiver) == null ? void 0 : <rest of the chain using tmp>
//! ```
//!
//! with `let tmp;` hoisted immediately before the enclosing statement. Calls
//! through an optional member keep their `this` binding by capturing both the
//! object and the function and calling through `Function.prototype.call`:
//!
//! ```text
//! a.b?.()   =>   (_b = (_a = a).b) == null ? void 0 : _b.call(_a)
//! ```
//!
//! A chain with several segments is rewritten root-most segment first. Each
//! later guard takes the place of the remaining chain inside the previous
//! guard's else branch:
//!
//! ```text
//! a?.b.c?.d   =>   (_a = a) == null ? void 0 : (_b = _a.b.c) == null ? void 0 : _b.d
//! ```

use crate::change_tracker::ChangeTracker;
use crate::error::{LoweringError, NodeSite};
use crate::tmp_names::TmpVarNameCreator;
use jsdown_ast::{NodeArena, NodeIndex};
use jsdown_common::LanguageFeature;
use tracing::{debug, trace};

/// Everything one chain rewrite borrows from the surrounding pass.
pub struct RewriteContext<'a> {
    pub arena: &'a mut NodeArena,
    pub names: &'a mut dyn TmpVarNameCreator,
    pub changes: &'a mut ChangeTracker,
}

impl<'a> RewriteContext<'a> {
    pub fn new(
        arena: &'a mut NodeArena,
        names: &'a mut dyn TmpVarNameCreator,
        changes: &'a mut ChangeTracker,
    ) -> RewriteContext<'a> {
        RewriteContext {
            arena,
            names,
            changes,
        }
    }
}

/// Segment starts of the chain ending at `whole_chain`, root-most first.
///
/// ```text
/// a?.b.c?.d(x)   =>   [?.b, ?.d]
/// ```
pub fn collect_segment_starts(
    arena: &NodeArena,
    whole_chain: NodeIndex,
) -> Result<Vec<NodeIndex>, LoweringError> {
    check_is_end_of_full_chain(arena, whole_chain)?;
    segment_starts(arena, whole_chain)
}

/// [`collect_segment_starts`] for a chain end that was already validated.
fn segment_starts(arena: &NodeArena, whole_chain: NodeIndex) -> Result<Vec<NodeIndex>, LoweringError> {
    let mut starts = Vec::new();
    let mut current = whole_chain;
    while arena.is_opt_chain_node(current) {
        let start = arena
            .get_start_of_opt_chain_segment(current)
            .ok_or_else(|| inconsistent_segment(arena, current))?;
        starts.push(start);
        current = arena.first_child(start);
    }
    starts.reverse();
    Ok(starts)
}

fn check_is_end_of_full_chain(arena: &NodeArena, node: NodeIndex) -> Result<(), LoweringError> {
    if !arena.is_opt_chain_node(node) {
        let site = NodeSite::of(arena, node);
        // Lowered chain nodes keep their plain access or call kind.
        return if arena.is_normal_get(node) || arena.is_call(node) {
            Err(LoweringError::AlreadyRewritten(site))
        } else {
            Err(LoweringError::NotEndOfFullChain(site))
        };
    }
    if !arena.is_end_of_full_opt_chain(node) {
        return Err(LoweringError::NotEndOfFullChain(NodeSite::of(arena, node)));
    }
    Ok(())
}

/// Report the first node below `from` (inclusive) where a first-child walk
/// leaves the chain without meeting a segment start.
fn inconsistent_segment(arena: &NodeArena, from: NodeIndex) -> LoweringError {
    let mut current = from;
    while arena.is_opt_chain_node(current) {
        current = arena.first_child(current);
    }
    LoweringError::InconsistentSegment(NodeSite::of(arena, current))
}

/// Rewrites one complete optional chain.
pub struct OptionalChainRewriter<'a> {
    arena: &'a mut NodeArena,
    names: &'a mut dyn TmpVarNameCreator,
    changes: &'a mut ChangeTracker,
    /// Terminal node of the chain; each guard pushes it one level deeper
    whole_chain: NodeIndex,
    /// Parent of the chain before any rewriting
    chain_parent: NodeIndex,
    /// Temporaries are declared immediately before this statement
    enclosing_statement: NodeIndex,
    enclosing_script: NodeIndex,
}

impl<'a> OptionalChainRewriter<'a> {
    /// Validate that `whole_chain` ends a complete, attached optional chain.
    ///
    /// Nothing is modified when this fails.
    pub fn new(
        ctx: RewriteContext<'a>,
        whole_chain: NodeIndex,
    ) -> Result<OptionalChainRewriter<'a>, LoweringError> {
        let RewriteContext {
            arena,
            names,
            changes,
        } = ctx;

        check_is_end_of_full_chain(arena, whole_chain)?;
        let site = || NodeSite::of(arena, whole_chain);
        let chain_parent = arena.parent(whole_chain);
        if chain_parent.is_none() {
            return Err(LoweringError::MissingParent(site()));
        }
        let enclosing_statement = arena
            .get_enclosing_statement(whole_chain)
            .ok_or_else(|| LoweringError::MissingEnclosingStatement(site()))?;
        let enclosing_script = arena
            .get_enclosing_script(enclosing_statement)
            .ok_or_else(|| LoweringError::MissingEnclosingScript(site()))?;

        Ok(OptionalChainRewriter {
            arena,
            names,
            changes,
            whole_chain,
            chain_parent,
            enclosing_statement,
            enclosing_script,
        })
    }

    /// Rewrite the chain and return the guard expression that replaced it.
    ///
    /// When the chain was the callee of a plain call and ended in a property
    /// access, the guard ends up as the receiver of a synthesized `.call`.
    #[tracing::instrument(level = "debug", skip(self), fields(chain = %self.whole_chain))]
    pub fn rewrite(mut self) -> Result<NodeIndex, LoweringError> {
        let starts = segment_starts(self.arena, self.whole_chain)?;
        let Some((&first, rest)) = starts.split_first() else {
            return Err(inconsistent_segment(self.arena, self.whole_chain));
        };
        debug!(segments = starts.len(), "rewriting optional chain");

        let replacement = self.rewrite_initial_segment(first)?;
        for &start in rest {
            self.rewrite_initial_segment(start)?;
        }

        self.fix_up_called_chain(replacement);

        self.arena
            .add_feature_to_script(self.enclosing_script, LanguageFeature::LetDeclarations);
        self.changes
            .report_change_to_enclosing_scope(self.arena, self.chain_parent);
        Ok(replacement)
    }

    /// Rewrite the segment beginning at `segment_start` and wrap the whole
    /// chain in its guard.
    ///
    /// Segments must be processed root-most first: the receiver of
    /// `segment_start` has to be plain by the time it is reached.
    #[tracing::instrument(level = "trace", skip(self))]
    fn rewrite_initial_segment(
        &mut self,
        segment_start: NodeIndex,
    ) -> Result<NodeIndex, LoweringError> {
        let full_chain_end = self.whole_chain;
        let mut receiver = self.arena.first_child(segment_start);
        if self.arena.is_opt_chain_node(receiver) {
            return Err(LoweringError::ReceiverStillOptional(NodeSite::of(
                self.arena, receiver,
            )));
        }
        let segment_end = self
            .arena
            .get_end_of_opt_chain_segment(segment_start)
            .ok_or_else(|| inconsistent_segment(self.arena, segment_start))?;
        self.convert_to_non_optional_chain_segment(segment_end)?;

        // Pull the chain out of the tree while the guard is built around it.
        let placeholder = self.arena.create_empty();
        self.arena.replace_with(full_chain_end, placeholder);

        if self.arena.is_normal_get(receiver) && self.arena.is_call(segment_start) {
            // `a.b?.()` => `_b.call(_a)` with `_b = (_a = a).b`
            let this_value = self.arena.first_child(receiver);
            let tmp_this = self.sub_expr_name_node(this_value);
            let tmp_receiver = self.sub_expr_name_node(receiver);
            let callee = self.arena.first_child(segment_start);
            receiver = self.arena.detach(callee);
            self.arena.add_child_to_front(segment_start, tmp_this);
            let dot_call = self.arena.create_get_prop(tmp_receiver, "call", receiver);
            self.arena.add_child_to_front(segment_start, dot_call);
        } else {
            let tmp_receiver = self.sub_expr_name_node(receiver);
            receiver = self.arena.first_child(segment_start);
            self.arena.replace_with(receiver, tmp_receiver);
        }

        let null = self.arena.create_null(full_chain_end);
        let is_nullish = self.arena.create_eq(receiver, null, full_chain_end);
        let undefined = self.arena.create_undefined_value(full_chain_end);
        let guard = self
            .arena
            .create_hook(is_nullish, undefined, full_chain_end, full_chain_end);
        self.arena.replace_with(placeholder, guard);
        trace!(%guard, "segment rewritten");
        Ok(guard)
    }

    /// Turn every node from `segment_end` down to its segment start into the
    /// plain kind and clear the start flag.
    fn convert_to_non_optional_chain_segment(
        &mut self,
        segment_end: NodeIndex,
    ) -> Result<(), LoweringError> {
        let mut segment = Vec::new();
        let mut current = segment_end;
        loop {
            let Some(kind) = self.arena.kind(current).and_then(|k| k.to_non_opt_chain()) else {
                return Err(LoweringError::InconsistentSegment(NodeSite::of(
                    self.arena, current,
                )));
            };
            segment.push((current, kind));
            if self.arena.is_optional_chain_start(current) {
                break;
            }
            current = self.arena.first_child(current);
        }

        for (node, kind) in segment {
            self.arena.set_is_optional_chain_start(node, false);
            self.arena.set_kind(node, kind);
        }
        Ok(())
    }

    /// `(a?.b.c)(x)` must still call `c` with `this` bound to `a.b`.
    ///
    /// ```text
    /// (_a == null ? void 0 : _a.b.c)(x)
    ///     => (_a == null ? void 0 : (_b = _a.b).c).call(_b, x)
    /// ```
    fn fix_up_called_chain(&mut self, replacement: NodeIndex) {
        let parent = self.chain_parent;
        if !(self.arena.is_call(parent)
            && self.arena.is_first_child_of(replacement, parent)
            && self.arena.is_normal_get(self.whole_chain))
        {
            return;
        }
        trace!(call = %parent, "preserving this for call of optional chain result");
        let this_value = self.arena.first_child(self.whole_chain);
        let tmp_this = self.sub_expr_name_node(this_value);
        self.arena.detach(replacement);
        self.arena.add_child_to_front(parent, tmp_this);
        let dot_call = self.arena.create_get_prop(replacement, "call", replacement);
        self.arena.add_child_to_front(parent, dot_call);
    }

    /// Replace `sub_expr` with `(tmp = sub_expr)` and return a detached `tmp`.
    ///
    /// `let tmp;` is inserted immediately before the enclosing statement.
    fn sub_expr_name_node(&mut self, sub_expr: NodeIndex) -> NodeIndex {
        let name = self.declare_temp_var_name(sub_expr);
        let placeholder = self.arena.create_empty();
        self.arena.replace_with(sub_expr, placeholder);
        let assign = self.arena.create_assign(&name, sub_expr, sub_expr);
        self.arena.replace_with(placeholder, assign);
        let target = self.arena.first_child(assign);
        self.arena.clone_node(target)
    }

    fn declare_temp_var_name(&mut self, value: NodeIndex) -> String {
        let name = self.names.create_tmp_var_name();
        let declaration = self
            .arena
            .create_single_let_name_declaration(&name, value);
        self.arena
            .add_child_before(declaration, self.enclosing_statement);
        trace!(%name, statement = %self.enclosing_statement, "declared temporary");
        name
    }
}

/// Lower the optional chain ending at `whole_chain`.
///
/// Returns the guard expression that replaced the chain.
pub fn rewrite_optional_chain(
    ctx: RewriteContext<'_>,
    whole_chain: NodeIndex,
) -> Result<NodeIndex, LoweringError> {
    OptionalChainRewriter::new(ctx, whole_chain)?.rewrite()
}

#[cfg(test)]
#[path = "../tests/optional_chain_tests.rs"]
mod tests;
