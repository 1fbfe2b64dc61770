//! Lowering passes for the jsdown compiler.
//!
//! Rewrites syntax the output target does not support into equivalent older
//! constructs, editing the [`jsdown_ast::NodeArena`] in place:
//!
//! - [`optional_chain`]: `a?.b` and friends into guarded conditionals with
//!   hoisted `let` temporaries
//! - [`lowering_pass`]: walks a script and lowers every chain when
//!   [`LoweringOptions::target`] lacks optional chaining
//! - [`tmp_names`], [`change_tracker`]: the naming and change-reporting
//!   services a rewrite draws on

pub mod change_tracker;
pub use change_tracker::ChangeTracker;

pub mod error;
pub use error::{LoweringError, NodeSite};

pub mod lowering_pass;
pub use lowering_pass::{LoweringReport, OptionalChainLoweringPass};

pub mod optional_chain;
pub use optional_chain::{
    OptionalChainRewriter, RewriteContext, collect_segment_starts, rewrite_optional_chain,
};

pub mod options;
pub use options::LoweringOptions;

pub mod tmp_names;
pub use tmp_names::{TmpVarNameCreator, UniqueNameGenerator};

pub mod tracing_config;
