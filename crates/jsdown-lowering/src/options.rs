//! Lowering configuration.

use anyhow::{Context, Result};
use jsdown_common::{LanguageFeature, ScriptTarget};
use serde::{Deserialize, Serialize};

/// Options shared by the lowering passes.
///
/// ```json
/// { "target": "es2019" }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoweringOptions {
    /// Language level of the emitted code
    pub target: ScriptTarget,
}

impl LoweringOptions {
    pub fn new(target: ScriptTarget) -> LoweringOptions {
        LoweringOptions { target }
    }

    pub fn from_json_str(json: &str) -> Result<LoweringOptions> {
        serde_json::from_str(json).context("failed to parse lowering options")
    }

    /// True when `feature` must be rewritten for the configured target.
    pub fn needs_lowering(&self, feature: LanguageFeature) -> bool {
        !self.target.supports(feature)
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
