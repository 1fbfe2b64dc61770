//! Output language levels and the language features they introduce.
//!
//! A compilation unit records which features it uses in a [`FeatureSet`]; a
//! [`ScriptTarget`] answers whether a feature is available natively or must be
//! lowered before emission.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// ECMAScript language level of the emitted output.
///
/// Variants are ordered, so `target >= ScriptTarget::ES2020` reads as
/// "at least ES2020".
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
#[repr(u8)]
pub enum ScriptTarget {
    ES3 = 0,
    #[default]
    ES5 = 1,
    ES2015 = 2,
    ES2016 = 3,
    ES2017 = 4,
    ES2018 = 5,
    ES2019 = 6,
    ES2020 = 7,
    ES2021 = 8,
    ES2022 = 9,
    ESNext = 99,
}

impl ScriptTarget {
    pub const fn as_str(self) -> &'static str {
        match self {
            ScriptTarget::ES3 => "es3",
            ScriptTarget::ES5 => "es5",
            ScriptTarget::ES2015 => "es2015",
            ScriptTarget::ES2016 => "es2016",
            ScriptTarget::ES2017 => "es2017",
            ScriptTarget::ES2018 => "es2018",
            ScriptTarget::ES2019 => "es2019",
            ScriptTarget::ES2020 => "es2020",
            ScriptTarget::ES2021 => "es2021",
            ScriptTarget::ES2022 => "es2022",
            ScriptTarget::ESNext => "esnext",
        }
    }

    /// Whether `feature` can be emitted as-is for this target.
    #[inline]
    pub fn supports(self, feature: LanguageFeature) -> bool {
        self >= feature.introduced_in()
    }

    /// Every feature this target supports natively.
    pub fn supported_features(self) -> FeatureSet {
        LanguageFeature::ALL
            .iter()
            .filter(|feature| self.supports(**feature))
            .fold(FeatureSet::empty(), |set, feature| set | feature.flag())
    }
}

impl fmt::Display for ScriptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a target name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownScriptTarget(pub String);

impl fmt::Display for UnknownScriptTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown script target '{}'", self.0)
    }
}

impl std::error::Error for UnknownScriptTarget {}

impl FromStr for ScriptTarget {
    type Err = UnknownScriptTarget;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let target = match s.to_ascii_lowercase().as_str() {
            "es3" => ScriptTarget::ES3,
            "es5" => ScriptTarget::ES5,
            "es6" | "es2015" => ScriptTarget::ES2015,
            "es2016" => ScriptTarget::ES2016,
            "es2017" => ScriptTarget::ES2017,
            "es2018" => ScriptTarget::ES2018,
            "es2019" => ScriptTarget::ES2019,
            "es2020" => ScriptTarget::ES2020,
            "es2021" => ScriptTarget::ES2021,
            "es2022" => ScriptTarget::ES2022,
            "esnext" => ScriptTarget::ESNext,
            _ => return Err(UnknownScriptTarget(s.to_string())),
        };
        Ok(target)
    }
}

impl TryFrom<String> for ScriptTarget {
    type Error = UnknownScriptTarget;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScriptTarget> for String {
    fn from(target: ScriptTarget) -> Self {
        target.as_str().to_string()
    }
}

/// A language feature whose use is tracked per compilation unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LanguageFeature {
    LetDeclarations,
    ConstDeclarations,
    ArrowFunctions,
    Classes,
    ExponentOperator,
    AsyncFunctions,
    ObjectRestSpread,
    OptionalCatchBinding,
    OptionalChaining,
    NullishCoalescing,
    LogicalAssignment,
}

impl LanguageFeature {
    pub const ALL: [LanguageFeature; 11] = [
        LanguageFeature::LetDeclarations,
        LanguageFeature::ConstDeclarations,
        LanguageFeature::ArrowFunctions,
        LanguageFeature::Classes,
        LanguageFeature::ExponentOperator,
        LanguageFeature::AsyncFunctions,
        LanguageFeature::ObjectRestSpread,
        LanguageFeature::OptionalCatchBinding,
        LanguageFeature::OptionalChaining,
        LanguageFeature::NullishCoalescing,
        LanguageFeature::LogicalAssignment,
    ];

    /// The first language level that includes this feature.
    pub const fn introduced_in(self) -> ScriptTarget {
        match self {
            LanguageFeature::LetDeclarations
            | LanguageFeature::ConstDeclarations
            | LanguageFeature::ArrowFunctions
            | LanguageFeature::Classes => ScriptTarget::ES2015,
            LanguageFeature::ExponentOperator => ScriptTarget::ES2016,
            LanguageFeature::AsyncFunctions => ScriptTarget::ES2017,
            LanguageFeature::ObjectRestSpread => ScriptTarget::ES2018,
            LanguageFeature::OptionalCatchBinding => ScriptTarget::ES2019,
            LanguageFeature::OptionalChaining | LanguageFeature::NullishCoalescing => {
                ScriptTarget::ES2020
            }
            LanguageFeature::LogicalAssignment => ScriptTarget::ES2021,
        }
    }

    pub const fn flag(self) -> FeatureSet {
        match self {
            LanguageFeature::LetDeclarations => FeatureSet::LET_DECLARATIONS,
            LanguageFeature::ConstDeclarations => FeatureSet::CONST_DECLARATIONS,
            LanguageFeature::ArrowFunctions => FeatureSet::ARROW_FUNCTIONS,
            LanguageFeature::Classes => FeatureSet::CLASSES,
            LanguageFeature::ExponentOperator => FeatureSet::EXPONENT_OPERATOR,
            LanguageFeature::AsyncFunctions => FeatureSet::ASYNC_FUNCTIONS,
            LanguageFeature::ObjectRestSpread => FeatureSet::OBJECT_REST_SPREAD,
            LanguageFeature::OptionalCatchBinding => FeatureSet::OPTIONAL_CATCH_BINDING,
            LanguageFeature::OptionalChaining => FeatureSet::OPTIONAL_CHAINING,
            LanguageFeature::NullishCoalescing => FeatureSet::NULLISH_COALESCING,
            LanguageFeature::LogicalAssignment => FeatureSet::LOGICAL_ASSIGNMENT,
        }
    }
}

bitflags! {
    /// Set of [`LanguageFeature`]s used by a compilation unit.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FeatureSet: u32 {
        const LET_DECLARATIONS = 1 << 0;
        const CONST_DECLARATIONS = 1 << 1;
        const ARROW_FUNCTIONS = 1 << 2;
        const CLASSES = 1 << 3;
        const EXPONENT_OPERATOR = 1 << 4;
        const ASYNC_FUNCTIONS = 1 << 5;
        const OBJECT_REST_SPREAD = 1 << 6;
        const OPTIONAL_CATCH_BINDING = 1 << 7;
        const OPTIONAL_CHAINING = 1 << 8;
        const NULLISH_COALESCING = 1 << 9;
        const LOGICAL_ASSIGNMENT = 1 << 10;
    }
}

impl FeatureSet {
    #[inline]
    pub fn has(self, feature: LanguageFeature) -> bool {
        self.contains(feature.flag())
    }

    #[inline]
    pub fn with(self, feature: LanguageFeature) -> FeatureSet {
        self | feature.flag()
    }

    /// Features in this set that `target` cannot emit natively.
    pub fn unsupported_by(self, target: ScriptTarget) -> FeatureSet {
        self.difference(target.supported_features())
    }
}

impl From<LanguageFeature> for FeatureSet {
    fn from(feature: LanguageFeature) -> Self {
        feature.flag()
    }
}

#[cfg(test)]
#[path = "../tests/common_tests.rs"]
mod tests;
