//! Common types and utilities for the jsdown compiler.
//!
//! This crate provides foundational types used across all jsdown crates:
//! - Output language levels and feature tracking (`ScriptTarget`, `LanguageFeature`, `FeatureSet`)
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Centralized limits and thresholds

// Script targets and language features
pub mod common;
pub use common::{FeatureSet, LanguageFeature, ScriptTarget, UnknownScriptTarget};

// Diagnostics shared by every pass
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticMessage, DiagnosticRelatedInformation,
    diagnostic_codes, diagnostic_messages, format_message, get_message_template,
};

// Centralized limits and thresholds
pub mod limits;
