#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Suggestion,
    Message,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

/// Codes for internal invariant violations raised by lowering passes.
///
/// These are compiler defects rather than user errors, so they live in a
/// range of their own.
pub mod diagnostic_codes {
    pub const OPTIONAL_CHAIN_ALREADY_REWRITTEN: u32 = 9100;
    pub const OPTIONAL_CHAIN_NOT_END_OF_FULL_CHAIN: u32 = 9101;
    pub const OPTIONAL_CHAIN_MISSING_PARENT: u32 = 9102;
    pub const OPTIONAL_CHAIN_MISSING_ENCLOSING_STATEMENT: u32 = 9103;
    pub const OPTIONAL_CHAIN_MISSING_ENCLOSING_SCRIPT: u32 = 9104;
    pub const OPTIONAL_CHAIN_RECEIVER_STILL_OPTIONAL: u32 = 9105;
    pub const OPTIONAL_CHAIN_INCONSISTENT_SEGMENT: u32 = 9106;
}

pub mod diagnostic_messages {
    use super::{DiagnosticCategory, DiagnosticMessage, diagnostic_codes};

    pub const OPTIONAL_CHAIN_ALREADY_REWRITTEN: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::OPTIONAL_CHAIN_ALREADY_REWRITTEN,
        category: DiagnosticCategory::Error,
        message: "Optional chain ending at {0} node was already rewritten.",
    };
    pub const OPTIONAL_CHAIN_NOT_END_OF_FULL_CHAIN: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::OPTIONAL_CHAIN_NOT_END_OF_FULL_CHAIN,
        category: DiagnosticCategory::Error,
        message: "{0} node is not the end of a complete optional chain.",
    };
    pub const OPTIONAL_CHAIN_MISSING_PARENT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::OPTIONAL_CHAIN_MISSING_PARENT,
        category: DiagnosticCategory::Error,
        message: "Optional chain ending at {0} node is not attached to a tree.",
    };
    pub const OPTIONAL_CHAIN_MISSING_ENCLOSING_STATEMENT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::OPTIONAL_CHAIN_MISSING_ENCLOSING_STATEMENT,
        category: DiagnosticCategory::Error,
        message: "Optional chain ending at {0} node has no enclosing statement.",
    };
    pub const OPTIONAL_CHAIN_MISSING_ENCLOSING_SCRIPT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::OPTIONAL_CHAIN_MISSING_ENCLOSING_SCRIPT,
        category: DiagnosticCategory::Error,
        message: "Optional chain ending at {0} node is not inside a script.",
    };
    pub const OPTIONAL_CHAIN_RECEIVER_STILL_OPTIONAL: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::OPTIONAL_CHAIN_RECEIVER_STILL_OPTIONAL,
        category: DiagnosticCategory::Error,
        message: "Receiver {0} of an optional chain segment is itself an unrewritten optional chain.",
    };
    pub const OPTIONAL_CHAIN_INCONSISTENT_SEGMENT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::OPTIONAL_CHAIN_INCONSISTENT_SEGMENT,
        category: DiagnosticCategory::Error,
        message: "Optional chain segment reaches {0} node before finding its start.",
    };

    pub const ALL: &[DiagnosticMessage] = &[
        OPTIONAL_CHAIN_ALREADY_REWRITTEN,
        OPTIONAL_CHAIN_NOT_END_OF_FULL_CHAIN,
        OPTIONAL_CHAIN_MISSING_PARENT,
        OPTIONAL_CHAIN_MISSING_ENCLOSING_STATEMENT,
        OPTIONAL_CHAIN_MISSING_ENCLOSING_SCRIPT,
        OPTIONAL_CHAIN_RECEIVER_STILL_OPTIONAL,
        OPTIONAL_CHAIN_INCONSISTENT_SEGMENT,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticRelatedInformation {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    pub code: u32,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub related_information: Vec<DiagnosticRelatedInformation>,
}

impl Diagnostic {
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Error,
            message_text: message.into(),
            code,
            file: file.into(),
            start,
            length,
            related_information: Vec::new(),
        }
    }

    pub fn with_related(
        mut self,
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        self.related_information.push(DiagnosticRelatedInformation {
            category: DiagnosticCategory::Message,
            code: 0,
            file: file.into(),
            start,
            length,
            message_text: message.into(),
        });
        self
    }
}

pub fn get_message_template(code: u32) -> Option<&'static str> {
    diagnostic_messages::ALL
        .iter()
        .find(|m| m.code == code)
        .map(|m| m.message)
}

pub fn format_message(message: &str, args: &[&str]) -> String {
    let mut result = message.to_string();
    for (i, arg) in args.iter().enumerate() {
        result = result.replace(&format!("{{{i}}}"), arg);
    }
    result
}

#[cfg(test)]
#[path = "../tests/diagnostics_tests.rs"]
mod tests;
