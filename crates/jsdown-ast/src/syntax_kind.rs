//! Node kinds.
//!
//! Optional-chain links have kinds of their own (`OptChainGetProp`,
//! `OptChainGetElem`, `OptChainCall`). Whether a link *starts* a segment,
//! i.e. was written with `?.`, is recorded separately in
//! [`NodeFlags::OPTIONAL_CHAIN_START`](crate::NodeFlags::OPTIONAL_CHAIN_START):
//! in `a?.b.c` both links are chain kinds, only `?.b` is a segment start.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum SyntaxKind {
    // Statements and containers
    Script,
    Block,
    Function,
    ParamList,
    ExprResult,
    Var,
    Let,
    Const,
    Return,
    If,
    Empty,

    // Leaves
    Name,
    StringLit,
    NumberLit,
    Null,
    True,
    False,
    This,

    // Operators
    Void,
    Not,
    Eq,
    Ne,
    Sheq,
    Shne,
    And,
    Or,
    Comma,
    Assign,
    Hook,
    ObjectLit,
    StringKey,

    // Access and calls
    GetProp,
    GetElem,
    Call,
    OptChainGetProp,
    OptChainGetElem,
    OptChainCall,
}

impl SyntaxKind {
    /// `?.`-family kinds.
    #[inline]
    pub const fn is_opt_chain(self) -> bool {
        matches!(
            self,
            SyntaxKind::OptChainGetProp | SyntaxKind::OptChainGetElem | SyntaxKind::OptChainCall
        )
    }

    /// Plain (non-optional) property or element access.
    #[inline]
    pub const fn is_normal_get(self) -> bool {
        matches!(self, SyntaxKind::GetProp | SyntaxKind::GetElem)
    }

    /// The plain kind an optional-chain kind lowers to.
    pub const fn to_non_opt_chain(self) -> Option<SyntaxKind> {
        match self {
            SyntaxKind::OptChainGetProp => Some(SyntaxKind::GetProp),
            SyntaxKind::OptChainGetElem => Some(SyntaxKind::GetElem),
            SyntaxKind::OptChainCall => Some(SyntaxKind::Call),
            _ => None,
        }
    }

    /// The optional-chain kind a plain access or call continues a chain as.
    pub const fn to_opt_chain(self) -> Option<SyntaxKind> {
        match self {
            SyntaxKind::GetProp => Some(SyntaxKind::OptChainGetProp),
            SyntaxKind::GetElem => Some(SyntaxKind::OptChainGetElem),
            SyntaxKind::Call => Some(SyntaxKind::OptChainCall),
            _ => None,
        }
    }

    /// Kinds whose children are statements.
    #[inline]
    pub const fn is_statement_parent(self) -> bool {
        matches!(self, SyntaxKind::Script | SyntaxKind::Block)
    }

    /// Kinds that root a unit of change reporting.
    #[inline]
    pub const fn is_change_scope_root(self) -> bool {
        matches!(self, SyntaxKind::Script | SyntaxKind::Function)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SyntaxKind::Script => "Script",
            SyntaxKind::Block => "Block",
            SyntaxKind::Function => "Function",
            SyntaxKind::ParamList => "ParamList",
            SyntaxKind::ExprResult => "ExprResult",
            SyntaxKind::Var => "Var",
            SyntaxKind::Let => "Let",
            SyntaxKind::Const => "Const",
            SyntaxKind::Return => "Return",
            SyntaxKind::If => "If",
            SyntaxKind::Empty => "Empty",
            SyntaxKind::Name => "Name",
            SyntaxKind::StringLit => "StringLit",
            SyntaxKind::NumberLit => "NumberLit",
            SyntaxKind::Null => "Null",
            SyntaxKind::True => "True",
            SyntaxKind::False => "False",
            SyntaxKind::This => "This",
            SyntaxKind::Void => "Void",
            SyntaxKind::Not => "Not",
            SyntaxKind::Eq => "Eq",
            SyntaxKind::Ne => "Ne",
            SyntaxKind::Sheq => "Sheq",
            SyntaxKind::Shne => "Shne",
            SyntaxKind::And => "And",
            SyntaxKind::Or => "Or",
            SyntaxKind::Comma => "Comma",
            SyntaxKind::Assign => "Assign",
            SyntaxKind::Hook => "Hook",
            SyntaxKind::ObjectLit => "ObjectLit",
            SyntaxKind::StringKey => "StringKey",
            SyntaxKind::GetProp => "GetProp",
            SyntaxKind::GetElem => "GetElem",
            SyntaxKind::Call => "Call",
            SyntaxKind::OptChainGetProp => "OptChainGetProp",
            SyntaxKind::OptChainGetElem => "OptChainGetElem",
            SyntaxKind::OptChainCall => "OptChainCall",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
