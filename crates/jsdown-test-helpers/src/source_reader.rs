//! Reads the JavaScript subset used by lowering tests into a [`NodeArena`].
//!
//! Supported: `let`/`var`/`const`, function declarations and expressions,
//! `return`, `if`/`else`, blocks, expression statements, object literals,
//! assignment, `?:`, `||`, `&&`, `==`/`!=`/`===`/`!==`, `!`, `void`, `,`,
//! property/element access, calls, and the three `?.` forms.
//!
//! A `?.` link sets [`NodeFlags::OPTIONAL_CHAIN_START`]; every later link of
//! the same postfix sequence gets an optional-chain kind without the flag.
//! Parentheses end a chain: `(a?.b).c` reads as a plain access of a chain.

use jsdown_ast::{Node, NodeArena, NodeFlags, NodeIndex, SyntaxKind};
use jsdown_common::limits::MAX_PARSE_DEPTH;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
    #[error("unexpected character {ch:?} at {pos}")]
    UnexpectedChar { ch: char, pos: u32 },

    #[error("unterminated string literal starting at {pos}")]
    UnterminatedString { pos: u32 },

    #[error("expected {expected}, found {found} at {pos}")]
    Unexpected {
        expected: &'static str,
        found: String,
        pos: u32,
    },

    #[error("invalid assignment target at {pos}")]
    InvalidAssignmentTarget { pos: u32 },

    #[error("expression nested too deeply at {pos}")]
    TooDeep { pos: u32 },
}

// ============================================================================
// Lexer
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Tok {
    Ident(String),
    Number(String),
    Str(String),
    Punct(&'static str),
    Eof,
}

impl Tok {
    fn describe(&self) -> String {
        match self {
            Tok::Ident(name) => format!("identifier `{name}`"),
            Tok::Number(text) => format!("number `{text}`"),
            Tok::Str(text) => format!("string {text:?}"),
            Tok::Punct(p) => format!("`{p}`"),
            Tok::Eof => "end of input".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
struct Token {
    tok: Tok,
    pos: u32,
    end: u32,
}

/// Longest first.
const PUNCTUATORS: &[&str] = &[
    "===", "!==", "==", "!=", "&&", "||", "?.", "(", ")", "{", "}", "[", "]", ",", ";", ":",
    ".", "?", "=", "!",
];

fn tokenize(source: &str) -> Result<Vec<Token>, ReadError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if source[i..].starts_with("//") {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }
        let start = i;
        let tok = if c.is_ascii_alphabetic() || c == b'_' || c == b'$' {
            while i < bytes.len()
                && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'$')
            {
                i += 1;
            }
            Tok::Ident(source[start..i].to_string())
        } else if c.is_ascii_digit()
            || (c == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit))
        {
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            Tok::Number(source[start..i].to_string())
        } else if c == b'"' || c == b'\'' {
            i += 1;
            let mut text = String::new();
            loop {
                let Some(&b) = bytes.get(i) else {
                    return Err(ReadError::UnterminatedString { pos: start as u32 });
                };
                i += 1;
                match b {
                    b'\\' => {
                        let Some(&escaped) = bytes.get(i) else {
                            return Err(ReadError::UnterminatedString { pos: start as u32 });
                        };
                        i += 1;
                        text.push(match escaped {
                            b'n' => '\n',
                            b't' => '\t',
                            other => other as char,
                        });
                    }
                    _ if b == c => break,
                    _ => {
                        // Copy whole UTF-8 sequences.
                        let ch_start = i - 1;
                        let ch = source[ch_start..].chars().next().unwrap_or('\u{fffd}');
                        i = ch_start + ch.len_utf8();
                        text.push(ch);
                    }
                }
            }
            Tok::Str(text)
        } else if let Some(p) = PUNCTUATORS.iter().find(|p| source[i..].starts_with(**p)) {
            // `a?.5:b` is a conditional, not an optional chain.
            if *p == "?." && bytes.get(i + 2).is_some_and(u8::is_ascii_digit) {
                i += 1;
                Tok::Punct("?")
            } else {
                i += p.len();
                Tok::Punct(*p)
            }
        } else {
            let ch = source[i..].chars().next().unwrap_or('\u{fffd}');
            return Err(ReadError::UnexpectedChar {
                ch,
                pos: i as u32,
            });
        };
        tokens.push(Token {
            tok,
            pos: start as u32,
            end: i as u32,
        });
    }
    tokens.push(Token {
        tok: Tok::Eof,
        pos: source.len() as u32,
        end: source.len() as u32,
    });
    Ok(tokens)
}

// ============================================================================
// Parser
// ============================================================================

const KEYWORDS: &[&str] = &[
    "let", "var", "const", "function", "return", "if", "else", "null", "true", "false", "this",
    "void",
];

struct Reader<'a> {
    arena: &'a mut NodeArena,
    tokens: Vec<Token>,
    cursor: usize,
    depth: u32,
}

impl<'a> Reader<'a> {
    fn peek(&self) -> &Token {
        // tokenize always ends with Eof and the cursor never passes it
        &self.tokens[self.cursor.min(self.tokens.len() - 1)]
    }

    fn peek_at(&self, offset: usize) -> &Tok {
        let index = (self.cursor + offset).min(self.tokens.len() - 1);
        &self.tokens[index].tok
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.tok != Tok::Eof {
            self.cursor += 1;
        }
        token
    }

    fn is_punct(&self, p: &str) -> bool {
        matches!(&self.peek().tok, Tok::Punct(q) if *q == p)
    }

    fn is_keyword(&self, keyword: &str) -> bool {
        matches!(&self.peek().tok, Tok::Ident(name) if name == keyword)
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.is_punct(p) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &'static str) -> ReadError {
        let token = self.peek();
        ReadError::Unexpected {
            expected,
            found: token.tok.describe(),
            pos: token.pos,
        }
    }

    fn expect_punct(&mut self, p: &'static str) -> Result<Token, ReadError> {
        if self.is_punct(p) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(p))
        }
    }

    /// End offset of the last consumed token.
    fn last_end(&self) -> u32 {
        self.cursor
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(0, |t| t.end)
    }

    fn finish(&mut self, mut node: Node, pos: u32, children: &[NodeIndex]) -> NodeIndex {
        node.pos = pos;
        node.end = self.last_end();
        self.arena.add_node(node, children)
    }

    fn expect_identifier(&mut self) -> Result<(String, Token), ReadError> {
        match &self.peek().tok {
            Tok::Ident(name) if !KEYWORDS.contains(&name.as_str()) => {
                let name = name.clone();
                Ok((name, self.advance()))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Property names may be keywords.
    fn expect_property_name(&mut self) -> Result<String, ReadError> {
        match &self.peek().tok {
            Tok::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("property name")),
        }
    }

    fn name_node(&mut self) -> Result<NodeIndex, ReadError> {
        let (name, token) = self.expect_identifier()?;
        let node = Node::with_text(SyntaxKind::Name, name).with_span(token.pos, token.end);
        Ok(self.arena.add_node(node, &[]))
    }

    fn enter(&mut self) -> Result<(), ReadError> {
        self.depth += 1;
        if self.depth > MAX_PARSE_DEPTH {
            return Err(ReadError::TooDeep {
                pos: self.peek().pos,
            });
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    fn parse_script(&mut self) -> Result<NodeIndex, ReadError> {
        let mut statements = Vec::new();
        while self.peek().tok != Tok::Eof {
            statements.push(self.parse_statement()?);
        }
        Ok(self.finish(Node::new(SyntaxKind::Script), 0, &statements))
    }

    fn parse_statement(&mut self) -> Result<NodeIndex, ReadError> {
        self.enter()?;
        let result = self.parse_statement_inner();
        self.leave();
        result
    }

    fn parse_statement_inner(&mut self) -> Result<NodeIndex, ReadError> {
        let pos = self.peek().pos;
        if self.is_punct("{") {
            return self.parse_block();
        }
        if self.eat_punct(";") {
            return Ok(self.finish(Node::new(SyntaxKind::Empty), pos, &[]));
        }
        for (keyword, kind) in [
            ("let", SyntaxKind::Let),
            ("var", SyntaxKind::Var),
            ("const", SyntaxKind::Const),
        ] {
            if self.is_keyword(keyword) {
                self.advance();
                return self.parse_declaration(kind, pos);
            }
        }
        if self.is_keyword("function") {
            return self.parse_function(true);
        }
        if self.is_keyword("return") {
            self.advance();
            let mut children = Vec::new();
            if !self.is_punct(";") && !self.is_punct("}") && self.peek().tok != Tok::Eof {
                children.push(self.parse_expression()?);
            }
            self.eat_punct(";");
            return Ok(self.finish(Node::new(SyntaxKind::Return), pos, &children));
        }
        if self.is_keyword("if") {
            self.advance();
            self.expect_punct("(")?;
            let cond = self.parse_expression()?;
            self.expect_punct(")")?;
            let mut children = vec![cond, self.parse_branch()?];
            if self.is_keyword("else") {
                self.advance();
                children.push(self.parse_branch()?);
            }
            return Ok(self.finish(Node::new(SyntaxKind::If), pos, &children));
        }

        let expr = self.parse_expression()?;
        self.eat_punct(";");
        Ok(self.finish(Node::new(SyntaxKind::ExprResult), pos, &[expr]))
    }

    /// `if` branches are always blocks; a bare statement gets wrapped.
    fn parse_branch(&mut self) -> Result<NodeIndex, ReadError> {
        if self.is_punct("{") {
            return self.parse_block();
        }
        let pos = self.peek().pos;
        let statement = self.parse_statement()?;
        Ok(self.finish(Node::new(SyntaxKind::Block), pos, &[statement]))
    }

    fn parse_block(&mut self) -> Result<NodeIndex, ReadError> {
        let pos = self.expect_punct("{")?.pos;
        let mut statements = Vec::new();
        while !self.is_punct("}") {
            if self.peek().tok == Tok::Eof {
                return Err(self.unexpected("`}`"));
            }
            statements.push(self.parse_statement()?);
        }
        self.advance();
        Ok(self.finish(Node::new(SyntaxKind::Block), pos, &statements))
    }

    fn parse_declaration(&mut self, kind: SyntaxKind, pos: u32) -> Result<NodeIndex, ReadError> {
        let mut names = Vec::new();
        loop {
            let (name, token) = self.expect_identifier()?;
            let mut initializer = Vec::new();
            if self.eat_punct("=") {
                initializer.push(self.parse_assignment()?);
            }
            let node = Node::with_text(SyntaxKind::Name, name);
            names.push(self.finish(node, token.pos, &initializer));
            if !self.eat_punct(",") {
                break;
            }
        }
        self.eat_punct(";");
        Ok(self.finish(Node::new(kind), pos, &names))
    }

    fn parse_function(&mut self, is_declaration: bool) -> Result<NodeIndex, ReadError> {
        let pos = self.advance().pos;
        let name = if is_declaration || !self.is_punct("(") {
            self.name_node()?
        } else {
            self.arena.add_node(Node::with_text(SyntaxKind::Name, ""), &[])
        };
        let params_pos = self.expect_punct("(")?.pos;
        let mut params = Vec::new();
        while !self.is_punct(")") {
            params.push(self.name_node()?);
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(")")?;
        let param_list = self.finish(Node::new(SyntaxKind::ParamList), params_pos, &params);
        let body = self.parse_block()?;
        Ok(self.finish(Node::new(SyntaxKind::Function), pos, &[name, param_list, body]))
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    fn parse_expression(&mut self) -> Result<NodeIndex, ReadError> {
        let pos = self.peek().pos;
        let mut left = self.parse_assignment()?;
        while self.eat_punct(",") {
            let right = self.parse_assignment()?;
            left = self.finish(Node::new(SyntaxKind::Comma), pos, &[left, right]);
        }
        Ok(left)
    }

    fn parse_assignment(&mut self) -> Result<NodeIndex, ReadError> {
        self.enter()?;
        let result = self.parse_assignment_inner();
        self.leave();
        result
    }

    fn parse_assignment_inner(&mut self) -> Result<NodeIndex, ReadError> {
        let pos = self.peek().pos;
        let target = self.parse_conditional()?;
        if !self.is_punct("=") {
            return Ok(target);
        }
        let valid_target = matches!(
            self.arena.kind(target),
            Some(SyntaxKind::Name | SyntaxKind::GetProp | SyntaxKind::GetElem)
        );
        if !valid_target {
            return Err(ReadError::InvalidAssignmentTarget { pos });
        }
        self.advance();
        let value = self.parse_assignment()?;
        Ok(self.finish(Node::new(SyntaxKind::Assign), pos, &[target, value]))
    }

    fn parse_conditional(&mut self) -> Result<NodeIndex, ReadError> {
        let pos = self.peek().pos;
        let cond = self.parse_binary(0)?;
        if !self.eat_punct("?") {
            return Ok(cond);
        }
        let when_true = self.parse_assignment()?;
        self.expect_punct(":")?;
        let when_false = self.parse_assignment()?;
        Ok(self.finish(Node::new(SyntaxKind::Hook), pos, &[cond, when_true, when_false]))
    }

    /// Left-associative binary levels, loosest first.
    fn parse_binary(&mut self, level: usize) -> Result<NodeIndex, ReadError> {
        const LEVELS: &[&[(&str, SyntaxKind)]] = &[
            &[("||", SyntaxKind::Or)],
            &[("&&", SyntaxKind::And)],
            &[
                ("===", SyntaxKind::Sheq),
                ("!==", SyntaxKind::Shne),
                ("==", SyntaxKind::Eq),
                ("!=", SyntaxKind::Ne),
            ],
        ];
        let Some(operators) = LEVELS.get(level) else {
            return self.parse_unary();
        };
        let pos = self.peek().pos;
        let mut left = self.parse_binary(level + 1)?;
        loop {
            let Some(&(_, kind)) = operators.iter().find(|(p, _)| self.is_punct(p)) else {
                return Ok(left);
            };
            self.advance();
            let right = self.parse_binary(level + 1)?;
            left = self.finish(Node::new(kind), pos, &[left, right]);
        }
    }

    fn parse_unary(&mut self) -> Result<NodeIndex, ReadError> {
        let pos = self.peek().pos;
        let kind = if self.is_punct("!") {
            SyntaxKind::Not
        } else if self.is_keyword("void") {
            SyntaxKind::Void
        } else {
            return self.parse_postfix();
        };
        self.advance();
        self.enter()?;
        let operand = self.parse_unary();
        self.leave();
        let operand = operand?;
        Ok(self.finish(Node::new(kind), pos, &[operand]))
    }

    fn parse_postfix(&mut self) -> Result<NodeIndex, ReadError> {
        let pos = self.peek().pos;
        let mut expr = self.parse_primary()?;
        let mut in_chain = false;
        loop {
            let (kind, text, children, start) = if self.eat_punct("?.") {
                in_chain = true;
                if self.eat_punct("(") {
                    let mut children = vec![expr];
                    children.extend(self.parse_arguments()?);
                    (SyntaxKind::OptChainCall, None, children, true)
                } else if self.eat_punct("[") {
                    let index = self.parse_expression()?;
                    self.expect_punct("]")?;
                    (SyntaxKind::OptChainGetElem, None, vec![expr, index], true)
                } else {
                    let name = self.expect_property_name()?;
                    (SyntaxKind::OptChainGetProp, Some(name), vec![expr], true)
                }
            } else if self.eat_punct(".") {
                let name = self.expect_property_name()?;
                (SyntaxKind::GetProp, Some(name), vec![expr], false)
            } else if self.eat_punct("[") {
                let index = self.parse_expression()?;
                self.expect_punct("]")?;
                (SyntaxKind::GetElem, None, vec![expr, index], false)
            } else if self.eat_punct("(") {
                let mut children = vec![expr];
                children.extend(self.parse_arguments()?);
                (SyntaxKind::Call, None, children, false)
            } else {
                return Ok(expr);
            };

            let kind = if in_chain {
                kind.to_opt_chain().unwrap_or(kind)
            } else {
                kind
            };
            let mut node = Node::new(kind);
            node.text = text.map(Into::into);
            if start {
                node.flags = NodeFlags::OPTIONAL_CHAIN_START;
            }
            expr = self.finish(node, pos, &children);
        }
    }

    /// Arguments after the opening `(`, through the closing `)`.
    fn parse_arguments(&mut self) -> Result<Vec<NodeIndex>, ReadError> {
        let mut args = Vec::new();
        while !self.is_punct(")") {
            args.push(self.parse_assignment()?);
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(")")?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<NodeIndex, ReadError> {
        let token = self.peek().clone();
        let pos = token.pos;
        match &token.tok {
            Tok::Punct("(") => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_punct(")")?;
                Ok(expr)
            }
            Tok::Punct("{") => self.parse_object_literal(),
            Tok::Number(text) => {
                self.advance();
                Ok(self.finish(Node::with_text(SyntaxKind::NumberLit, text.as_str()), pos, &[]))
            }
            Tok::Str(text) => {
                self.advance();
                Ok(self.finish(Node::with_text(SyntaxKind::StringLit, text.as_str()), pos, &[]))
            }
            Tok::Ident(name) => {
                let kind = match name.as_str() {
                    "null" => SyntaxKind::Null,
                    "true" => SyntaxKind::True,
                    "false" => SyntaxKind::False,
                    "this" => SyntaxKind::This,
                    "function" => return self.parse_function(false),
                    _ => return self.name_node(),
                };
                self.advance();
                Ok(self.finish(Node::new(kind), pos, &[]))
            }
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_object_literal(&mut self) -> Result<NodeIndex, ReadError> {
        let pos = self.expect_punct("{")?.pos;
        let mut keys = Vec::new();
        while !self.is_punct("}") {
            let key_pos = self.peek().pos;
            let key = match self.peek_at(0) {
                Tok::Str(text) => {
                    let text = text.clone();
                    self.advance();
                    text
                }
                _ => self.expect_property_name()?,
            };
            self.expect_punct(":")?;
            let value = self.parse_assignment()?;
            keys.push(self.finish(Node::with_text(SyntaxKind::StringKey, key), key_pos, &[value]));
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct("}")?;
        Ok(self.finish(Node::new(SyntaxKind::ObjectLit), pos, &keys))
    }
}

/// Read `source` into `arena` and return its `Script` node.
pub fn read_script_into(arena: &mut NodeArena, source: &str) -> Result<NodeIndex, ReadError> {
    let tokens = tokenize(source)?;
    let mut reader = Reader {
        arena,
        tokens,
        cursor: 0,
        depth: 0,
    };
    reader.parse_script()
}

/// Read `source` into a fresh arena.
pub fn read_script(source: &str) -> Result<(NodeArena, NodeIndex), ReadError> {
    let mut arena = NodeArena::new();
    let script = read_script_into(&mut arena, source)?;
    Ok((arena, script))
}

#[cfg(test)]
#[path = "../tests/source_reader_tests.rs"]
mod tests;
