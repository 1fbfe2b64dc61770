//! Prints a [`NodeArena`] subtree as JavaScript.
//!
//! Output is one statement per line with two-space indentation. Parentheses
//! are inserted from operator precedence only, so a printed tree reads back
//! into the same shape.

use jsdown_ast::{NodeArena, NodeIndex, SyntaxKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Comma,
    Assign,
    Conditional,
    Or,
    And,
    Equality,
    Unary,
    Postfix,
    Primary,
}

impl Precedence {
    fn of(kind: SyntaxKind) -> Precedence {
        match kind {
            SyntaxKind::Comma => Precedence::Comma,
            SyntaxKind::Assign => Precedence::Assign,
            SyntaxKind::Hook => Precedence::Conditional,
            SyntaxKind::Or => Precedence::Or,
            SyntaxKind::And => Precedence::And,
            SyntaxKind::Eq | SyntaxKind::Ne | SyntaxKind::Sheq | SyntaxKind::Shne => {
                Precedence::Equality
            }
            SyntaxKind::Not | SyntaxKind::Void => Precedence::Unary,
            SyntaxKind::GetProp
            | SyntaxKind::GetElem
            | SyntaxKind::Call
            | SyntaxKind::OptChainGetProp
            | SyntaxKind::OptChainGetElem
            | SyntaxKind::OptChainCall => Precedence::Postfix,
            // Function expressions print as `function (...) {...}`, which
            // needs parentheses as a callee.
            SyntaxKind::Function => Precedence::Assign,
            _ => Precedence::Primary,
        }
    }

    fn next(self) -> Precedence {
        match self {
            Precedence::Comma => Precedence::Assign,
            Precedence::Assign => Precedence::Conditional,
            Precedence::Conditional => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Equality,
            Precedence::Equality => Precedence::Unary,
            Precedence::Unary => Precedence::Postfix,
            Precedence::Postfix | Precedence::Primary => Precedence::Primary,
        }
    }
}

pub struct Printer<'a> {
    arena: &'a NodeArena,
    out: String,
    indent: usize,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena) -> Printer<'a> {
        Printer {
            arena,
            out: String::new(),
            indent: 0,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn write(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn text(&self, node: NodeIndex) -> &'a str {
        self.arena.text(node).unwrap_or("")
    }

    fn child(&self, node: NodeIndex, position: usize) -> NodeIndex {
        self.arena
            .children(node)
            .get(position)
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    // ========================================================================
    // Statements
    // ========================================================================

    /// Print a script or block body without braces.
    pub fn print_statements(&mut self, container: NodeIndex) {
        let arena = self.arena;
        for (i, &statement) in arena.children(container).iter().enumerate() {
            if i > 0 {
                self.newline();
            }
            self.print_statement(statement);
        }
    }

    pub fn print_statement(&mut self, node: NodeIndex) {
        let Some(kind) = self.arena.kind(node) else {
            return;
        };
        match kind {
            SyntaxKind::Script => self.print_statements(node),
            SyntaxKind::Block => self.print_block(node),
            SyntaxKind::Empty => self.write(";"),
            SyntaxKind::ExprResult => {
                let expr = self.arena.first_child(node);
                let needs_parens = matches!(
                    self.arena.kind(self.leftmost(expr)),
                    Some(SyntaxKind::ObjectLit | SyntaxKind::Function)
                );
                if needs_parens {
                    self.write("(");
                }
                self.print_expr(expr, Precedence::Comma);
                if needs_parens {
                    self.write(")");
                }
                self.write(";");
            }
            SyntaxKind::Var | SyntaxKind::Let | SyntaxKind::Const => {
                self.write(match kind {
                    SyntaxKind::Var => "var ",
                    SyntaxKind::Let => "let ",
                    _ => "const ",
                });
                let arena = self.arena;
                for (i, &name) in arena.children(node).iter().enumerate() {
                    if i > 0 {
                        self.write(", ");
                    }
                    self.write(self.text(name));
                    let init = self.arena.first_child(name);
                    if init.is_some() {
                        self.write(" = ");
                        self.print_expr(init, Precedence::Assign);
                    }
                }
                self.write(";");
            }
            SyntaxKind::Return => {
                self.write("return");
                let value = self.arena.first_child(node);
                if value.is_some() {
                    self.write(" ");
                    self.print_expr(value, Precedence::Comma);
                }
                self.write(";");
            }
            SyntaxKind::If => {
                self.write("if (");
                self.print_expr(self.child(node, 0), Precedence::Comma);
                self.write(") ");
                self.print_statement(self.child(node, 1));
                let otherwise = self.child(node, 2);
                if otherwise.is_some() {
                    self.write(" else ");
                    self.print_statement(otherwise);
                }
            }
            SyntaxKind::Function => self.print_function(node),
            _ => {
                self.print_expr(node, Precedence::Comma);
                self.write(";");
            }
        }
    }

    fn print_block(&mut self, node: NodeIndex) {
        if self.arena.children(node).is_empty() {
            self.write("{}");
            return;
        }
        self.write("{");
        self.indent += 1;
        self.newline();
        self.print_statements(node);
        self.indent -= 1;
        self.newline();
        self.write("}");
    }

    fn print_function(&mut self, node: NodeIndex) {
        self.write("function");
        let name = self.text(self.child(node, 0));
        if !name.is_empty() {
            self.write(" ");
            self.write(name);
        }
        self.write("(");
        let arena = self.arena;
        for (i, &param) in arena.children(self.child(node, 1)).iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(self.text(param));
        }
        self.write(") ");
        self.print_block(self.child(node, 2));
    }

    /// First node printed for `expr`.
    fn leftmost(&self, expr: NodeIndex) -> NodeIndex {
        let mut current = expr;
        loop {
            let descends = matches!(
                self.arena.kind(current),
                Some(
                    SyntaxKind::GetProp
                        | SyntaxKind::GetElem
                        | SyntaxKind::Call
                        | SyntaxKind::OptChainGetProp
                        | SyntaxKind::OptChainGetElem
                        | SyntaxKind::OptChainCall
                        | SyntaxKind::Assign
                        | SyntaxKind::Hook
                        | SyntaxKind::Comma
                        | SyntaxKind::Or
                        | SyntaxKind::And
                        | SyntaxKind::Eq
                        | SyntaxKind::Ne
                        | SyntaxKind::Sheq
                        | SyntaxKind::Shne
                )
            );
            if !descends {
                return current;
            }
            current = self.arena.first_child(current);
        }
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn print_expression(&mut self, node: NodeIndex) {
        self.print_expr(node, Precedence::Comma);
    }

    fn print_expr(&mut self, node: NodeIndex, min: Precedence) {
        let Some(kind) = self.arena.kind(node) else {
            return;
        };
        let parens = Precedence::of(kind) < min;
        if parens {
            self.write("(");
        }
        self.print_expr_inner(node, kind);
        if parens {
            self.write(")");
        }
    }

    fn print_binary(&mut self, node: NodeIndex, op: &str, prec: Precedence) {
        self.print_expr(self.child(node, 0), prec);
        self.write(op);
        self.print_expr(self.child(node, 1), prec.next());
    }

    /// Receiver of an access or call. A plain link on an optional chain needs
    /// parentheses, or the link would read as part of the chain.
    fn print_receiver(&mut self, node: NodeIndex, kind: SyntaxKind) {
        let receiver = self.child(node, 0);
        if !kind.is_opt_chain() && self.arena.is_opt_chain_node(receiver) {
            self.write("(");
            self.print_expr(receiver, Precedence::Comma);
            self.write(")");
        } else {
            self.print_expr(receiver, Precedence::Postfix);
        }
    }

    fn print_arguments(&mut self, node: NodeIndex) {
        self.write("(");
        let arena = self.arena;
        for (i, &arg) in arena.children(node).iter().skip(1).enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expr(arg, Precedence::Assign);
        }
        self.write(")");
    }

    fn print_expr_inner(&mut self, node: NodeIndex, kind: SyntaxKind) {
        let starts_segment = self.arena.is_optional_chain_start(node);
        match kind {
            SyntaxKind::Name | SyntaxKind::NumberLit => self.write(self.text(node)),
            SyntaxKind::StringLit => {
                let quoted = format!("{:?}", self.text(node));
                self.write(&quoted);
            }
            SyntaxKind::Null => self.write("null"),
            SyntaxKind::True => self.write("true"),
            SyntaxKind::False => self.write("false"),
            SyntaxKind::This => self.write("this"),
            SyntaxKind::Empty => {}
            SyntaxKind::Void => {
                self.write("void ");
                self.print_expr(self.child(node, 0), Precedence::Unary);
            }
            SyntaxKind::Not => {
                self.write("!");
                self.print_expr(self.child(node, 0), Precedence::Unary);
            }
            SyntaxKind::Eq => self.print_binary(node, " == ", Precedence::Equality),
            SyntaxKind::Ne => self.print_binary(node, " != ", Precedence::Equality),
            SyntaxKind::Sheq => self.print_binary(node, " === ", Precedence::Equality),
            SyntaxKind::Shne => self.print_binary(node, " !== ", Precedence::Equality),
            SyntaxKind::And => self.print_binary(node, " && ", Precedence::And),
            SyntaxKind::Or => self.print_binary(node, " || ", Precedence::Or),
            SyntaxKind::Comma => self.print_binary(node, ", ", Precedence::Comma),
            SyntaxKind::Assign => {
                self.print_expr(self.child(node, 0), Precedence::Postfix);
                self.write(" = ");
                self.print_expr(self.child(node, 1), Precedence::Assign);
            }
            SyntaxKind::Hook => {
                self.print_expr(self.child(node, 0), Precedence::Or);
                self.write(" ? ");
                self.print_expr(self.child(node, 1), Precedence::Assign);
                self.write(" : ");
                self.print_expr(self.child(node, 2), Precedence::Assign);
            }
            SyntaxKind::GetProp | SyntaxKind::OptChainGetProp => {
                self.print_receiver(node, kind);
                self.write(if starts_segment { "?." } else { "." });
                self.write(self.text(node));
            }
            SyntaxKind::GetElem | SyntaxKind::OptChainGetElem => {
                self.print_receiver(node, kind);
                self.write(if starts_segment { "?.[" } else { "[" });
                self.print_expr(self.child(node, 1), Precedence::Comma);
                self.write("]");
            }
            SyntaxKind::Call | SyntaxKind::OptChainCall => {
                self.print_receiver(node, kind);
                if starts_segment {
                    self.write("?.");
                }
                self.print_arguments(node);
            }
            SyntaxKind::ObjectLit => {
                self.write("{");
                let arena = self.arena;
                for (i, &key) in arena.children(node).iter().enumerate() {
                    self.write(if i > 0 { ", " } else { " " });
                    self.write(self.text(key));
                    self.write(": ");
                    self.print_expr(self.arena.first_child(key), Precedence::Assign);
                }
                self.write(if self.arena.children(node).is_empty() { "}" } else { " }" });
            }
            SyntaxKind::Function => self.print_function(node),
            _ => self.print_statement(node),
        }
    }
}

/// Print a statement, script, or expression.
pub fn print_node(arena: &NodeArena, node: NodeIndex) -> String {
    let mut printer = Printer::new(arena);
    match arena.kind(node) {
        Some(kind) if kind == SyntaxKind::Script || arena.is_statement(node) => {
            printer.print_statement(node)
        }
        _ => printer.print_expression(node),
    }
    printer.finish()
}

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod tests;
