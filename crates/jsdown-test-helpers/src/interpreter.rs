//! Tree-walking interpreter for the test subset.
//!
//! Runs both the original and the lowered form of a program so tests can
//! compare what they observably do. Optional chains are evaluated natively,
//! with short-circuiting. `Function.prototype.call` is the only built-in
//! method. `log(...)` appends its arguments to [`Interpreter::output`] and
//! returns the first one.

use jsdown_ast::{NodeArena, NodeIndex, SyntaxKind};
use jsdown_common::limits::MAX_CALL_DEPTH;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    #[error("TypeError: {0}")]
    TypeError(String),

    #[error("ReferenceError: {0} is not defined")]
    ReferenceError(String),

    #[error("RangeError: maximum call stack size exceeded")]
    StackOverflow,

    #[error("cannot evaluate {0} node")]
    Unsupported(SyntaxKind),
}

impl RuntimeError {
    /// JavaScript error class, ignoring the message.
    pub fn name(&self) -> &'static str {
        match self {
            RuntimeError::TypeError(_) => "TypeError",
            RuntimeError::ReferenceError(_) => "ReferenceError",
            RuntimeError::StackOverflow => "RangeError",
            RuntimeError::Unsupported(_) => "Unsupported",
        }
    }
}

pub type ObjectRef = Rc<RefCell<FxHashMap<String, Value>>>;
pub type NativeFn = dyn Fn(&mut Vec<String>, &[Value]) -> Result<Value, RuntimeError>;

pub enum Callable {
    Script {
        params: Vec<String>,
        body: NodeIndex,
        closure: ScopeRef,
    },
    Native(Box<NativeFn>),
    /// `target.call` bound to its target
    CallOf(Rc<Callable>),
}

#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(Rc<str>),
    Object(ObjectRef),
    Function(Rc<Callable>),
}

impl Value {
    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    pub fn to_boolean(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Object(_) | Value::Function(_) => true,
        }
    }

    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// `==` restricted to what the subset can produce.
    pub fn loose_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (a, b) if a.is_null_or_undefined() || b.is_null_or_undefined() => {
                a.is_null_or_undefined() && b.is_null_or_undefined()
            }
            (Value::Number(n), Value::Str(s)) | (Value::Str(s), Value::Number(n)) => {
                s.trim().parse::<f64>().is_ok_and(|parsed| parsed == *n)
            }
            _ => self.strict_equals(other),
        }
    }

    fn property_key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.is_nan() => f.write_str("NaN"),
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Object(_) => f.write_str("[object Object]"),
            Value::Function(_) => f.write_str("function"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{s:?}"),
            other => write!(f, "{other}"),
        }
    }
}

// ============================================================================
// Scopes
// ============================================================================

pub type ScopeRef = Rc<RefCell<Scope>>;

#[derive(Default)]
pub struct Scope {
    vars: FxHashMap<String, Value>,
    parent: Option<ScopeRef>,
}

impl Scope {
    fn child_of(parent: &ScopeRef) -> ScopeRef {
        Rc::new(RefCell::new(Scope {
            vars: FxHashMap::default(),
            parent: Some(Rc::clone(parent)),
        }))
    }
}

fn declare(scope: &ScopeRef, name: &str, value: Value) {
    scope.borrow_mut().vars.insert(name.to_string(), value);
}

fn lookup(scope: &ScopeRef, name: &str) -> Option<Value> {
    let mut current = Some(Rc::clone(scope));
    while let Some(s) = current {
        if let Some(value) = s.borrow().vars.get(name) {
            return Some(value.clone());
        }
        current = s.borrow().parent.clone();
    }
    None
}

fn assign(scope: &ScopeRef, name: &str, value: Value) -> bool {
    let mut current = Some(Rc::clone(scope));
    while let Some(s) = current {
        if let Some(slot) = s.borrow_mut().vars.get_mut(name) {
            *slot = value;
            return true;
        }
        current = s.borrow().parent.clone();
    }
    false
}

enum Completion {
    Normal,
    Return(Value),
}

/// `Ok(None)` marks an optional chain that short-circuited.
type Reference = Option<(Value, Value)>;

// ============================================================================
// Interpreter
// ============================================================================

pub struct Interpreter<'a> {
    arena: &'a NodeArena,
    globals: ScopeRef,
    output: Vec<String>,
    depth: u32,
}

impl<'a> Interpreter<'a> {
    pub fn new(arena: &'a NodeArena) -> Interpreter<'a> {
        let mut interpreter = Interpreter {
            arena,
            globals: Rc::new(RefCell::new(Scope::default())),
            output: Vec::new(),
            depth: 0,
        };
        interpreter.define_global("undefined", Value::Undefined);
        interpreter.define_native("log", |output, args| {
            let line = args
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            output.push(line);
            Ok(args.first().cloned().unwrap_or_default())
        });
        interpreter
    }

    pub fn define_global(&mut self, name: &str, value: Value) {
        declare(&self.globals, name, value);
    }

    pub fn define_native<F>(&mut self, name: &str, f: F)
    where
        F: Fn(&mut Vec<String>, &[Value]) -> Result<Value, RuntimeError> + 'static,
    {
        let native = Value::Function(Rc::new(Callable::Native(Box::new(f))));
        self.define_global(name, native);
    }

    pub fn global(&self, name: &str) -> Option<Value> {
        lookup(&self.globals, name)
    }

    pub fn output(&self) -> &[String] {
        &self.output
    }

    pub fn into_output(self) -> Vec<String> {
        self.output
    }

    pub fn run(&mut self, script: NodeIndex) -> Result<(), RuntimeError> {
        let globals = Rc::clone(&self.globals);
        self.exec_statements(script, &globals)?;
        Ok(())
    }

    fn children(&self, node: NodeIndex) -> &'a [NodeIndex] {
        self.arena.children(node)
    }

    fn child(&self, node: NodeIndex, position: usize) -> NodeIndex {
        self.children(node)
            .get(position)
            .copied()
            .unwrap_or(NodeIndex::NONE)
    }

    fn text(&self, node: NodeIndex) -> &'a str {
        self.arena.text(node).unwrap_or("")
    }

    fn kind(&self, node: NodeIndex) -> Result<SyntaxKind, RuntimeError> {
        self.arena
            .kind(node)
            .ok_or(RuntimeError::Unsupported(SyntaxKind::Empty))
    }

    // ------------------------------------------------------------------------
    // Statements
    // ------------------------------------------------------------------------

    fn make_function(&self, node: NodeIndex, scope: &ScopeRef) -> Value {
        let params = self
            .children(self.child(node, 1))
            .iter()
            .map(|&p| self.text(p).to_string())
            .collect();
        Value::Function(Rc::new(Callable::Script {
            params,
            body: self.child(node, 2),
            closure: Rc::clone(scope),
        }))
    }

    fn exec_statements(
        &mut self,
        container: NodeIndex,
        scope: &ScopeRef,
    ) -> Result<Completion, RuntimeError> {
        let statements = self.children(container);
        // Function declarations are visible throughout their block.
        for &statement in statements {
            if self.arena.is_kind(statement, SyntaxKind::Function) {
                let function = self.make_function(statement, scope);
                declare(scope, self.text(self.child(statement, 0)), function);
            }
        }
        for &statement in statements {
            if let Completion::Return(value) = self.exec(statement, scope)? {
                return Ok(Completion::Return(value));
            }
        }
        Ok(Completion::Normal)
    }

    fn exec(&mut self, node: NodeIndex, scope: &ScopeRef) -> Result<Completion, RuntimeError> {
        match self.kind(node)? {
            SyntaxKind::Block => {
                let block_scope = Scope::child_of(scope);
                self.exec_statements(node, &block_scope)
            }
            SyntaxKind::Empty | SyntaxKind::Function => Ok(Completion::Normal),
            SyntaxKind::ExprResult => {
                self.eval(self.child(node, 0), scope)?;
                Ok(Completion::Normal)
            }
            SyntaxKind::Var | SyntaxKind::Let | SyntaxKind::Const => {
                for &name in self.children(node) {
                    let init = self.arena.first_child(name);
                    let value = if init.is_some() {
                        self.eval(init, scope)?
                    } else {
                        Value::Undefined
                    };
                    declare(scope, self.text(name), value);
                }
                Ok(Completion::Normal)
            }
            SyntaxKind::Return => {
                let value = self.arena.first_child(node);
                let value = if value.is_some() {
                    self.eval(value, scope)?
                } else {
                    Value::Undefined
                };
                Ok(Completion::Return(value))
            }
            SyntaxKind::If => {
                if self.eval(self.child(node, 0), scope)?.to_boolean() {
                    self.exec(self.child(node, 1), scope)
                } else if self.child(node, 2).is_some() {
                    self.exec(self.child(node, 2), scope)
                } else {
                    Ok(Completion::Normal)
                }
            }
            other => Err(RuntimeError::Unsupported(other)),
        }
    }

    // ------------------------------------------------------------------------
    // Expressions
    // ------------------------------------------------------------------------

    pub fn eval(&mut self, node: NodeIndex, scope: &ScopeRef) -> Result<Value, RuntimeError> {
        let kind = self.kind(node)?;
        match kind {
            SyntaxKind::Name => {
                let name = self.text(node);
                lookup(scope, name).ok_or_else(|| RuntimeError::ReferenceError(name.to_string()))
            }
            SyntaxKind::NumberLit => Ok(Value::Number(self.text(node).parse().unwrap_or(f64::NAN))),
            SyntaxKind::StringLit => Ok(Value::Str(self.text(node).into())),
            SyntaxKind::Null => Ok(Value::Null),
            SyntaxKind::True => Ok(Value::Bool(true)),
            SyntaxKind::False => Ok(Value::Bool(false)),
            SyntaxKind::This => Ok(lookup(scope, "this").unwrap_or_default()),
            SyntaxKind::Void => {
                self.eval(self.child(node, 0), scope)?;
                Ok(Value::Undefined)
            }
            SyntaxKind::Not => Ok(Value::Bool(!self.eval(self.child(node, 0), scope)?.to_boolean())),
            SyntaxKind::Eq | SyntaxKind::Ne | SyntaxKind::Sheq | SyntaxKind::Shne => {
                let left = self.eval(self.child(node, 0), scope)?;
                let right = self.eval(self.child(node, 1), scope)?;
                let result = match kind {
                    SyntaxKind::Eq => left.loose_equals(&right),
                    SyntaxKind::Ne => !left.loose_equals(&right),
                    SyntaxKind::Sheq => left.strict_equals(&right),
                    _ => !left.strict_equals(&right),
                };
                Ok(Value::Bool(result))
            }
            SyntaxKind::And | SyntaxKind::Or => {
                let left = self.eval(self.child(node, 0), scope)?;
                if left.to_boolean() == (kind == SyntaxKind::And) {
                    self.eval(self.child(node, 1), scope)
                } else {
                    Ok(left)
                }
            }
            SyntaxKind::Comma => {
                self.eval(self.child(node, 0), scope)?;
                self.eval(self.child(node, 1), scope)
            }
            SyntaxKind::Hook => {
                if self.eval(self.child(node, 0), scope)?.to_boolean() {
                    self.eval(self.child(node, 1), scope)
                } else {
                    self.eval(self.child(node, 2), scope)
                }
            }
            SyntaxKind::Assign => self.eval_assign(node, scope),
            SyntaxKind::ObjectLit => {
                let mut properties = FxHashMap::default();
                for &key in self.children(node) {
                    let value = self.eval(self.arena.first_child(key), scope)?;
                    properties.insert(self.text(key).to_string(), value);
                }
                Ok(Value::Object(Rc::new(RefCell::new(properties))))
            }
            SyntaxKind::Function => Ok(self.make_function(node, scope)),
            SyntaxKind::GetProp
            | SyntaxKind::GetElem
            | SyntaxKind::Call
            | SyntaxKind::OptChainGetProp
            | SyntaxKind::OptChainGetElem
            | SyntaxKind::OptChainCall => Ok(self
                .eval_link(node, scope)?
                .map(|(value, _)| value)
                .unwrap_or_default()),
            other => Err(RuntimeError::Unsupported(other)),
        }
    }

    fn eval_assign(&mut self, node: NodeIndex, scope: &ScopeRef) -> Result<Value, RuntimeError> {
        let target = self.child(node, 0);
        match self.kind(target)? {
            SyntaxKind::Name => {
                let value = self.eval(self.child(node, 1), scope)?;
                let name = self.text(target);
                if !assign(scope, name, value.clone()) {
                    return Err(RuntimeError::ReferenceError(name.to_string()));
                }
                Ok(value)
            }
            kind @ (SyntaxKind::GetProp | SyntaxKind::GetElem) => {
                let object = self.eval(self.child(target, 0), scope)?;
                let key = if kind == SyntaxKind::GetProp {
                    self.text(target).to_string()
                } else {
                    self.eval(self.child(target, 1), scope)?.property_key()
                };
                let value = self.eval(self.child(node, 1), scope)?;
                match &object {
                    Value::Object(properties) => {
                        properties.borrow_mut().insert(key, value.clone());
                    }
                    v if v.is_null_or_undefined() => {
                        return Err(RuntimeError::TypeError(format!(
                            "Cannot set properties of {v} (setting '{key}')"
                        )));
                    }
                    _ => {}
                }
                Ok(value)
            }
            other => Err(RuntimeError::Unsupported(other)),
        }
    }

    /// Evaluate the receiver or callee of a link.
    ///
    /// A short-circuit below an optional link propagates to it; below a plain
    /// link (a parenthesized chain) it has already ended as `undefined`.
    fn eval_receiver(
        &mut self,
        node: NodeIndex,
        scope: &ScopeRef,
        continues_chain: bool,
    ) -> Result<Reference, RuntimeError> {
        let is_link = matches!(
            self.arena.kind(node),
            Some(
                SyntaxKind::GetProp
                    | SyntaxKind::GetElem
                    | SyntaxKind::Call
                    | SyntaxKind::OptChainGetProp
                    | SyntaxKind::OptChainGetElem
                    | SyntaxKind::OptChainCall
            )
        );
        if !is_link {
            return Ok(Some((self.eval(node, scope)?, Value::Undefined)));
        }
        match self.eval_link(node, scope)? {
            None if !continues_chain => Ok(Some((Value::Undefined, Value::Undefined))),
            reference => Ok(reference),
        }
    }

    /// Evaluate an access or call, returning its value and the `this` a call
    /// through it would use.
    fn eval_link(&mut self, node: NodeIndex, scope: &ScopeRef) -> Result<Reference, RuntimeError> {
        let kind = self.kind(node)?;
        let optional = kind.is_opt_chain();
        let starts_segment = self.arena.is_optional_chain_start(node);

        let Some((receiver, receiver_this)) =
            self.eval_receiver(self.child(node, 0), scope, optional)?
        else {
            return Ok(None);
        };
        if starts_segment && receiver.is_null_or_undefined() {
            return Ok(None);
        }

        match kind {
            SyntaxKind::GetProp | SyntaxKind::OptChainGetProp => {
                let value = self.get_property(&receiver, self.text(node))?;
                Ok(Some((value, receiver)))
            }
            SyntaxKind::GetElem | SyntaxKind::OptChainGetElem => {
                let key = self.eval(self.child(node, 1), scope)?.property_key();
                let value = self.get_property(&receiver, &key)?;
                Ok(Some((value, receiver)))
            }
            _ => {
                let mut args = Vec::new();
                for &arg in self.children(node).iter().skip(1) {
                    args.push(self.eval(arg, scope)?);
                }
                let result = self.call(&receiver, receiver_this, &args)?;
                Ok(Some((result, Value::Undefined)))
            }
        }
    }

    fn get_property(&self, object: &Value, key: &str) -> Result<Value, RuntimeError> {
        match object {
            Value::Undefined | Value::Null => Err(RuntimeError::TypeError(format!(
                "Cannot read properties of {object} (reading '{key}')"
            ))),
            Value::Object(properties) => Ok(properties.borrow().get(key).cloned().unwrap_or_default()),
            Value::Function(target) if key == "call" => {
                Ok(Value::Function(Rc::new(Callable::CallOf(Rc::clone(target)))))
            }
            _ => Ok(Value::Undefined),
        }
    }

    pub fn call(
        &mut self,
        callee: &Value,
        this: Value,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        let Value::Function(callable) = callee else {
            return Err(RuntimeError::TypeError(format!("{callee:?} is not a function")));
        };
        if self.depth >= MAX_CALL_DEPTH {
            return Err(RuntimeError::StackOverflow);
        }
        self.depth += 1;
        let result = self.invoke(callable, this, args);
        self.depth -= 1;
        result
    }

    fn invoke(
        &mut self,
        callable: &Rc<Callable>,
        this: Value,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        match callable.as_ref() {
            Callable::Script {
                params,
                body,
                closure,
            } => {
                let frame = Scope::child_of(closure);
                declare(&frame, "this", this);
                for (i, param) in params.iter().enumerate() {
                    declare(&frame, param, args.get(i).cloned().unwrap_or_default());
                }
                match self.exec_statements(*body, &frame)? {
                    Completion::Return(value) => Ok(value),
                    Completion::Normal => Ok(Value::Undefined),
                }
            }
            Callable::Native(f) => f(&mut self.output, args),
            Callable::CallOf(target) => {
                let this = args.first().cloned().unwrap_or_default();
                let rest = args.get(1..).unwrap_or(&[]);
                self.call(&Value::Function(Rc::clone(target)), this, rest)
            }
        }
    }
}

/// What running a script did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub output: Vec<String>,
    pub error: Option<RuntimeError>,
}

impl Execution {
    /// Error class of the failure, if any.
    pub fn error_name(&self) -> Option<&'static str> {
        self.error.as_ref().map(RuntimeError::name)
    }
}

/// Run `script`, keeping the output produced before any error.
pub fn execute(arena: &NodeArena, script: NodeIndex) -> Execution {
    let mut interpreter = Interpreter::new(arena);
    let error = interpreter.run(script).err();
    Execution {
        output: interpreter.into_output(),
        error,
    }
}

#[cfg(test)]
#[path = "../tests/interpreter_tests.rs"]
mod tests;
