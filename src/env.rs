// ABOUTME: Environment module for chained lexical scopes and the binding protocol

use crate::error::EvalError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The process-wide reserved-constant table. `Constant` values are looked up
/// here, never in a frame's body — frames hold only `Variable`/`Keyword`
/// bindings, and `Constant`s can never be defined, only read.
fn reserved_constants() -> HashMap<&'static str, Value> {
    let mut table = HashMap::new();
    table.insert("True", Value::boolean(true));
    table.insert("False", Value::boolean(false));
    table
}

#[derive(Debug)]
pub struct Environment {
    body: RefCell<HashMap<String, Value>>,
    next: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates a new top-level environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            body: RefCell::new(HashMap::new()),
            next: None,
        })
    }

    /// Creates a new child environment extending `parent`.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            body: RefCell::new(HashMap::new()),
            next: Some(parent),
        })
    }

    /// Looks up a `Constant` or `Variable`. Constants resolve against the
    /// process-wide reserved table; variables walk the frame chain.
    pub fn lookup(&self, key: &Value) -> Result<Value, EvalError> {
        match key {
            Value::Constant(name) => reserved_constants()
                .get(name.as_str())
                .cloned()
                .ok_or_else(|| EvalError::UndefinedSymbol(name.clone())),
            Value::Variable(name) => {
                if let Some(value) = self.body.borrow().get(name) {
                    return Ok(value.clone());
                }
                match &self.next {
                    Some(parent) => parent.lookup(key),
                    None => Err(EvalError::UndefinedSymbol(name.clone())),
                }
            }
            other => Err(EvalError::type_error("eval", "symbol", other, 0)),
        }
    }

    /// Binds `key` to `value` in THIS frame only, following the binding
    /// protocol of spec.md §4.3:
    ///
    /// - `Nil` requires `value` to also be `Nil` (a no-op); anything else is
    ///   a type error.
    /// - `Constant` can never be (re)bound.
    /// - `Variable` binds unless the name is already bound in this frame,
    ///   which is an error — shadowing a parent frame's binding is fine.
    /// - `Keyword(":none")` is a no-op binding sentinel; any other keyword
    ///   in binding position is an error.
    pub fn bind(&self, key: &Value, value: Value) -> Result<(), EvalError> {
        match key {
            Value::Nil => {
                if value.is_nil() {
                    Ok(())
                } else {
                    Err(EvalError::type_error("bind", "nil", &value, 0))
                }
            }
            Value::Constant(name) => Err(EvalError::CannotRebindConstant(name.clone())),
            Value::Variable(name) => {
                if self.body.borrow().contains_key(name) {
                    return Err(EvalError::RedefinedVariable(name.clone()));
                }
                self.body.borrow_mut().insert(name.clone(), value);
                Ok(())
            }
            Value::Keyword(name) if name == ":none" => Ok(()),
            Value::Keyword(name) => Err(EvalError::UnexpectedKeyword(name.clone())),
            other => Err(EvalError::type_error("bind", "variable, nil or :none", other, 0)),
        }
    }

    /// True if `name` is bound as a `Variable` in this frame or an ancestor.
    pub fn contains_variable(&self, name: &str) -> bool {
        if self.body.borrow().contains_key(name) {
            return true;
        }
        match &self.next {
            Some(parent) => parent.contains_variable(name),
            None => false,
        }
    }
}
