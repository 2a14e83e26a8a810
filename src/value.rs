// ABOUTME: Value types representing the vau-calculus data algebra

use crate::env::Environment;
use crate::error::EvalError;
use crate::step::{Cont, State};
use std::fmt;
use std::rc::Rc;

/// The body of an atomic (host-implemented) procedure.
///
/// Operatives receive their argument list unevaluated; applicatives receive
/// it already evaluated. Either way the body never recurses on the host
/// stack to continue the computation — it transitions to the next `State`
/// and hands it the continuation `k`.
pub type AtomicBody = fn(args: Value, env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError>;

#[derive(Clone)]
pub enum Value {
    Nil,
    Pair(Rc<Value>, Rc<Value>),
    Constant(String),
    Variable(String),
    Keyword(String),
    Boolean(bool),
    Number(f64),
    String(String),
    Environment(Rc<Environment>),
    /// A built-in, host-implemented procedure.
    Atomic {
        name: String,
        signature: String,
        applicative: bool,
        body: AtomicBody,
    },
    /// A user-defined operative, the result of `vau`.
    Abstract {
        head: Rc<Value>,
        body: Rc<Value>,
        dynamic: Rc<Value>,
        lexical: Rc<Environment>,
    },
    /// An applicative wrapper: evaluate arguments, then apply the inner procedure.
    Wrap(Rc<Value>),
}

impl Value {
    pub fn nil() -> Value {
        Value::Nil
    }

    pub fn pair(fst: Value, snd: Value) -> Value {
        Value::Pair(Rc::new(fst), Rc::new(snd))
    }

    pub fn constant(name: impl Into<String>) -> Value {
        Value::Constant(name.into())
    }

    pub fn variable(name: impl Into<String>) -> Value {
        Value::Variable(name.into())
    }

    pub fn keyword(name: impl Into<String>) -> Value {
        Value::Keyword(name.into())
    }

    pub fn boolean(value: bool) -> Value {
        Value::Boolean(value)
    }

    pub fn number(value: f64) -> Value {
        Value::Number(value)
    }

    pub fn string(value: impl Into<String>) -> Value {
        Value::String(value.into())
    }

    pub fn environment(env: Rc<Environment>) -> Value {
        Value::Environment(env)
    }

    pub fn wrap(proc: Value) -> Value {
        Value::Wrap(Rc::new(proc))
    }

    /// Builds a proper list, right-associating into a chain of pairs
    /// terminated by `Nil`, from a host-level sequence of values.
    pub fn from_vec(items: Vec<Value>) -> Value {
        let mut state = Value::Nil;
        for item in items.into_iter().rev() {
            state = Value::pair(item, state);
        }
        state
    }

    /// Collects a proper list into a host-level `Vec`, failing if the spine
    /// is not a proper list.
    pub fn to_vec(&self) -> Result<Vec<Value>, EvalError> {
        let mut out = Vec::new();
        let mut cur = self.clone();
        loop {
            match cur {
                Value::Nil => return Ok(out),
                Value::Pair(fst, snd) => {
                    out.push((*fst).clone());
                    cur = (*snd).clone();
                }
                other => return Err(EvalError::not_a_list(&other)),
            }
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, Value::Pair(..))
    }

    /// A value is a list iff it is `Nil` or a `Pair` whose `snd` is a list.
    pub fn is_list(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Pair(_, snd) => snd.is_list(),
            _ => false,
        }
    }

    pub fn is_symbol(&self) -> bool {
        matches!(self, Value::Constant(_) | Value::Variable(_))
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Value::Constant(_))
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Value::Variable(_))
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, Value::Keyword(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_environment(&self) -> bool {
        matches!(self, Value::Environment(_))
    }

    pub fn is_procedure(&self) -> bool {
        matches!(self, Value::Atomic { .. } | Value::Abstract { .. } | Value::Wrap(_))
    }

    pub fn is_wrap(&self) -> bool {
        matches!(self, Value::Wrap(_))
    }

    pub fn fst(&self) -> Result<Value, EvalError> {
        match self {
            Value::Pair(fst, _) => Ok((**fst).clone()),
            other => Err(EvalError::type_error("fst", "pair", other, 0)),
        }
    }

    pub fn snd(&self) -> Result<Value, EvalError> {
        match self {
            Value::Pair(_, snd) => Ok((**snd).clone()),
            other => Err(EvalError::type_error("snd", "pair", other, 0)),
        }
    }

    pub fn to_name(&self) -> Result<&str, EvalError> {
        match self {
            Value::Constant(name) | Value::Variable(name) => Ok(name),
            other => Err(EvalError::type_error("eval", "symbol", other, 0)),
        }
    }

    pub fn to_number(&self) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            other => Err(EvalError::type_error("number", "number", other, 0)),
        }
    }

    pub fn to_boolean(&self) -> Result<bool, EvalError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            other => Err(EvalError::type_error("boolean", "boolean", other, 0)),
        }
    }

    pub fn to_environment(&self) -> Result<Rc<Environment>, EvalError> {
        match self {
            Value::Environment(env) => Ok(env.clone()),
            other => Err(EvalError::type_error("eval", "environment", other, 0)),
        }
    }

    pub fn to_wrap(&self) -> Result<Value, EvalError> {
        match self {
            Value::Wrap(inner) => Ok((**inner).clone()),
            other => Err(EvalError::type_error("unwrap", "wrapped procedure", other, 0)),
        }
    }

    pub fn type_name(&self) -> String {
        match self {
            Value::Nil => "nil",
            Value::Pair(..) => "pair",
            Value::Constant(_) => "constant",
            Value::Variable(_) => "variable",
            Value::Keyword(_) => "keyword",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Environment(_) => "environment",
            Value::Atomic { .. } => "procedure",
            Value::Abstract { .. } => "procedure",
            Value::Wrap(_) => "procedure",
        }
        .to_string()
    }
}

/// Structural equality on data; identity on procedures and environments.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Pair(a1, a2), Value::Pair(b1, b2)) => a1 == b1 && a2 == b2,
            (Value::Constant(a), Value::Constant(b)) => a == b,
            (Value::Variable(a), Value::Variable(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Environment(a), Value::Environment(b)) => Rc::ptr_eq(a, b),
            (Value::Atomic { body: a, .. }, Value::Atomic { body: b, .. }) => {
                std::ptr::eq(*a as *const (), *b as *const ())
            }
            (Value::Abstract { head: h1, body: b1, .. }, Value::Abstract { head: h2, body: b2, .. }) => {
                Rc::ptr_eq(h1, h2) && Rc::ptr_eq(b1, b2)
            }
            (Value::Wrap(a), Value::Wrap(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// The printer. Printed opaque tokens (`#<environment>`, `#<procedure>`) are
/// unreadable: the reader rejects any lexeme beginning with `#<`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "()"),
            Value::Pair(fst, snd) => {
                if self.is_list() {
                    write!(f, "(")?;
                    let mut first = true;
                    let mut cur = self.clone();
                    while let Value::Pair(fst, snd) = cur {
                        if !first {
                            write!(f, " ")?;
                        }
                        first = false;
                        write!(f, "{}", fst)?;
                        cur = (*snd).clone();
                    }
                    write!(f, ")")
                } else {
                    write!(f, "(Pair {} {})", fst, snd)
                }
            }
            Value::Constant(name) | Value::Variable(name) | Value::Keyword(name) => {
                write!(f, "{}", name)
            }
            Value::Boolean(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Environment(_) => write!(f, "#<environment>"),
            Value::Atomic { .. } | Value::Abstract { .. } | Value::Wrap(_) => {
                write!(f, "#<procedure>")
            }
        }
    }
}
