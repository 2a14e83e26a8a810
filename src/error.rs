// ABOUTME: Error types for evaluation failures in the step machine

use crate::value::Value;
use thiserror::Error;

pub const ARITY_ONE: &str = "1";
pub const ARITY_TWO: &str = "2";
pub const ARITY_AT_LEAST_ONE: &str = "at least 1";
pub const ARITY_AT_LEAST_TWO: &str = "at least 2";

#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// Malformed source text: unbalanced parens, an unreadable `#<...>`
    /// lexeme, or an unterminated string literal.
    #[error("read error: {0}")]
    ReadError(String),

    /// A value was used where a different shape was required.
    #[error("{function}: expected {expected}, got {actual} at argument {position}")]
    TypeMismatch {
        function: String,
        expected: String,
        actual: String,
        position: usize,
    },

    /// A variable or constant name has no binding in the environment chain.
    #[error("undefined symbol: {0}")]
    UndefinedSymbol(String),

    /// `define` (or a parameter binding) tried to rebind a `Constant`.
    #[error("cannot rebind constant: {0}")]
    CannotRebindConstant(String),

    /// `define` (or a parameter binding) tried to rebind a `Variable` that
    /// is already bound in the same frame.
    #[error("variable already defined in this scope: {0}")]
    RedefinedVariable(String),

    /// A `Keyword` other than `:none` appeared in binding position.
    #[error("unexpected keyword during binding: {0}")]
    UnexpectedKeyword(String),

    /// A procedure was called with the wrong number of arguments.
    #[error("{function}: expected {expected} argument{}, got {actual}", if *.expected == "1" { "" } else { "s" })]
    ArityMismatch {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("division by zero")]
    DivisionByZero,

    /// `norm` exhausted its step quota before reaching an `Ok` state.
    #[error("out of fuel after {0} steps")]
    OutOfFuel(usize),

    /// A value that was required to be a proper list was not one.
    #[error("not a list: {0}")]
    NotAList(String),

    /// An error raised inside an application, re-wrapped with the offending
    /// procedure's printed form and argument list.
    #[error("error applying {procedure} to {arguments}: {source}")]
    Applying {
        procedure: String,
        arguments: String,
        #[source]
        source: Box<EvalError>,
    },
}

impl EvalError {
    pub fn type_error(function: &str, expected: &str, actual: &Value, position: usize) -> Self {
        EvalError::TypeMismatch {
            function: function.to_string(),
            expected: expected.to_string(),
            actual: actual.type_name(),
            position,
        }
    }

    pub fn arity_error(function: &str, expected: impl Into<String>, actual: usize) -> Self {
        EvalError::ArityMismatch {
            function: function.to_string(),
            expected: expected.into(),
            actual,
        }
    }

    pub fn not_a_list(value: &Value) -> Self {
        EvalError::NotAList(value.to_string())
    }

    /// Re-wraps `source` with the printed form of the procedure and argument
    /// list that raised it, matching `atomic_error`/`abstract_error` in the
    /// source this step machine is distilled from.
    pub fn applying(procedure: &Value, arguments: &Value, source: EvalError) -> Self {
        EvalError::Applying {
            procedure: procedure.to_string(),
            arguments: arguments.to_string(),
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_error_display() {
        let err = EvalError::type_error("fst", "pair", &Value::number(1.0), 0);
        assert_eq!(err.to_string(), "fst: expected pair, got number at argument 0");
    }

    #[test]
    fn test_arity_error_pluralization() {
        let one = EvalError::arity_error("snd", ARITY_ONE, 0);
        assert_eq!(one.to_string(), "snd: expected 1 argument, got 0");

        let two = EvalError::arity_error("cons", ARITY_TWO, 1);
        assert_eq!(two.to_string(), "cons: expected 2 arguments, got 1");
    }

    #[test]
    fn test_applying_wraps_source() {
        let inner = EvalError::DivisionByZero;
        let wrapped = EvalError::applying(&Value::variable("/"), &Value::number(0.0), inner);
        assert!(wrapped.to_string().contains("division by zero"));
    }
}
