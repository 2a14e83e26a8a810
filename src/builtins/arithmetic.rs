//! Arithmetic operations: +, *, -, /
//!
//! All four are applicatives (their arguments are evaluated before the body
//! runs) that fold over a variadic argument list.
//!
//! - `+`: sum of all arguments, identity 0
//! - `*`: product of all arguments, identity 1
//! - `-`: requires at least one argument; negates a single argument,
//!   otherwise subtracts the rest from the first
//! - `/`: requires at least one argument; reciprocal of a single argument,
//!   otherwise divides the first by the rest — any zero divisor is a
//!   `division-by-zero` error

use crate::env::Environment;
use crate::error::{EvalError, ARITY_AT_LEAST_ONE};
use crate::step::{resume, Cont, State};
use crate::value::Value;
use std::rc::Rc;

fn numbers(name: &str, args: &Value) -> Result<Vec<f64>, EvalError> {
    args.to_vec()?
        .iter()
        .enumerate()
        .map(|(i, v)| v.to_number().map_err(|_| EvalError::type_error(name, "number", v, i)))
        .collect()
}

fn add(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let sum = numbers("+", &args)?.into_iter().sum();
    resume(k, Value::number(sum))
}

fn mul(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let product = numbers("*", &args)?.into_iter().product();
    resume(k, Value::number(product))
}

fn sub(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let nums = numbers("-", &args)?;
    let (first, rest) = nums.split_first().ok_or_else(|| EvalError::arity_error("-", ARITY_AT_LEAST_ONE, 0))?;
    let result = if rest.is_empty() { -first } else { rest.iter().fold(*first, |acc, n| acc - n) };
    resume(k, Value::number(result))
}

fn div(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let nums = numbers("/", &args)?;
    let (first, rest) = nums.split_first().ok_or_else(|| EvalError::arity_error("/", ARITY_AT_LEAST_ONE, 0))?;
    if rest.is_empty() {
        if *first == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        return resume(k, Value::number(1.0 / first));
    }
    let mut result = *first;
    for n in rest {
        if *n == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        result /= n;
    }
    resume(k, Value::number(result))
}

fn atomic(name: &str, signature: &str, body: crate::value::AtomicBody) -> Value {
    Value::Atomic {
        name: name.to_string(),
        signature: signature.to_string(),
        applicative: true,
        body,
    }
}

/// Registers `+`, `*`, `-`, `/` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.bind(&Value::variable("+"), atomic("+", "(+ n1 n2 ...)", add))
        .expect("builtin name already bound");
    env.bind(&Value::variable("*"), atomic("*", "(* n1 n2 ...)", mul))
        .expect("builtin name already bound");
    env.bind(&Value::variable("-"), atomic("-", "(- n1 n2 ...)", sub))
        .expect("builtin name already bound");
    env.bind(&Value::variable("/"), atomic("/", "(/ n1 n2 ...)", div))
        .expect("builtin name already bound");
}
