//! Logical connectives: and, or, not
//!
//! `and` and `or` are operatives: they receive their operand list raw and
//! evaluate it themselves, left to right, so they can short-circuit without
//! evaluating operands the result doesn't depend on. `not` is an ordinary
//! applicative.

use crate::env::Environment;
use crate::error::EvalError;
use crate::step::{resume, Cont, State};
use crate::value::Value;
use std::rc::Rc;

fn and(args: Value, env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    if args.is_nil() {
        return resume(k, Value::boolean(true));
    }
    let first = args.fst()?;
    let rest = args.snd()?;
    Ok(State::Eval(first, env.clone(), Rc::new(Cont::AndRest { rest, env, k })))
}

fn or(args: Value, env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    if args.is_nil() {
        return resume(k, Value::boolean(false));
    }
    let first = args.fst()?;
    let rest = args.snd()?;
    Ok(State::Eval(first, env.clone(), Rc::new(Cont::OrRest { rest, env, k })))
}

fn not(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let value = args.fst()?.to_boolean()?;
    resume(k, Value::boolean(!value))
}

/// Registers `and`, `or`, `not` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.bind(
        &Value::variable("and"),
        Value::Atomic { name: "and".to_string(), signature: "(and e1 e2 ...)".to_string(), applicative: false, body: and },
    )
    .expect("builtin name already bound");
    env.bind(
        &Value::variable("or"),
        Value::Atomic { name: "or".to_string(), signature: "(or e1 e2 ...)".to_string(), applicative: false, body: or },
    )
    .expect("builtin name already bound");
    env.bind(
        &Value::variable("not"),
        Value::Atomic { name: "not".to_string(), signature: "(not b)".to_string(), applicative: true, body: not },
    )
    .expect("builtin name already bound");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::norm;

    fn eval(src: &str) -> Value {
        let env = Environment::new();
        register(&env);
        let expr = crate::reader::read(src).unwrap();
        norm(State::Eval(expr, env, Rc::new(Cont::Halt)), 1000).unwrap()
    }

    #[test]
    fn test_and_all_true() {
        assert_eq!(eval("(and True True True)"), Value::boolean(true));
    }

    #[test]
    fn test_and_short_circuits_on_false() {
        assert_eq!(eval("(and True False)"), Value::boolean(false));
    }

    #[test]
    fn test_and_with_no_operands_is_true() {
        assert_eq!(eval("(and)"), Value::boolean(true));
    }

    #[test]
    fn test_or_short_circuits_on_true() {
        assert_eq!(eval("(or False True)"), Value::boolean(true));
    }

    #[test]
    fn test_or_with_no_operands_is_false() {
        assert_eq!(eval("(or)"), Value::boolean(false));
    }

    #[test]
    fn test_not() {
        assert_eq!(eval("(not True)"), Value::boolean(false));
        assert_eq!(eval("(not False)"), Value::boolean(true));
    }
}
