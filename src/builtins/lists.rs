//! List construction and projection: list, list*, fst, snd
//!
//! - `list`: returns its (already-evaluated) argument list unchanged
//! - `list*`: like `list`, but the last argument becomes the tail of an
//!   improper list instead of the final element of a proper one
//! - `fst` / `snd`: project the two components of a single `Pair` argument

use crate::env::Environment;
use crate::error::EvalError;
use crate::step::{resume, Cont, State};
use crate::value::Value;
use std::rc::Rc;

fn list(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    resume(k, args)
}

fn list_star(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    if args.is_nil() {
        return resume(k, args);
    }
    let items = args.to_vec()?;
    if items.len() == 1 {
        return resume(k, items[0].clone());
    }
    let (last, init) = items.split_last().expect("checked non-empty above");
    let mut result = last.clone();
    for item in init.iter().rev() {
        result = Value::pair(item.clone(), result);
    }
    resume(k, result)
}

fn fst(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let pair = args.fst()?;
    resume(k, pair.fst()?)
}

fn snd(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let pair = args.fst()?;
    resume(k, pair.snd()?)
}

fn atomic(name: &str, signature: &str, body: crate::value::AtomicBody) -> Value {
    Value::Atomic {
        name: name.to_string(),
        signature: signature.to_string(),
        applicative: true,
        body,
    }
}

/// Registers `list`, `list*`, `fst`, `snd` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.bind(&Value::variable("list"), atomic("list", "(list e1 e2 ...)", list))
        .expect("builtin name already bound");
    env.bind(&Value::variable("list*"), atomic("list*", "(list* e1 e2 ... tail)", list_star))
        .expect("builtin name already bound");
    env.bind(&Value::variable("fst"), atomic("fst", "(fst pair)", fst))
        .expect("builtin name already bound");
    env.bind(&Value::variable("snd"), atomic("snd", "(snd pair)", snd))
        .expect("builtin name already bound");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(body: crate::value::AtomicBody, args: Value) -> Value {
        let env = Environment::new();
        match body(args, env, Rc::new(Cont::Halt)).unwrap() {
            State::Ok(value) => value,
            _ => panic!("builtin did not resolve immediately"),
        }
    }

    #[test]
    fn test_list_returns_its_arguments() {
        let items = Value::from_vec(vec![Value::number(1.0), Value::number(2.0)]);
        assert_eq!(call(list, items.clone()), items);
    }

    #[test]
    fn test_list_star_with_no_arguments_is_nil() {
        assert_eq!(call(list_star, Value::Nil), Value::Nil);
    }

    #[test]
    fn test_list_star_single_argument_is_itself() {
        assert_eq!(call(list_star, Value::from_vec(vec![Value::number(1.0)])), Value::number(1.0));
    }

    #[test]
    fn test_list_star_builds_improper_tail() {
        let args = Value::from_vec(vec![Value::number(1.0), Value::number(2.0), Value::number(3.0)]);
        let result = call(list_star, args);
        assert_eq!(result, Value::pair(Value::number(1.0), Value::pair(Value::number(2.0), Value::number(3.0))));
    }

    #[test]
    fn test_fst_and_snd() {
        let pair = Value::pair(Value::number(1.0), Value::number(2.0));
        let args = Value::from_vec(vec![pair]);
        assert_eq!(call(fst, args.clone()), Value::number(1.0));
        assert_eq!(call(snd, args), Value::number(2.0));
    }
}
