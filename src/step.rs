// ABOUTME: The reified step machine — explicit states and heap-allocated continuations

use crate::env::Environment;
use crate::error::EvalError;
use crate::value::Value;
use std::rc::Rc;

/// One frame of a delimited continuation. Continuations never live on the
/// host call stack; they form an `Rc`-linked list so `step` can always
/// transition by pattern matching on owned data rather than by recursing.
pub enum Cont {
    /// The top-level continuation: the computation is done.
    Halt,
    /// Finished evaluating the operator position of a combination; apply it
    /// to the still-unevaluated operand list.
    EvalProc { args: Value, env: Rc<Environment>, k: Rc<Cont> },
    /// Finished evaluating an argument list for an unwrapped `Wrap`; apply
    /// the inner procedure to it.
    ApplyArgs { proc: Value, env: Rc<Environment>, k: Rc<Cont> },
    /// Finished evaluating an argument list for an applicative `Atomic`;
    /// invoke its body directly (never re-enter `Apply`, which would
    /// evaluate the arguments a second time).
    ApplyAtomic { proc: Value, env: Rc<Environment>, k: Rc<Cont> },
    /// Mid-`Evlis`: either just evaluated the head and still need to evlis
    /// the tail, or just finished the tail and need to cons the head on.
    EvlisCons { phase: EvlisPhase, env: Rc<Environment>, k: Rc<Cont> },
    /// Mid-`Exec`: the value just produced is discarded (only the last form
    /// in a body matters); execute what remains.
    ExecRest { rest: Value, env: Rc<Environment>, k: Rc<Cont> },
    /// Mid-`let`: just bound one name, possibly more bindings remain before
    /// the body executes in the accumulated scope.
    LetBindRest {
        scope: Rc<Environment>,
        name: Value,
        remaining: Value,
        body: Value,
        k: Rc<Cont>,
    },
    /// Mid-`and`: the value just produced was `True`; if more operands
    /// remain, evaluate the next one, else the whole form is `True`.
    AndRest { rest: Value, env: Rc<Environment>, k: Rc<Cont> },
    /// Mid-`or`: the value just produced was `False`; if more operands
    /// remain, evaluate the next one, else the whole form is `False`.
    OrRest { rest: Value, env: Rc<Environment>, k: Rc<Cont> },
    /// Mid-`define`: the right-hand side has been evaluated; bind it to the
    /// left-hand side in the definition site's environment.
    DefineBind { name: Value, env: Rc<Environment>, k: Rc<Cont> },
}

pub enum EvlisPhase {
    First { rest: Value },
    Rest { head: Value },
}

/// A point in the evaluator's computation. `Ok` is terminal; every other
/// variant is stepped again by `norm`.
pub enum State {
    Ok(Value),
    Eval(Value, Rc<Environment>, Rc<Cont>),
    Evlis(Value, Rc<Environment>, Rc<Cont>),
    Exec(Value, Rc<Environment>, Rc<Cont>),
    Apply(Value, Value, Rc<Environment>, Rc<Cont>),
}

/// Feeds a computed `value` into a continuation, producing the next state.
/// Implemented as a loop rather than recursion: several `Cont` frames (e.g.
/// consing a finished `Evlis` tail) just forward a value to their enclosing
/// frame without doing any further evaluation, and looping here keeps that
/// forwarding off the host call stack regardless of chain length.
pub fn resume(mut k: Rc<Cont>, mut value: Value) -> Result<State, EvalError> {
    loop {
        match &*k {
            Cont::Halt => return Ok(State::Ok(value)),

            Cont::EvalProc { args, env, k: next } => {
                return Ok(State::Apply(value, args.clone(), env.clone(), next.clone()));
            }

            Cont::ApplyArgs { proc, env, k: next } => {
                return Ok(State::Apply(proc.clone(), value, env.clone(), next.clone()));
            }

            Cont::ApplyAtomic { proc, env, k: next } => {
                let body = match proc {
                    Value::Atomic { body, .. } => *body,
                    _ => unreachable!("ApplyAtomic always wraps an Atomic"),
                };
                return match body(value.clone(), env.clone(), next.clone()) {
                    Ok(state) => Ok(state),
                    Err(err) => Err(EvalError::applying(proc, &value, err)),
                };
            }

            Cont::EvlisCons { phase: EvlisPhase::First { rest }, env, k: next } => {
                return Ok(State::Evlis(
                    rest.clone(),
                    env.clone(),
                    Rc::new(Cont::EvlisCons {
                        phase: EvlisPhase::Rest { head: value },
                        env: env.clone(),
                        k: next.clone(),
                    }),
                ));
            }
            Cont::EvlisCons { phase: EvlisPhase::Rest { head }, k: next, .. } => {
                value = Value::pair(head.clone(), value);
                k = next.clone();
            }

            Cont::ExecRest { rest, env, k: next } => {
                return Ok(State::Exec(rest.clone(), env.clone(), next.clone()));
            }

            Cont::LetBindRest { scope, name, remaining, body, k: next } => {
                scope.bind(name, value)?;
                if remaining.is_nil() {
                    return Ok(State::Exec(body.clone(), scope.clone(), next.clone()));
                }
                let binding = remaining.fst()?;
                let rest = remaining.snd()?;
                let bound_name = binding.fst()?;
                let bound_expr = binding.snd()?.fst()?;
                return Ok(State::Eval(
                    bound_expr,
                    scope.clone(),
                    Rc::new(Cont::LetBindRest {
                        scope: scope.clone(),
                        name: bound_name,
                        remaining: rest,
                        body: body.clone(),
                        k: next.clone(),
                    }),
                ));
            }

            Cont::AndRest { rest, env, k: next } => {
                if !value.to_boolean()? {
                    value = Value::boolean(false);
                    k = next.clone();
                    continue;
                }
                if rest.is_nil() {
                    value = Value::boolean(true);
                    k = next.clone();
                    continue;
                }
                let first = rest.fst()?;
                let tail = rest.snd()?;
                return Ok(State::Eval(
                    first,
                    env.clone(),
                    Rc::new(Cont::AndRest { rest: tail, env: env.clone(), k: next.clone() }),
                ));
            }

            Cont::OrRest { rest, env, k: next } => {
                if value.to_boolean()? {
                    value = Value::boolean(true);
                    k = next.clone();
                    continue;
                }
                if rest.is_nil() {
                    value = Value::boolean(false);
                    k = next.clone();
                    continue;
                }
                let first = rest.fst()?;
                let tail = rest.snd()?;
                return Ok(State::Eval(
                    first,
                    env.clone(),
                    Rc::new(Cont::OrRest { rest: tail, env: env.clone(), k: next.clone() }),
                ));
            }

            Cont::DefineBind { name, env, k: next } => {
                env.bind(name, value)?;
                value = Value::Nil;
                k = next.clone();
            }
        }
    }
}

/// Binds `head` (an abstract procedure's parameter pattern) against the
/// unevaluated `args` list in `frame`. Per the binder's resolved design: a
/// bare `Variable` head binds the whole argument list; a proper list of
/// `Variable`s requires exact arity. There is no `:rest`-tail binder.
fn bind_params(head: &Value, args: &Value, frame: &Environment) -> Result<(), EvalError> {
    match head {
        Value::Variable(_) => frame.bind(head, args.clone()),
        _ if head.is_list() => {
            let params = head.to_vec()?;
            let mut cursor = args.clone();
            for param in &params {
                match cursor {
                    Value::Pair(a, rest) => {
                        frame.bind(param, (*a).clone())?;
                        cursor = (*rest).clone();
                    }
                    _ => return Err(EvalError::arity_error("#<abstract>", params.len().to_string(), 0)),
                }
            }
            if !cursor.is_nil() {
                let extra = cursor.to_vec().map(|v| v.len()).unwrap_or(1);
                return Err(EvalError::arity_error(
                    "#<abstract>",
                    params.len().to_string(),
                    params.len() + extra,
                ));
            }
            Ok(())
        }
        other => Err(EvalError::type_error("vau", "variable or list of variables", other, 0)),
    }
}

/// A single transition of the machine.
pub fn step(state: State) -> Result<State, EvalError> {
    match state {
        State::Ok(value) => Ok(State::Ok(value)),

        State::Eval(value, env, k) => match value {
            Value::Variable(_) | Value::Constant(_) => {
                let looked_up = env.lookup(&value)?;
                resume(k, looked_up)
            }
            Value::Pair(proc_expr, args) => {
                Ok(State::Eval((*proc_expr).clone(), env.clone(), Rc::new(Cont::EvalProc {
                    args: (*args).clone(),
                    env,
                    k,
                })))
            }
            other => resume(k, other),
        },

        State::Evlis(value, env, k) => match value {
            Value::Nil => resume(k, Value::Nil),
            Value::Pair(first, rest) => Ok(State::Eval((*first).clone(), env.clone(), Rc::new(Cont::EvlisCons {
                phase: EvlisPhase::First { rest: (*rest).clone() },
                env,
                k,
            }))),
            other => Err(EvalError::not_a_list(&other)),
        },

        State::Exec(value, env, k) => match value {
            Value::Nil => resume(k, Value::Nil),
            Value::Pair(first, rest) if rest.is_nil() => Ok(State::Eval((*first).clone(), env, k)),
            Value::Pair(first, rest) => Ok(State::Eval((*first).clone(), env.clone(), Rc::new(Cont::ExecRest {
                rest: (*rest).clone(),
                env,
                k,
            }))),
            other => Err(EvalError::not_a_list(&other)),
        },

        State::Apply(proc, args, env, k) => match &proc {
            Value::Atomic { applicative, body, .. } => {
                if *applicative {
                    Ok(State::Evlis(args, env.clone(), Rc::new(Cont::ApplyAtomic {
                        proc: proc.clone(),
                        env,
                        k,
                    })))
                } else {
                    let body = *body;
                    match body(args.clone(), env.clone(), k) {
                        Ok(state) => Ok(state),
                        Err(err) => Err(EvalError::applying(&proc, &args, err)),
                    }
                }
            }
            Value::Abstract { head, body, dynamic, lexical } => {
                let child = Environment::with_parent(lexical.clone());
                let bound = bind_params(head, &args, &child)
                    .and_then(|_| child.bind(dynamic, Value::environment(env.clone())));
                match bound {
                    Ok(()) => Ok(State::Exec((**body).clone(), child, k)),
                    Err(err) => Err(EvalError::applying(&proc, &args, err)),
                }
            }
            Value::Wrap(inner) => Ok(State::Evlis(args, env.clone(), Rc::new(Cont::ApplyArgs {
                proc: (**inner).clone(),
                env,
                k,
            }))),
            other => Err(EvalError::type_error("apply", "procedure", other, 0)),
        },
    }
}

/// Drives the machine to completion, or fails with `OutOfFuel` after `quota`
/// transitions — the reification means this loop never grows the host call
/// stack with the depth of the program being evaluated.
pub fn norm(initial: State, quota: usize) -> Result<Value, EvalError> {
    let mut state = initial;
    for _ in 0..quota {
        match state {
            State::Ok(value) => return Ok(value),
            other => state = step(other)?,
        }
    }
    match state {
        State::Ok(value) => Ok(value),
        _ => Err(EvalError::OutOfFuel(quota)),
    }
}

/// Evaluates `expr` against `env` to completion under the default quota
/// protocol: a single top-level `Eval` driven by `norm`.
pub fn eval_top(expr: Value, env: Rc<Environment>, quota: usize) -> Result<Value, EvalError> {
    norm(State::Eval(expr, env, Rc::new(Cont::Halt)), quota)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::register_all;

    fn run(src: &str) -> Value {
        let env = Environment::new();
        register_all(&env);
        let expr = crate::reader::read(src).unwrap();
        eval_top(expr, env, 1000).unwrap()
    }

    #[test]
    fn test_self_evaluating_number() {
        assert_eq!(run("42"), Value::number(42.0));
    }

    #[test]
    fn test_addition() {
        assert_eq!(run("(+ 1 2 3 4)"), Value::number(10.0));
    }

    #[test]
    fn test_vau_identity() {
        assert_eq!(run("((vau (x) e x) 3)"), Value::number(3.0));
    }

    #[test]
    fn test_let_sequential_scope() {
        assert_eq!(run("(let ((x 1) (y (+ x 1))) (+ x y))"), Value::number(3.0));
    }

    #[test]
    fn test_and_short_circuits() {
        assert_eq!(run("(and True False)"), Value::boolean(false));
        assert_eq!(run("(and True True)"), Value::boolean(true));
    }

    #[test]
    fn test_or_short_circuits() {
        assert_eq!(run("(or False True)"), Value::boolean(true));
        assert_eq!(run("(or False False)"), Value::boolean(false));
    }

    #[test]
    fn test_division_by_zero_is_an_error() {
        let env = Environment::new();
        register_all(&env);
        let expr = crate::reader::read("(/ 1 0)").unwrap();
        assert!(eval_top(expr, env, 1000).is_err());
    }

    #[test]
    fn test_out_of_fuel() {
        let env = Environment::new();
        let expr = Value::number(1.0);
        let result = norm(State::Eval(expr, env, Rc::new(Cont::Halt)), 0);
        assert!(matches!(result, Err(EvalError::OutOfFuel(0))));
    }
}
