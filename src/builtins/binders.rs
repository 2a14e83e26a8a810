//! Binding and abstraction forms: define, let, vau, wrap, unwrap, eval
//!
//! `define`, `let`, and `vau` are operatives — they need their operand list
//! raw, either to avoid evaluating a left-hand-side symbol (`define`) or to
//! build a procedure that captures an unevaluated body (`vau`). `wrap`,
//! `unwrap`, and `eval` are applicatives.

use crate::env::Environment;
use crate::error::EvalError;
use crate::step::{resume, Cont, State};
use crate::value::Value;
use std::rc::Rc;

/// `(define LHS RHS)` — evaluates `RHS` in the call-site environment, then
/// binds it to `LHS` in that same environment. Returns `Nil`.
fn define(args: Value, env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let name = args.fst()?;
    let rhs = args.snd()?.fst()?;
    Ok(State::Eval(rhs, env.clone(), Rc::new(Cont::DefineBind { name, env, k })))
}

/// `(let ((NAME EXPR) ...) BODY...)` — evaluates each `EXPR` left to right
/// in a scope that accumulates the preceding bindings (so later bindings
/// may refer to earlier ones), then executes `BODY` in that scope.
fn bind_let(args: Value, env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let bindings = args.fst()?;
    let body = args.snd()?;
    let scope = Environment::with_parent(env);
    if bindings.is_nil() {
        return Ok(State::Exec(body, scope, k));
    }
    let binding = bindings.fst()?;
    let remaining = bindings.snd()?;
    let name = binding.fst()?;
    let expr = binding.snd()?.fst()?;
    Ok(State::Eval(
        expr,
        scope.clone(),
        Rc::new(Cont::LetBindRest { scope, name, remaining, body, k }),
    ))
}

/// `(vau HEAD DYNAMIC BODY...)` — builds an `Abstract` procedure capturing
/// the current environment as its lexical scope.
fn vau(args: Value, env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let head = args.fst()?;
    let rest = args.snd()?;
    let dynamic = rest.fst()?;
    let body = rest.snd()?;
    resume(
        k,
        Value::Abstract {
            head: Rc::new(head),
            body: Rc::new(body),
            dynamic: Rc::new(dynamic),
            lexical: env,
        },
    )
}

/// `(wrap PROC)` — an applicative; evaluates `PROC` (implicitly, since
/// `wrap` itself is applicative) and returns it wrapped so that applying
/// the result evaluates its own arguments first.
fn wrap(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let proc = args.fst()?;
    resume(k, Value::wrap(proc))
}

/// `(unwrap PROC)` — the left inverse of `wrap`; errors if `PROC` is not a
/// `Wrap`.
fn unwrap(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let wrapped = args.fst()?;
    resume(k, wrapped.to_wrap()?)
}

/// `(eval EXPR [ENV])` — evaluates `EXPR` (already a concrete value, since
/// `eval` is applicative) in `ENV` if given, else in the current
/// environment — the environment this call to `eval` was itself made in.
fn eval(args: Value, env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let expr = args.fst()?;
    let rest = args.snd()?;
    let target = if rest.is_nil() { env } else { rest.fst()?.to_environment()? };
    Ok(State::Eval(expr, target, k))
}

fn operative(name: &str, signature: &str, body: crate::value::AtomicBody) -> Value {
    Value::Atomic { name: name.to_string(), signature: signature.to_string(), applicative: false, body }
}

fn applicative(name: &str, signature: &str, body: crate::value::AtomicBody) -> Value {
    Value::Atomic { name: name.to_string(), signature: signature.to_string(), applicative: true, body }
}

/// Registers `define`, `let`, `vau`, `wrap`, `unwrap`, `eval` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.bind(&Value::variable("define"), operative("define", "(define lhs rhs)", define))
        .expect("builtin name already bound");
    env.bind(&Value::variable("let"), operative("let", "(let ((name expr) ...) body ...)", bind_let))
        .expect("builtin name already bound");
    env.bind(&Value::variable("vau"), operative("vau", "(vau head dynamic body ...)", vau))
        .expect("builtin name already bound");
    env.bind(&Value::variable("wrap"), applicative("wrap", "(wrap proc)", wrap))
        .expect("builtin name already bound");
    env.bind(&Value::variable("unwrap"), applicative("unwrap", "(unwrap proc)", unwrap))
        .expect("builtin name already bound");
    env.bind(&Value::variable("eval"), applicative("eval", "(eval expr [env])", eval))
        .expect("builtin name already bound");
}
