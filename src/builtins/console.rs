//! Console output: print!
//!
//! Joins the printed form of each (already-evaluated) argument with a
//! single space, writes it to stdout followed by a newline, and returns
//! `Nil`.

use crate::env::Environment;
use crate::error::EvalError;
use crate::step::{resume, Cont, State};
use crate::value::Value;
use std::rc::Rc;

fn print_bang(args: Value, _env: Rc<Environment>, k: Rc<Cont>) -> Result<State, EvalError> {
    let items = args.to_vec()?;
    let text = items.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(" ");
    println!("{text}");
    resume(k, Value::Nil)
}

/// Registers `print!` in `env`.
pub fn register(env: &Rc<Environment>) {
    env.bind(
        &Value::variable("print!"),
        Value::Atomic {
            name: "print!".to_string(),
            signature: "(print! e1 e2 ...)".to_string(),
            applicative: true,
            body: print_bang,
        },
    )
    .expect("builtin name already bound");
}
