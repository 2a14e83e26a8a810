//! Built-in procedures, grouped by category and registered into a fresh
//! environment by [`register_all`].
//!
//! - **[arithmetic]**: +, *, -, /
//! - **[lists]**: list, list*, fst, snd
//! - **[logic]**: and, or, not
//! - **[console]**: print!
//! - **[binders]**: define, let, vau, wrap, unwrap, eval

mod arithmetic;
mod binders;
mod console;
mod lists;
mod logic;

use crate::env::Environment;
use std::rc::Rc;

/// Registers every built-in procedure in `env`.
pub fn register_all(env: &Rc<Environment>) {
    arithmetic::register(env);
    lists::register(env);
    logic::register(env);
    console::register(env);
    binders::register(env);
}
