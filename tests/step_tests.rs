// ABOUTME: Integration tests for the step machine driving realistic programs to completion

use vau_lisp::builtins::register_all;
use vau_lisp::env::Environment;
use vau_lisp::error::EvalError;
use vau_lisp::reader::read;
use vau_lisp::step::eval_top;
use vau_lisp::value::Value;

fn run(src: &str) -> Value {
    let env = Environment::new();
    register_all(&env);
    eval_top(read(src).unwrap(), env, 1000).unwrap()
}

fn run_err(src: &str) -> EvalError {
    let env = Environment::new();
    register_all(&env);
    eval_top(read(src).unwrap(), env, 1000).unwrap_err()
}

#[test]
fn arithmetic_scenarios_from_the_scenario_table() {
    assert_eq!(run("(+ 1 2 3 4)"), Value::number(10.0));
    assert_eq!(run("(* 1 2 3 4)"), Value::number(24.0));
}

#[test]
fn vau_builds_an_identity_operative() {
    assert_eq!(run("((vau (x) e x) 3)"), Value::number(3.0));
}

#[test]
fn unwrap_wrap_preserves_procedure_identity() {
    // `(unwrap (wrap p))` behaves exactly like `p` itself: since `p` is an
    // operative, its operand is captured raw, not evaluated.
    assert_eq!(
        run("(let ((p (vau (x) e x))) ((unwrap (wrap p)) (+ 1 2)))"),
        read("(+ 1 2)").unwrap()
    );
}

#[test]
fn let_bindings_see_earlier_bindings_in_the_same_form() {
    assert_eq!(run("(let ((x 1) (y 2)) (+ x y))"), Value::number(3.0));
}

#[test]
fn strings_round_trip_through_print_and_read() {
    let value = Value::string("hello world");
    let printed = format!("{value}");
    assert_eq!(printed, "\"hello world\"");
    assert_eq!(vau_lisp::reader::read(&printed).unwrap(), value);
}

#[test]
fn division_by_zero_is_a_division_by_zero_error() {
    assert!(matches!(run_err("(/ 1 0)"), EvalError::Applying { .. }));
}

#[test]
fn a_whole_small_program_defines_and_calls_a_function() {
    let env = Environment::new();
    register_all(&env);
    let forms =
        vau_lisp::reader::read_all("(define add1 (wrap (vau (x) e (+ x 1)))) (add1 41)").unwrap();
    let mut last = Value::Nil;
    for form in forms {
        last = eval_top(form, env.clone(), 1000).unwrap();
    }
    assert_eq!(last, Value::number(42.0));
}

#[test]
fn redefining_a_variable_in_the_same_frame_errors() {
    let env = Environment::new();
    register_all(&env);
    let forms = vau_lisp::reader::read_all("(define x 1) (define x 2)").unwrap();
    let mut result = Ok(Value::Nil);
    for form in forms {
        result = eval_top(form, env.clone(), 1000);
    }
    assert!(matches!(result, Err(EvalError::RedefinedVariable(_))));
}
