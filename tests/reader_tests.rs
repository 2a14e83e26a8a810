// ABOUTME: Integration tests for the reader against realistic multi-form sources

use vau_lisp::reader::{read, read_all};
use vau_lisp::value::Value;

#[test]
fn reads_a_small_program() {
    let forms = read_all(
        r#"
        (define square (vau (x) e (* x x)))
        (square 5)
        "#,
    )
    .unwrap();
    assert_eq!(forms.len(), 2);
    assert!(forms[0].is_list());
    assert!(forms[1].is_list());
}

#[test]
fn reads_mixed_atom_kinds_in_one_list() {
    let value = read("(define x :none True 3.5 \"hi\")").unwrap();
    let items = value.to_vec().unwrap();
    assert_eq!(items[0], Value::variable("define"));
    assert_eq!(items[1], Value::variable("x"));
    assert_eq!(items[2], Value::keyword(":none"));
    assert_eq!(items[3], Value::constant("True"));
    assert_eq!(items[4], Value::number(3.5));
    assert_eq!(items[5], Value::string("hi"));
}

#[test]
fn rejects_unreadable_procedure_token_inside_a_list() {
    assert!(read("(list #<procedure>)").is_err());
}

#[test]
fn whitespace_around_parens_is_insignificant() {
    let tight = read("(+(1)(2))").unwrap();
    let loose = read("(+ (1) (2))").unwrap();
    assert_eq!(tight, loose);
}
