// ABOUTME: The reader — parses source text into Values per the grammar in spec.md §6

use crate::error::EvalError;
use crate::value::Value;
use nom::branch::alt;
use nom::bytes::complete::take_while1;
use nom::character::complete::{anychar, char, multispace0, none_of};
use nom::combinator::recognize;
use nom::multi::many0;
use nom::sequence::{delimited, preceded};
use nom::{Finish, IResult, Parser};

fn is_atom_char(c: char) -> bool {
    !c.is_whitespace() && c != '(' && c != ')' && c != '"'
}

/// A string literal's contents are scanned verbatim: `\"` and `\\` are
/// recognized as two-character escapes so an embedded quote doesn't end the
/// literal early, but the stored `Value::String` keeps them un-interpreted
/// (matching the printer contract's note that round-tripping only holds for
/// quote-free strings).
fn string_literal(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('"')(input)?;
    let (input, content) = recognize(many0(alt((
        recognize((char('\\'), anychar)),
        recognize(none_of("\"\\")),
    ))))
    .parse(input)?;
    let (input, _) = char('"')(input)?;
    Ok((input, Value::string(content)))
}

fn classify_atom(text: &str) -> Result<Value, EvalError> {
    if text.starts_with("#<") {
        return Err(EvalError::ReadError(format!("unreadable lexeme: {text}")));
    }
    if let Ok(n) = text.parse::<f64>() {
        return Ok(Value::number(n));
    }
    if let Some(rest) = text.strip_prefix(':') {
        return Ok(Value::keyword(format!(":{rest}")));
    }
    let first = text.chars().next().expect("take_while1 guarantees non-empty");
    if first.is_ascii_uppercase() {
        Ok(Value::constant(text))
    } else {
        Ok(Value::variable(text))
    }
}

fn atom(input: &str) -> IResult<&str, Value> {
    let (input, text) = take_while1(is_atom_char)(input)?;
    match classify_atom(text) {
        Ok(value) => Ok((input, value)),
        Err(_) => Err(nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Verify))),
    }
}

fn list(input: &str) -> IResult<&str, Value> {
    let (input, _) = char('(')(input)?;
    let (input, items) = many0(preceded(multispace0, datum)).parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')')(input)?;
    Ok((input, Value::from_vec(items)))
}

fn datum(input: &str) -> IResult<&str, Value> {
    alt((list, string_literal, atom)).parse(input)
}

/// Reads exactly one datum, failing if there is anything left over besides
/// trailing whitespace.
pub fn read(input: &str) -> Result<Value, EvalError> {
    let (rest, value) = delimited(multispace0, datum, multispace0)
        .parse(input)
        .finish()
        .map_err(|e: nom::error::Error<&str>| EvalError::ReadError(e.to_string()))?;
    if !rest.is_empty() {
        return Err(EvalError::ReadError(format!("unexpected trailing input: {rest:?}")));
    }
    Ok(value)
}

/// Reads every top-level datum in `input`, in order — used by the batch
/// script runner to load a whole file against one persistent environment.
pub fn read_all(input: &str) -> Result<Vec<Value>, EvalError> {
    let mut remaining = input;
    let mut forms = Vec::new();
    loop {
        let (rest, _) = multispace0::<&str, nom::error::Error<&str>>(remaining)
            .finish()
            .map_err(|e| EvalError::ReadError(e.to_string()))?;
        if rest.is_empty() {
            return Ok(forms);
        }
        let (rest, value) = datum(rest)
            .finish()
            .map_err(|e: nom::error::Error<&str>| EvalError::ReadError(e.to_string()))?;
        forms.push(value);
        remaining = rest;
    }
}
