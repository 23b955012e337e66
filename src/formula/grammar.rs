use winnow::ascii::{digit0, digit1};
use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat};
use winnow::error::{ModalResult, StrContext, StrContextValue};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use super::ast::{ArithOp, Formula};

// -- Whitespace -------------------------------------------------------------

fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

// -- Literals ---------------------------------------------------------------

fn number(input: &mut &str) -> ModalResult<Formula> {
    alt(((digit1, opt(('.', digit0))).take(), ('.', digit1).take()))
        .try_map(|s: &str| s.parse::<f64>())
        .map(Formula::Number)
        .context(StrContext::Expected(StrContextValue::Description("number")))
        .parse_next(input)
}

// -- Expressions (precedence: + - < * / < unary < primary) ------------------

fn primary(input: &mut &str) -> ModalResult<Formula> {
    ws.parse_next(input)?;
    alt((delimited('(', expr, (ws, cut_err(')'))), number))
        .context(StrContext::Expected(StrContextValue::Description(
            "number or '('",
        )))
        .parse_next(input)
}

// Sign chains are folded in a loop so `----1` does not recurse.
fn unary(input: &mut &str) -> ModalResult<Formula> {
    let mut negate = false;
    loop {
        ws.parse_next(input)?;
        match opt(one_of(['+', '-'])).parse_next(input)? {
            Some('-') => negate = !negate,
            Some(_) => {}
            None => break,
        }
    }
    let operand = primary(input)?;
    Ok(if negate {
        Formula::Neg(Box::new(operand))
    } else {
        operand
    })
}

fn mul_op(input: &mut &str) -> ModalResult<ArithOp> {
    preceded(
        ws,
        alt(('*'.value(ArithOp::Mul), '/'.value(ArithOp::Div))),
    )
    .parse_next(input)
}

fn add_op(input: &mut &str) -> ModalResult<ArithOp> {
    preceded(
        ws,
        alt(('+'.value(ArithOp::Add), '-'.value(ArithOp::Sub))),
    )
    .parse_next(input)
}

fn term(input: &mut &str) -> ModalResult<Formula> {
    let first = unary(input)?;
    let rest: Vec<(ArithOp, Formula)> = repeat(0.., (mul_op, cut_err(unary))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, (op, rhs)| Formula::binary(op, acc, rhs)))
}

fn expr(input: &mut &str) -> ModalResult<Formula> {
    let first = term(input)?;
    let rest: Vec<(ArithOp, Formula)> = repeat(0.., (add_op, cut_err(term))).parse_next(input)?;
    Ok(rest
        .into_iter()
        .fold(first, |acc, (op, rhs)| Formula::binary(op, acc, rhs)))
}

// -- Top-level parser -------------------------------------------------------

pub(crate) fn formula(input: &mut &str) -> ModalResult<Formula> {
    let parsed = expr(input)?;
    ws.parse_next(input)?;
    Ok(parsed)
}
