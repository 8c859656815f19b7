use super::*;
use crate::ast::Op;
use crate::combinator::{number, one_of, string};

static EXPRESSION: Lazy<Parser<Expr>> = Lazy::new(term);

/* Expressions */
/// Parses any expression.
pub fn expression() -> Parser<Expr> {
    EXPRESSION.clone()
}

/// `term := factor (("+" | "-") factor)*`
fn term() -> Parser<Expr> {
    binary_layer(factor(), operator("+", Op::Add).or(operator("-", Op::Sub)))
}

/// `factor := unary (("*" | "/") unary)*`
fn factor() -> Parser<Expr> {
    binary_layer(unary(), operator("*", Op::Mul).or(operator("/", Op::Div)))
}

/// Parses `operand (operator operand)*` and folds it to the left, so `1 - 2 - 3` is
/// `(1 - 2) - 3`.
fn binary_layer(operand: Parser<Expr>, operator: Parser<Op>) -> Parser<Expr> {
    operand
        .clone()
        .then(operator.then(operand).many0())
        .map(|(first, rest)| {
            rest.into_iter().fold(first, |lhs, (op, rhs)| Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            })
        })
}

fn operator(tag: &'static str, op: Op) -> Parser<Op> {
    symbol(tag).map(move |_| op)
}

/// `unary := ("!" | "-")* call`
/// Prefix operators fold to the right: `--1` is `-(-1)`.
fn unary() -> Parser<Expr> {
    let prefix = operator("!", Op::Not).or(operator("-", Op::Sub));
    prefix.many0().then(call()).map(|(ops, operand)| {
        ops.into_iter().rev().fold(operand, |arg, op| Expr::Unary {
            op,
            arg: Box::new(arg),
        })
    })
}

/* Expressions.Call */
/// `call := identifier "(" arguments ")" | primary`
/// The call branch has to come first, otherwise `foo` would be taken as a plain identifier.
fn call() -> Parser<Expr> {
    ident()
        .then(surround(
            symbol("("),
            comma_separated(lazy(expression)),
            symbol(")"),
        ))
        .map(|(callee, args)| Expr::FnCall { callee, args })
        .or(primary())
}

/// `primary := number | string | boolean | identifier | "(" expression ")"`
fn primary() -> Parser<Expr> {
    one_of([
        number_lit(),
        string_lit(),
        bool_lit(),
        ident().map(Expr::Identifier),
        surround(symbol("("), lazy(expression), symbol(")"))
            .map(|inner| Expr::Grouping(Box::new(inner))),
    ])
}

/* Expressions.Literals */
/// `[0-9]+ ("." [0-9]+)?`
fn number_lit() -> Parser<Expr> {
    number()
        .then(right(literal("."), number()).optional())
        .map(|(int, frac)| match frac {
            Some(frac) => Expr::NumberLit(format!("{}.{}", int, frac)),
            None => Expr::NumberLit(int),
        })
        .strip_ws()
}

fn string_lit() -> Parser<Expr> {
    // the primitive keeps the quotes
    string()
        .map(|quoted| Expr::StringLit(quoted[1..quoted.len() - 1].to_string()))
        .strip_ws()
}

fn bool_lit() -> Parser<Expr> {
    keyword("true")
        .map(|_| Expr::BoolLit(true))
        .or(keyword("false").map(|_| Expr::BoolLit(false)))
}
