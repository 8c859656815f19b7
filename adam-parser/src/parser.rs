//! Recursive descent grammar built from [`crate::combinator`].
//!
//! Productions are layered from lowest to highest precedence and each layer falls back to the
//! next tighter one. Every recursive reference goes through [`lazy`] and only happens after at
//! least one token has been consumed, so no production is left-recursive.

mod expr;
mod stmt;

pub use expr::expression;
pub use stmt::{block, function, params, statement};

use crate::ast::{Expr, Function, Ident};
use crate::combinator::{identifier, lazy, literal, right, surround, Failure, Parser, Success};
use adam_source::{Source, SyntaxError};
use once_cell::sync::Lazy;

/// Words that can never be used as identifiers.
pub const KEYWORDS: &[&str] = &["fn", "let", "return", "if", "else", "true", "false"];

static PROGRAM: Lazy<Parser<Vec<Function>>> = Lazy::new(|| function().many0());

/// Parses a whole program: any number of functions followed by the end of input.
/// Parsing is all-or-nothing: leftover text after the last function is an error.
pub fn parse_program(source: &Source) -> Result<Vec<Function>, SyntaxError> {
    parse_all(&PROGRAM, source, "Expected a function declaration")
}

/// Parses a single expression spanning all of `source`.
pub fn parse_expr(source: &Source) -> Result<Expr, SyntaxError> {
    parse_all(&expression(), source, "Unexpected input after expression")
}

/// Runs `parser` and requires that only whitespace or comments remain.
fn parse_all<T: 'static>(
    parser: &Parser<T>,
    source: &Source,
    message: &str,
) -> Result<T, SyntaxError> {
    let parsed = parser
        .parse(source.content)
        .map_err(|failure| source.syntax_error(message, failure.remaining))?;

    match end_of_input().parse(parsed.remaining) {
        Ok(_) => Ok(parsed.value),
        Err(_) => Err(source.syntax_error(message, skip_trivia(parsed.remaining))),
    }
}

/* Parse utilities */

fn end_of_input() -> Parser<()> {
    Parser::new(|input| {
        if input.is_empty() {
            Ok(Success::new(input, ()))
        } else {
            Err(Failure::new(input))
        }
    })
    .strip_ws()
}

/// Returns `input` with leading whitespace and comments removed.
fn skip_trivia(input: &str) -> &str {
    Parser::new(|input| Ok(Success::new(input, ())))
        .strip_ws()
        .parse(input)
        .map_or(input, |skipped| skipped.remaining)
}

/// A punctuation or operator token, with leading whitespace stripped.
fn symbol(tag: &'static str) -> Parser<&'static str> {
    literal(tag).strip_ws()
}

/// A keyword. Unlike [`symbol`], `kw` must not be followed by an identifier character, so
/// `iffy` does not start with the keyword `if`.
fn keyword(kw: &'static str) -> Parser<&'static str> {
    let tag = literal(kw);
    Parser::new(move |input| match tag.parse(input) {
        Ok(success) if !success.remaining.starts_with(is_ident_char) => Ok(success),
        _ => Err(Failure::new(input)),
    })
    .strip_ws()
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// An identifier that is not a keyword.
fn ident() -> Parser<Ident> {
    identifier()
        .verify(|name| !KEYWORDS.contains(&name.as_str()))
        .map(Ident)
        .strip_ws()
}

/// `(item ("," item)* ","?)?` - a possibly empty list with an optional trailing comma.
fn comma_separated<T: 'static>(item: Parser<T>) -> Parser<Vec<T>> {
    item.clone()
        .then(right(symbol(","), item).many0())
        .skip(symbol(",").optional())
        .map(|(first, rest)| {
            let mut items = Vec::with_capacity(rest.len() + 1);
            items.push(first);
            items.extend(rest);
            items
        })
        .optional()
        .map(Option::unwrap_or_default)
}
