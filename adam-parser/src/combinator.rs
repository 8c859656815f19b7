//! Parser combinators over a string cursor.
//!
//! A [`Parser`] is a pure function from the remaining input to either a [`Success`] (the new
//! remaining input and a value) or a [`Failure`]. A failing parser always hands back the exact
//! input it was given, which is what lets [`Parser::or`] retry an alternative from the same
//! position.
//!
//! Whitespace is never skipped implicitly. Use [`Parser::strip_ws`] on every production that may
//! be preceded by blank space.

use std::cell::Cell;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

/// A successful parse: the unconsumed input and the produced value.
#[derive(Debug, Clone, PartialEq)]
pub struct Success<'i, T> {
    pub remaining: &'i str,
    pub value: T,
}

impl<'i, T> Success<'i, T> {
    pub fn new(remaining: &'i str, value: T) -> Self {
        Self { remaining, value }
    }

    /// Transforms the value, keeping the remaining input.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Success<'i, U> {
        Success {
            remaining: self.remaining,
            value: f(self.value),
        }
    }
}

/// A failed parse. Carries the input the parser was invoked with, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failure<'i> {
    pub remaining: &'i str,
}

impl<'i> Failure<'i> {
    pub fn new(remaining: &'i str) -> Self {
        Self { remaining }
    }
}

pub type ParseResult<'i, T> = Result<Success<'i, T>, Failure<'i>>;

type ParseFn<T> = dyn for<'i> Fn(&'i str) -> ParseResult<'i, T> + Send + Sync;

/// An immutable, cheaply clonable parser producing values of type `T`.
pub struct Parser<T> {
    parse_fn: Arc<ParseFn<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            parse_fn: Arc::clone(&self.parse_fn),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

impl<T: 'static> Parser<T> {
    /// Wraps a parse function.
    /// The function must return [`Failure`] with its own input when it does not match.
    pub fn new<F>(parse_fn: F) -> Self
    where
        F: for<'i> Fn(&'i str) -> ParseResult<'i, T> + Send + Sync + 'static,
    {
        Self {
            parse_fn: Arc::new(parse_fn),
        }
    }

    pub fn parse<'i>(&self, input: &'i str) -> ParseResult<'i, T> {
        (self.parse_fn)(input)
    }

    pub fn map<U, F>(self, f: F) -> Parser<U>
    where
        U: 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        Parser::new(move |input| self.parse(input).map(|success| success.map(&f)))
    }

    /// Runs `self`, then `next` on the remainder. If either fails, the whole sequence fails
    /// with the input given to `self`.
    pub fn then<U: 'static>(self, next: Parser<U>) -> Parser<(T, U)> {
        Parser::new(move |input| {
            let first = self.parse(input).map_err(|_| Failure::new(input))?;
            let second = next
                .parse(first.remaining)
                .map_err(|_| Failure::new(input))?;
            Ok(Success::new(second.remaining, (first.value, second.value)))
        })
    }

    /// Ordered alternation: `other` only runs if `self` fails, and it sees the same input.
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        Parser::new(move |input| {
            self.parse(input)
                .or_else(|_| other.parse(input))
                .map_err(|_| Failure::new(input))
        })
    }

    /// Zero or more repetitions. Never fails.
    pub fn many0(self) -> Parser<Vec<T>> {
        Parser::new(move |input| Ok(self.repeat(input, Vec::new())))
    }

    /// One or more repetitions.
    pub fn many1(self) -> Parser<Vec<T>> {
        Parser::new(move |input| {
            let first = self.parse(input).map_err(|_| Failure::new(input))?;
            Ok(self.repeat(first.remaining, vec![first.value]))
        })
    }

    fn repeat<'i>(&self, mut remaining: &'i str, mut values: Vec<T>) -> Success<'i, Vec<T>> {
        while let Ok(success) = self.parse(remaining) {
            // a match that consumes nothing would match forever
            if success.remaining.len() == remaining.len() {
                break;
            }
            remaining = success.remaining;
            values.push(success.value);
        }
        Success::new(remaining, values)
    }

    /// Always succeeds, with `None` (and nothing consumed) if `self` fails.
    pub fn optional(self) -> Parser<Option<T>> {
        Parser::new(move |input| {
            Ok(match self.parse(input) {
                Ok(success) => success.map(Some),
                Err(_) => Success::new(input, None),
            })
        })
    }

    /// Fails unless the parsed value satisfies `predicate`.
    pub fn verify<F>(self, predicate: F) -> Parser<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Parser::new(move |input| match self.parse(input) {
            Ok(success) if predicate(&success.value) => Ok(success),
            _ => Err(Failure::new(input)),
        })
    }

    /// Method form of [`left`].
    pub fn skip<U: 'static>(self, other: Parser<U>) -> Parser<T> {
        left(self, other)
    }

    /// Skips leading whitespace and `//` line comments before running `self`.
    pub fn strip_ws(self) -> Parser<T> {
        right(TRIVIA.clone(), self)
    }
}

/// Sequence two parsers, keeping both values.
pub fn pair<L: 'static, R: 'static>(left: Parser<L>, right: Parser<R>) -> Parser<(L, R)> {
    left.then(right)
}

/// Sequence two parsers, keeping the value of the first.
pub fn left<L: 'static, R: 'static>(left: Parser<L>, right: Parser<R>) -> Parser<L> {
    left.then(right).map(|(value, _)| value)
}

/// Sequence two parsers, keeping the value of the second.
pub fn right<L: 'static, R: 'static>(left: Parser<L>, right: Parser<R>) -> Parser<R> {
    left.then(right).map(|(_, value)| value)
}

/// Sequence three parsers, keeping only the middle value.
pub fn surround<L: 'static, M: 'static, R: 'static>(
    open: Parser<L>,
    middle: Parser<M>,
    close: Parser<R>,
) -> Parser<M> {
    right(open, left(middle, close))
}

/// Ordered alternation over a list of parsers. The first match wins.
pub fn one_of<T: 'static>(parsers: impl IntoIterator<Item = Parser<T>>) -> Parser<T> {
    let parsers: Vec<Parser<T>> = parsers.into_iter().collect();
    Parser::new(move |input| {
        parsers
            .iter()
            .find_map(|parser| parser.parse(input).ok())
            .ok_or(Failure::new(input))
    })
}

/// How many [`lazy`] parsers may be active at once on one thread. Input nested deeper than
/// this fails to parse instead of exhausting the stack.
pub const MAX_DEPTH: usize = 200;

thread_local! {
    static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Counts one level of [`lazy`] nesting for as long as it is alive.
struct DepthGuard;

impl DepthGuard {
    fn enter() -> Option<Self> {
        DEPTH.with(|depth| {
            if depth.get() >= MAX_DEPTH {
                None
            } else {
                depth.set(depth.get() + 1);
                Some(DepthGuard)
            }
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Defers building the parser until it is invoked.
/// Recursive productions must refer to themselves through `lazy`, which fails once
/// [`MAX_DEPTH`] levels are active.
pub fn lazy<T: 'static>(build: fn() -> Parser<T>) -> Parser<T> {
    Parser::new(move |input| match DepthGuard::enter() {
        Some(_guard) => build().parse(input),
        None => Err(Failure::new(input)),
    })
}

/* Primitives */

/// Matches `tag` exactly.
pub fn literal(tag: &'static str) -> Parser<&'static str> {
    Parser::new(move |input| match input.strip_prefix(tag) {
        Some(remaining) => Ok(Success::new(remaining, tag)),
        None => Err(Failure::new(input)),
    })
}

/// Creates a lazily compiled regex. Every pattern must be anchored with `^`.
macro_rules! anchored_regex {
    ($name: ident, $pattern: literal) => {
        static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($pattern).expect(concat!("invalid regex ", $pattern)));
    };
}

anchored_regex!(IDENTIFIER, r"^[A-Za-z_][A-Za-z0-9_]*");
anchored_regex!(NUMBER, r"^[0-9]+");
anchored_regex!(STRING, r#"(?s)^"(?:[^"\\]|\\[nrt0\\"'])*""#);
anchored_regex!(WHITESPACE, r"^[ \t\r\n]+");
anchored_regex!(LINE_COMMENT, r"^//[^\n]*");

static TRIVIA: Lazy<Parser<Vec<String>>> = Lazy::new(|| whitespace().or(line_comment()).many0());

fn regex_parser(regex: &'static Lazy<Regex>) -> Parser<String> {
    Parser::new(move |input| match regex.find(input) {
        Some(found) => Ok(Success::new(
            &input[found.end()..],
            found.as_str().to_string(),
        )),
        None => Err(Failure::new(input)),
    })
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn identifier() -> Parser<String> {
    regex_parser(&IDENTIFIER)
}

/// A maximal run of decimal digits.
pub fn number() -> Parser<String> {
    regex_parser(&NUMBER)
}

/// A double-quoted string, including the quotes. Only the escapes `\n \r \t \0 \\ \" \'` are
/// accepted. They are skipped over, not decoded.
pub fn string() -> Parser<String> {
    regex_parser(&STRING)
}

/// A maximal run of blanks, tabs and newlines.
pub fn whitespace() -> Parser<String> {
    regex_parser(&WHITESPACE)
}

fn line_comment() -> Parser<String> {
    regex_parser(&LINE_COMMENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok<T>(remaining: &str, value: T) -> ParseResult<'_, T> {
        Ok(Success::new(remaining, value))
    }

    #[test]
    fn test_literal() {
        assert_eq!(literal("fn").parse("fn main"), ok(" main", "fn"));
        assert_eq!(literal("fn").parse("f main"), Err(Failure::new("f main")));
    }

    #[test]
    fn test_identifier_maximal_prefix() {
        assert_eq!(
            identifier().parse("foo_bar1 + 2"),
            ok(" + 2", "foo_bar1".to_string())
        );
        assert_eq!(identifier().parse("_x(1)"), ok("(1)", "_x".to_string()));
        assert_eq!(identifier().parse("1abc"), Err(Failure::new("1abc")));
        assert_eq!(identifier().parse(" abc"), Err(Failure::new(" abc")));
    }

    #[test]
    fn test_number() {
        assert_eq!(number().parse("100"), ok("", "100".to_string()));
        assert_eq!(number().parse("12.5"), ok(".5", "12".to_string()));
        assert_eq!(number().parse("x"), Err(Failure::new("x")));
    }

    #[test]
    fn test_string() {
        assert_eq!(
            string().parse(r#""This is a string";"#),
            ok(";", r#""This is a string""#.to_string())
        );
        assert_eq!(
            string().parse(r#""say \"hi\"" rest"#),
            ok(" rest", r#""say \"hi\"""#.to_string())
        );
        assert_eq!(string().parse(r#""unterminated"#), Err(Failure::new(r#""unterminated"#)));
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            string().parse(r#""a\n\t\\ \'\0""#),
            ok("", r#""a\n\t\\ \'\0""#.to_string())
        );
        assert_eq!(string().parse(r#""\q""#), Err(Failure::new(r#""\q""#)));
        assert_eq!(string().parse(r#""\x41""#), Err(Failure::new(r#""\x41""#)));
    }

    #[test]
    fn test_whitespace() {
        assert_eq!(whitespace().parse(" \t\n x"), ok("x", " \t\n ".to_string()));
        assert!(whitespace().parse("x").is_err());
    }

    #[test]
    fn test_map() {
        let len = identifier().map(|ident| ident.len());
        assert_eq!(len.parse("abc def"), ok(" def", 3));
        assert_eq!(len.parse("1"), Err(Failure::new("1")));
    }

    #[test]
    fn test_then_failure_returns_original_input() {
        let seq = literal("a").then(literal("b"));
        assert_eq!(seq.parse("abc"), ok("c", ("a", "b")));
        // `a` matched but `b` did not: nothing may be consumed
        assert_eq!(seq.parse("acb"), Err(Failure::new("acb")));
        assert_eq!(pair(literal("a"), literal("b")).parse("ab"), ok("", ("a", "b")));
    }

    #[test]
    fn test_or_does_not_leak_consumption() {
        // left consumes `ab` before failing on `d`
        let left = literal("a").then(literal("b")).then(literal("d")).map(|_| "abd");
        let right = literal("abc");
        let alt = left.or(right);
        assert_eq!(alt.parse("abc!"), ok("!", "abc"));
        assert_eq!(alt.parse("xyz"), Err(Failure::new("xyz")));
    }

    #[test]
    fn test_or_first_match_wins() {
        let alt = literal("a").or(literal("ab"));
        assert_eq!(alt.parse("ab"), ok("b", "a"));
        let alt = one_of(vec![literal("x"), literal("a"), literal("ab")]);
        assert_eq!(alt.parse("ab"), ok("b", "a"));
    }

    #[test]
    fn test_many0() {
        let numbers = number().strip_ws().many0();
        assert_eq!(
            numbers.parse("123 321 1 2 3"),
            ok("", vec!["123", "321", "1", "2", "3"].into_iter().map(String::from).collect::<Vec<_>>())
        );
        assert_eq!(numbers.parse("abc"), ok("abc", Vec::new()));
    }

    #[test]
    fn test_many0_stops_without_progress() {
        let empty = literal("x").optional().many0();
        assert_eq!(empty.parse("abc"), ok("abc", Vec::new()));
    }

    #[test]
    fn test_many1() {
        let xs = literal("x").many1();
        assert_eq!(xs.parse("xxy"), ok("y", vec!["x", "x"]));
        assert_eq!(xs.parse("y"), Err(Failure::new("y")));
    }

    #[test]
    fn test_optional() {
        let maybe = literal("-").optional();
        assert_eq!(maybe.parse("-1"), ok("1", Some("-")));
        assert_eq!(maybe.parse("1"), ok("1", None));
    }

    #[test]
    fn test_left_right_surround() {
        assert_eq!(left(literal("a"), literal(",")).parse("a,b"), ok("b", "a"));
        assert_eq!(right(literal("("), literal("a")).parse("(a)"), ok(")", "a"));
        assert_eq!(
            surround(literal("("), identifier(), literal(")")).parse("(abc)!"),
            ok("!", "abc".to_string())
        );
        assert_eq!(
            surround(literal("("), identifier(), literal(")")).parse("(abc!"),
            Err(Failure::new("(abc!"))
        );
        assert_eq!(literal("a").skip(literal(";")).parse("a;"), ok("", "a"));
    }

    #[test]
    fn test_strip_ws() {
        let ident = identifier().strip_ws();
        assert_eq!(ident.parse("  \n foo"), ok("", "foo".to_string()));
        assert_eq!(ident.parse("foo"), ok("", "foo".to_string()));
        assert_eq!(
            ident.parse("// a comment\n  foo // trailing"),
            ok(" // trailing", "foo".to_string())
        );
        // failure hands back the input including the skipped whitespace
        assert_eq!(ident.parse("  1"), Err(Failure::new("  1")));
    }

    #[test]
    fn test_verify() {
        let short = identifier().verify(|ident| ident.len() < 4);
        assert_eq!(short.parse("abc"), ok("", "abc".to_string()));
        assert_eq!(short.parse("abcd"), Err(Failure::new("abcd")));
    }

    fn nested() -> Parser<usize> {
        surround(literal("("), lazy(nested), literal(")"))
            .map(|depth| depth + 1)
            .or(literal("x").map(|_| 0))
    }

    #[test]
    fn test_lazy() {
        assert_eq!(nested().parse("((x))"), ok("", 2));
        assert_eq!(nested().parse("((x)"), Err(Failure::new("((x)")));
    }

    #[test]
    fn test_lazy_depth_limit() {
        let at_limit = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_eq!(nested().parse(&at_limit), ok("", MAX_DEPTH));

        let too_deep = format!("{}x{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert_eq!(nested().parse(&too_deep), Err(Failure::new(too_deep.as_str())));

        // the counter is released after a failure
        assert_eq!(nested().parse("((x))"), ok("", 2));
    }

    #[test]
    fn test_parser_is_shareable_across_threads() {
        let ident = identifier().strip_ws();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ident = ident.clone();
                std::thread::spawn(move || ident.parse(" thread").map(|s| s.value))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok("thread".to_string()));
        }
    }
}
