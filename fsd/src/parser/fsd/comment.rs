use chumsky::prelude::*;

use crate::parser::error::Error;

/// Parses a line comment starting with `//`. Doc comments (`///`) are a
/// separate token consumed by [summary], so this matches only when the
/// third character is not another slash.
fn plain_comment<'a>() -> impl Parser<'a, &'a str, (), Error<'a>> + Clone {
    just("//")
        .and_is(just("///").not())
        .then(any().and_is(just('\n').not()).repeated())
        .ignored()
}

/// Skips whitespace and plain comments between tokens.
pub(crate) fn ws<'a>() -> impl Parser<'a, &'a str, (), Error<'a>> + Clone {
    plain_comment().padded().repeated().ignored().padded()
}

/// Parses zero or more `///` doc-comment lines into a single summary
/// string; lines are trimmed and joined with a space.
pub(crate) fn summary<'a>() -> impl Parser<'a, &'a str, String, Error<'a>> + Clone {
    let text = any().and_is(just('\n').not()).repeated().slice();
    let line = ws()
        .ignore_then(just("///"))
        .ignore_then(text)
        .then_ignore(just('\n').or_not());
    line.map(|s: &str| s.trim().to_string())
        .repeated()
        .collect::<Vec<_>>()
        .map(|lines| lines.join(" ").trim().to_string())
}
