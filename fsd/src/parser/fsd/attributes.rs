use chumsky::prelude::*;

use crate::model::{Attribute, AttributeParameter};
use crate::parser::error::Error;
use crate::parser::fsd::comment::ws;
use crate::parser::fsd::{positioned, Context};

/// Parses zero or more attribute brackets, e.g.
/// `[obsolete]` or `[http(method: GET, path: "/widgets/{id}")]`.
/// A bracket may carry several comma-separated attributes.
pub(crate) fn attributes<'a>(
    ctx: Context<'a>,
) -> impl Parser<'a, &'a str, Vec<Attribute>, Error<'a>> + Clone {
    let value = choice((quoted_string(), bare_token()));
    let parameter = ws()
        .ignore_then(positioned(ctx, text::ident()))
        .then_ignore(ws().ignore_then(just(':')))
        .then(ws().ignore_then(value))
        .map(|((name, position), value)| AttributeParameter::new(name, value, position));
    let parameters = parameter
        .separated_by(ws().ignore_then(just(',')))
        .allow_trailing()
        .collect::<Vec<_>>()
        .delimited_by(ws().ignore_then(just('(')), ws().ignore_then(just(')')))
        .or_not();
    let attribute = ws()
        .ignore_then(positioned(ctx, text::ident()))
        .then(parameters)
        .map(|((name, position), parameters)| Attribute {
            name: name.to_string(),
            parameters: parameters.unwrap_or_default(),
            position,
        });
    attribute
        .separated_by(ws().ignore_then(just(',')))
        .at_least(1)
        .collect::<Vec<_>>()
        .delimited_by(ws().ignore_then(just('[')), ws().ignore_then(just(']')))
        .repeated()
        .collect::<Vec<_>>()
        .map(|groups| groups.into_iter().flatten().collect())
}

/// A double-quoted string with `\"`, `\\`, `\n`, and `\t` escapes.
fn quoted_string<'a>() -> impl Parser<'a, &'a str, String, Error<'a>> + Clone {
    let escape = just('\\').then(any()).ignored();
    let regular = any()
        .and_is(just('"').not())
        .and_is(just('\\').not())
        .ignored();
    choice((escape, regular))
        .repeated()
        .slice()
        .delimited_by(just('"'), just('"'))
        .map(unescape)
}

/// An unquoted value token such as `GET`, `404`, or `1.2.3`.
fn bare_token<'a>() -> impl Parser<'a, &'a str, String, Error<'a>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphanumeric() || "_.+-".contains(*c))
        .repeated()
        .at_least(1)
        .slice()
        .map(|s: &str| s.to_string())
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(c) => out.push(c),
            None => {}
        }
    }
    out
}
