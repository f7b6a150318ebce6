use chumsky::error::Rich;
use chumsky::{text, Parser};

use crate::parser::error::Error;

/// Expanded [text::keyword] that has a more informative error.
pub fn keyword_ex(keyword: &str) -> impl Parser<&str, &str, Error> + Clone {
    text::ident()
        .try_map(move |s: &str, span| {
            if s == keyword {
                Ok(())
            } else {
                Err(Rich::custom(
                    span,
                    format!("expected keyword '{}', found '{}'", keyword, s),
                ))
            }
        })
        .slice()
}
