use ariadne::{Color, Label, Report, ReportKind};
use chumsky::error::Rich;
use chumsky::extra;

use crate::model::Position;
use crate::parser::{LineIndex, Source};
use crate::DefinitionError;

pub type Error<'a> = extra::Err<Rich<'a, char>>;

/// Maps the first chumsky error onto the single positioned error kind the
/// rest of the pipeline uses. Parsing is fail-fast, so only the first
/// error is ever surfaced.
pub(crate) fn first_error(
    source: &Source,
    lines: &LineIndex,
    errors: Vec<Rich<'_, char>>,
) -> DefinitionError {
    match errors.into_iter().next() {
        Some(error) => {
            let position = lines.position(&source.name, error.span().start);
            DefinitionError::new(error.to_string(), position)
        }
        None => DefinitionError::new("parse failed", Position::document_only(&source.name)),
    }
}

/// Renders `error` against the source text as a terminal diagnostic.
pub fn report(error: &DefinitionError, source: &Source) {
    let lines = LineIndex::new(&source.text);
    let offset = lines.offset(&error.position);
    Report::build(ReportKind::Error, source.name.clone(), offset)
        .with_message(&error.message)
        .with_label(
            Label::new((source.name.clone(), offset..offset + 1))
                .with_message(&error.message)
                .with_color(Color::Red),
        )
        .finish()
        .print((source.name.clone(), ariadne::Source::from(source.text.as_str())))
        .ok();
}
