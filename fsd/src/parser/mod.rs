use crate::model::{Position, Service};
use crate::Result;

pub use fsd::Fsd;

pub mod error;
mod fsd;
mod util;

/// An in-memory named document. All parsing operates on fully
/// materialized text; there is no I/O inside the pipeline.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Source {
    pub name: String,
    pub text: String,
}

impl Source {
    pub fn new<N: Into<String>, T: Into<String>>(name: N, text: T) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// A format bridge that turns a [Source] into a [Service]. Either a
/// complete valid service is returned or the first error aborts the
/// build; no partial model is observable.
pub trait Parser {
    fn parse(&self, source: &Source) -> Result<Service>;
}

/// Maps byte offsets within a document to 1-based line/column positions.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(offset + 1);
            }
        }
        Self { line_starts }
    }

    pub fn position(&self, document: &str, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let column = offset - self.line_starts[line - 1] + 1;
        Position::new(document, line, column)
    }

    /// Inverse of [LineIndex::position]; positions without line
    /// information map to the start of the document.
    pub fn offset(&self, position: &Position) -> usize {
        if position.line == 0 {
            return 0;
        }
        let start = self
            .line_starts
            .get(position.line - 1)
            .copied()
            .unwrap_or(0);
        start + position.column.saturating_sub(1)
    }
}
