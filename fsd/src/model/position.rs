use std::fmt;

/// A location within a source document, attached to model nodes and
/// diagnostics at construction time and never recomputed.
///
/// Line and column are 1-based. Documents without meaningful line
/// information (e.g. decoded Swagger structures) use 0 for both.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Position {
    pub document: String,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new<S: Into<String>>(document: S, line: usize, column: usize) -> Self {
        Self {
            document: document.into(),
            line,
            column,
        }
    }

    /// Position for a document where line/column tracking is unavailable.
    pub fn document_only<S: Into<String>>(document: S) -> Self {
        Self::new(document, 0, 0)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.document)
        } else {
            write!(f, "{}:{}:{}", self.document, self.line, self.column)
        }
    }
}
