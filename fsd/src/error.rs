use thiserror::Error;

use crate::model::Position;

/// The single error kind raised by every stage: parsing, model
/// construction, HTTP projection, and generation. The first violation
/// encountered aborts the build; no partial model is ever returned.
#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[error("{message} ({position})")]
pub struct DefinitionError {
    pub message: String,
    pub position: Position,
}

impl DefinitionError {
    pub fn new<S: Into<String>>(message: S, position: Position) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

pub type Result<T> = std::result::Result<T, DefinitionError>;

#[cfg(test)]
mod tests {
    use crate::model::Position;
    use crate::DefinitionError;

    #[test]
    fn display_includes_position() {
        let err = DefinitionError::new("unknown type 'Widget'", Position::new("api.fsd", 7, 12));
        assert_eq!(err.to_string(), "unknown type 'Widget' (api.fsd:7:12)");
    }
}
