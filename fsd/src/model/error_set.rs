use crate::model::attribute::AttributesHolder;
use crate::model::{Attribute, Position};

/// A named set of error codes a service can return.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct ErrorSet {
    pub name: String,
    pub errors: Vec<ErrorValue>,
    pub attributes: Vec<Attribute>,
    pub summary: String,
    pub remarks: Vec<String>,
    pub position: Position,
}

/// A single error code within an [ErrorSet].
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct ErrorValue {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub summary: String,
    pub position: Position,
}

impl ErrorSet {
    pub fn new<S: Into<String>>(name: S, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            ..Default::default()
        }
    }

    pub fn error(&self, name: &str) -> Option<&ErrorValue> {
        self.errors.iter().find(|error| error.name == name)
    }
}

impl ErrorValue {
    pub fn new<S: Into<String>>(name: S, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            ..Default::default()
        }
    }
}

impl AttributesHolder for ErrorSet {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

impl AttributesHolder for ErrorValue {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}
