use crate::model::attribute::AttributesHolder;
use crate::model::{Attribute, Field, Position};

/// A single service method. Request and response field order is
/// significant and preserved end to end; it determines the field order of
/// any generated request/response body.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Method {
    pub name: String,
    pub request: Vec<Field>,
    pub response: Vec<Field>,
    pub attributes: Vec<Attribute>,
    pub summary: String,
    pub remarks: Vec<String>,
    pub position: Position,
}

impl Method {
    pub fn new<S: Into<String>>(name: S, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            ..Default::default()
        }
    }

    pub fn request_field(&self, name: &str) -> Option<&Field> {
        self.request.iter().find(|f| f.name == name)
    }

    pub fn response_field(&self, name: &str) -> Option<&Field> {
        self.response.iter().find(|f| f.name == name)
    }
}

impl AttributesHolder for Method {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}
