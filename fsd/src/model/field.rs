use crate::model::attribute::AttributesHolder;
use crate::model::{Attribute, Position};

/// A pair of name and textual type expression that describes a named slot
/// within a [crate::model::Dto] or a [crate::model::Method] request or
/// response. The expression is resolved against the owning service's
/// member registry via [crate::model::Service::resolve_type].
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Field {
    pub name: String,
    pub type_name: String,
    pub attributes: Vec<Attribute>,
    pub summary: String,
    pub position: Position,
}

impl Field {
    pub fn new<N: Into<String>, T: Into<String>>(name: N, type_name: T, position: Position) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            position,
            ..Default::default()
        }
    }
}

impl AttributesHolder for Field {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}
