use crate::model::attribute::AttributesHolder;
use crate::model::{Attribute, Field, Position};

/// A single Data Transfer Object (DTO): a named record type with ordered
/// fields. DTOs reference other DTOs (or themselves) by name through the
/// flat member registry on [crate::model::Service], never by containment,
/// so arbitrarily cyclic reference graphs are representable.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Dto {
    pub name: String,
    pub fields: Vec<Field>,
    pub attributes: Vec<Attribute>,
    pub summary: String,
    pub remarks: Vec<String>,
    pub position: Position,
}

impl Dto {
    pub fn new<S: Into<String>>(name: S, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            ..Default::default()
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

impl AttributesHolder for Dto {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}
