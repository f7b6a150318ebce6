use crate::model::attribute::AttributesHolder;
use crate::model::{Attribute, Position};

/// A single enumerated type within a service.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Enum {
    pub name: String,
    pub values: Vec<EnumValue>,
    pub attributes: Vec<Attribute>,
    pub summary: String,
    pub remarks: Vec<String>,
    pub position: Position,
}

/// A single value within an [Enum].
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct EnumValue {
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub summary: String,
    pub position: Position,
}

impl Enum {
    pub fn new<S: Into<String>>(name: S, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            ..Default::default()
        }
    }

    pub fn value(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|value| value.name == name)
    }
}

impl EnumValue {
    pub fn new<S: Into<String>>(name: S, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            ..Default::default()
        }
    }
}

impl AttributesHolder for Enum {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}

impl AttributesHolder for EnumValue {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}
