pub use attribute::{Attribute, AttributeParameter, AttributesHolder};
pub(crate) use builder::is_valid_name;
pub use builder::{RemarksSection, ServiceBuilder};
pub use dto::Dto;
pub use en::{Enum, EnumValue};
pub use error_set::{ErrorSet, ErrorValue};
pub use field::Field;
pub use method::Method;
pub use position::Position;
pub use ty::Ty;

use crate::Result;

mod attribute;
mod builder;
mod dto;
mod en;
mod error_set;
mod field;
mod method;
mod position;
mod ty;

/// One entry in a service's flat member registry. Methods, DTOs, enums,
/// and error sets share one ordered list; all of them expose a name,
/// attributes, and a position.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Member {
    Method(Method),
    Dto(Dto),
    Enum(Enum),
    ErrorSet(ErrorSet),
}

/// The root of the format-agnostic semantic model. Built once by a
/// successful parse via [ServiceBuilder] and immutable thereafter.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Service {
    pub name: String,
    pub members: Vec<Member>,
    pub attributes: Vec<Attribute>,
    pub summary: String,
    pub remarks: Vec<String>,
    pub position: Position,
}

impl Member {
    pub fn name(&self) -> &str {
        match self {
            Member::Method(m) => &m.name,
            Member::Dto(d) => &d.name,
            Member::Enum(e) => &e.name,
            Member::ErrorSet(e) => &e.name,
        }
    }

    pub fn position(&self) -> &Position {
        match self {
            Member::Method(m) => &m.position,
            Member::Dto(d) => &d.position,
            Member::Enum(e) => &e.position,
            Member::ErrorSet(e) => &e.position,
        }
    }
}

impl AttributesHolder for Member {
    fn attributes(&self) -> &[Attribute] {
        match self {
            Member::Method(m) => &m.attributes,
            Member::Dto(d) => &d.attributes,
            Member::Enum(e) => &e.attributes,
            Member::ErrorSet(e) => &e.attributes,
        }
    }
}

macro_rules! get {
    ($self: ident, $name: ident, $member: ident) => {
        $self.members.iter().find_map(|m| match m {
            Member::$member(value) if value.name == $name => Some(value),
            _ => None,
        })
    };
}

macro_rules! iter {
    ($self: ident, $member: ident) => {
        $self.members.iter().filter_map(|member| {
            if let Member::$member(value) = member {
                Some(value)
            } else {
                None
            }
        })
    };
}

impl Service {
    /// Get a [Method] by name.
    pub fn method(&self, name: &str) -> Option<&Method> {
        get!(self, name, Method)
    }

    /// Get a [Dto] by name.
    pub fn dto(&self, name: &str) -> Option<&Dto> {
        get!(self, name, Dto)
    }

    /// Get an [Enum] by name.
    pub fn en(&self, name: &str) -> Option<&Enum> {
        get!(self, name, Enum)
    }

    /// Get an [ErrorSet] by name.
    pub fn error_set(&self, name: &str) -> Option<&ErrorSet> {
        get!(self, name, ErrorSet)
    }

    /// Get any [Member] by name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name() == name)
    }

    /// Iterate over all [Method]s in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = &Method> {
        iter!(self, Method)
    }

    /// Iterate over all [Dto]s in declaration order.
    pub fn dtos(&self) -> impl Iterator<Item = &Dto> {
        iter!(self, Dto)
    }

    /// Iterate over all [Enum]s in declaration order.
    pub fn enums(&self) -> impl Iterator<Item = &Enum> {
        iter!(self, Enum)
    }

    /// Iterate over all [ErrorSet]s in declaration order.
    pub fn error_sets(&self) -> impl Iterator<Item = &ErrorSet> {
        iter!(self, ErrorSet)
    }

    /// Resolves a textual type expression (as held by [Field::type_name])
    /// against this service's DTO/enum registry.
    pub fn resolve_type(&self, type_name: &str, position: &Position) -> Result<Ty> {
        ty::resolve(self, type_name, position)
    }
}

impl AttributesHolder for Service {
    fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }
}
