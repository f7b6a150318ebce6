use crate::model::Position;

/// A named metadata tag with named parameters, attachable to any model
/// element. The model stores and looks attributes up generically; what an
/// attribute means on a given element is owned by consumers such as the
/// HTTP projection and the format bridges.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub parameters: Vec<AttributeParameter>,
    pub position: Position,
}

/// A single `name: value` pair within an [Attribute]. Values are kept as
/// text; consumers parse them as needed.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct AttributeParameter {
    pub name: String,
    pub value: String,
    pub position: Position,
}

impl Attribute {
    pub fn new<S: Into<String>>(name: S, position: Position) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            position,
        }
    }

    /// Builds an attribute whose parameters all share the attribute's
    /// position. Convenient for bridges that synthesize attributes.
    pub fn with_parameters<S, N, V, I>(name: S, parameters: I, position: Position) -> Self
    where
        S: Into<String>,
        N: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (N, V)>,
    {
        let parameters = parameters
            .into_iter()
            .map(|(name, value)| AttributeParameter::new(name, value, position.clone()))
            .collect();
        Self {
            name: name.into(),
            parameters,
            position,
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&AttributeParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn parameter_value(&self, name: &str) -> Option<&str> {
        self.parameter(name).map(|p| p.value.as_str())
    }
}

impl AttributeParameter {
    pub fn new<N: Into<String>, V: Into<String>>(name: N, value: V, position: Position) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            position,
        }
    }
}

/// Implemented by every model element that carries attributes.
pub trait AttributesHolder {
    fn attributes(&self) -> &[Attribute];

    fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes().iter().find(|a| a.name == name)
    }
}
