use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::model::{Position, Service};
use crate::{DefinitionError, Result};

/// A fully resolved field type. Built on demand from a field's textual
/// type expression by [Service::resolve_type]; never stored on the model.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Ty {
    String,
    Boolean,
    Double,
    Int32,
    Int64,
    Bytes,
    Object,
    Error,
    /// Reference by name to a [crate::model::Dto] in the owning service.
    Dto(String),
    /// Reference by name to an [crate::model::Enum] in the owning service.
    Enum(String),
    /// A success-or-error wrapper; the inner type must resolve to a DTO.
    Result(Box<Ty>),
    /// An array of the contained type. Nested arrays are not supported.
    Array(Box<Ty>),
    /// A string-keyed map of the contained type.
    Map(Box<Ty>),
}

lazy_static! {
    static ref SCALARS: HashMap<&'static str, Ty> = {
        let mut map = HashMap::new();
        map.insert("string", Ty::String);
        map.insert("boolean", Ty::Boolean);
        map.insert("double", Ty::Double);
        map.insert("int32", Ty::Int32);
        map.insert("int64", Ty::Int64);
        map.insert("bytes", Ty::Bytes);
        map.insert("object", Ty::Object);
        map.insert("error", Ty::Error);
        map
    };
}

impl Ty {
    /// Renders the type back to its textual expression form.
    pub fn type_name(&self) -> String {
        match self {
            Ty::String => "string".to_string(),
            Ty::Boolean => "boolean".to_string(),
            Ty::Double => "double".to_string(),
            Ty::Int32 => "int32".to_string(),
            Ty::Int64 => "int64".to_string(),
            Ty::Bytes => "bytes".to_string(),
            Ty::Object => "object".to_string(),
            Ty::Error => "error".to_string(),
            Ty::Dto(name) | Ty::Enum(name) => name.clone(),
            Ty::Result(inner) => format!("result<{}>", inner.type_name()),
            Ty::Array(inner) => format!("{}[]", inner.type_name()),
            Ty::Map(inner) => format!("map<{}>", inner.type_name()),
        }
    }
}

/// Resolves a textual type expression against the service's member
/// registry. Grammar: scalar or DTO/enum identifier, `T[]`, `map<T>`,
/// `result<T>` where `T` must name a DTO. Nested arrays are rejected.
pub(crate) fn resolve(service: &Service, text: &str, position: &Position) -> Result<Ty> {
    let text = text.trim();
    if let Some(element) = text.strip_suffix("[]") {
        if element.ends_with("[]") {
            return Err(DefinitionError::new(
                format!("nested arrays are not supported: '{}'", text),
                position.clone(),
            ));
        }
        let inner = resolve(service, element, position)?;
        return Ok(Ty::Array(Box::new(inner)));
    }
    if let Some(inner) = generic_argument(text, "map") {
        return Ok(Ty::Map(Box::new(resolve(service, inner, position)?)));
    }
    if let Some(inner) = generic_argument(text, "result") {
        let inner = resolve(service, inner, position)?;
        if !matches!(inner, Ty::Dto(_)) {
            return Err(DefinitionError::new(
                format!("result value type must be a DTO: '{}'", text),
                position.clone(),
            ));
        }
        return Ok(Ty::Result(Box::new(inner)));
    }
    if let Some(scalar) = SCALARS.get(text) {
        return Ok(scalar.clone());
    }
    if service.dto(text).is_some() {
        return Ok(Ty::Dto(text.to_string()));
    }
    if service.en(text).is_some() {
        return Ok(Ty::Enum(text.to_string()));
    }
    Err(DefinitionError::new(
        format!("unknown type '{}'", text),
        position.clone(),
    ))
}

fn generic_argument<'a>(text: &'a str, name: &str) -> Option<&'a str> {
    text.strip_prefix(name)?
        .strip_prefix('<')?
        .strip_suffix('>')
}
