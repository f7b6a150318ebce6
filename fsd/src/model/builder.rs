use std::collections::HashSet;

use log::debug;

use crate::model::{
    Attribute, AttributesHolder, Dto, Enum, ErrorSet, Member, Method, Position, Service,
};
use crate::{http, DefinitionError, Result};

/// A free-standing named block of remark lines parsed after the service
/// body, consumed by the element with the matching name during [ServiceBuilder::build].
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct RemarksSection {
    pub name: String,
    pub lines: Vec<String>,
    pub position: Position,
}

/// Accumulates members, attributes, and remarks into growable lists during
/// parsing, then seals them into an immutable [Service] via [ServiceBuilder::build].
/// All validation happens eagerly inside `build`; no invalid service ever
/// escapes, and the first violation aborts the whole build.
#[derive(Default, Debug)]
pub struct ServiceBuilder {
    name: String,
    position: Position,
    summary: String,
    members: Vec<Member>,
    attributes: Vec<Attribute>,
    remarks_sections: Vec<RemarksSection>,
}

impl ServiceBuilder {
    pub fn new<S: Into<String>>(name: S, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
            ..Default::default()
        }
    }

    pub fn summary<S: Into<String>>(&mut self, summary: S) {
        self.summary = summary.into();
    }

    pub fn add_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    pub fn add_method(&mut self, method: Method) {
        self.members.push(Member::Method(method));
    }

    pub fn add_dto(&mut self, dto: Dto) {
        self.members.push(Member::Dto(dto));
    }

    pub fn add_enum(&mut self, en: Enum) {
        self.members.push(Member::Enum(en));
    }

    pub fn add_error_set(&mut self, error_set: ErrorSet) {
        self.members.push(Member::ErrorSet(error_set));
    }

    pub fn add_member(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn add_remarks(&mut self, section: RemarksSection) {
        self.remarks_sections.push(section);
    }

    /// Finalize and validate the service. Checks names, attribute and
    /// parameter uniqueness, type expressions, remarks targets, and
    /// `http` attribute placement; returns the first violation found.
    pub fn build(mut self) -> Result<Service> {
        debug!("building service '{}'", self.name);
        validate_name(&self.name, &self.position)?;
        validate_unique_member_names(&self.members)?;

        let mut remarks = Vec::new();
        for section in std::mem::take(&mut self.remarks_sections) {
            if section.name == self.name {
                remarks = section.lines;
            } else {
                attach_member_remarks(&mut self.members, section)?;
            }
        }

        let service = Service {
            name: self.name,
            members: self.members,
            attributes: self.attributes,
            summary: self.summary,
            remarks,
            position: self.position,
        };

        validate_members(&service)?;
        validate_attributes(&service)?;
        validate_field_types(&service)?;
        http::check_attribute_placement(&service)?;
        Ok(service)
    }
}

fn attach_member_remarks(members: &mut [Member], section: RemarksSection) -> Result<()> {
    let member = members.iter_mut().find(|m| m.name() == section.name);
    let remarks = match member {
        Some(Member::Method(m)) => &mut m.remarks,
        Some(Member::Dto(d)) => &mut d.remarks,
        Some(Member::Enum(e)) => &mut e.remarks,
        Some(Member::ErrorSet(e)) => &mut e.remarks,
        None => {
            return Err(DefinitionError::new(
                format!("unknown remarks heading '{}'", section.name),
                section.position,
            ))
        }
    };
    *remarks = section.lines;
    Ok(())
}

pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn validate_name(name: &str, position: &Position) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(DefinitionError::new(
            format!("invalid name '{}'", name),
            position.clone(),
        ))
    }
}

fn validate_unique_member_names(members: &[Member]) -> Result<()> {
    // Uniqueness is case-insensitive across all member kinds.
    let mut seen = HashSet::new();
    for member in members {
        if !seen.insert(member.name().to_ascii_lowercase()) {
            return Err(DefinitionError::new(
                format!("duplicate service member '{}'", member.name()),
                member.position().clone(),
            ));
        }
    }
    Ok(())
}

fn validate_unique_names<'a, I>(items: I, what: &str) -> Result<()>
where
    I: Iterator<Item = (&'a str, &'a Position)>,
{
    let mut seen = HashSet::new();
    for (name, position) in items {
        validate_name(name, position)?;
        if !seen.insert(name.to_ascii_lowercase()) {
            return Err(DefinitionError::new(
                format!("duplicate {} '{}'", what, name),
                position.clone(),
            ));
        }
    }
    Ok(())
}

fn validate_members(service: &Service) -> Result<()> {
    for member in &service.members {
        match member {
            Member::Method(m) => {
                validate_unique_names(
                    m.request.iter().map(|f| (f.name.as_str(), &f.position)),
                    "request field",
                )?;
                validate_unique_names(
                    m.response.iter().map(|f| (f.name.as_str(), &f.position)),
                    "response field",
                )?;
            }
            Member::Dto(d) => {
                validate_unique_names(
                    d.fields.iter().map(|f| (f.name.as_str(), &f.position)),
                    "field",
                )?;
            }
            Member::Enum(e) => {
                validate_unique_names(
                    e.values.iter().map(|v| (v.name.as_str(), &v.position)),
                    "enum value",
                )?;
            }
            Member::ErrorSet(e) => {
                validate_unique_names(
                    e.errors.iter().map(|v| (v.name.as_str(), &v.position)),
                    "error",
                )?;
            }
        }
    }
    Ok(())
}

fn validate_element_attributes(attributes: &[Attribute]) -> Result<()> {
    let mut seen = HashSet::new();
    for attribute in attributes {
        if !seen.insert(attribute.name.as_str()) {
            return Err(DefinitionError::new(
                format!("duplicate attribute '{}'", attribute.name),
                attribute.position.clone(),
            ));
        }
        let mut params = HashSet::new();
        for parameter in &attribute.parameters {
            if !params.insert(parameter.name.as_str()) {
                return Err(DefinitionError::new(
                    format!(
                        "duplicate parameter '{}' of attribute '{}'",
                        parameter.name, attribute.name
                    ),
                    parameter.position.clone(),
                ));
            }
        }
    }
    Ok(())
}

fn validate_attributes(service: &Service) -> Result<()> {
    validate_element_attributes(service.attributes())?;
    for member in &service.members {
        validate_element_attributes(member.attributes())?;
        match member {
            Member::Method(m) => {
                for field in m.request.iter().chain(m.response.iter()) {
                    validate_element_attributes(&field.attributes)?;
                }
            }
            Member::Dto(d) => {
                for field in &d.fields {
                    validate_element_attributes(&field.attributes)?;
                }
            }
            Member::Enum(e) => {
                for value in &e.values {
                    validate_element_attributes(&value.attributes)?;
                }
            }
            Member::ErrorSet(e) => {
                for error in &e.errors {
                    validate_element_attributes(&error.attributes)?;
                }
            }
        }
    }
    Ok(())
}

fn validate_field_types(service: &Service) -> Result<()> {
    let fields = service
        .methods()
        .flat_map(|m| m.request.iter().chain(m.response.iter()))
        .chain(service.dtos().flat_map(|d| d.fields.iter()));
    for field in fields {
        service.resolve_type(&field.type_name, &field.position)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::model::{
        Attribute, Dto, Field, Method, Position, RemarksSection, ServiceBuilder,
    };

    fn pos(line: usize) -> Position {
        Position::new("test.fsd", line, 1)
    }

    #[test]
    fn empty_service() -> Result<()> {
        let service = ServiceBuilder::new("MyApi", pos(1)).build()?;
        assert_eq!(service.name, "MyApi");
        assert!(service.members.is_empty());
        Ok(())
    }

    #[test]
    fn duplicate_member_names_case_insensitive() {
        let mut builder = ServiceBuilder::new("MyApi", pos(1));
        builder.add_dto(Dto::new("Widget", pos(2)));
        builder.add_method(Method::new("widget", pos(3)));
        let err = builder.build().unwrap_err();
        assert_eq!(err.message, "duplicate service member 'widget'");
        assert_eq!(err.position, pos(3));
    }

    #[test]
    fn duplicate_field_names() {
        let mut dto = Dto::new("Widget", pos(2));
        dto.fields.push(Field::new("id", "string", pos(3)));
        dto.fields.push(Field::new("Id", "string", pos(4)));
        let mut builder = ServiceBuilder::new("MyApi", pos(1));
        builder.add_dto(dto);
        let err = builder.build().unwrap_err();
        assert_eq!(err.message, "duplicate field 'Id'");
    }

    #[test]
    fn unresolved_field_type() {
        let mut method = Method::new("getWidget", pos(2));
        method.response.push(Field::new("widget", "Widget", pos(3)));
        let mut builder = ServiceBuilder::new("MyApi", pos(1));
        builder.add_method(method);
        let err = builder.build().unwrap_err();
        assert_eq!(err.message, "unknown type 'Widget'");
        assert_eq!(err.position, pos(3));
    }

    #[test]
    fn duplicate_attribute_parameter() {
        let mut builder = ServiceBuilder::new("MyApi", pos(1));
        builder.add_attribute(Attribute::with_parameters(
            "http",
            [("url", "https://a"), ("url", "https://b")],
            pos(1),
        ));
        let err = builder.build().unwrap_err();
        assert_eq!(err.message, "duplicate parameter 'url' of attribute 'http'");
    }

    #[test]
    fn remarks_attach_by_name() -> Result<()> {
        let mut builder = ServiceBuilder::new("MyApi", pos(1));
        builder.add_method(Method::new("getWidget", pos(2)));
        builder.add_remarks(RemarksSection {
            name: "MyApi".to_string(),
            lines: vec!["service remarks".to_string()],
            position: pos(10),
        });
        builder.add_remarks(RemarksSection {
            name: "getWidget".to_string(),
            lines: vec!["method remarks".to_string()],
            position: pos(12),
        });
        let service = builder.build()?;
        assert_eq!(service.remarks, vec!["service remarks"]);
        assert_eq!(
            service.method("getWidget").unwrap().remarks,
            vec!["method remarks"]
        );
        Ok(())
    }

    #[test]
    fn unknown_remarks_heading() {
        let mut builder = ServiceBuilder::new("MyApi", pos(1));
        builder.add_remarks(RemarksSection {
            name: "nope".to_string(),
            lines: vec![],
            position: pos(9),
        });
        let err = builder.build().unwrap_err();
        assert_eq!(err.message, "unknown remarks heading 'nope'");
        assert_eq!(err.position, pos(9));
    }
}
