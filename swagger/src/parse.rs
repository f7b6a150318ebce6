use std::collections::HashSet;

use fsd::http::HttpVerb;
use fsd::model::{
    Attribute, Dto, Enum, EnumValue, Field, Method, Position, RemarksSection, Service,
    ServiceBuilder,
};
use fsd::{DefinitionError, Result, Source};
use log::debug;

use crate::document::{
    SwaggerAdditionalProperties, SwaggerDocument, SwaggerOperation, SwaggerParameter,
    SwaggerResponse, SwaggerSchema,
};
use crate::names;
use crate::refs::{self, RefTable};

/// Parses a Swagger (Open API 2.0) document, in JSON or YAML, into a
/// [Service].
#[derive(Default)]
pub struct Swagger {
    /// Overrides the service name derived from the document's
    /// `x-identifier` or title.
    pub service_name: Option<String>,
}

impl fsd::Parser for Swagger {
    fn parse(&self, source: &Source) -> Result<Service> {
        debug!("parsing Swagger document '{}'", source.name);
        let document = decode(source)?;
        let reader = Reader {
            document: &document,
            position: Position::document_only(&source.name),
        };
        reader.read(self.service_name.as_deref())
    }
}

/// JSON when the first non-whitespace character says so, otherwise the
/// text is normalized from YAML to a JSON structure so both formats share
/// one decoding path.
fn decode(source: &Source) -> Result<SwaggerDocument> {
    let text = source.text.as_str();
    if matches!(text.trim_start().chars().next(), Some('{') | Some('/')) {
        serde_json::from_str(text).map_err(|e| {
            DefinitionError::new(
                format!("invalid Swagger JSON: {}", e),
                Position::new(&source.name, e.line(), e.column()),
            )
        })
    } else {
        let value: serde_json::Value = serde_yaml::from_str(text).map_err(|e| {
            let position = match e.location() {
                Some(at) => Position::new(&source.name, at.line(), at.column()),
                None => Position::document_only(&source.name),
            };
            DefinitionError::new(format!("invalid Swagger YAML: {}", e), position)
        })?;
        serde_json::from_value(value).map_err(|e| {
            DefinitionError::new(
                format!("invalid Swagger document: {}", e),
                Position::document_only(&source.name),
            )
        })
    }
}

struct Reader<'a> {
    document: &'a SwaggerDocument,
    position: Position,
}

impl Reader<'_> {
    fn err<S: Into<String>>(&self, message: S) -> DefinitionError {
        DefinitionError::new(message, self.position.clone())
    }

    fn read(&self, name_override: Option<&str>) -> Result<Service> {
        let name = self.service_name(name_override)?;
        let mut builder = ServiceBuilder::new(&name, self.position.clone());
        builder.summary(self.document.info.title.clone());
        if let Some(description) = &self.document.info.description {
            builder.add_remarks(RemarksSection {
                name: name.clone(),
                lines: description.lines().map(str::to_string).collect(),
                position: self.position.clone(),
            });
        }
        if !self.document.info.version.is_empty() {
            builder.add_attribute(Attribute::with_parameters(
                "info",
                [("version", self.document.info.version.as_str())],
                self.position.clone(),
            ));
        }
        if let Some(url) = self.base_url() {
            builder.add_attribute(Attribute::with_parameters(
                "http",
                [("url", url.as_str())],
                self.position.clone(),
            ));
        }

        // Definitions flattened into a method's request or response are
        // implicit and must not also become standalone DTOs.
        let mut consumed = HashSet::new();
        for (path, item) in &self.document.paths {
            let item = match &item.reference {
                Some(reference) => {
                    let target = refs::ref_name(reference, RefTable::Paths, &self.position)?;
                    refs::lookup(&self.document.paths, &target, "path", &self.position)?
                }
                None => item,
            };
            for verb in HttpVerb::ALL {
                if let Some(operation) = item.operation(verb) {
                    builder.add_method(self.read_method(
                        path,
                        verb,
                        &item.parameters,
                        operation,
                        &mut consumed,
                    )?);
                }
            }
        }

        for (name, schema) in &self.document.definitions {
            if consumed.contains(name.as_str()) || !names::is_identifier(name) {
                continue;
            }
            if name == "Error" && is_error_definition(schema) {
                continue;
            }
            if self.result_value_name(name, schema).is_some() {
                continue;
            }
            if !schema.enum_values.is_empty() {
                builder.add_enum(self.read_enum(name, schema));
            } else if is_object_definition(schema) {
                builder.add_dto(self.read_dto(name, schema)?);
            }
        }

        builder.build()
    }

    fn service_name(&self, name_override: Option<&str>) -> Result<String> {
        if let Some(name) = name_override {
            return Ok(name.to_string());
        }
        if let Some(identifier) = &self.document.info.identifier {
            if names::is_identifier(identifier) {
                return Ok(identifier.clone());
            }
        }
        names::name_from_title(&self.document.info.title)
            .ok_or_else(|| self.err("missing service name; provide info.title or x-identifier"))
    }

    /// Base URL assembled from the preferred scheme, host, and base path.
    /// Absent schemes mean no `http` attribute at all.
    fn base_url(&self) -> Option<String> {
        let schemes = &self.document.schemes;
        let scheme = if schemes.iter().any(|s| s == "https") {
            "https"
        } else if schemes.iter().any(|s| s == "http") {
            "http"
        } else {
            schemes.first()?.as_str()
        };
        Some(format!(
            "{}://{}{}",
            scheme,
            self.document.host.as_deref().unwrap_or_default(),
            self.document.base_path.as_deref().unwrap_or_default()
        ))
    }

    fn read_method(
        &self,
        path: &str,
        verb: HttpVerb,
        item_parameters: &[SwaggerParameter],
        operation: &SwaggerOperation,
        consumed: &mut HashSet<String>,
    ) -> Result<Method> {
        let name = match &operation.operation_id {
            Some(id) if names::is_identifier(id) => id.clone(),
            _ => names::method_name_from_path(verb, path),
        };
        let mut method = Method::new(&name, self.position.clone());
        method.summary = operation.summary.clone().unwrap_or_default();
        if let Some(description) = &operation.description {
            method.remarks = description.lines().map(str::to_string).collect();
        }
        method.attributes.push(Attribute::with_parameters(
            "http",
            [("method", verb.as_str()), ("path", path)],
            self.position.clone(),
        ));
        if operation.deprecated == Some(true) {
            method
                .attributes
                .push(Attribute::new("obsolete", self.position.clone()));
        }

        for parameter in item_parameters.iter().chain(&operation.parameters) {
            let parameter = match &parameter.reference {
                Some(reference) => {
                    let target =
                        refs::ref_name(reference, RefTable::Parameters, &self.position)?;
                    refs::lookup(&self.document.parameters, &target, "parameter", &self.position)?
                }
                None => parameter,
            };
            match parameter.location.as_str() {
                "path" => self.add_plain_field(&mut method.request, parameter, None)?,
                "query" => {
                    // Unplaced GET fields already default to the query
                    // string; only other verbs need it spelled out.
                    let from = (verb != HttpVerb::Get).then_some("query");
                    self.add_plain_field(&mut method.request, parameter, from)?;
                }
                "header" => self.add_plain_field(&mut method.request, parameter, Some("header"))?,
                "body" => {
                    if let Some(schema) = &parameter.schema {
                        self.read_body(&mut method, parameter, schema, consumed)?;
                    }
                }
                _ => {}
            }
        }

        self.read_responses(&mut method, operation, consumed)?;
        Ok(method)
    }

    /// A path, query, or header parameter maps 1:1 to a request field.
    fn add_plain_field(
        &self,
        fields: &mut Vec<Field>,
        parameter: &SwaggerParameter,
        from: Option<&str>,
    ) -> Result<()> {
        let schema = SwaggerSchema {
            schema_type: parameter.schema_type.clone(),
            format: parameter.format.clone(),
            items: parameter.items.clone(),
            ..Default::default()
        };
        let Some(type_name) = self.infer_type(&schema)? else {
            return Ok(());
        };
        let name = names::field_name(&parameter.name);
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(from) = from {
            params.push(("from", from));
        }
        if name != parameter.name {
            params.push(("name", parameter.name.as_str()));
        }
        let mut field = Field::new(name, type_name, self.position.clone());
        field.summary = parameter.description.clone().unwrap_or_default();
        if !params.is_empty() {
            field.attributes.push(Attribute::with_parameters(
                "http",
                params,
                self.position.clone(),
            ));
        }
        fields.push(field);
        Ok(())
    }

    /// The body parameter either flattens into individual request fields
    /// (anonymous schema or one named `<Method>Request`) or becomes a
    /// single DTO-typed field placed in the body.
    fn read_body(
        &self,
        method: &mut Method,
        parameter: &SwaggerParameter,
        schema: &SwaggerSchema,
        consumed: &mut HashSet<String>,
    ) -> Result<()> {
        let implicit_name = format!("{}Request", names::capitalize(&method.name));
        if let Some(reference) = &schema.reference {
            let target = refs::ref_name(reference, RefTable::Definitions, &self.position)?;
            let definition =
                refs::lookup(&self.document.definitions, &target, "definition", &self.position)?;
            if target == implicit_name {
                consumed.insert(target);
                self.flatten(&mut method.request, definition, &[], true)?;
            } else if let Some(type_name) = self.infer_type(schema)? {
                let name = if names::is_identifier(&parameter.name) {
                    parameter.name.clone()
                } else {
                    names::uncapitalize(&target)
                };
                let mut field = Field::new(name, type_name, self.position.clone());
                field.attributes.push(Attribute::with_parameters(
                    "http",
                    [("from", "body")],
                    self.position.clone(),
                ));
                method.request.push(field);
            }
        } else {
            self.flatten(&mut method.request, schema, &[], true)?;
        }
        Ok(())
    }

    fn read_responses(
        &self,
        method: &mut Method,
        operation: &SwaggerOperation,
        consumed: &mut HashSet<String>,
    ) -> Result<()> {
        let mut valid: Vec<(u16, &SwaggerResponse)> = Vec::new();
        for (status, response) in &operation.responses {
            let Some(code) = status.parse::<u16>().ok().filter(|c| (200..300).contains(c))
            else {
                continue;
            };
            let response = match &response.reference {
                Some(reference) => {
                    let target =
                        refs::ref_name(reference, RefTable::Responses, &self.position)?;
                    refs::lookup(&self.document.responses, &target, "response", &self.position)?
                }
                None => response,
            };
            valid.push((code, response));
        }

        // A lone 200-with-body or 204-without needs no explicit code.
        let implicit = match valid.as_slice() {
            [(200, response)] => response.schema.is_some(),
            [(204, response)] => response.schema.is_none(),
            _ => false,
        };
        let implicit_name = format!("{}Response", names::capitalize(&method.name));

        for (code, response) in valid {
            let code_text = code.to_string();
            let explicit = [("code", code_text.as_str())];
            let code_params: &[(&str, &str)] = if implicit { &[] } else { &explicit };
            let Some(schema) = &response.schema else {
                continue;
            };
            if let Some(reference) = &schema.reference {
                let target = refs::ref_name(reference, RefTable::Definitions, &self.position)?;
                let definition = refs::lookup(
                    &self.document.definitions,
                    &target,
                    "definition",
                    &self.position,
                )?;
                if target == implicit_name {
                    consumed.insert(target);
                    self.flatten(&mut method.response, definition, code_params, true)?;
                } else if let Some(type_name) = self.infer_type(schema)? {
                    let mut params = vec![("from", "body")];
                    params.extend_from_slice(code_params);
                    let mut field = Field::new(
                        names::uncapitalize(&target),
                        type_name,
                        self.position.clone(),
                    );
                    field.attributes.push(Attribute::with_parameters(
                        "http",
                        params,
                        self.position.clone(),
                    ));
                    method.response.push(field);
                }
            } else {
                self.flatten(&mut method.response, schema, code_params, true)?;
            }
        }
        Ok(())
    }

    /// Turns each schema property into a field, silently skipping
    /// properties whose type cannot be inferred. Wire-name overrides are
    /// only legal on method fields; DTO properties that would need one
    /// are skipped instead.
    fn flatten(
        &self,
        fields: &mut Vec<Field>,
        schema: &SwaggerSchema,
        extra_params: &[(&str, &str)],
        allow_wire_names: bool,
    ) -> Result<()> {
        for (wire_name, property) in &schema.properties {
            let Some(type_name) = self.infer_type(property)? else {
                continue;
            };
            let name = names::field_name(wire_name);
            if name != *wire_name && !allow_wire_names {
                continue;
            }
            let mut params: Vec<(&str, &str)> = Vec::new();
            if name != *wire_name {
                params.push(("name", wire_name));
            }
            params.extend_from_slice(extra_params);
            let mut field = Field::new(name, type_name, self.position.clone());
            field.summary = property.description.clone().unwrap_or_default();
            if !params.is_empty() {
                field.attributes.push(Attribute::with_parameters(
                    "http",
                    params,
                    self.position.clone(),
                ));
            }
            if property.obsolete == Some(true) {
                field
                    .attributes
                    .push(Attribute::new("obsolete", self.position.clone()));
            }
            fields.push(field);
        }
        Ok(())
    }

    fn read_enum(&self, name: &str, schema: &SwaggerSchema) -> Enum {
        let mut en = Enum::new(name, self.position.clone());
        en.summary = schema.description.clone().unwrap_or_default();
        if schema.obsolete == Some(true) {
            en.attributes
                .push(Attribute::new("obsolete", self.position.clone()));
        }
        for value in &schema.enum_values {
            en.values.push(EnumValue {
                name: names::field_name(value),
                position: self.position.clone(),
                ..Default::default()
            });
        }
        en
    }

    fn read_dto(&self, name: &str, schema: &SwaggerSchema) -> Result<Dto> {
        let mut dto = Dto::new(name, self.position.clone());
        dto.summary = schema.description.clone().unwrap_or_default();
        if schema.obsolete == Some(true) {
            dto.attributes
                .push(Attribute::new("obsolete", self.position.clone()));
        }
        self.flatten(&mut dto.fields, schema, &[], false)?;
        Ok(dto)
    }

    /// Maps a schema node to a textual type expression, or `None` when no
    /// type can be inferred (the caller skips the property).
    fn infer_type(&self, schema: &SwaggerSchema) -> Result<Option<String>> {
        if let Some(reference) = &schema.reference {
            let name = refs::ref_name(reference, RefTable::Definitions, &self.position)?;
            let definition =
                refs::lookup(&self.document.definitions, &name, "definition", &self.position)?;
            if name == "Error" && is_error_definition(definition) {
                return Ok(Some("error".to_string()));
            }
            if let Some(value) = self.result_value_name(&name, definition) {
                return Ok(Some(format!("result<{}>", value)));
            }
            return Ok(Some(name));
        }
        let inferred = match schema.schema_type.as_deref() {
            Some("string") => Some(
                if schema.format.as_deref() == Some("byte") {
                    "bytes"
                } else {
                    "string"
                }
                .to_string(),
            ),
            Some("number") => Some("double".to_string()),
            Some("integer") => Some(
                if schema.format.as_deref() == Some("int64") {
                    "int64"
                } else {
                    "int32"
                }
                .to_string(),
            ),
            Some("boolean") => Some("boolean".to_string()),
            Some("array") => match &schema.items {
                Some(items) => self
                    .infer_type(items)?
                    .filter(|inner| !inner.ends_with("[]"))
                    .map(|inner| format!("{}[]", inner)),
                None => None,
            },
            Some("object") | None => match &schema.additional_properties {
                Some(SwaggerAdditionalProperties::Schema(values)) => self
                    .infer_type(values)?
                    .map(|inner| format!("map<{}>", inner)),
                _ => {
                    // An anonymous object with properties has no name to
                    // refer to it by, so it cannot be represented.
                    (schema.schema_type.is_some() && schema.properties.is_empty())
                        .then(|| "object".to_string())
                }
            },
            Some(_) => None,
        };
        Ok(inferred)
    }

    /// Recognizes the `<Prefix>Result` convention: a `value` property
    /// referencing `<Prefix>` and an `error` property referencing `Error`.
    fn result_value_name(&self, name: &str, schema: &SwaggerSchema) -> Option<String> {
        let prefix = name.strip_suffix("Result").filter(|p| !p.is_empty())?;
        let value = schema.properties.get("value")?.reference.as_deref()?;
        let error = schema.properties.get("error")?.reference.as_deref()?;
        let value_name = refs::ref_name(value, RefTable::Definitions, &self.position).ok()?;
        let error_name = refs::ref_name(error, RefTable::Definitions, &self.position).ok()?;
        (value_name == prefix && error_name == "Error").then(|| prefix.to_string())
    }
}

fn is_error_definition(schema: &SwaggerSchema) -> bool {
    let is_string = |name: &str| {
        schema
            .properties
            .get(name)
            .map_or(false, |p| p.schema_type.as_deref() == Some("string"))
    };
    is_string("code") && is_string("message")
}

fn is_object_definition(schema: &SwaggerSchema) -> bool {
    match schema.schema_type.as_deref() {
        Some("object") => true,
        None => !schema.properties.is_empty(),
        Some(_) => false,
    }
}
