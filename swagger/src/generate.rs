use indexmap::IndexMap;
use itertools::Itertools;
use lazy_static::lazy_static;
use log::debug;

use fsd::http::{HttpField, HttpMethod, HttpResponse, HttpService, HttpVerb};
use fsd::model::{AttributesHolder, Position, Service};
use fsd::{DefinitionError, Result};

use crate::document::{
    SwaggerAdditionalProperties, SwaggerDocument, SwaggerInfo, SwaggerOperation, SwaggerParameter,
    SwaggerPathItem, SwaggerResponse, SwaggerSchema,
};
use crate::names;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SwaggerFormat {
    Json,
    Yaml,
}

/// Generates a Swagger (Open API 2.0) document from a [Service], laid
/// out according to the service's HTTP projection.
pub struct SwaggerGenerator {
    format: SwaggerFormat,
}

lazy_static! {
    /// The built-in Error DTO, synthesized whenever anything reaches the
    /// `error` type.
    static ref ERROR_SCHEMA: SwaggerSchema = SwaggerSchema {
        schema_type: Some("object".to_string()),
        properties: IndexMap::from([
            ("code".to_string(), SwaggerSchema::new_type("string", None)),
            ("message".to_string(), SwaggerSchema::new_type("string", None)),
            ("details".to_string(), SwaggerSchema::new_type("object", None)),
            ("innerError".to_string(), SwaggerSchema::new_ref("Error")),
        ]),
        ..Default::default()
    };
}

impl SwaggerGenerator {
    pub fn json() -> Self {
        Self {
            format: SwaggerFormat::Json,
        }
    }

    pub fn yaml() -> Self {
        Self {
            format: SwaggerFormat::Yaml,
        }
    }

    /// Builds the document model without serializing it.
    pub fn to_document(&self, service: &Service) -> Result<SwaggerDocument> {
        let http = HttpService::new(service)?;
        debug!(
            "generating Swagger for service '{}' ({} methods)",
            service.name,
            http.methods.len()
        );
        let mut document = SwaggerDocument {
            swagger: "2.0".to_string(),
            info: info(service),
            ..Default::default()
        };
        if let Some(url) = &http.url {
            apply_base_url(&mut document, url);
        }

        for method in &http.methods {
            let operation = operation(service, method, &mut document.definitions)?;
            let item = document.paths.entry(method.path.clone()).or_default();
            *item.operation_mut(method.verb) = Some(operation);
        }
        collect_reachable(service, &mut document);
        Ok(document)
    }
}

impl fsd::Generator for SwaggerGenerator {
    fn generate(&self, service: &Service) -> Result<String> {
        let document = self.to_document(service)?;
        let encoded = match self.format {
            SwaggerFormat::Json => serde_json::to_string_pretty(&document).map_err(|e| {
                DefinitionError::new(
                    format!("failed to encode Swagger JSON: {}", e),
                    Position::document_only(&service.name),
                )
            })?,
            // serde_yaml quotes scalars that would otherwise reparse as
            // numbers, keeping version strings like "1.10" textual.
            SwaggerFormat::Yaml => serde_yaml::to_string(&document).map_err(|e| {
                DefinitionError::new(
                    format!("failed to encode Swagger YAML: {}", e),
                    Position::document_only(&service.name),
                )
            })?,
        };
        Ok(encoded)
    }
}

fn info(service: &Service) -> SwaggerInfo {
    let version = service
        .attribute("info")
        .and_then(|a| a.parameter_value("version"))
        .unwrap_or("0.0.0");
    SwaggerInfo {
        title: if service.summary.is_empty() {
            service.name.clone()
        } else {
            service.summary.clone()
        },
        version: version.to_string(),
        description: (!service.remarks.is_empty()).then(|| service.remarks.join("\n")),
        identifier: Some(service.name.clone()),
    }
}

/// Splits a base URL back into the scheme, host, and base path slots.
fn apply_base_url(document: &mut SwaggerDocument, url: &str) {
    let Some((scheme, rest)) = url.split_once("://") else {
        document.base_path = Some(url.to_string());
        return;
    };
    document.schemes = vec![scheme.to_string()];
    match rest.find('/') {
        Some(at) => {
            document.host = Some(rest[..at].to_string());
            document.base_path = Some(rest[at..].to_string());
        }
        None => document.host = Some(rest.to_string()),
    }
}

fn operation(
    service: &Service,
    method: &HttpMethod,
    definitions: &mut IndexMap<String, SwaggerSchema>,
) -> Result<SwaggerOperation> {
    // The projection carries placement only; summary, remarks, and
    // obsolescence still live on the model method.
    let model = service.method(&method.name);
    let mut operation = SwaggerOperation {
        operation_id: Some(method.name.clone()),
        ..Default::default()
    };
    if let Some(model) = model {
        if !model.summary.is_empty() {
            operation.summary = Some(model.summary.clone());
        }
        if !model.remarks.is_empty() {
            operation.description = Some(model.remarks.join("\n"));
        }
        if model.attribute("obsolete").is_some() {
            operation.deprecated = Some(true);
        }
    }

    for field in &method.path_fields {
        let built = parameter(service, &method.name, field, "path", true)?;
        operation.parameters.push(built);
    }
    for field in &method.query_fields {
        let built = parameter(service, &method.name, field, "query", false)?;
        operation.parameters.push(built);
    }
    for field in &method.header_fields {
        let built = parameter(service, &method.name, field, "header", false)?;
        operation.parameters.push(built);
    }

    let body_schema = request_body_schema(method, definitions);
    if let Some((name, schema)) = body_schema {
        operation.consumes = vec!["application/json".to_string()];
        operation.parameters.push(SwaggerParameter {
            name,
            location: "body".to_string(),
            required: Some(true),
            schema: Some(schema),
            ..Default::default()
        });
    }

    let mut has_response_body = false;
    for response in &method.responses {
        let entry = response_entry(method, response, definitions);
        has_response_body |= entry.schema.is_some();
        operation.responses.insert(response.code.to_string(), entry);
    }
    if has_response_body {
        operation.produces = vec!["application/json".to_string()];
    }
    Ok(operation)
}

/// Path, query, and header parameters cannot carry a `$ref` in Open API
/// 2.0. Enum-typed fields flatten to a `string` with the allowed value
/// list inline; any other named type has no wire representation there.
fn parameter(
    service: &Service,
    method_name: &str,
    field: &HttpField,
    location: &str,
    required: bool,
) -> Result<SwaggerParameter> {
    let mut parameter = SwaggerParameter {
        name: field.wire_name.clone(),
        location: location.to_string(),
        description: (!field.summary.is_empty()).then(|| field.summary.clone()),
        required: required.then_some(true),
        ..Default::default()
    };
    if let Some(en) = service.en(&field.type_name) {
        parameter.schema_type = Some("string".to_string());
        parameter.enum_values = en.values.iter().map(|v| v.name.clone()).collect();
        return Ok(parameter);
    }
    let schema = schema_for_type(&field.type_name);
    if !referenced_names(&schema).is_empty() {
        return Err(DefinitionError::new(
            format!(
                "field '{}' of method '{}' has type '{}', which cannot be carried as a {} parameter",
                field.name, method_name, field.type_name, location
            ),
            Position::document_only(&service.name),
        ));
    }
    parameter.schema_type = schema.schema_type;
    parameter.format = schema.format;
    parameter.items = schema.items;
    Ok(parameter)
}

/// A single body field references its DTO directly; unplaced fields are
/// wrapped in a synthesized `<Method>Request` definition.
fn request_body_schema(
    method: &HttpMethod,
    definitions: &mut IndexMap<String, SwaggerSchema>,
) -> Option<(String, SwaggerSchema)> {
    if let Some(field) = &method.body_field {
        return Some((field.name.clone(), schema_for_type(&field.type_name)));
    }
    if method.normal_fields.is_empty() {
        return None;
    }
    let name = format!("{}Request", names::capitalize(&method.name));
    definitions.insert(name.clone(), object_schema(&method.normal_fields));
    Some(("request".to_string(), SwaggerSchema::new_ref(&name)))
}

fn response_entry(
    method: &HttpMethod,
    response: &HttpResponse,
    definitions: &mut IndexMap<String, SwaggerSchema>,
) -> SwaggerResponse {
    let schema = if let Some(field) = &response.body_field {
        Some(schema_for_type(&field.type_name))
    } else if response.normal_fields.is_empty() {
        None
    } else {
        let name = synthesized_response_name(method, response);
        definitions.insert(name.clone(), object_schema(&response.normal_fields));
        Some(SwaggerSchema::new_ref(&name))
    };
    SwaggerResponse {
        schema,
        ..Default::default()
    }
}

/// Untagged response fields grouped at distinct status codes each need
/// their own definition; the status-code suffix is dropped when only one
/// group exists so the common shape keeps the plain `<Method>Response`
/// name.
fn synthesized_response_name(method: &HttpMethod, response: &HttpResponse) -> String {
    let groups = method
        .responses
        .iter()
        .filter(|r| r.body_field.is_none() && !r.normal_fields.is_empty())
        .count();
    if groups > 1 {
        format!(
            "{}Response{}",
            names::capitalize(&method.name),
            response.code
        )
    } else {
        format!("{}Response", names::capitalize(&method.name))
    }
}

fn object_schema(fields: &[HttpField]) -> SwaggerSchema {
    let properties = fields
        .iter()
        .map(|field| {
            let mut schema = schema_for_type(&field.type_name);
            if !field.summary.is_empty() {
                schema.description = Some(field.summary.clone());
            }
            (field.wire_name.clone(), schema)
        })
        .collect();
    SwaggerSchema {
        schema_type: Some("object".to_string()),
        properties,
        ..Default::default()
    }
}

/// Maps a textual type expression onto a schema node. Named types become
/// `$ref`s; the referenced definitions are filled in by the closure pass.
fn schema_for_type(type_name: &str) -> SwaggerSchema {
    if let Some(inner) = type_name.strip_suffix("[]") {
        let mut schema = SwaggerSchema::new_type("array", None);
        schema.items = Some(Box::new(schema_for_type(inner)));
        return schema;
    }
    if let Some(inner) = generic_argument(type_name, "map") {
        let mut schema = SwaggerSchema::new_type("object", None);
        schema.additional_properties = Some(SwaggerAdditionalProperties::Schema(Box::new(
            schema_for_type(inner),
        )));
        return schema;
    }
    if let Some(inner) = generic_argument(type_name, "result") {
        return SwaggerSchema::new_ref(format!("{}Result", inner));
    }
    match type_name {
        "string" => SwaggerSchema::new_type("string", None),
        "boolean" => SwaggerSchema::new_type("boolean", None),
        "double" => SwaggerSchema::new_type("number", Some("double")),
        "int32" => SwaggerSchema::new_type("integer", Some("int32")),
        "int64" => SwaggerSchema::new_type("integer", Some("int64")),
        "bytes" => SwaggerSchema::new_type("string", Some("byte")),
        "object" => SwaggerSchema::new_type("object", None),
        "error" => SwaggerSchema::new_ref("Error"),
        name => SwaggerSchema::new_ref(name),
    }
}

fn generic_argument<'a>(type_name: &'a str, generic: &str) -> Option<&'a str> {
    type_name
        .strip_prefix(generic)?
        .strip_prefix('<')?
        .strip_suffix('>')
}

/// Adds every definition reachable from what has been emitted so far:
/// DTOs, enums, the Error template, and `<T>Result` wrappers. Seeded by
/// the `$ref`s that body parameters and responses carry inside the
/// operations, then repeated until a pass adds nothing, since a newly
/// added DTO's fields can reference definitions not yet seen.
fn collect_reachable(service: &Service, document: &mut SwaggerDocument) {
    let seeds: Vec<String> = document
        .paths
        .values()
        .flat_map(operation_refs)
        .collect();
    loop {
        let needed: Vec<String> = seeds
            .iter()
            .cloned()
            .chain(document.definitions.values().flat_map(referenced_names))
            .unique()
            .filter(|name| !document.definitions.contains_key(name))
            .collect();
        if needed.is_empty() {
            return;
        }
        for name in needed {
            let schema = synthesize(service, &name);
            document.definitions.insert(name, schema);
        }
    }
}

fn operation_refs(item: &SwaggerPathItem) -> Vec<String> {
    let mut names = Vec::new();
    for verb in HttpVerb::ALL {
        let Some(operation) = item.operation(verb) else {
            continue;
        };
        for parameter in &operation.parameters {
            if let Some(schema) = &parameter.schema {
                collect_refs(schema, &mut names);
            }
        }
        for response in operation.responses.values() {
            if let Some(schema) = &response.schema {
                collect_refs(schema, &mut names);
            }
        }
    }
    names
}

fn synthesize(service: &Service, name: &str) -> SwaggerSchema {
    if name == "Error" {
        return ERROR_SCHEMA.clone();
    }
    if let Some(dto) = service.dto(name) {
        let properties = dto
            .fields
            .iter()
            .map(|field| {
                let mut schema = schema_for_type(&field.type_name);
                if !field.summary.is_empty() {
                    schema.description = Some(field.summary.clone());
                }
                schema.obsolete = field.attribute("obsolete").is_some().then_some(true);
                (field.name.clone(), schema)
            })
            .collect();
        return SwaggerSchema {
            schema_type: Some("object".to_string()),
            description: (!dto.summary.is_empty()).then(|| dto.summary.clone()),
            properties,
            obsolete: dto.attribute("obsolete").is_some().then_some(true),
            ..Default::default()
        };
    }
    if let Some(en) = service.en(name) {
        let mut schema = SwaggerSchema::new_type("string", None);
        schema.enum_values = en.values.iter().map(|v| v.name.clone()).collect();
        schema.description = (!en.summary.is_empty()).then(|| en.summary.clone());
        schema.obsolete = en.attribute("obsolete").is_some().then_some(true);
        return schema;
    }
    if let Some(value) = name.strip_suffix("Result").filter(|v| !v.is_empty()) {
        return SwaggerSchema {
            schema_type: Some("object".to_string()),
            properties: IndexMap::from([
                ("value".to_string(), SwaggerSchema::new_ref(value)),
                ("error".to_string(), SwaggerSchema::new_ref("Error")),
            ]),
            ..Default::default()
        };
    }
    // Unknown names cannot occur for a validated service; emit a bare
    // object rather than panicking on a hand-built document.
    SwaggerSchema::new_type("object", None)
}

fn referenced_names(schema: &SwaggerSchema) -> Vec<String> {
    let mut names = Vec::new();
    collect_refs(schema, &mut names);
    names
}

fn collect_refs(schema: &SwaggerSchema, names: &mut Vec<String>) {
    if let Some(reference) = &schema.reference {
        if let Some(name) = reference.strip_prefix("#/definitions/") {
            names.push(name.to_string());
        }
    }
    if let Some(items) = &schema.items {
        collect_refs(items, names);
    }
    if let Some(SwaggerAdditionalProperties::Schema(values)) = &schema.additional_properties {
        collect_refs(values, names);
    }
    for property in schema.properties.values() {
        collect_refs(property, names);
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use fsd::model::{
        Attribute, AttributesHolder, Dto, Enum, EnumValue, Field, Method, Position, Service,
        ServiceBuilder,
    };
    use fsd::{Generator, Parser, Source};

    use crate::generate::SwaggerGenerator;
    use crate::parse::Swagger;

    fn pos() -> Position {
        Position::document_only("test")
    }

    fn field(name: &str, ty: &str, http_params: &[(&str, &str)]) -> Field {
        let mut field = Field::new(name, ty, pos());
        if !http_params.is_empty() {
            field.attributes.push(Attribute::with_parameters(
                "http",
                http_params.iter().copied(),
                pos(),
            ));
        }
        field
    }

    fn widget_service() -> Result<Service> {
        let mut builder = ServiceBuilder::new("WidgetApi", pos());
        builder.summary("Widget API");
        builder.add_attribute(Attribute::with_parameters(
            "info",
            [("version", "1.2.3")],
            pos(),
        ));
        builder.add_attribute(Attribute::with_parameters(
            "http",
            [("url", "https://api.example.com/v1")],
            pos(),
        ));

        let mut get = Method::new("getWidget", pos());
        get.attributes.push(Attribute::with_parameters(
            "http",
            [("method", "GET"), ("path", "/widgets/{id}")],
            pos(),
        ));
        get.request.push(field("id", "string", &[]));
        get.response.push(field("widget", "Widget", &[("from", "body")]));
        builder.add_method(get);

        let mut create = Method::new("createWidget", pos());
        create.attributes.push(Attribute::with_parameters(
            "http",
            [("method", "POST"), ("path", "/widgets")],
            pos(),
        ));
        create.request.push(field("name", "string", &[]));
        create
            .response
            .push(field("widget", "Widget", &[("from", "body"), ("code", "201")]));
        builder.add_method(create);

        let mut widget = Dto::new("Widget", pos());
        widget.fields.push(field("id", "string", &[]));
        widget.fields.push(field("name", "string", &[]));
        builder.add_dto(widget);
        Ok(builder.build()?)
    }

    #[test]
    fn document_layout() -> Result<()> {
        let document = SwaggerGenerator::json().to_document(&widget_service()?)?;
        assert_eq!(document.swagger, "2.0");
        assert_eq!(document.info.title, "Widget API");
        assert_eq!(document.info.version, "1.2.3");
        assert_eq!(document.info.identifier.as_deref(), Some("WidgetApi"));
        assert_eq!(document.schemes, vec!["https"]);
        assert_eq!(document.host.as_deref(), Some("api.example.com"));
        assert_eq!(document.base_path.as_deref(), Some("/v1"));
        Ok(())
    }

    #[test]
    fn operations_and_parameters() -> Result<()> {
        let document = SwaggerGenerator::json().to_document(&widget_service()?)?;
        let item = &document.paths["/widgets/{id}"];
        let get = item.get.as_ref().unwrap();
        assert_eq!(get.operation_id.as_deref(), Some("getWidget"));
        assert_eq!(get.parameters[0].name, "id");
        assert_eq!(get.parameters[0].location, "path");
        assert_eq!(get.parameters[0].required, Some(true));
        // No request body; consumes must stay unset.
        assert!(get.consumes.is_empty());
        assert_eq!(get.produces, vec!["application/json"]);
        Ok(())
    }

    #[test]
    fn synthesized_request_and_explicit_code() -> Result<()> {
        let document = SwaggerGenerator::json().to_document(&widget_service()?)?;
        let post = document.paths["/widgets"].post.as_ref().unwrap();
        let body = post.parameters.iter().find(|p| p.location == "body").unwrap();
        assert_eq!(
            body.schema.as_ref().unwrap().reference.as_deref(),
            Some("#/definitions/CreateWidgetRequest")
        );
        let request = &document.definitions["CreateWidgetRequest"];
        assert!(request.properties.contains_key("name"));
        assert!(post.responses.contains_key("201"));
        Ok(())
    }

    #[test]
    fn reachable_definitions_emitted() -> Result<()> {
        let document = SwaggerGenerator::json().to_document(&widget_service()?)?;
        assert!(document.definitions.contains_key("Widget"));
        let widget = &document.definitions["Widget"];
        assert_eq!(
            widget.properties["id"].schema_type.as_deref(),
            Some("string")
        );
        Ok(())
    }

    #[test]
    fn error_and_result_synthesis() -> Result<()> {
        let mut builder = ServiceBuilder::new("WidgetApi", pos());
        let mut method = Method::new("tryGetWidget", pos());
        method
            .response
            .push(field("result", "result<Widget>", &[("from", "body")]));
        builder.add_method(method);
        let mut widget = Dto::new("Widget", pos());
        widget.fields.push(field("id", "string", &[]));
        builder.add_dto(widget);
        let document = SwaggerGenerator::json().to_document(&builder.build()?)?;

        let result = &document.definitions["WidgetResult"];
        assert_eq!(
            result.properties["value"].reference.as_deref(),
            Some("#/definitions/Widget")
        );
        assert_eq!(
            result.properties["error"].reference.as_deref(),
            Some("#/definitions/Error")
        );
        let error = &document.definitions["Error"];
        assert_eq!(
            error.properties["code"].schema_type.as_deref(),
            Some("string")
        );
        assert_eq!(
            error.properties["innerError"].reference.as_deref(),
            Some("#/definitions/Error")
        );
        assert!(document.definitions.contains_key("Widget"));
        Ok(())
    }

    #[test]
    fn recursive_dto_closure_terminates() -> Result<()> {
        let mut builder = ServiceBuilder::new("TreeApi", pos());
        let mut method = Method::new("getTree", pos());
        method.response.push(field("root", "Node", &[("from", "body")]));
        builder.add_method(method);
        let mut node = Dto::new("Node", pos());
        node.fields.push(field("children", "Node[]", &[]));
        node.fields.push(field("left", "Leaf", &[]));
        builder.add_dto(node);
        let mut leaf = Dto::new("Leaf", pos());
        leaf.fields.push(field("parent", "Node", &[]));
        leaf.fields.push(field("labels", "map<Leaf>", &[]));
        builder.add_dto(leaf);

        let document = SwaggerGenerator::json().to_document(&builder.build()?)?;
        assert!(document.definitions.contains_key("Node"));
        assert!(document.definitions.contains_key("Leaf"));
        assert_eq!(
            document.definitions["Node"].properties["children"]
                .items
                .as_ref()
                .unwrap()
                .reference
                .as_deref(),
            Some("#/definitions/Node")
        );
        Ok(())
    }

    #[test]
    fn enum_typed_parameter_flattens_to_string() -> Result<()> {
        let mut builder = ServiceBuilder::new("WidgetApi", pos());
        let mut en = Enum::new("WidgetKind", pos());
        en.values.push(EnumValue::new("simple", pos()));
        en.values.push(EnumValue::new("compound", pos()));
        builder.add_enum(en);
        let mut method = Method::new("listWidgets", pos());
        method.attributes.push(Attribute::with_parameters(
            "http",
            [("method", "GET"), ("path", "/widgets")],
            pos(),
        ));
        method.request.push(field("kind", "WidgetKind", &[]));
        builder.add_method(method);
        let service = builder.build()?;

        let document = SwaggerGenerator::json().to_document(&service)?;
        let get = document.paths["/widgets"].get.as_ref().unwrap();
        assert_eq!(get.parameters[0].name, "kind");
        assert_eq!(get.parameters[0].schema_type.as_deref(), Some("string"));
        assert_eq!(get.parameters[0].enum_values, vec!["simple", "compound"]);

        let json = SwaggerGenerator::json().generate(&service)?;
        let reparsed = Swagger::default().parse(&Source::new("widgets.json", json))?;
        let kind = &reparsed.method("listWidgets").unwrap().request[0];
        assert_eq!(kind.name, "kind");
        assert_eq!(kind.type_name, "string");
        Ok(())
    }

    #[test]
    fn dto_typed_parameter_rejected() -> Result<()> {
        let mut builder = ServiceBuilder::new("WidgetApi", pos());
        let mut widget = Dto::new("Widget", pos());
        widget.fields.push(field("id", "string", &[]));
        builder.add_dto(widget);
        let mut method = Method::new("listWidgets", pos());
        method.attributes.push(Attribute::with_parameters(
            "http",
            [("method", "GET"), ("path", "/widgets")],
            pos(),
        ));
        method.request.push(field("filter", "Widget", &[]));
        builder.add_method(method);

        let err = SwaggerGenerator::json()
            .to_document(&builder.build()?)
            .unwrap_err();
        assert_eq!(
            err.message,
            "field 'filter' of method 'listWidgets' has type 'Widget', \
             which cannot be carried as a query parameter"
        );
        Ok(())
    }

    #[test]
    fn response_groups_get_distinct_definitions() -> Result<()> {
        let mut builder = ServiceBuilder::new("WidgetApi", pos());
        let mut method = Method::new("importWidget", pos());
        method.response.push(field("existing", "boolean", &[]));
        method
            .response
            .push(field("location", "string", &[("code", "201")]));
        builder.add_method(method);

        let document = SwaggerGenerator::json().to_document(&builder.build()?)?;
        let post = document.paths["/importWidget"].post.as_ref().unwrap();
        assert_eq!(
            post.responses["200"].schema.as_ref().unwrap().reference.as_deref(),
            Some("#/definitions/ImportWidgetResponse200")
        );
        assert_eq!(
            post.responses["201"].schema.as_ref().unwrap().reference.as_deref(),
            Some("#/definitions/ImportWidgetResponse201")
        );
        let ok = &document.definitions["ImportWidgetResponse200"];
        assert!(ok.properties.contains_key("existing"));
        assert!(!ok.properties.contains_key("location"));
        let created = &document.definitions["ImportWidgetResponse201"];
        assert!(created.properties.contains_key("location"));
        Ok(())
    }

    #[test]
    fn empty_response_is_bare_entry() -> Result<()> {
        let mut builder = ServiceBuilder::new("PingApi", pos());
        builder.add_method(Method::new("ping", pos()));
        let document = SwaggerGenerator::json().to_document(&builder.build()?)?;
        let post = document.paths["/ping"].post.as_ref().unwrap();
        let entry = &post.responses["204"];
        assert!(entry.schema.is_none());
        assert!(post.produces.is_empty());
        Ok(())
    }

    #[test]
    fn round_trip_preserves_methods_and_types() -> Result<()> {
        let service = widget_service()?;
        let json = SwaggerGenerator::json().generate(&service)?;
        let reparsed = Swagger::default().parse(&Source::new("widgets.json", json))?;

        assert_eq!(reparsed.name, service.name);
        let get = reparsed.method("getWidget").unwrap();
        assert_eq!(get.request[0].name, "id");
        assert_eq!(get.response[0].type_name, "Widget");
        let create = reparsed.method("createWidget").unwrap();
        assert_eq!(create.request[0].name, "name");
        assert_eq!(
            create.response[0]
                .attribute("http")
                .unwrap()
                .parameter_value("code"),
            Some("201")
        );
        assert!(reparsed.dto("Widget").is_some());
        Ok(())
    }

    #[test]
    fn yaml_output_reparses() -> Result<()> {
        let service = widget_service()?;
        let yaml = SwaggerGenerator::yaml().generate(&service)?;
        assert!(!yaml.trim_start().starts_with('{'));
        let reparsed = Swagger::default().parse(&Source::new("widgets.yaml", yaml))?;
        assert_eq!(
            reparsed.attribute("info").unwrap().parameter_value("version"),
            Some("1.2.3")
        );
        assert!(reparsed.method("getWidget").is_some());
        Ok(())
    }
}
