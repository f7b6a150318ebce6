use std::fmt;

use log::debug;

use crate::model::{
    AttributesHolder, ErrorSet, Field, Method, Position, Service,
};
use crate::{DefinitionError, Result};

pub(crate) use placement::check_attribute_placement;

mod placement;
mod route;

/// The seven verbs a method can be mapped to. Declaration order doubles
/// as the sort order of the route comparator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpVerb {
    pub const ALL: [HttpVerb; 7] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Delete,
        HttpVerb::Options,
        HttpVerb::Head,
        HttpVerb::Patch,
    ];

    pub fn parse(value: &str) -> Option<HttpVerb> {
        HttpVerb::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(value))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Options => "OPTIONS",
            HttpVerb::Head => "HEAD",
            HttpVerb::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The derived protocol-level view of a [Service]. Recomputed from
/// scratch whenever needed; never persisted on the model.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpService {
    pub url: Option<String>,
    pub methods: Vec<HttpMethod>,
    pub error_sets: Vec<HttpErrorSet>,
}

/// One method's verb, path, and field placement partition.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpMethod {
    pub name: String,
    pub verb: HttpVerb,
    pub path: String,
    pub path_fields: Vec<HttpField>,
    pub query_fields: Vec<HttpField>,
    pub header_fields: Vec<HttpField>,
    /// The single `from: body` request field, if any.
    pub body_field: Option<HttpField>,
    /// Request fields with no explicit placement that did not default to
    /// the path or query groups; they form the JSON request body.
    pub normal_fields: Vec<HttpField>,
    pub responses: Vec<HttpResponse>,
    pub position: Position,
}

/// A model field seen through the projection: `wire_name` is the name on
/// the wire (the `name` parameter of the field's `http` attribute when
/// present, else the field name).
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpField {
    pub name: String,
    pub wire_name: String,
    pub type_name: String,
    pub summary: String,
    pub position: Position,
}

/// One valid response status code and the fields it carries.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpResponse {
    pub code: u16,
    pub body_field: Option<HttpField>,
    pub normal_fields: Vec<HttpField>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpErrorSet {
    pub name: String,
    pub errors: Vec<HttpError>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HttpError {
    pub name: String,
    pub code: u16,
}

impl HttpField {
    fn from_field(field: &Field) -> Self {
        let wire_name = field
            .attribute("http")
            .and_then(|a| a.parameter_value("name"))
            .unwrap_or(&field.name)
            .to_string();
        Self {
            name: field.name.clone(),
            wire_name,
            type_name: field.type_name.clone(),
            summary: field.summary.clone(),
            position: field.position.clone(),
        }
    }
}

impl HttpService {
    /// Projects `service` onto HTTP. Fails on the first invalid verb,
    /// status code, field placement, or duplicate route; no partial
    /// projection is observable.
    pub fn new(service: &Service) -> Result<HttpService> {
        let url = service
            .attribute("http")
            .and_then(|a| a.parameter_value("url"))
            .map(str::to_string);

        let methods = service
            .methods()
            .map(project_method)
            .collect::<Result<Vec<_>>>()?;
        route::check_routes(&methods)?;

        let error_sets = service
            .error_sets()
            .map(project_error_set)
            .collect::<Result<Vec<_>>>()?;

        debug!(
            "projected service '{}': {} methods, {} error sets",
            service.name,
            methods.len(),
            error_sets.len()
        );
        Ok(HttpService {
            url,
            methods,
            error_sets,
        })
    }
}

fn project_method(method: &Method) -> Result<HttpMethod> {
    let attr = method.attribute("http");
    let verb = match attr.and_then(|a| a.parameter("method")) {
        Some(param) => HttpVerb::parse(&param.value).ok_or_else(|| {
            DefinitionError::new(
                format!("invalid HTTP method '{}'", param.value),
                param.position.clone(),
            )
        })?,
        None => HttpVerb::Post,
    };
    let path = attr
        .and_then(|a| a.parameter_value("path"))
        .map(str::to_string)
        .unwrap_or_else(|| format!("/{}", method.name));
    let placeholders: Vec<&str> = route::segments(&path)
        .filter_map(route::placeholder_name)
        .collect();

    let mut path_fields = Vec::new();
    let mut query_fields = Vec::new();
    let mut header_fields = Vec::new();
    let mut body_field = None;
    let mut normal_fields = Vec::new();

    for field in &method.request {
        let http_field = HttpField::from_field(field);
        let from = field
            .attribute("http")
            .and_then(|a| a.parameter("from"));
        match from.map(|p| (p.value.as_str(), &p.position)) {
            Some(("path", _)) => path_fields.push(http_field),
            Some(("query", _)) => query_fields.push(http_field),
            Some(("header", _)) => header_fields.push(http_field),
            Some(("body", position)) => {
                if body_field.is_some() {
                    return Err(DefinitionError::new(
                        format!("method '{}' has multiple request body fields", method.name),
                        position.clone(),
                    ));
                }
                body_field = Some(http_field);
            }
            Some((other, position)) => {
                return Err(DefinitionError::new(
                    format!("invalid 'from' parameter of 'http' attribute: '{}'", other),
                    position.clone(),
                ))
            }
            None => {
                if placeholders.contains(&http_field.wire_name.as_str()) {
                    path_fields.push(http_field);
                } else if matches!(verb, HttpVerb::Get | HttpVerb::Delete) {
                    query_fields.push(http_field);
                } else {
                    normal_fields.push(http_field);
                }
            }
        }
    }

    for placeholder in &placeholders {
        if !path_fields.iter().any(|f| f.wire_name == *placeholder) {
            return Err(DefinitionError::new(
                format!(
                    "path parameter '{}' of method '{}' is not defined as a field",
                    placeholder, method.name
                ),
                method.position.clone(),
            ));
        }
    }
    for field in &path_fields {
        if !placeholders.contains(&field.wire_name.as_str()) {
            return Err(DefinitionError::new(
                format!("field '{}' is not a parameter of path '{}'", field.name, path),
                field.position.clone(),
            ));
        }
    }
    if body_field.is_some() && !normal_fields.is_empty() {
        return Err(DefinitionError::new(
            format!(
                "method '{}' cannot mix a request body field with unplaced fields",
                method.name
            ),
            method.position.clone(),
        ));
    }

    let responses = project_responses(method)?;

    Ok(HttpMethod {
        name: method.name.clone(),
        verb,
        path,
        path_fields,
        query_fields,
        header_fields,
        body_field,
        normal_fields,
        responses,
        position: method.position.clone(),
    })
}

fn project_responses(method: &Method) -> Result<Vec<HttpResponse>> {
    let mut responses: Vec<HttpResponse> = Vec::new();
    let mut normal_groups: Vec<(u16, Vec<HttpField>)> = Vec::new();

    for field in &method.response {
        let attr = field.attribute("http");
        let code = match attr.and_then(|a| a.parameter("code")) {
            Some(param) => param.value.parse::<u16>().map_err(|_| {
                DefinitionError::new(
                    format!("invalid status code '{}'", param.value),
                    param.position.clone(),
                )
            })?,
            None => 200,
        };
        let http_field = HttpField::from_field(field);
        match attr.and_then(|a| a.parameter("from")) {
            Some(param) if param.value == "body" => responses.push(HttpResponse {
                code,
                body_field: Some(http_field),
                normal_fields: Vec::new(),
            }),
            Some(param) => {
                return Err(DefinitionError::new(
                    format!("response fields cannot be placed in '{}'", param.value),
                    param.position.clone(),
                ))
            }
            None => match normal_groups.iter_mut().find(|(c, _)| *c == code) {
                Some((_, fields)) => fields.push(http_field),
                None => normal_groups.push((code, vec![http_field])),
            },
        }
    }

    for (code, normal_fields) in normal_groups {
        responses.push(HttpResponse {
            code,
            body_field: None,
            normal_fields,
        });
    }
    if responses.is_empty() {
        responses.push(HttpResponse {
            code: 204,
            body_field: None,
            normal_fields: Vec::new(),
        });
    }

    responses.sort_by_key(|r| r.code);
    for pair in responses.windows(2) {
        if pair[0].code == pair[1].code {
            return Err(DefinitionError::new(
                format!(
                    "duplicate response status code {} for method '{}'",
                    pair[0].code, method.name
                ),
                method.position.clone(),
            ));
        }
    }
    Ok(responses)
}

fn project_error_set(error_set: &ErrorSet) -> Result<HttpErrorSet> {
    let mut errors = Vec::new();
    for error in &error_set.errors {
        let code = match error.attribute("http").and_then(|a| a.parameter("code")) {
            Some(param) => param.value.parse::<u16>().map_err(|_| {
                DefinitionError::new(
                    format!("invalid status code '{}'", param.value),
                    param.position.clone(),
                )
            })?,
            None => 500,
        };
        errors.push(HttpError {
            name: error.name.clone(),
            code,
        });
    }
    Ok(HttpErrorSet {
        name: error_set.name.clone(),
        errors,
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use crate::http::{HttpService, HttpVerb};
    use crate::model::{
        Attribute, ErrorSet, ErrorValue, Field, Method, Position, ServiceBuilder,
    };

    fn pos() -> Position {
        Position::new("test.fsd", 1, 1)
    }

    fn http_method_attr(verb: &str, path: &str) -> Attribute {
        Attribute::with_parameters("http", [("method", verb), ("path", path)], pos())
    }

    fn field_with_attr(name: &str, ty: &str, params: &[(&str, &str)]) -> Field {
        let mut field = Field::new(name, ty, pos());
        if !params.is_empty() {
            field.attributes.push(Attribute::with_parameters(
                "http",
                params.iter().copied(),
                pos(),
            ));
        }
        field
    }

    fn build_service(methods: Vec<Method>) -> Result<crate::model::Service> {
        let mut builder = ServiceBuilder::new("TestApi", pos());
        builder.add_attribute(Attribute::with_parameters(
            "http",
            [("url", "https://api.example.com/v1")],
            pos(),
        ));
        for method in methods {
            builder.add_method(method);
        }
        Ok(builder.build()?)
    }

    #[test]
    fn base_url_from_service_attribute() -> Result<()> {
        let service = build_service(vec![])?;
        let http = HttpService::new(&service)?;
        assert_eq!(http.url.as_deref(), Some("https://api.example.com/v1"));
        Ok(())
    }

    #[test]
    fn get_method_placement_defaults() -> Result<()> {
        let mut method = Method::new("getWidget", pos());
        method.attributes.push(http_method_attr("GET", "/widgets/{id}"));
        method.request.push(field_with_attr("id", "string", &[]));
        method.request.push(field_with_attr("q", "string", &[]));
        method
            .request
            .push(field_with_attr("auth", "string", &[("from", "header")]));
        method.response.push(field_with_attr("name", "string", &[]));

        let service = build_service(vec![method])?;
        let http = HttpService::new(&service)?;
        let m = &http.methods[0];
        assert_eq!(m.verb, HttpVerb::Get);
        assert_eq!(m.path, "/widgets/{id}");
        assert_eq!(m.path_fields[0].name, "id");
        assert_eq!(m.query_fields[0].name, "q");
        assert_eq!(m.header_fields[0].name, "auth");
        assert!(m.normal_fields.is_empty());
        assert_eq!(m.responses.len(), 1);
        assert_eq!(m.responses[0].code, 200);
        assert_eq!(m.responses[0].normal_fields.len(), 1);
        Ok(())
    }

    #[test]
    fn post_method_unplaced_fields_form_body() -> Result<()> {
        let mut method = Method::new("createWidget", pos());
        method.attributes.push(http_method_attr("POST", "/widgets"));
        method.request.push(field_with_attr("name", "string", &[]));
        let service = build_service(vec![method])?;
        let http = HttpService::new(&service)?;
        assert_eq!(http.methods[0].normal_fields.len(), 1);
        assert!(http.methods[0].query_fields.is_empty());
        Ok(())
    }

    #[test]
    fn method_without_http_attribute_defaults_to_post() -> Result<()> {
        let service = build_service(vec![Method::new("doThing", pos())])?;
        let http = HttpService::new(&service)?;
        assert_eq!(http.methods[0].verb, HttpVerb::Post);
        assert_eq!(http.methods[0].path, "/doThing");
        assert_eq!(http.methods[0].responses[0].code, 204);
        Ok(())
    }

    #[test]
    fn wire_name_override() -> Result<()> {
        let mut method = Method::new("getWidget", pos());
        method.attributes.push(http_method_attr("GET", "/widgets"));
        method
            .request
            .push(field_with_attr("ifNoneMatch", "string", &[
                ("from", "header"),
                ("name", "If-None-Match"),
            ]));
        let service = build_service(vec![method])?;
        let http = HttpService::new(&service)?;
        assert_eq!(http.methods[0].header_fields[0].wire_name, "If-None-Match");
        Ok(())
    }

    #[test]
    fn explicit_response_code() -> Result<()> {
        let mut method = Method::new("createWidget", pos());
        method.attributes.push(http_method_attr("POST", "/widgets"));
        method
            .response
            .push(field_with_attr("widget", "Widget", &[("from", "body"), ("code", "201")]));
        let mut builder = ServiceBuilder::new("TestApi", pos());
        builder.add_method(method);
        builder.add_dto(crate::model::Dto::new("Widget", pos()));
        let service = builder.build()?;
        let http = HttpService::new(&service)?;
        assert_eq!(http.methods[0].responses[0].code, 201);
        assert!(http.methods[0].responses[0].body_field.is_some());
        Ok(())
    }

    #[test]
    fn missing_path_field_rejected() -> Result<()> {
        let mut method = Method::new("getWidget", pos());
        method.attributes.push(http_method_attr("GET", "/widgets/{id}"));
        let service = build_service(vec![method])?;
        let err = HttpService::new(&service).unwrap_err();
        assert_eq!(
            err.message,
            "path parameter 'id' of method 'getWidget' is not defined as a field"
        );
        Ok(())
    }

    #[test]
    fn invalid_verb_rejected() -> Result<()> {
        let mut method = Method::new("getWidget", pos());
        method.attributes.push(http_method_attr("FETCH", "/widgets"));
        let service = build_service(vec![method])?;
        let err = HttpService::new(&service).unwrap_err();
        assert_eq!(err.message, "invalid HTTP method 'FETCH'");
        Ok(())
    }

    #[test]
    fn error_set_codes() -> Result<()> {
        let mut errors = ErrorSet::new("WidgetErrors", pos());
        let mut not_found = ErrorValue::new("notFound", pos());
        not_found
            .attributes
            .push(Attribute::with_parameters("http", [("code", "404")], pos()));
        errors.errors.push(not_found);
        errors.errors.push(ErrorValue::new("whoops", pos()));
        let mut builder = ServiceBuilder::new("TestApi", pos());
        builder.add_error_set(errors);
        let service = builder.build()?;
        let http = HttpService::new(&service)?;
        assert_eq!(http.error_sets[0].errors[0].code, 404);
        assert_eq!(http.error_sets[0].errors[1].code, 500);
        Ok(())
    }
}
