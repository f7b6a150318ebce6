use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Structural mirror of an Open API 2.0 document, limited to the subset
/// this bridge consumes and produces. Unknown fields are ignored on
/// decode; empty collections are omitted on encode.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct SwaggerDocument {
    pub swagger: String,
    pub info: SwaggerInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub schemes: Vec<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, SwaggerPathItem>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub definitions: IndexMap<String, SwaggerSchema>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, SwaggerParameter>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, SwaggerResponse>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct SwaggerInfo {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "x-identifier", skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct SwaggerPathItem {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<SwaggerOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<SwaggerOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<SwaggerOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<SwaggerOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<SwaggerOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<SwaggerOperation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<SwaggerOperation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<SwaggerParameter>,
}

impl SwaggerPathItem {
    pub fn operation(&self, verb: fsd::http::HttpVerb) -> Option<&SwaggerOperation> {
        use fsd::http::HttpVerb::*;
        match verb {
            Get => self.get.as_ref(),
            Post => self.post.as_ref(),
            Put => self.put.as_ref(),
            Delete => self.delete.as_ref(),
            Options => self.options.as_ref(),
            Head => self.head.as_ref(),
            Patch => self.patch.as_ref(),
        }
    }

    pub fn operation_mut(&mut self, verb: fsd::http::HttpVerb) -> &mut Option<SwaggerOperation> {
        use fsd::http::HttpVerb::*;
        match verb {
            Get => &mut self.get,
            Post => &mut self.post,
            Put => &mut self.put,
            Delete => &mut self.delete,
            Options => &mut self.options,
            Head => &mut self.head,
            Patch => &mut self.patch,
        }
    }
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct SwaggerOperation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub consumes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub produces: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<SwaggerParameter>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, SwaggerResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct SwaggerParameter {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "in", default, skip_serializing_if = "String::is_empty")]
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SwaggerSchema>>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SwaggerSchema>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct SwaggerResponse {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SwaggerSchema>,
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct SwaggerSchema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SwaggerSchema>>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SwaggerSchema>,
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<SwaggerAdditionalProperties>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(rename = "x-obsolete", skip_serializing_if = "Option::is_none")]
    pub obsolete: Option<bool>,
}

/// Open API allows `additionalProperties` to be either a boolean or a
/// schema; only the schema form carries type information.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum SwaggerAdditionalProperties {
    Bool(bool),
    Schema(Box<SwaggerSchema>),
}

impl SwaggerSchema {
    pub fn new_ref<S: Into<String>>(name: S) -> Self {
        Self {
            reference: Some(format!("#/definitions/{}", name.into())),
            ..Default::default()
        }
    }

    pub fn new_type<S: Into<String>>(schema_type: S, format: Option<&str>) -> Self {
        Self {
            schema_type: Some(schema_type.into()),
            format: format.map(str::to_string),
            ..Default::default()
        }
    }
}
