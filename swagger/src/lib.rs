//! Swagger (Open API 2.0) bridge: parses JSON or YAML documents into the
//! semantic model and generates them back from it, laying methods onto
//! paths according to the model's HTTP projection.

pub use generate::{SwaggerFormat, SwaggerGenerator};
pub use parse::Swagger;

pub mod document;
mod generate;
mod names;
mod parse;
mod refs;
