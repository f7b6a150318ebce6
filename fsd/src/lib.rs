pub mod error;
pub mod generator;
pub mod http;
pub mod model;
pub mod parser;

pub use error::{DefinitionError, Result};
pub use generator::Generator;
pub use parser::{Parser, Source};
