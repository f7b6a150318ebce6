use crate::model::Service;
use crate::Result;

/// Renders a validated [Service] to an output format.
pub trait Generator {
    fn generate(&self, service: &Service) -> Result<String>;
}
