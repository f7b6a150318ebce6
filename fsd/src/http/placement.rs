use crate::model::{AttributesHolder, Member, Service};
use crate::{DefinitionError, Result};

/// `http` is legal on services, methods, method request/response fields,
/// and individual error-set errors. Anywhere else it is rejected with the
/// attribute's own position. Called during [crate::model::ServiceBuilder::build]
/// so that no service carrying an illegally placed `http` attribute is
/// ever constructed.
pub(crate) fn check_attribute_placement(service: &Service) -> Result<()> {
    for member in &service.members {
        match member {
            Member::Method(_) => {}
            Member::Dto(dto) => {
                reject_http(dto, &format!("data '{}'", dto.name))?;
                for field in &dto.fields {
                    reject_http(field, &format!("field '{}'", field.name))?;
                }
            }
            Member::Enum(en) => {
                reject_http(en, &format!("enum '{}'", en.name))?;
                for value in &en.values {
                    reject_http(value, &format!("enum value '{}'", value.name))?;
                }
            }
            Member::ErrorSet(error_set) => {
                reject_http(error_set, &format!("error set '{}'", error_set.name))?;
            }
        }
    }
    Ok(())
}

fn reject_http<T: AttributesHolder>(element: &T, what: &str) -> Result<()> {
    match element.attribute("http") {
        Some(attr) => Err(DefinitionError::new(
            format!("'http' attribute is not allowed on {}", what),
            attr.position.clone(),
        )),
        None => Ok(()),
    }
}
