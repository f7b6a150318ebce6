use fsd::model::Position;
use fsd::{DefinitionError, Result};

/// The four reference tables a `$ref` may target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum RefTable {
    Definitions,
    Paths,
    Parameters,
    Responses,
}

impl RefTable {
    fn prefix(&self) -> &'static str {
        match self {
            RefTable::Definitions => "#/definitions/",
            RefTable::Paths => "#/paths/",
            RefTable::Parameters => "#/parameters/",
            RefTable::Responses => "#/responses/",
        }
    }
}

/// Extracts the referenced name from `reference`, which must be a
/// single-level pointer into `table`. JSON-Pointer escapes are undone
/// (`~1` is `/`, `~0` is `~`).
pub(crate) fn ref_name(reference: &str, table: RefTable, position: &Position) -> Result<String> {
    let invalid = || {
        DefinitionError::new(
            format!("invalid $ref '{}'", reference),
            position.clone(),
        )
    };
    let name = reference.strip_prefix(table.prefix()).ok_or_else(invalid)?;
    if name.is_empty() || name.contains('/') {
        return Err(invalid());
    }
    Ok(unescape(name))
}

fn unescape(pointer: &str) -> String {
    pointer.replace("~1", "/").replace("~0", "~")
}

/// Looks `name` up in a reference table, failing with a positioned error
/// when the target does not exist.
pub(crate) fn lookup<'a, T>(
    table: &'a indexmap::IndexMap<String, T>,
    name: &str,
    kind: &str,
    position: &Position,
) -> Result<&'a T> {
    table.get(name).ok_or_else(|| {
        DefinitionError::new(
            format!("missing {} '{}' referenced by $ref", kind, name),
            position.clone(),
        )
    })
}
