use crate::error::LoadError;
use core_types::RunSummary;
use serde_json::Value;
use std::io::Read;

/// Parses `summary.json`.
///
/// Returns `Ok(None)` for an empty object: a record with nothing in it carries
/// no baseline and no fallback values, so it counts as "no summary".
pub fn parse_summary<R: Read>(reader: R) -> Result<Option<RunSummary>, LoadError> {
    let value: Value = serde_json::from_reader(reader)?;

    let object = match &value {
        Value::Object(map) => map,
        Value::Null => return Err(LoadError::NotAnObject("null")),
        Value::Bool(_) => return Err(LoadError::NotAnObject("a boolean")),
        Value::Number(_) => return Err(LoadError::NotAnObject("a number")),
        Value::String(_) => return Err(LoadError::NotAnObject("a string")),
        Value::Array(_) => return Err(LoadError::NotAnObject("an array")),
    };

    if object.is_empty() {
        return Ok(None);
    }

    Ok(Some(serde_json::from_value(value)?))
}
