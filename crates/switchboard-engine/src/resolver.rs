//! Value extraction from a payload section.
//!
//! A rule's property locator selects what gets tested: nothing (the whole
//! section), a `$`-prefixed JSONPath query, or a dot-separated field path.
//! The two path styles are never mixed; a leading `$` picks the query
//! engine, anything else descends field by field.

use std::borrow::Cow;

use serde_json::Value;
use serde_json_path::JsonPath;

use crate::error::EngineError;

/// Resolve `locator` against a payload section.
///
/// A JSONPath query returns its single match directly when exactly one node
/// matches, and the full ordered match list otherwise (including the empty
/// list for zero matches). A dotted path that runs into missing or
/// non-object data resolves to JSON null: absent data is a normal outcome,
/// only a malformed query is an error.
pub fn resolve_value<'a>(section: &'a Value, locator: &str) -> Result<Cow<'a, Value>, EngineError> {
    if locator.is_empty() {
        return Ok(Cow::Borrowed(section));
    }
    if locator.starts_with('$') {
        return query_path(section, locator);
    }
    Ok(object_path(section, locator))
}

fn query_path<'a>(section: &'a Value, locator: &str) -> Result<Cow<'a, Value>, EngineError> {
    let path = JsonPath::parse(locator).map_err(|source| EngineError::PathParsing {
        locator: locator.to_string(),
        source,
    })?;
    let matches = path.query(section).all();
    if matches.len() == 1 {
        Ok(Cow::Borrowed(matches[0]))
    } else {
        Ok(Cow::Owned(Value::Array(
            matches.into_iter().cloned().collect(),
        )))
    }
}

fn object_path<'a>(section: &'a Value, locator: &str) -> Cow<'a, Value> {
    let mut current = section;
    for field in locator.split('.') {
        match current.get(field) {
            Some(next) => current = next,
            None => return Cow::Owned(Value::Null),
        }
    }
    Cow::Borrowed(current)
}
