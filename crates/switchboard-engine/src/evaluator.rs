//! Operator evaluation: one compiled evaluator per rule, applied to any
//! number of resolved values.
//!
//! Regex patterns are compiled once here, so a bad pattern fails the rule
//! at construction instead of surfacing mid-evaluation. Schema documents
//! stay lazy: a schema that does not compile counts as a failed validation,
//! never an error.

use std::borrow::Cow;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use serde_json::Value;
use tracing::debug;

use crate::error::EngineError;
use crate::operator::OperatorKind;

/// An `(operator kind, expected value)` pair compiled for repeated use.
#[derive(Debug, Clone)]
pub struct OperatorEvaluator {
    kind: OperatorKind,
    op: CompiledOp,
}

#[derive(Debug, Clone)]
enum CompiledOp {
    Equals(Value),
    ArrayIncludes(Value),
    EmptyArray,
    Null,
    Regex(Arc<Regex>),
    JsonSchema(Value),
}

impl OperatorEvaluator {
    /// Compile an evaluator for `kind` with `expected` as its operand.
    ///
    /// The regex kinds require a string pattern and compile it eagerly;
    /// every other kind takes the operand as-is.
    pub fn compile(kind: OperatorKind, expected: Value) -> Result<Self, EngineError> {
        let op = match kind {
            OperatorKind::Equals => CompiledOp::Equals(expected),
            OperatorKind::ArrayIncludes => CompiledOp::ArrayIncludes(expected),
            OperatorKind::EmptyArray => CompiledOp::EmptyArray,
            OperatorKind::Null => CompiledOp::Null,
            OperatorKind::Regex | OperatorKind::RegexCaseInsensitive => {
                CompiledOp::Regex(Arc::new(compile_pattern(&expected, kind)?))
            }
            OperatorKind::ValidJsonSchema => CompiledOp::JsonSchema(expected),
        };
        Ok(Self { kind, op })
    }

    /// The operator kind this evaluator applies.
    pub fn kind(&self) -> OperatorKind {
        self.kind
    }

    /// Test a resolved value. Pure and infallible: type mismatches are
    /// false results, not errors.
    pub fn apply(&self, actual: &Value) -> bool {
        let result = match &self.op {
            CompiledOp::Equals(expected) => actual == expected,
            CompiledOp::ArrayIncludes(expected) => actual
                .as_array()
                .is_some_and(|items| items.contains(expected)),
            CompiledOp::EmptyArray => actual.as_array().is_some_and(|items| items.is_empty()),
            CompiledOp::Null => actual.is_null(),
            CompiledOp::Regex(regex) => starts_with_match(regex, &stringify(actual)),
            CompiledOp::JsonSchema(schema) => validates_against(schema, actual),
        };
        debug!(operator = %self.kind, ?actual, result, "applied operator");
        result
    }
}

fn compile_pattern(expected: &Value, kind: OperatorKind) -> Result<Regex, EngineError> {
    let Some(pattern) = expected.as_str() else {
        return Err(EngineError::InvalidRegex {
            pattern: expected.to_string(),
            message: "pattern must be a string".to_string(),
        });
    };
    RegexBuilder::new(pattern)
        .case_insensitive(kind == OperatorKind::RegexCaseInsensitive)
        .build()
        .map_err(|err| EngineError::InvalidRegex {
            pattern: pattern.to_string(),
            message: err.to_string(),
        })
}

/// Match anchored at the start of the haystack: a starts-with-pattern
/// match, not a full-string one.
fn starts_with_match(regex: &Regex, haystack: &str) -> bool {
    regex.find(haystack).is_some_and(|m| m.start() == 0)
}

/// String form of a value for pattern matching: strings as their raw
/// content, everything else as compact JSON.
fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        other => Cow::Owned(other.to_string()),
    }
}

fn validates_against(schema: &Value, instance: &Value) -> bool {
    match jsonschema::JSONSchema::compile(schema) {
        Ok(compiled) => compiled.is_valid(instance),
        Err(_) => false,
    }
}
