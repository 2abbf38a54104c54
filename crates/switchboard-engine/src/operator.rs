//! Operator catalogue: the closed set of rule operators and the targets
//! each one is legal for.
//!
//! The target/operator compatibility table is build-time configuration; it
//! never changes at runtime.

use std::fmt;

use crate::error::EngineError;

/// Comparison/validation semantics a rule can apply to a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Deep structural equality, type-sensitive.
    Equals,
    /// Actual is an array containing an element equal to the operand.
    ArrayIncludes,
    /// Actual is an array of length zero.
    EmptyArray,
    /// Actual is the null/no-value sentinel.
    Null,
    /// Operand regex matches at the start of the stringified actual.
    Regex,
    /// Same as [`OperatorKind::Regex`], ignoring case.
    RegexCaseInsensitive,
    /// Actual conforms to the JSON Schema document given as the operand.
    ValidJsonSchema,
}

impl OperatorKind {
    /// Every operator kind, in catalogue order.
    pub const ALL: [OperatorKind; 7] = [
        OperatorKind::Equals,
        OperatorKind::ArrayIncludes,
        OperatorKind::EmptyArray,
        OperatorKind::Null,
        OperatorKind::Regex,
        OperatorKind::RegexCaseInsensitive,
        OperatorKind::ValidJsonSchema,
    ];

    /// Resolve a case-insensitive operator name, e.g. `"equals"` or
    /// `" ARRAY_INCLUDES "`. Surrounding whitespace is ignored.
    pub fn resolve(name: &str) -> Result<Self, EngineError> {
        let normalized = name.trim().to_uppercase();
        match normalized.as_str() {
            "EQUALS" => Ok(OperatorKind::Equals),
            "ARRAY_INCLUDES" => Ok(OperatorKind::ArrayIncludes),
            "EMPTY_ARRAY" => Ok(OperatorKind::EmptyArray),
            "NULL" => Ok(OperatorKind::Null),
            "REGEX" => Ok(OperatorKind::Regex),
            "REGEX_CASE_INSENSITIVE" => Ok(OperatorKind::RegexCaseInsensitive),
            "VALID_JSON_SCHEMA" => Ok(OperatorKind::ValidJsonSchema),
            _ => Err(EngineError::UnsupportedOperator(normalized)),
        }
    }

    /// User-facing name: the identifier lowercased, underscores as spaces.
    pub fn display_name(&self) -> &'static str {
        match self {
            OperatorKind::Equals => "equals",
            OperatorKind::ArrayIncludes => "array includes",
            OperatorKind::EmptyArray => "empty array",
            OperatorKind::Null => "null",
            OperatorKind::Regex => "regex",
            OperatorKind::RegexCaseInsensitive => "regex case insensitive",
            OperatorKind::ValidJsonSchema => "valid json schema",
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Payload sections a rule may inspect, in canonical order.
pub const TARGETS: &[&str] = &[
    "body",
    "params",
    "headers",
    "route_params",
    "path",
    "method",
    "number",
    "global_variable",
    "data_bucket",
];

/// Full operator set, for the object-like targets.
const OBJECT_OPERATORS: &[OperatorKind] = &[
    OperatorKind::Equals,
    OperatorKind::Regex,
    OperatorKind::RegexCaseInsensitive,
    OperatorKind::Null,
    OperatorKind::EmptyArray,
    OperatorKind::ArrayIncludes,
    OperatorKind::ValidJsonSchema,
];

/// Route parameters are single-valued; the array operators make no sense
/// there.
const ROUTE_PARAM_OPERATORS: &[OperatorKind] = &[
    OperatorKind::Equals,
    OperatorKind::Regex,
    OperatorKind::RegexCaseInsensitive,
    OperatorKind::Null,
    OperatorKind::ValidJsonSchema,
];

/// Scalar targets support only equality and pattern matching.
const SCALAR_OPERATORS: &[OperatorKind] = &[
    OperatorKind::Equals,
    OperatorKind::Regex,
    OperatorKind::RegexCaseInsensitive,
];

/// Operators legal for `target`.
pub fn compatible_operators(target: &str) -> Result<&'static [OperatorKind], EngineError> {
    match target {
        "body" | "params" | "headers" | "global_variable" | "data_bucket" => Ok(OBJECT_OPERATORS),
        "route_params" => Ok(ROUTE_PARAM_OPERATORS),
        "path" | "method" | "number" => Ok(SCALAR_OPERATORS),
        _ => Err(EngineError::InvalidTarget(target.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_is_case_insensitive_and_trims() {
        assert_eq!(OperatorKind::resolve("equals").unwrap(), OperatorKind::Equals);
        assert_eq!(OperatorKind::resolve("EQUALS").unwrap(), OperatorKind::Equals);
        assert_eq!(
            OperatorKind::resolve("  array_includes  ").unwrap(),
            OperatorKind::ArrayIncludes
        );
        assert_eq!(
            OperatorKind::resolve("Regex_Case_Insensitive").unwrap(),
            OperatorKind::RegexCaseInsensitive
        );
    }

    #[test]
    fn resolve_rejects_unknown_names() {
        let err = OperatorKind::resolve("greater_than").unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedOperator(name) if name == "GREATER_THAN"));
    }

    #[test]
    fn display_name_lowercases_and_spaces() {
        assert_eq!(OperatorKind::Equals.to_string(), "equals");
        assert_eq!(OperatorKind::ArrayIncludes.to_string(), "array includes");
        assert_eq!(
            OperatorKind::RegexCaseInsensitive.to_string(),
            "regex case insensitive"
        );
        assert_eq!(OperatorKind::ValidJsonSchema.to_string(), "valid json schema");
    }

    #[test]
    fn every_target_has_a_nonempty_operator_set() {
        for target in TARGETS {
            let ops = compatible_operators(target).unwrap();
            assert!(!ops.is_empty(), "no operators for {target}");
        }
    }

    #[test]
    fn scalar_targets_only_support_equality_and_regex() {
        for target in ["path", "method", "number"] {
            let ops = compatible_operators(target).unwrap();
            assert_eq!(
                ops,
                &[
                    OperatorKind::Equals,
                    OperatorKind::Regex,
                    OperatorKind::RegexCaseInsensitive
                ]
            );
        }
    }

    #[test]
    fn route_params_exclude_the_array_operators() {
        let ops = compatible_operators("route_params").unwrap();
        assert!(ops.contains(&OperatorKind::Null));
        assert!(ops.contains(&OperatorKind::ValidJsonSchema));
        assert!(!ops.contains(&OperatorKind::ArrayIncludes));
        assert!(!ops.contains(&OperatorKind::EmptyArray));
    }

    #[test]
    fn object_targets_support_every_operator() {
        for target in ["body", "params", "headers", "global_variable", "data_bucket"] {
            let ops = compatible_operators(target).unwrap();
            for kind in OperatorKind::ALL {
                assert!(ops.contains(&kind), "{target} missing {kind}");
            }
        }
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert!(matches!(
            compatible_operators("cookies"),
            Err(EngineError::InvalidTarget(name)) if name == "cookies"
        ));
    }
}
