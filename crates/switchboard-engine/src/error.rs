//! Error types for the decision engine.

use crate::operator::TARGETS;

/// Errors raised while compiling or evaluating rules.
///
/// Everything except [`EngineError::PathParsing`] is raised at compile time;
/// once a rule exists, only a malformed JSONPath locator can fail an
/// evaluation. Missing payload data is absorbed into boolean results.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Operator name did not resolve to a known kind, or the kind is not
    /// legal for the rule's target.
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),

    /// Target is not one of the recognized payload sections.
    #[error("Invalid target '{0}'. Must be one of: {list}", list = TARGETS.join(", "))]
    InvalidTarget(String),

    /// A regex operator was given a pattern that does not compile.
    #[error("Invalid regex pattern '{pattern}': {message}")]
    InvalidRegex { pattern: String, message: String },

    /// A `$`-prefixed property locator is not valid JSONPath.
    #[error("Invalid JSONPath syntax: {locator}")]
    PathParsing {
        locator: String,
        #[source]
        source: serde_json_path::ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_target_lists_every_section() {
        let message = EngineError::InvalidTarget("cookies".to_string()).to_string();
        assert!(message.starts_with("Invalid target 'cookies'"));
        for target in TARGETS {
            assert!(message.contains(target), "missing {target} in: {message}");
        }
    }

    #[test]
    fn unsupported_operator_names_the_operator() {
        let message = EngineError::UnsupportedOperator("GREATER_THAN".to_string()).to_string();
        assert_eq!(message, "Unsupported operator: GREATER_THAN");
    }
}
