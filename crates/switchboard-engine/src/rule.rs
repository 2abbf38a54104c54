//! Rule definitions and their compiled, validated form.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::EngineError;
use crate::evaluator::OperatorEvaluator;
use crate::operator::{compatible_operators, OperatorKind};
use crate::resolver::resolve_value;

/// Declarative rule definition: one condition against one payload section.
///
/// This is the shape rules take in scenario configuration, before any
/// validation has happened.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Rule {
    /// Payload section to inspect (`"body"`, `"headers"`, ...).
    pub target: String,
    /// Property locator inside the section; absent or empty tests the
    /// whole section.
    #[serde(default)]
    pub prop: Option<String>,
    /// Operator name, case-insensitive (`"equals"`, `"ARRAY_INCLUDES"`, ...).
    pub op: String,
    /// Operand for the operator; unused by `null` and `empty_array`.
    #[serde(default)]
    pub value: Value,
    /// Negate the operator's outcome.
    #[serde(default)]
    pub invert: bool,
}

/// A validated rule, ready to evaluate any number of payloads.
///
/// All validation happens in [`CompiledRule::compile`]; once a rule exists,
/// evaluation can only fail on a malformed JSONPath locator.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    target: String,
    prop: String,
    evaluator: OperatorEvaluator,
    invert: bool,
}

/// Section stand-in when the payload has no entry for a rule's target;
/// every lookup into it resolves to the no-value sentinel.
static EMPTY_SECTION: Lazy<Value> = Lazy::new(|| Value::Object(serde_json::Map::new()));

impl CompiledRule {
    /// Validate and compile a definition.
    ///
    /// Checks, in order: the operator name resolves, the target is a known
    /// section, the operator is legal for that target, and a regex operand
    /// compiles. Any failure means no rule is produced.
    pub fn compile(def: &Rule) -> Result<Self, EngineError> {
        let kind = OperatorKind::resolve(&def.op)?;
        let legal = compatible_operators(&def.target)?;
        if !legal.contains(&kind) {
            return Err(EngineError::UnsupportedOperator(kind.to_string()));
        }
        let evaluator = OperatorEvaluator::compile(kind, def.value.clone())?;
        debug!(
            target = %def.target,
            prop = ?def.prop,
            operator = %kind,
            invert = def.invert,
            "compiled rule"
        );
        Ok(Self {
            target: def.target.clone(),
            prop: def.prop.clone().unwrap_or_default(),
            evaluator,
            invert: def.invert,
        })
    }

    /// Section of the payload this rule inspects.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Operator kind this rule applies.
    pub fn operator(&self) -> OperatorKind {
        self.evaluator.kind()
    }

    /// Decide this condition against a full payload.
    ///
    /// A payload without this rule's section evaluates against an empty
    /// object, so nested lookups resolve to null rather than failing.
    pub fn evaluate(&self, payload: &Value) -> Result<bool, EngineError> {
        let section = payload.get(&self.target).unwrap_or(&EMPTY_SECTION);
        let actual = resolve_value(section, &self.prop)?;
        let matched = self.evaluator.apply(&actual);
        let verdict = matched != self.invert;
        debug!(
            target = %self.target,
            prop = %self.prop,
            matched,
            invert = self.invert,
            verdict,
            "evaluated rule"
        );
        Ok(verdict)
    }
}
