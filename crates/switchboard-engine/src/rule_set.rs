//! Conjunction of rules.

use serde_json::Value;

use crate::error::EngineError;
use crate::rule::{CompiledRule, Rule};

/// An ordered collection of rules that must all hold.
///
/// Order is preserved for diagnostics but does not affect the result.
#[derive(Debug, Clone, Default)]
pub struct CompiledRuleSet {
    rules: Vec<CompiledRule>,
}

impl CompiledRuleSet {
    /// Compile every definition; the first invalid one fails the whole set.
    pub fn compile(defs: &[Rule]) -> Result<Self, EngineError> {
        let rules = defs
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<_, _>>()?;
        Ok(Self { rules })
    }

    /// True iff every rule holds, short-circuiting on the first miss.
    ///
    /// The empty set holds vacuously, so a scenario without conditions
    /// acts as a catch-all.
    pub fn evaluate(&self, payload: &Value) -> Result<bool, EngineError> {
        for rule in &self.rules {
            if !rule.evaluate(payload)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules in definition order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }
}
