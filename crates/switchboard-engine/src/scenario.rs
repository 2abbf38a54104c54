//! Scenarios: a named rule set paired with a canned response.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::EngineError;
use crate::rule::Rule;
use crate::rule_set::CompiledRuleSet;

/// Declarative scenario definition.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Scenario {
    /// Identification for diagnostics; plays no part in matching.
    pub name: String,
    /// Conditions that must all hold for the scenario to activate.
    #[serde(default)]
    pub rules: Vec<Rule>,
    /// Returned verbatim when the scenario activates; never inspected.
    pub response: Value,
}

/// A compiled scenario, ready for repeated evaluation.
#[derive(Debug, Clone)]
pub struct CompiledScenario {
    name: String,
    rules: CompiledRuleSet,
    response: Value,
}

impl CompiledScenario {
    /// Compile a definition; fails if any rule definition is invalid.
    pub fn compile(def: Scenario) -> Result<Self, EngineError> {
        let rules = CompiledRuleSet::compile(&def.rules)?;
        Ok(Self {
            name: def.name,
            rules,
            response: def.response,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The scenario's rule set.
    pub fn rules(&self) -> &CompiledRuleSet {
        &self.rules
    }

    /// True iff every rule matches the payload.
    pub fn evaluate(&self, payload: &Value) -> Result<bool, EngineError> {
        let active = self.rules.evaluate(payload)?;
        debug!(scenario = %self.name, active, "evaluated scenario");
        Ok(active)
    }

    /// The stored response, untouched. Independent of activation; which
    /// active scenario answers a request is the dispatcher's call.
    pub fn response(&self) -> &Value {
        &self.response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scenario(raw: Value) -> CompiledScenario {
        CompiledScenario::compile(serde_json::from_value(raw).unwrap()).unwrap()
    }

    #[test]
    fn activates_when_every_condition_holds() {
        let s = scenario(json!({
            "name": "Admin Access",
            "rules": [
                {"target": "body", "prop": "role", "op": "equals", "value": "admin"},
                {"target": "body", "prop": "authenticated", "op": "equals", "value": true}
            ],
            "response": {"status": 200, "data": {"message": "Welcome, Admin!"}}
        }));

        assert!(s
            .evaluate(&json!({"body": {"role": "admin", "authenticated": true}}))
            .unwrap());
        assert!(!s
            .evaluate(&json!({"body": {"role": "admin", "authenticated": false}}))
            .unwrap());
    }

    #[test]
    fn response_is_exposed_verbatim_regardless_of_activation() {
        let response = json!({"status": 404, "body": {"error": "not found"}});
        let s = scenario(json!({
            "name": "fallback",
            "rules": [
                {"target": "path", "op": "equals", "value": "/missing"}
            ],
            "response": response.clone()
        }));

        // Response retrieval is independent of whether the scenario matched.
        assert!(!s.evaluate(&json!({"path": "/present"})).unwrap());
        assert_eq!(*s.response(), response);
        assert!(s.evaluate(&json!({"path": "/missing"})).unwrap());
        assert_eq!(*s.response(), response);
    }

    #[test]
    fn scenario_without_rules_always_activates() {
        let s = scenario(json!({
            "name": "default",
            "response": {"status": 200}
        }));
        assert!(s.rules().is_empty());
        assert!(s.evaluate(&json!({})).unwrap());
        assert!(s.evaluate(&json!({"body": {"anything": [1, 2, 3]}})).unwrap());
    }

    #[test]
    fn name_is_metadata_only() {
        let s = scenario(json!({
            "name": "does not matter for matching",
            "rules": [{"target": "method", "op": "equals", "value": "GET"}],
            "response": null
        }));
        assert_eq!(s.name(), "does not matter for matching");
        assert!(s.evaluate(&json!({"method": "GET"})).unwrap());
    }

    #[test]
    fn compilation_fails_on_any_invalid_rule() {
        let def: Scenario = serde_json::from_value(json!({
            "name": "broken",
            "rules": [
                {"target": "body", "op": "equals", "value": 1},
                {"target": "path", "op": "array_includes", "value": 1}
            ],
            "response": {}
        }))
        .unwrap();
        let err = CompiledScenario::compile(def).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedOperator(name) if name == "array includes"));
    }
}
