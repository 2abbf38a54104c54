//! Decision core for Switchboard's request matching.
//!
//! This library evaluates declarative conditions ("rules") against a
//! request-like payload — a JSON object keyed by sections such as `body`,
//! `headers`, `params`, `path`, and `method` — and aggregates them into
//! named scenarios that select a canned response when every condition
//! holds. Transport, definition loading, and scenario dispatch live in the
//! layers around this crate.
//!
//! Rules pick a value out of their target section with a dotted path or a
//! `$`-prefixed JSONPath query, then test it with one of a fixed operator
//! set (equality, regex, array membership, emptiness, nullness, JSON
//! Schema conformance), optionally inverted. All validation happens when a
//! rule is compiled; missing payload data never fails an evaluation.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use switchboard_engine::{CompiledScenario, Scenario};
//!
//! let def: Scenario = serde_json::from_value(json!({
//!     "name": "premium user",
//!     "rules": [
//!         {"target": "body", "prop": "user.tier", "op": "equals", "value": "premium"}
//!     ],
//!     "response": {"status": 200, "body": {"discount": 20}}
//! }))
//! .unwrap();
//!
//! let scenario = CompiledScenario::compile(def).unwrap();
//! let payload = json!({"body": {"user": {"tier": "premium"}}});
//! assert!(scenario.evaluate(&payload).unwrap());
//! assert_eq!(scenario.response()["body"]["discount"], 20);
//! ```

mod error;
mod evaluator;
mod operator;
mod resolver;
mod rule;
mod rule_set;
mod scenario;

pub use error::EngineError;
pub use evaluator::OperatorEvaluator;
pub use operator::{compatible_operators, OperatorKind, TARGETS};
pub use resolver::resolve_value;
pub use rule::{CompiledRule, Rule};
pub use rule_set::CompiledRuleSet;
pub use scenario::{CompiledScenario, Scenario};
