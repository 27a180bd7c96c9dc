//! Deserialization of rule files into an [`LSystem`].
//!
//! The accepted shape is the legacy JSON rule file:
//!
//! ```json
//! { "Initial": "F+F+F+F", "NumGen": 4, "Rules": [{ "Character": "F", "Result": "F+F-F" }] }
//! ```
//!
//! Snake-case keys (`initial`, `num_gen`, `rules`, `character`, `result`) are accepted as well.

use crate::error::{LSystemError, Result};
use crate::grammar::{Grammar, LSystem};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFile {
    #[serde(alias = "Initial")]
    pub initial: String,
    #[serde(alias = "NumGen")]
    pub num_gen: u32,
    #[serde(alias = "Rules", default)]
    pub rules: Vec<Rule>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    #[serde(alias = "Character")]
    pub character: String,
    #[serde(alias = "Result")]
    pub result: String,
}

impl TryFrom<RuleFile> for LSystem {
    type Error = LSystemError;

    fn try_from(file: RuleFile) -> Result<Self> {
        let mut grammar = Grammar::new();
        for rule in &file.rules {
            let mut chars = rule.character.chars();
            let symbol = match (chars.next(), chars.next()) {
                (Some(symbol), None) => symbol,
                _ => {
                    return Err(LSystemError::Config(format!(
                        "rule symbol {:?} must be exactly one character",
                        rule.character
                    )));
                }
            };
            if grammar.contains(symbol) {
                return Err(LSystemError::Config(format!(
                    "duplicate rule for '{symbol}'"
                )));
            }
            grammar.insert(symbol, &rule.result);
        }
        Ok(LSystem::new(grammar, &file.initial, file.num_gen))
    }
}

impl LSystem {
    /// Parses and validates a JSON rule file.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: RuleFile = serde_json::from_str(json)?;
        file.try_into()
    }
}
