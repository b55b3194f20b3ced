//! JSON rule configuration.
//!
//! ```json
//! {
//!   "method_names": [{ "pattern": "^operator\\s*<<", "replacement": "print" }],
//!   "type_removals": [{ "pattern": "\\bHandle\\s*<", "unwrap": true }]
//! }
//! ```
//!
//! Every key is optional. A present key replaces that whole table; absent
//! keys keep the built-in rules.

use super::{Replacement, Rule, RuleTable, Rules};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub unwrap: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method_names: Option<Vec<RuleSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_references: Option<Vec<RuleSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<RuleSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_removals: Option<Vec<RuleSpec>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<Vec<RuleSpec>>,
}

impl RulesConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Every table of `rules`, for printing the effective configuration
    pub fn from_rules(rules: &Rules) -> Self {
        let specs = |table: &RuleTable| Some(table.rules().iter().map(RuleSpec::from).collect());
        Self {
            method_names: specs(&rules.method_names),
            type_references: specs(&rules.type_references),
            types: specs(&rules.types),
            type_removals: specs(&rules.type_removals),
            docs: specs(&rules.docs),
        }
    }

    /// Compile the configured tables over `base`
    pub fn into_rules(self, base: &Rules) -> Result<Rules, ConfigError> {
        Ok(Rules {
            method_names: compile("method_names", self.method_names, &base.method_names)?,
            type_references: compile("type_references", self.type_references, &base.type_references)?,
            types: compile("types", self.types, &base.types)?,
            type_removals: compile("type_removals", self.type_removals, &base.type_removals)?,
            docs: compile("docs", self.docs, &base.docs)?,
        })
    }
}

fn compile(
    table: &'static str,
    specs: Option<Vec<RuleSpec>>,
    base: &RuleTable,
) -> Result<RuleTable, ConfigError> {
    let Some(specs) = specs else {
        return Ok(base.clone());
    };

    let rules = specs
        .into_iter()
        .map(|spec| {
            let rule = if spec.unwrap {
                Rule::unwrap(&spec.pattern)
            } else {
                Rule::new(&spec.pattern, spec.replacement.as_str())
            };
            rule.map_err(|source| ConfigError::Pattern {
                table,
                pattern: spec.pattern.clone(),
                source,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("using {} custom {} rules", rules.len(), table);
    Ok(RuleTable::new(rules))
}

impl From<&Rule> for RuleSpec {
    fn from(rule: &Rule) -> Self {
        match rule.replacement() {
            Replacement::Template(template) => RuleSpec {
                pattern: rule.pattern().to_string(),
                replacement: template.clone(),
                unwrap: false,
            },
            Replacement::Unwrap => RuleSpec {
                pattern: rule.pattern().to_string(),
                replacement: String::new(),
                unwrap: true,
            },
        }
    }
}
