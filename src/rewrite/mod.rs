//! Ordered substitution rules.
//!
//! A [`RuleTable`] is an ordered list of `(matcher, replacement)` pairs applied
//! one after the other over a string. Order is significant: an early rule may
//! produce text a later rule matches (`operator+=` must become `addAssign`
//! before the `operator+` rule gets a chance to see it), and no rule ever
//! re-triggers an earlier one within a pass.
//!
//! Five tables make up a [`Rules`] set:
//!
//! - `method_names`: operator overloads to identifiers
//! - `type_references`: reference qualifiers on each type token
//! - `types`: per-token type substitutions
//! - `type_removals`: ownership-wrapper removal over the joined type
//! - `docs`: Doxygen markup to Javadoc
//!
//! The standard set is built once per process (see [`Rules::standard`]) and
//! shared read-only.

mod config;
mod rewriter;
mod tables;

pub use config::{RuleSpec, RulesConfig};
pub use rewriter::Rewriter;

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

/// What a rule does with the text its matcher found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacement {
    /// Replace every match with the template (`$1` expands capture groups)
    Template(String),
    /// The matcher ends at a template's opening `<`: drop the match and the
    /// matching closing `>`, keeping the contained type
    Unwrap,
}

#[derive(Debug, Clone)]
pub struct Rule {
    matcher: Regex,
    replacement: Replacement,
}

impl Rule {
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            matcher: Regex::new(pattern)?,
            replacement: Replacement::Template(replacement.into()),
        })
    }

    pub fn unwrap(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            matcher: Regex::new(pattern)?,
            replacement: Replacement::Unwrap,
        })
    }

    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    pub fn replacement(&self) -> &Replacement {
        &self.replacement
    }

    pub fn apply(&self, text: &str) -> String {
        match &self.replacement {
            Replacement::Template(template) => {
                self.matcher.replace_all(text, template.as_str()).into_owned()
            }
            Replacement::Unwrap => unwrap_all(&self.matcher, text),
        }
    }
}

/// Ordered rule list
#[derive(Debug, Clone, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        apply(self, text)
    }
}

/// Run every rule of `table` over `text`, in order
pub fn apply(table: &RuleTable, text: &str) -> String {
    table
        .rules
        .iter()
        .fold(text.to_string(), |text, rule| rule.apply(&text))
}

/// The complete set of rewrite tables used by a run
#[derive(Debug, Clone)]
pub struct Rules {
    pub method_names: RuleTable,
    pub type_references: RuleTable,
    pub types: RuleTable,
    pub type_removals: RuleTable,
    pub docs: RuleTable,
}

static STANDARD: Lazy<Arc<Rules>> = Lazy::new(|| Arc::new(tables::standard()));

impl Rules {
    /// The built-in tables, tuned for QuantLib sources
    pub fn standard() -> Arc<Rules> {
        Arc::clone(&STANDARD)
    }
}

fn unwrap_all(matcher: &Regex, text: &str) -> String {
    let mut out = text.to_string();
    let mut search_from = 0;

    while let Some(m) = matcher.find_at(&out, search_from) {
        let (start, open_end) = (m.start(), m.end());
        if start == open_end {
            // Empty match, nothing to unwrap here
            match out[start..].chars().next() {
                Some(ch) => {
                    search_from = start + ch.len_utf8();
                    continue;
                }
                None => break,
            }
        }
        match matching_close(&out[open_end..]) {
            Some(close) => {
                let close = open_end + close;
                out = format!("{}{}{}", &out[..start], out[open_end..close].trim(), &out[close + 1..]);
            }
            None => {
                log::warn!("no closing '>' for '{}' in '{}'", m.as_str(), text);
                out.replace_range(start..open_end, "");
            }
        }
        search_from = start;
    }

    out
}

/// Byte index of the `>` closing an already opened `<`
fn matching_close(text: &str) -> Option<usize> {
    let mut depth = 1usize;
    for (i, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}
