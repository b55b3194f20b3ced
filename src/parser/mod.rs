pub mod dom;
mod tree_builder;

pub use dom::{Element, XmlNode};
pub use tree_builder::TreeBuilder;

use crate::ast::ClassNode;
use crate::error::ParseError;

/// A parsed Doxygen document: the class and struct records it contains
#[derive(Debug, Clone)]
pub struct Document {
    pub compounds: Vec<Element>,
}

impl Document {
    /// Qualified name of a compound, for error reporting before it is built
    pub fn compound_name(def: &Element) -> String {
        def.child("compoundname")
            .map(|n| n.text().trim().to_string())
            .unwrap_or_else(|| "<unnamed>".to_string())
    }
}

/// Parser trait - reads source text into documents and class records
pub trait Parser {
    fn parse(&self, source: &str) -> Result<Document, ParseError>;

    fn build_class(&self, source: &str, compound: &Element) -> Result<ClassNode, ParseError>;
}

/// Doxygen XML parser
pub struct DoxygenParser {
    // Configuration only, no state
}

impl DoxygenParser {
    pub fn new() -> Self {
        Self {}
    }
}

impl Default for DoxygenParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for DoxygenParser {
    fn parse(&self, source: &str) -> Result<Document, ParseError> {
        let root = dom::parse(source)?;

        let mut compounds = Vec::new();
        let candidates = if root.name == "compounddef" {
            vec![&root]
        } else {
            root.descendants_named("compounddef")
        };
        for def in candidates {
            if matches!(def.attr("kind"), Some("class") | Some("struct")) {
                compounds.push(def.clone());
            }
        }

        Ok(Document { compounds })
    }

    fn build_class(&self, source: &str, compound: &Element) -> Result<ClassNode, ParseError> {
        TreeBuilder::new(source).build(compound)
    }
}
