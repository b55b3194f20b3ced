//! Java skeleton generation from Doxygen XML.
//!
//! ```text
//! XML ─ parser ─> ClassNode ─ transform ─> Selection ─ generate (+ rewrite) ─> GeneratedClass
//! ```
//!
//! ```no_run
//! use cpp2java::{GenerateOptions, Pipeline};
//!
//! let xml = std::fs::read_to_string("xml/classQuantLib_1_1Instrument.xml").unwrap();
//! let result = Pipeline::standard()
//!     .compile(&xml, &GenerateOptions::new("QuantLib"))
//!     .unwrap();
//! for class in &result.classes {
//!     println!("// {}\n{}", class.file_name, class.code);
//! }
//! ```

pub mod ast;
pub mod error;
pub mod generate;
pub mod parser;
pub mod rewrite;
pub mod transform;

pub use error::{CompileError, ConfigError, ErrorKind, ParseError, Position};
pub use generate::{GenerateOptions, GeneratedClass, Generator, JavaGenerator, MemberOrder, write_unit};
pub use parser::{Document, DoxygenParser, Parser};
pub use rewrite::{Rewriter, Rules, RulesConfig};
pub use transform::{Selection, select_members};

use std::collections::HashMap;
use std::sync::Arc;

/// Outcome of compiling one document
#[derive(Debug, Default)]
pub struct CompileResult {
    /// One unit per class or struct, in document order
    pub classes: Vec<GeneratedClass>,
    /// Classes rejected as malformed or clashing with an earlier file name;
    /// the others are still generated
    pub errors: Vec<CompileError>,
}

impl CompileResult {
    /// All generated units in one text, each preceded by a `// <file name>` line
    pub fn listing(&self) -> String {
        self.classes
            .iter()
            .map(|class| format!("// {}\n{}", class.file_name, class.code))
            .collect()
    }
}

/// Parser, selector and generator wired together
pub struct Pipeline {
    parser: Box<dyn Parser>,
    generator: Box<dyn Generator>,
}

impl Pipeline {
    /// Doxygen parser and Java generator with the built-in rules
    pub fn standard() -> Self {
        Self::with_rules(Rules::standard())
    }

    pub fn with_rules(rules: Arc<Rules>) -> Self {
        Self {
            parser: Box::new(DoxygenParser::new()),
            generator: Box::new(JavaGenerator::new(rules)),
        }
    }

    /// Translate every class of `source`.
    ///
    /// Fails only when the document itself cannot be read. A malformed class,
    /// or one whose file name is already taken by an earlier class, is
    /// reported in [`CompileResult::errors`] and skipped.
    pub fn compile(&self, source: &str, options: &GenerateOptions) -> Result<CompileResult, CompileError> {
        let document = self.parser.parse(source)?;
        let mut result = CompileResult::default();
        let mut file_owners: HashMap<String, String> = HashMap::new();

        for compound in &document.compounds {
            match self.parser.build_class(source, compound) {
                Ok(class) => {
                    let selection = select_members(&class);
                    log::debug!("{}: {} members", class.name, selection.len());
                    let unit = self.generator.generate(&class, &selection, options);
                    match file_owners.get(&unit.file_name) {
                        Some(first) => result.errors.push(CompileError::Duplicate {
                            class: class.name.clone(),
                            file_name: unit.file_name,
                            first: first.clone(),
                        }),
                        None => {
                            file_owners.insert(unit.file_name.clone(), class.name.clone());
                            result.classes.push(unit);
                        }
                    }
                }
                Err(source) => result.errors.push(CompileError::Class {
                    class: Document::compound_name(compound),
                    source,
                }),
            }
        }

        Ok(result)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}
