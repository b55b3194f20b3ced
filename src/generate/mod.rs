mod java;
mod output;

pub use java::JavaGenerator;
pub use output::{Output, write_unit};

use crate::ast::ClassNode;
use crate::transform::Selection;
use serde::Serialize;

/// Which block of a class is emitted first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberOrder {
    #[default]
    FieldsFirst,
    MethodsFirst,
}

/// Generator options
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Prefix stripped from class and base names, without the trailing `::`
    pub namespace: String,
    pub member_order: MemberOrder,
    /// Output file extension, without the dot
    pub extension: String,
}

impl GenerateOptions {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            member_order: MemberOrder::default(),
            extension: "java".to_string(),
        }
    }
}

/// One generated source unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedClass {
    /// Declared class name
    pub name: String,
    /// `<name>.<extension>`
    pub file_name: String,
    pub code: String,
}

/// Generator trait - converts a class and its member groups to code
pub trait Generator {
    fn generate(&self, class: &ClassNode, selection: &Selection, options: &GenerateOptions) -> GeneratedClass;
}
