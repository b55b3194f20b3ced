use super::Rules;
use crate::ast::{Doc, Param, TypeRef};

/// Applies a [`Rules`] set to the pieces of a class: names, types and docs.
pub struct Rewriter<'r> {
    rules: &'r Rules,
    namespace: &'r str,
}

impl<'r> Rewriter<'r> {
    /// `namespace` is the prefix stripped from class and base names
    /// (`QuantLib` strips every `QuantLib::`)
    pub fn new(rules: &'r Rules, namespace: &'r str) -> Self {
        Self { rules, namespace }
    }

    pub fn method_name(&self, name: &str) -> String {
        self.rules.method_names.apply(name)
    }

    /// Rewrite every token, drop the empty ones, join with single spaces,
    /// then strip ownership wrappers from the joined type.
    pub fn type_name(&self, ty: &TypeRef) -> String {
        let tokens: Vec<String> = ty
            .tokens
            .iter()
            .map(|token| {
                let text = self.rules.type_references.apply(token.text());
                self.rules.types.apply(&text)
            })
            .filter(|text| !text.is_empty())
            .collect();
        self.rules.type_removals.apply(&tokens.join(" "))
    }

    /// `Type name, Type name`
    pub fn params(&self, params: &[Param]) -> String {
        params
            .iter()
            .map(|param| {
                let ty = self.type_name(&param.ty);
                if ty.is_empty() {
                    param.name.clone()
                } else {
                    format!("{} {}", ty, param.name)
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Javadoc block at `indent`, or an empty string when nothing is left
    /// after the documentation rules.
    pub fn javadoc(&self, doc: &Doc, indent: &str) -> String {
        let lines: Vec<String> = doc
            .fragments()
            .map(|fragment| self.rules.docs.apply(fragment))
            .flat_map(|text| {
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(|line| line.replace("*/", "*&#47;"))
                    .collect::<Vec<_>>()
            })
            .collect();

        if lines.is_empty() {
            return String::new();
        }

        let mut out = format!("{}/**\n", indent);
        for line in lines {
            out.push_str(&format!("{} * {}\n", indent, line));
        }
        out.push_str(&format!("{} */\n", indent));
        out
    }

    /// Remove every `namespace::` occurrence in one pass
    pub fn strip_namespace(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            return name.to_string();
        }
        name.replace(&format!("{}::", self.namespace), "")
    }

    /// Declared name of the generated class: namespace stripped, and the
    /// innermost segment if the name is still qualified
    pub fn class_name(&self, qualified: &str) -> String {
        let stripped = self.strip_namespace(qualified);
        match stripped.rsplit("::").next() {
            Some(last) if !last.is_empty() => last.to_string(),
            _ => stripped,
        }
    }
}
