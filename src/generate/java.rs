use super::{GenerateOptions, GeneratedClass, Generator, MemberOrder, Output};
use crate::ast::{ClassNode, MemberKind, MemberNode};
use crate::rewrite::{Rewriter, Rules};
use crate::transform::{Category, MemberGroup, MethodModifier, Selection};
use std::sync::Arc;

const STUB_BODY: &str = "throw new UnsupportedOperationException();";

/// Java skeleton generator
pub struct JavaGenerator {
    rules: Arc<Rules>,
}

impl JavaGenerator {
    pub fn new(rules: Arc<Rules>) -> Self {
        Self { rules }
    }

    fn indent(&self, output: &mut Output, level: usize) {
        for _ in 0..level {
            output.push("    ");
        }
    }

    fn emit_header(&self, class: &ClassNode, rewriter: &Rewriter, name: &str, output: &mut Output) {
        let doc = rewriter.javadoc(&class.doc, "");
        output.push_block(&doc);

        let mut header = words(&[class.visibility.keyword(), class.kind.as_str(), name]);

        let supertypes: Vec<String> = class.supertypes().map(|b| rewriter.strip_namespace(&b.name)).collect();
        if supertypes.len() > 1 {
            log::warn!(
                "{} has {} non-virtual bases ({}); Java allows one superclass",
                class.name,
                supertypes.len(),
                supertypes.join(", ")
            );
        }
        if !supertypes.is_empty() {
            header.push_str(" extends ");
            header.push_str(&supertypes.join(", "));
        }

        let capabilities: Vec<String> = class.capabilities().map(|b| rewriter.strip_namespace(&b.name)).collect();
        if !capabilities.is_empty() {
            header.push_str(" implements ");
            header.push_str(&capabilities.join(", "));
        }

        output.push(&header);
        output.push(" {");
        output.newline();
    }

    fn emit_groups(&self, groups: &[MemberGroup], rewriter: &Rewriter, output: &mut Output) {
        for group in groups.iter().filter(|g| !g.is_empty()) {
            self.emit_banner(&group.label.banner(), output);
            for member in &group.members {
                match group.label.category {
                    Category::Method(modifier) => self.emit_method(member, modifier, rewriter, output),
                    Category::Field(_) => self.emit_field(member, rewriter, output),
                }
            }
        }
    }

    fn emit_banner(&self, banner: &str, output: &mut Output) {
        output.newline();
        output.newline();
        self.indent(output, 1);
        output.push("//");
        output.newline();
        self.indent(output, 1);
        output.push("// ");
        output.push(banner);
        output.newline();
        self.indent(output, 1);
        output.push("//");
        output.newline();
        output.newline();
    }

    fn emit_field(&self, field: &MemberNode, rewriter: &Rewriter, output: &mut Output) {
        output.push_block(&rewriter.javadoc(&field.doc, "    "));

        let mutable = matches!(field.kind, MemberKind::Field { mutable: true, .. });
        let ty = rewriter.type_name(&field.ty);
        let decl = words(&[
            field.visibility.keyword(),
            if field.is_static { "static" } else { "" },
            if mutable { "/* @Mutable */" } else { "" },
            &ty,
            &field.name,
        ]);

        self.indent(output, 1);
        output.push(&decl);
        output.push(";");
        output.newline();
    }

    fn emit_method(
        &self,
        method: &MemberNode,
        modifier: MethodModifier,
        rewriter: &Rewriter,
        output: &mut Output,
    ) {
        let MemberKind::Method { overrides, is_const, .. } = &method.kind else {
            return;
        };
        let is_abstract = modifier == MethodModifier::Abstract;

        output.push_block(&rewriter.javadoc(&method.doc, "    "));
        if *overrides {
            self.indent(output, 1);
            output.push("@Override");
            output.newline();
        }

        let ty = rewriter.type_name(&method.ty);
        let signature = format!("{}({})", rewriter.method_name(&method.name), rewriter.params(method.params()));
        let decl = words(&[
            method.visibility.keyword(),
            if method.is_static { "static" } else { "" },
            if is_abstract { "abstract" } else { "" },
            &ty,
            &signature,
        ]);

        self.indent(output, 1);
        output.push(&decl);
        if *is_const {
            output.push(" /* @ReadOnly */");
        }

        if is_abstract {
            output.push(";");
            output.newline();
        } else {
            output.push(" {");
            output.newline();
            self.indent(output, 2);
            output.push(STUB_BODY);
            output.newline();
            self.indent(output, 1);
            output.push("}");
            output.newline();
        }
        output.newline();
    }
}

/// Join the non-empty parts with single spaces
fn words(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
}

impl Generator for JavaGenerator {
    fn generate(&self, class: &ClassNode, selection: &Selection, options: &GenerateOptions) -> GeneratedClass {
        let rewriter = Rewriter::new(&self.rules, &options.namespace);
        let name = rewriter.class_name(&class.name);
        let mut output = Output::new();

        self.emit_header(class, &rewriter, &name, &mut output);

        let (first, second) = match options.member_order {
            MemberOrder::FieldsFirst => (&selection.fields, &selection.methods),
            MemberOrder::MethodsFirst => (&selection.methods, &selection.fields),
        };
        self.emit_groups(first, &rewriter, &mut output);
        self.emit_groups(second, &rewriter, &mut output);

        output.push("}");
        output.newline();

        GeneratedClass {
            file_name: format!("{}.{}", name, options.extension),
            name,
            code: output.finish(),
        }
    }
}
