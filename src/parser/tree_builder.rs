use super::dom::{Element, XmlNode};
use crate::ast::*;
use crate::error::{ErrorKind, ParseError, Position};

/// Builds a `ClassNode` from a Doxygen `compounddef` element
pub struct TreeBuilder<'a> {
    source: &'a str,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    pub fn build(&self, def: &Element) -> Result<ClassNode, ParseError> {
        let kind = self.required_attr(def, "kind")?;
        let kind = ClassKind::from_attr(kind).ok_or_else(|| {
            self.error(ErrorKind::InvalidAttribute, format!("'{}' is not a class or struct", kind), def)
        })?;
        let visibility = self.visibility(def)?;
        let name = self.required_child(def, "compoundname")?.text().trim().to_string();
        if name.is_empty() {
            return Err(self.error(ErrorKind::MissingElement, "compounddef has an empty <compoundname>", def));
        }

        let bases = def
            .children_named("basecompoundref")
            .map(|base| BaseRef {
                name: base.text().trim().to_string(),
                inheritance: match base.attr("virt") {
                    Some("virtual") => Inheritance::Capability,
                    _ => Inheritance::Supertype,
                },
            })
            .filter(|base| !base.name.is_empty())
            .collect();

        let mut members = Vec::new();
        for memberdef in def.descendants_named("memberdef") {
            if let Some(member) = self.member(memberdef)? {
                members.push(member);
            }
        }

        Ok(ClassNode {
            name,
            kind,
            visibility,
            bases,
            doc: self.doc(def),
            members,
        })
    }

    /// Returns `None` for member kinds that are not translated (typedefs, enums, friends...)
    fn member(&self, def: &Element) -> Result<Option<MemberNode>, ParseError> {
        let kind = self.required_attr(def, "kind")?;
        if kind != "function" && kind != "variable" {
            log::debug!("skipping {} member at byte {}", kind, def.offset);
            return Ok(None);
        }

        let name = self.required_child(def, "name")?.text().trim().to_string();
        if name.is_empty() {
            return Err(self.error(ErrorKind::MissingElement, "memberdef has an empty <name>", def));
        }
        let is_static = self.flag(def, "static")?;

        let kind = if kind == "function" {
            let virt = self.required_attr(def, "virt")?;
            MemberKind::Method {
                pure_virtual: virt == "pure-virtual",
                overrides: def.child("reimplements").is_some(),
                is_const: def.attr("const") == Some("yes"),
                params: def.children_named("param").filter_map(|p| self.param(p)).collect(),
            }
        } else {
            MemberKind::Field {
                mutable: self.flag(def, "mutable")?,
            }
        };

        Ok(Some(MemberNode {
            name,
            ty: type_ref(def.child("type")),
            visibility: self.visibility(def)?,
            is_static,
            kind,
            doc: self.doc(def),
        }))
    }

    /// `(void)` parameter lists yield no parameter
    fn param(&self, param: &Element) -> Option<Param> {
        let ty = type_ref(param.child("type"));
        let name = ["declname", "defname", "name"]
            .iter()
            .filter_map(|tag| param.child(tag))
            .map(|el| el.text().trim().to_string())
            .find(|name| !name.is_empty());

        match name {
            Some(name) => Some(Param { ty, name }),
            None if ty.raw().trim() == "void" => None,
            None => Some(Param {
                ty,
                name: Param::FALLBACK_NAME.to_string(),
            }),
        }
    }

    fn doc(&self, def: &Element) -> Doc {
        let fragments = |tag: &str| -> Vec<String> {
            def.child(tag)
                .map(|desc| desc.elements().map(Element::to_xml).collect())
                .unwrap_or_default()
        };
        Doc {
            brief: fragments("briefdescription"),
            detailed: fragments("detaileddescription"),
        }
    }

    fn visibility(&self, def: &Element) -> Result<Visibility, ParseError> {
        let prot = def.attr("prot");
        Visibility::from_attr(prot).ok_or_else(|| {
            self.error(
                ErrorKind::InvalidAttribute,
                format!("unknown protection '{}'", prot.unwrap_or_default()),
                def,
            )
        })
    }

    fn flag(&self, def: &Element, name: &str) -> Result<bool, ParseError> {
        match self.required_attr(def, name)? {
            "yes" => Ok(true),
            "no" => Ok(false),
            other => Err(self.error(
                ErrorKind::InvalidAttribute,
                format!("{} has {}=\"{}\", expected yes or no", def.name, name, other),
                def,
            )),
        }
    }

    fn required_attr<'e>(&self, def: &'e Element, name: &str) -> Result<&'e str, ParseError> {
        def.attr(name).ok_or_else(|| {
            self.error(
                ErrorKind::MissingAttribute,
                format!("{} is missing the '{}' attribute", def.name, name),
                def,
            )
        })
    }

    fn required_child<'e>(&self, def: &'e Element, name: &str) -> Result<&'e Element, ParseError> {
        def.child(name).ok_or_else(|| {
            self.error(
                ErrorKind::MissingElement,
                format!("{} has no <{}>", def.name, name),
                def,
            )
        })
    }

    fn error(&self, kind: ErrorKind, message: impl Into<String>, at: &Element) -> ParseError {
        ParseError::new(kind, message)
            .at(Position::at(self.source, at.offset))
            .with_help("Regenerate the XML with a Doxygen version that emits full member records")
    }
}

/// Split a `<type>` element into text and reference tokens
fn type_ref(ty: Option<&Element>) -> TypeRef {
    let Some(ty) = ty else {
        return TypeRef::default();
    };
    let tokens = ty
        .children
        .iter()
        .map(|child| match child {
            XmlNode::Text(text) => TypeToken::Text(text.clone()),
            XmlNode::Element(el) => TypeToken::Ref(el.text()),
        })
        .collect();
    TypeRef::new(tokens)
}
