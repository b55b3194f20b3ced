use crate::ast::{ClassNode, MemberKind, MemberNode, Visibility};

/// Method modifiers in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodModifier {
    Concrete,
    /// Pure virtual; plain virtual methods are concrete
    Abstract,
    Static,
}

/// Field modifiers in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldModifier {
    Concrete,
    Mutable,
    Static,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Method(MethodModifier),
    Field(FieldModifier),
}

impl Category {
    fn index(&self) -> usize {
        match self {
            Category::Method(MethodModifier::Concrete) | Category::Field(FieldModifier::Concrete) => 0,
            Category::Method(MethodModifier::Abstract) | Category::Field(FieldModifier::Mutable) => 1,
            Category::Method(MethodModifier::Static) | Category::Field(FieldModifier::Static) => 2,
        }
    }
}

/// Identifies one of the 12 method groups or 12 field groups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupLabel {
    pub visibility: Visibility,
    pub category: Category,
}

impl GroupLabel {
    const METHODS: [Category; 3] = [
        Category::Method(MethodModifier::Concrete),
        Category::Method(MethodModifier::Abstract),
        Category::Method(MethodModifier::Static),
    ];

    const FIELDS: [Category; 3] = [
        Category::Field(FieldModifier::Concrete),
        Category::Field(FieldModifier::Mutable),
        Category::Field(FieldModifier::Static),
    ];

    /// Position in the emission order of its block
    pub fn slot(&self) -> usize {
        self.visibility.index() * 3 + self.category.index()
    }

    /// Banner comment text, e.g. `protected static methods`
    pub fn banner(&self) -> String {
        let vis = self.visibility.label();
        match self.category {
            Category::Method(MethodModifier::Concrete) => format!("{} methods", vis),
            Category::Method(MethodModifier::Abstract) => format!("{} abstract methods", vis),
            Category::Method(MethodModifier::Static) => format!("{} static methods", vis),
            Category::Field(FieldModifier::Concrete) => format!("{} fields", vis),
            Category::Field(FieldModifier::Mutable) => {
                format!("{} MUTABLE fields (code review: mutable field)", vis)
            }
            Category::Field(FieldModifier::Static) => format!("{} static fields", vis),
        }
    }

    fn all(categories: [Category; 3]) -> Vec<GroupLabel> {
        Visibility::ALL
            .iter()
            .flat_map(|&visibility| {
                categories
                    .iter()
                    .map(move |&category| GroupLabel { visibility, category })
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct MemberGroup<'a> {
    pub label: GroupLabel,
    /// Members in source order
    pub members: Vec<&'a MemberNode>,
}

impl MemberGroup<'_> {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Members of one class, partitioned into ordered groups.
///
/// Both blocks always hold all 12 groups; empty ones are skipped when the
/// class is emitted.
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub methods: Vec<MemberGroup<'a>>,
    pub fields: Vec<MemberGroup<'a>>,
}

impl<'a> Selection<'a> {
    /// Total number of members across all groups
    pub fn len(&self) -> usize {
        self.groups().map(|g| g.members.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every group, methods first
    pub fn groups(&self) -> impl Iterator<Item = &MemberGroup<'a>> {
        self.methods.iter().chain(self.fields.iter())
    }
}

pub fn classify(member: &MemberNode) -> GroupLabel {
    let category = match &member.kind {
        MemberKind::Method { .. } if member.is_static => Category::Method(MethodModifier::Static),
        MemberKind::Method { pure_virtual: true, .. } => Category::Method(MethodModifier::Abstract),
        MemberKind::Method { .. } => Category::Method(MethodModifier::Concrete),
        MemberKind::Field { .. } if member.is_static => Category::Field(FieldModifier::Static),
        MemberKind::Field { mutable: true, .. } => Category::Field(FieldModifier::Mutable),
        MemberKind::Field { .. } => Category::Field(FieldModifier::Concrete),
    };
    GroupLabel {
        visibility: member.visibility,
        category,
    }
}

/// Partition the members of `class` into 12 method and 12 field groups
pub fn select_members(class: &ClassNode) -> Selection<'_> {
    let group = |label| MemberGroup { label, members: Vec::new() };
    let mut methods: Vec<MemberGroup> = GroupLabel::all(GroupLabel::METHODS).into_iter().map(group).collect();
    let mut fields: Vec<MemberGroup> = GroupLabel::all(GroupLabel::FIELDS).into_iter().map(group).collect();

    for member in &class.members {
        let label = classify(member);
        let block = match label.category {
            Category::Method(_) => &mut methods,
            Category::Field(_) => &mut fields,
        };
        block[label.slot()].members.push(member);
    }

    Selection { methods, fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{ClassKind, Doc, TypeRef};

    fn method(name: &str, visibility: Visibility, is_static: bool, pure_virtual: bool) -> MemberNode {
        MemberNode {
            name: name.to_string(),
            ty: TypeRef::text("void"),
            visibility,
            is_static,
            kind: MemberKind::Method {
                pure_virtual,
                overrides: false,
                is_const: false,
                params: Vec::new(),
            },
            doc: Doc::default(),
        }
    }

    fn field(name: &str, visibility: Visibility, is_static: bool, mutable: bool) -> MemberNode {
        MemberNode {
            name: name.to_string(),
            ty: TypeRef::text("Real"),
            visibility,
            is_static,
            kind: MemberKind::Field { mutable },
            doc: Doc::default(),
        }
    }

    fn class(members: Vec<MemberNode>) -> ClassNode {
        ClassNode {
            name: "QuantLib::Foo".to_string(),
            kind: ClassKind::Class,
            visibility: Visibility::Public,
            bases: Vec::new(),
            doc: Doc::default(),
            members,
        }
    }

    fn names(group: &MemberGroup) -> Vec<String> {
        group.members.iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn test_twelve_groups_each() {
        let node = class(Vec::new());
        let selection = select_members(&node);
        assert_eq!(selection.methods.len(), 12);
        assert_eq!(selection.fields.len(), 12);
        assert!(selection.is_empty());
    }

    #[test]
    fn test_group_order() {
        let node = class(Vec::new());
        let selection = select_members(&node);
        let banners: Vec<_> = selection.methods.iter().map(|g| g.label.banner()).collect();
        assert_eq!(
            banners,
            [
                "public methods",
                "public abstract methods",
                "public static methods",
                "protected methods",
                "protected abstract methods",
                "protected static methods",
                "private methods",
                "private abstract methods",
                "private static methods",
                "@PackagePrivate methods",
                "@PackagePrivate abstract methods",
                "@PackagePrivate static methods",
            ]
        );
        for (i, group) in selection.fields.iter().enumerate() {
            assert_eq!(group.label.slot(), i);
        }
    }

    #[test]
    fn test_partition_is_exact() {
        let mut members = Vec::new();
        for (i, vis) in Visibility::ALL.iter().enumerate() {
            members.push(method(&format!("m{}", i), *vis, false, false));
            members.push(method(&format!("a{}", i), *vis, false, true));
            members.push(method(&format!("s{}", i), *vis, true, false));
            members.push(field(&format!("f{}", i), *vis, false, false));
            members.push(field(&format!("u{}", i), *vis, false, true));
            members.push(field(&format!("t{}", i), *vis, true, false));
        }
        let node = class(members);
        let selection = select_members(&node);

        assert_eq!(selection.len(), node.members.len());
        for group in selection.groups() {
            assert_eq!(group.members.len(), 1, "{}", group.label.banner());
            assert_eq!(classify(group.members[0]), group.label);
        }
    }

    #[test]
    fn test_static_wins_over_abstract_and_mutable() {
        let m = method("create", Visibility::Public, true, true);
        assert_eq!(classify(&m).category, Category::Method(MethodModifier::Static));

        let f = field("cache", Visibility::Private, true, true);
        assert_eq!(classify(&f).category, Category::Field(FieldModifier::Static));
    }

    #[test]
    fn test_overriding_method_is_concrete() {
        let mut m = method("NPV", Visibility::Public, false, false);
        if let MemberKind::Method { overrides, .. } = &mut m.kind {
            *overrides = true;
        }
        assert_eq!(classify(&m).category, Category::Method(MethodModifier::Concrete));
    }

    #[test]
    fn test_source_order_within_group() {
        let node = class(vec![
            field("b", Visibility::Public, false, false),
            method("x", Visibility::Public, false, false),
            field("a", Visibility::Public, false, false),
            field("c", Visibility::Public, false, false),
        ]);
        let selection = select_members(&node);
        assert_eq!(names(&selection.fields[0]), ["b", "a", "c"]);
        assert_eq!(names(&selection.methods[0]), ["x"]);
    }

    #[test]
    fn test_package_members() {
        let node = class(vec![field("n", Visibility::Package, false, true)]);
        let selection = select_members(&node);
        let group = selection.fields.iter().find(|g| !g.is_empty()).unwrap();
        assert_eq!(group.label.banner(), "@PackagePrivate MUTABLE fields (code review: mutable field)");
    }
}
