use serde::Serialize;

/// A documented C++ class or struct, built from one `compounddef`.
#[derive(Debug, Clone)]
pub struct ClassNode {
    /// Fully qualified name, e.g. `QuantLib::Instrument`
    pub name: String,
    pub kind: ClassKind,
    pub visibility: Visibility,
    pub bases: Vec<BaseRef>,
    pub doc: Doc,
    pub members: Vec<MemberNode>,
}

impl ClassNode {
    pub fn supertypes(&self) -> impl Iterator<Item = &BaseRef> {
        self.bases.iter().filter(|b| b.inheritance == Inheritance::Supertype)
    }

    pub fn capabilities(&self) -> impl Iterator<Item = &BaseRef> {
        self.bases.iter().filter(|b| b.inheritance == Inheritance::Capability)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    Class,
    Struct,
}

impl ClassKind {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "class" => Some(ClassKind::Class),
            "struct" => Some(ClassKind::Struct),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Struct => "struct",
        }
    }
}

/// Access level of a class or member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
    /// No access specifier (Doxygen `prot="package"` or empty)
    Package,
}

impl Visibility {
    /// Emission order of visibility blocks
    pub const ALL: [Visibility; 4] = [
        Visibility::Public,
        Visibility::Protected,
        Visibility::Private,
        Visibility::Package,
    ];

    pub fn from_attr(value: Option<&str>) -> Option<Self> {
        match value.map(str::trim) {
            Some("public") => Some(Visibility::Public),
            Some("protected") => Some(Visibility::Protected),
            Some("private") => Some(Visibility::Private),
            Some("package") | Some("") | None => Some(Visibility::Package),
            Some(_) => None,
        }
    }

    /// Java keyword, empty for package-private
    pub fn keyword(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
            Visibility::Package => "",
        }
    }

    /// Label used in group banners
    pub fn label(&self) -> &'static str {
        match self {
            Visibility::Package => "@PackagePrivate",
            other => other.keyword(),
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            Visibility::Public => 0,
            Visibility::Protected => 1,
            Visibility::Private => 2,
            Visibility::Package => 3,
        }
    }
}

/// How a base class is inherited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inheritance {
    /// Non-virtual base, emitted after `extends`
    Supertype,
    /// Virtual base, emitted after `implements`
    Capability,
}

#[derive(Debug, Clone)]
pub struct BaseRef {
    pub name: String,
    pub inheritance: Inheritance,
}

/// Documentation attached to a class or member, kept as serialized
/// Doxygen markup so the documentation rules can rewrite it.
#[derive(Debug, Clone, Default)]
pub struct Doc {
    pub brief: Vec<String>,
    pub detailed: Vec<String>,
}

impl Doc {
    pub fn is_empty(&self) -> bool {
        self.brief.is_empty() && self.detailed.is_empty()
    }

    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.brief.iter().chain(self.detailed.iter()).map(String::as_str)
    }
}

/// One fragment of a declared type. Doxygen splits templated types into
/// plain text and cross-reference pieces, e.g.
/// `std::vector< ` + `<ref>Real</ref>` + ` >`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeToken {
    Text(String),
    Ref(String),
}

impl TypeToken {
    pub fn text(&self) -> &str {
        match self {
            TypeToken::Text(text) | TypeToken::Ref(text) => text,
        }
    }
}

/// A declared type as the ordered sequence of its tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeRef {
    pub tokens: Vec<TypeToken>,
}

impl TypeRef {
    pub fn new(tokens: Vec<TypeToken>) -> Self {
        Self { tokens }
    }

    /// Single plain-text token, handy for tests and synthesized types
    pub fn text(text: impl Into<String>) -> Self {
        Self { tokens: vec![TypeToken::Text(text.into())] }
    }

    /// Raw C++ spelling, tokens joined verbatim
    pub fn raw(&self) -> String {
        self.tokens.iter().map(TypeToken::text).collect()
    }
}

/// A method or field of a class.
#[derive(Debug, Clone)]
pub struct MemberNode {
    pub name: String,
    pub ty: TypeRef,
    pub visibility: Visibility,
    pub is_static: bool,
    pub kind: MemberKind,
    pub doc: Doc,
}

#[derive(Debug, Clone)]
pub enum MemberKind {
    Method {
        /// Declared `= 0`
        pure_virtual: bool,
        /// Reimplements a base class member
        overrides: bool,
        /// `const` member function
        is_const: bool,
        params: Vec<Param>,
    },
    Field {
        mutable: bool,
    },
}

impl MemberNode {
    /// Parameters of a method; fields have none
    pub fn params(&self) -> &[Param] {
        match &self.kind {
            MemberKind::Method { params, .. } => params,
            MemberKind::Field { .. } => &[],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Param {
    pub ty: TypeRef,
    pub name: String,
}

impl Param {
    /// Name used when the declaration carries none
    pub const FALLBACK_NAME: &'static str = "ref";
}
