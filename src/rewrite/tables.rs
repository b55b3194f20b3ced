//! Built-in rule tables.

use super::{Rule, RuleTable, Rules};

/// Operator overloads, anchored at the start of the member name.
/// Compound operators precede their prefixes.
const METHOD_NAMES: &[(&str, &str)] = &[
    (r"^operator\s*<<=", "shlAssign"),
    (r"^operator\s*>>=", "shrAssign"),
    (r"^operator\s*<<", "toString"),
    (r"^operator\s*\+=", "addAssign"),
    (r"^operator\s*-=", "subAssign"),
    (r"^operator\s*\*=", "mulAssign"),
    (r"^operator\s*/=", "divAssign"),
    (r"^operator\s*%=", "modAssign"),
    (r"^operator\s*==", "eq"),
    (r"^operator\s*!=", "ne"),
    (r"^operator\s*>=", "ge"),
    (r"^operator\s*<=", "le"),
    (r"^operator\s*->", "deref"),
    (r"^operator\s*>>", "shr"),
    (r"^operator\s*>", "gt"),
    (r"^operator\s*<", "lt"),
    (r"^operator\s*\+\+", "inc"),
    (r"^operator\s*--", "dec"),
    (r"^operator\s*\+", "add"),
    (r"^operator\s*-", "sub"),
    (r"^operator\s*\*", "mul"),
    (r"^operator\s*/", "div"),
    (r"^operator\s*%", "mod"),
    (r"^operator\s*!", "not"),
    (r"^operator\s*=", "assign"),
    (r"^operator\s*\[\]", "at"),
    (r"^operator\s*\(\)", "get"),
];

const TYPE_REFERENCES: &[(&str, &str)] = &[(r"\s*&+\s*$", "")];

const TYPES: &[(&str, &str)] = &[
    (r"\s*\*+\s*const\b", ""),
    (r"\s*\*+(\s*(?:[>,]|$))", "$1"),
    (r"^\s+|\s+$", ""),
    (r"\s{2,}", " "),
    (r"^const$", "final"),
    (r"^const\s+", "final "),
    (r"\blong\s+long\b", "long"),
    (r"(^|[^@\w])unsigned\s+(long|short|char)\b", "${1}/* @Unsigned */ $2"),
    (r"(^|[^@\w])unsigned(?:\s+int)?\b", "${1}/* @Unsigned */ int"),
    (r"(^|[^@\w])bool\b", "${1}boolean"),
    (r"\bstd::string\b", "String"),
    (r"\bstd::(?:vector|list)\s*<", "List<"),
    (r"\bstd::map\s*<", "Map<"),
    (r"\bstd::set\s*<", "Set<"),
    (r"\b(?:boost|std)::weak_ptr\s*<", "WeakReference<"),
    (r"(^|[^@\w:])(?:std::)?size_t\b", "${1}int"),
];

/// QuantLib scalar typedefs mapped to a plain Java type
const SCALAR_TYPEDEFS: &[(&str, &str)] = &[
    ("Natural", "int"),
    ("BigInteger", "int"),
    ("Integer", "int"),
    ("Size", "int"),
    ("Day", "int"),
    ("Year", "int"),
    ("Real", "double"),
];

/// QuantLib typedefs of `Real` whose meaning is kept as a marker comment
const MARKED_REALS: &[&str] = &[
    "CompoundFactor",
    "Covariance",
    "Diffusion",
    "DiscountFactor",
    "Drift",
    "Expectation",
    "Rate",
    "Spread",
    "StdDev",
    "Time",
    "Variance",
    "Volatility",
];

/// Ownership wrappers removed together with their matching `>`
const WRAPPERS: &[&str] = &[
    r"\bboost::(?:auto_ptr|scoped_ptr|scoped_array|shared_ptr|shared_array)\s*<",
    r"\bstd::(?:auto_ptr|unique_ptr|shared_ptr)\s*<",
];

const DOCS: &[(&str, &str)] = &[
    (r"<para\s*/>", ""),
    (r"<para(?:\s[^>]*)?>", "<p>"),
    (r"</para>", "</p>"),
    (r#"<p>\s*<simplesect\s+kind="(note|warning|test|bug)"[^>]*>"#, "@$1 "),
    (r#"<p>\s*<simplesect\s+kind="(\w+)"[^>]*>"#, "@$1 "),
    (r#"<simplesect\s+kind="(\w+)"[^>]*>"#, "@$1 "),
    (r"</simplesect>\s*</p>", ""),
    (r"</simplesect>", ""),
    (r"<p>\s*<xrefsect(?:\s[^>]*)?>", ""),
    (r"</xrefsect>\s*</p>", ""),
    (r"<xrefsect(?:\s[^>]*)?>", ""),
    (r"</xrefsect>", ""),
    (r"<xreftitle>([^<]*)</xreftitle>", "\n@$1 "),
    (r"</?xrefdescription>", ""),
    (r"<bold>", "<b>"),
    (r"</bold>", "</b>"),
    (r"<italic>", "<i>"),
    (r"</italic>", "</i>"),
    (r"<emphasis>", "<em>"),
    (r"</emphasis>", "</em>"),
    (r"<computeroutput>", "<code>"),
    (r"</computeroutput>", "</code>"),
    (r"<ref\s+[^>]*>", "{@link "),
    (r"</ref>", "}"),
    (r"<formula\s+[^>]*>\$", "{@latex$$"),
    (r"\$</formula>", "}"),
    (r"<formula\s+[^>]*>\\\[", "{@latex["),
    (r"\\\]</formula>", "}"),
    (r#"<ulink\s+url="([^"]*)"[^>]*>"#, r#"<a href="$1">"#),
    (r"</ulink>", "</a>"),
    (r"<itemizedlist>", "<ul>"),
    (r"</itemizedlist>", "</ul>"),
    (r"<orderedlist>", "<ol>"),
    (r"</orderedlist>", "</ol>"),
    (r"<listitem>", "<li>"),
    (r"</listitem>", "</li>"),
    (r"<linebreak\s*/>", "<br/>"),
    (r"<sp\s*/>", " "),
    (r"<parametername(?:\s[^>]*)?>", "\n@param "),
    (r"</parametername>", " "),
    (
        r"</?(?:parameterlist|parameteritem|parameternamelist|parameterdescription)(?:\s[^>]*)?>",
        "",
    ),
    (r"\bstd::string\b", "String"),
    (r"\bstd::(?:vector|list)\s*(<|&lt;)", "List$1"),
    (r"\bstd::map\s*(<|&lt;)", "Map$1"),
    (r"\bstd::set\s*(<|&lt;)", "Set$1"),
];

fn table(entries: &[(&str, &str)]) -> Vec<Rule> {
    entries
        .iter()
        .map(|(pattern, replacement)| {
            Rule::new(pattern, *replacement).expect("built-in rule pattern must compile")
        })
        .collect()
}

/// Whole-identifier match that skips qualified names and marker comments
fn typedef(name: &str, replacement: String) -> Rule {
    Rule::new(&format!(r"(^|[^@\w:]){}\b", name), replacement)
        .expect("built-in typedef pattern must compile")
}

fn types() -> RuleTable {
    let mut rules = table(TYPES);
    for (name, java) in SCALAR_TYPEDEFS {
        rules.push(typedef(name, format!("${{1}}{}", java)));
    }
    for name in MARKED_REALS {
        rules.push(typedef(name, format!("${{1}}/* @{} */ double", name)));
    }
    RuleTable::new(rules)
}

fn type_removals() -> RuleTable {
    let mut rules: Vec<Rule> = WRAPPERS
        .iter()
        .map(|pattern| Rule::unwrap(pattern).expect("built-in wrapper pattern must compile"))
        .collect();
    rules.extend(table(&[("::", ".")]));
    RuleTable::new(rules)
}

pub(super) fn standard() -> Rules {
    Rules {
        method_names: RuleTable::new(table(METHOD_NAMES)),
        type_references: RuleTable::new(table(TYPE_REFERENCES)),
        types: types(),
        type_removals: type_removals(),
        docs: RuleTable::new(table(DOCS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Rules {
        standard()
    }

    #[test]
    fn test_operator_names() {
        let rules = rules();
        let cases = [
            ("operator+=", "addAssign"),
            ("operator+", "add"),
            ("operator==", "eq"),
            ("operator!=", "ne"),
            ("operator<<", "toString"),
            ("operator<", "lt"),
            ("operator<=", "le"),
            ("operator->", "deref"),
            ("operator-", "sub"),
            ("operator()", "get"),
            ("operator[]", "at"),
            ("operator=", "assign"),
            ("operator ++", "inc"),
            ("value", "value"),
            ("operatorName", "operatorName"),
        ];
        for (input, expected) in cases {
            assert_eq!(rules.method_names.apply(input), expected, "{}", input);
        }
    }

    #[test]
    fn test_method_rules_are_anchored() {
        assert_eq!(rules().method_names.apply("call operator+"), "call operator+");
    }

    #[test]
    fn test_reference_stripping() {
        let rules = rules();
        assert_eq!(rules.type_references.apply("const Date &"), "const Date");
        assert_eq!(rules.type_references.apply(" &&"), "");
        assert_eq!(rules.type_references.apply("std::vector< "), "std::vector< ");
    }

    #[test]
    fn test_type_tokens() {
        let rules = rules();
        let cases = [
            ("const", "final"),
            ("const std::string", "final String"),
            ("bool", "boolean"),
            ("unsigned int", "/* @Unsigned */ int"),
            ("unsigned", "/* @Unsigned */ int"),
            ("unsigned long", "/* @Unsigned */ long"),
            ("unsigned long long", "/* @Unsigned */ long"),
            ("long long", "long"),
            ("std::size_t", "int"),
            ("Size", "int"),
            ("Real", "double"),
            ("Rate", "/* @Rate */ double"),
            ("DiscountFactor", "/* @DiscountFactor */ double"),
            ("Foo *", "Foo"),
            ("Foo * const", "Foo"),
            ("const Foo *const", "final Foo"),
            ("char **", "char"),
            ("std::vector< Real * >", "List< double >"),
            ("std::map<std::string, Real>", "Map<String, double>"),
            ("boost::weak_ptr<Observer>", "WeakReference<Observer>"),
            ("  Date  ", "Date"),
        ];
        for (input, expected) in cases {
            assert_eq!(rules.types.apply(input), expected, "{}", input);
        }
    }

    #[test]
    fn test_typedefs_need_word_boundaries() {
        let rules = rules();
        assert_eq!(rules.types.apply("DateTime"), "DateTime");
        assert_eq!(rules.types.apply("Sizes"), "Sizes");
        assert_eq!(rules.types.apply("QuantLib::Real"), "QuantLib::Real");
    }

    #[test]
    fn test_type_rules_are_idempotent() {
        let rules = rules();
        for input in ["Rate", "unsigned int", "bool", "const Real", "unsigned long", "Time"] {
            let once = rules.types.apply(input);
            assert_eq!(rules.types.apply(&once), once, "{}", input);
        }
    }

    #[test]
    fn test_wrapper_removal() {
        let rules = rules();
        assert_eq!(rules.type_removals.apply("boost::shared_ptr<Quote>"), "Quote");
        assert_eq!(rules.type_removals.apply("std::unique_ptr< Engine >"), "Engine");
        assert_eq!(
            rules.type_removals.apply("List< boost::shared_ptr< CashFlow > >"),
            "List< CashFlow >"
        );
        assert_eq!(rules.type_removals.apply("Handle<YieldTermStructure>"), "Handle<YieldTermStructure>");
        assert_eq!(rules.type_removals.apply("ext::Foo::Bar"), "ext.Foo.Bar");
    }

    #[test]
    fn test_simplesect_warning() {
        let out = rules()
            .docs
            .apply(r#"<para><simplesect kind="warning">text</simplesect></para>"#);
        assert_eq!(out, "@warning text");
    }

    #[test]
    fn test_simplesect_other_kinds() {
        let out = rules()
            .docs
            .apply(r#"<para>x <simplesect kind="return"><para>the value</para></simplesect></para>"#);
        assert_eq!(out, "<p>x @return <p>the value</p>");
    }

    #[test]
    fn test_doc_markup() {
        let rules = rules();
        assert_eq!(
            rules.docs.apply("<para>A <bold>b</bold> <computeroutput>c</computeroutput></para>"),
            "<p>A <b>b</b> <code>c</code></p>"
        );
        assert_eq!(
            rules.docs.apply(r#"<ref refid="classQuantLib_1_1Quote" kindref="compound">Quote</ref>"#),
            "{@link Quote}"
        );
        assert_eq!(
            rules.docs.apply(r#"<ulink url="http://quantlib.org">site</ulink>"#),
            r#"<a href="http://quantlib.org">site</a>"#
        );
        assert_eq!(
            rules.docs.apply(r#"<formula id="0">$ e^{-rt} $</formula>"#),
            "{@latex$ e^{-rt} }"
        );
        assert_eq!(rules.docs.apply("a<linebreak/>b<sp/>c"), "a<br/>b c");
        assert_eq!(rules.docs.apply("<para/>"), "");
        assert_eq!(
            rules.docs.apply("<itemizedlist><listitem>x</listitem></itemizedlist>"),
            "<ul><li>x</li></ul>"
        );
    }

    #[test]
    fn test_xrefsect_becomes_tag_line() {
        let out = rules().docs.apply(
            r#"<para><xrefsect id="test_1"><xreftitle>Tests</xreftitle><xrefdescription><para>checked</para></xrefdescription></xrefsect></para>"#,
        );
        assert_eq!(out, "\n@Tests <p>checked</p>");
    }

    #[test]
    fn test_parameter_list() {
        let out = rules().docs.apply(
            r#"<para><parameterlist kind="param"><parameteritem><parameternamelist><parametername>t</parametername></parameternamelist><parameterdescription><para>time</para></parameterdescription></parameteritem></parameterlist></para>"#,
        );
        assert_eq!(out, "<p>\n@param t <p>time</p></p>");
    }

    #[test]
    fn test_doc_container_names() {
        assert_eq!(
            rules().docs.apply("returns a std::vector<Real> keyed by std::string"),
            "returns a List<Real> keyed by String"
        );
        assert_eq!(
            rules().docs.apply("a std::vector&lt;Real&gt; keyed by std::map&lt; int, Real &gt;"),
            "a List&lt;Real&gt; keyed by Map&lt; int, Real &gt;"
        );
    }
}
