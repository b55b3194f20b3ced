//! Properties that must hold for every fixture, whatever its expected output
//!
//! Run with: cargo test --test invariants

use cpp2java::ast::{ClassNode, TypeRef};
use cpp2java::transform::{classify, select_members};
use cpp2java::{DoxygenParser, GenerateOptions, Parser, Pipeline, Rewriter, Rules};
use libtest_mimic::{Arguments, Failed, Trial};
use std::fs;
use std::path::{Path, PathBuf};

const NAMESPACE: &str = "QuantLib";

type Check = fn(&str) -> Result<(), Failed>;

const CHECKS: &[(&str, Check)] = &[
    ("partition", check_partition),
    ("type_idempotence", check_type_idempotence),
    ("empty_groups_suppressed", check_empty_groups),
    ("deterministic", check_deterministic),
    ("balanced_braces", check_balanced_braces),
];

fn main() {
    let args = Arguments::from_args();

    let mut tests = Vec::new();
    for path in collect_fixtures() {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        for (name, check) in CHECKS {
            let path = path.clone();
            let check = *check;
            tests.push(Trial::test(format!("{}::{}", stem, name), move || {
                let source = fs::read_to_string(&path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
                check(&source)
            }));
        }
    }

    libtest_mimic::run(&args, tests).exit();
}

fn collect_fixtures() -> Vec<PathBuf> {
    let pattern = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/*.xml");
    let mut files: Vec<PathBuf> = glob::glob(&pattern.to_string_lossy())
        .expect("fixture pattern is valid")
        .filter_map(Result::ok)
        .collect();
    files.sort();
    files
}

fn classes(source: &str) -> Result<Vec<ClassNode>, Failed> {
    let parser = DoxygenParser::new();
    let document = parser.parse(source).map_err(|e| e.to_string())?;
    document
        .compounds
        .iter()
        .map(|compound| parser.build_class(source, compound).map_err(|e| Failed::from(e.to_string())))
        .collect()
}

/// Every member lands in exactly one group, the one `classify` names
fn check_partition(source: &str) -> Result<(), Failed> {
    for class in classes(source)? {
        let selection = select_members(&class);
        if selection.methods.len() != 12 || selection.fields.len() != 12 {
            return Err(format!("{}: expected 12 + 12 groups", class.name).into());
        }
        if selection.len() != class.members.len() {
            return Err(format!(
                "{}: {} members grouped, {} declared",
                class.name,
                selection.len(),
                class.members.len()
            )
            .into());
        }
        for group in selection.groups() {
            for member in &group.members {
                if classify(member) != group.label {
                    return Err(format!("{}: {} in group '{}'", class.name, member.name, group.label.banner()).into());
                }
            }
        }
        for member in &class.members {
            let hits = selection
                .groups()
                .filter(|g| g.members.iter().any(|m| std::ptr::eq(*m, member)))
                .count();
            if hits != 1 {
                return Err(format!("{}: {} found in {} groups", class.name, member.name, hits).into());
            }
        }
    }
    Ok(())
}

/// Rewriting an already rewritten type changes nothing
fn check_type_idempotence(source: &str) -> Result<(), Failed> {
    let rules = Rules::standard();
    let rewriter = Rewriter::new(&rules, NAMESPACE);
    for class in classes(source)? {
        let types = class
            .members
            .iter()
            .flat_map(|m| std::iter::once(&m.ty).chain(m.params().iter().map(|p| &p.ty)));
        for ty in types {
            let once = rewriter.type_name(ty);
            let twice = rewriter.type_name(&TypeRef::text(once.clone()));
            if once != twice {
                return Err(format!("{:?}: '{}' then '{}'", ty.raw(), once, twice).into());
            }
        }
    }
    Ok(())
}

/// A banner appears exactly when its group has members
fn check_empty_groups(source: &str) -> Result<(), Failed> {
    let result = Pipeline::standard()
        .compile(source, &GenerateOptions::new(NAMESPACE))
        .map_err(|e| e.to_string())?;

    for (class, unit) in classes(source)?.iter().zip(&result.classes) {
        let selection = select_members(class);
        for group in selection.groups() {
            let banner = format!("    // {}\n", group.label.banner());
            let present = unit.code.contains(&banner);
            if present == group.is_empty() {
                return Err(format!(
                    "{}: banner '{}' present={} but group has {} members",
                    unit.name,
                    group.label.banner(),
                    present,
                    group.members.len()
                )
                .into());
            }
        }
    }
    Ok(())
}

fn check_deterministic(source: &str) -> Result<(), Failed> {
    let options = GenerateOptions::new(NAMESPACE);
    let first = Pipeline::standard().compile(source, &options).map_err(|e| e.to_string())?;
    let second = Pipeline::standard().compile(source, &options).map_err(|e| e.to_string())?;
    if first.classes != second.classes {
        return Err("two runs over the same document differ".into());
    }
    Ok(())
}

/// Stubs and class bodies close every brace they open
fn check_balanced_braces(source: &str) -> Result<(), Failed> {
    let result = Pipeline::standard()
        .compile(source, &GenerateOptions::new(NAMESPACE))
        .map_err(|e| e.to_string())?;
    for unit in &result.classes {
        let code: String = unit
            .code
            .lines()
            .filter(|line| !line.trim_start().starts_with('*') && !line.trim_start().starts_with("/**"))
            .collect();
        let opened = code.matches('{').count();
        let closed = code.matches('}').count();
        if opened != closed {
            return Err(format!("{}: {} '{{' vs {} '}}'", unit.name, opened, closed).into());
        }
    }
    Ok(())
}
