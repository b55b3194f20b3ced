use cpp2java::{CompileError, GeneratedClass, write_unit};
use std::fs;

fn unit(name: &str, code: &str) -> GeneratedClass {
    GeneratedClass {
        name: name.to_string(),
        file_name: format!("{}.java", name),
        code: code.to_string(),
    }
}

#[test]
fn test_write_unit_creates_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_unit(dir.path(), &unit("Foo", "public struct Foo {\n}\n")).unwrap();

    assert_eq!(path, dir.path().join("Foo.java"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "public struct Foo {\n}\n");
}

#[test]
fn test_write_unit_overwrites_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Foo.java"), "stale contents that are longer than the new ones").unwrap();

    let path = write_unit(dir.path(), &unit("Foo", "class Foo {}\n")).unwrap();
    assert_eq!(fs::read_to_string(path).unwrap(), "class Foo {}\n");
}

#[test]
fn test_write_unit_into_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does/not/exist");

    let err = write_unit(&missing, &unit("Foo", "class Foo {}\n")).unwrap_err();
    match &err {
        CompileError::Write { path, .. } => assert_eq!(path, &missing.join("Foo.java")),
        other => panic!("expected a write error, got {:?}", other),
    }
    assert!(err.render("", "foo.xml").starts_with("error: failed to write "));
    assert!(!missing.join("Foo.java").exists());
}
