//! Binary to generate/update .expected.java files
//!
//! Usage:
//!   cargo run --bin accept_expected              # Update all
//!   cargo run --bin accept_expected -- money     # Update only fixtures matching "money"

use cpp2java::{GenerateOptions, Pipeline};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

const NAMESPACE: &str = "QuantLib";

fn main() {
    let filter: Option<String> = std::env::args().nth(1);
    let fixture_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");

    let mut updated = 0;
    let mut skipped = 0;

    for entry in WalkDir::new(&fixture_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|s| s == "xml").unwrap_or(false))
    {
        let path = entry.path();
        let path_str = path.to_string_lossy();

        if let Some(ref f) = filter {
            if !path_str.contains(f) {
                skipped += 1;
                continue;
            }
        }

        if process_file(path) {
            updated += 1;
        }
    }

    println!("Updated {} files, skipped {}", updated, skipped);
}

fn process_file(path: &Path) -> bool {
    let source = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to read {:?}: {}", path, e);
            return false;
        }
    };

    let filename = path.file_name().and_then(|s| s.to_str()).unwrap_or("unknown");
    let result = match Pipeline::standard().compile(&source, &GenerateOptions::new(NAMESPACE)) {
        Ok(result) => result,
        Err(e) => {
            eprint!("{}", e.render(&source, filename));
            return false;
        }
    };

    if !result.errors.is_empty() {
        for error in &result.errors {
            eprint!("{}", error.render(&source, filename));
        }
        eprintln!("ERROR: {:?} has rejected classes, not updated", path);
        return false;
    }

    let expected = path.with_extension("expected.java");
    match fs::write(&expected, result.listing()) {
        Ok(()) => {
            println!("  wrote {}", expected.display());
            true
        }
        Err(e) => {
            eprintln!("Failed to write {:?}: {}", expected, e);
            false
        }
    }
}
