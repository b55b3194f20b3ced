use super::GeneratedClass;
use crate::error::CompileError;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Output buffer that accumulates generated code line by line
pub struct Output {
    lines: Vec<String>,
    current_line: String,
}

impl Output {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            current_line: String::new(),
        }
    }

    /// Add text to the current line
    pub fn push(&mut self, text: &str) {
        self.current_line.push_str(text);
    }

    /// Add a newline
    pub fn newline(&mut self) {
        self.current_line.push('\n');
        self.lines.push(std::mem::take(&mut self.current_line));
    }

    /// Add pre-rendered text that may span several lines
    pub fn push_block(&mut self, text: &str) {
        for line in text.split_inclusive('\n') {
            match line.strip_suffix('\n') {
                Some(line) => {
                    self.push(line);
                    self.newline();
                }
                None => self.push(line),
            }
        }
    }

    /// Finish and return the generated code
    pub fn finish(mut self) -> String {
        if !self.current_line.is_empty() {
            self.lines.push(std::mem::take(&mut self.current_line));
        }
        self.lines.join("")
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Write a generated unit into `dir`, returning the file path.
///
/// The code is already fully rendered, so a failure here never leaves a
/// half-written file behind: the partial file is removed.
pub fn write_unit(dir: &Path, unit: &GeneratedClass) -> Result<PathBuf, CompileError> {
    let path = dir.join(&unit.file_name);

    let written = File::create(&path).and_then(|mut file| {
        file.write_all(unit.code.as_bytes())?;
        file.flush()
    });

    match written {
        Ok(()) => Ok(path),
        Err(source) => {
            if path.is_file() {
                let _ = fs::remove_file(&path);
            }
            Err(CompileError::Write { path, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_accumulate() {
        let mut output = Output::new();
        output.push("public class A");
        output.push(" {");
        output.newline();
        output.push("}");
        assert_eq!(output.finish(), "public class A {\n}");
    }

    #[test]
    fn test_push_block() {
        let mut output = Output::new();
        output.push_block("/**\n * x\n */\n");
        output.push("class");
        assert_eq!(output.finish(), "/**\n * x\n */\nclass");
    }
}
