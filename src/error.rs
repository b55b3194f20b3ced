use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of input error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MalformedXml,
    UnclosedElement,
    MissingElement,
    MissingAttribute,
    InvalidAttribute,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MalformedXml => "Malformed XML",
            ErrorKind::UnclosedElement => "Unclosed element",
            ErrorKind::MissingElement => "Missing element",
            ErrorKind::MissingAttribute => "Missing attribute",
            ErrorKind::InvalidAttribute => "Invalid attribute",
        }
    }
}

/// Location inside the XML source (0-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub byte: usize,
    pub line: usize,
    pub col: usize,
}

impl Position {
    /// Compute line/column for a byte offset, clamped to the source length.
    pub fn at(source: &str, byte: usize) -> Self {
        let mut byte = byte.min(source.len());
        while !source.is_char_boundary(byte) {
            byte -= 1;
        }
        let before = &source[..byte];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = before[line_start..].chars().count();
        Self { byte, line, col }
    }
}

/// Error while reading a Doxygen document
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    pub position: Option<Position>,
    pub help: Option<String>,
}

impl ParseError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
            help: None,
        }
    }

    /// Attach the source location of the offending node
    pub fn at(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Add help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render the error with source context
    pub fn render(&self, source: &str, filename: &str) -> String {
        let mut output = String::new();

        match self.position {
            Some(pos) => {
                output.push_str(&format!(" file: {}:{}:{}\n", filename, pos.line + 1, pos.col + 1));
            }
            None => output.push_str(&format!(" file: {}\n", filename)),
        }
        output.push_str(&format!("error: {}: {}\n", self.kind.as_str(), self.message));

        if let Some(pos) = self.position {
            if let Some(source_line) = source.lines().nth(pos.line) {
                let line_num = format!("{}", pos.line + 1);
                let width = line_num.len().max(2);
                output.push_str(&format!("{:>width$} |\n", "", width = width));
                output.push_str(&format!("{:>width$} | {}\n", line_num, source_line, width = width));
                output.push_str(&format!(
                    "{:>width$} | {}^\n",
                    "",
                    " ".repeat(pos.col),
                    width = width
                ));
            }
        }

        if let Some(ref help) = self.help {
            output.push('\n');
            for (i, help_line) in help.lines().enumerate() {
                if i == 0 {
                    output.push_str(&format!(" help: {}\n", help_line));
                } else {
                    output.push_str(&format!("       {}\n", help_line));
                }
            }
        }

        output
    }
}

/// Error during translation of a document
#[derive(Debug, Error)]
pub enum CompileError {
    /// The document itself could not be read; nothing was translated
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// One class was rejected; the rest of the document is unaffected
    #[error("class {class}: {source}")]
    Class {
        class: String,
        #[source]
        source: ParseError,
    },

    /// Two classes map to the same output file; the later one is skipped
    #[error("class {class}: {file_name} is already generated for {first}")]
    Duplicate {
        class: String,
        file_name: String,
        first: String,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CompileError {
    /// Render with source context where the error carries a location
    pub fn render(&self, source: &str, filename: &str) -> String {
        match self {
            CompileError::Parse(err) => err.render(source, filename),
            CompileError::Class { class, source: err } => {
                format!(" class: {}\n{}", class, err.render(source, filename))
            }
            CompileError::Duplicate { .. } | CompileError::Write { .. } => format!("error: {}\n", self),
        }
    }
}

/// Error in the rule table configuration; fatal at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read rules file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid rules document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid pattern {pattern:?} in {table} rules: {source}")]
    Pattern {
        table: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
