// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Where in a document an error happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Source file, `None` for in-memory text and anonymous readers.
    pub file: Option<PathBuf>,
    /// Dotted node path inside the document, e.g. `c.layers[2]`.
    pub node: String,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = self
            .file
            .as_ref()
            .map_or_else(|| "<memory>".to_string(), |p| p.display().to_string());
        if self.node.is_empty() {
            write!(f, "{}", file)
        } else {
            write!(f, "{} at `{}`", file, self.node)
        }
    }
}

/// The main error type for loading and accessing configuration documents.
///
/// Every variant is fatal to the load call that produced it. Errors raised
/// while resolving a node are wrapped in [`ConfigError::At`] once per
/// document, so an error inside an included file carries the include site
/// as well as its own position.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("parse error in {}: {message}{}", origin_name(.file), line_col(.line, .column))]
    ParseError {
        message: String,
        file: Option<PathBuf>,
        line: Option<usize>,
        column: Option<usize>,
    },

    #[error("unknown tag `!{tag}`")]
    UnknownTag { tag: String },

    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String },

    #[error("type mismatch in `!{tag}`: {message}")]
    TypeMismatch { tag: &'static str, message: String },

    #[error("no case matches run mode {} and no `default` case is given (cases: {})", mode_name(.run_mode), case_list(.cases))]
    NoMatchingCase {
        run_mode: Option<String>,
        cases: Vec<String>,
    },

    #[error("included file '{}' could not be read: {source}", .path.display())]
    IncludeNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("include depth limit of {limit} exceeded at '{}'", .path.display())]
    IncludeDepthExceeded { limit: usize, path: PathBuf },

    #[error("invalid format string in `!{tag}`: {message}")]
    InvalidFormat { tag: &'static str, message: String },

    #[error("arithmetic overflow in `!{tag}`")]
    ArithmeticOverflow { tag: &'static str },

    #[error("file error '{}': {source}", .path.display())]
    FileError {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("key `{path}` not found")]
    MissingKey { path: String },

    #[error("expected {expected}, got {found}")]
    Conversion {
        expected: &'static str,
        found: String,
    },

    #[error("{location}: {source}")]
    At {
        location: Location,
        #[source]
        source: Box<ConfigError>,
    },
}

fn origin_name(file: &Option<PathBuf>) -> String {
    file.as_ref()
        .map_or_else(|| "<memory>".to_string(), |p| format!("'{}'", p.display()))
}

fn line_col(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(l), Some(c)) => format!(" (line {}, column {})", l, c),
        (Some(l), None) => format!(" (line {})", l),
        _ => String::new(),
    }
}

fn mode_name(run_mode: &Option<String>) -> String {
    run_mode
        .as_deref()
        .map_or_else(|| "<unset>".to_string(), |m| format!("`{}`", m))
}

fn case_list(cases: &[String]) -> String {
    cases.join(", ")
}

impl ConfigError {
    /// Strip every [`ConfigError::At`] wrapper and return the innermost error.
    pub fn root_cause(&self) -> &ConfigError {
        let mut current = self;
        while let ConfigError::At { source, .. } = current {
            current = &**source;
        }
        current
    }

    /// Locations from the outermost document inwards.
    pub fn locations(&self) -> Vec<&Location> {
        let mut out = Vec::new();
        let mut current = self;
        while let ConfigError::At { location, source } = current {
            out.push(location);
            current = &**source;
        }
        out
    }

    /// Stable numeric code of the root cause.
    pub fn code(&self) -> u32 {
        match self.root_cause() {
            ConfigError::ParseError { .. } => 201,
            ConfigError::UnknownTag { .. } => 202,
            ConfigError::UndefinedVariable { .. } => 203,
            ConfigError::TypeMismatch { .. } => 204,
            ConfigError::NoMatchingCase { .. } => 205,
            ConfigError::IncludeNotFound { .. } => 301,
            ConfigError::IncludeDepthExceeded { .. } => 302,
            ConfigError::FileError { .. } => 303,
            ConfigError::InvalidFormat { .. } => 206,
            ConfigError::ArithmeticOverflow { .. } => 207,
            ConfigError::MissingKey { .. } => 304,
            ConfigError::Conversion { .. } => 401,
            ConfigError::At { source, .. } => source.code(),
        }
    }

    /// A remediation hint for the root cause, where one is useful.
    pub fn hint(&self) -> Option<&'static str> {
        match self.root_cause() {
            ConfigError::UnknownTag { .. } => Some(
                "Known tags: datetime, product, sum, join, pathjoin, abspath, abspathjoin, include, store, load (switchcmd needs a run mode)",
            ),
            ConfigError::UndefinedVariable { .. } => {
                Some("Store the variable earlier in document order, e.g. `name <= value`")
            }
            ConfigError::NoMatchingCase { .. } => Some("Add a `default` case"),
            ConfigError::IncludeNotFound { .. } => {
                Some("Include paths are relative to the including file's directory")
            }
            ConfigError::IncludeDepthExceeded { .. } => Some("Check for include cycles"),
            ConfigError::InvalidFormat { .. } => {
                Some("Use {now}, {now:%Y-%m-%d} or {now.year}; write {{ and }} for literal braces")
            }
            _ => None,
        }
    }

    pub(crate) fn at(self, location: Location) -> Self {
        ConfigError::At {
            location,
            source: Box::new(self),
        }
    }
}
