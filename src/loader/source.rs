// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::ConfigError;
use crate::ast::Document;

/// Where a document comes from.
///
/// Plain strings convert to [`Source::Text`]; use [`Source::path`] (or a
/// `Path`/`PathBuf`) for files.
pub enum Source {
    Text(String),
    Path(PathBuf),
    /// A readable stream. `name`, when given, is the file it reads so
    /// relative paths resolve against its directory.
    Reader {
        reader: Box<dyn Read>,
        name: Option<PathBuf>,
    },
}

impl Source {
    pub fn text(text: impl Into<String>) -> Self {
        Source::Text(text.into())
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        Source::Path(path.into())
    }

    pub fn reader(reader: impl Read + 'static) -> Self {
        Source::Reader {
            reader: Box::new(reader),
            name: None,
        }
    }

    pub fn named_reader(reader: impl Read + 'static, name: impl Into<PathBuf>) -> Self {
        Source::Reader {
            reader: Box::new(reader),
            name: Some(name.into()),
        }
    }

    pub(crate) fn into_document(self) -> Result<Document, ConfigError> {
        match self {
            Source::Text(text) => Document::parse(&text, None),
            Source::Path(path) => {
                let text = fs::read_to_string(&path).map_err(|source| ConfigError::FileError {
                    path: path.clone(),
                    source,
                })?;
                Document::parse(&text, Some(&path))
            }
            Source::Reader { mut reader, name } => {
                let mut text = String::new();
                reader
                    .read_to_string(&mut text)
                    .map_err(|source| ConfigError::FileError {
                        path: name.clone().unwrap_or_else(|| PathBuf::from("<reader>")),
                        source,
                    })?;
                Document::parse(&text, name.as_deref())
            }
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Source::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Source::Reader { name, .. } => f.debug_struct("Reader").field("name", name).finish(),
        }
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Source::Text(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Source::Text(text)
    }
}

impl From<&Path> for Source {
    fn from(path: &Path) -> Self {
        Source::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Source {
    fn from(path: PathBuf) -> Self {
        Source::Path(path)
    }
}

impl From<&PathBuf> for Source {
    fn from(path: &PathBuf) -> Self {
        Source::Path(path.clone())
    }
}
