// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Serialize;

use crate::ConfigError;

/// One node of the underlying YAML tree, tags included.
pub type Node = serde_yaml::Value;

/// A fully resolved configuration value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    Mapping(IndexMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, Value>> {
        if let Value::Mapping(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<Value>> {
        if let Value::Sequence(items) = self {
            Some(items)
        } else {
            None
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short type name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Mapping(_) => "mapping",
        }
    }

    /// Convert an untagged YAML tree without any tag handling or inference.
    ///
    /// This is the plain structural reading of a document; a document with
    /// no tags and no pattern-shaped scalars resolves to exactly this.
    pub fn from_plain(node: &Node) -> Result<Value, ConfigError> {
        match node {
            Node::Null => Ok(Value::Null),
            Node::Bool(b) => Ok(Value::Bool(*b)),
            Node::Number(n) => Ok(Value::from_number(n)),
            Node::String(s) => Ok(Value::String(s.clone())),
            Node::Sequence(items) => items
                .iter()
                .map(Value::from_plain)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Sequence),
            Node::Mapping(mapping) => {
                let mut out = IndexMap::with_capacity(mapping.len());
                for (k, v) in mapping {
                    out.insert(Value::from_plain(k)?.into_mapping_key()?, Value::from_plain(v)?);
                }
                Ok(Value::Mapping(out))
            }
            Node::Tagged(tagged) => Err(ConfigError::UnknownTag {
                tag: tag_name(&tagged.tag),
            }),
        }
    }

    pub(crate) fn from_number(n: &serde_yaml::Number) -> Value {
        if let Some(i) = n.as_i64() {
            Value::Integer(i)
        } else {
            // u64 beyond i64::MAX lands here as well
            Value::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }

    /// Render a resolved scalar as a mapping key, handing back anything
    /// that is not a scalar.
    pub(crate) fn into_key(self) -> Result<String, Value> {
        match self {
            Value::String(s) => Ok(s),
            Value::Null | Value::Bool(_) | Value::Integer(_) | Value::Float(_) => {
                Ok(self.to_string())
            }
            other => Err(other),
        }
    }

    pub(crate) fn into_mapping_key(self) -> Result<String, ConfigError> {
        self.into_key().map_err(|other| ConfigError::Conversion {
            expected: "a scalar mapping key",
            found: format!("a {}", other.kind()),
        })
    }
}

/// Tag name without the leading `!`.
pub(crate) fn tag_name(tag: &serde_yaml::value::Tag) -> String {
    tag.to_string().trim_start_matches('!').to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            // Debug keeps the fractional part: 2.0 rather than 2
            Value::Float(x) => write!(f, "{:?}", x),
            Value::String(s) => write!(f, "{}", s),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Mapping(items) => {
                write!(f, "{{")?;
                for (i, (k, v)) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(items: IndexMap<String, Value>) -> Self {
        Value::Mapping(items)
    }
}

/// One parsed configuration source and the directory its relative paths
/// resolve against.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub root: Node,
    pub base_dir: PathBuf,
    pub origin: Option<PathBuf>,
}

impl Document {
    /// Parse YAML text. `origin` is the file the text came from, if any; the
    /// base directory is its parent, or the current directory otherwise.
    pub fn parse(text: &str, origin: Option<&Path>) -> Result<Self, ConfigError> {
        let root: Node = serde_yaml::from_str(text).map_err(|e| {
            let location = e.location();
            ConfigError::ParseError {
                message: e.to_string(),
                file: origin.map(Path::to_path_buf),
                line: location.as_ref().map(|l| l.line()),
                column: location.as_ref().map(|l| l.column()),
            }
        })?;

        let base_dir = match origin.and_then(Path::parent) {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            root,
            base_dir,
            origin: origin.map(Path::to_path_buf),
        })
    }
}
