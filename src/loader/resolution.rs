// Author: Dustin Pilgrim
// License: MIT

use std::fmt::Write;
use std::path::Path;

use indexmap::IndexMap;
use serde_yaml::value::TaggedValue;
use tracing::trace;

use super::Loader;
use crate::ast::{Document, Node, tag_name};
use crate::error::Location;
use crate::inference::{self, Implicit};
use crate::resolver;
use crate::store::VariableStore;
use crate::{ConfigError, Value};

#[derive(Debug, Clone)]
enum Segment {
    Key(String),
    Index(usize),
}

/// Depth-first walk of one document, in document order.
///
/// Tag resolvers receive this to reach the store, the document's base
/// directory, the run mode and nested resolution.
pub struct Resolution<'l> {
    loader: &'l Loader,
    document: &'l Document,
    depth: usize,
    trail: Vec<Segment>,
}

impl<'l> Resolution<'l> {
    pub(crate) fn new(loader: &'l Loader, document: &'l Document, depth: usize) -> Self {
        Self {
            loader,
            document,
            depth,
            trail: Vec::new(),
        }
    }

    /// Resolve the whole document. Failures are wrapped once with the
    /// position of the failing node.
    pub(crate) fn run(mut self) -> Result<Value, ConfigError> {
        let document = self.document;
        self.resolve(&document.root)
            .map_err(|e| e.at(self.location()))
    }

    fn location(&self) -> Location {
        let mut node = String::new();
        for segment in &self.trail {
            match segment {
                Segment::Key(k) if node.is_empty() => node.push_str(k),
                Segment::Key(k) => {
                    let _ = write!(node, ".{}", k);
                }
                Segment::Index(i) => {
                    let _ = write!(node, "[{}]", i);
                }
            }
        }
        Location {
            file: self.document.origin.clone(),
            node,
        }
    }

    pub fn store(&self) -> &VariableStore {
        self.loader.store()
    }

    pub fn base_dir(&self) -> &Path {
        &self.document.base_dir
    }

    pub fn run_mode(&self) -> Option<&str> {
        self.loader.run_mode()
    }

    /// Load `relative` as a nested document one level deeper.
    pub fn include(&self, relative: &str) -> Result<Value, ConfigError> {
        self.loader
            .include_at(relative, &self.document.base_dir, self.depth + 1)
    }

    /// Resolve the value text of `key <= value_text`.
    ///
    /// Implicit patterns and explicit tags (`!name ...`) resolve, plain
    /// numbers, booleans and `null` are typed, and any other text is kept
    /// verbatim, including `#` and `: `.
    pub fn resolve_value_text(&mut self, text: &str) -> Result<Value, ConfigError> {
        if inference::classify(text).is_some() {
            return self.resolve_scalar(text);
        }
        if text.starts_with('!') {
            return match serde_yaml::from_str::<Node>(text) {
                Ok(node @ Node::Tagged(_)) => self.resolve(&node),
                _ => Ok(Value::String(text.to_string())),
            };
        }
        if matches!(text.trim(), "~" | "null" | "Null" | "NULL") {
            return Ok(Value::Null);
        }
        if text.contains('#') {
            return Ok(Value::String(text.to_string()));
        }
        match serde_yaml::from_str::<Node>(text) {
            Ok(Node::Bool(b)) => Ok(Value::Bool(b)),
            Ok(Node::Number(n)) => Ok(Value::from_number(&n)),
            _ => Ok(Value::String(text.to_string())),
        }
    }

    pub fn resolve(&mut self, node: &Node) -> Result<Value, ConfigError> {
        match node {
            Node::Null => Ok(Value::Null),
            Node::Bool(b) => Ok(Value::Bool(*b)),
            Node::Number(n) => Ok(Value::from_number(n)),
            Node::String(s) => self.resolve_scalar(s),
            Node::Sequence(items) => {
                let mut out = Vec::with_capacity(items.len());
                for (i, item) in items.iter().enumerate() {
                    self.trail.push(Segment::Index(i));
                    out.push(self.resolve(item)?);
                    self.trail.pop();
                }
                Ok(Value::Sequence(out))
            }
            Node::Mapping(mapping) => {
                let mut out = IndexMap::with_capacity(mapping.len());
                for (k, v) in mapping {
                    let key = self.resolve(k)?.into_mapping_key()?;
                    self.trail.push(Segment::Key(key.clone()));
                    let value = self.resolve(v)?;
                    self.trail.pop();
                    out.insert(key, value);
                }
                Ok(Value::Mapping(out))
            }
            Node::Tagged(tagged) => self.resolve_tagged(tagged),
        }
    }

    fn resolve_scalar(&mut self, text: &str) -> Result<Value, ConfigError> {
        let Some(implicit) = inference::classify(text) else {
            return Ok(Value::String(text.to_string()));
        };
        trace!("Inferred {} from '{}'", implicit.tag(), text);
        match implicit {
            Implicit::Store { key, value_text } => resolver::store_text(self, key, value_text),
            Implicit::Load { key } => resolver::load_key(self, key),
        }
    }

    fn resolve_tagged(&mut self, tagged: &TaggedValue) -> Result<Value, ConfigError> {
        let name = tag_name(&tagged.tag);
        if !self.loader.tags().contains(&name) {
            return Err(ConfigError::UnknownTag { tag: name });
        }

        // The tagged scalar itself is literal; collection children resolve as usual.
        let input = match &tagged.value {
            Node::Sequence(_) | Node::Mapping(_) => self.resolve(&tagged.value)?,
            scalar => Value::from_plain(scalar)?,
        };
        self.dispatch(&name, input)
    }

    fn dispatch(&mut self, name: &str, input: Value) -> Result<Value, ConfigError> {
        let (_, handler) = self
            .loader
            .tags()
            .get(name)
            .ok_or_else(|| ConfigError::UnknownTag {
                tag: name.to_string(),
            })?;
        handler(self, input)
    }
}
