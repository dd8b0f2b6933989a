// Author: Dustin Pilgrim
// License: MIT

//! Tag resolvers and the table that dispatches tag names to them.
//!
//! Each resolver receives the tagged node's content: the literal scalar
//! for a tagged scalar, or the fully resolved sequence/mapping otherwise.

use std::fmt;

use indexmap::IndexMap;

use crate::loader::Resolution;
use crate::{ConfigError, Value};

mod arith;
mod datetime;
mod include;
mod paths;
mod switch;
mod variables;

pub use arith::{join, product, sum};
pub use datetime::render as render_datetime;
pub use paths::path_join;
pub(crate) use variables::{load_key, store_text};

/// Signature shared by every tag resolver.
pub type TagFn = fn(&mut Resolution<'_>, Value) -> Result<Value, ConfigError>;

/// The fixed tag vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    DateTime,
    Product,
    Sum,
    Join,
    PathJoin,
    AbsPath,
    AbsPathJoin,
    Include,
    Store,
    Load,
    SwitchCmd,
}

impl Tag {
    /// Tags available to every loader. `switchcmd` comes from [`Extension`].
    pub const BASE: [Tag; 10] = [
        Tag::DateTime,
        Tag::Product,
        Tag::Sum,
        Tag::Join,
        Tag::PathJoin,
        Tag::AbsPath,
        Tag::AbsPathJoin,
        Tag::Include,
        Tag::Store,
        Tag::Load,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tag::DateTime => "datetime",
            Tag::Product => "product",
            Tag::Sum => "sum",
            Tag::Join => "join",
            Tag::PathJoin => "pathjoin",
            Tag::AbsPath => "abspath",
            Tag::AbsPathJoin => "abspathjoin",
            Tag::Include => "include",
            Tag::Store => "store",
            Tag::Load => "load",
            Tag::SwitchCmd => "switchcmd",
        }
    }

    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::BASE
            .into_iter()
            .chain([Tag::SwitchCmd])
            .find(|t| t.name() == name)
    }

    fn resolver(self) -> TagFn {
        match self {
            Tag::DateTime => datetime::resolve,
            Tag::Product => |_, input| product(input),
            Tag::Sum => |_, input| sum(input),
            Tag::Join => |_, input| join(input),
            Tag::PathJoin => paths::pathjoin,
            Tag::AbsPath => paths::abspath,
            Tag::AbsPathJoin => paths::abspathjoin,
            Tag::Include => include::resolve,
            Tag::Store => variables::store,
            Tag::Load => variables::load,
            Tag::SwitchCmd => switch::resolve,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "!{}", self.name())
    }
}

/// Optional additions to the base tag table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    /// Register `!switchcmd`, selecting cases by `run_mode`.
    SwitchCmd { run_mode: Option<String> },
}

impl Extension {
    fn tag(&self) -> Tag {
        match self {
            Extension::SwitchCmd { .. } => Tag::SwitchCmd,
        }
    }
}

/// Tag name to resolver, built once per loader.
#[derive(Clone)]
pub struct TagTable {
    entries: IndexMap<&'static str, (Tag, TagFn)>,
}

impl TagTable {
    pub fn new(extensions: &[Extension]) -> Self {
        let entries = Tag::BASE
            .into_iter()
            .chain(extensions.iter().map(Extension::tag))
            .map(|tag| (tag.name(), (tag, tag.resolver())))
            .collect();
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<(Tag, TagFn)> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

impl Default for TagTable {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl fmt::Debug for TagTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

/// Text of a scalar argument. Numbers and booleans are rendered.
pub(crate) fn scalar_text(tag: Tag, input: &Value) -> Result<String, ConfigError> {
    match input {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(_) | Value::Float(_) | Value::Bool(_) => Ok(input.to_string()),
        other => Err(ConfigError::TypeMismatch {
            tag: tag.name(),
            message: format!("expected a scalar, got a {}", other.kind()),
        }),
    }
}

/// Elements of a sequence argument.
pub(crate) fn sequence(tag: Tag, input: Value) -> Result<Vec<Value>, ConfigError> {
    match input {
        Value::Sequence(items) => Ok(items),
        other => Err(ConfigError::TypeMismatch {
            tag: tag.name(),
            message: format!("expected a sequence, got a {}", other.kind()),
        }),
    }
}
