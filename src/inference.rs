// Author: Dustin Pilgrim
// License: MIT

//! Implicit tags: plain scalars whose text alone selects a tag.
//!
//! `name <= value` is a `!store` and `$name` is a `!load`. The check runs
//! before a scalar is taken as a string, so a literal string of either
//! shape cannot be written. Quoting does not help, since the YAML tree no
//! longer records it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::resolver::Tag;

pub static STORE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s*<=\s*(.+)$").expect("store pattern is valid"));

pub static LOAD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$(\w+)$").expect("load pattern is valid"));

/// A plain scalar recognised as tagged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Implicit<'a> {
    Store { key: &'a str, value_text: &'a str },
    Load { key: &'a str },
}

impl Implicit<'_> {
    pub fn tag(&self) -> Tag {
        match self {
            Implicit::Store { .. } => Tag::Store,
            Implicit::Load { .. } => Tag::Load,
        }
    }
}

/// Match `key <= value-text`.
pub fn match_store(text: &str) -> Option<(&str, &str)> {
    let caps = STORE_PATTERN.captures(text)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

/// Match `$key`.
pub fn match_load(text: &str) -> Option<&str> {
    LOAD_PATTERN.captures(text)?.get(1).map(|m| m.as_str())
}

/// Classify a plain scalar. `None` means it is an ordinary string.
pub fn classify(text: &str) -> Option<Implicit<'_>> {
    if let Some((key, value_text)) = match_store(text) {
        return Some(Implicit::Store { key, value_text });
    }
    match_load(text).map(|key| Implicit::Load { key })
}
