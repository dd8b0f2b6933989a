// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use super::{Tag, scalar_text, sequence};
use crate::loader::Resolution;
use crate::utils;
use crate::{ConfigError, Value};

fn join_elements(tag: Tag, input: Value) -> Result<PathBuf, ConfigError> {
    let items = sequence(tag, input)?;
    if items.is_empty() {
        return Err(ConfigError::TypeMismatch {
            tag: tag.name(),
            message: "expected at least one path element".into(),
        });
    }

    let mut path = PathBuf::new();
    for item in items {
        match item {
            // An absolute element restarts the path, as PathBuf::push does.
            Value::String(s) => path.push(s),
            other => {
                return Err(ConfigError::TypeMismatch {
                    tag: tag.name(),
                    message: format!("path elements must be strings, got a {} ({})", other.kind(), other),
                });
            }
        }
    }
    Ok(path)
}

/// Join string elements with the platform separator.
pub fn path_join(input: Value) -> Result<Value, ConfigError> {
    let path = join_elements(Tag::PathJoin, input)?;
    Ok(Value::String(path.to_string_lossy().into_owned()))
}

fn absolute_in(base_dir: &Path, path: &Path) -> Result<Value, ConfigError> {
    let joined = base_dir.join(path);
    let absolute = utils::absolutize(&joined).map_err(|source| ConfigError::FileError {
        path: joined.clone(),
        source,
    })?;
    Ok(Value::String(absolute.to_string_lossy().into_owned()))
}

pub(super) fn pathjoin(_: &mut Resolution<'_>, input: Value) -> Result<Value, ConfigError> {
    path_join(input)
}

pub(super) fn abspath(res: &mut Resolution<'_>, input: Value) -> Result<Value, ConfigError> {
    let text = scalar_text(Tag::AbsPath, &input)?;
    absolute_in(res.base_dir(), Path::new(&text))
}

pub(super) fn abspathjoin(res: &mut Resolution<'_>, input: Value) -> Result<Value, ConfigError> {
    let joined = join_elements(Tag::AbsPathJoin, input)?;
    absolute_in(res.base_dir(), &joined)
}
