// Author: Dustin Pilgrim
// License: MIT

use tracing::debug;

use super::{Tag, scalar_text};
use crate::inference;
use crate::loader::Resolution;
use crate::{ConfigError, Value};

/// `!store [key, value]` or `!store key <= value`; yields the value.
pub(super) fn store(res: &mut Resolution<'_>, input: Value) -> Result<Value, ConfigError> {
    match input {
        Value::String(text) => match inference::match_store(&text) {
            Some((key, value_text)) => store_text(res, key, value_text),
            None => Err(ConfigError::TypeMismatch {
                tag: Tag::Store.name(),
                message: format!("expected `key <= value`, got `{}`", text),
            }),
        },
        Value::Sequence(items) => match <[Value; 2]>::try_from(items) {
            Ok([key, value]) => {
                let key = key.into_key().map_err(|other| ConfigError::TypeMismatch {
                    tag: Tag::Store.name(),
                    message: format!("variable name must be a scalar, got a {}", other.kind()),
                })?;
                Ok(assign(res, key, value))
            }
            Err(items) => Err(ConfigError::TypeMismatch {
                tag: Tag::Store.name(),
                message: format!("expected `[key, value]`, got {} elements", items.len()),
            }),
        },
        other => Err(ConfigError::TypeMismatch {
            tag: Tag::Store.name(),
            message: format!("expected `[key, value]` or `key <= value`, got {}", other),
        }),
    }
}

/// Store the value text of `key <= value_text` under `key`.
pub(crate) fn store_text(
    res: &mut Resolution<'_>,
    key: &str,
    value_text: &str,
) -> Result<Value, ConfigError> {
    let value = res.resolve_value_text(value_text)?;
    Ok(assign(res, key.to_string(), value))
}

fn assign(res: &Resolution<'_>, key: String, value: Value) -> Value {
    debug!("Storing variable '{}'", key);
    res.store().set(key, value.clone());
    value
}

/// `!load $key` or `!load key`.
pub(super) fn load(res: &mut Resolution<'_>, input: Value) -> Result<Value, ConfigError> {
    let text = scalar_text(Tag::Load, &input)?;
    let key = inference::match_load(&text).unwrap_or(text.as_str());
    load_key(res, key)
}

pub(crate) fn load_key(res: &Resolution<'_>, key: &str) -> Result<Value, ConfigError> {
    res.store().get(key)
}
