// Author: Dustin Pilgrim
// License: MIT

use super::Tag;
use crate::loader::Resolution;
use crate::{ConfigError, Value};

/// Pick the case named by the run mode, else `default`.
///
/// All cases are resolved before selection, so stores inside cases that
/// are not picked still take effect.
pub(super) fn resolve(res: &mut Resolution<'_>, input: Value) -> Result<Value, ConfigError> {
    let mut cases = match input {
        Value::Mapping(cases) => cases,
        other => {
            return Err(ConfigError::TypeMismatch {
                tag: Tag::SwitchCmd.name(),
                message: format!("expected a mapping of cases, got a {}", other.kind()),
            });
        }
    };

    let run_mode = res.run_mode();
    if let Some(value) = run_mode.and_then(|mode| cases.shift_remove(mode)) {
        return Ok(value);
    }

    cases
        .shift_remove("default")
        .ok_or_else(|| ConfigError::NoMatchingCase {
            run_mode: run_mode.map(str::to_string),
            cases: cases.keys().cloned().collect(),
        })
}
