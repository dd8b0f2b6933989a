// Author: Dustin Pilgrim
// License: MIT

use super::{Tag, scalar_text};
use crate::loader::Resolution;
use crate::{ConfigError, Value};

pub(super) fn resolve(res: &mut Resolution<'_>, input: Value) -> Result<Value, ConfigError> {
    let relative = scalar_text(Tag::Include, &input)?;
    res.include(&relative)
}
