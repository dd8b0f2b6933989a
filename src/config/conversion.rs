// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;

use crate::{ConfigError, Value};

fn mismatch(expected: &'static str, value: &Value) -> ConfigError {
    ConfigError::Conversion {
        expected,
        found: format!("{} `{}`", value.kind(), value),
    }
}

impl TryFrom<Value> for String {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(mismatch("string", &value)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(mismatch("bool", &value)),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Float(x) => Ok(x),
            Value::Integer(i) => Ok(i as f64),
            _ => Err(mismatch("number", &value)),
        }
    }
}

impl TryFrom<Value> for f32 {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        f64::try_from(value).map(|x| x as f32)
    }
}

impl TryFrom<Value> for i64 {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(i) => Ok(i),
            _ => Err(mismatch("integer", &value)),
        }
    }
}

macro_rules! narrow_integer {
    ($($t:ty => $name:literal),* $(,)?) => {
        $(
            impl TryFrom<Value> for $t {
                type Error = ConfigError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::Integer(i) => <$t>::try_from(i).map_err(|_| mismatch($name, &value)),
                        _ => Err(mismatch($name, &value)),
                    }
                }
            }
        )*
    };
}

narrow_integer! {
    i32 => "32-bit integer",
    u64 => "non-negative integer",
    u32 => "32-bit unsigned integer",
    u16 => "16-bit unsigned integer",
    usize => "non-negative integer",
}

impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = ConfigError>,
{
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Sequence(items) => items.into_iter().map(T::try_from).collect(),
            _ => Err(mismatch("sequence", &value)),
        }
    }
}

impl TryFrom<Value> for IndexMap<String, Value> {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(items) => Ok(items),
            _ => Err(mismatch("mapping", &value)),
        }
    }
}

impl TryFrom<Value> for IndexMap<String, String> {
    type Error = ConfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Mapping(items) => items
                .into_iter()
                .map(|(k, v)| String::try_from(v).map(|v| (k, v)))
                .collect(),
            _ => Err(mismatch("mapping", &value)),
        }
    }
}
