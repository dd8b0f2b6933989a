// Author: Dustin Pilgrim
// License: MIT

use super::{Tag, sequence};
use crate::{ConfigError, Value};

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(x) => x,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Number::Int(i) => Value::Integer(i),
            Number::Float(x) => Value::Float(x),
        }
    }
}

/// Numeric leaves of `input`, nested sequences flattened in order.
fn numbers(tag: Tag, input: Value) -> Result<Vec<Number>, ConfigError> {
    fn collect(tag: Tag, items: Vec<Value>, out: &mut Vec<Number>) -> Result<(), ConfigError> {
        for item in items {
            match item {
                Value::Integer(i) => out.push(Number::Int(i)),
                Value::Float(x) => out.push(Number::Float(x)),
                Value::Sequence(nested) => collect(tag, nested, out)?,
                other => {
                    return Err(ConfigError::TypeMismatch {
                        tag: tag.name(),
                        message: format!("expected numbers, got a {} ({})", other.kind(), other),
                    });
                }
            }
        }
        Ok(())
    }

    let mut out = Vec::new();
    collect(tag, sequence(tag, input)?, &mut out)?;
    Ok(out)
}

fn reduce(
    tag: Tag,
    input: Value,
    identity: i64,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, ConfigError> {
    let mut acc = Number::Int(identity);
    for n in numbers(tag, input)? {
        acc = match (acc, n) {
            (Number::Int(a), Number::Int(b)) => Number::Int(
                int_op(a, b).ok_or(ConfigError::ArithmeticOverflow { tag: tag.name() })?,
            ),
            (a, b) => Number::Float(float_op(a.as_f64(), b.as_f64())),
        };
    }
    Ok(acc.into_value())
}

/// Sum of every number in `input`; integers stay integers.
pub fn sum(input: Value) -> Result<Value, ConfigError> {
    reduce(Tag::Sum, input, 0, i64::checked_add, |a, b| a + b)
}

/// Product of every number in `input`; integers stay integers.
pub fn product(input: Value) -> Result<Value, ConfigError> {
    reduce(Tag::Product, input, 1, i64::checked_mul, |a, b| a * b)
}

/// Concatenate the string form of each element.
pub fn join(input: Value) -> Result<Value, ConfigError> {
    let joined = sequence(Tag::Join, input)?
        .iter()
        .map(Value::to_string)
        .collect::<String>();
    Ok(Value::String(joined))
}
