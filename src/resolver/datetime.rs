// Author: Dustin Pilgrim
// License: MIT

use std::fmt::{self, Write};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, Local, TimeZone, Timelike};

use super::{Tag, scalar_text};
use crate::loader::Resolution;
use crate::{ConfigError, Value};

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidFormat {
        tag: Tag::DateTime.name(),
        message: message.into(),
    }
}

fn render_field<Tz>(field: &str, now: &DateTime<Tz>, out: &mut String) -> Result<(), ConfigError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let (name, spec) = match field.split_once(':') {
        Some((name, spec)) => (name, Some(spec)),
        None => (field, None),
    };

    let spec = match (name, spec) {
        ("now", Some(spec)) => spec,
        ("now", None) if now.timestamp_subsec_micros() == 0 => "%Y-%m-%d %H:%M:%S",
        ("now", None) => "%Y-%m-%d %H:%M:%S%.6f",
        (attr, None) if attr.starts_with("now.") => {
            let number = match &attr[4..] {
                "year" => now.year() as i64,
                "month" => now.month() as i64,
                "day" => now.day() as i64,
                "hour" => now.hour() as i64,
                "minute" => now.minute() as i64,
                "second" => now.second() as i64,
                "microsecond" => now.timestamp_subsec_micros() as i64,
                other => return Err(invalid(format!("unknown field `now.{}`", other))),
            };
            let _ = write!(out, "{}", number);
            return Ok(());
        }
        (attr, Some(_)) if attr.starts_with("now.") => {
            return Err(invalid(format!("format spec on `{}` is not supported", attr)));
        }
        (other, _) => return Err(invalid(format!("unknown placeholder `{{{}}}`", other))),
    };

    let items: Vec<Item<'_>> = StrftimeItems::new(spec).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid(format!("bad strftime directive in `{}`", spec)));
    }
    write!(out, "{}", now.format_with_items(items.iter()))
        .map_err(|_| invalid(format!("`{}` cannot be rendered", spec)))
}

/// Substitute `{now}`-style placeholders in `template`.
///
/// `{now}` renders as `YYYY-MM-DD HH:MM:SS` (with `.ffffff` when there are
/// microseconds), `{now:<strftime>}` uses the given format, and
/// `{now.year}` and friends render one field. `{{` and `}}` are literal
/// braces.
pub fn render<Tz>(template: &str, now: &DateTime<Tz>) -> Result<String, ConfigError>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(ch) => field.push(ch),
                        None => return Err(invalid("unclosed `{`")),
                    }
                }
                render_field(&field, now, &mut out)?;
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(invalid("single `}` outside a placeholder")),
            _ => out.push(c),
        }
    }

    Ok(out)
}

pub(super) fn resolve(_: &mut Resolution<'_>, input: Value) -> Result<Value, ConfigError> {
    let template = scalar_text(Tag::DateTime, &input)?;
    render(&template, &Local::now()).map(Value::String)
}
