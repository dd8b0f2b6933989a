// Author: Dustin Pilgrim
// License: MIT

use indexmap::IndexMap;

use crate::Value;

pub(super) const DEFAULT_WIDTH: usize = 80;
const KEY_WIDTH: usize = 25;

/// Spellings to try for one path segment: as given, snake_case, kebab-case.
pub(super) fn key_variants(seg: &str) -> Vec<String> {
    let mut out = vec![seg.to_string()];

    let snake = seg.replace('-', "_");
    if snake != seg {
        out.push(snake);
    }

    let kebab = seg.replace('_', "-");
    if kebab != seg {
        out.push(kebab);
    }

    out
}

/// Walk `segments` from `root`. Mapping segments try every key spelling;
/// numeric segments index sequences.
pub(super) fn lookup<'a>(root: &'a IndexMap<String, Value>, segments: &[&str]) -> Option<&'a Value> {
    let (first, rest) = segments.split_first()?;
    let mut current = key_variants(first).iter().find_map(|k| root.get(k))?;

    for seg in rest {
        current = match current {
            Value::Mapping(items) => key_variants(seg).iter().find_map(|k| items.get(k))?,
            Value::Sequence(items) => items.get(seg.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Merge `value` into `target[key]`, recursing while both sides are mappings.
pub(super) fn merge_entry(target: &mut IndexMap<String, Value>, key: String, value: Value) {
    match value {
        Value::Mapping(incoming) => {
            if let Some(Value::Mapping(existing)) = target.get_mut(&key) {
                for (k, v) in incoming {
                    merge_entry(existing, k, v);
                }
            } else {
                target.insert(key, Value::Mapping(incoming));
            }
        }
        other => {
            target.insert(key, other);
        }
    }
}

fn pad_line(line: String, width: usize) -> String {
    let len = line.chars().count();
    let target = width.saturating_sub(1);
    if len >= target {
        line
    } else {
        line + &" ".repeat(target - len)
    }
}

fn render_entry(key: &str, value: &Value, width: usize, out: &mut String) {
    match value {
        Value::Mapping(items) if !items.is_empty() => {
            for (k, v) in items {
                render_entry(&format!("{}.{}", key, k), v, width, out);
            }
        }
        other => {
            let line = format!("| {:<width$}: {}", key, other, width = KEY_WIDTH);
            out.push_str(&pad_line(line, width));
            out.push_str("|\n");
        }
    }
}

/// Boxed two-column table of every leaf value.
pub(super) fn render_summary(values: &IndexMap<String, Value>, width: usize) -> String {
    let width = width.max(KEY_WIDTH + 8);
    let mut out = String::new();

    let header = "+--[ Configuration ]".to_string();
    let header_len = header.chars().count();
    out.push_str(&header);
    out.push_str(&"-".repeat(width.saturating_sub(1 + header_len)));
    out.push_str("+\n");

    for (key, value) in values {
        render_entry(key, value, width, &mut out);
    }

    out.push('+');
    out.push_str(&"-".repeat(width - 2));
    out.push('+');
    out
}
