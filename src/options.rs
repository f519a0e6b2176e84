//! Per-call formatting options for inspected payloads

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How non-scalar payloads are rendered
///
/// Every field is optional so that options can be layered: a logger's
/// defaults are merged with the options passed to a single call, and the
/// call wins wherever it sets a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogOptions {
    /// Multi-line output (`{:#?}` or pretty JSON)
    pub pretty: Option<bool>,
    /// Truncate inspected text after this many characters
    pub max_length: Option<usize>,
    /// Nesting levels of a JSON payload rendered before deeper objects and
    /// arrays collapse to `[Object]` / `[Array]`; unlimited when unset
    pub depth: Option<usize>,
}

impl LogOptions {
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = Some(pretty);
        self
    }

    pub fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Layer `overrides` on top of `self`
    pub fn merge(&self, overrides: &LogOptions) -> LogOptions {
        LogOptions {
            pretty: overrides.pretty.or(self.pretty),
            max_length: overrides.max_length.or(self.max_length),
            depth: overrides.depth.or(self.depth),
        }
    }

    fn is_pretty(&self) -> bool {
        self.pretty.unwrap_or(false)
    }
}

/// Render a value through its `Debug` impl
pub(crate) fn inspect_debug<T: Debug + ?Sized>(value: &T, options: &LogOptions) -> String {
    let text = if options.is_pretty() {
        format!("{:#?}", value)
    } else {
        format!("{:?}", value)
    };
    truncate(text, options.max_length)
}

/// Render a value as JSON; serialization failures are rendered in place
pub(crate) fn inspect_json<T: Serialize + ?Sized>(value: &T, options: &LogOptions) -> String {
    let rendered = match options.depth {
        Some(depth) => serde_json::to_value(value)
            .and_then(|value| to_json_text(&collapse(value, 0, depth), options)),
        None => to_json_text(value, options),
    };
    let text = rendered.unwrap_or_else(|e| format!("<unserializable: {}>", e));
    truncate(text, options.max_length)
}

fn to_json_text<T: Serialize + ?Sized>(value: &T, options: &LogOptions) -> serde_json::Result<String> {
    if options.is_pretty() {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

/// Replace non-empty containers nested deeper than `depth` with a marker
fn collapse(value: Value, level: usize, depth: usize) -> Value {
    match value {
        Value::Object(map) if !map.is_empty() => {
            if level > depth {
                return Value::String("[Object]".to_string());
            }
            Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, collapse(v, level + 1, depth)))
                    .collect(),
            )
        }
        Value::Array(items) if !items.is_empty() => {
            if level > depth {
                return Value::String("[Array]".to_string());
            }
            Value::Array(
                items
                    .into_iter()
                    .map(|v| collapse(v, level + 1, depth))
                    .collect(),
            )
        }
        other => other,
    }
}

fn truncate(text: String, max_length: Option<usize>) -> String {
    let Some(max) = max_length else {
        return text;
    };
    let total = text.chars().count();
    if total <= max {
        return text;
    }
    let mut cut: String = text.chars().take(max).collect();
    cut.push_str(&format!("... {} more characters", total - max));
    cut
}
