//! Typed configuration values

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// A decoded settings value.
///
/// Strings are the fallback for anything that is not a literal, so most
/// command fragments end up as `String`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    None,
    List(Vec<ConfigValue>),
    Mapping(BTreeMap<String, ConfigValue>),
}

impl ConfigValue {
    /// The string payload, if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness as settings authors expect it: empty containers, empty
    /// strings, zero, `False` and `None` are all "unset".
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::String(s) => !s.is_empty(),
            ConfigValue::Integer(i) => *i != 0,
            ConfigValue::Float(f) => *f != 0.0,
            ConfigValue::Boolean(b) => *b,
            ConfigValue::None => false,
            ConfigValue::List(items) => !items.is_empty(),
            ConfigValue::Mapping(map) => !map.is_empty(),
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::String(_) => "string",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::Boolean(_) => "boolean",
            ConfigValue::None => "None",
            ConfigValue::List(_) => "list",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    /// Literal form of the value, with strings quoted.
    pub fn to_literal(&self) -> String {
        let mut out = String::new();
        write_literal(&mut out, self);
        out
    }
}

/// Strings display verbatim, everything else in literal syntax.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => f.write_str(s),
            other => f.write_str(&other.to_literal()),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Integer(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Boolean(value)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(value: Vec<T>) -> Self {
        ConfigValue::List(value.into_iter().map(Into::into).collect())
    }
}

fn write_literal(out: &mut String, value: &ConfigValue) {
    match value {
        ConfigValue::String(s) => write_quoted(out, s),
        ConfigValue::Integer(i) => out.push_str(&i.to_string()),
        // Debug keeps the fractional part ("1.0"), matching literal syntax
        ConfigValue::Float(f) => out.push_str(&format!("{:?}", f)),
        ConfigValue::Boolean(true) => out.push_str("True"),
        ConfigValue::Boolean(false) => out.push_str("False"),
        ConfigValue::None => out.push_str("None"),
        ConfigValue::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_literal(out, item);
            }
            out.push(']');
        }
        ConfigValue::Mapping(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(out, key);
                out.push_str(": ");
                write_literal(out, item);
            }
            out.push('}');
        }
    }
}

fn write_quoted(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('\'');
}
