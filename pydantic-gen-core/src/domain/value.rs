// pydantic-gen-core/src/domain/value.rs

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::domain::error::DomainError;

/// A configuration document, format independent.
///
/// Mappings keep the key order of the source file: the generated classes list
/// their fields in the same order as the file.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i128),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Mapping(Vec<(String, ConfigValue)>),
}

impl ConfigValue {
    /// Name of the Python type a value of this kind is annotated with.
    pub fn python_type(&self) -> &'static str {
        match self {
            ConfigValue::Null => "Any",
            ConfigValue::Bool(_) => "bool",
            ConfigValue::Integer(_) => "int",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "str",
            ConfigValue::List(_) => "list",
            ConfigValue::Mapping(_) => "dict",
        }
    }

    /// Renders a scalar as a Python literal. Containers have no literal form here.
    pub fn python_literal(&self) -> Option<String> {
        match self {
            ConfigValue::Null => Some("None".to_string()),
            ConfigValue::Bool(true) => Some("True".to_string()),
            ConfigValue::Bool(false) => Some("False".to_string()),
            ConfigValue::Integer(i) => Some(i.to_string()),
            ConfigValue::Float(f) => Some(python_float_literal(*f)),
            ConfigValue::String(s) => Some(python_str_literal(s)),
            ConfigValue::List(_) | ConfigValue::Mapping(_) => None,
        }
    }

    /// Short description used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "a boolean",
            ConfigValue::Integer(_) => "an integer",
            ConfigValue::Float(_) => "a float",
            ConfigValue::String(_) => "a string",
            ConfigValue::List(_) => "a list",
            ConfigValue::Mapping(_) => "a mapping",
        }
    }

    pub fn as_mapping(&self) -> Option<&[(String, ConfigValue)]> {
        match self {
            ConfigValue::Mapping(entries) => Some(entries),
            _ => None,
        }
    }
}

/// One INI section once DEFAULT values are merged in and interpolation is done.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IniSection {
    pub name: String,
    pub entries: Vec<(String, String)>,
}

pub fn python_float_literal(f: f64) -> String {
    if f.is_nan() {
        "float('nan')".to_string()
    } else if f.is_infinite() {
        if f > 0.0 {
            "float('inf')".to_string()
        } else {
            "-float('inf')".to_string()
        }
    } else {
        // Debug keeps the ".0" on whole numbers, like Python's repr.
        format!("{:?}", f)
    }
}

/// Python `repr()` of a string.
pub fn python_str_literal(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

// --- CONVERSIONS ---

impl From<serde_json::Value> for ConfigValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => number_from_json(&n),
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::List(items.into_iter().map(ConfigValue::from).collect())
            }
            serde_json::Value::Object(map) => ConfigValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, ConfigValue::from(v)))
                    .collect(),
            ),
        }
    }
}

fn number_from_json(n: &serde_json::Number) -> ConfigValue {
    if let Some(i) = n.as_i64() {
        ConfigValue::Integer(i128::from(i))
    } else if let Some(u) = n.as_u64() {
        ConfigValue::Integer(i128::from(u))
    } else {
        ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl TryFrom<serde_yaml::Value> for ConfigValue {
    type Error = DomainError;

    fn try_from(value: serde_yaml::Value) -> Result<Self, Self::Error> {
        Ok(match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(b),
            serde_yaml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigValue::Integer(i128::from(i))
                } else if let Some(u) = n.as_u64() {
                    ConfigValue::Integer(i128::from(u))
                } else {
                    ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_yaml::Value::String(s) => ConfigValue::String(s),
            serde_yaml::Value::Sequence(items) => ConfigValue::List(
                items
                    .into_iter()
                    .map(ConfigValue::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            serde_yaml::Value::Mapping(map) => {
                let mut entries = Vec::with_capacity(map.len());
                for (k, v) in map {
                    entries.push((yaml_key(k)?, ConfigValue::try_from(v)?));
                }
                ConfigValue::Mapping(entries)
            }
            serde_yaml::Value::Tagged(tagged) => ConfigValue::try_from(tagged.value)?,
        })
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String, DomainError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        serde_yaml::Value::Null => Err(DomainError::UnsupportedKey("null".to_string())),
        serde_yaml::Value::Sequence(_) => {
            Err(DomainError::UnsupportedKey("a sequence".to_string()))
        }
        serde_yaml::Value::Mapping(_) => Err(DomainError::UnsupportedKey("a mapping".to_string())),
    }
}

impl From<Vec<IniSection>> for ConfigValue {
    fn from(sections: Vec<IniSection>) -> Self {
        ConfigValue::Mapping(
            sections
                .into_iter()
                .map(|section| {
                    let entries = section
                        .entries
                        .into_iter()
                        .map(|(k, v)| (k, ConfigValue::String(v)))
                        .collect();
                    (section.name, ConfigValue::Mapping(entries))
                })
                .collect(),
        )
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ConfigValue::Null => serializer.serialize_unit(),
            ConfigValue::Bool(b) => serializer.serialize_bool(*b),
            ConfigValue::Integer(i) => {
                if let Ok(small) = i64::try_from(*i) {
                    serializer.serialize_i64(small)
                } else if let Ok(big) = u64::try_from(*i) {
                    serializer.serialize_u64(big)
                } else {
                    serializer.serialize_i128(*i)
                }
            }
            ConfigValue::Float(f) => serializer.serialize_f64(*f),
            ConfigValue::String(s) => serializer.serialize_str(s),
            ConfigValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            ConfigValue::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}
