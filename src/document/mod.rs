//! Source and target document model
//!
//! Configuration files are exactly two levels deep: a root holding named
//! sections, each holding named settings. Both documents keep source order.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;

/// Where a setting was declared in the XML source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingOrigin {
    /// `<Section Name="value"/>`
    Attribute,
    /// `<Section><Name>value</Name></Section>`
    Element,
}

/// A raw name/value pair read from the source
#[derive(Debug, Clone, PartialEq)]
pub struct Setting {
    pub name: String,
    pub value: String,
    pub origin: SettingOrigin,
}

/// A named group of settings directly under the `config` root
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub settings: Vec<Setting>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            settings: Vec::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Parsed XML configuration: every leaf value is still a string
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    pub sections: Vec<Section>,
}

impl SourceDocument {
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    /// Total number of settings across all sections
    pub fn setting_count(&self) -> usize {
        self.sections.iter().map(|s| s.settings.len()).sum()
    }
}

/// A scalar with an inferred type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TypedValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl TypedValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            TypedValue::Boolean(_) => ValueKind::Boolean,
            TypedValue::Integer(_) => ValueKind::Integer,
            TypedValue::Float(_) => ValueKind::Float,
            TypedValue::String(_) => ValueKind::String,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            TypedValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<TypedValue> for toml::Value {
    fn from(value: TypedValue) -> Self {
        match value {
            TypedValue::Boolean(b) => toml::Value::Boolean(b),
            TypedValue::Integer(i) => toml::Value::Integer(i),
            TypedValue::Float(f) => toml::Value::Float(f),
            TypedValue::String(s) => toml::Value::String(s),
        }
    }
}

/// Type tag of a [`TypedValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Boolean,
    Integer,
    Float,
    String,
}

impl ValueKind {
    /// Kind of a parsed TOML value, `None` for tables, arrays and datetimes
    pub fn of_toml(value: &toml::Value) -> Option<Self> {
        match value {
            toml::Value::Boolean(_) => Some(ValueKind::Boolean),
            toml::Value::Integer(_) => Some(ValueKind::Integer),
            toml::Value::Float(_) => Some(ValueKind::Float),
            toml::Value::String(_) => Some(ValueKind::String),
            _ => None,
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
        };
        f.write_str(name)
    }
}

/// A setting after key normalization and type inference
#[derive(Debug, Clone, PartialEq)]
pub struct TargetSetting {
    pub key: String,
    pub value: TypedValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetSection {
    pub key: String,
    pub settings: Vec<TargetSetting>,
}

impl TargetSection {
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.settings
            .iter()
            .find(|s| s.key == key)
            .map(|s| &s.value)
    }
}

impl Serialize for TargetSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.settings.len()))?;
        for setting in &self.settings {
            map.serialize_entry(&setting.key, &setting.value)?;
        }
        map.end()
    }
}

/// Normalized, typed document ready to be written as TOML
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TargetDocument {
    pub sections: Vec<TargetSection>,
}

impl TargetDocument {
    pub fn section(&self, key: &str) -> Option<&TargetSection> {
        self.sections.iter().find(|s| s.key == key)
    }

    pub fn setting_count(&self) -> usize {
        self.sections.iter().map(|s| s.settings.len()).sum()
    }
}

impl Serialize for TargetDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.key, section)?;
        }
        map.end()
    }
}
