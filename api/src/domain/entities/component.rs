//! Component schema entities
//!
//! Storyblok owns the component object format. The API passes component JSON
//! through untouched; these types are a read-only view used for previews.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Helper to deserialize null as default (empty vec, false, etc.)
fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Storyblok field types as they appear in a component schema's `type` key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Textarea,
    Richtext,
    Markdown,
    Number,
    Datetime,
    Boolean,
    Option,
    Options,
    Asset,
    Multiasset,
    Multilink,
    Bloks,
    Table,
    Section,
    Custom,
    /// Deprecated or unknown types, kept verbatim
    Other(String),
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        match s {
            "text" => FieldType::Text,
            "textarea" => FieldType::Textarea,
            "richtext" => FieldType::Richtext,
            "markdown" => FieldType::Markdown,
            "number" => FieldType::Number,
            "datetime" => FieldType::Datetime,
            "boolean" => FieldType::Boolean,
            "option" => FieldType::Option,
            "options" => FieldType::Options,
            "asset" => FieldType::Asset,
            "multiasset" => FieldType::Multiasset,
            "multilink" => FieldType::Multilink,
            "bloks" => FieldType::Bloks,
            "table" => FieldType::Table,
            "section" => FieldType::Section,
            "custom" => FieldType::Custom,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Richtext => "richtext",
            FieldType::Markdown => "markdown",
            FieldType::Number => "number",
            FieldType::Datetime => "datetime",
            FieldType::Boolean => "boolean",
            FieldType::Option => "option",
            FieldType::Options => "options",
            FieldType::Asset => "asset",
            FieldType::Multiasset => "multiasset",
            FieldType::Multilink => "multilink",
            FieldType::Bloks => "bloks",
            FieldType::Table => "table",
            FieldType::Section => "section",
            FieldType::Custom => "custom",
            FieldType::Other(name) => name,
        };
        write!(f, "{}", name)
    }
}

impl Serialize for FieldType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One entry of an `option`/`options` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: Value,
}

impl FieldOption {
    /// Option value as text; Storyblok allows strings and numbers here
    pub fn value_text(&self) -> String {
        value_text(&self.value)
    }
}

/// Field definition inside a component `schema` map
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldDefinition {
    #[serde(rename = "type", default, deserialize_with = "deserialize_null_default")]
    pub type_name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub default_value: Option<Value>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub options: Vec<FieldOption>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
}

impl FieldDefinition {
    pub fn field_type(&self) -> FieldType {
        FieldType::from(self.type_name.as_str())
    }

    /// Editor label: display name when set, else the schema key
    pub fn label(&self, key: &str) -> String {
        match self.display_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => key.to_string(),
        }
    }
}

/// Render a JSON scalar the way an editor would type it
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
