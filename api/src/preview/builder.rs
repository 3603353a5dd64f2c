//! Preview builder
//!
//! Turns a component schema into a read-only description of the editor form
//! Storyblok would show for it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::entities::{value_text, FieldDefinition, FieldOption, FieldType};
use crate::error::AppError;

/// Editor form for one component
#[derive(Debug, Clone, Serialize)]
pub struct ComponentPreview {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub fields: Vec<FieldPreview>,
}

/// One disabled form control
#[derive(Debug, Clone, Serialize)]
pub struct FieldPreview {
    pub key: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub widget: Widget,
}

/// The control a field type is shown as
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum Widget {
    TextInput {
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    TextArea {
        rows: u8,
        #[serde(skip_serializing_if = "Option::is_none")]
        placeholder: Option<String>,
    },
    NumberInput,
    DatetimeInput,
    Switch {
        checked: bool,
    },
    Select {
        multiple: bool,
        options: Vec<FieldOption>,
        selected: Vec<String>,
    },
    Button {
        caption: String,
    },
    Panel {
        caption: String,
    },
}

/// Build a preview from `{"component": {...}}`, a component object, or a bare schema map
pub fn build_preview(value: &Value) -> Result<ComponentPreview, AppError> {
    let component = match value.get("component") {
        Some(inner @ Value::Object(_)) => inner,
        _ => value,
    };

    let (schema, name, display_name) = match component.get("schema") {
        Some(Value::Object(schema)) => (
            schema,
            string_field(component, "name"),
            string_field(component, "display_name"),
        ),
        _ => match component {
            Value::Object(map) if looks_like_schema(map) => (map, None, None),
            _ => {
                return Err(AppError::BadRequest(
                    "Component schema is required.".to_string(),
                ))
            }
        },
    };

    let fields = schema
        .iter()
        .filter(|(key, _)| !key.starts_with('_'))
        .filter_map(|(key, raw)| match serde_json::from_value::<FieldDefinition>(raw.clone()) {
            Ok(field) if raw.is_object() => Some(field_preview(key, &field)),
            _ => {
                tracing::debug!(key = %key, "Skipping malformed schema entry");
                None
            }
        })
        .collect();

    Ok(ComponentPreview {
        name,
        display_name,
        fields,
    })
}

fn field_preview(key: &str, field: &FieldDefinition) -> FieldPreview {
    let label = field.label(key);
    let field_type = field.field_type();

    let (label, widget) = match &field_type {
        FieldType::Text => (label, Widget::TextInput { placeholder: None }),
        FieldType::Textarea => (
            label,
            Widget::TextArea {
                rows: 3,
                placeholder: None,
            },
        ),
        FieldType::Number => (label, Widget::NumberInput),
        FieldType::Boolean => {
            let checked = matches!(
                &field.default_value,
                Some(Value::Bool(true))
            ) || matches!(&field.default_value, Some(Value::String(s)) if s == "true");
            (label, Widget::Switch { checked })
        }
        FieldType::Option => {
            let selected = field
                .default_value
                .as_ref()
                .map(value_text)
                .filter(|v| !v.is_empty())
                .into_iter()
                .collect();
            (
                label,
                Widget::Select {
                    multiple: false,
                    options: field.options.clone(),
                    selected,
                },
            )
        }
        FieldType::Options => {
            let selected = match &field.default_value {
                Some(Value::Array(items)) => items.iter().map(value_text).collect(),
                _ => Vec::new(),
            };
            (
                label,
                Widget::Select {
                    multiple: true,
                    options: field.options.clone(),
                    selected,
                },
            )
        }
        FieldType::Asset | FieldType::Multiasset => {
            let caption = format!("{} (Select Asset)", label);
            (label, Widget::Button { caption })
        }
        FieldType::Multilink => {
            let caption = format!("{} (Add Link)", label);
            (label, Widget::Button { caption })
        }
        FieldType::Richtext | FieldType::Markdown => (
            format!("{} Editor", label),
            Widget::TextArea {
                rows: 5,
                placeholder: Some(format!("Enter {} content...", label)),
            },
        ),
        FieldType::Datetime => (label, Widget::DatetimeInput),
        FieldType::Bloks => {
            let caption = format!("{} (Nested Blocks)", label);
            (label, Widget::Panel { caption })
        }
        FieldType::Table => {
            let caption = format!("{} (Table Editor)", label);
            (label, Widget::Panel { caption })
        }
        FieldType::Section => {
            let caption = format!("{} (Group)", label);
            (label, Widget::Panel { caption })
        }
        FieldType::Custom => {
            let placeholder = Some(format!("Custom Plugin: {}", label));
            (label, Widget::TextInput { placeholder })
        }
        FieldType::Other(name) => {
            let placeholder = Some(format!("Unsupported Type: {}", name));
            (label, Widget::TextInput { placeholder })
        }
    };

    FieldPreview {
        key: key.to_string(),
        label,
        field_type,
        required: field.required,
        description: field.description.clone().filter(|d| !d.trim().is_empty()),
        widget,
    }
}

/// A bare schema maps field keys to objects carrying a `type`
fn looks_like_schema(map: &Map<String, Value>) -> bool {
    !map.is_empty()
        && map
            .values()
            .all(|v| v.get("type").map(Value::is_string).unwrap_or(false))
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
