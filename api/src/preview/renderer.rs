//! Preview renderer
//!
//! Renders component previews to Markdown for chat clients and terminals.

use super::builder::{ComponentPreview, FieldPreview, Widget};

/// Render a component preview to markdown format
pub fn render_preview(preview: &ComponentPreview) -> String {
    let mut buf = String::new();

    let title = preview
        .display_name
        .as_deref()
        .or(preview.name.as_deref())
        .unwrap_or("Component");
    buf.push_str(&format!("# Preview: {}\n\n", title));

    if let Some(name) = &preview.name {
        buf.push_str(&format!("Technical name: `{}`\n\n", name));
    }

    if preview.fields.is_empty() {
        buf.push_str("_This component has no fields._\n");
        return buf;
    }

    buf.push_str("## Fields\n\n");
    for field in &preview.fields {
        buf.push_str(&render_field(field));
        buf.push('\n');
    }

    buf
}

fn render_field(field: &FieldPreview) -> String {
    let required = if field.required { " *(required)*" } else { "" };
    let mut line = format!(
        "- **{}**{} `{}` ({}): {}",
        field.label,
        required,
        field.key,
        field.field_type,
        render_widget(&field.widget)
    );

    if let Some(description) = &field.description {
        line.push_str(&format!("\n  > {}", description));
    }

    line
}

fn render_widget(widget: &Widget) -> String {
    match widget {
        Widget::TextInput { placeholder: None } => "[ text input ]".to_string(),
        Widget::TextInput {
            placeholder: Some(p),
        } => format!("[ {} ]", p),
        Widget::TextArea { rows, placeholder } => match placeholder {
            Some(p) => format!("[ {}-line editor: {} ]", rows, p),
            None => format!("[ {}-line text area ]", rows),
        },
        Widget::NumberInput => "[ number ]".to_string(),
        Widget::DatetimeInput => "[ date and time ]".to_string(),
        Widget::Switch { checked } => {
            if *checked {
                "[x] on".to_string()
            } else {
                "[ ] off".to_string()
            }
        }
        Widget::Select {
            multiple,
            options,
            selected,
        } => {
            let kind = if *multiple { "multi-select" } else { "select" };
            if options.is_empty() {
                return format!("[ {}: no options ]", kind);
            }
            let choices: Vec<String> = options
                .iter()
                .map(|o| {
                    let value = o.value_text();
                    if selected.contains(&value) {
                        format!("**{}**", o.name)
                    } else {
                        o.name.clone()
                    }
                })
                .collect();
            format!("[ {}: {} ]", kind, choices.join(" | "))
        }
        Widget::Button { caption } => format!("<button> {}", caption),
        Widget::Panel { caption } => format!("[ {} ]", caption),
    }
}
