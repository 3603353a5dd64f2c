//! Test fixtures
//!
//! Sample Storyblok payloads and model replies with sensible defaults.

use serde_json::{json, Value};

/// Create-component request body for a hero banner
pub fn hero_component() -> Value {
    json!({
        "component": {
            "name": "hero_banner",
            "display_name": "Hero Banner",
            "is_root": false,
            "is_nestable": true,
            "schema": {
                "headline": {
                    "type": "text",
                    "display_name": "Headline",
                    "required": true
                },
                "subheadline": {
                    "type": "textarea",
                    "display_name": "Subheadline"
                },
                "background_image": {
                    "type": "asset",
                    "display_name": "Background Image",
                    "filetypes": ["images"]
                },
                "cta_link": {
                    "type": "multilink",
                    "display_name": "Call to Action"
                }
            }
        }
    })
}

/// Story payload using the hero banner
pub fn sample_story() -> Value {
    json!({
        "story": {
            "name": "Spring Launch",
            "slug": "spring-launch",
            "content": {
                "component": "page",
                "body": [
                    {
                        "component": "hero_banner",
                        "headline": "Spring is here",
                        "subheadline": "New arrivals every week"
                    }
                ]
            }
        }
    })
}

/// Wrap a JSON value the way the model is asked to reply
pub fn tagged_output(value: &Value) -> String {
    format!(
        "Here is the result.\n<output>\n{}\n</output>",
        serde_json::to_string_pretty(value).unwrap()
    )
}
