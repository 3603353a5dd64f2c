//! Prompt templates for Gemini
//!
//! Placeholders are written as `{name}` and filled in a single pass, so user
//! text that happens to contain a placeholder name is never expanded.

use std::sync::OnceLock;

use regex::{Captures, Regex};

pub const COMPONENT_PROMPT: &str = r#"You are an assistant that designs components for the Storyblok headless CMS.
The Storyblok documentation you need is inside the <documentation> tags.
The editor's request is inside the <input> tags.
Answer with the JSON request body for the Management API "create component" call, inside <output> tags.

<documentation>
# Storyblok fields

Every field (except `section`) supports these generic options:
- `required` (boolean): saving is blocked while the field is empty.
- `display_name` (string): label shown in the Visual Editor.
- `description` (string): help text shown under the field.
- `tooltip` (boolean): show the description as a tooltip instead.
- `translatable` (boolean): allow field-level translation (not for `bloks` or `section`).
- `default_value` (string): initial value (not for `asset`, `multiasset`, `multilink`, `table`, `section`, `custom`).
- `pos` (number): order of the field in the editor.

Field types accepted by the Management API (`type` key of each schema entry):

| type         | editor input |
|--------------|--------------|
| `text`       | single-line text; `max_length`, `regex`, `rtl` |
| `textarea`   | multi-line plain text; `max_length`, `regex`, `rtl` |
| `richtext`   | rich text stored as JSON; `max_length`, `customize_toolbar`, `restrict_components`, `component_whitelist` |
| `markdown`   | Markdown text; `rich_markdown`, `allow_multiline`, `max_length`, `rtl` |
| `number`     | number; `min_value`, `max_value`, `decimals`, `steps` |
| `datetime`   | ISO 8601 date and time (`YYYY-MM-DD HH:MM`); `disable_time` |
| `boolean`    | true/false toggle, defaults to false; `inline_label` |
| `option`     | single choice from `options` (array of `{"name", "value"}`); `source`, `exclude_empty_option` |
| `options`    | multiple choices from `options`; `min_options`, `max_options`; default is an array |
| `asset`      | one asset; `filetypes` (`images`, `videos`, `audios`, `texts`), `allow_external_url`, `asset_folder_id` |
| `multiasset` | several assets; same options as `asset` |
| `multilink`  | link to a story, URL, email or asset; `email_link_type`, `asset_link_type`, `show_anchor`, `allow_target_blank`, `restrict_content_types`, `component_whitelist` |
| `bloks`      | nested components; `minimum`, `maximum`, `restrict_components`, `component_whitelist` |
| `table`      | simple table, returned as `thead` and `tbody` |
| `section`    | editor-only group of other fields listed in `keys`; no API value |
| `custom`     | field plugin; `field_type` names the plugin |

`image` and `file` are deprecated; never use them.

# Storyblok component object

- `name` (string, required): technical name used in story content.
- `display_name` (string): name shown in the editor.
- `schema` (object): map of field key to field definition, as described above.
- `is_root` (boolean): true when the component is a content type.
- `is_nestable` (boolean): true when the component can be inserted into `bloks` fields.
- `preview_field` (string): field shown as the block's preview.
- `icon`, `color` (string): editor icon and its color.
- `component_group_uuid` (string): folder the component belongs to.
- `internal_tag_ids` (string[]): tag ids assigned to the component.

# Create a component

`POST https://mapi.storyblok.com/v1/spaces/:space_id/components/`

The request body is `{"component": { ...component object... }}`.
</documentation>

<input>
{user_prompt}
</input>

Rules:
- The component is nestable (`"is_nestable": true`) and not a content type (`"is_root": false`).
- `name` is snake_case.
- Choose field types and options that fit the request; give every field a `display_name` and a `pos`.
- Output only the JSON request body, properly formatted, inside the tags below.

<output>
</output>
"#;

pub const STORY_PROMPT: &str = r#"You are an assistant that writes story content for the Storyblok headless CMS.
The editor's request is inside the <user_prompt> tags.
The components that exist in the space, with their schemas, are inside the <available_components> tags.

<user_prompt>
{story_prompt}
</user_prompt>

<available_components>
{available_components}
</available_components>

Think through what content the request calls for, then write a Management API "create story" payload.

Payload rules:
- The top-level object has a single `story` key.
- `story.name` (string, required): display name derived from the request.
- `story.slug` (string, required): URL-friendly, lowercase, hyphen separated.
- `story.parent_id` (number, optional): parent folder id, 0 for the root.
- `story.is_folder` (boolean, optional): false for a story.
- `story.content` (object, required): the root block. It has a `component` key naming a content type (for example `page`) and an array field (for example `body`) holding nested blocks.
- Every block, the root included, has a `_uid` and a `component` key, plus fields from that component's schema.
- Use only the components listed above, and only the fields their schemas define.
- Fill `text`, `textarea`, `markdown` and `richtext` fields with real content based on the request.
- Use placeholders for `asset` fields (`https://example.com/placeholder.jpg`) and `multilink` fields (`/blog/my-story`).

Example shape:
```json
{
  "story": {
    "name": "Generated story",
    "slug": "generated-story",
    "parent_id": 0,
    "is_folder": false,
    "content": {
      "_uid": "root-uid",
      "component": "page",
      "body": [
        { "_uid": "block-1", "component": "hero", "headline": "..." }
      ]
    }
  }
}
```

Output only the JSON payload, properly formatted, inside the tags below. No explanation outside the JSON.

<output>
</output>
"#;

pub const ACCESSIBILITY_PROMPT: &str = r#"You are an expert in web accessibility, inclusive writing and content quality.
The input is a Storyblok story exported as JSON, inside the <input> tags.

Parse it to find headings, body text, links, images and metadata, then write a friendly, actionable accessibility report for content editors.

Score the content from 0 to 100:
- Headings and structure (20 points): logical hierarchy (h1, h2, h3), no skipped levels.
- Images and alt text (15 points): every image and icon has descriptive alt text.
- Links and buttons (15 points): link and button text makes sense out of context.
- Readability and language (20 points): clear, concise sentences for a general audience, little jargon.
- Inclusive language (10 points): neutral, unbiased, gender-inclusive wording.
- SEO and metadata (10 points): meta title and description present, human-readable slug.
- Content completeness (10 points): informative content, no placeholders.

The report must contain:
1. The overall accessibility score.
2. A short summary of strengths and weaknesses.
3. Findings per category, each with its score.
4. Prioritized recommendations with concrete examples.

Keep the tone encouraging and concise. Write the report in Markdown with clear headings, inside <output> tags.

<input>
{story_content}
</input>

<output>
</output>
"#;

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"))
}

/// Fill `{name}` placeholders in one pass; unknown names are left untouched
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    placeholder()
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            values
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

pub fn component_prompt(user_prompt: &str) -> String {
    fill(COMPONENT_PROMPT, &[("user_prompt", user_prompt)])
}

pub fn story_prompt(story_prompt: &str, available_components: &str) -> String {
    fill(
        STORY_PROMPT,
        &[
            ("story_prompt", story_prompt),
            ("available_components", available_components),
        ],
    )
}

pub fn accessibility_prompt(story_content: &str) -> String {
    fill(ACCESSIBILITY_PROMPT, &[("story_content", story_content)])
}
