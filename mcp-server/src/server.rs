//! BlokPilot MCP Server implementation
//!
//! Editor tools for drafting Storyblok components and stories. Publishing
//! tools use the access token and space id saved with `save_settings`.

use crate::client::ProxyClient;
use crate::settings::{Settings, SettingsStore};
use anyhow::Result;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{
    handler::server::tool::ToolRouter,
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

/// BlokPilot MCP Server
#[derive(Clone)]
pub struct BlokPilotServer {
    client: ProxyClient,
    settings: SettingsStore,
    tool_router: ToolRouter<Self>,
}

impl BlokPilotServer {
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(ProxyClient::from_env()?, SettingsStore::from_env()))
    }

    pub fn new(client: ProxyClient, settings: SettingsStore) -> Self {
        Self {
            client,
            settings,
            tool_router: Self::tool_router(),
        }
    }

    fn load_settings(&self) -> Result<Settings, String> {
        self.settings.load().map_err(|e| e.to_string())
    }
}

// --- Tool Parameter Types ---

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SaveSettingsParams {
    /// Storyblok personal access token. Pass an empty string to clear it.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Storyblok space id. Pass an empty string to clear it.
    #[serde(default)]
    pub space_id: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateComponentParams {
    /// What the component should contain, e.g. "a hero banner with headline, image and CTA"
    pub prompt: String,
    /// Gemini model to use instead of the server default
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ComponentParams {
    /// Component JSON, either `{"component": {...}}` or the component object itself
    pub component_json: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GenerateStoryParams {
    /// What the story should be about
    pub story_prompt: String,
    /// JSON array of components to use. Omit to use every component in the space.
    #[serde(default)]
    pub components_json: Option<String>,
    /// Gemini model to use instead of the server default
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct StoryParams {
    /// Story JSON, usually `{"story": {...}}` as returned by generate_story
    pub story_json: String,
    /// Gemini model to use instead of the server default (reports only)
    #[serde(default)]
    pub model: Option<String>,
}

fn success(text: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(text.into())]))
}

fn failure(text: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(text.into())]))
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Parse a JSON tool argument; `what` names it in the error
fn parse_json_arg(what: &str, raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|_| format!("{} is not valid JSON.", what))
}

/// Name, display name and field count of each component, one per line
fn summarize_components(components: &[Value]) -> String {
    if components.is_empty() {
        return "_No components in this space._".to_string();
    }

    components
        .iter()
        .map(|c| {
            let name = c.get("name").and_then(Value::as_str).unwrap_or("<unnamed>");
            let fields = c
                .get("schema")
                .and_then(Value::as_object)
                .map(|s| s.len())
                .unwrap_or(0);
            match c.get("display_name").and_then(Value::as_str) {
                Some(display) if !display.is_empty() => {
                    format!("- **{}** `{}` ({} fields)", display, name, fields)
                }
                _ => format!("- `{}` ({} fields)", name, fields),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[tool_router]
impl BlokPilotServer {
    // === Settings ===

    #[tool(description = "Show the saved Storyblok space id and (masked) access token.")]
    async fn show_settings(&self) -> Result<CallToolResult, McpError> {
        let settings = match self.load_settings() {
            Ok(settings) => settings,
            Err(e) => return failure(e),
        };

        success(format!(
            "Settings file: {}\nSpace ID: {}\nAccess token: {}",
            self.settings.path().display(),
            settings.space_id.as_deref().unwrap_or("(not set)"),
            settings.masked_token().as_deref().unwrap_or("(not set)"),
        ))
    }

    #[tool(
        description = "Save the Storyblok personal access token and/or space id used for publishing. Omitted values are kept."
    )]
    async fn save_settings(
        &self,
        params: Parameters<SaveSettingsParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut settings = match self.load_settings() {
            Ok(settings) => settings,
            Err(e) => return failure(e),
        };
        settings.merge(params.0.access_token, params.0.space_id);

        match self.settings.save(&settings) {
            Ok(()) => success("Settings saved successfully!"),
            Err(e) => failure(e.to_string()),
        }
    }

    // === Components ===

    #[tool(
        description = "Generate a Storyblok component schema from a description. Returns JSON to preview or publish."
    )]
    async fn generate_component(
        &self,
        params: Parameters<GenerateComponentParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .client
            .generate_component(&params.0.prompt, params.0.model.as_deref())
            .await
        {
            Ok(component) => success(pretty(&component)),
            Err(e) => failure(e.to_string()),
        }
    }

    #[tool(description = "Preview the editor form a component schema produces, as Markdown.")]
    async fn preview_component(
        &self,
        params: Parameters<ComponentParams>,
    ) -> Result<CallToolResult, McpError> {
        let component = match parse_json_arg("Component JSON", &params.0.component_json) {
            Ok(component) => component,
            Err(e) => return failure(e),
        };

        match self.client.preview_component(&component).await {
            Ok(markdown) => success(markdown),
            Err(e) => failure(e.to_string()),
        }
    }

    #[tool(description = "Create a component in the configured Storyblok space.")]
    async fn publish_component(
        &self,
        params: Parameters<ComponentParams>,
    ) -> Result<CallToolResult, McpError> {
        let component = match parse_json_arg("Component JSON", &params.0.component_json) {
            Ok(component) => component,
            Err(e) => return failure(e),
        };
        let settings = match self.load_settings() {
            Ok(settings) => settings,
            Err(e) => return failure(e),
        };

        match self.client.create_component(&component, &settings).await {
            Ok(response) => success(pretty(&response)),
            Err(e) => failure(e.to_string()),
        }
    }

    #[tool(description = "List the components defined in the configured Storyblok space.")]
    async fn list_components(&self) -> Result<CallToolResult, McpError> {
        let settings = match self.load_settings() {
            Ok(settings) => settings,
            Err(e) => return failure(e),
        };

        match self.client.list_components(&settings).await {
            Ok(components) => success(summarize_components(&components)),
            Err(e) => failure(e.to_string()),
        }
    }

    // === Stories ===

    #[tool(
        description = "Generate story content from a prompt using the space's components (or the given ones). Returns JSON to review or publish."
    )]
    async fn generate_story(
        &self,
        params: Parameters<GenerateStoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let components = match params.0.components_json.as_deref() {
            Some(raw) => match parse_json_arg("Components JSON", raw) {
                Ok(Value::Array(items)) => items,
                Ok(_) => return failure("Components JSON must be an array."),
                Err(e) => return failure(e),
            },
            None => {
                let settings = match self.load_settings() {
                    Ok(settings) => settings,
                    Err(e) => return failure(e),
                };
                match self.client.list_components(&settings).await {
                    Ok(components) => components,
                    Err(e) => return failure(e.to_string()),
                }
            }
        };

        tracing::debug!(components = components.len(), "Generating story");

        match self
            .client
            .generate_story(
                &params.0.story_prompt,
                &components,
                params.0.model.as_deref(),
            )
            .await
        {
            Ok(story) => success(pretty(&story)),
            Err(e) => failure(e.to_string()),
        }
    }

    #[tool(description = "Publish story JSON to the configured Storyblok space.")]
    async fn publish_story(
        &self,
        params: Parameters<StoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let story = match parse_json_arg("Story JSON", &params.0.story_json) {
            Ok(story) => story,
            Err(e) => return failure(e),
        };
        let settings = match self.load_settings() {
            Ok(settings) => settings,
            Err(e) => return failure(e),
        };

        match self.client.publish_story(&story, &settings).await {
            Ok(response) => success(pretty(&response)),
            Err(e) => failure(e.to_string()),
        }
    }

    #[tool(description = "Review story content for accessibility and content quality. Returns a Markdown report.")]
    async fn accessibility_report(
        &self,
        params: Parameters<StoryParams>,
    ) -> Result<CallToolResult, McpError> {
        // Plain text is reviewed as-is
        let story = parse_json_arg("Story JSON", &params.0.story_json)
            .unwrap_or_else(|_| Value::String(params.0.story_json.clone()));

        match self
            .client
            .accessibility_report(&story, params.0.model.as_deref())
            .await
        {
            Ok(report) => success(report),
            Err(e) => failure(e.to_string()),
        }
    }
}

#[tool_handler]
impl ServerHandler for BlokPilotServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "blokpilot".into(),
                title: Some("BlokPilot MCP Server".into()),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                r#"BlokPilot - AI content modeling for Storyblok

SETUP: call 'save_settings' with your Storyblok personal access token and space id.

COMPONENTS:
1. 'generate_component' - Describe a component, get its schema as JSON
2. 'preview_component' - See the editor form the schema produces
3. 'publish_component' - Create it in your space
4. 'list_components' - See what the space already has

STORIES:
1. 'generate_story' - Describe a page; uses your space's components
2. 'accessibility_report' - Review the draft for accessibility issues
3. 'publish_story' - Create the story in your space"#
                    .into(),
            ),
        }
    }
}
