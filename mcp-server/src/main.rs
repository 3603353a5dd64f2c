//! BlokPilot MCP Server
//!
//! This MCP server is the editor front end for the BlokPilot API.
//! It keeps the Storyblok token and space id in a local settings file and
//! exposes tools for:
//! - Generating, previewing and publishing components
//! - Generating and publishing stories
//! - Accessibility reports on story content

mod client;
mod server;
mod settings;

use anyhow::Result;
use rmcp::ServiceExt;
use server::BlokPilotServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging to stderr (stdout is used for MCP protocol)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting BlokPilot MCP server");

    let server = BlokPilotServer::from_env()?;

    // Serve over stdio - pass as tuple (stdin, stdout)
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;

    // Wait for shutdown
    service.waiting().await?;

    Ok(())
}
