//! CLI module for Metis
//!
//! Provides the user-facing commands:
//! - `chat`: interactive chat session
//! - `ask`: single question, single answer
//! - `tools`: list available built-in tools
//! - `mcp-example`: write an example MCP configuration file

use anyhow::Context;
use clap::{Parser, Subcommand};
use crossterm::style::Stylize;
use metis_core::{Agent, AgentConfig};
use metis_llm::{OpenAiConfig, OpenAiProvider};
use metis_tools::{register_builtins, register_provider, McpIntegration, ToolRegistry};
use std::path::PathBuf;
use std::sync::Arc;

pub mod chat;

/// Metis chat agent CLI
#[derive(Parser, Debug)]
#[command(name = "metis")]
#[command(about = "Tool-calling chat agent for the terminal")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session
    Chat(ChatArgs),
    /// Ask a single question and get a response
    Ask(AskArgs),
    /// List available built-in tools
    Tools,
    /// Create an example MCP configuration file
    McpExample {
        /// Output path
        #[arg(short, long, default_value = "./mcp-config.json")]
        output: PathBuf,
    },
}

/// Arguments for the `chat` command
#[derive(clap::Args, Debug)]
pub struct ChatArgs {
    /// Model to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// Temperature for generation
    #[arg(short, long)]
    pub temperature: Option<f32>,

    /// Custom system prompt
    #[arg(short, long)]
    pub system: Option<String>,

    /// Disable built-in tools
    #[arg(long)]
    pub no_tools: bool,

    /// Path to an MCP configuration file or directory
    #[arg(long)]
    pub mcp_config: Option<PathBuf>,
}

/// Arguments for the `ask` command
#[derive(clap::Args, Debug)]
pub struct AskArgs {
    /// The question to ask
    pub question: String,

    /// Model to use
    #[arg(short, long)]
    pub model: Option<String>,

    /// Disable built-in tools
    #[arg(long)]
    pub no_tools: bool,
}

/// Run the CLI command
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Chat(args)) => chat::run(args).await,
        Some(Commands::Ask(args)) => ask(args).await,
        Some(Commands::Tools) => list_tools(),
        Some(Commands::McpExample { output }) => {
            McpIntegration::write_example_config(&output)
                .with_context(|| format!("writing {}", output.display()))?;
            println!("{} {}", "✓".green(), format!("Example config written to {}", output.display()));
            Ok(())
        }
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

/// Build an agent from environment configuration plus CLI overrides.
///
/// Fails (and the process exits non-zero) when `OPENAI_API_KEY` is missing.
pub(crate) fn build_agent(
    model: Option<String>,
    temperature: Option<f32>,
    system: Option<String>,
    use_tools: bool,
    mcp_config: Option<&PathBuf>,
) -> anyhow::Result<Agent> {
    let provider_config = OpenAiConfig::from_env()
        .context("set OPENAI_API_KEY (environment or .env) to talk to the model")?;
    let provider = Arc::new(OpenAiProvider::new(provider_config)?);

    let mut registry = ToolRegistry::new();
    if use_tools {
        register_builtins(&mut registry)?;
    }

    if let Some(path) = mcp_config {
        let mut mcp = McpIntegration::new();
        if path.is_dir() {
            let loaded = mcp
                .load_config_dir(path)
                .with_context(|| format!("loading MCP configs from {}", path.display()))?;
            println!("{}", format!("Loaded {loaded} MCP config(s)").dark_grey());
        } else {
            mcp.load_config(path)
                .with_context(|| format!("loading MCP config {}", path.display()))?;
        }
        let bridged = register_provider(&mut registry, Arc::new(mcp))?;
        if bridged > 0 {
            println!("{}", format!("Registered {bridged} MCP tool(s)").dark_grey());
        }
    }

    let mut config = AgentConfig::from_env();
    if let Some(model) = model {
        config.model = model;
    }
    if let Some(temperature) = temperature {
        config.temperature = temperature;
    }
    if let Some(system) = system {
        config.system_prompt = system;
    }

    Ok(Agent::new(provider, Arc::new(registry), config))
}

async fn ask(args: AskArgs) -> anyhow::Result<()> {
    let mut agent = build_agent(args.model, None, None, !args.no_tools, None)?;

    let answer = agent.send(args.question).await?;
    println!("\n{} {}\n", "Assistant:".green().bold(), answer);
    Ok(())
}

fn list_tools() -> anyhow::Result<()> {
    let mut registry = ToolRegistry::new();
    register_builtins(&mut registry)?;

    println!("\n{}\n", "Available built-in tools:".blue().bold());

    let mut definitions = registry.list_definitions();
    definitions.sort_by(|a, b| a.name.cmp(&b.name));
    for def in definitions {
        println!(
            "  {} {}",
            def.name.as_str().cyan(),
            format!("- {}", def.description).dark_grey()
        );
    }
    println!();
    Ok(())
}
