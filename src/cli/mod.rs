// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::api::{start_server, AppState};
use crate::config::AppConfig;
use crate::dialogue::PersonaTemplate;
use crate::pipeline::{build_pipeline, list_artworks, ChatQuery};

/// Arti, the conversational assistant of the MAC Lima
#[derive(Parser, Debug)]
#[command(name = "mac-arti")]
#[command(version)]
#[command(about = "Retrieval-augmented chat over the MAC permanent collection", long_about = None)]
pub struct Cli {
    /// JSON knowledge base snapshot (built-in catalog when omitted)
    #[arg(long, global = true, env = "KNOWLEDGE_BASE_PATH")]
    pub knowledge_base: Option<PathBuf>,

    /// Persona template: archivist, guide or concierge
    #[arg(long, global = true, env = "ARTI_PERSONA")]
    pub persona: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve(ServeArgs),

    /// Answer one question and print the JSON reply
    Ask(AskArgs),

    /// List indexed artworks
    Obras(ObrasArgs),
}

#[derive(Args, Debug, Default)]
pub struct ServeArgs {
    #[arg(long, env = "API_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "API_PORT")]
    pub port: Option<u16>,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    pub message: String,

    #[arg(long)]
    pub zona: Option<String>,

    #[arg(long)]
    pub max_results: Option<usize>,
}

#[derive(Args, Debug)]
pub struct ObrasArgs {
    #[arg(long)]
    pub zona: Option<String>,
}

impl Cli {
    /// Environment configuration with command-line overrides applied
    pub fn config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::from_env();
        if let Some(path) = &self.knowledge_base {
            config.knowledge_base_path = Some(path.clone());
        }
        if let Some(name) = &self.persona {
            config.dialogue.persona = PersonaTemplate::from_str(name)
                .with_context(|| format!("Unknown persona '{}'", name))?;
        }
        if let Some(Commands::Serve(args)) = &self.command {
            if let Some(host) = &args.host {
                config.server.host = host.clone();
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
        }
        Ok(config)
    }
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let config = cli.config()?;
    let pipeline = build_pipeline(&config).await?;

    match cli.command {
        None | Some(Commands::Serve(_)) => {
            let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
                .parse()
                .with_context(|| {
                    format!(
                        "Invalid listen address {}:{}",
                        config.server.host, config.server.port
                    )
                })?;
            start_server(AppState::new(pipeline), addr).await
        }
        Some(Commands::Ask(args)) => {
            let query = ChatQuery {
                message: args.message,
                zone_filter: args.zona,
                max_results: args.max_results,
                ..ChatQuery::default()
            };
            let reply = pipeline
                .handle(query)
                .await
                .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;
            println!("{}", serde_json::to_string_pretty(&reply)?);
            Ok(())
        }
        Some(Commands::Obras(args)) => {
            let listing = list_artworks(pipeline.retrieval(), args.zona.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&listing)?);
            Ok(())
        }
    }
}
