pub mod generate;
pub mod read;
pub mod schema;
pub mod simulate;

use crate::campaign::{CampaignContext, SessionOptions};
use crate::config::{Config, ConnectionOverrides};
use crate::error::CampaignError;
use crate::studio::StudioClient;
use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "campaign-sim")]
#[command(
    author,
    version,
    about = "Plan and simulate tabletop campaign sessions against a remote content store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalArgs {
    /// Enable verbose/debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file (optional)
    #[arg(short, long, global = true, default_value = "campaign-sim.yaml")]
    pub config: PathBuf,

    /// Environment ID to use for the interactions
    #[arg(short, long, global = true)]
    pub environment: Option<String>,

    /// Model ID to use for the interactions
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Studio API base URL
    #[arg(long, global = true, env = "STUDIO_URL")]
    pub studio_url: Option<String>,

    /// Object store base URL
    #[arg(long, global = true, env = "STORE_URL")]
    pub store_url: Option<String>,

    /// API key exchanged for an access token
    #[arg(long, global = true, env = "COMPOSABLE_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, global = true, env = "PROJECT_ID")]
    pub project_id: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate new sessions either for an existing campaign or a new one
    #[command(subcommand)]
    Generate(GenerateCommands),

    /// Play a number of turns, reusing unplayed plans before generating new ones
    Simulate(SimulateArgs),

    /// Print the played sessions of a campaign
    Read(ReadArgs),

    /// Print JSON Schema for the config or the record shapes
    Schema(SchemaArgs),
}

#[derive(Subcommand)]
pub enum GenerateCommands {
    /// Create a session 0 for a new campaign
    Campaign(CampaignArgs),

    /// Create a new session plan for the campaign
    Session(SessionArgs),
}

#[derive(Args, Clone, Debug, Default)]
pub struct PartyArgs {
    /// Set the theme of the campaign
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Set the level of the party
    #[arg(short, long)]
    pub level: Option<u32>,

    /// Set the size of the party
    #[arg(short, long)]
    pub size: Option<u32>,
}

#[derive(Args, Clone, Debug)]
pub struct CampaignArgs {
    #[command(flatten)]
    pub party: PartyArgs,
}

#[derive(Args, Clone, Debug)]
pub struct SessionArgs {
    pub campaign_id: String,

    /// Add objectives to the game
    #[arg(short = 'o', long = "objective", num_args = 1..)]
    pub objectives: Vec<String>,

    #[command(flatten)]
    pub party: PartyArgs,
}

#[derive(Args, Clone, Debug)]
pub struct SimulateArgs {
    pub campaign_id: String,

    /// Number of turns to simulate
    #[arg(short = 'T', long, default_value_t = 1)]
    pub turns: u32,

    /// Objectives for any plan generated during the run
    #[arg(short = 'o', long = "objective", num_args = 1..)]
    pub objectives: Vec<String>,

    #[command(flatten)]
    pub party: PartyArgs,
}

#[derive(Args, Clone, Debug)]
pub struct ReadArgs {
    pub campaign_id: String,
}

#[derive(Args, Clone, Debug)]
pub struct SchemaArgs {
    /// Which schema to print
    #[arg(value_enum, default_value_t = SchemaTarget::Config)]
    pub target: SchemaTarget,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaTarget {
    Config,
    Plan,
    Session,
}

impl GlobalArgs {
    fn connection_overrides(&self) -> ConnectionOverrides {
        ConnectionOverrides {
            studio_url: self.studio_url.clone(),
            store_url: self.store_url.clone(),
            api_key: self.api_key.clone(),
            project_id: self.project_id.clone(),
        }
    }

    pub fn session_options(&self, party: &PartyArgs, objectives: Vec<String>) -> SessionOptions {
        SessionOptions {
            objectives,
            level: party.level,
            size: party.size,
            theme: party.theme.clone(),
            model: self.model.clone(),
            environment: self.environment.clone(),
        }
    }
}

/// Load config, authenticate and resolve the record types
pub async fn connect(global: &GlobalArgs) -> anyhow::Result<CampaignContext> {
    let mut config = Config::load_or_default(&global.config)?;
    config.apply_connection(global.connection_overrides());
    config.validate().map_err(CampaignError::from)?;

    let client = Arc::new(
        StudioClient::connect(&config.connection)
            .await
            .context("Failed to connect to the studio")?,
    );

    Ok(CampaignContext::connect(config, client.clone(), client).await?)
}
