use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod campaign;
mod cli;
mod config;
mod error;
mod generator;
mod store;
mod studio;

#[cfg(test)]
mod testing;

use cli::{Cli, Commands, GenerateCommands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Values already in the environment win over .env
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Progress goes to stdout, logs to stderr
    let filter = if cli.global.verbose {
        EnvFilter::new("campaign_sim=debug")
    } else {
        EnvFilter::new("campaign_sim=info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let global = cli.global;
    match cli.command {
        Commands::Generate(GenerateCommands::Campaign(args)) => {
            cli::generate::campaign(args, global).await
        }
        Commands::Generate(GenerateCommands::Session(args)) => {
            cli::generate::session(args, global).await
        }
        Commands::Simulate(args) => cli::simulate::execute(args, global).await,
        Commands::Read(args) => cli::read::execute(args, global).await,
        Commands::Schema(args) => cli::schema::execute(args),
    }
}
