//! taskgate command line
//!
//! Resolve task names against a workspace from the shell.

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::process::ExitCode;
use taskgate::core::resolver::SearchScope;
use taskgate::utils::logging::init_tracing;
use taskgate::{Config, ServiceContext};

#[derive(Parser)]
#[command(name = "taskgate")]
#[command(version, about = "Rate-limit-aware name resolution for task-management APIs", long_about = None)]
struct Cli {
    /// YAML configuration file; TASKGATE_* variables override it
    #[arg(short, long, global = true, env = "TASKGATE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve one name to an id
    Resolve {
        name: String,

        /// Container id or name to search in; the whole workspace otherwise
        #[arg(long)]
        container: Option<String>,
    },

    /// Resolve several names as a batch
    ResolveMany {
        #[arg(required = true)]
        names: Vec<String>,

        #[arg(long)]
        container: Option<String>,

        #[arg(long)]
        batch_size: Option<usize>,

        #[arg(long)]
        concurrency: Option<usize>,
    },

    /// Load and validate the configuration, then print it
    CheckConfig,
}

async fn load_config(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::default(),
    };
    let config = config.with_env_overrides()?;
    config.validate()?;
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_ref()).await?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::CheckConfig => {
            let mut shown = config.clone();
            if shown.api.token.is_some() {
                shown.api.token = Some("[REDACTED]".to_string());
            }
            println!("{}", serde_yaml::to_string(&shown)?);
            println!("# {}", serde_json::to_string(&taskgate::build_info())?);
        }
        Commands::Resolve { name, container } => {
            let context = ServiceContext::connect(config)?;
            let scope = SearchScope::from_container(container);
            let resolution = context.resolve(&name, &scope).await?;
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        Commands::ResolveMany {
            names,
            container,
            batch_size,
            concurrency,
        } => {
            let context = ServiceContext::connect(config)?;
            let scope = SearchScope::from_container(container);
            let mut options = context.batch_options();
            if let Some(batch_size) = batch_size {
                options = options.with_batch_size(batch_size);
            }
            if let Some(concurrency) = concurrency {
                options = options.with_concurrency(concurrency);
            }

            let result = context.resolve_many(names, &scope, options).await?;
            let failed: Vec<_> = result
                .failed
                .iter()
                .map(|f| {
                    json!({
                        "index": f.index,
                        "name": f.item,
                        "kind": f.error.kind(),
                        "error": f.error.to_string(),
                        "attempts": f.attempts,
                    })
                })
                .collect();
            let output = json!({
                "successful": result.successful,
                "failed": failed,
                "totals": result.totals,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
