//! modforge CLI tool

#![forbid(unsafe_code)]

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{CrudCommand, InspectCommand, KindSelection, ModuleCommand, TemplatesCommand};
use modforge::config::ModforgeConfig;
use modforge::observability::{self, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "modforge")]
#[command(version)]
#[command(about = "Schema-driven module scaffolding", long_about = None)]
struct Cli {
    /// Configuration file layered over the default locations
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog locator (sqlite:, postgres://, mysql:// or a .json/.toml schema file)
    #[arg(long, global = true, value_name = "URL")]
    database_url: Option<String>,

    /// Template override directory
    #[arg(long = "templates", global = true, value_name = "DIR")]
    template_dir: Option<PathBuf>,

    /// Directory holding the modules
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate module artifacts from the entity's table
    Crud {
        /// Module name (e.g. `Catalog`)
        module: String,
        /// Entity name, singular (e.g. `Product`)
        entity: String,
        #[command(flatten)]
        kinds: KindSelection,
    },
    /// Generate every artifact of a module without reading the catalog
    Module {
        /// Module name
        module: String,
        /// Entity name, singular
        entity: String,
    },
    /// Print the normalized fields of an entity's table
    Inspect {
        /// Entity name, singular
        entity: String,
    },
    /// Manage template overrides
    Templates {
        #[command(subcommand)]
        command: TemplatesCommand,
    },
}

impl Cli {
    /// Layered configuration with command-line flags on top
    fn load_config(&self) -> Result<ModforgeConfig> {
        let mut config = ModforgeConfig::load(self.config.as_deref())
            .context("Failed to load configuration")?;

        if let Some(url) = &self.database_url {
            config.database.url = Some(url.clone());
        }
        if let Some(dir) = &self.template_dir {
            config.templates.dir = Some(dir.clone());
        }
        if let Some(root) = &self.root {
            config.output.modules_dir = root.clone();
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    observability::init(cli.verbose, format);

    let config = cli.load_config()?;

    match cli.command {
        Commands::Crud {
            module,
            entity,
            kinds,
        } => {
            CrudCommand::new(module, entity, kinds)
                .execute(&config)
                .await?;
        }
        Commands::Module { module, entity } => {
            ModuleCommand::new(module, entity).execute(&config)?;
        }
        Commands::Inspect { entity } => {
            InspectCommand::new(entity).execute(&config).await?;
        }
        Commands::Templates { command } => {
            command.execute(&config)?;
        }
    }

    Ok(())
}
