//! Pizza CLI - find a pizza store and manage your ordering profile.
//!
//! # Usage
//!
//! ```bash
//! # Read and change profile fields
//! pizza config set name=joe email=nojoe@mail.com zip=20500
//! pizza config get name address
//!
//! # Show, edit, or locate the whole profile
//! pizza config --getall
//! pizza config --edit
//! pizza config --file
//!
//! # Find the nearest store
//! pizza store --service carryout
//! ```
//!
//! # Commands
//!
//! - `config` - Read and change the ordering profile
//! - `store` - Find the nearest open store

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use pizza_core::ServiceMethod;
use tracing_subscriber::EnvFilter;

mod commands;
mod editor;
mod error;
mod persist;
mod resolver;
mod settings;
mod vendor;

use commands::store::StoreOverrides;
use error::CliError;
use persist::ConfigFile;
use settings::Settings;
use vendor::VendorClient;

#[derive(Parser)]
#[command(name = "pizza")]
#[command(author, version, about = "Order pizza from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read and change the ordering profile
    Config(ConfigArgs),
    /// Find the nearest open store
    Store(StoreArgs),
}

#[derive(clap::Args)]
struct ConfigArgs {
    #[command(subcommand)]
    action: Option<ConfigAction>,

    /// Print the path of the config file
    #[arg(short, long)]
    file: bool,

    /// Print the directory holding the config file
    #[arg(long)]
    dir: bool,

    /// Print every field
    #[arg(short = 'd', long)]
    getall: bool,

    /// Edit the whole profile in $EDITOR
    #[arg(short, long)]
    edit: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print one or more fields
    Get {
        /// Field names, e.g. `name` or `address.street`
        keys: Vec<String>,
    },
    /// Change one or more fields
    Set {
        /// `key=value` pairs; use `key=-` to clear a field. The CVV is kept
        /// for the current run only and is never saved.
        assignments: Vec<String>,
    },
}

#[derive(clap::Args)]
struct StoreArgs {
    /// Street address to search from
    #[arg(long)]
    street: Option<String>,

    /// City to search from
    #[arg(long)]
    city: Option<String>,

    /// State to search from
    #[arg(long)]
    state: Option<String>,

    /// Zip code to search from
    #[arg(long)]
    zip: Option<String>,

    /// Service method (`delivery` or `carryout`)
    #[arg(long)]
    service: Option<ServiceMethod>,
}

impl From<StoreArgs> for StoreOverrides {
    fn from(args: StoreArgs) -> Self {
        Self {
            street: args.street,
            city: args.city,
            state: args.state,
            zip: args.zip,
            service: args.service,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
#[allow(clippy::print_stderr)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!(label = e.label(), "Command failed: {e}");
        eprintln!("{}", e.report());
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::from_env()?;
    let file = ConfigFile::new(settings.config_file());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    // Locating the file must work even when it does not parse.
    if let Some(path) = requested_path(&cli.command, &settings) {
        commands::config::show_path(&path, &mut out)?;
        out.flush()?;
        return Ok(());
    }

    let loaded = file.load()?;
    let mut config = loaded.clone();

    match cli.command {
        Commands::Config(args) => match args.action {
            Some(ConfigAction::Get { keys }) => commands::config::get(&config, &keys, &mut out)?,
            Some(ConfigAction::Set { assignments }) => commands::config::set(&mut config, &assignments)?,
            None if args.getall => commands::config::list(&config, &mut out)?,
            None if args.edit => {
                commands::config::edit(&mut config, &settings.editor, &std::env::temp_dir())?;
            }
            None => print_config_usage(&mut out)?,
        },
        Commands::Store(args) => {
            let client = VendorClient::new(settings.api_base.clone());
            commands::store::show(&config, &StoreOverrides::from(args), client, &mut out).await?;
        }
    }

    if config != loaded {
        file.save(&config)?;
    }
    out.flush()?;
    Ok(())
}

/// The path asked for by `config --file` or `config --dir`, if any.
fn requested_path(command: &Commands, settings: &Settings) -> Option<PathBuf> {
    match command {
        Commands::Config(ConfigArgs {
            action: None,
            file: true,
            ..
        }) => Some(settings.config_file()),
        Commands::Config(ConfigArgs {
            action: None,
            dir: true,
            ..
        }) => Some(settings.config_dir().to_path_buf()),
        _ => None,
    }
}

fn print_config_usage(out: &mut impl Write) -> Result<(), CliError> {
    let mut cli = Cli::command();
    cli.build();
    if let Some(config) = cli.find_subcommand_mut("config") {
        write!(out, "{}", config.render_help())?;
    }
    Ok(())
}
